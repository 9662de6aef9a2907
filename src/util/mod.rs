//
//  cloudflare-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the request pipeline and the resource methods.
//!
//! ## Categories
//!
//! - **Hostname Utilities**: [`to_ascii`] converts user-supplied DNS names to
//!   their ASCII (punycode) form before they reach the API.
//! - **Redaction Utilities**: [`redact`] scrubs credential material out of
//!   debug dumps.
//!
//! ## Example
//!
//! ```rust
//! use cloudflare_client::util::{redact, to_ascii};
//!
//! assert_eq!(to_ascii("😺.example.com"), "xn--138h.example.com");
//! assert_eq!(redact("token=abc", &["abc"]), "token=[redacted]");
//! ```

use idna::punycode;
use idna::uts46::{AsciiDenyList, DnsLength, Hyphens, Uts46};

/// Replacement text for credential material in logs.
pub const REDACTED: &str = "[redacted]";

/// Converts a DNS name to its ASCII form using non-transitional UTS 46
/// processing with lenient settings.
///
/// No ASCII characters are denied, hyphen placement and DNS length limits are
/// not enforced. Bidi and joiner violations do not fail the conversion: a
/// label that UTS 46 rejects is lowercased and punycode-encoded on its own,
/// so the result is always ASCII.
///
/// # Example
///
/// ```rust
/// use cloudflare_client::util::to_ascii;
///
/// assert_eq!(to_ascii(""), "");
/// assert_eq!(to_ascii("example.com"), "example.com");
/// assert_eq!(to_ascii("😺.example.com"), "xn--138h.example.com");
/// ```
pub fn to_ascii(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    match uts46_ascii(name) {
        Some(ascii) => ascii,
        None => name
            .split(['.', '\u{3002}', '\u{ff0e}', '\u{ff61}'])
            .map(label_to_ascii)
            .collect::<Vec<_>>()
            .join("."),
    }
}

fn uts46_ascii(input: &str) -> Option<String> {
    Uts46::new()
        .to_ascii(input.as_bytes(), AsciiDenyList::EMPTY, Hyphens::Allow, DnsLength::Ignore)
        .ok()
        .map(|ascii| ascii.into_owned())
}

fn label_to_ascii(label: &str) -> String {
    if label.is_ascii() {
        return label.to_ascii_lowercase();
    }
    if let Some(ascii) = uts46_ascii(label) {
        return ascii;
    }

    let lowered = label.to_lowercase();
    match punycode::encode_str(&lowered) {
        Some(encoded) => format!("xn--{}", encoded),
        None => lowered,
    }
}

/// Replaces every occurrence of each non-empty secret in `text` with
/// [`REDACTED`].
///
/// Longer secrets are replaced first so a secret that contains another one is
/// still scrubbed as a whole.
pub fn redact(text: &str, secrets: &[&str]) -> String {
    let mut ordered: Vec<&str> = secrets.iter().copied().filter(|s| !s.is_empty()).collect();
    ordered.sort_by_key(|s| std::cmp::Reverse(s.len()));

    let mut out = text.to_string();
    for secret in ordered {
        out = out.replace(secret, REDACTED);
    }
    out
}
