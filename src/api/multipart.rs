//
//  cloudflare-client
//  api/multipart.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `multipart/form-data` body writer.
//!
//! The body is rendered into a `Vec<u8>` up front so the retrying transport
//! can resend it unchanged. Two shapes are used by the resources:
//!
//! - Generic uploads (Images, API Shield schemas) take a random boundary.
//! - DNS BIND import needs a fixed boundary, [`BIND_IMPORT_BOUNDARY`], on both
//!   of its requests.
//!
//! ```rust
//! use cloudflare_client::api::multipart::MultipartForm;
//!
//! let mut form = MultipartForm::with_boundary("XYZ");
//! form.text("proxied", "true");
//! let body = form.finish();
//!
//! assert_eq!(
//!     String::from_utf8(body).unwrap(),
//!     "--XYZ\r\nContent-Disposition: form-data; name=\"proxied\"\r\n\r\ntrue\r\n--XYZ--\r\n"
//! );
//! ```

use rand::distr::Alphanumeric;
use rand::Rng;

/// Boundary the DNS import endpoint is known to accept.
pub const BIND_IMPORT_BOUNDARY: &str = "------------------------BOUNDARY";

/// Incrementally written multipart body.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// A form with a random 30-character boundary.
    pub fn new() -> Self {
        let boundary: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(30)
            .map(char::from)
            .collect();
        Self::with_boundary(boundary)
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Appends a plain form field.
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        let headers = format!("Content-Disposition: form-data; name=\"{}\"", escape(name));
        self.part(&headers, value.as_bytes())
    }

    /// Appends a file part.
    pub fn file(&mut self, name: &str, filename: &str, content: &[u8]) -> &mut Self {
        let headers = format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream",
            escape(name),
            escape(filename)
        );
        self.part(&headers, content)
    }

    fn part(&mut self, headers: &str, content: &[u8]) -> &mut Self {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self.body.extend_from_slice(headers.as_bytes());
        self.body.extend_from_slice(b"\r\n\r\n");
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Closes the form and returns the encoded body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"--\r\n");
        self.body
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_boundaries_differ() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert_eq!(a.boundary().len(), 30);
        assert_ne!(a.boundary(), b.boundary());
    }

    #[test]
    fn test_file_and_field() {
        let mut form = MultipartForm::with_boundary(BIND_IMPORT_BOUNDARY);
        form.file("file", "bind.txt", b"www.example.com. 300 IN A 192.0.2.1")
            .text("proxied", "true");
        let body = String::from_utf8(form.finish()).unwrap();

        assert!(body.starts_with("--------------------------BOUNDARY\r\n"));
        assert!(body.contains("name=\"file\"; filename=\"bind.txt\"\r\n"));
        assert!(body.contains("\r\n\r\nwww.example.com. 300 IN A 192.0.2.1\r\n"));
        assert!(body.contains("name=\"proxied\"\r\n\r\ntrue\r\n"));
        assert!(body.ends_with("\r\n--------------------------BOUNDARY--\r\n"));
    }

    #[test]
    fn test_content_type() {
        let form = MultipartForm::with_boundary("abc");
        assert_eq!(form.content_type(), "multipart/form-data; boundary=abc");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut form = MultipartForm::with_boundary("b");
        form.file("file", "a\"b.png", b"x");
        let body = String::from_utf8(form.finish()).unwrap();
        assert!(body.contains("filename=\"a\\\"b.png\""));
    }
}
