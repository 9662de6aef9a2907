//
//  cloudflare-client
//  api/common/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-string encoding for list and filter parameters.
//!
//! Parameter structs implement [`QueryParams`] by pushing their fields into a
//! [`Query`]. Plain fields are emitted only when non-empty and non-zero;
//! `Option` fields are emitted whenever they are `Some`, including
//! `Some(false)` and `Some(0)`; sequences emit one pair per element.
//!
//! ```rust
//! use cloudflare_client::api::common::{build_uri, Query, QueryParams};
//!
//! struct Filter {
//!     name: String,
//!     proxied: Option<bool>,
//!     tags: Vec<String>,
//! }
//!
//! impl QueryParams for Filter {
//!     fn append_query(&self, query: &mut Query) {
//!         query
//!             .push("name", &self.name)
//!             .push_opt("proxied", &self.proxied)
//!             .push_all("tag", &self.tags);
//!     }
//! }
//!
//! let empty = Filter { name: String::new(), proxied: None, tags: vec![] };
//! assert_eq!(build_uri("/zones", &empty), "/zones");
//!
//! let set = Filter { name: "a".into(), proxied: Some(false), tags: vec!["x".into(), "y".into()] };
//! assert_eq!(build_uri("/zones", &set), "/zones?name=a&proxied=false&tag=x&tag=y");
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded;

use super::ResultInfo;

/// A value that can appear in a query string.
pub trait QueryValue {
    /// True for the type's empty/zero value.
    fn is_zero(&self) -> bool;

    fn render(&self) -> String;
}

impl QueryValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl QueryValue for &str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render(&self) -> String {
        (*self).to_string()
    }
}

impl QueryValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

macro_rules! numeric_query_value {
    ($($t:ty),*) => {
        $(
            impl QueryValue for $t {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_query_value!(u16, u32, u64, i32, i64);

impl QueryValue for DateTime<Utc> {
    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }

    fn render(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Ordered list of query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value` unless `value` is empty or zero.
    pub fn push<V: QueryValue>(&mut self, key: &str, value: &V) -> &mut Self {
        if !value.is_zero() {
            self.pairs.push((key.to_string(), value.render()));
        }
        self
    }

    /// Adds `key=value` whenever `value` is present, zero values included.
    pub fn push_opt<V: QueryValue>(&mut self, key: &str, value: &Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.pairs.push((key.to_string(), v.render()));
        }
        self
    }

    /// Adds one `key=value` per non-empty element.
    pub fn push_all<V: QueryValue>(&mut self, key: &str, values: &[V]) -> &mut Self {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Adds `page` and `per_page` when set.
    pub fn push_pagination(&mut self, info: &ResultInfo) -> &mut Self {
        self.push("page", &info.page).push("per_page", &info.per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Renders as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Parameters that render into a query string.
pub trait QueryParams {
    fn append_query(&self, query: &mut Query);
}

impl QueryParams for () {
    fn append_query(&self, _query: &mut Query) {}
}

impl QueryParams for Query {
    fn append_query(&self, query: &mut Query) {
        query.pairs.extend(self.pairs.iter().cloned());
    }
}

/// Returns `path` alone when `params` produce no pairs, `path?query` otherwise.
///
/// `path` is never altered.
pub fn build_uri<P: QueryParams + ?Sized>(path: &str, params: &P) -> String {
    let mut query = Query::new();
    params.append_query(&mut query);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.encode())
    }
}
