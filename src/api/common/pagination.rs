//
//  cloudflare-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination cursor for list endpoints
//!
//! List endpoints report a `result_info` block alongside the result array. The
//! same shape is embedded in every list-parameter struct as the request-side
//! cursor, so a response's block can be advanced with [`ResultInfo::next`] and
//! fed straight back into the next request.
//!
//! # Auto-pagination
//!
//! | Caller sets `page` or `per_page` | Behavior |
//! |----------------------------------|----------|
//! | No | Start at page 1 with the endpoint default page size and follow pages until done |
//! | Yes | Exactly one request with the caller's values |
//!
//! Endpoint defaults: [`DNS_RECORDS_PER_PAGE`], [`TUNNELS_PER_PAGE`],
//! [`WEB_ANALYTICS_PER_PAGE`], [`DEFAULT_PER_PAGE`].

use serde::{Deserialize, Serialize};

/// Default page size for most list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Default page size when listing DNS records.
pub const DNS_RECORDS_PER_PAGE: u32 = 100;

/// Default page size when listing tunnels.
pub const TUNNELS_PER_PAGE: u32 = 100;

/// Default page size when listing Web Analytics sites.
pub const WEB_ANALYTICS_PER_PAGE: u32 = 10;

/// Pagination block of a list response, and the request-side cursor.
///
/// `page` is 1-based. Zero in any field means "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub per_page: u32,

    /// Number of items in this page.
    #[serde(default)]
    pub count: u32,

    /// Number of items across all pages.
    #[serde(default, rename = "total_count")]
    pub total: u32,

    #[serde(default)]
    pub total_pages: u32,
}

impl ResultInfo {
    /// Cursor for an explicit page.
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }

    /// True if the caller picked a page or page size, which disables
    /// auto-pagination.
    pub fn is_caller_controlled(&self) -> bool {
        self.page >= 1 || self.per_page >= 1
    }

    /// Cursor for the following page, keeping the page size and the observed
    /// total page count.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
            count: 0,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    /// True once the cursor points past the last known page.
    ///
    /// An unknown page count (`total_pages == 0`) never reports done on its own;
    /// the driver then stops on the first empty page.
    pub fn done(&self) -> bool {
        self.total_pages >= 1 && self.page > self.total_pages
    }

    /// True if pages remain after this one.
    pub fn has_more_pages(&self) -> bool {
        self.page < self.total_pages
    }
}

/// List parameters that carry a pagination cursor.
pub trait Paginated {
    fn result_info(&self) -> &ResultInfo;
    fn result_info_mut(&mut self) -> &mut ResultInfo;
}
