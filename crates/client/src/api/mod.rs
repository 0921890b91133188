//! Request wrappers, one module per backend resource.
//!
//! Every operation comes in two halves:
//! - `*_endpoint` builds the [`Endpoint`](crate::http::Endpoint) (path, query,
//!   token, body) and checks request bodies against their field rules. It is
//!   pure and does no I/O.
//! - the async function of the same name sends it through the shared
//!   [`HttpClient`](crate::http::HttpClient) and returns the validated
//!   response.
//!
//! Wrappers never retry, cache or translate errors. Token-bearing operations
//! take `Option<&str>` and do not check for its presence; the server rejects
//! unauthenticated calls.

pub mod auth;
pub mod blog;
pub mod cart;
pub mod course;
pub mod event;
pub mod notification;
pub mod order;
pub mod product;
pub mod shipping;
pub mod upload;

use crate::http::Endpoint;

/// Page selection for list endpoints. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    pub index: u32,
    pub size: u32,
}

impl Page {
    pub const DEFAULT_SIZE: u32 = 10;

    #[must_use]
    pub const fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// First page with the default size.
    #[must_use]
    pub const fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// The page after this one. Stays on the last representable index.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.index.saturating_add(1), self.size)
    }

    fn apply(self, endpoint: Endpoint) -> Endpoint {
        endpoint
            .query("page_size", self.size)
            .query("page_index", self.index)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_next() {
        let page = Page::default();
        assert_eq!(page, Page::new(1, 10));
        assert_eq!(page.next(), Page::new(2, 10));
    }

    #[test]
    fn test_next_page_saturates() {
        let last = Page::new(u32::MAX, 10);
        assert_eq!(last.next(), last);
    }

    #[test]
    fn test_page_query_order() {
        let endpoint = Page::new(3, 20).apply(Endpoint::get("events"));
        assert_eq!(
            endpoint.query,
            vec![("page_size", "20".to_string()), ("page_index", "3".to_string())]
        );
    }
}
