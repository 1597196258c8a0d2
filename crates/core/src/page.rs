//! Paginated listings and the page cursor.
//!
//! The backend pages with a zero-based `page` index. Pagers in the UI count
//! from one. The cursor stored in view state is always the zero-based value
//! that will be sent on the next request; the one-based number only exists
//! at the boundary ([`PageCursor::for_ui_page`] / [`PageCursor::ui_page`]).

use serde::{Deserialize, Serialize};

/// Page size the backend applies when none is sent.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page metadata exactly as the backend reports it.
///
/// Every field is optional on the wire; [`PageCursor::from_raw`] fills the
/// gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// A paged response body: `{ content: [...], number, size, ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(flatten)]
    pub info: RawPageInfo,
}

/// Normalized position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    /// Zero-based page index used for the next request.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    /// Cursor for the first page with the given size.
    pub fn first(size: u32) -> Self {
        Self {
            number: 0,
            size,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Normalize raw backend metadata.
    ///
    /// Missing `number` means the first page, missing `size` the backend
    /// default, missing totals zero.
    pub fn from_raw(raw: &RawPageInfo) -> Self {
        Self {
            number: raw.number.unwrap_or(0),
            size: raw.size.unwrap_or(DEFAULT_PAGE_SIZE),
            total_elements: raw.total_elements.unwrap_or(0),
            total_pages: raw.total_pages.unwrap_or(0),
        }
    }

    /// Move to a one-based UI page with a new page size, keeping totals.
    ///
    /// UI page numbers below 1 are clamped to the first page.
    pub fn for_ui_page(self, ui_page: u32, size: u32) -> Self {
        Self {
            number: ui_page.saturating_sub(1),
            size,
            ..self
        }
    }

    /// One-based page number for display.
    pub fn ui_page(&self) -> u32 {
        self.number.saturating_add(1)
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    /// Query parameters for a listing request positioned at this cursor.
    pub fn query(&self) -> [(&'static str, String); 2] {
        [("page", self.number.to_string()), ("size", self.size.to_string())]
    }
}

/// A normalized page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub cursor: PageCursor,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            cursor: PageCursor::default(),
        }
    }
}

impl<T> From<PageResponse<T>> for Page<T> {
    fn from(response: PageResponse<T>) -> Self {
        Self {
            cursor: PageCursor::from_raw(&response.info),
            content: response.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_keeps_reported_values() {
        let raw = RawPageInfo {
            number: Some(2),
            size: Some(24),
            total_elements: Some(100),
            total_pages: Some(5),
        };
        let cursor = PageCursor::from_raw(&raw);
        assert_eq!(
            cursor,
            PageCursor {
                number: 2,
                size: 24,
                total_elements: 100,
                total_pages: 5
            }
        );
    }

    #[test]
    fn from_raw_fills_defaults() {
        let cursor = PageCursor::from_raw(&RawPageInfo::default());
        assert_eq!(cursor, PageCursor::first(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn ui_page_maps_to_zero_based_index() {
        for ui in 1..=20u32 {
            for size in [5u32, 10, 24] {
                let cursor = PageCursor::default().for_ui_page(ui, size);
                assert_eq!(cursor.number, ui - 1);
                assert_eq!(cursor.size, size);
                assert_eq!(cursor.ui_page(), ui);
            }
        }
    }

    #[test]
    fn ui_page_zero_clamps_to_first_page() {
        let cursor = PageCursor::default().for_ui_page(0, 10);
        assert_eq!(cursor.number, 0);
    }

    #[test]
    fn for_ui_page_keeps_totals() {
        let cursor = PageCursor {
            number: 0,
            size: 10,
            total_elements: 42,
            total_pages: 5,
        }
        .for_ui_page(3, 10);
        assert_eq!(cursor.total_elements, 42);
        assert_eq!(cursor.total_pages, 5);
    }

    #[test]
    fn has_next_on_last_page_is_false() {
        let mut cursor = PageCursor::first(10);
        cursor.total_pages = 3;
        cursor.number = 2;
        assert!(!cursor.has_next());
        cursor.number = 1;
        assert!(cursor.has_next());
    }

    #[test]
    fn query_uses_zero_based_number() {
        let cursor = PageCursor::default().for_ui_page(4, 24);
        assert_eq!(
            cursor.query(),
            [("page", "3".to_string()), ("size", "24".to_string())]
        );
    }

    #[test]
    fn page_response_deserializes_spring_shape() {
        let json = r#"{
            "content": [1, 2, 3],
            "number": 1,
            "size": 3,
            "totalElements": 9,
            "totalPages": 3,
            "first": false,
            "last": false
        }"#;
        let response: PageResponse<u32> = serde_json::from_str(json).unwrap();
        let page = Page::from(response);
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.cursor.number, 1);
        assert_eq!(page.cursor.total_pages, 3);
    }
}
