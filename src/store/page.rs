//! Page-window slicing over an in-memory collection.
//!
//! [`Pager`] owns the cursor and the "more pages" flag; the caller owns the
//! collection and the visible list.  It is generic so the windowing rules
//! can be tested on plain integers.

/// Cursor over fixed-size, page-aligned windows of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    page: usize,
    has_more: bool,
}

impl Pager {
    /// A pager at page 0 that expects more data.
    ///
    /// A `page_size` of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            has_more: true,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages loaded into the visible list so far.
    pub fn page(&self) -> usize {
        self.page
    }

    /// True iff the last window sliced was full-sized.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Load the next window of `collection` into `visible`.
    ///
    /// With `reset` the cursor rewinds, `visible` is cleared and the first
    /// window replaces it.  Without `reset` the next window is appended, or
    /// nothing happens once the collection is exhausted.  Returns how many
    /// items were added.
    pub fn load<T: Clone>(&mut self, collection: &[T], visible: &mut Vec<T>, reset: bool) -> usize {
        if reset {
            self.page = 0;
            self.has_more = true;
            visible.clear();
        }

        if !self.has_more {
            return 0;
        }

        let start = self.page.saturating_mul(self.page_size).min(collection.len());
        let end = start.saturating_add(self.page_size).min(collection.len());
        let window = &collection[start..end];

        if window.is_empty() {
            self.has_more = false;
            return 0;
        }

        visible.extend_from_slice(window);
        self.page += 1;
        self.has_more = window.len() == self.page_size;
        window.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
