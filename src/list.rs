//! Client-side list controller: search filtering and pagination.
//!
//! [`ListView`] holds the collection fetched from a backend and exposes
//! the slice the user is currently looking at. It is the state behind the
//! merchant and product tables of the `dashboard` binary.

use crate::models::{Merchant, Product};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered to users.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// An entity that can be listed, searched by name and replaced by ID.
pub trait Searchable {
    /// Text matched against the search query.
    fn search_key(&self) -> &str;

    /// Identifier used to replace or remove the entity.
    fn entity_id(&self) -> &str;
}

impl Searchable for Merchant {
    #[inline]
    fn search_key(&self) -> &str {
        &self.name
    }

    #[inline]
    fn entity_id(&self) -> &str {
        self.id.as_inner()
    }
}

impl Searchable for Product {
    #[inline]
    fn search_key(&self) -> &str {
        &self.name
    }

    #[inline]
    fn entity_id(&self) -> &str {
        self.id.as_inner()
    }
}

/// Returns `true` if `key` contains `query`, ignoring case.
///
/// An empty (or blank) query matches everything.
#[inline]
#[must_use]
pub fn matches_query(key: &str, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || key.to_lowercase().contains(&needle)
}

/// Handle identifying one list fetch.
///
/// Only the response of the most recent fetch may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// The 1-based, inclusive range of rows on the current page.
///
/// Rendered as "Showing {first} to {last} of {total} entries". An empty
/// result is `0 to 0 of 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Position of the first row shown.
    pub first: usize,
    /// Position of the last row shown.
    pub last: usize,
    /// Number of rows matching the query.
    pub total: usize,
}

/// Filtered, paginated view over a fetched collection.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    /// Full collection as last fetched.
    items: Vec<T>,
    /// Current search query.
    query: String,
    /// Current page, 1-based.
    page: usize,
    /// Rows per page, at least one.
    page_size: usize,
    /// Generation of the latest fetch.
    generation: u64,
}

impl<T> Default for ListView<T> {
    #[inline]
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            generation: 0,
        }
    }
}

impl<T: Searchable> ListView<T> {
    /// Creates an empty view with the default page size.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view over `items`.
    #[inline]
    #[must_use]
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Sets the page size (clamped to at least one) and returns to page 1.
    #[inline]
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.set_page_size(size);
        self
    }

    /// Sets the page size (clamped to at least one) and returns to page 1.
    #[inline]
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    /// Sets the search query. A different query returns to page 1.
    pub fn set_query<Q: Into<String>>(&mut self, query: Q) {
        let next = query.into();
        if next != self.query {
            tracing::trace!(query = %next, "search query changed");
            self.query = next;
            self.page = 1;
        }
    }

    /// Moves to `page`, clamped to the available pages.
    #[inline]
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Moves one page forward. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Moves one page back. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Current search query.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current page, 1-based.
    #[inline]
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    #[inline]
    #[must_use]
    pub const fn current_page_size(&self) -> usize {
        self.page_size
    }

    /// The whole collection, unfiltered.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Items matching the query, in collection order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| matches_query(item.search_key(), &self.query))
            .collect()
    }

    /// Number of items matching the query.
    #[inline]
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches_query(item.search_key(), &self.query))
            .count()
    }

    /// Number of pages for the filtered items; zero when nothing matches.
    #[inline]
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size)
    }

    /// Items on the current page.
    #[must_use]
    pub fn page_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| matches_query(item.search_key(), &self.query))
            .skip(self.offset())
            .take(self.page_size)
            .collect()
    }

    /// Position range of the current page.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        let total = self.filtered_len();
        if total == 0 {
            return PageWindow {
                first: 0,
                last: 0,
                total,
            };
        }
        let offset = self.offset();
        PageWindow {
            first: offset.saturating_add(1).min(total),
            last: offset.saturating_add(self.page_size).min(total),
            total,
        }
    }

    /// Starts a fetch; pass the ticket to [`Self::apply_fetch`].
    #[inline]
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        FetchTicket(self.generation)
    }

    /// Replaces the collection with a fetch result.
    ///
    /// Returns `false` and leaves the view untouched if a newer fetch has
    /// started since `ticket` was issued.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, items: Vec<T>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.generation,
                "discarding stale fetch"
            );
            return false;
        }
        self.items = items;
        self.clamp_page();
        true
    }

    /// Appends a newly created entity.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replaces the entity with the same ID. Returns `false` if absent.
    pub fn replace(&mut self, item: T) -> bool {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.entity_id() == item.entity_id())
        {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Removes the entity with `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.entity_id() == id)?;
        let removed = self.items.remove(index);
        self.clamp_page();
        Some(removed)
    }

    /// Number of filtered items before the current page.
    fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Pulls the page back inside the available range.
    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }
}
