//! Post feed, comments, and likes.

use serde::Serialize;

use crate::{
    ApiClient, ApiError,
    types::{FeedPage, Post},
};

impl ApiClient {
    /// Fetch one page of the feed (1-based).
    ///
    /// Server order is preserved verbatim. Use [`FeedPager`] to drive
    /// sequential page loads.
    pub async fn feed_page(&self, page: u32) -> Result<FeedPage, ApiError> {
        self.get_json_query("/posts", &[("page", page)]).await
    }

    /// Publish a post.
    pub async fn create_post(&self, content: &str) -> Result<Post, ApiError> {
        #[derive(Serialize)]
        struct NewPost<'a> {
            content: &'a str,
        }
        self.post_json("/posts", &NewPost { content }).await
    }

    /// Comment on a post.
    pub async fn comment(&self, post_id: &str, text: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct NewComment<'a> {
            text: &'a str,
        }
        self.post_unit(&format!("/posts/{post_id}/comments"), &NewComment { text }).await
    }

    /// Like a post.
    pub async fn like(&self, post_id: &str) -> Result<(), ApiError> {
        self.post_unit(&format!("/posts/{post_id}/like"), &()).await
    }

    /// Remove a like.
    pub async fn unlike(&self, post_id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/posts/{post_id}/like")).await
    }
}

/// Sequential page cursor for the feed.
///
/// Guards the two pagination rules: a new fetch is only started once the
/// previous one has resolved (explicit in-flight flag), and no page past
/// `totalPages` is requested. The caller owns the actual trigger (in the
/// original client, a visibility intersection at the end of the list).
#[derive(Debug)]
pub struct FeedPager {
    next_page: u32,
    total_pages: Option<u32>,
    in_flight: bool,
}

impl Default for FeedPager {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedPager {
    /// Pager positioned before the first page (pages are 1-based).
    pub fn new() -> Self {
        Self { next_page: 1, total_pages: None, in_flight: false }
    }

    /// True while pages may remain.
    pub fn has_more(&self) -> bool {
        self.total_pages.is_none_or(|total| self.next_page <= total)
    }

    /// True while a fetch is unresolved.
    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// Claim the next page number, or `None` when a fetch is already in
    /// flight or the feed is exhausted.
    pub fn begin(&mut self) -> Option<u32> {
        if self.in_flight || !self.has_more() {
            return None;
        }
        self.in_flight = true;
        Some(self.next_page)
    }

    /// Record a resolved page.
    pub fn complete(&mut self, page: &FeedPage) {
        self.in_flight = false;
        self.total_pages = Some(page.pagination.total_pages);
        self.next_page += 1;
    }

    /// Record a failed fetch; the same page may be claimed again.
    pub fn abort(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::types::Pagination;

    use super::*;

    fn page(total_pages: u32) -> FeedPage {
        FeedPage { items: Vec::new(), pagination: Pagination { total_pages } }
    }

    #[test]
    fn no_concurrent_fetches_for_the_same_cursor() {
        let mut pager = FeedPager::new();
        assert_eq!(pager.begin(), Some(1));
        // Unresolved: the trigger may fire again but no fetch starts.
        assert_eq!(pager.begin(), None);

        pager.complete(&page(3));
        assert_eq!(pager.begin(), Some(2));
    }

    #[test]
    fn stops_at_total_pages() {
        let mut pager = FeedPager::new();
        assert_eq!(pager.begin(), Some(1));
        pager.complete(&page(1));

        assert!(!pager.has_more());
        assert_eq!(pager.begin(), None);
    }

    #[test]
    fn abort_releases_the_cursor_without_advancing() {
        let mut pager = FeedPager::new();
        assert_eq!(pager.begin(), Some(1));
        pager.abort();
        assert_eq!(pager.begin(), Some(1));
    }
}
