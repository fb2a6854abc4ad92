//! Renderer contract and the row model the terminal UI draws.
//!
//! The controller never draws anything itself: it calls a [`Renderer`], and
//! [`FeedView`] turns those calls into an ordered list of [`Row`]s that
//! `ui.rs` paints.  Tests can swap in a mock renderer to count calls.

use crate::source::Post;

/// Output capabilities the feed controller invokes.
///
/// Skeleton rows inserted by [`render_skeletons`](Renderer::render_skeletons)
/// must be fully removed by [`clear_skeletons`](Renderer::clear_skeletons);
/// the controller always clears them before rendering posts or an error.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    fn render_skeletons(&mut self, count: usize);
    fn clear_skeletons(&mut self);
    /// Append posts in the given order.
    fn render_posts(&mut self, posts: &[Post]);
    fn render_error(&mut self, message: &str);
    fn clear_error(&mut self);
    /// The feed is exhausted; hide the "load more" affordance for good.
    fn hide_load_more(&mut self);
}

/// One displayable line in the blog list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Post(Post),
    Skeleton,
    Error(String),
}

/// In-memory rendering surface backing the blog section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub rows: Vec<Row>,
    /// Whether the trailing "load more" row is shown.
    pub load_more_visible: bool,
}

impl FeedView {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            load_more_visible: true,
        }
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.rows.iter().filter_map(|row| match row {
            Row::Post(post) => Some(post),
            _ => None,
        })
    }

    pub fn post_count(&self) -> usize {
        self.posts().count()
    }

    pub fn skeleton_count(&self) -> usize {
        self.rows.iter().filter(|r| matches!(r, Row::Skeleton)).count()
    }

    pub fn error(&self) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            Row::Error(msg) => Some(msg.as_str()),
            _ => None,
        })
    }

    /// Rows plus the sentinel, when shown.
    pub fn display_len(&self) -> usize {
        self.rows.len() + usize::from(self.load_more_visible)
    }
}

impl Default for FeedView {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for FeedView {
    fn render_skeletons(&mut self, count: usize) {
        self.rows
            .extend(std::iter::repeat(Row::Skeleton).take(count));
    }

    fn clear_skeletons(&mut self) {
        self.rows.retain(|r| !matches!(r, Row::Skeleton));
    }

    fn render_posts(&mut self, posts: &[Post]) {
        self.rows.extend(posts.iter().cloned().map(Row::Post));
    }

    fn render_error(&mut self, message: &str) {
        self.rows.push(Row::Error(message.to_string()));
    }

    fn clear_error(&mut self) {
        self.rows.retain(|r| !matches!(r, Row::Error(_)));
    }

    fn hide_load_more(&mut self) {
        self.load_more_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sample_posts;

    #[test]
    fn new_view_is_empty_with_load_more() {
        let view = FeedView::new();
        assert!(view.rows.is_empty());
        assert!(view.load_more_visible);
        assert_eq!(view.display_len(), 1, "only the sentinel");
    }

    #[test]
    fn skeletons_are_fully_removed() {
        let mut view = FeedView::new();
        view.render_posts(&sample_posts()[..1]);
        view.render_skeletons(3);
        assert_eq!(view.skeleton_count(), 3);

        view.clear_skeletons();
        assert_eq!(view.skeleton_count(), 0);
        assert_eq!(view.post_count(), 1, "posts survive skeleton removal");
    }

    #[test]
    fn posts_append_in_order() {
        let mut view = FeedView::new();
        let posts = sample_posts();
        view.render_posts(&posts[..2]);
        view.render_posts(&posts[2..]);

        let ids: Vec<u64> = view.posts().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn error_row_round_trip() {
        let mut view = FeedView::new();
        view.render_error("offline");
        assert_eq!(view.error(), Some("offline"));

        view.clear_error();
        assert!(view.error().is_none());
        assert!(view.rows.is_empty());
    }

    #[test]
    fn hide_load_more_drops_sentinel() {
        let mut view = FeedView::new();
        view.render_posts(&sample_posts());
        view.hide_load_more();
        assert_eq!(view.display_len(), 3);
    }
}
