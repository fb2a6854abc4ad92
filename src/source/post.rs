//! The blog post record shared by every page source.
//!
//! `Post` is what a [`PageSource`](super::PageSource) hands back for one page
//! and what the renderer turns into a card.  Sources convert their native
//! format (JSON, RSS, built-in samples) into `Post`s so the controller stays
//! source-agnostic.
//!
//! ## Wire format
//!
//! The JSON shape matches the data the portfolio page was originally served
//! with (`date`, `image`, `url`); the more descriptive names `publishedDate`,
//! `imageRef` and `linkRef` are accepted as aliases when reading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single blog post.
///
/// Identity is [`id`](Post::id): within one feed session no two posts share
/// an id, and ids are always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique, positive identifier.
    pub id: u64,

    /// Headline; never empty for a well-formed post.
    pub title: String,

    /// Short teaser shown under the title.
    #[serde(default)]
    pub excerpt: String,

    /// Publication date, serialized as ISO-8601 (`YYYY-MM-DD`).
    #[serde(rename = "date", alias = "publishedDate")]
    pub published: NaiveDate,

    /// Cover image URI.  Opaque to this crate.
    #[serde(default, alias = "imageRef")]
    pub image: String,

    /// Link to the full post.  Opaque to this crate.
    #[serde(rename = "url", default, alias = "linkRef")]
    pub link: String,
}

impl Post {
    /// Human-readable date, e.g. `February 15, 2025`.
    pub fn formatted_date(&self) -> String {
        self.published.format("%B %-d, %Y").to_string()
    }

    /// Returns a description of the first structural problem with this post,
    /// if any.
    pub fn defect(&self) -> Option<String> {
        if self.id == 0 {
            return Some("post id must be positive".to_string());
        }
        if self.title.trim().is_empty() {
            return Some(format!("post {} has an empty title", self.id));
        }
        None
    }
}

/// The sample posts the portfolio page ships with.
pub fn sample_posts() -> Vec<Post> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
    vec![
        Post {
            id: 1,
            title: "Getting Started with Web Development".to_string(),
            excerpt: "Learn the fundamentals of web development and start building your first website."
                .to_string(),
            published: date(2025, 2, 15),
            image: "path/to/blog1.jpg".to_string(),
            link: "#".to_string(),
        },
        Post {
            id: 2,
            title: "Modern JavaScript Techniques".to_string(),
            excerpt: "Explore advanced JavaScript concepts and improve your coding skills."
                .to_string(),
            published: date(2025, 2, 10),
            image: "path/to/blog2.jpg".to_string(),
            link: "#".to_string(),
        },
        Post {
            id: 3,
            title: "Responsive Design Best Practices".to_string(),
            excerpt: "Master the art of creating websites that look great on any device."
                .to_string(),
            published: date(2025, 2, 5),
            image: "path/to/blog3.jpg".to_string(),
            link: "#".to_string(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_page_data_field_names() {
        let json = r##"{
            "id": 7,
            "title": "Hello",
            "excerpt": "World",
            "date": "2025-02-15",
            "image": "img.jpg",
            "url": "#hello"
        }"##;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.published, NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());
        assert_eq!(post.link, "#hello");
    }

    #[test]
    fn accepts_descriptive_aliases() {
        let json = r#"{
            "id": 1,
            "title": "Aliased",
            "publishedDate": "2024-12-01",
            "imageRef": "cover.png",
            "linkRef": "https://example.com/aliased"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.image, "cover.png");
        assert_eq!(post.link, "https://example.com/aliased");
        assert!(post.excerpt.is_empty(), "excerpt defaults to empty");
    }

    #[test]
    fn serializes_date_as_iso_8601() {
        let post = sample_posts().remove(0);
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["date"], "2025-02-15");
        assert_eq!(value["url"], "#");
    }

    #[test]
    fn formatted_date_is_long_form() {
        let post = sample_posts().remove(2);
        assert_eq!(post.formatted_date(), "February 5, 2025");
    }

    #[test]
    fn defect_flags_zero_id_and_blank_title() {
        let mut post = sample_posts().remove(0);
        assert!(post.defect().is_none());

        post.title = "   ".to_string();
        assert!(post.defect().unwrap().contains("empty title"));

        post.id = 0;
        assert!(post.defect().unwrap().contains("positive"));
    }

    #[test]
    fn sample_ids_are_unique_and_positive() {
        let posts = sample_posts();
        let mut ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), posts.len());
        assert!(posts.iter().all(|p| p.defect().is_none()));
    }
}
