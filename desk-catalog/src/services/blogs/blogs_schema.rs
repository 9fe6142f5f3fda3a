use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
            BlogStatus::Archived => "archived",
        }
    }
}

fn default_read_time() -> u32 {
    3
}

/// Editable blog fields. Counters (`likes`, `views`, `commentsCount`) are
/// not part of it; they are set once on create and left alone afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogInput {
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,

    #[validate(custom(function = "not_blank", message = "category is required"))]
    pub category: String,

    #[serde(default)]
    pub status: BlogStatus,

    #[serde(default = "default_read_time")]
    #[validate(range(min = 1, message = "readTime must be at least 1 minute"))]
    pub read_time: u32,

    #[validate(custom(function = "not_blank", message = "content is required"))]
    pub content: String,

    /// Current cover URL, as the edit form last saw it. Left out, the
    /// stored one is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl BlogInput {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            status: BlogStatus::default(),
            read_time: default_read_time(),
            content: content.into(),
            cover_image: None,
        }
    }

    pub fn with_status(mut self, status: BlogStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_read_time(mut self, minutes: u32) -> Self {
        self.read_time = minutes;
        self
    }

    pub fn with_cover_image(mut self, reference: impl Into<String>) -> Self {
        self.cover_image = Some(reference.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::parse;

    #[test]
    fn defaults_apply_when_missing() {
        let input: BlogInput = parse(
            &json!({"title": "Shea", "category": "care", "content": "..."}),
            "Blog validation failed",
        )
        .unwrap();
        assert_eq!(input.status, BlogStatus::Draft);
        assert_eq!(input.read_time, 3);
        assert!(input.cover_image.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse::<BlogInput>(
            &json!({"title": "a", "category": "b", "content": "c", "status": "hidden"}),
            "Blog validation failed",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Blog validation failed"));
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(BlogInput::new("a", "b", "c").with_read_time(7)).unwrap();
        assert_eq!(value["readTime"], 7);
        assert_eq!(value["status"], "draft");
        assert!(value.get("coverImage").is_none());
    }
}
