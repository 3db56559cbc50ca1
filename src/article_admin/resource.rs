//! [`Resource`] implementation for [`Article`].
//!
//! Articles are not orderable; the list screen filters them by status instead.

use crate::framework::resource::{max_chars, require, require_if_present};
use crate::framework::{Resource, ResourceId, Validate, ValidationError};
use crate::model::{Article, ArticleCreate, ArticleUpdate};
use chrono::{DateTime, Utc};

const TITLE_MAX: usize = 200;
const SUMMARY_MAX: usize = 500;

impl Resource for Article {
    const PATH: &'static str = "articles";
    type Create = ArticleCreate;
    type Update = ArticleUpdate;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn sort_date(&self) -> Option<DateTime<Utc>> {
        Some(self.published_at.unwrap_or(self.created_at))
    }
}

fn check_slug(slug: Option<&str>) -> Result<(), ValidationError> {
    let Some(slug) = slug else {
        return Ok(());
    };
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(ValidationError::new(
            "slug",
            "may only contain lowercase letters, digits and dashes",
        ));
    }
    Ok(())
}

impl Validate for ArticleCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        max_chars("title", &self.title, TITLE_MAX)?;
        require("content", &self.content)?;
        if let Some(summary) = &self.summary {
            max_chars("summary", summary, SUMMARY_MAX)?;
        }
        check_slug(self.slug.as_deref())
    }
}

impl Validate for ArticleUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_present("title", self.title.as_deref())?;
        if let Some(title) = &self.title {
            max_chars("title", title, TITLE_MAX)?;
        }
        require_if_present("content", self.content.as_deref())?;
        if let Some(summary) = &self.summary {
            max_chars("summary", summary, SUMMARY_MAX)?;
        }
        check_slug(self.slug.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_must_be_kebab_case() {
        let mut form = ArticleCreate {
            title: "Hello".into(),
            content: "Body".into(),
            slug: Some("hello-world-2".into()),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
        form.slug = Some("Hello World".into());
        assert_eq!(form.validate().unwrap_err().field, "slug");
    }

    #[test]
    fn content_is_required() {
        let form = ArticleCreate {
            title: "Hello".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "content");
    }
}
