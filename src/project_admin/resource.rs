//! [`Resource`] implementation for [`Project`].
//!
//! Projects are orderable: the list screen supports move up/down and sorts by
//! `displayOrder`, newest first on ties.

use crate::framework::resource::{max_chars, require, require_if_present};
use crate::framework::{Resource, ResourceId, Validate, ValidationError};
use crate::model::{Project, ProjectCreate, ProjectUpdate};
use chrono::{DateTime, Utc};

const TITLE_MAX: usize = 200;

impl Resource for Project {
    const PATH: &'static str = "projects";
    const ORDERABLE: bool = true;
    type Create = ProjectCreate;
    type Update = ProjectUpdate;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn display_order(&self) -> Option<i32> {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = Some(order);
    }

    fn sort_date(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

fn check_url(field: &'static str, url: Option<&str>) -> Result<(), ValidationError> {
    match url {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(ValidationError::new(field, "must be an http(s) URL"))
        }
        _ => Ok(()),
    }
}

impl Validate for ProjectCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        max_chars("title", &self.title, TITLE_MAX)?;
        require("description", &self.description)?;
        check_url("githubUrl", self.github_url.as_deref())?;
        check_url("demoUrl", self.demo_url.as_deref())
    }
}

impl Validate for ProjectUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_present("title", self.title.as_deref())?;
        if let Some(title) = &self.title {
            max_chars("title", title, TITLE_MAX)?;
        }
        require_if_present("description", self.description.as_deref())?;
        check_url("githubUrl", self.github_url.as_deref())?;
        check_url("demoUrl", self.demo_url.as_deref())
    }
}
