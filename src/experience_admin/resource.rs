//! [`Resource`] implementation for [`Experience`].

use crate::framework::resource::{require, require_if_present};
use crate::framework::{Resource, ResourceId, Validate, ValidationError};
use crate::model::{Experience, ExperienceCreate, ExperienceUpdate};
use chrono::{DateTime, NaiveDate, Utc};

impl Resource for Experience {
    const PATH: &'static str = "experiences";
    const ORDERABLE: bool = true;
    type Create = ExperienceCreate;
    type Update = ExperienceUpdate;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} at {}", self.position, self.company)
    }

    fn display_order(&self) -> Option<i32> {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = Some(order);
    }

    /// Most recent start date first on ties.
    fn sort_date(&self) -> Option<DateTime<Utc>> {
        self.start_date.and_hms_opt(0, 0, 0).map(|start| start.and_utc())
    }
}

fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(ValidationError::new("endDate", "must not be before the start date"))
        }
        _ => Ok(()),
    }
}

impl Validate for ExperienceCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        require("company", &self.company)?;
        require("position", &self.position)?;
        check_range(Some(self.start_date), self.end_date)
    }
}

impl Validate for ExperienceUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_present("company", self.company.as_deref())?;
        require_if_present("position", self.position.as_deref())?;
        check_range(self.start_date, self.end_date)
    }
}
