//! # Resource Trait
//!
//! The `Resource` trait is the contract every server-owned record (Project, Experience,
//! Article) implements so the generic [`RestClient`](crate::framework::RestClient) and
//! [`ListController`](crate::controllers::ListController) can be written once.
//!
//! Associated types pin the create and update payloads to their resource: a
//! `ProjectCreate` cannot be posted to the experiences endpoint.
//!
//! # Provided Methods (Hooks)
//! Ordering and status hooks have defaults, so resources that are neither orderable nor
//! filterable by status only implement `id` and `label`.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;
use thiserror::Error;

/// Opaque numeric identifier assigned by the server.
pub type ResourceId = i64;

/// A record owned by the REST backend and cached transiently by the console.
pub trait Resource: Clone + Debug + Send + Sync + DeserializeOwned + 'static {
    /// Path segment of the resource (e.g. `projects`).
    const PATH: &'static str;

    /// Whether the list screen supports moving items up and down.
    const ORDERABLE: bool = false;

    /// Payload accepted on creation.
    type Create: Serialize + Validate + Debug + Send + Sync + 'static;

    /// Partial payload accepted on update.
    type Update: Serialize + Validate + Debug + Send + Sync + 'static;

    fn id(&self) -> ResourceId;

    /// Human readable name shown in confirmations and notices.
    fn label(&self) -> String;

    /// Publication status, when the resource has one.
    fn status(&self) -> Option<&str> {
        None
    }

    fn display_order(&self) -> Option<i32> {
        None
    }

    fn set_display_order(&mut self, _order: i32) {}

    /// Secondary sort key, newest first.
    fn sort_date(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Display ordering: `display_order` ascending with missing values last, ties broken by
/// `sort_date` descending.
pub fn display_cmp<T: Resource>(a: &T, b: &T) -> Ordering {
    match (a.display_order(), b.display_order()) {
        (Some(x), Some(y)) if x != y => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => b.sort_date().cmp(&a.sort_date()),
    }
}

/// Minimal record returned by the admin search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Zero-indexed page envelope returned by paginated endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
            first: true,
            last: true,
        }
    }
}

/// A field that failed client-side validation.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// Client-side form validation, checked before any network call.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fails with `field is required` when `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

/// Fails when `value` is present but blank.
pub fn require_if_present(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

/// Fails when `value` exceeds `max` characters.
pub fn max_chars(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(field, format!("must be at most {max} characters")));
    }
    Ok(())
}
