use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::framework::ResourceId;

/// One entry of the admin audit trail. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: ResourceId,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<ResourceId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit query filter. Only set fields become query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub username: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AuditFilter {
    pub fn is_empty(&self) -> bool {
        self == &AuditFilter::default()
    }

    /// Query parameters for the defined, non-blank fields.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("action", &self.action),
            ("entityType", &self.entity_type),
            ("username", &self.username),
        ];
        for (key, value) in text {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.to_string()));
        }
        pairs
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_defined_filters_become_params() {
        let filter = AuditFilter {
            action: Some("DELETE".into()),
            username: Some("  ".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("action", "DELETE".to_string()), ("startDate", "2024-03-01".to_string())]
        );
        assert!(AuditFilter::default().query_pairs().is_empty());
        assert!(AuditFilter::default().is_empty());
    }
}
