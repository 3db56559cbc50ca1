//! # Audit Client
//!
//! Paginated, filtered access to the audit trail plus file exports.

use crate::framework::{ApiClient, ApiResult, Page};
use crate::model::{AuditFilter, AuditLog, ExportFormat};
use reqwest::Method;
use tracing::{debug, instrument};

const BASE: &str = "admin/audit";

/// Client for the read-only audit endpoints.
#[derive(Clone, Debug)]
pub struct AuditClient {
    api: ApiClient,
}

impl AuditClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET admin/audit?page=&size=&sort=createdAt,desc` plus the defined filters.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &AuditFilter, page: u32, size: u32) -> ApiResult<Page<AuditLog>> {
        debug!("Sending request");
        let mut query = vec![
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("sort", "createdAt,desc".to_string()),
        ];
        query.extend(filter.query_pairs());
        let request = self.api.request(Method::GET, BASE).query(&query);
        self.api.json("audit.list", request).await
    }

    /// Raw bytes of the filtered export.
    #[instrument(skip(self))]
    pub async fn export(&self, format: ExportFormat, filter: &AuditFilter) -> ApiResult<Vec<u8>> {
        debug!("Sending request");
        let request = self
            .api
            .request(Method::GET, &format!("{BASE}/export/{}", format.extension()))
            .query(&filter.query_pairs());
        let response = self.api.send("audit.export", request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
