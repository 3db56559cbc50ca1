//! # CV Client
//!
//! Public access to the current CV and admin management of uploaded CVs.

use crate::framework::{ApiClient, ApiResult, ResourceId};
use crate::model::Cv;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument};

const PUBLIC_BASE: &str = "cv";
const ADMIN_BASE: &str = "admin/cv";

#[derive(Clone, Debug)]
pub struct CvClient {
    api: ApiClient,
}

impl CvClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The current CV. No CV yet (404, 204 or an empty body) is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn current(&self) -> ApiResult<Option<Cv>> {
        debug!("Sending request");
        let request = self.api.request(Method::GET, &format!("{PUBLIC_BASE}/current"));
        let response = match self.api.send("cv.current", request).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                debug!("No current CV");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ApiResult<Vec<Cv>> {
        debug!("Sending request");
        let request = self.api.request(Method::GET, ADMIN_BASE);
        self.api.json("cv.list", request).await
    }

    /// Uploads a PDF as multipart field `file`.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<Cv> {
        debug!("Sending request");
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);
        let request = self
            .api
            .request(Method::POST, &format!("{ADMIN_BASE}/upload"))
            .multipart(form);
        self.api.json("cv.upload", request).await
    }

    #[instrument(skip(self))]
    pub async fn set_current(&self, id: ResourceId) -> ApiResult<()> {
        debug!("Sending request");
        let request = self
            .api
            .request(Method::PUT, &format!("{ADMIN_BASE}/{id}/set-current"));
        self.api.send("cv.set_current", request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ResourceId) -> ApiResult<()> {
        debug!("Sending request");
        let request = self.api.request(Method::DELETE, &format!("{ADMIN_BASE}/{id}"));
        self.api.send("cv.delete", request).await?;
        Ok(())
    }

    /// Direct download link, opened outside the console.
    pub fn download_url(&self) -> String {
        self.api.url(&format!("{PUBLIC_BASE}/download"))
    }
}
