//! # HTTP Transport
//!
//! [`ApiClient`] owns the shared `reqwest::Client`, the API base URL and the optional
//! bearer token. [`RestClient`] layers the per-resource URL scheme on top of it:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET {base}` |
//! | get       | `GET {public}/{id}` |
//! | create    | `POST {base}` |
//! | update    | `PUT {admin}/{id}` |
//! | delete    | `DELETE {admin}/{id}` |
//! | reorder   | `PUT {admin}/reorder` |
//! | search    | `GET admin/search/{path}?q=` |
//!
//! where `{public}` is `{path}`, `{admin}` is `admin/{path}` and `{base}` is one or the
//! other depending on the client's [`Scope`].

use crate::framework::api::ResourceApi;
use crate::framework::error::{ApiError, ApiResult};
use crate::framework::resource::{Resource, ResourceId, SearchResult};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Shared HTTP plumbing for every resource client.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> ApiResult<Self> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::Config(format!("unsupported API base URL: {base_url}")));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    /// Absolute URL for a path relative to the API base.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses to [`ApiError`].
    pub async fn send(&self, operation: &'static str, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let path = response.url().path().to_string();
            debug!(operation, %path, "Not found");
            return Err(ApiError::NotFound(path));
        }
        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "Request failed");
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Sends the request and decodes a JSON body.
    pub async fn json<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> ApiResult<R> {
        let response = self.send(operation, builder).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Which base a client lists and creates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Public,
    Admin,
}

/// HTTP implementation of [`ResourceApi`] for one resource type.
pub struct RestClient<T: Resource> {
    api: ApiClient,
    scope: Scope,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for RestClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            scope: self.scope,
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> RestClient<T> {
    pub fn new(api: ApiClient, scope: Scope) -> Self {
        Self {
            api,
            scope,
            _resource: PhantomData,
        }
    }

    fn public_base() -> String {
        T::PATH.to_string()
    }

    fn admin_base() -> String {
        format!("admin/{}", T::PATH)
    }

    fn base(&self) -> String {
        match self.scope {
            Scope::Public => Self::public_base(),
            Scope::Admin => Self::admin_base(),
        }
    }
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for RestClient<T> {
    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn list(&self) -> ApiResult<Vec<T>> {
        debug!("Sending request");
        let request = self.api.request(Method::GET, &self.base());
        self.api.json("list", request).await
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn get(&self, id: ResourceId) -> ApiResult<T> {
        debug!("Sending request");
        let request = self.api.request(Method::GET, &format!("{}/{id}", Self::public_base()));
        self.api.json("get", request).await
    }

    #[instrument(skip(self, params), fields(resource = T::PATH))]
    async fn create(&self, params: &T::Create) -> ApiResult<T> {
        debug!(?params, "Sending request");
        let request = self.api.request(Method::POST, &self.base()).json(params);
        self.api.json("create", request).await
    }

    #[instrument(skip(self, params), fields(resource = T::PATH))]
    async fn update(&self, id: ResourceId, params: &T::Update) -> ApiResult<T> {
        debug!(?params, "Sending request");
        let request = self
            .api
            .request(Method::PUT, &format!("{}/{id}", Self::admin_base()))
            .json(params);
        self.api.json("update", request).await
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn delete(&self, id: ResourceId) -> ApiResult<()> {
        debug!("Sending request");
        let request = self.api.request(Method::DELETE, &format!("{}/{id}", Self::admin_base()));
        self.api.send("delete", request).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn reorder(&self, ids: &[ResourceId]) -> ApiResult<()> {
        debug!("Sending request");
        let request = self
            .api
            .request(Method::PUT, &format!("{}/reorder", Self::admin_base()))
            .json(ids);
        self.api.send("reorder", request).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn search(&self, query: &str) -> ApiResult<Vec<SearchResult>> {
        debug!("Sending request");
        let request = self
            .api
            .request(Method::GET, &format!("admin/search/{}", T::PATH))
            .query(&[("q", query)]);
        self.api.json("search", request).await
    }
}
