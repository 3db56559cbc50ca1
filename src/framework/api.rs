//! # ResourceApi Trait
//!
//! The seam between controllers and the network. [`RestClient`](crate::framework::RestClient)
//! implements it over HTTP; [`MockApi`](crate::framework::mock::MockApi) implements it from
//! a queue of scripted expectations.

use crate::framework::error::ApiResult;
use crate::framework::resource::{Resource, ResourceId, SearchResult};
use async_trait::async_trait;

/// Operations on one REST resource.
#[async_trait]
pub trait ResourceApi<T: Resource>: Send + Sync + 'static {
    async fn list(&self) -> ApiResult<Vec<T>>;

    /// Fetch one record. A missing record is `ApiError::NotFound`.
    async fn get(&self, id: ResourceId) -> ApiResult<T>;

    async fn create(&self, params: &T::Create) -> ApiResult<T>;

    async fn update(&self, id: ResourceId, params: &T::Update) -> ApiResult<T>;

    async fn delete(&self, id: ResourceId) -> ApiResult<()>;

    /// Persist a complete ordering of ids.
    async fn reorder(&self, ids: &[ResourceId]) -> ApiResult<()>;

    async fn search(&self, query: &str) -> ApiResult<Vec<SearchResult>>;
}
