//! Create/edit form submission for one resource.
//!
//! Validation runs before anything else; an invalid form is reported as a warning and never
//! reaches the network. Demo mode turns submission into an informational no-op.

use crate::framework::{
    ApiError, ControllerContext, Notice, Resource, ResourceApi, ResourceId, Validate,
    ValidationError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Payload of a submitted form.
#[derive(Debug)]
pub enum FormInput<T: Resource> {
    Create(T::Create),
    Update(ResourceId, T::Update),
}

impl<T: Resource> FormInput<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            FormInput::Create(params) => params.validate(),
            FormInput::Update(_, params) => params.validate(),
        }
    }
}

/// Why a form was not saved.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid form: {0}")]
    Invalid(#[from] ValidationError),

    #[error("disabled in demo mode")]
    DemoMode,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Form controller for a single resource type.
pub struct Editor<T: Resource> {
    api: Arc<dyn ResourceApi<T>>,
    ctx: ControllerContext,
}

impl<T: Resource> Clone for Editor<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

impl<T: Resource> Editor<T> {
    pub fn new(api: impl ResourceApi<T>, ctx: ControllerContext) -> Self {
        Self {
            api: Arc::new(api),
            ctx,
        }
    }

    /// Fetches the record to edit. The caller shows failures inline.
    #[instrument(skip(self), fields(resource = T::PATH))]
    pub async fn load(&self, id: ResourceId) -> Result<T, SubmitError> {
        self.api.get(id).await.map_err(|e| {
            if e.is_not_found() {
                warn!(id, "Record not found");
            } else {
                error!(id, error = %e, status = ?e.status(), "Load failed");
            }
            SubmitError::Api(e)
        })
    }

    #[instrument(skip(self, input), fields(resource = T::PATH))]
    pub async fn submit(&self, input: FormInput<T>) -> Result<T, SubmitError> {
        if let Err(invalid) = input.validate() {
            warn!(%invalid, "Form rejected");
            self.ctx.notifier.notify(Notice::InvalidForm {
                reason: invalid.to_string(),
            });
            return Err(SubmitError::Invalid(invalid));
        }
        if self.ctx.demo_blocks() {
            return Err(SubmitError::DemoMode);
        }

        let result = match &input {
            FormInput::Create(params) => self.api.create(params).await,
            FormInput::Update(id, params) => self.api.update(*id, params).await,
        };
        match result {
            Ok(saved) => {
                info!(id = saved.id(), "Saved");
                self.ctx.notifier.notify(Notice::Saved { name: saved.label() });
                Ok(saved)
            }
            Err(e) => {
                error!(error = %e, status = ?e.status(), "Save failed");
                self.ctx.notifier.notify(Notice::SaveFailed);
                Err(SubmitError::Api(e))
            }
        }
    }
}
