pub(crate) mod api_client;
pub(crate) mod auth_payload;
pub(crate) mod csrf;
pub mod endpoints;
pub(crate) mod envelope;

pub use api_client::{ApiClient, RegisterRequest};
pub use auth_payload::{ApiUser, ApiUserSettings, AuthPayload};
pub use csrf::resolve_csrf_token;
pub use envelope::ApiEnvelope;
