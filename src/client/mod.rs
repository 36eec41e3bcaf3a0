//! Data service client
//!
//! This system only ever issues creates. Reads, updates, deletes and
//! authorization are the managed service's business.
//!
//! # Credential selection
//!
//! - Signed-in user: requests carry the user's token (user-pool mode)
//! - Otherwise: requests carry the shared API key
//! - Session lookup failures count as "nobody signed in"
//! - The mode is resolved per request, never cached

mod auth;
mod errors;
mod http;
mod memory;
mod service;

pub use auth::{
    AuthMode, AuthModeSelector, Credential, Identity, IdentityError, IdentityProvider, NoSession,
    SessionStore,
};
pub use errors::{ServiceError, ServiceResult};
pub use http::{auth_header, create_request, parse_response, GraphQlRequest, HttpDataService};
pub use memory::{CreateCall, MemoryDataService, SERVER_MANAGED};
pub use service::{CreatedRecord, DataClient, DataService};
