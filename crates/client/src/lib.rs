//! # lostfound-client
//!
//! Client SDK for the lost-and-found platform's REST backends. The platform
//! is split across four services (user, item, claim, audit); this crate
//! provides the authenticated HTTP core they all share plus typed bindings
//! for the claim service.
//!
//! ## Architecture
//! - [`config`]: deploy-mode host tables and startup configuration
//! - [`session`]: the persisted token/identity slot and its owning context
//! - [`http`]: the classifying HTTP client (the core of the crate)
//! - [`api`]: typed per-service bindings over the client
//! - [`notify`]: the UI feedback seam (toasts, loading indicator)
//!
//! ## Usage
//! ```no_run
//! use std::sync::Arc;
//!
//! use lostfound_client::api::ClaimApi;
//! use lostfound_client::http::HttpClient;
//! use lostfound_client::session::{FileSessionStore, SessionManager};
//!
//! # async fn run() -> lostfound_client::Result<()> {
//! let config = lostfound_client::config::load()?;
//! let store = Arc::new(FileSessionStore::new("state/session.json"));
//! let session = Arc::new(SessionManager::new(store)?);
//! let http = Arc::new(HttpClient::from_config(&config, Arc::clone(&session))?);
//!
//! let claims = ClaimApi::new(Arc::clone(&http), &config.hosts);
//! let hall = claims.hall().await?;
//! println!("{} items", hall.data_as::<Vec<serde_json::Value>>()?.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod notify;
pub mod session;
pub mod testing;

pub use errors::{ApiError, ErrorCategory, Result};
pub use http::{Envelope, HttpClient, RequestDescriptor, SUCCESS_CODE};
pub use session::{Identity, Session, SessionEvent, SessionManager};
