//! Typed domain clients: thin bindings that fix a (path, method) pair per
//! operation and delegate to [`crate::http::HttpClient`].

mod claim;

pub use claim::{CancelRequest, ClaimApi, DisputeTicket, ItemStatus};
