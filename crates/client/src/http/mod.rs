//! The authenticated HTTP core: request description, response envelope, and
//! the classifying client.

mod client;
mod envelope;
mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use envelope::{Envelope, SUCCESS_CODE};
pub use request::RequestDescriptor;
