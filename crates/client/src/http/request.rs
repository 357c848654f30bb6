//! Per-call request description.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{ApiError, Result};

/// Everything one call needs: target, method, payload, header overrides and
/// per-call UI behavior flags. Ephemeral; build one per request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub(crate) path: String,
    pub(crate) method: Method,
    pub(crate) body: Option<Value>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) show_loading: bool,
    pub(crate) loading_text: String,
    pub(crate) show_error: bool,
}

impl RequestDescriptor {
    /// Describe a request for `method` against `path`. A path carrying an
    /// `http://` or `https://` scheme is used verbatim; anything else is
    /// resolved against the client's base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
            show_loading: false,
            loading_text: "Loading...".to_string(),
            show_error: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body, serialized immediately.
    ///
    /// # Errors
    /// Returns `ApiError::Decode` if `body` cannot be serialized.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(
            serde_json::to_value(body)
                .map_err(|e| ApiError::Decode(format!("request body: {e}")))?,
        );
        Ok(self)
    }

    /// Append one query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Override or add one header. The `Authorization` header is overlaid
    /// with the session token after overrides, so a token always wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Show the blocking loading indicator for the call's duration.
    pub fn show_loading(mut self, show: bool) -> Self {
        self.show_loading = show;
        self
    }

    /// Label for the loading indicator.
    pub fn loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    /// Suppress the user-visible error notice for this call.
    pub fn show_error(mut self, show: bool) -> Self {
        self.show_error = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_match_call_conventions() {
        let descriptor = RequestDescriptor::get("/item/hall");
        assert_eq!(descriptor.method, Method::GET);
        assert!(!descriptor.show_loading);
        assert!(descriptor.show_error);
        assert_eq!(descriptor.loading_text, "Loading...");
        assert!(descriptor.body.is_none());
    }

    #[test]
    fn builder_accumulates_fields() {
        let descriptor = RequestDescriptor::post("/item/claim")
            .json(&json!({"itemID": "i1"}))
            .unwrap()
            .query("page", "2")
            .header("X-Trace", "t-9")
            .show_loading(true)
            .loading_text("Submitting...")
            .show_error(false);

        assert_eq!(descriptor.body, Some(json!({"itemID": "i1"})));
        assert_eq!(descriptor.query, vec![("page".to_string(), "2".to_string())]);
        assert_eq!(descriptor.headers, vec![("X-Trace".to_string(), "t-9".to_string())]);
        assert!(descriptor.show_loading);
        assert_eq!(descriptor.loading_text, "Submitting...");
        assert!(!descriptor.show_error);
    }
}
