//! Claim-service bindings.
//!
//! The claim service runs on its own host, so every binding builds an
//! absolute URL from the host table's claim entry and the shared client
//! passes it through untouched. Payloads are forwarded verbatim; no
//! validation, retry, or transformation happens here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{HostTable, Service};
use crate::errors::Result;
use crate::http::{Envelope, HttpClient, RequestDescriptor};

/// Lifecycle states an item moves through on the claim service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Published,
    Publishing,
    Claiming,
    Handover,
    Finished,
    Rejected,
}

/// Payload for opening a dispute on a contested claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeTicket {
    #[serde(rename = "itemID")]
    pub item_id: String,
    #[serde(rename = "claimID", skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<String>,
    pub reason: String,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<String>>,
}

/// Payload for withdrawing a pending claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(rename = "itemID")]
    pub item_id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

/// Client for the claim service's item endpoints.
pub struct ClaimApi {
    http: Arc<HttpClient>,
    base_url: String,
}

impl ClaimApi {
    /// Bind against the claim entry of `hosts`.
    pub fn new(http: Arc<HttpClient>, hosts: &HostTable) -> Self {
        let base_url = hosts.base_url(Service::Claim).trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// File a claim on a published item.
    pub async fn claim<B: Serialize>(&self, body: &B) -> Result<Envelope> {
        self.http.post(&self.url("/item/claim"), body).await
    }

    /// Report an item as found and offer it back to its owner.
    pub async fn return_item<B: Serialize>(&self, body: &B) -> Result<Envelope> {
        self.http.post(&self.url("/item/return"), body).await
    }

    /// Publisher approves a pending claim.
    pub async fn approve<B: Serialize>(&self, body: &B) -> Result<Envelope> {
        self.http.put(&self.url("/item/approve"), body).await
    }

    /// Publisher rejects a pending claim.
    pub async fn reject<B: Serialize>(&self, body: &B) -> Result<Envelope> {
        self.http.put(&self.url("/item/reject"), body).await
    }

    /// Either party confirms the physical handover.
    pub async fn confirm<B: Serialize>(&self, body: &B) -> Result<Envelope> {
        self.http.put(&self.url("/item/confirm"), body).await
    }

    /// Item detail, `params` forwarded as query pairs.
    pub async fn detail(&self, params: &[(&str, &str)]) -> Result<Envelope> {
        let mut descriptor = RequestDescriptor::get(self.url("/item/detail"));
        for (key, value) in params {
            descriptor = descriptor.query(*key, *value);
        }
        self.http.request(descriptor).await
    }

    /// Current claim status of an item as seen by a user.
    pub async fn status(&self, item_id: &str, user_id: &str) -> Result<Envelope> {
        let descriptor = RequestDescriptor::get(self.url("/item/status"))
            .query("itemID", item_id)
            .query("userID", user_id);
        self.http.request(descriptor).await
    }

    /// Open a dispute ticket on a contested claim.
    pub async fn dispute(&self, ticket: &DisputeTicket) -> Result<Envelope> {
        self.http.post(&self.url("/item/dispute"), ticket).await
    }

    /// Withdraw a pending claim. The backend maps this verb to PUT.
    pub async fn cancel(&self, request: &CancelRequest) -> Result<Envelope> {
        self.http.put(&self.url("/item/cancel"), request).await
    }

    /// The public hall of published items.
    pub async fn hall(&self) -> Result<Envelope> {
        self.http.get(&self.url("/item/hall")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn item_status_uses_wire_casing() {
        assert_eq!(serde_json::to_value(ItemStatus::Published).unwrap(), json!("PUBLISHED"));
        assert_eq!(serde_json::to_value(ItemStatus::Handover).unwrap(), json!("HANDOVER"));
        let status: ItemStatus = serde_json::from_value(json!("CLAIMING")).unwrap();
        assert_eq!(status, ItemStatus::Claiming);
    }

    #[test]
    fn dispute_ticket_serializes_wire_field_names() {
        let ticket = DisputeTicket {
            item_id: "i-1".into(),
            claim_id: Some("c-2".into()),
            reason: "not mine".into(),
            user_id: None,
            evidence: Some(vec!["photo.jpg".into()]),
        };
        assert_eq!(
            serde_json::to_value(&ticket).unwrap(),
            json!({
                "itemID": "i-1",
                "claimID": "c-2",
                "reason": "not mine",
                "evidence": ["photo.jpg"],
            })
        );
    }

    #[test]
    fn cancel_request_serializes_wire_field_names() {
        let request = CancelRequest { item_id: "i-9".into(), user_id: "u-3".into() };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"itemID": "i-9", "userID": "u-3"})
        );
    }
}
