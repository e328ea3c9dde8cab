//! Audit trail for state-changing ShareIt operations.
//!
//! Events go to the `audit` tracing target so they can be routed separately
//! from request logs.
//!
//! # Example
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new(Some(owner_id), "booking.approve", Some(format!("booking:{}", id)), AuditOutcome::Success)
//!     .with_ip(extract_ip_from_headers(&headers))
//!     .with_details(json!({"status": "APPROVED"}))
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
    /// The caller was not allowed to perform the action
    Denied,
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Value of `X-Sharer-User-Id`, when the endpoint takes one
    pub user_id: Option<i64>,
    /// Dotted action name, e.g. `item.create` or `booking.approve`
    pub action: String,
    /// `kind:id`, e.g. `item:12`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        user_id: Option<i64>,
        action: impl Into<String>,
        resource: Option<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            user_id,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Attach a JSON-serializable payload. Serialization failures drop it.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Emit at INFO on the `audit` target.
    pub fn log(self) {
        tracing::info!(
            target: "audit",
            user_id = self.user_id,
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            user_agent = self.user_agent,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
///
/// The gateway sits in front of the server, so the socket address alone is
/// always the gateway's.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
