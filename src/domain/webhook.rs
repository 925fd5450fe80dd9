//! Inbound status callbacks
//!
//! The service posts a [`WebhookPayload`] whenever an order's status changes
//! or a shipment is created or moves on. Delivery is the caller's concern;
//! this module only describes the payload and how to fold successive
//! payloads into one view of an order's shipments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::order::{OrderStatus, ShipmentStatus};
use super::wire::timestamp;

/// Deployment a callback came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookEnvironment {
    Live,
    Sandbox,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookShipment {
    /// Item ids included in the shipment
    pub items: Vec<String>,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
}

impl WebhookShipment {
    fn same_items(&self, other: &WebhookShipment) -> bool {
        let mut ours: Vec<&str> = self.items.iter().map(String::as_str).collect();
        let mut theirs: Vec<&str> = other.items.iter().map(String::as_str).collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }
}

/// Body of a status callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub order_id: u64,
    pub environment: WebhookEnvironment,
    /// When the change took place
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub status: OrderStatus,
    /// May be empty while shipments are still being allocated
    #[serde(default)]
    pub shipments: Vec<WebhookShipment>,
}

impl WebhookPayload {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Accumulated shipment state for one order, built from callbacks.
///
/// Shipments are allocated incrementally, so each payload is merged into
/// what is already known: shipments are matched by their item set, unknown
/// ones are appended and nothing is ever removed. A shipment's status never
/// moves backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentLedger {
    order_id: u64,
    status: Option<OrderStatus>,
    last_seen: Option<DateTime<Utc>>,
    shipments: Vec<WebhookShipment>,
}

impl ShipmentLedger {
    pub fn new(order_id: u64) -> Self {
        ShipmentLedger {
            order_id,
            status: None,
            last_seen: None,
            shipments: Vec::new(),
        }
    }

    pub fn order_id(&self) -> u64 {
        self.order_id
    }

    /// Order status from the most recent callback
    pub fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    pub fn shipments(&self) -> &[WebhookShipment] {
        &self.shipments
    }

    /// Merge a callback. Returns `false` if it belongs to another order.
    pub fn apply(&mut self, payload: &WebhookPayload) -> bool {
        if payload.order_id != self.order_id {
            return false;
        }

        // Out-of-order delivery: older callbacks may still add shipments
        // but must not roll the order status back.
        let is_latest = self.last_seen.map_or(true, |seen| payload.timestamp >= seen);
        if is_latest {
            self.status = Some(payload.status);
            self.last_seen = Some(payload.timestamp);
        }

        for incoming in &payload.shipments {
            match self.shipments.iter_mut().find(|known| known.same_items(incoming)) {
                Some(known) => {
                    if incoming.status.progress() >= known.status.progress() {
                        known.status = incoming.status;
                    }
                    if incoming.tracking_number.is_some() {
                        known.tracking_number = incoming.tracking_number.clone();
                    }
                    if incoming.tracking_url.is_some() {
                        known.tracking_url = incoming.tracking_url.clone();
                    }
                }
                None => self.shipments.push(incoming.clone()),
            }
        }

        debug!(
            order_id = self.order_id,
            shipments = self.shipments.len(),
            "Merged webhook payload"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(timestamp: &str, status: &str, shipments: &str) -> WebhookPayload {
        WebhookPayload::from_json(&format!(
            r#"{{"orderId":42,"environment":"SANDBOX","timestamp":"{timestamp}","status":"{status}","shipments":{shipments}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_decode_payload() {
        let p = payload(
            "2024-05-01T10:00:00Z",
            "Submitted",
            r#"[{"items":["1","2"],"status":"InProgress"}]"#,
        );

        assert_eq!(p.order_id, 42);
        assert_eq!(p.environment, WebhookEnvironment::Sandbox);
        assert_eq!(p.status, OrderStatus::Submitted);
        assert_eq!(p.shipments[0].items, vec!["1", "2"]);
        assert!(p.shipments[0].tracking_number.is_none());
    }

    #[test]
    fn test_unknown_environment_still_decodes() {
        let p = WebhookPayload::from_json(
            r#"{"orderId":42,"environment":"STAGING","timestamp":"2024-05-01T10:00:00Z","status":"Submitted","shipments":[]}"#,
        )
        .unwrap();

        assert_eq!(p.environment, WebhookEnvironment::Unrecognized);
        assert_eq!(p.status, OrderStatus::Submitted);
    }

    #[test]
    fn test_empty_shipments_never_erase() {
        let mut ledger = ShipmentLedger::new(42);
        ledger.apply(&payload(
            "2024-05-01T10:00:00Z",
            "Submitted",
            r#"[{"items":["1"],"status":"InProgress"}]"#,
        ));
        ledger.apply(&payload("2024-05-01T11:00:00Z", "Submitted", "[]"));

        assert_eq!(ledger.shipments().len(), 1);
    }

    #[test]
    fn test_shipments_merge_by_item_set() {
        let mut ledger = ShipmentLedger::new(42);
        ledger.apply(&payload(
            "2024-05-01T10:00:00Z",
            "Submitted",
            r#"[{"items":["1","2"],"status":"InProgress"}]"#,
        ));
        ledger.apply(&payload(
            "2024-05-02T10:00:00Z",
            "Submitted",
            r#"[{"items":["2","1"],"status":"Shipped","trackingNumber":"TRK1"},
                {"items":["3"],"status":"InProgress"}]"#,
        ));

        let shipments = ledger.shipments();
        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[0].status, ShipmentStatus::Shipped);
        assert_eq!(shipments[0].tracking_number.as_deref(), Some("TRK1"));
        assert_eq!(shipments[1].items, vec!["3"]);
    }

    #[test]
    fn test_shipment_status_is_monotonic() {
        let mut ledger = ShipmentLedger::new(42);
        ledger.apply(&payload(
            "2024-05-02T10:00:00Z",
            "Complete",
            r#"[{"items":["1"],"status":"Shipped","trackingNumber":"TRK1"}]"#,
        ));
        // Stale callback delivered late
        ledger.apply(&payload(
            "2024-05-01T10:00:00Z",
            "Submitted",
            r#"[{"items":["1"],"status":"InProgress"}]"#,
        ));

        assert_eq!(ledger.status(), Some(OrderStatus::Complete));
        assert_eq!(ledger.shipments()[0].status, ShipmentStatus::Shipped);
        assert_eq!(ledger.shipments()[0].tracking_number.as_deref(), Some("TRK1"));
    }

    #[test]
    fn test_other_order_is_ignored() {
        let mut ledger = ShipmentLedger::new(7);
        let applied = ledger.apply(&payload("2024-05-01T10:00:00Z", "Submitted", "[]"));

        assert!(!applied);
        assert_eq!(ledger.status(), None);
    }
}
