//! Order status state machine.
//!
//! Statuses are driven by gateway notifications. The transition table below
//! describes which moves are *compatible*; the notification handler still
//! applies incompatible ones (last write wins) and only reports them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of a checkout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Token issued, no notification received yet.
    Created,

    /// Customer chose a payment method; funds not yet captured.
    Pending,

    /// Settled or captured without a fraud challenge.
    Paid,

    /// Captured but flagged for manual fraud review.
    Challenge,

    /// Rejected by the gateway or the acquirer.
    Denied,

    /// Customer did not complete payment in time.
    Expired,

    /// Cancelled by the merchant or the gateway.
    Canceled,

    /// Notification carried a status this service does not recognise.
    Unknown,
}

impl OrderStatus {
    /// Maps a gateway `transaction_status` / `fraud_status` pair.
    ///
    /// | transaction_status | fraud_status | status |
    /// |---|---|---|
    /// | settlement, capture | challenge | Challenge |
    /// | settlement, capture | other / absent | Paid |
    /// | pending | any | Pending |
    /// | deny | any | Denied |
    /// | expire | any | Expired |
    /// | cancel | any | Canceled |
    /// | anything else | any | Unknown |
    pub fn from_gateway(transaction_status: Option<&str>, fraud_status: Option<&str>) -> Self {
        match transaction_status {
            Some("settlement") | Some("capture") => {
                if fraud_status == Some("challenge") {
                    OrderStatus::Challenge
                } else {
                    OrderStatus::Paid
                }
            }
            Some("pending") => OrderStatus::Pending,
            Some("deny") => OrderStatus::Denied,
            Some("expire") => OrderStatus::Expired,
            Some("cancel") => OrderStatus::Canceled,
            _ => OrderStatus::Unknown,
        }
    }

    /// Returns the wire name, e.g. `PAID`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Challenge => "CHALLENGE",
            OrderStatus::Denied => "DENIED",
            OrderStatus::Expired => "EXPIRED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for OrderStatus {
    /// Re-applying the current status is always compatible.
    fn can_transition_to(&self, target: &Self) -> bool {
        self == target || self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Created | Pending | Unknown => vec![
                Pending, Paid, Challenge, Denied, Expired, Canceled, Unknown,
            ]
            .into_iter()
            .filter(|s| s != self)
            .collect(),
            Challenge => vec![Paid, Denied, Canceled],
            Paid | Denied | Expired | Canceled => vec![],
        }
    }
}
