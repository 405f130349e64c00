//! Gateway payment notifications.
//!
//! The gateway posts JSON with string-valued fields, but some integrations
//! send numbers (`"gross_amount": 90000`). Every signed field is coerced to
//! one canonical string form before it reaches the signature check, so the
//! digest is computed over exactly what the gateway signed.

use serde_json::Value;

use super::webhook_errors::WebhookError;

/// A notification as delivered to the webhook endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentNotification {
    pub order_id: Option<String>,
    pub status_code: Option<String>,
    pub gross_amount: Option<String>,
    pub signature_key: Option<String>,
    pub transaction_status: Option<String>,
    pub fraud_status: Option<String>,
    /// The full payload, kept verbatim for audit.
    pub raw: Value,
}

/// The four fields covered by the notification signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedFields<'a> {
    pub order_id: &'a str,
    pub status_code: &'a str,
    pub gross_amount: &'a str,
    pub signature_key: &'a str,
}

impl PaymentNotification {
    /// Extracts known fields from an arbitrary JSON payload.
    ///
    /// Never fails: absent or non-scalar fields become `None` and are
    /// reported later by [`PaymentNotification::signed_fields`].
    pub fn from_json(raw: Value) -> Self {
        let field = |name: &str| raw.get(name).and_then(canonical_string);
        Self {
            order_id: field("order_id"),
            status_code: field("status_code"),
            gross_amount: field("gross_amount"),
            signature_key: field("signature_key"),
            transaction_status: field("transaction_status"),
            fraud_status: field("fraud_status"),
            raw,
        }
    }

    /// Returns the signed fields, or the first one that is missing or empty.
    pub fn signed_fields(&self) -> Result<SignedFields<'_>, WebhookError> {
        fn required<'a>(
            value: &'a Option<String>,
            name: &'static str,
        ) -> Result<&'a str, WebhookError> {
            match value.as_deref() {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(WebhookError::MalformedPayload(name)),
            }
        }

        Ok(SignedFields {
            order_id: required(&self.order_id, "order_id")?,
            status_code: required(&self.status_code, "status_code")?,
            gross_amount: required(&self.gross_amount, "gross_amount")?,
            signature_key: required(&self.signature_key, "signature_key")?,
        })
    }
}

/// Canonical string form of a JSON scalar.
///
/// Strings pass through unchanged. Integral numbers render without a
/// fractional part (`90000.0` becomes `"90000"`). Booleans, null, arrays and
/// objects have no canonical form.
pub fn canonical_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < 9.0e15 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(f.to_string())
                }
            }
        }
        _ => None,
    }
}

/// Parses a gateway amount such as `"90000.00"` into whole currency units.
///
/// Returns `None` for non-numeric input or a non-zero fractional part.
pub fn parse_whole_amount(gross_amount: &str) -> Option<i64> {
    let (whole, fraction) = match gross_amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (gross_amount, ""),
    };
    if !fraction.chars().all(|c| c == '0') {
        return None;
    }
    whole.parse().ok()
}
