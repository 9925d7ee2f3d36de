use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// A specialist's offer on an active request. `price` stores the tagged
/// `QuotePrice` JSON verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuoteRow {
    pub id: Uuid,
    pub request_id: Uuid,
    pub specialist_id: Uuid,
    pub status: String,
    pub price: Value,
    pub proposed_date: Option<NaiveDate>,
    pub proposed_time_window: Option<String>,
    pub scope: Option<String>,
    pub exclusions: Option<String>,
    pub warranty: Option<String>,
    pub attachment_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Quote price, discriminated by an explicit `type` field on the wire:
/// `{"type":"fixed","amount":500.0}` or `{"type":"range","min":..,"max":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuotePrice {
    Fixed { amount: f64 },
    Range { min: f64, max: f64 },
}

impl QuotePrice {
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            QuotePrice::Fixed { amount } => {
                if *amount <= 0.0 {
                    return Err(AppError::Validation(
                        "Fixed price must be greater than zero".to_string(),
                    ));
                }
            }
            QuotePrice::Range { min, max } => {
                if *min <= 0.0 || *max <= 0.0 {
                    return Err(AppError::Validation(
                        "Price range bounds must be greater than zero".to_string(),
                    ));
                }
                if min > max {
                    return Err(AppError::Validation(
                        "Price range minimum exceeds maximum".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Effective (min, max) bounds copied onto the request when this quote
    /// is accepted. A fixed price collapses to equal bounds.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            QuotePrice::Fixed { amount } => (*amount, *amount),
            QuotePrice::Range { min, max } => (*min, *max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_price_wire_format() {
        let json = serde_json::to_value(QuotePrice::Fixed { amount: 500.0 }).unwrap();
        assert_eq!(json["type"], "fixed");
        assert_eq!(json["amount"], 500.0);
    }

    #[test]
    fn test_range_price_wire_format() {
        let json = serde_json::to_value(QuotePrice::Range {
            min: 300.0,
            max: 800.0,
        })
        .unwrap();
        assert_eq!(json["type"], "range");
    }

    #[test]
    fn test_untagged_payload_rejected() {
        assert!(serde_json::from_value::<QuotePrice>(serde_json::json!({"amount": 500.0})).is_err());
    }

    #[test]
    fn test_fixed_must_be_positive() {
        assert!(QuotePrice::Fixed { amount: 0.0 }.validate().is_err());
        assert!(QuotePrice::Fixed { amount: 500.0 }.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let price = QuotePrice::Range {
            min: 800.0,
            max: 300.0,
        };
        assert!(price.validate().is_err());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(QuotePrice::Fixed { amount: 500.0 }.bounds(), (500.0, 500.0));
        assert_eq!(
            QuotePrice::Range {
                min: 300.0,
                max: 800.0
            }
            .bounds(),
            (300.0, 800.0)
        );
    }
}
