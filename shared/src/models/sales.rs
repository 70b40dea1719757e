//! Sales Record Model

use super::Period;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Amount rejected at the input boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount '{0}'")]
pub struct InvalidAmount(pub String);

/// Amount as submitted by a client: a JSON number or text such as `"150,000"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

/// Largest accepted amount: one trillion yen
///
/// Keeps every total over the ledger far below `u64::MAX`.
pub const MAX_AMOUNT: u64 = 1_000_000_000_000;

impl AmountInput {
    /// Validate into whole yen
    ///
    /// Thousands separators are stripped from text input. Empty, non-numeric,
    /// fractional, negative and above-[`MAX_AMOUNT`] values are rejected.
    pub fn parse(&self) -> Result<u64, InvalidAmount> {
        let amount = match self {
            AmountInput::Integer(n) => u64::try_from(*n).ok(),
            AmountInput::Decimal(f) => (f.is_finite() && *f >= 0.0 && f.fract() == 0.0
                && *f <= MAX_AMOUNT as f64)
                .then_some(*f as u64),
            AmountInput::Text(raw) => {
                let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    cleaned.parse().ok()
                }
            }
        };
        amount
            .filter(|a| *a <= MAX_AMOUNT)
            .ok_or_else(|| InvalidAmount(self.raw()))
    }

    fn raw(&self) -> String {
        match self {
            AmountInput::Integer(n) => n.to_string(),
            AmountInput::Decimal(f) => f.to_string(),
            AmountInput::Text(raw) => raw.clone(),
        }
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(AmountInput::Integer)
            .unwrap_or(AmountInput::Decimal(value as f64))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Integer(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

/// One tenant's sales figure for one period
///
/// Persisted shape: `{id, tenantId, userId, date, amount}`; `date` carries
/// the `YYYY-MM` period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub id: String,
    pub tenant_id: String,
    /// User who entered the record (informational)
    pub user_id: String,
    #[serde(rename = "date")]
    pub period: Period,
    /// Whole yen
    pub amount: u64,
}

/// Create sales record payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecordCreate {
    /// Required for administrators, ignored for tenant users
    pub tenant_id: Option<String>,
    #[serde(alias = "date")]
    pub period: String,
    pub amount: AmountInput,
}

/// Update sales record payload (only the amount is mutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecordUpdate {
    pub amount: AmountInput,
}

/// Admin overview row for one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    pub tenant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    pub current_total: u64,
    pub previous_total: u64,
    pub percentage_change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_record: Option<SalesRecord>,
}

/// Per-period totals for charting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub period: Period,
    /// tenant id -> total; ordered by tenant id
    pub per_tenant_total: std::collections::BTreeMap<String, u64>,
    pub grand_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_field_names() {
        let record = SalesRecord {
            id: "1".into(),
            tenant_id: "1".into(),
            user_id: "tenantA".into(),
            period: "2024-03".parse().unwrap(),
            amount: 150000,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "tenantId": "1",
                "userId": "tenantA",
                "date": "2024-03",
                "amount": 150000
            })
        );
    }

    #[test]
    fn test_create_payload_accepts_date_alias() {
        let payload: SalesRecordCreate =
            serde_json::from_str(r#"{"date":"2024-04","amount":"150,000"}"#).unwrap();
        assert_eq!(payload.period, "2024-04");
        assert!(payload.tenant_id.is_none());
        assert_eq!(payload.amount, AmountInput::Text("150,000".into()));
        assert_eq!(payload.amount.parse(), Ok(150000));
    }

    #[test]
    fn test_amount_input_accepts_integers_and_grouped_text() {
        assert_eq!(AmountInput::Integer(0).parse(), Ok(0));
        assert_eq!(AmountInput::Decimal(2000.0).parse(), Ok(2000));
        assert_eq!(AmountInput::from("1,234,567").parse(), Ok(1234567));
        assert_eq!(AmountInput::from(" 42 ").parse(), Ok(42));
    }

    #[test]
    fn test_amount_input_rejects_invalid_values() {
        for bad in [
            AmountInput::Integer(-1),
            AmountInput::Decimal(1.5),
            AmountInput::Decimal(f64::NAN),
            AmountInput::from(""),
            AmountInput::from("abc"),
            AmountInput::from("-100"),
            AmountInput::from("12.5"),
            AmountInput::from(","),
        ] {
            assert!(bad.parse().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_amount_input_ceiling() {
        assert_eq!(AmountInput::from(MAX_AMOUNT).parse(), Ok(MAX_AMOUNT));
        assert!(AmountInput::from(MAX_AMOUNT + 1).parse().is_err());
        assert!(AmountInput::from(u64::MAX).parse().is_err());
        assert!(AmountInput::from("1,000,000,000,001").parse().is_err());
        assert!(AmountInput::from("99999999999999999999999").parse().is_err());
        assert!(AmountInput::Decimal(1e13).parse().is_err());
    }

    #[test]
    fn test_amount_input_deserializes_untagged() {
        let n: AmountInput = serde_json::from_str("150000").unwrap();
        assert_eq!(n, AmountInput::Integer(150000));
        let f: AmountInput = serde_json::from_str("1.5").unwrap();
        assert_eq!(f, AmountInput::Decimal(1.5));
        let t: AmountInput = serde_json::from_str("\"9,000\"").unwrap();
        assert_eq!(t, AmountInput::Text("9,000".into()));
    }
}
