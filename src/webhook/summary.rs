use serde_json::Value;

/// Placeholder shown for a display field the payload does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

struct DisplayField {
    key: &'static str,
    fallback: &'static str,
}

const TRANSACTION_ID: DisplayField = DisplayField {
    key: "transactionId",
    fallback: NOT_AVAILABLE,
};
const STATUS: DisplayField = DisplayField {
    key: "status",
    fallback: NOT_AVAILABLE,
};
const AMOUNT: DisplayField = DisplayField {
    key: "amount",
    fallback: NOT_AVAILABLE,
};
const CUSTOMER: DisplayField = DisplayField {
    key: "customer",
    fallback: NOT_AVAILABLE,
};

/// The handful of payment fields printed for the operator. Values are
/// rendered for display only and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub transaction_id: String,
    pub status: String,
    pub amount: String,
    pub customer: String,
}

impl PaymentSummary {
    pub fn from_body(body: Option<&Value>) -> Self {
        Self {
            transaction_id: extract(body, &TRANSACTION_ID),
            status: extract(body, &STATUS),
            amount: extract(body, &AMOUNT),
            customer: extract(body, &CUSTOMER),
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("- Transaction ID: {}", self.transaction_id),
            format!("- Status: {}", self.status),
            format!("- Amount: {}", self.amount),
            format!("- Customer: {}", self.customer),
        ]
    }
}

fn extract(body: Option<&Value>, field: &DisplayField) -> String {
    body.and_then(|value| value.get(field.key))
        .filter(|value| is_truthy(value))
        .map(render)
        .unwrap_or_else(|| field.fallback.to_string())
}

// null, false, 0 and "" count as missing
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
