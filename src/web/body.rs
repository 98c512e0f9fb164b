use anyhow::{Context, Result};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::utils::http::pretty;

/// Largest request body accepted before the request is rejected as a fault.
pub const BODY_LIMIT: usize = 100 * 1024;

/// Parsed request body, attached to the request by the access-log
/// middleware. The value is kept exactly as sent; `None` means no body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody(Option<Value>);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl RequestBody {
    pub fn new(value: Option<Value>) -> Self {
        Self(value)
    }

    pub fn parse(content_type: Option<&str>, bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value = match classify(content_type) {
            BodyKind::Json => {
                Some(serde_json::from_slice::<Value>(bytes).context("Malformed JSON body")?)
            }
            BodyKind::Form => Some(parse_form(bytes)?),
            BodyKind::Other => None,
        };

        Ok(Self::new(value))
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.0
    }

    /// True when the request carried a decodable body, even `[]` or `null`.
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// True when there is a body with something in it: not `null`, `{}` or `[]`.
    pub fn has_content(&self) -> bool {
        self.0.as_ref().is_some_and(has_content)
    }

    /// Indented rendering for the operator stream, `{}` when absent.
    pub fn pretty(&self) -> String {
        match &self.0 {
            Some(value) => pretty(value),
            None => "{}".to_string(),
        }
    }
}

fn classify(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::Form;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

// Repeated keys collect into an array, like `a=1&a=2` -> {"a": ["1", "2"]}.
fn parse_form(bytes: &[u8]) -> Result<Value> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(bytes).context("Malformed form body")?;

    let mut map = Map::new();
    for (key, value) in pairs {
        match map.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(Value::String(value));
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Value::Array(items) => items.push(Value::String(value)),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
            },
        }
    }

    Ok(Value::Object(map))
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
