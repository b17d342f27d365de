//! Batch decoding and parallel valuation.

use base64::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{PricedItem, Valuator};
use crate::error::{NetworthError, Result};
use crate::logging::TimingSpan;

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a base64 payload holding a JSON array of raw items
pub fn decode_batch(payload: &str) -> Result<Vec<Value>> {
    let bytes = BASE64_STANDARD.decode(payload.trim())?;
    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Array(items) => Ok(items),
        other => Err(NetworthError::NotAnArray(json_kind(&other))),
    }
}

/// Results for one batch, tagged with the price snapshot that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchValuation {
    pub digest: String,
    pub items: Vec<Option<PricedItem>>,
}

impl Valuator<'_> {
    /// One output slot per input item, in input order
    pub fn value_items(&self, items: &[Value]) -> Vec<Option<PricedItem>> {
        let span = TimingSpan::new("value_items");
        let results: Vec<Option<PricedItem>> =
            items.par_iter().map(|raw| self.calculate_item(raw)).collect();

        info!(
            items = items.len(),
            priced = results.iter().filter(|r| r.is_some()).count(),
            elapsed_ms = span.elapsed_ms(),
            "batch valued"
        );
        results
    }

    /// Decode and value a base64 batch; decoding errors abort before any item is priced
    pub fn value_batch(&self, payload: &str) -> Result<BatchValuation> {
        let items = decode_batch(payload)?;
        Ok(BatchValuation {
            digest: self.prices.digest(),
            items: self.value_items(&items),
        })
    }
}
