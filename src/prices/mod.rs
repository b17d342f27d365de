//! Market price table.
//!
//! Maps canonical ids (material ids, `enchantment_{name}_{level}`,
//! `attribute_shard_{attribute}`, pet level keys, ...) to unit prices.
//! Keys are lowercased on the way in and queries are lowercased on lookup,
//! so the table is case-insensitive at its boundary. Unknown ids price at 0.

pub mod catalog;
pub mod feed;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::error::Result;

/// Read-only snapshot of market prices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        prices.into_iter().collect()
    }

    /// Price for a key, 0.0 when unknown
    pub fn get(&self, key: &str) -> f64 {
        let found = if key.bytes().any(|b| b.is_ascii_uppercase()) {
            self.prices.get(&key.to_ascii_lowercase())
        } else {
            self.prices.get(key)
        };
        found.copied().unwrap_or(0.0)
    }

    /// True when the key has a nonzero price
    pub fn is_priced(&self, key: &str) -> bool {
        self.get(key) > 0.0
    }

    pub fn insert(&mut self, key: impl AsRef<str>, price: f64) {
        self.prices
            .insert(key.as_ref().to_ascii_lowercase(), sanitize(price));
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let prices: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(Self::new(prices))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// SHA3-256 over the sorted table contents, hex encoded.
    ///
    /// Two tables with the same entries always share a digest, so a batch
    /// result can name the snapshot it was priced against.
    pub fn digest(&self) -> String {
        let mut keys: Vec<&String> = self.prices.keys().collect();
        keys.sort();

        let mut hasher = Sha3_256::new();
        for key in keys {
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(self.prices[key].to_bits().to_le_bytes());
            hasher.update(b"\n");
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

/// Negative and non-finite prices are treated as unpriced
fn sanitize(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (key, price) in iter {
            table.insert(key, price);
        }
        table
    }
}

impl From<HashMap<String, f64>> for PriceTable {
    fn from(prices: HashMap<String, f64>) -> Self {
        Self::new(prices)
    }
}

impl From<PriceTable> for HashMap<String, f64> {
    fn from(table: PriceTable) -> Self {
        table.prices
    }
}
