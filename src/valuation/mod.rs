//! Item valuation entry points.
//!
//! - `calculate_item`: classify a raw item and price it
//! - `pet`: level-interpolated pet pricing
//! - `essence`: essence and sack material stacks
//! - `batch`: base64 batch decoding and parallel valuation
//! - `networth`: per-category totals for a whole profile

pub mod batch;
pub mod essence;
pub mod networth;
pub mod pet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::ESSENCE_ID_PREFIX;
use crate::item::{Equipment, ItemKind};
use crate::normalize::{canonical_id, display_name};
use crate::prices::catalog::MetadataProvider;
use crate::prices::PriceTable;
use crate::pricing::{run_pipeline, LedgerEntry, PricingContext};
use crate::reference::ReferenceTables;

/// A valued item with its itemized breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub name: String,
    pub id: String,
    pub price: f64,
    pub base: f64,
    pub calculation: Vec<LedgerEntry>,
    pub count: u64,
    pub soulbound: bool,
}

/// The inputs shared by every valuation in a batch
#[derive(Clone, Copy)]
pub struct Valuator<'a> {
    pub prices: &'a PriceTable,
    pub catalog: &'a dyn MetadataProvider,
    pub tables: &'a ReferenceTables,
}

impl<'a> Valuator<'a> {
    pub fn new(
        prices: &'a PriceTable,
        catalog: &'a dyn MetadataProvider,
        tables: &'a ReferenceTables,
    ) -> Self {
        Self {
            prices,
            catalog,
            tables,
        }
    }

    /// Price one raw item; `None` when it cannot be identified or priced.
    ///
    /// Bare `{id, amount}` stacks are priced only when they are essence.
    /// Other sack materials need the `sacks` category of [`Self::networth`].
    pub fn calculate_item(&self, raw: &Value) -> Option<PricedItem> {
        match ItemKind::classify(raw) {
            ItemKind::Pet(info) => self.value_pet(&info),
            ItemKind::Equipment(item) => self.value_equipment(&item),
            ItemKind::Material(stack) if stack.id.to_ascii_uppercase().starts_with(ESSENCE_ID_PREFIX) => {
                self.value_essence(&stack)
            }
            ItemKind::Material(_) | ItemKind::Unidentified => None,
        }
    }

    fn value_equipment(&self, item: &Equipment) -> Option<PricedItem> {
        let raw_id = item.attributes.raw_id()?;
        let name = item.name.as_deref()?;

        let id = canonical_id(&item.attributes, self.prices);
        let metadata = self.catalog.item(raw_id);
        let ctx = PricingContext {
            id: &id,
            item,
            metadata,
            catalog: self.catalog,
            prices: self.prices,
            tables: self.tables,
        };
        let state = run_pipeline(&ctx);

        Some(PricedItem {
            name: state.name.unwrap_or_else(|| display_name(name, metadata)),
            id,
            price: state.price,
            base: state.base,
            calculation: state.ledger,
            count: item.count.round() as u64,
            soulbound: item.is_soulbound(),
        })
    }
}

/// Price one raw item against explicit inputs
pub fn calculate_item(
    raw: &Value,
    prices: &PriceTable,
    catalog: &dyn MetadataProvider,
    tables: &ReferenceTables,
) -> Option<PricedItem> {
    Valuator::new(prices, catalog, tables).calculate_item(raw)
}
