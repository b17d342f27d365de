//! Networth Core - Item Valuation Library
//!
//! This crate prices serialized game items against a market price table:
//! - Typed item records (equipment, pets, material stacks)
//! - Canonical pricing ids (skins, editions, shiny and rune variants)
//! - Component pricers in a fixed pipeline with an itemized ledger
//! - Pet, essence and sack valuators
//! - Parallel batch valuation and per-category networth totals
//! - Reference tables (weights, reforges, prestige chains) from RON or JSON
//! - Price feed snapshots with file-watch reloads

pub mod constants;
pub mod error;
pub mod item;
pub mod logging;
pub mod normalize;
pub mod prices;
pub mod pricing;
pub mod reference;
pub mod valuation;

pub use error::{NetworthError, Result};
pub use item::ItemKind;
pub use prices::catalog::{ItemCatalog, ItemMetadata, MetadataProvider};
pub use prices::PriceTable;
pub use pricing::{EntryKind, LedgerEntry};
pub use reference::ReferenceTables;
pub use valuation::batch::{decode_batch, BatchValuation};
pub use valuation::networth::{CategoryNetworth, Networth};
pub use valuation::{calculate_item, PricedItem, Valuator};
