//! Component pricers and the fixed valuation pipeline.
//!
//! Each pricer looks at one feature of an item and returns a
//! [`PricerOutcome`]: a price change plus the ledger lines explaining it.
//! Pricers never mutate anything themselves; [`run_pipeline`] applies their
//! outcomes in order, so later rules see the running price left by earlier
//! ones.

pub mod attributes;
pub mod base;
pub mod counters;
pub mod enchantments;
pub mod ledger;
pub mod prestige;
pub mod upgrades;

use tracing::debug;

use crate::item::{Equipment, ExtraAttributes};
use crate::prices::catalog::{ItemMetadata, MetadataProvider};
use crate::prices::PriceTable;
use crate::reference::{ApplicationWorth, ReferenceTables};

pub use ledger::{ledger_total, EntryKind, LedgerEntry};

/// Everything a pricer may read for one item
pub struct PricingContext<'a> {
    /// Canonical lowercase id
    pub id: &'a str,
    pub item: &'a Equipment,
    /// Catalog entry for the raw id, when known
    pub metadata: Option<&'a ItemMetadata>,
    pub catalog: &'a dyn MetadataProvider,
    pub prices: &'a PriceTable,
    pub tables: &'a ReferenceTables,
}

impl<'a> PricingContext<'a> {
    pub fn attributes(&self) -> &'a ExtraAttributes {
        &self.item.attributes
    }

    pub fn raw_id(&self) -> &'a str {
        self.item.attributes.raw_id().unwrap_or_default()
    }

    pub fn worth(&self) -> &'a ApplicationWorth {
        &self.tables.application_worth
    }

    pub fn category(&self) -> Option<&'a str> {
        self.metadata.and_then(|m| m.category.as_deref())
    }

    /// Ledger line for `count` units of a priced material, `None` when unpriced
    pub fn material_entry(
        &self,
        material: &str,
        kind: EntryKind,
        count: u64,
        worth: f64,
    ) -> Option<LedgerEntry> {
        let unit = self.prices.get(material);
        (unit > 0.0 && count > 0).then(|| {
            LedgerEntry::new(
                material.to_ascii_uppercase(),
                kind,
                unit * count as f64 * worth,
                count,
            )
        })
    }
}

/// How a pricer moves the running price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceChange {
    None,
    Add(f64),
    /// Multiply both price and base
    Scale(f64),
    /// Overwrite both price and base
    Replace(f64),
}

/// Result of one pricer
#[derive(Debug, Clone, PartialEq)]
pub struct PricerOutcome {
    pub change: PriceChange,
    pub entries: Vec<LedgerEntry>,
    pub rename: Option<String>,
}

impl PricerOutcome {
    pub fn none() -> Self {
        Self {
            change: PriceChange::None,
            entries: Vec::new(),
            rename: None,
        }
    }

    /// Add the sum of `entries`
    pub fn additive(entries: Vec<LedgerEntry>) -> Self {
        if entries.is_empty() {
            return Self::none();
        }
        Self {
            change: PriceChange::Add(ledger_total(&entries)),
            entries,
            rename: None,
        }
    }

    pub fn scale(factor: f64) -> Self {
        Self {
            change: PriceChange::Scale(factor),
            ..Self::none()
        }
    }

    pub fn replace(price: f64) -> Self {
        Self {
            change: PriceChange::Replace(price),
            ..Self::none()
        }
    }

    pub fn with_entry(mut self, entry: LedgerEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn renamed(mut self, name: String) -> Self {
        self.rename = Some(name);
        self
    }

    pub fn is_noop(&self) -> bool {
        self.change == PriceChange::None && self.entries.is_empty() && self.rename.is_none()
    }
}

/// Running state of one valuation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationState {
    pub base: f64,
    pub price: f64,
    pub ledger: Vec<LedgerEntry>,
    pub name: Option<String>,
}

impl ValuationState {
    pub fn apply(&mut self, outcome: PricerOutcome) {
        match outcome.change {
            PriceChange::None => {}
            PriceChange::Add(delta) => self.price += delta,
            PriceChange::Scale(factor) => {
                self.price *= factor;
                self.base *= factor;
            }
            PriceChange::Replace(price) => {
                self.price = price;
                self.base = price;
            }
        }
        self.ledger.extend(outcome.entries);
        if let Some(name) = outcome.rename {
            self.name = Some(name);
        }
    }
}

/// One pricing rule
pub trait Pricer: Sync {
    fn name(&self) -> &'static str;
    fn price(&self, ctx: &PricingContext<'_>, state: &ValuationState) -> PricerOutcome;
}

/// Pricers in application order
pub static PIPELINE: &[&dyn Pricer] = &[
    &base::BasePrice,
    &base::PickonimbusDurability,
    &base::GodRoll,
    &prestige::PrestigeChain,
    &base::ShensAuction,
    &enchantments::EnchantedBook,
    &enchantments::Enchantments,
    &attributes::AttributeShards,
    &counters::POCKET_SACK_IN_A_SACK,
    &counters::WOOD_SINGULARITY,
    &counters::JALAPENO_BOOK,
    &counters::TUNED_TRANSMISSION,
    &counters::MANA_DISINTEGRATOR,
    &counters::ART_OF_WAR,
    &counters::ART_OF_PEACE,
    &counters::FARMING_FOR_DUMMIES,
    &counters::DIVAN_POWDER_COATING,
    &counters::POLARVOID,
    &counters::ETHERWARP,
    &upgrades::PotatoBooks,
    &upgrades::ThunderInABottle,
    &upgrades::Recombobulator,
    &upgrades::Enrichment,
    &upgrades::Reforge,
    &upgrades::DungeonStars,
    &upgrades::MasterStars,
    &upgrades::AppliedRunes,
    &upgrades::Gemstones,
    &upgrades::NecronScrolls,
    &upgrades::PowerScroll,
    &upgrades::DrillParts,
    &upgrades::Dye,
];

/// Run every pricer in order against a fresh state
pub fn run_pipeline(ctx: &PricingContext<'_>) -> ValuationState {
    let mut state = ValuationState::default();
    for pricer in PIPELINE {
        let outcome = pricer.price(ctx, &state);
        if outcome.is_noop() {
            continue;
        }
        debug!(
            pricer = pricer.name(),
            id = ctx.id,
            change = ?outcome.change,
            entries = outcome.entries.len(),
            "pricer applied"
        );
        state.apply(outcome);
    }
    state
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_changes() {
        let mut state = ValuationState::default();
        state.apply(PricerOutcome::replace(100.0));
        state.apply(PricerOutcome::scale(0.5));
        assert_eq!((state.base, state.price), (50.0, 50.0));

        state.apply(PricerOutcome::additive(vec![LedgerEntry::new(
            "X",
            EntryKind::Enchant,
            25.0,
            1,
        )]));
        assert_eq!((state.base, state.price), (50.0, 75.0));
        assert_eq!(state.ledger.len(), 1);
    }

    #[test]
    fn test_empty_additive_is_noop() {
        assert!(PricerOutcome::additive(Vec::new()).is_noop());
        assert!(!PricerOutcome::replace(0.0).is_noop());
    }

    #[test]
    fn test_pipeline_ledger_sum() {
        let fixture = Fixture::new(
            json!({
                "id": "HYPERION",
                "enchantments": {"sharpness": 6, "champion": 4},
                "hot_potato_count": 12,
                "modifier": "heroic",
                "wood_singularity_count": 1
            }),
            prices(&[
                ("hyperion", 1000.0),
                ("enchantment_sharpness_6", 100.0),
                ("enchantment_champion_1", 40.0),
                ("hot_potato_book", 10.0),
                ("fuming_potato_book", 20.0),
                ("wood_singularity", 300.0),
            ]),
        );
        let state = run_pipeline(&fixture.ctx());
        assert_eq!(state.base, 1000.0);
        assert!((state.price - state.base - ledger_total(&state.ledger)).abs() < 1e-9);
        // 85 + 34 + 100 + 24 + 150
        assert!((state.price - 1393.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_order() {
        let names: Vec<&str> = PIPELINE.iter().map(|p| p.name()).collect();
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
        assert_eq!(pos("base_price"), 0);
        assert!(pos("pickonimbus_durability") < pos("god_roll"));
        assert!(pos("god_roll") < pos("prestige_chain"));
        assert!(pos("shens_auction") < pos("enchanted_book"));
        assert!(pos("enchanted_book") < pos("enchantments"));
        assert!(pos("enchantments") < pos("attribute_shards"));
        assert!(pos("attribute_shards") < pos("pocket_sack_in_a_sack"));
    }
}
