//! Base price and the rules that rewrite it.

use super::{EntryKind, LedgerEntry, Pricer, PricerOutcome, PricingContext, ValuationState};
use crate::constants::{
    GOD_ROLL_SEPARATOR, PICKONIMBUS_MAX_DURABILITY, SHOP_TAKE_RATE, UPGRADE_TIER_PREFIXES,
};

/// Market price × stack size, falling back to the unskinned id and then to
/// the recorded shop price
pub struct BasePrice;

impl Pricer for BasePrice {
    fn name(&self) -> &'static str {
        "base_price"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let attrs = ctx.attributes();
        let count = ctx.item.count;

        let mut base = ctx.prices.get(ctx.id) * count;
        if attrs.skin.is_some() {
            let unskinned = ctx.prices.get(ctx.raw_id()) * count;
            if unskinned > base {
                base = unskinned;
            }
        }
        if base == 0.0 {
            if let Some(paid) = attrs.price.filter(|p| *p > 0.0) {
                base = paid * SHOP_TAKE_RATE;
            }
        }
        PricerOutcome::replace(base)
    }
}

pub struct PickonimbusDurability;

impl Pricer for PickonimbusDurability {
    fn name(&self) -> &'static str {
        "pickonimbus_durability"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        match ctx.attributes().pickonimbus_durability {
            Some(durability) if ctx.raw_id() == "PICKONIMBUS" => {
                PricerOutcome::scale(durability.max(0.0) / PICKONIMBUS_MAX_DURABILITY)
            }
            _ => PricerOutcome::none(),
        }
    }
}

/// Remove every upgrade-tier prefix occurrence, anywhere in the id
pub fn strip_upgrade_prefixes(id: &str) -> String {
    UPGRADE_TIER_PREFIXES
        .iter()
        .fold(id.to_string(), |acc, prefix| acc.replace(prefix, ""))
}

/// Market-recognized attribute combinations priced as a whole
pub struct GodRoll;

impl GodRoll {
    pub fn roll_id(id: &str, attributes: &[&str]) -> String {
        format!(
            "{}{GOD_ROLL_SEPARATOR}{}",
            strip_upgrade_prefixes(id),
            attributes.join(GOD_ROLL_SEPARATOR)
        )
    }
}

impl Pricer for GodRoll {
    fn name(&self) -> &'static str {
        "god_roll"
    }

    fn price(&self, ctx: &PricingContext<'_>, state: &ValuationState) -> PricerOutcome {
        let attributes = &ctx.attributes().attributes;
        if attributes.is_empty() || ctx.id == "attribute_shard" {
            return PricerOutcome::none();
        }

        // BTreeMap keys are already sorted
        let names: Vec<&str> = attributes.keys().map(String::as_str).collect();
        let roll_price = ctx.prices.get(&Self::roll_id(ctx.id, &names));
        if roll_price <= state.price {
            return PricerOutcome::none();
        }

        let entry_id = names.join(GOD_ROLL_SEPARATOR).to_ascii_uppercase();
        PricerOutcome::replace(roll_price).with_entry(LedgerEntry::new(
            entry_id,
            EntryKind::GodRoll,
            roll_price,
            1,
        ))
    }
}

/// Items bought at Shen's auction keep part of what was paid
pub struct ShensAuction;

impl Pricer for ShensAuction {
    fn name(&self) -> &'static str {
        "shens_auction"
    }

    fn price(&self, ctx: &PricingContext<'_>, state: &ValuationState) -> PricerOutcome {
        let attrs = ctx.attributes();
        let (Some(paid), Some(_), Some(_)) = (attrs.price, attrs.auction, attrs.bid) else {
            return PricerOutcome::none();
        };

        let worth = paid * ctx.worth().shens_auction_price;
        if worth <= state.price {
            return PricerOutcome::none();
        }
        PricerOutcome::additive(vec![LedgerEntry::new(
            ctx.id.to_ascii_uppercase(),
            EntryKind::ShensAuction,
            worth - state.price,
            1,
        )])
    }
}
