//! Attribute shard investment.

use super::base::strip_upgrade_prefixes;
use super::{EntryKind, LedgerEntry, Pricer, PricerOutcome, PricingContext, ValuationState};
use crate::constants::{KUUDRA_ARMOR_FAMILIES, KUUDRA_ARMOR_PIECES};

/// Shards fused to reach `tier`: tier 1 is free, each tier doubles
pub fn shard_count(tier: u32) -> u64 {
    if tier <= 1 {
        return 0;
    }
    let doublings = (tier - 1).min(63);
    (1u64 << doublings) - 1
}

/// True for any tier of Kuudra armor, e.g. `fiery_aurora_boots`
pub fn is_kuudra_armor(id: &str) -> bool {
    let stripped = strip_upgrade_prefixes(id);
    KUUDRA_ARMOR_FAMILIES.iter().any(|family| {
        stripped
            .strip_prefix(family)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|piece| KUUDRA_ARMOR_PIECES.contains(&piece))
    })
}

pub struct AttributeShards;

impl AttributeShards {
    /// Cheapest positive source for one shard of `attribute`
    fn shard_cost(ctx: &PricingContext<'_>, attribute: &str) -> Option<f64> {
        let prices = ctx.prices;
        let generic = prices.get(&format!("attribute_shard_{attribute}"));
        let base_cost = ctx
            .tables
            .attribute_base_cost(ctx.id)
            .map_or(0.0, |id| prices.get(id));
        let kuudra = if is_kuudra_armor(ctx.id) {
            let helmet = prices.get(&format!("kuudra_helmet_{attribute}"));
            if helmet > 0.0 {
                helmet
            } else {
                ["chestplate", "leggings", "boots"]
                    .iter()
                    .map(|piece| prices.get(&format!("kuudra_{piece}_{attribute}")))
                    .sum::<f64>()
                    / 3.0
            }
        } else {
            0.0
        };

        [generic, base_cost, kuudra]
            .into_iter()
            .filter(|p| *p > 0.0)
            .reduce(f64::min)
    }
}

impl Pricer for AttributeShards {
    fn name(&self) -> &'static str {
        "attribute_shards"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let weight = ctx.worth().attributes;
        let entries = ctx
            .attributes()
            .attributes
            .iter()
            .filter_map(|(attribute, &tier)| {
                let shards = shard_count(tier);
                if shards == 0 {
                    return None;
                }
                let cost = Self::shard_cost(ctx, attribute)?;
                Some(
                    LedgerEntry::new(
                        format!("{}_{tier}", attribute.to_ascii_uppercase()),
                        EntryKind::Attribute,
                        cost * shards as f64 * weight,
                        1,
                    )
                    .with_shards(shards),
                )
            })
            .collect();
        PricerOutcome::additive(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::test_support::{prices, Fixture};
    use serde_json::json;

    #[test]
    fn test_shard_formula() {
        assert_eq!(shard_count(0), 0);
        assert_eq!(shard_count(1), 0);
        assert_eq!(shard_count(2), 1);
        assert_eq!(shard_count(3), 3);
        assert_eq!(shard_count(5), 15);
        assert_eq!(shard_count(10), 511);
        assert_eq!(shard_count(200), u64::MAX >> 1);
    }

    #[test]
    fn test_kuudra_detection() {
        assert!(is_kuudra_armor("aurora_helmet"));
        assert!(is_kuudra_armor("infernal_terror_boots"));
        assert!(is_kuudra_armor("hot_crimson_chestplate"));
        assert!(!is_kuudra_armor("aurora_staff"));
        assert!(!is_kuudra_armor("molten_belt"));
    }

    #[test]
    fn test_tier_one_contributes_nothing() {
        let fixture = Fixture::new(
            json!({"id": "SOME_SWORD", "attributes": {"attackspeed": 3, "health": 1}}),
            prices(&[("attribute_shard_attackspeed", 50.0), ("attribute_shard_health", 50.0)]),
        );
        let state = fixture.run(&AttributeShards, 100.0);
        assert_eq!(state.price, 250.0);
        assert_eq!(state.ledger.len(), 1);
        assert_eq!(state.ledger[0].shards, Some(3));
        assert_eq!(state.ledger[0].id, "ATTACKSPEED_3");
    }

    #[test]
    fn test_base_cost_override_is_cheaper() {
        let fixture = Fixture::new(
            json!({"id": "INFERNO_ROD", "attributes": {"fishing_speed": 2}}),
            prices(&[("attribute_shard_fishing_speed", 500.0), ("magma_rod", 80.0)]),
        );
        assert_eq!(fixture.run(&AttributeShards, 0.0).price, 80.0);
    }

    #[test]
    fn test_kuudra_helmet_then_average() {
        let helmet = Fixture::new(
            json!({"id": "FIERY_AURORA_CHESTPLATE", "attributes": {"mana_pool": 2}}),
            prices(&[("attribute_shard_mana_pool", 900.0), ("kuudra_helmet_mana_pool", 300.0)]),
        );
        assert_eq!(helmet.run(&AttributeShards, 0.0).price, 300.0);

        let average = Fixture::new(
            json!({"id": "AURORA_BOOTS", "attributes": {"mana_pool": 2}}),
            prices(&[
                ("kuudra_chestplate_mana_pool", 300.0),
                ("kuudra_leggings_mana_pool", 600.0),
                ("kuudra_boots_mana_pool", 900.0),
            ]),
        );
        assert_eq!(average.run(&AttributeShards, 0.0).price, 600.0);
    }

    #[test]
    fn test_unpriced_attribute_skipped() {
        let fixture = Fixture::new(json!({"id": "X", "attributes": {"lifeline": 4}}), prices(&[]));
        assert!(fixture.run(&AttributeShards, 0.0).ledger.is_empty());
    }
}
