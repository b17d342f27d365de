//! Prestige chains and star cost conversion.

use super::{EntryKind, LedgerEntry, Pricer, PricerOutcome, PricingContext, ValuationState};
use crate::prices::catalog::UpgradeCost;

/// Convert catalog costs into priced ledger lines; unpriced costs are dropped
pub fn cost_entries(
    ctx: &PricingContext<'_>,
    costs: &[UpgradeCost],
    kind: EntryKind,
    star: Option<u32>,
) -> Vec<LedgerEntry> {
    let worth = ctx.worth();
    costs
        .iter()
        .filter_map(|cost| {
            let (id, unit, amount, weight) = match cost {
                UpgradeCost::Essence {
                    essence_type,
                    amount,
                } => (
                    format!("{}_ESSENCE", essence_type.to_ascii_uppercase()),
                    ctx.prices.get(&format!("essence_{essence_type}")),
                    *amount,
                    worth.essence,
                ),
                UpgradeCost::Item { item_id, amount } => (
                    item_id.to_ascii_uppercase(),
                    ctx.prices.get(item_id),
                    *amount,
                    worth.prestige_item,
                ),
                UpgradeCost::Unknown => return None,
            };
            let price = unit * amount as f64 * weight;
            (price > 0.0).then(|| LedgerEntry::new(id, kind, price, amount).with_star(star))
        })
        .collect()
}

/// Unpriced prestiged items are worth the stars and prestige costs of every
/// form they passed through
pub struct PrestigeChain;

impl Pricer for PrestigeChain {
    fn name(&self) -> &'static str {
        "prestige_chain"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        if ctx.prices.is_priced(ctx.id) {
            return PricerOutcome::none();
        }

        let mut entries = Vec::new();
        for ancestor in ctx.tables.prestige_chain(ctx.id) {
            let Some(metadata) = ctx.catalog.item(ancestor) else {
                continue;
            };
            for (index, star_costs) in metadata.upgrade_costs.iter().enumerate() {
                entries.extend(cost_entries(
                    ctx,
                    star_costs,
                    EntryKind::Star,
                    Some(index as u32 + 1),
                ));
            }
            if let Some(prestige) = &metadata.prestige {
                entries.extend(cost_entries(ctx, &prestige.costs, EntryKind::Prestige, None));
            }
        }
        PricerOutcome::additive(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::ledger_total;
    use crate::pricing::test_support::{prices, Fixture};
    use crate::prices::catalog::ItemCatalog;
    use serde_json::json;

    fn kuudra_catalog() -> ItemCatalog {
        ItemCatalog::from_json_str(
            r#"[
                {"id": "CRIMSON_CHESTPLATE",
                 "upgrade_costs": [[{"type": "ESSENCE", "essence_type": "CRIMSON", "amount": 30}]],
                 "prestige": {"item_id": "HOT_CRIMSON_CHESTPLATE",
                              "costs": [{"type": "ESSENCE", "essence_type": "CRIMSON", "amount": 150},
                                        {"type": "ITEM", "item_id": "KUUDRA_TEETH", "amount": 2}]}},
                {"id": "HOT_CRIMSON_CHESTPLATE",
                 "upgrade_costs": [[{"type": "ESSENCE", "essence_type": "CRIMSON", "amount": 40}]]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_chain_sums_ancestors() {
        let fixture = Fixture::new(
            json!({"id": "BURNING_CRIMSON_CHESTPLATE"}),
            prices(&[("essence_crimson", 1000.0), ("kuudra_teeth", 5000.0)]),
        )
        .with_catalog(kuudra_catalog());

        let state = fixture.run(&PrestigeChain, 0.0);
        // hot: 40 essence; base: 30 essence, then 150 essence + 2 teeth
        let essence = (40.0 + 30.0 + 150.0) * 1000.0 * 0.75;
        assert!((state.price - (essence + 10_000.0)).abs() < 1e-6);
        assert_eq!(state.ledger.len(), 4);
        assert_eq!(state.ledger[0].kind, EntryKind::Star);
        assert_eq!(state.ledger[0].star, Some(1));
        assert_eq!(state.ledger[0].id, "CRIMSON_ESSENCE");
        assert_eq!(state.ledger[3].kind, EntryKind::Prestige);
        assert_eq!(state.ledger[3].id, "KUUDRA_TEETH");
        assert_eq!(state.price, ledger_total(&state.ledger));
    }

    #[test]
    fn test_priced_item_skips_chain() {
        let fixture = Fixture::new(
            json!({"id": "BURNING_CRIMSON_CHESTPLATE"}),
            prices(&[("burning_crimson_chestplate", 1.0), ("essence_crimson", 1000.0)]),
        )
        .with_catalog(kuudra_catalog());
        assert!(fixture.run(&PrestigeChain, 1.0).ledger.is_empty());
    }

    #[test]
    fn test_missing_metadata_contributes_nothing() {
        let fixture = Fixture::new(
            json!({"id": "INFERNAL_TERROR_BOOTS"}),
            prices(&[("essence_crimson", 1000.0)]),
        );
        assert_eq!(fixture.run(&PrestigeChain, 0.0).price, 0.0);
    }
}
