//! Applied upgrades: potato books, stars, reforges, runes, gemstones and
//! the other one-off modifiers an item can carry.

use super::prestige::cost_entries;
use super::{EntryKind, LedgerEntry, Pricer, PricerOutcome, PricingContext, ValuationState};
use crate::constants::{DUNGEON_STAR_CAP, HOT_POTATO_BOOK_CAP, THUNDER_CHARGE_PER_BOTTLE};

pub struct PotatoBooks;

impl Pricer for PotatoBooks {
    fn name(&self) -> &'static str {
        "potato_books"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let Some(total) = ctx.attributes().hot_potato_count.filter(|n| *n > 0) else {
            return PricerOutcome::none();
        };
        let worth = ctx.worth();
        let hot = total.min(HOT_POTATO_BOOK_CAP);
        let fuming = total - hot;

        let entries = [
            ctx.material_entry("hot_potato_book", EntryKind::HotPotatoBook, hot as u64, worth.hot_potato_book),
            ctx.material_entry(
                "fuming_potato_book",
                EntryKind::FumingPotatoBook,
                fuming as u64,
                worth.fuming_potato_book,
            ),
        ];
        PricerOutcome::additive(entries.into_iter().flatten().collect())
    }
}

pub struct ThunderInABottle;

impl Pricer for ThunderInABottle {
    fn name(&self) -> &'static str {
        "thunder_in_a_bottle"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        if ctx.id != "pulse_ring" {
            return PricerOutcome::none();
        }
        let bottles = ctx.attributes().thunder_charge.unwrap_or(0) / THUNDER_CHARGE_PER_BOTTLE;
        let entry = ctx.material_entry(
            "thunder_in_a_bottle",
            EntryKind::ThunderInABottle,
            bottles,
            ctx.worth().thunder_in_a_bottle,
        );
        PricerOutcome::additive(entry.into_iter().collect())
    }
}

pub struct Recombobulator;

impl Pricer for Recombobulator {
    fn name(&self) -> &'static str {
        "recombobulator"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let attrs = ctx.attributes();
        if attrs.rarity_upgrades.unwrap_or(0) == 0 || ctx.id == "enchanted_book" {
            return PricerOutcome::none();
        }
        let eligible = !attrs.enchantments.is_empty() || ctx.tables.allows_recomb(ctx.id, ctx.category());
        if !eligible {
            return PricerOutcome::none();
        }
        let entry = ctx.material_entry("recombobulator_3000", EntryKind::Recombobulator, 1, ctx.worth().recomb);
        PricerOutcome::additive(entry.into_iter().collect())
    }
}

/// Priced at the cheapest enrichment, since any one can be re-rolled into
/// another
pub struct Enrichment;

impl Pricer for Enrichment {
    fn name(&self) -> &'static str {
        "enrichment"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let Some(enrichment) = ctx.attributes().talisman_enrichment.as_deref() else {
            return PricerOutcome::none();
        };
        let cheapest = ctx
            .tables
            .enrichments
            .iter()
            .map(|id| ctx.prices.get(id))
            .filter(|p| *p > 0.0)
            .reduce(f64::min);
        let Some(cheapest) = cheapest else {
            return PricerOutcome::none();
        };
        PricerOutcome::additive(vec![LedgerEntry::new(
            format!("TALISMAN_ENRICHMENT_{}", enrichment.to_ascii_uppercase()),
            EntryKind::Enrichment,
            cheapest * ctx.worth().enrichment,
            1,
        )])
    }
}

pub struct Reforge;

impl Pricer for Reforge {
    fn name(&self) -> &'static str {
        "reforge"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let Some(modifier) = ctx.attributes().modifier.as_deref() else {
            return PricerOutcome::none();
        };
        if ctx.category() == Some("ACCESSORY") {
            return PricerOutcome::none();
        }
        let Some(stone) = ctx.tables.reforge_stone(&modifier.to_ascii_lowercase()) else {
            return PricerOutcome::none();
        };
        let entry = ctx.material_entry(stone, EntryKind::Reforge, 1, ctx.worth().reforge);
        PricerOutcome::additive(entry.into_iter().collect())
    }
}

/// Essence and materials spent on the first N dungeon stars
pub struct DungeonStars;

impl Pricer for DungeonStars {
    fn name(&self) -> &'static str {
        "dungeon_stars"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let level = ctx.attributes().upgrade_level.unwrap_or(0);
        let Some(metadata) = ctx.metadata.filter(|_| level > 0) else {
            return PricerOutcome::none();
        };
        let entries = metadata
            .upgrade_costs
            .iter()
            .take(level as usize)
            .enumerate()
            .flat_map(|(index, costs)| {
                cost_entries(ctx, costs, EntryKind::Star, Some(index as u32 + 1))
            })
            .collect();
        PricerOutcome::additive(entries)
    }
}

pub struct MasterStars;

impl Pricer for MasterStars {
    fn name(&self) -> &'static str {
        "master_stars"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let level = ctx.attributes().upgrade_level.unwrap_or(0);
        if level <= DUNGEON_STAR_CAP {
            return PricerOutcome::none();
        }
        let worth = ctx.worth().master_star;
        let entries = ctx
            .tables
            .master_stars
            .iter()
            .take((level - DUNGEON_STAR_CAP) as usize)
            .filter_map(|star| ctx.material_entry(star, EntryKind::MasterStar, 1, worth))
            .collect();
        PricerOutcome::additive(entries)
    }
}

/// Runes applied to equipment; rune items themselves are priced by id
pub struct AppliedRunes;

impl Pricer for AppliedRunes {
    fn name(&self) -> &'static str {
        "applied_runes"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let attrs = ctx.attributes();
        if attrs.is_rune_item() {
            return PricerOutcome::none();
        }
        let worth = ctx.worth().runes;
        let entries = attrs
            .runes
            .iter()
            .filter(|(rune, tier)| ctx.tables.is_valid_rune(&format!("{rune}_{tier}")))
            .filter_map(|(rune, tier)| {
                ctx.material_entry(&format!("rune_{rune}_{tier}"), EntryKind::Rune, 1, worth)
            })
            .collect();
        PricerOutcome::additive(entries)
    }
}

pub struct Gemstones;

impl Pricer for Gemstones {
    fn name(&self) -> &'static str {
        "gemstones"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let worth = ctx.worth().gemstone;
        let entries = ctx
            .attributes()
            .gems
            .iter()
            .filter_map(|gem| ctx.material_entry(&gem.price_key(), EntryKind::Gemstone, 1, worth))
            .collect();
        PricerOutcome::additive(entries)
    }
}

pub struct NecronScrolls;

impl Pricer for NecronScrolls {
    fn name(&self) -> &'static str {
        "necron_blade_scrolls"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let worth = ctx.worth().necron_blade_scroll;
        let entries = ctx
            .attributes()
            .ability_scrolls
            .iter()
            .filter_map(|scroll| ctx.material_entry(scroll, EntryKind::NecronBladeScroll, 1, worth))
            .collect();
        PricerOutcome::additive(entries)
    }
}

pub struct PowerScroll;

impl Pricer for PowerScroll {
    fn name(&self) -> &'static str {
        "gemstone_power_scroll"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let entry = ctx.attributes().power_ability_scroll.as_deref().and_then(|scroll| {
            ctx.material_entry(
                scroll,
                EntryKind::GemstonePowerScroll,
                1,
                ctx.worth().gemstone_power_scroll,
            )
        });
        PricerOutcome::additive(entry.into_iter().collect())
    }
}

pub struct DrillParts;

impl Pricer for DrillParts {
    fn name(&self) -> &'static str {
        "drill_parts"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let worth = ctx.worth().drill_part;
        let entries = ctx
            .attributes()
            .drill_parts
            .iter()
            .filter_map(|part| ctx.material_entry(part, EntryKind::DrillPart, 1, worth))
            .collect();
        PricerOutcome::additive(entries)
    }
}

pub struct Dye;

impl Pricer for Dye {
    fn name(&self) -> &'static str {
        "dye"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let entry = ctx
            .attributes()
            .dye_item
            .as_deref()
            .and_then(|dye| ctx.material_entry(dye, EntryKind::Dye, 1, ctx.worth().dye));
        PricerOutcome::additive(entry.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::test_support::{prices, Fixture};
    use crate::prices::catalog::ItemCatalog;
    use serde_json::json;

    #[test]
    fn test_potato_books_split() {
        let fixture = Fixture::new(
            json!({"id": "HYPERION", "hot_potato_count": 15}),
            prices(&[("hot_potato_book", 100.0), ("fuming_potato_book", 1000.0)]),
        );
        let state = fixture.run(&PotatoBooks, 0.0);
        assert_eq!(state.ledger.len(), 2);
        assert_eq!(state.ledger[0].count, 10);
        assert_eq!(state.ledger[1].count, 5);
        assert!((state.price - (1000.0 + 3000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_potato_count_past_u32_saturates() {
        let fixture = Fixture::new(
            json!({"id": "HYPERION", "hot_potato_count": 4_294_967_306u64}),
            prices(&[("hot_potato_book", 1.0), ("fuming_potato_book", 1.0)]),
        );
        let state = fixture.run(&PotatoBooks, 0.0);
        assert_eq!(state.ledger.len(), 2);
        assert_eq!(state.ledger[0].count, 10);
        assert_eq!(state.ledger[1].count, u64::from(u32::MAX) - 10);
    }

    #[test]
    fn test_thunder_bottles() {
        let fixture = Fixture::new(
            json!({"id": "PULSE_RING", "thunder_charge": 1_000_000}),
            prices(&[("thunder_in_a_bottle", 100_000.0)]),
        );
        let state = fixture.run(&ThunderInABottle, 0.0);
        assert_eq!(state.ledger[0].count, 20);
        assert!((state.price - 1_600_000.0).abs() < 1e-6);

        let partial = Fixture::new(
            json!({"id": "PULSE_RING", "thunder_charge": 49_999}),
            prices(&[("thunder_in_a_bottle", 100_000.0)]),
        );
        assert!(partial.run(&ThunderInABottle, 0.0).ledger.is_empty());
    }

    #[test]
    fn test_recomb_eligibility() {
        let table = [("recombobulator_3000", 10_000_000.0)];
        let enchanted = Fixture::new(
            json!({"id": "HYPERION", "rarity_upgrades": 1, "enchantments": {"sharpness": 5}}),
            prices(&table),
        );
        assert_eq!(enchanted.run(&Recombobulator, 0.0).price, 8_000_000.0);

        let plain = Fixture::new(json!({"id": "HYPERION", "rarity_upgrades": 1}), prices(&table));
        assert!(plain.run(&Recombobulator, 0.0).ledger.is_empty());

        let divan = Fixture::new(json!({"id": "DIVAN_HELMET", "rarity_upgrades": 1}), prices(&table));
        assert_eq!(divan.run(&Recombobulator, 0.0).ledger.len(), 1);

        let catalog = ItemCatalog::from_json_str(r#"[{"id": "SEAL_OF_THE_FAMILY", "category": "ACCESSORY"}]"#).unwrap();
        let talisman = Fixture::new(json!({"id": "SEAL_OF_THE_FAMILY", "rarity_upgrades": 1}), prices(&table))
            .with_catalog(catalog);
        assert_eq!(talisman.run(&Recombobulator, 0.0).ledger.len(), 1);
    }

    #[test]
    fn test_enrichment_uses_cheapest() {
        let fixture = Fixture::new(
            json!({"id": "SEAL_OF_THE_FAMILY", "talisman_enrichment": "magic_find"}),
            prices(&[
                ("talisman_enrichment_magic_find", 900_000.0),
                ("talisman_enrichment_defense", 400_000.0),
            ]),
        );
        let state = fixture.run(&Enrichment, 0.0);
        assert_eq!(state.price, 200_000.0);
        assert_eq!(state.ledger[0].id, "TALISMAN_ENRICHMENT_MAGIC_FIND");
    }

    #[test]
    fn test_reforge_skips_accessories() {
        let table = [("dragon_claw", 2_000_000.0)];
        let sword = Fixture::new(json!({"id": "HYPERION", "modifier": "fabled"}), prices(&table));
        assert_eq!(sword.run(&Reforge, 0.0).price, 2_000_000.0);

        let catalog = ItemCatalog::from_json_str(r#"[{"id": "TALISMAN", "category": "ACCESSORY"}]"#).unwrap();
        let talisman = Fixture::new(json!({"id": "TALISMAN", "modifier": "fabled"}), prices(&table))
            .with_catalog(catalog);
        assert!(talisman.run(&Reforge, 0.0).ledger.is_empty());
    }

    #[test]
    fn test_stars_and_master_stars() {
        let catalog = ItemCatalog::from_json_str(
            r#"[{"id": "HYPERION", "upgrade_costs": [
                [{"type": "ESSENCE", "essence_type": "WITHER", "amount": 150}],
                [{"type": "ESSENCE", "essence_type": "WITHER", "amount": 300}],
                [{"type": "ESSENCE", "essence_type": "WITHER", "amount": 500}]
            ]}]"#,
        )
        .unwrap();
        let fixture = Fixture::new(
            json!({"id": "HYPERION", "upgrade_level": 7}),
            prices(&[
                ("essence_wither", 2000.0),
                ("first_master_star", 10_000_000.0),
                ("second_master_star", 20_000_000.0),
            ]),
        )
        .with_catalog(catalog);

        let stars = fixture.run(&DungeonStars, 0.0);
        assert_eq!(stars.ledger.len(), 3);
        assert_eq!(stars.ledger[2].star, Some(3));
        assert!((stars.price - 950.0 * 2000.0 * 0.75).abs() < 1e-6);

        let master = fixture.run(&MasterStars, 0.0);
        assert_eq!(master.ledger.len(), 2);
        assert_eq!(master.price, 30_000_000.0);
    }

    #[test]
    fn test_applied_runes_valid_only() {
        let table = [("rune_music_3", 5_000_000.0), ("rune_blood_2_3", 100.0)];
        let music = Fixture::new(json!({"id": "HYPERION", "runes": {"MUSIC": 3}}), prices(&table));
        assert_eq!(music.run(&AppliedRunes, 0.0).price, 3_000_000.0);

        let invalid = Fixture::new(json!({"id": "HYPERION", "runes": {"BLOOD_2": 3}}), prices(&table));
        assert!(invalid.run(&AppliedRunes, 0.0).ledger.is_empty());

        let rune_item = Fixture::new(json!({"id": "RUNE", "runes": {"MUSIC": 3}}), prices(&table));
        assert!(rune_item.run(&AppliedRunes, 0.0).ledger.is_empty());
    }

    #[test]
    fn test_gemstones_and_scrolls() {
        let fixture = Fixture::new(
            json!({
                "id": "HYPERION",
                "gems": {"SAPPHIRE_0": "PERFECT"},
                "ability_scroll": ["IMPLOSION_SCROLL", "WITHER_SHIELD_SCROLL"],
                "power_ability_scroll": "SAPPHIRE_POWER_SCROLL",
                "dye_item": "DYE_PURE_WHITE"
            }),
            prices(&[
                ("perfect_sapphire_gem", 10_000_000.0),
                ("implosion_scroll", 300_000_000.0),
                ("wither_shield_scroll", 200_000_000.0),
                ("sapphire_power_scroll", 1_000_000.0),
                ("dye_pure_white", 10_000_000.0),
            ]),
        );
        assert_eq!(fixture.run(&Gemstones, 0.0).price, 10_000_000.0);
        assert_eq!(fixture.run(&NecronScrolls, 0.0).ledger.len(), 2);
        assert_eq!(fixture.run(&PowerScroll, 0.0).price, 500_000.0);
        assert_eq!(fixture.run(&Dye, 0.0).price, 9_000_000.0);
    }

    #[test]
    fn test_drill_parts() {
        let fixture = Fixture::new(
            json!({"id": "DIVAN_DRILL", "drill_part_engine": "amber_polished_drill_engine"}),
            prices(&[("amber_polished_drill_engine", 50_000_000.0)]),
        );
        let state = fixture.run(&DrillParts, 0.0);
        assert_eq!(state.ledger[0].id, "AMBER_POLISHED_DRILL_ENGINE");
        assert_eq!(state.price, 50_000_000.0);
    }
}
