//! Enchanted books and equipment enchantments.

use super::{EntryKind, LedgerEntry, Pricer, PricerOutcome, PricingContext, ValuationState};
use crate::constants::{EFFICIENCY_NATURAL_CAP, SCAVENGER_GOLDEN_BOUNTY_LEVEL, SILEX_DISCOUNT_ITEM};
use crate::normalize::title_case;
use crate::reference::ReferenceTables;

const ENCHANTED_BOOK: &str = "enchanted_book";

pub fn enchant_key(name: &str, level: u32) -> String {
    format!("enchantment_{name}_{level}")
}

fn enchant_entry_id(name: &str, level: u32) -> String {
    format!("{}_{level}", name.to_ascii_uppercase())
}

/// `Sharpness 7`, or the special display name for renamed enchants
pub fn book_name(tables: &ReferenceTables, name: &str, level: u32) -> String {
    let base = tables
        .special_enchantment_name(name)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(name));
    format!("{base} {level}")
}

/// A single-enchant book is worth that enchant; a multi-enchant book starts
/// from nothing and is summed by [`Enchantments`]
pub struct EnchantedBook;

impl Pricer for EnchantedBook {
    fn name(&self) -> &'static str {
        "enchanted_book"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let enchants = &ctx.attributes().enchantments;
        if ctx.id != ENCHANTED_BOOK || enchants.is_empty() {
            return PricerOutcome::none();
        }

        match enchants.iter().next() {
            Some((name, &level)) if enchants.len() == 1 => {
                PricerOutcome::replace(ctx.prices.get(&enchant_key(name, level)))
                    .renamed(book_name(ctx.tables, name, level))
            }
            _ => PricerOutcome::replace(0.0),
        }
    }
}

pub struct Enchantments;

impl Enchantments {
    fn book_entries(ctx: &PricingContext<'_>) -> Vec<LedgerEntry> {
        let enchants = &ctx.attributes().enchantments;
        if enchants.len() < 2 {
            return Vec::new();
        }
        let weight = ctx.worth().enchants;
        enchants
            .iter()
            .filter_map(|(name, &level)| {
                let price = ctx.prices.get(&enchant_key(name, level)) * weight;
                (price > 0.0).then(|| {
                    LedgerEntry::new(enchant_entry_id(name, level), EntryKind::Enchant, price, 1)
                })
            })
            .collect()
    }

    fn equipment_entries(ctx: &PricingContext<'_>) -> Vec<LedgerEntry> {
        let tables = ctx.tables;
        let worth = ctx.worth();
        let mut entries = Vec::new();

        for (name, &level) in &ctx.attributes().enchantments {
            if tables.is_blocked_enchant(ctx.id, name) || tables.is_ignored_enchant(name, level) {
                continue;
            }
            let level = if tables.is_stacking_enchant(name) { 1 } else { level };

            if name == "efficiency" && level > EFFICIENCY_NATURAL_CAP && !tables.ignores_silex(ctx.id) {
                let mut applied = level - EFFICIENCY_NATURAL_CAP;
                if ctx.id == SILEX_DISCOUNT_ITEM {
                    applied -= 1;
                }
                if applied > 0 {
                    entries.push(LedgerEntry::new(
                        "SIL_EX",
                        EntryKind::Silex,
                        ctx.prices.get("sil_ex") * applied as f64 * worth.silex,
                        applied as u64,
                    ));
                }
            }

            if name == "scavenger" && level >= SCAVENGER_GOLDEN_BOUNTY_LEVEL {
                entries.push(LedgerEntry::new(
                    "GOLDEN_BOUNTY",
                    EntryKind::GoldenBounty,
                    ctx.prices.get("golden_bounty") * worth.golden_bounty,
                    1,
                ));
            }

            let price = ctx.prices.get(&enchant_key(name, level)) * tables.enchant_worth(name);
            if price > 0.0 {
                entries.push(LedgerEntry::new(
                    enchant_entry_id(name, level),
                    EntryKind::Enchant,
                    price,
                    1,
                ));
            }
        }
        entries
    }
}

impl Pricer for Enchantments {
    fn name(&self) -> &'static str {
        "enchantments"
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let entries = if ctx.id == ENCHANTED_BOOK {
            Self::book_entries(ctx)
        } else {
            Self::equipment_entries(ctx)
        };
        PricerOutcome::additive(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::test_support::{prices, Fixture};
    use serde_json::json;

    fn enchanted(id: &str, enchants: serde_json::Value, table: &[(&str, f64)]) -> Fixture {
        Fixture::new(json!({"id": id, "enchantments": enchants}), prices(table))
    }

    #[test]
    fn test_single_enchant_book() {
        let fixture = enchanted(
            "ENCHANTED_BOOK",
            json!({"sharpness": 7}),
            &[("enchantment_sharpness_7", 1000.0)],
        );
        let mut state = fixture.run(&EnchantedBook, 0.0);
        state.apply(Enchantments.price(&fixture.ctx(), &state));
        assert_eq!(state.price, 1000.0);
        assert!(state.ledger.is_empty());
        assert_eq!(state.name.as_deref(), Some("Sharpness 7"));
    }

    #[test]
    fn test_special_book_name() {
        let tables = ReferenceTables::default();
        assert_eq!(book_name(&tables, "ultimate_reiterate", 5), "Ultimate Duplex 5");
        assert_eq!(book_name(&tables, "ultimate_wise", 5), "Ultimate Wise 5");
    }

    #[test]
    fn test_multi_enchant_book() {
        let fixture = enchanted(
            "ENCHANTED_BOOK",
            json!({"sharpness": 7, "looting": 5}),
            &[("enchantment_sharpness_7", 1000.0), ("enchantment_looting_5", 200.0)],
        );
        let mut state = fixture.run(&EnchantedBook, 50.0);
        assert_eq!(state.price, 0.0);
        state.apply(Enchantments.price(&fixture.ctx(), &state));
        assert!((state.price - 1020.0).abs() < 1e-9);
        assert_eq!(state.ledger.len(), 2);
        assert!(state.name.is_none());
    }

    #[test]
    fn test_stacking_enchant_clamped() {
        let table = [("enchantment_champion_1", 400.0), ("enchantment_champion_5", 9999.0)];
        let five = enchanted("HYPERION", json!({"champion": 5}), &table).run(&Enchantments, 0.0);
        let one = enchanted("HYPERION", json!({"champion": 1}), &table).run(&Enchantments, 0.0);
        assert_eq!(five.price, one.price);
        assert_eq!(five.ledger[0].id, "CHAMPION_1");
    }

    #[test]
    fn test_blocked_and_ignored() {
        let table = [("enchantment_overload_5", 100.0), ("enchantment_scavenger_5", 100.0)];
        let bow = enchanted("DEATH_BOW", json!({"overload": 5}), &table).run(&Enchantments, 0.0);
        assert!(bow.ledger.is_empty());
        let scav = enchanted("HYPERION", json!({"scavenger": 5}), &table).run(&Enchantments, 0.0);
        assert!(scav.ledger.is_empty());
    }

    #[test]
    fn test_efficiency_silex() {
        let table = [("sil_ex", 100.0)];
        let axe = enchanted("JUNGLE_AXE", json!({"efficiency": 8}), &table).run(&Enchantments, 0.0);
        let silex: Vec<_> = axe.ledger.iter().filter(|e| e.kind == EntryKind::Silex).collect();
        assert_eq!(silex.len(), 1);
        assert_eq!(silex[0].count, 3);
        assert_eq!(silex[0].price, 225.0);

        let spade = enchanted("PROMISING_SPADE", json!({"efficiency": 8}), &table).run(&Enchantments, 0.0);
        assert!(spade.ledger.iter().all(|e| e.kind != EntryKind::Silex));

        let stonk = enchanted("STONK_PICKAXE", json!({"efficiency": 6}), &table).run(&Enchantments, 0.0);
        assert!(stonk.ledger.iter().all(|e| e.kind != EntryKind::Silex));
    }

    #[test]
    fn test_golden_bounty() {
        let table = [("golden_bounty", 1_000_000.0)];
        let state = enchanted("HYPERION", json!({"scavenger": 6}), &table).run(&Enchantments, 0.0);
        assert_eq!(state.ledger.len(), 1);
        assert_eq!(state.ledger[0].kind, EntryKind::GoldenBounty);
        assert_eq!(state.price, 750_000.0);
    }

    #[test]
    fn test_custom_enchant_weight() {
        let table = [("enchantment_overload_5", 1000.0)];
        let state = enchanted("TERMINATOR", json!({"overload": 5}), &table).run(&Enchantments, 0.0);
        assert!((state.price - 350.0).abs() < 1e-9);
    }
}
