//! Reference data tables.
//!
//! Immutable pricing configuration: application worth weights, enchantment
//! rules, reforge and prestige catalogs, attribute overrides, pet leveling.
//! Built once (defaults or a RON/JSON file), then passed by reference into
//! every valuation. Files may override any subset of tables; missing tables
//! keep their defaults.

mod defaults;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NetworthError, Result};

/// Fraction of an applied upgrade's market price that survives on the item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationWorth {
    pub enrichment: f64,
    pub farming_for_dummies: f64,
    pub gemstone_power_scroll: f64,
    pub wood_singularity: f64,
    pub art_of_war: f64,
    pub fuming_potato_book: f64,
    pub runes: f64,
    pub tuned_transmission: f64,
    pub pocket_sack_in_a_sack: f64,
    pub essence: f64,
    pub golden_bounty: f64,
    pub silex: f64,
    pub art_of_peace: f64,
    pub divan_powder_coating: f64,
    pub jalapeno_book: f64,
    pub mana_disintegrator: f64,
    pub recomb: f64,
    pub thunder_in_a_bottle: f64,
    pub enchants: f64,
    pub shens_auction_price: f64,
    pub dye: f64,
    pub attributes: f64,
    pub drill_part: f64,
    pub etherwarp: f64,
    pub master_star: f64,
    pub gemstone: f64,
    pub hot_potato_book: f64,
    pub necron_blade_scroll: f64,
    pub polarvoid: f64,
    pub prestige_item: f64,
    pub reforge: f64,
    pub pet_candy: f64,
    pub soulbound_pet_skins: f64,
    pub pet_item: f64,
}

impl Default for ApplicationWorth {
    fn default() -> Self {
        Self {
            enrichment: 0.5,
            farming_for_dummies: 0.5,
            gemstone_power_scroll: 0.5,
            wood_singularity: 0.5,
            art_of_war: 0.6,
            fuming_potato_book: 0.6,
            runes: 0.6,
            tuned_transmission: 0.7,
            pocket_sack_in_a_sack: 0.7,
            essence: 0.75,
            golden_bounty: 0.75,
            silex: 0.75,
            art_of_peace: 0.8,
            divan_powder_coating: 0.8,
            jalapeno_book: 0.8,
            mana_disintegrator: 0.8,
            recomb: 0.8,
            thunder_in_a_bottle: 0.8,
            enchants: 0.85,
            shens_auction_price: 0.85,
            dye: 0.9,
            attributes: 1.0,
            drill_part: 1.0,
            etherwarp: 1.0,
            master_star: 1.0,
            gemstone: 1.0,
            hot_potato_book: 1.0,
            necron_blade_scroll: 1.0,
            polarvoid: 1.0,
            prestige_item: 1.0,
            reforge: 1.0,
            pet_candy: 0.65,
            soulbound_pet_skins: 0.8,
            pet_item: 1.0,
        }
    }
}

/// Species with a non-standard level cap; `extra_levels` follow the
/// rarity-offset slice of the shared table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPetLeveling {
    pub max_level: u32,
    #[serde(default)]
    pub extra_levels: Vec<u64>,
}

/// Every static table the pricers consult
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    pub application_worth: ApplicationWorth,
    /// Per-enchant weight; enchants not listed use `application_worth.enchants`
    pub enchants_worth: HashMap<String, f64>,
    /// Item id → enchants that add no value on it
    pub blocked_enchants: HashMap<String, Vec<String>>,
    /// Enchant → level that comes free and is skipped
    pub ignored_enchants: HashMap<String, u32>,
    /// Enchants whose level grows through use, priced at level 1
    pub stacking_enchants: Vec<String>,
    pub ignore_silex: Vec<String>,
    pub master_stars: Vec<String>,
    pub valid_runes: Vec<String>,
    pub allowed_recomb_types: Vec<String>,
    pub allowed_recomb_ids: Vec<String>,
    /// Item id → id whose price caps its per-shard attribute cost
    pub attributes_base_costs: HashMap<String, String>,
    pub enrichments: Vec<String>,
    pub special_enchantment_names: HashMap<String, String>,
    /// Uppercase item id → ancestors, nearest first
    pub prestiges: HashMap<String, Vec<String>>,
    /// Reforge modifier → reforge stone id
    pub reforges: HashMap<String, String>,
    pub pet_levels: Vec<u64>,
    pub pet_rarity_offset: HashMap<String, usize>,
    pub custom_pet_leveling: HashMap<String, CustomPetLeveling>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            application_worth: ApplicationWorth::default(),
            enchants_worth: defaults::enchants_worth(),
            blocked_enchants: defaults::blocked_enchants(),
            ignored_enchants: defaults::ignored_enchants(),
            stacking_enchants: defaults::stacking_enchants(),
            ignore_silex: defaults::ignore_silex(),
            master_stars: defaults::master_stars(),
            valid_runes: defaults::valid_runes(),
            allowed_recomb_types: defaults::allowed_recomb_types(),
            allowed_recomb_ids: defaults::allowed_recomb_ids(),
            attributes_base_costs: defaults::attributes_base_costs(),
            enrichments: defaults::enrichments(),
            special_enchantment_names: defaults::special_enchantment_names(),
            prestiges: defaults::prestiges(),
            reforges: defaults::reforges(),
            pet_levels: defaults::pet_levels(),
            pet_rarity_offset: defaults::pet_rarity_offset(),
            custom_pet_leveling: defaults::custom_pet_leveling(),
        }
    }
}

impl ReferenceTables {
    pub fn from_ron_str(ron_str: &str) -> Result<Self> {
        Ok(ron::from_str(ron_str)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.ron` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(NetworthError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn enchant_worth(&self, enchant: &str) -> f64 {
        self.enchants_worth
            .get(enchant)
            .copied()
            .unwrap_or(self.application_worth.enchants)
    }

    pub fn is_blocked_enchant(&self, item_id: &str, enchant: &str) -> bool {
        self.blocked_enchants
            .get(item_id)
            .is_some_and(|blocked| blocked.iter().any(|e| e == enchant))
    }

    pub fn is_ignored_enchant(&self, enchant: &str, level: u32) -> bool {
        self.ignored_enchants.get(enchant) == Some(&level)
    }

    pub fn is_stacking_enchant(&self, enchant: &str) -> bool {
        self.stacking_enchants.iter().any(|e| e == enchant)
    }

    pub fn ignores_silex(&self, item_id: &str) -> bool {
        self.ignore_silex.iter().any(|i| i == item_id)
    }

    pub fn is_valid_rune(&self, rune: &str) -> bool {
        self.valid_runes.iter().any(|r| r.eq_ignore_ascii_case(rune))
    }

    /// Prestige ancestry for an item id, nearest first; empty when none
    pub fn prestige_chain(&self, item_id: &str) -> &[String] {
        self.prestiges
            .get(&item_id.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn reforge_stone(&self, modifier: &str) -> Option<&str> {
        self.reforges.get(modifier).map(String::as_str)
    }

    pub fn attribute_base_cost(&self, item_id: &str) -> Option<&str> {
        self.attributes_base_costs.get(item_id).map(String::as_str)
    }

    pub fn special_enchantment_name(&self, enchant: &str) -> Option<&str> {
        self.special_enchantment_names
            .get(enchant)
            .map(String::as_str)
    }

    pub fn allows_recomb(&self, item_id: &str, category: Option<&str>) -> bool {
        self.allowed_recomb_ids.iter().any(|i| i == item_id)
            || category.is_some_and(|c| self.allowed_recomb_types.iter().any(|t| t == c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.application_worth.silex, 0.75);
        assert_eq!(tables.application_worth.attributes, 1.0);
        assert_eq!(tables.enchant_worth("overload"), 0.35);
        assert_eq!(tables.enchant_worth("sharpness"), 0.85);
    }

    #[test]
    fn test_prestige_chain_nearest_first() {
        let tables = ReferenceTables::default();
        assert_eq!(
            tables.prestige_chain("infernal_aurora_boots"),
            [
                "FIERY_AURORA_BOOTS",
                "BURNING_AURORA_BOOTS",
                "HOT_AURORA_BOOTS",
                "AURORA_BOOTS"
            ]
        );
        assert_eq!(tables.prestige_chain("HOT_TERROR_HELMET"), ["TERROR_HELMET"]);
        assert!(tables.prestige_chain("TERROR_HELMET").is_empty());
        assert_eq!(tables.prestiges.len(), 5 * 4 * 4);
    }

    #[test]
    fn test_enchant_rules() {
        let tables = ReferenceTables::default();
        assert!(tables.is_blocked_enchant("death_bow", "overload"));
        assert!(!tables.is_blocked_enchant("hyperion", "overload"));
        assert!(tables.is_ignored_enchant("scavenger", 5));
        assert!(!tables.is_ignored_enchant("scavenger", 4));
        assert!(tables.is_stacking_enchant("champion"));
        assert!(tables.ignores_silex("promising_spade"));
    }

    #[test]
    fn test_pet_level_table() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.pet_levels.len(), 119);
        let legendary: u64 = tables.pet_levels[20..119].iter().sum();
        assert_eq!(legendary, 25_353_230);
        assert_eq!(tables.custom_pet_leveling["GOLDEN_DRAGON"].max_level, 200);
    }

    #[test]
    fn test_partial_ron_override_keeps_defaults() {
        let tables = ReferenceTables::from_ron_str(
            r#"(application_worth: (silex: 0.5), ignore_silex: ["promising_spade", "jungle_axe"])"#,
        )
        .unwrap();
        assert_eq!(tables.application_worth.silex, 0.5);
        assert_eq!(tables.application_worth.enchants, 0.85);
        assert!(tables.ignores_silex("jungle_axe"));
        assert!(!tables.reforges.is_empty());
    }

    #[test]
    fn test_json_override() {
        let tables =
            ReferenceTables::from_json_str(r#"{"enchants_worth": {"sharpness": 0.5}}"#).unwrap();
        assert_eq!(tables.enchant_worth("sharpness"), 0.5);
        assert_eq!(tables.enchant_worth("overload"), 0.85);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ron_path = dir.path().join("tables.ron");
        std::fs::write(&ron_path, "(stacking_enchants: [\"compact\"])").unwrap();
        let tables = ReferenceTables::load(&ron_path).unwrap();
        assert_eq!(tables.stacking_enchants, vec!["compact".to_string()]);

        let txt_path = dir.path().join("tables.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            ReferenceTables::load(&txt_path),
            Err(NetworthError::UnsupportedFormat(_))
        ));
    }
}
