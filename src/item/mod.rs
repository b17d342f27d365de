//! Typed view of raw item records.
//!
//! Raw items arrive as loosely shaped JSON (NBT converted upstream). This
//! module reads them once into explicit optional fields and classifies them
//! into an [`ItemKind`], so pricers never inspect JSON themselves.

mod fields;
pub mod pet;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::constants::SOULBOUND_LORE_MARKERS;
use crate::normalize::strip_formatting;

pub use pet::{PetInfo, PetLevel};

/// One socketed gemstone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gemstone {
    pub gem_type: String,
    pub quality: String,
}

impl Gemstone {
    /// Price key, e.g. `perfect_jasper_gem`
    pub fn price_key(&self) -> String {
        format!("{}_{}_gem", self.quality, self.gem_type).to_ascii_lowercase()
    }
}

/// Counters of consumables applied to an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedCounters {
    pub pocket_sack_in_a_sack: Option<u64>,
    pub wood_singularity: Option<u64>,
    pub jalapeno_book: Option<u64>,
    pub tuned_transmission: Option<u64>,
    pub mana_disintegrator: Option<u64>,
    pub art_of_war: Option<u64>,
    pub art_of_peace: Option<u64>,
    pub farming_for_dummies: Option<u64>,
    pub divan_powder_coating: Option<u64>,
    pub polarvoid: Option<u64>,
    pub ethermerge: Option<u64>,
}

/// The `tag.ExtraAttributes` record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraAttributes {
    pub id: Option<String>,
    pub enchantments: BTreeMap<String, u32>,
    pub attributes: BTreeMap<String, u32>,
    pub runes: BTreeMap<String, u32>,
    pub skin: Option<String>,
    pub price: Option<f64>,
    pub auction: Option<f64>,
    pub bid: Option<f64>,
    pub pickonimbus_durability: Option<f64>,
    pub counters: AppliedCounters,
    pub is_shiny: bool,
    pub new_years_cake: Option<String>,
    pub party_hat_color: Option<String>,
    pub party_hat_emoji: Option<String>,
    pub edition: Option<String>,
    pub modifier: Option<String>,
    pub rarity_upgrades: Option<u64>,
    /// Dungeon stars, from `upgrade_level` or `dungeon_item_level`
    pub upgrade_level: Option<u32>,
    pub hot_potato_count: Option<u32>,
    pub talisman_enrichment: Option<String>,
    pub thunder_charge: Option<u64>,
    pub gems: Vec<Gemstone>,
    pub ability_scrolls: Vec<String>,
    pub power_ability_scroll: Option<String>,
    pub drill_parts: Vec<String>,
    pub dye_item: Option<String>,
    pub donated_museum: bool,
}

const DRILL_PART_FIELDS: [&str; 3] = [
    "drill_part_upgrade_module",
    "drill_part_fuel_tank",
    "drill_part_engine",
];

impl ExtraAttributes {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let counters = AppliedCounters {
            pocket_sack_in_a_sack: fields::count(map, "sack_pss"),
            wood_singularity: fields::count(map, "wood_singularity_count"),
            jalapeno_book: fields::count(map, "jalapeno_count"),
            tuned_transmission: fields::count(map, "tuned_transmission"),
            mana_disintegrator: fields::count(map, "mana_disintegrator_count"),
            art_of_war: fields::count(map, "art_of_war_count"),
            art_of_peace: fields::count(map, "artOfPeaceApplied"),
            farming_for_dummies: fields::count(map, "farming_for_dummies_count"),
            divan_powder_coating: fields::count(map, "divan_powder_coating"),
            polarvoid: fields::count(map, "polarvoid"),
            ethermerge: fields::count(map, "ethermerge"),
        };

        let upgrade_level = fields::small_count(map, "upgrade_level")
            .or_else(|| fields::small_count(map, "dungeon_item_level"));

        Self {
            id: fields::string(map, "id"),
            enchantments: fields::level_map(map, "enchantments"),
            attributes: fields::level_map(map, "attributes"),
            runes: fields::level_map(map, "runes"),
            skin: fields::string(map, "skin"),
            price: fields::number(map, "price"),
            auction: fields::number(map, "auction"),
            bid: fields::number(map, "bid"),
            pickonimbus_durability: fields::number(map, "pickonimbus_durability"),
            counters,
            is_shiny: fields::flag(map, "is_shiny"),
            new_years_cake: fields::scalar_string(map, "new_years_cake"),
            party_hat_color: fields::string(map, "party_hat_color"),
            party_hat_emoji: fields::string(map, "party_hat_emoji"),
            edition: fields::present(map, "edition")
                .then(|| fields::scalar_string(map, "edition").unwrap_or_default()),
            modifier: fields::string(map, "modifier"),
            rarity_upgrades: fields::count(map, "rarity_upgrades"),
            upgrade_level,
            hot_potato_count: fields::small_count(map, "hot_potato_count"),
            talisman_enrichment: fields::string(map, "talisman_enrichment"),
            thunder_charge: fields::count(map, "thunder_charge"),
            gems: fields::object(map, "gems").map(parse_gems).unwrap_or_default(),
            ability_scrolls: fields::string_list(map, "ability_scroll"),
            power_ability_scroll: fields::string(map, "power_ability_scroll"),
            drill_parts: DRILL_PART_FIELDS
                .iter()
                .filter_map(|f| fields::string(map, f))
                .collect(),
            dye_item: fields::string(map, "dye_item"),
            donated_museum: fields::flag(map, "donated_museum"),
        }
    }

    /// Category id as supplied, e.g. `HYPERION`
    pub fn raw_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_rune_item(&self) -> bool {
        matches!(self.raw_id(), Some("RUNE" | "UNIQUE_RUNE"))
    }
}

/// Slots look like `JADE_0: "FINE"` or `COMBAT_0: {quality}` with the gem
/// type under `COMBAT_0_gem`
fn parse_gems(gems: &Map<String, Value>) -> Vec<Gemstone> {
    gems.iter()
        .filter(|(slot, _)| *slot != "unlocked_slots" && !slot.ends_with("_gem"))
        .filter_map(|(slot, value)| {
            let quality = match value {
                Value::String(q) => q.clone(),
                Value::Object(o) => fields::string(o, "quality")?,
                _ => return None,
            };
            let gem_type = fields::string(gems, &format!("{slot}_gem"))
                .or_else(|| slot.split('_').next().map(str::to_string))?;
            Some(Gemstone { gem_type, quality })
        })
        .collect()
}

/// A stack of a plain material, `{id, amount}`
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialStack {
    pub id: String,
    pub name: Option<String>,
    pub amount: f64,
}

impl MaterialStack {
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            id: fields::string(obj, "id")?,
            name: fields::string(obj, "name"),
            amount: fields::number(obj, "amount")
                .or_else(|| fields::number(obj, "count"))
                .unwrap_or(1.0)
                .max(0.0),
        })
    }
}

/// An identified item carrying `ExtraAttributes.id`
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    /// Display name with formatting codes removed
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub count: f64,
    pub attributes: ExtraAttributes,
}

impl Equipment {
    pub fn is_soulbound(&self) -> bool {
        self.attributes.donated_museum
            || self
                .lore
                .iter()
                .any(|line| SOULBOUND_LORE_MARKERS.iter().any(|m| line.contains(m)))
    }
}

/// Classification of a raw item record
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Pet(PetInfo),
    Equipment(Equipment),
    Material(MaterialStack),
    Unidentified,
}

impl ItemKind {
    pub fn classify(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return ItemKind::Unidentified;
        };

        let tag = fields::object(obj, "tag");
        let extra = tag.and_then(|t| fields::object(t, "ExtraAttributes"));

        if let Some(extra) = extra {
            let attributes = ExtraAttributes::from_map(extra);
            if attributes.raw_id() == Some("PET") {
                if let Some(pet) = extra.get("petInfo").and_then(PetInfo::from_value) {
                    return ItemKind::Pet(pet);
                }
            }
            if attributes.id.is_none() {
                return ItemKind::Unidentified;
            }

            let display = tag.and_then(|t| fields::object(t, "display"));
            let name = display
                .and_then(|d| fields::string(d, "Name"))
                .map(|n| strip_formatting(&n));
            let lore = display
                .map(|d| fields::string_list(d, "Lore"))
                .unwrap_or_default()
                .iter()
                .map(|line| strip_formatting(line))
                .collect();
            let count = ["Count", "count", "amount"]
                .iter()
                .find_map(|k| fields::number(obj, k))
                .unwrap_or(1.0)
                .max(0.0);

            return ItemKind::Equipment(Equipment {
                name,
                lore,
                count,
                attributes,
            });
        }

        if tag.is_none() {
            if let Some(stack) = MaterialStack::from_value(raw) {
                return ItemKind::Material(stack);
            }
        }
        ItemKind::Unidentified
    }
}
