//! Pet records and level computation.

use serde_json::{Map, Value};

use super::fields;
use crate::constants::PET_MAX_LEVEL;
use crate::reference::ReferenceTables;

/// Decoded `petInfo`
#[derive(Debug, Clone, PartialEq)]
pub struct PetInfo {
    pub pet_type: String,
    pub tier: String,
    pub exp: f64,
    pub held_item: Option<String>,
    pub candy_used: u32,
    pub skin: Option<String>,
}

/// Level reached and the xp needed to reach level 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetLevel {
    pub level: u32,
    pub xp_max: f64,
}

impl PetInfo {
    /// Accepts a nested record or a string holding the record's JSON
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
                Ok(Value::Object(map)) => Self::from_map(&map),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            pet_type: fields::string(map, "type")?.to_ascii_uppercase(),
            tier: fields::string(map, "tier")?.to_ascii_uppercase(),
            exp: fields::number(map, "exp").unwrap_or(0.0).max(0.0),
            held_item: fields::string(map, "heldItem"),
            candy_used: fields::small_count(map, "candyUsed").unwrap_or(0),
            skin: fields::string(map, "skin"),
        })
    }

    /// Walk the xp table from the rarity offset until `exp` runs out
    pub fn level(&self, tables: &ReferenceTables) -> PetLevel {
        let custom = tables.custom_pet_leveling.get(&self.pet_type);
        let max_level = custom.map_or(PET_MAX_LEVEL, |c| c.max_level.max(1));
        let offset = tables
            .pet_rarity_offset
            .get(&self.tier)
            .copied()
            .unwrap_or(0)
            .min(tables.pet_levels.len());

        let standard = &tables.pet_levels[offset..];
        let standard = &standard[..standard.len().min(PET_MAX_LEVEL as usize - 1)];
        let steps: Vec<u64> = standard
            .iter()
            .chain(custom.map(|c| c.extra_levels.as_slice()).unwrap_or(&[]))
            .copied()
            .take(max_level as usize - 1)
            .collect();

        let mut level = 1;
        let mut total = 0u64;
        for step in &steps {
            total += step;
            if total as f64 > self.exp {
                break;
            }
            level += 1;
        }

        PetLevel {
            level: level.min(max_level),
            xp_max: standard.iter().sum::<u64>() as f64,
        }
    }
}
