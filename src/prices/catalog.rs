//! Static item metadata catalog.
//!
//! Tiers, categories, star upgrade costs and prestige costs per uppercase
//! item id. The engine only reads it through [`MetadataProvider`]; the
//! bundled [`ItemCatalog`] understands the items-API JSON shape.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Lookup of item metadata by uppercase id
pub trait MetadataProvider: Sync {
    fn item(&self, id: &str) -> Option<&ItemMetadata>;
}

/// One material or essence spent on an upgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeCost {
    Essence {
        essence_type: String,
        #[serde(default = "one")]
        amount: u64,
    },
    Item {
        item_id: String,
        #[serde(default = "one")]
        amount: u64,
    },
    #[serde(other)]
    Unknown,
}

fn one() -> u64 {
    1
}

/// Star upgrade costs arrive either grouped per star or as a flat list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum CostGroup {
    Star(Vec<UpgradeCost>),
    Single(UpgradeCost),
}

impl From<CostGroup> for Vec<UpgradeCost> {
    fn from(group: CostGroup) -> Self {
        match group {
            CostGroup::Star(costs) => costs,
            CostGroup::Single(cost) => vec![cost],
        }
    }
}

fn deserialize_star_costs<'de, D>(deserializer: D) -> std::result::Result<Vec<Vec<UpgradeCost>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let groups: Vec<CostGroup> = Vec::deserialize(deserializer)?;
    Ok(groups.into_iter().map(Vec::from).collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrestigeInfo {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub costs: Vec<UpgradeCost>,
}

/// Metadata for a single item id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Costs per star, in star order
    #[serde(default, deserialize_with = "deserialize_star_costs")]
    pub upgrade_costs: Vec<Vec<UpgradeCost>>,
    #[serde(default)]
    pub prestige: Option<PrestigeInfo>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { items: Vec<ItemMetadata> },
    Bare(Vec<ItemMetadata>),
}

/// In-memory catalog keyed by uppercase id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemMetadata>,
}

impl ItemCatalog {
    pub fn new(items: impl IntoIterator<Item = ItemMetadata>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.id.to_ascii_uppercase(), item))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let items = match serde_json::from_str::<CatalogDocument>(json)? {
            CatalogDocument::Wrapped { items } => items,
            CatalogDocument::Bare(items) => items,
        };
        Ok(Self::new(items))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MetadataProvider for ItemCatalog {
    fn item(&self, id: &str) -> Option<&ItemMetadata> {
        if id.bytes().any(|b| b.is_ascii_lowercase()) {
            self.items.get(&id.to_ascii_uppercase())
        } else {
            self.items.get(id)
        }
    }
}
