//! Profile networth: every inventory category valued and totalled.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{PricedItem, Valuator};
use crate::item::{MaterialStack, PetInfo};
use crate::logging::TimingSpan;

/// Totals for one inventory category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNetworth {
    pub total: f64,
    pub unsoulbound_total: f64,
    /// Omitted when only totals were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PricedItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networth {
    pub no_inventory: bool,
    pub networth: f64,
    pub unsoulbound_networth: f64,
    pub purse: f64,
    pub bank: f64,
    pub types: BTreeMap<String, CategoryNetworth>,
}

/// Which valuator a category's entries go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryKind {
    Pets,
    Sacks,
    Essence,
    Items,
}

impl CategoryKind {
    fn of(category: &str) -> Self {
        match category {
            "pets" => CategoryKind::Pets,
            "sacks" => CategoryKind::Sacks,
            "essence" => CategoryKind::Essence,
            _ => CategoryKind::Items,
        }
    }
}

impl Valuator<'_> {
    fn value_entry(&self, kind: CategoryKind, raw: &Value) -> Option<PricedItem> {
        match kind {
            CategoryKind::Pets => match PetInfo::from_value(raw) {
                Some(pet) => self.value_pet(&pet),
                None => self.calculate_item(raw),
            },
            CategoryKind::Sacks => self.value_sack_item(&MaterialStack::from_value(raw)?),
            CategoryKind::Essence => self.value_essence(&MaterialStack::from_value(raw)?),
            CategoryKind::Items => self.calculate_item(raw),
        }
    }

    fn value_category(&self, category: &str, raw: &[Value], only_networth: bool) -> CategoryNetworth {
        let kind = CategoryKind::of(category);
        let mut items: Vec<PricedItem> = raw
            .par_iter()
            .filter_map(|entry| self.value_entry(kind, entry))
            .collect();

        let total = items.iter().map(|i| i.price).sum();
        let unsoulbound_total = items.iter().filter(|i| !i.soulbound).map(|i| i.price).sum();

        let items = if only_networth {
            None
        } else {
            items.sort_by(|a, b| b.price.total_cmp(&a.price));
            Some(items)
        };
        CategoryNetworth {
            total,
            unsoulbound_total,
            items,
        }
    }

    /// Value every category of a profile and add purse and bank
    pub fn networth(
        &self,
        categories: &BTreeMap<String, Vec<Value>>,
        purse: f64,
        bank: f64,
        only_networth: bool,
    ) -> Networth {
        let _span = TimingSpan::new("networth");
        let types: BTreeMap<String, CategoryNetworth> = categories
            .iter()
            .map(|(name, raw)| (name.clone(), self.value_category(name, raw, only_networth)))
            .collect();

        let networth = types.values().map(|c| c.total).sum::<f64>() + purse + bank;
        let unsoulbound_networth = types.values().map(|c| c.unsoulbound_total).sum::<f64>() + purse + bank;
        info!(categories = types.len(), networth, unsoulbound_networth, "networth computed");

        Networth {
            no_inventory: categories.get("inventory").map_or(true, Vec::is_empty),
            networth,
            unsoulbound_networth,
            purse,
            bank,
            types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::catalog::ItemCatalog;
    use crate::prices::PriceTable;
    use crate::reference::ReferenceTables;
    use serde_json::json;

    fn profile() -> BTreeMap<String, Vec<Value>> {
        let sword = |id: &str, lore: &str| {
            json!({"tag": {
                "display": {"Name": id, "Lore": [lore]},
                "ExtraAttributes": {"id": id}
            }})
        };
        BTreeMap::from([
            (
                "inventory".to_string(),
                vec![sword("ASPECT_OF_THE_END", ""), sword("HYPERION", "§8§l* §8Soulbound §8§l*")],
            ),
            (
                "pets".to_string(),
                vec![json!({"type": "BEE", "tier": "COMMON", "exp": 0})],
            ),
            (
                "essence".to_string(),
                vec![json!({"id": "ESSENCE_WITHER", "amount": 10})],
            ),
            (
                "sacks".to_string(),
                vec![json!({"id": "ENCHANTED_DIAMOND", "amount": 2}), json!({"id": "UNKNOWN", "amount": 5})],
            ),
        ])
    }

    fn prices() -> PriceTable {
        [
            ("aspect_of_the_end", 100.0),
            ("hyperion", 1000.0),
            ("lvl_1_common_bee", 10.0),
            ("lvl_100_common_bee", 20.0),
            ("essence_wither", 3.0),
            ("enchanted_diamond", 7.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_category_totals() {
        let prices = prices();
        let catalog = ItemCatalog::default();
        let tables = ReferenceTables::default();
        let result = Valuator::new(&prices, &catalog, &tables).networth(&profile(), 5.0, 50.0, false);

        let inventory = &result.types["inventory"];
        assert_eq!(inventory.total, 1100.0);
        assert_eq!(inventory.unsoulbound_total, 100.0);
        let items = inventory.items.as_ref().unwrap();
        assert_eq!(items[0].id, "hyperion");

        assert_eq!(result.types["pets"].total, 10.0);
        assert_eq!(result.types["essence"].total, 30.0);
        assert_eq!(result.types["essence"].unsoulbound_total, 0.0);
        assert_eq!(result.types["sacks"].items.as_ref().map(Vec::len), Some(1));

        assert_eq!(result.networth, 1100.0 + 10.0 + 30.0 + 14.0 + 55.0);
        assert_eq!(result.unsoulbound_networth, 100.0 + 10.0 + 14.0 + 55.0);
        assert!(!result.no_inventory);
    }

    #[test]
    fn test_negative_stack_amounts_never_lower_networth() {
        let prices = prices();
        let catalog = ItemCatalog::default();
        let tables = ReferenceTables::default();
        let profile = BTreeMap::from([
            ("essence".to_string(), vec![json!({"id": "ESSENCE_WITHER", "amount": -5})]),
            ("sacks".to_string(), vec![json!({"id": "ENCHANTED_DIAMOND", "amount": -100})]),
        ]);
        let result = Valuator::new(&prices, &catalog, &tables).networth(&profile, 0.0, 0.0, false);
        assert_eq!(result.types["essence"].total, 0.0);
        assert_eq!(result.types["sacks"].total, 0.0);
        assert_eq!(result.networth, 0.0);
    }

    #[test]
    fn test_only_networth_drops_items() {
        let prices = prices();
        let catalog = ItemCatalog::default();
        let tables = ReferenceTables::default();
        let result = Valuator::new(&prices, &catalog, &tables).networth(&profile(), 0.0, 0.0, true);
        assert!(result.types.values().all(|c| c.items.is_none()));

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["types"]["inventory"].get("items").is_none());
        assert!(json.get("unsoulboundNetworth").is_some());
        assert!(json.get("noInventory").is_some());
    }

    #[test]
    fn test_no_inventory() {
        let prices = prices();
        let catalog = ItemCatalog::default();
        let tables = ReferenceTables::default();
        let result = Valuator::new(&prices, &catalog, &tables).networth(&BTreeMap::new(), 1.0, 2.0, false);
        assert!(result.no_inventory);
        assert_eq!(result.networth, 3.0);
    }
}
