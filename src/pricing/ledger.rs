//! Calculation ledger entries.

use serde::{Deserialize, Serialize};

/// What a ledger line accounts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Enchant,
    Attribute,
    Silex,
    GoldenBounty,
    GodRoll,
    PetSkin,
    PetItem,
    PocketSackInASack,
    WoodSingularity,
    JalapenoBook,
    TunedTransmission,
    ManaDisintegrator,
    ShensAuction,
    Star,
    MasterStar,
    Prestige,
    Reforge,
    Recombobulator,
    HotPotatoBook,
    FumingPotatoBook,
    ArtOfWar,
    ArtOfPeace,
    FarmingForDummies,
    Enrichment,
    DivanPowderCoating,
    Polarvoid,
    Etherwarp,
    ThunderInABottle,
    Rune,
    Gemstone,
    NecronBladeScroll,
    GemstonePowerScroll,
    DrillPart,
    Dye,
}

/// One explanatory line of a valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub price: f64,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star: Option<u32>,
}

impl LedgerEntry {
    pub fn new(id: impl Into<String>, kind: EntryKind, price: f64, count: u64) -> Self {
        Self {
            id: id.into(),
            kind,
            price,
            count,
            shards: None,
            star: None,
        }
    }

    pub fn with_shards(mut self, shards: u64) -> Self {
        self.shards = Some(shards);
        self
    }

    pub fn with_star(mut self, star: Option<u32>) -> Self {
        self.star = star;
        self
    }
}

/// Sum of ledger contributions
pub fn ledger_total(entries: &[LedgerEntry]) -> f64 {
    entries.iter().map(|e| e.price).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let entry = LedgerEntry::new("ATTACK_SPEED_3", EntryKind::Attribute, 150.0, 1).with_shards(3);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "attribute");
        assert_eq!(json["shards"], 3);
        assert!(json.get("star").is_none());
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<String> = [
            EntryKind::GoldenBounty,
            EntryKind::PocketSackInASack,
            EntryKind::ShensAuction,
            EntryKind::GemstonePowerScroll,
        ]
        .iter()
        .map(|k| serde_json::to_value(k).unwrap().as_str().unwrap().to_string())
        .collect();
        assert_eq!(
            names,
            ["golden_bounty", "pocket_sack_in_a_sack", "shens_auction", "gemstone_power_scroll"]
        );
    }

    #[test]
    fn test_ledger_total() {
        let entries = vec![
            LedgerEntry::new("A", EntryKind::Enchant, 10.0, 1),
            LedgerEntry::new("B", EntryKind::Silex, 2.5, 2),
        ];
        assert_eq!(ledger_total(&entries), 12.5);
        assert_eq!(ledger_total(&[]), 0.0);
    }
}
