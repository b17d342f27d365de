//! Centralized valuation constants for the networth core.
//!
//! Eliminates magic numbers duplicated across pricers and valuators.
//! Tunable weights (application worth, enchant weights) live in
//! `reference::ReferenceTables` instead, so callers can override them.

// =====================================================
// Base price
// =====================================================

/// Fraction of a recorded shop purchase price recovered on resale
pub const SHOP_TAKE_RATE: f64 = 0.85;

/// Full durability of a Pickonimbus; partial durability scales price
pub const PICKONIMBUS_MAX_DURABILITY: f64 = 5000.0;

/// Material stacks with this id prefix are valued as essence
pub const ESSENCE_ID_PREFIX: &str = "ESSENCE_";

// =====================================================
// God rolls & prestige
// =====================================================

/// Upgrade-tier prefixes removed before building a god-roll id
pub const UPGRADE_TIER_PREFIXES: [&str; 4] = ["hot_", "fiery_", "burning_", "infernal_"];

/// Separator between attribute names inside a god-roll id
pub const GOD_ROLL_SEPARATOR: &str = "_roll_";

/// Armor families that share Kuudra attribute pricing
pub const KUUDRA_ARMOR_FAMILIES: [&str; 5] = ["crimson", "aurora", "terror", "hollow", "fervor"];

/// Armor pieces of a Kuudra family
pub const KUUDRA_ARMOR_PIECES: [&str; 4] = ["helmet", "chestplate", "leggings", "boots"];

// =====================================================
// Enchantments
// =====================================================

/// Highest Efficiency level reachable without Silex
pub const EFFICIENCY_NATURAL_CAP: u32 = 5;

/// Scavenger level that requires a Golden Bounty
pub const SCAVENGER_GOLDEN_BOUNTY_LEVEL: u32 = 6;

/// Item whose first excess Efficiency level is built in
pub const SILEX_DISCOUNT_ITEM: &str = "stonk_pickaxe";

// =====================================================
// Upgrades
// =====================================================

/// Hot potato books applied before the rest count as fuming
pub const HOT_POTATO_BOOK_CAP: u32 = 10;

/// Thunder charge stored per Thunder in a Bottle
pub const THUNDER_CHARGE_PER_BOTTLE: u64 = 50_000;

/// Star level above which master stars are required
pub const DUNGEON_STAR_CAP: u32 = 5;

// =====================================================
// Pets
// =====================================================

/// Default maximum pet level
pub const PET_MAX_LEVEL: u32 = 100;

/// Maximum price reduction for a candied level-100 pet
pub const PET_CANDY_MAX_REDUCTION: f64 = 5_000_000.0;

/// Maximum price reduction for a candied pet below level 100
pub const PET_CANDY_MIN_REDUCTION: f64 = 2_500_000.0;

// =====================================================
// Display
// =====================================================

/// Lore line marking a soulbound item
pub const SOULBOUND_LORE_MARKERS: [&str; 2] = ["* Soulbound *", "* Co-op Soulbound *"];

/// Marker appended to a skinned pet's display name
pub const PET_SKIN_MARKER: &str = " ✦";
