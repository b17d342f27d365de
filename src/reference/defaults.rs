//! Built-in reference data.

use std::collections::HashMap;

use super::CustomPetLeveling;

fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn enchants_worth() -> HashMap<String, f64> {
    [
        ("counter_strike", 0.2),
        ("big_brain", 0.35),
        ("ultimate_inferno", 0.35),
        ("overload", 0.35),
        ("ultimate_soul_eater", 0.35),
        ("ultimate_fatal_tempo", 0.65),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), *v))
    .collect()
}

pub(super) fn blocked_enchants() -> HashMap<String, Vec<String>> {
    let bow = ["overload", "power", "ultimate_soul_eater"];
    let garden = ["replenish"];
    [
        ("bone_boomerang", &bow[..]),
        ("death_bow", &bow[..]),
        ("gardening_axe", &garden[..]),
        ("gardening_hoe", &garden[..]),
        ("advanced_gardening_axe", &garden[..]),
        ("advanced_gardening_hoe", &garden[..]),
    ]
    .iter()
    .map(|(item, enchants)| (item.to_string(), strings(enchants)))
    .collect()
}

pub(super) fn ignored_enchants() -> HashMap<String, u32> {
    HashMap::from([("scavenger".to_string(), 5)])
}

pub(super) fn stacking_enchants() -> Vec<String> {
    strings(&[
        "expertise",
        "compact",
        "cultivating",
        "champion",
        "hecatomb",
        "toxophilite",
    ])
}

pub(super) fn ignore_silex() -> Vec<String> {
    strings(&["promising_spade"])
}

pub(super) fn master_stars() -> Vec<String> {
    strings(&[
        "first_master_star",
        "second_master_star",
        "third_master_star",
        "fourth_master_star",
        "fifth_master_star",
    ])
}

pub(super) fn valid_runes() -> Vec<String> {
    strings(&[
        "MUSIC_1",
        "MUSIC_2",
        "MUSIC_3",
        "MEOW_MUSIC_3",
        "ENCHANT_1",
        "ENCHANT_2",
        "ENCHANT_3",
        "GRAND_SEARING_3",
        "SPELLBOUND_3",
        "GRAND_FREEZING_3",
        "PRIMAL_FEAR_3",
        "GOLDEN_CARPET_3",
        "ICE_SKATES_3",
        "BARK_TUNES_3",
        "SMITTEN_3",
        "RAINY_DAY_3",
    ])
}

pub(super) fn allowed_recomb_types() -> Vec<String> {
    strings(&["ACCESSORY", "NECKLACE", "GLOVES", "BRACELET", "BELT", "CLOAK"])
}

pub(super) fn allowed_recomb_ids() -> Vec<String> {
    strings(&[
        "divan_helmet",
        "divan_chestplate",
        "divan_leggings",
        "divan_boots",
        "fermento_helmet",
        "fermento_chestplate",
        "fermento_leggings",
        "fermento_boots",
        "shadow_assassin_cloak",
        "starred_shadow_assassin_cloak",
    ])
}

pub(super) fn attributes_base_costs() -> HashMap<String, String> {
    string_map(&[
        ("glowstone_gauntlet", "glowstone_gauntlet"),
        ("vanquished_glowstone_gauntlet", "glowstone_gauntlet"),
        ("blaze_belt", "blaze_belt"),
        ("vanquished_blaze_belt", "blaze_belt"),
        ("magma_necklace", "magma_necklace"),
        ("vanquished_magma_necklace", "magma_necklace"),
        ("magma_rod", "magma_rod"),
        ("inferno_rod", "magma_rod"),
        ("hellfire_rod", "magma_rod"),
    ])
}

pub(super) fn enrichments() -> Vec<String> {
    [
        "CRITICAL_CHANCE",
        "CRITICAL_DAMAGE",
        "DEFENSE",
        "HEALTH",
        "INTELLIGENCE",
        "MAGIC_FIND",
        "WALK_SPEED",
        "STRENGTH",
        "ATTACK_SPEED",
        "FEROCITY",
        "SEA_CREATURE_CHANCE",
    ]
    .iter()
    .map(|stat| format!("talisman_enrichment_{}", stat.to_ascii_lowercase()))
    .collect()
}

pub(super) fn special_enchantment_names() -> HashMap<String, String> {
    string_map(&[
        ("aiming", "Dragon Tracer"),
        ("counter_strike", "Counter-Strike"),
        ("pristine", "Prismatic"),
        ("turbo_cacti", "Turbo-Cacti"),
        ("turbo_cane", "Turbo-Cane"),
        ("turbo_carrot", "Turbo-Carrot"),
        ("turbo_cocoa", "Turbo-Cocoa"),
        ("turbo_melon", "Turbo-Melon"),
        ("turbo_mushrooms", "Turbo-Mushrooms"),
        ("turbo_potato", "Turbo-Potato"),
        ("turbo_pumpkin", "Turbo-Pumpkin"),
        ("turbo_warts", "Turbo-Warts"),
        ("turbo_wheat", "Turbo-Wheat"),
        ("ultimate_reiterate", "Ultimate Duplex"),
        ("ultimate_bobbin_time", "Ultimate Bobbin' Time"),
    ])
}

/// Kuudra armor prestige chains, nearest ancestor first.
///
/// `INFERNAL_AURORA_BOOTS` → `[FIERY_.., BURNING_.., HOT_.., AURORA_BOOTS]`
pub(super) fn prestiges() -> HashMap<String, Vec<String>> {
    const FAMILIES: [&str; 5] = ["CRIMSON", "TERROR", "FERVOR", "HOLLOW", "AURORA"];
    const PIECES: [&str; 4] = ["HELMET", "CHESTPLATE", "LEGGINGS", "BOOTS"];
    const TIERS: [&str; 4] = ["HOT", "BURNING", "FIERY", "INFERNAL"];

    let mut chains = HashMap::new();
    for family in FAMILIES {
        for piece in PIECES {
            let base = format!("{family}_{piece}");
            for (depth, tier) in TIERS.iter().enumerate() {
                let mut ancestors: Vec<String> = TIERS[..depth]
                    .iter()
                    .rev()
                    .map(|t| format!("{t}_{base}"))
                    .collect();
                ancestors.push(base.clone());
                chains.insert(format!("{tier}_{base}"), ancestors);
            }
        }
    }
    chains
}

pub(super) fn reforges() -> HashMap<String, String> {
    string_map(&[
        ("stiff", "hardened_wood"),
        ("salty", "salt_cube"),
        ("aote_stone", "aote_stone"),
        ("blazing", "blazen_sphere"),
        ("waxed", "blaze_wax"),
        ("rooted", "burrowing_spores"),
        ("candied", "candy_corn"),
        ("perfect", "diamond_atom"),
        ("fleet", "diamonite"),
        ("fabled", "dragon_claw"),
        ("spiked", "dragon_scale"),
        ("royal", "dwarven_treasure"),
        ("hyper", "endstone_geode"),
        ("coldfusion", "entropy_suppressor"),
        ("blooming", "flowering_bouquet"),
        ("fanged", "full_jaw_fanging_kit"),
        ("jaded", "jaderald"),
        ("jerry", "jerry_stone"),
        ("magnetic", "lapis_crystal"),
        ("earthy", "large_walnut"),
        ("fortified", "meteor_shard"),
        ("gilded", "midas_jewel"),
        ("cubic", "molten_cube"),
        ("necrotic", "necromancer_brooch"),
        ("fruitful", "onyx"),
        ("precise", "optical_lens"),
        ("mossy", "overgrown_grass"),
        ("pitchin", "pitchin_koi"),
        ("undead", "premium_flesh"),
        ("blood_soaked", "presumed_gallon_of_red_paint"),
        ("mithraic", "pure_mithril"),
        ("reinforced", "rare_diamond"),
        ("ridiculous", "red_nose"),
        ("loving", "red_scarf"),
        ("auspicious", "rock_gemstone"),
        ("treacherous", "rusty_anchor"),
        ("headstrong", "salmon_opal"),
        ("strengthened", "searing_stone"),
        ("glistening", "shiny_prism"),
        ("bustling", "skymart_brochure"),
        ("spiritual", "spirit_decoy"),
        ("suspicious", "suspicious_vial"),
        ("snowy", "terry_snowglobe"),
        ("dimensional", "titanium_tesseract"),
        ("ambered", "amber_material"),
        ("beady", "beady_eyes"),
        ("blessed", "blessed_fruit"),
        ("bulky", "bulky_stone"),
        ("buzzing", "clipped_wings"),
        ("submerged", "deep_sea_orb"),
        ("renowned", "dragon_horn"),
        ("festive", "frozen_bauble"),
        ("giant", "giant_tooth"),
        ("lustrous", "gleaming_crystal"),
        ("bountiful", "golden_ball"),
        ("chomp", "kuudra_mandible"),
        ("lucky", "lucky_dice"),
        ("stellar", "petrified_starfall"),
        ("scraped", "pocket_iceberg"),
        ("ancient", "precursor_gear"),
        ("refined", "refined_amber"),
        ("empowered", "sadan_brooch"),
        ("withered", "wither_blood"),
        ("glacial", "frigid_husk"),
        ("heated", "hot_stuff"),
        ("dirty", "dirt_bottle"),
        ("moil", "moil_log"),
        ("toil", "toil_log"),
        ("greater_spook", "boo_stone"),
    ])
}

/// XP needed for each pet level-up, indexed from the rarity offset
pub(super) fn pet_levels() -> Vec<u64> {
    vec![
        100, 110, 120, 130, 145, 160, 175, 190, 210, 230, 250, 275, 300, 330, 360, 400, 440, 490,
        540, 600, 660, 730, 800, 880, 960, 1050, 1150, 1260, 1380, 1510, 1650, 1800, 1960, 2130,
        2310, 2500, 2700, 2920, 3160, 3420, 3700, 4000, 4350, 4750, 5200, 5700, 6300, 7000, 7800,
        8700, 9700, 10800, 12000, 13300, 14700, 16200, 17800, 19500, 21300, 23200, 25200, 27400,
        29800, 32400, 35200, 38200, 41400, 44800, 48400, 52200, 56200, 60400, 64800, 69400, 74200,
        79200, 84700, 90700, 97200, 104200, 111700, 119700, 128200, 137200, 146700, 156700,
        167700, 179700, 192700, 206700, 221700, 237700, 254700, 272700, 291700, 311700, 333700,
        357700, 383700, 411700, 441700, 476700, 516700, 561700, 611700, 666700, 726700, 791700,
        861700, 936700, 1016700, 1101700, 1191700, 1286700, 1386700, 1496700, 1616700, 1746700,
        1886700,
    ]
}

pub(super) fn pet_rarity_offset() -> HashMap<String, usize> {
    [
        ("COMMON", 0),
        ("UNCOMMON", 6),
        ("RARE", 11),
        ("EPIC", 16),
        ("LEGENDARY", 20),
        ("MYTHIC", 20),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), *v))
    .collect()
}

pub(super) fn custom_pet_leveling() -> HashMap<String, CustomPetLeveling> {
    let mut golden_dragon = vec![0, 5555];
    golden_dragon.extend(std::iter::repeat(1_886_700).take(98));
    HashMap::from([(
        "GOLDEN_DRAGON".to_string(),
        CustomPetLeveling {
            max_level: 200,
            extra_levels: golden_dragon,
        },
    )])
}
