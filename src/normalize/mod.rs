//! Identifier normalization.
//!
//! Derives the canonical (lowercase) pricing key for an item from its
//! `ExtraAttributes`. Special cases are an ordered list of independent
//! rewrite rules:
//! - each rule sees the id produced by the rules before it
//! - a rule either rewrites the id or leaves it alone
//! - adding a special case means adding one entry to [`ID_RULES`]
//!
//! Display-name helpers live here too, since both sides derive from the
//! same raw fields.

use tracing::debug;

use crate::item::ExtraAttributes;
use crate::prices::catalog::ItemMetadata;
use crate::prices::PriceTable;

/// Inputs every id rule may consult
pub struct RuleInput<'a> {
    pub attributes: &'a ExtraAttributes,
    pub prices: &'a PriceTable,
}

impl RuleInput<'_> {
    fn raw_id(&self) -> &str {
        self.attributes.raw_id().unwrap_or_default()
    }
}

/// One predicate→rewrite step
pub struct IdRule {
    pub name: &'static str,
    pub rewrite: fn(&RuleInput<'_>, &str) -> Option<String>,
}

/// Rewrite rules in precedence order
pub const ID_RULES: &[IdRule] = &[
    IdRule {
        name: "skin_variant",
        rewrite: skin_variant,
    },
    IdRule {
        name: "sloth_hat_emoji",
        rewrite: sloth_hat_emoji,
    },
    IdRule {
        name: "single_rune",
        rewrite: single_rune,
    },
    IdRule {
        name: "new_year_cake",
        rewrite: new_year_cake,
    },
    IdRule {
        name: "party_hat_color",
        rewrite: party_hat_color,
    },
    IdRule {
        name: "editioned_space_helm",
        rewrite: editioned_space_helm,
    },
    IdRule {
        name: "uneditioned_creative_mind",
        rewrite: uneditioned_creative_mind,
    },
    IdRule {
        name: "shiny_variant",
        rewrite: shiny_variant,
    },
    IdRule {
        name: "destarred_fallback",
        rewrite: destarred_fallback,
    },
];

fn skin_variant(input: &RuleInput<'_>, id: &str) -> Option<String> {
    let skin = input.attributes.skin.as_deref()?;
    let candidate = format!("{id}_skinned_{}", skin.to_ascii_lowercase());
    input.prices.is_priced(&candidate).then_some(candidate)
}

fn sloth_hat_emoji(input: &RuleInput<'_>, id: &str) -> Option<String> {
    if id != "party_hat_sloth" {
        return None;
    }
    let emoji = input.attributes.party_hat_emoji.as_deref()?;
    let candidate = format!("{id}_{}", emoji.to_ascii_lowercase());
    input.prices.is_priced(&candidate).then_some(candidate)
}

fn single_rune(input: &RuleInput<'_>, _id: &str) -> Option<String> {
    if !input.attributes.is_rune_item() || input.attributes.runes.len() != 1 {
        return None;
    }
    let (rune, tier) = input.attributes.runes.iter().next()?;
    Some(format!("rune_{rune}_{tier}"))
}

fn new_year_cake(input: &RuleInput<'_>, _id: &str) -> Option<String> {
    if input.raw_id() != "NEW_YEAR_CAKE" {
        return None;
    }
    let year = input.attributes.new_years_cake.as_deref()?;
    Some(format!("new_year_cake_{year}"))
}

fn party_hat_color(input: &RuleInput<'_>, _id: &str) -> Option<String> {
    let raw = input.raw_id();
    if !matches!(raw, "PARTY_HAT_CRAB" | "PARTY_HAT_CRAB_ANIMATED" | "BALLOON_HAT_2024") {
        return None;
    }
    let color = input.attributes.party_hat_color.as_deref()?;
    Some(format!("{raw}_{color}").to_ascii_lowercase())
}

fn editioned_space_helm(input: &RuleInput<'_>, _id: &str) -> Option<String> {
    (input.raw_id() == "DCTR_SPACE_HELM" && input.attributes.edition.is_some())
        .then(|| "dctr_space_helm_editioned".to_string())
}

fn uneditioned_creative_mind(input: &RuleInput<'_>, _id: &str) -> Option<String> {
    (input.raw_id() == "CREATIVE_MIND" && input.attributes.edition.is_none())
        .then(|| "creative_mind_uneditioned".to_string())
}

fn shiny_variant(input: &RuleInput<'_>, id: &str) -> Option<String> {
    if !input.attributes.is_shiny {
        return None;
    }
    let candidate = format!("{id}_shiny");
    input.prices.is_priced(&candidate).then_some(candidate)
}

fn destarred_fallback(input: &RuleInput<'_>, id: &str) -> Option<String> {
    if !input.raw_id().starts_with("STARRED_") || input.prices.is_priced(id) {
        return None;
    }
    let candidate = id.replacen("starred_", "", 1);
    input.prices.is_priced(&candidate).then_some(candidate)
}

/// Canonical pricing key for an identified item
pub fn canonical_id(attributes: &ExtraAttributes, prices: &PriceTable) -> String {
    let input = RuleInput { attributes, prices };
    let mut id = input.raw_id().to_ascii_lowercase();
    for rule in ID_RULES {
        if let Some(rewritten) = (rule.rewrite)(&input, &id) {
            debug!(rule = rule.name, from = %id, to = %rewritten, "id rewritten");
            id = rewritten;
        }
    }
    id
}

/// Remove `§x` formatting codes
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// `GOLDEN_DRAGON` → `Golden Dragon`
pub fn title_case(text: &str) -> String {
    text.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display name with tier/skill suffixes that the raw name leaves out
pub fn display_name(name: &str, metadata: Option<&ItemMetadata>) -> String {
    let Some(metadata) = metadata else {
        return name.to_string();
    };
    match name {
        "Beastmaster Crest" | "Griffin Upgrade Stone" | "Wisp Upgrade Stone" => {
            match metadata.tier.as_deref() {
                Some(tier) => format!("{name} ({})", title_case(tier)),
                None => name.to_string(),
            }
        }
        _ if name.ends_with(" Exp Boost") => match metadata.id.rsplit('_').next() {
            Some(skill) if !skill.is_empty() => format!("{name} ({})", title_case(skill)),
            _ => name.to_string(),
        },
        _ => name.to_string(),
    }
}
