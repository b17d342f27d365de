//! Essence and sack material stacks.

use super::{PricedItem, Valuator};
use crate::item::MaterialStack;
use crate::normalize::{strip_formatting, title_case};

const RUNE_PREFIX: &str = "rune_";

fn stack_count(amount: f64) -> u64 {
    amount.round() as u64
}

impl Valuator<'_> {
    /// `ESSENCE_WITHER × 120` → `Wither Essence`; essence never leaves its
    /// owner, so the result is soulbound
    pub fn value_essence(&self, stack: &MaterialStack) -> Option<PricedItem> {
        let id = stack.id.to_ascii_lowercase();
        let unit = self.prices.get(&id);
        if unit <= 0.0 {
            return None;
        }
        let kind = id.split('_').nth(1).unwrap_or(&id);
        let price = unit * stack.amount;
        Some(PricedItem {
            name: format!("{} Essence", title_case(kind)),
            id,
            price,
            base: price,
            calculation: Vec::new(),
            count: stack_count(stack.amount),
            soulbound: true,
        })
    }

    /// A sack material; rune entries must name a known rune tier
    pub fn value_sack_item(&self, stack: &MaterialStack) -> Option<PricedItem> {
        let id = stack.id.to_ascii_lowercase();
        if let Some(rune) = id.strip_prefix(RUNE_PREFIX) {
            if !self.tables.is_valid_rune(rune) {
                return None;
            }
        }
        let unit = self.prices.get(&id);
        if unit <= 0.0 {
            return None;
        }
        let price = unit * stack.amount;
        let name = stack
            .name
            .as_deref()
            .map(strip_formatting)
            .unwrap_or_else(|| title_case(&id));
        Some(PricedItem {
            name,
            id,
            price,
            base: price,
            calculation: Vec::new(),
            count: stack_count(stack.amount),
            soulbound: false,
        })
    }
}
