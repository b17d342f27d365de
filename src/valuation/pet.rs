//! Pet valuation.
//!
//! Pets are priced from three market points (level 1, 100 and 200) and
//! interpolated by level, then adjusted for candy, held item and skin.

use tracing::debug;

use super::{PricedItem, Valuator};
use crate::constants::{PET_CANDY_MAX_REDUCTION, PET_CANDY_MIN_REDUCTION, PET_MAX_LEVEL, PET_SKIN_MARKER};
use crate::item::{PetInfo, PetLevel};
use crate::normalize::title_case;
use crate::pricing::{EntryKind, LedgerEntry, PricerOutcome, ValuationState};

/// Market anchors for one pet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetAnchors {
    pub lvl1: f64,
    pub lvl100: f64,
    pub lvl200: f64,
    /// Anchors came from the skinned listing, so the skin is already priced
    pub skinned: bool,
}

/// Interpolated price for a pet of `level`
pub fn level_price(anchors: &PetAnchors, level: &PetLevel, exp: f64) -> f64 {
    let PetAnchors {
        lvl1,
        lvl100,
        lvl200,
        ..
    } = *anchors;

    if level.level < PET_MAX_LEVEL {
        let progress = if level.xp_max > 0.0 {
            (exp / level.xp_max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        lvl1 + (lvl100 - lvl1) * progress
    } else if level.level == PET_MAX_LEVEL || lvl200 <= 0.0 {
        lvl100
    } else if level.level < 2 * PET_MAX_LEVEL {
        let progress = f64::from(level.level - PET_MAX_LEVEL) / f64::from(PET_MAX_LEVEL);
        lvl100 + (lvl200 - lvl100) * progress
    } else {
        lvl200
    }
}

impl Valuator<'_> {
    fn pet_anchors(&self, key: &str, skin: Option<&str>) -> Option<PetAnchors> {
        let anchors = |suffix: &str, skinned: bool| PetAnchors {
            lvl1: self.prices.get(&format!("lvl_1_{key}{suffix}")),
            lvl100: self.prices.get(&format!("lvl_100_{key}{suffix}")),
            lvl200: self.prices.get(&format!("lvl_200_{key}{suffix}")),
            skinned,
        };

        let skinned = skin
            .map(|skin| format!("_skinned_{}", skin.to_ascii_lowercase()))
            .filter(|suffix| self.prices.is_priced(&format!("lvl_1_{key}{suffix}")))
            .map(|suffix| anchors(&suffix, true));
        let chosen = skinned.unwrap_or_else(|| anchors("", false));

        (chosen.lvl1 > 0.0 && chosen.lvl100 > 0.0).then_some(chosen)
    }

    /// Price a decoded pet; `None` when its level 1 or level 100 price is unknown
    pub fn value_pet(&self, pet: &PetInfo) -> Option<PricedItem> {
        let key = format!("{}_{}", pet.tier, pet.pet_type).to_ascii_lowercase();
        let anchors = self.pet_anchors(&key, pet.skin.as_deref())?;
        let level = pet.level(self.tables);
        let worth = &self.tables.application_worth;

        let mut state = ValuationState::default();
        state.apply(PricerOutcome::replace(level_price(&anchors, &level, pet.exp)));

        if pet.candy_used > 0 && state.price > 0.0 {
            let cap = if level.level == PET_MAX_LEVEL {
                PET_CANDY_MAX_REDUCTION
            } else {
                PET_CANDY_MIN_REDUCTION
            };
            let reduced = (state.price * worth.pet_candy).max(state.price - cap);
            state.apply(PricerOutcome::scale(reduced / state.price));
        }

        if let Some(held) = pet.held_item.as_deref() {
            let price = self.prices.get(held) * worth.pet_item;
            if price > 0.0 {
                state.apply(PricerOutcome::additive(vec![LedgerEntry::new(
                    held.to_ascii_uppercase(),
                    EntryKind::PetItem,
                    price,
                    1,
                )]));
            }
        }

        if let Some(skin) = pet.skin.as_deref().filter(|_| !anchors.skinned) {
            let skin_id = format!("pet_skin_{}", skin.to_ascii_lowercase());
            let price = self.prices.get(&skin_id) * worth.soulbound_pet_skins;
            if price > 0.0 {
                state.apply(PricerOutcome::additive(vec![LedgerEntry::new(
                    skin_id.to_ascii_uppercase(),
                    EntryKind::PetSkin,
                    price,
                    1,
                )]));
            }
        }

        debug!(pet = %key, level = level.level, price = state.price, "pet valued");

        let marker = if pet.skin.is_some() { PET_SKIN_MARKER } else { "" };
        Some(PricedItem {
            name: format!(
                "[Lvl {}] {}{marker}",
                level.level,
                title_case(&format!("{} {}", pet.tier, pet.pet_type))
            ),
            id: key,
            price: state.price,
            base: state.base,
            calculation: state.ledger,
            count: 1,
            soulbound: false,
        })
    }
}
