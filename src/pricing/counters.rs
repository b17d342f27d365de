//! Consumable-application counters.
//!
//! Every counter is the same rule: `material price × count × worth`, one
//! ledger line. Each instance names the counter field, the material it
//! consumes, its worth weight and its ledger type.

use super::{EntryKind, LedgerEntry, Pricer, PricerOutcome, PricingContext, ValuationState};
use crate::item::AppliedCounters;
use crate::reference::ApplicationWorth;

pub struct CounterRule {
    pub name: &'static str,
    pub field: fn(&AppliedCounters) -> Option<u64>,
    pub material: &'static str,
    pub worth: fn(&ApplicationWorth) -> f64,
    pub kind: EntryKind,
}

impl Pricer for CounterRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn price(&self, ctx: &PricingContext<'_>, _state: &ValuationState) -> PricerOutcome {
        let count = match (self.field)(&ctx.attributes().counters) {
            Some(count) if count > 0 => count,
            _ => return PricerOutcome::none(),
        };
        let price = ctx.prices.get(self.material) * count as f64 * (self.worth)(ctx.worth());
        PricerOutcome::additive(vec![LedgerEntry::new(
            self.material.to_ascii_uppercase(),
            self.kind,
            price,
            count,
        )])
    }
}

pub const POCKET_SACK_IN_A_SACK: CounterRule = CounterRule {
    name: "pocket_sack_in_a_sack",
    field: |c| c.pocket_sack_in_a_sack,
    material: "pocket_sack_in_a_sack",
    worth: |w| w.pocket_sack_in_a_sack,
    kind: EntryKind::PocketSackInASack,
};

pub const WOOD_SINGULARITY: CounterRule = CounterRule {
    name: "wood_singularity",
    field: |c| c.wood_singularity,
    material: "wood_singularity",
    worth: |w| w.wood_singularity,
    kind: EntryKind::WoodSingularity,
};

pub const JALAPENO_BOOK: CounterRule = CounterRule {
    name: "jalapeno_book",
    field: |c| c.jalapeno_book,
    material: "jalapeno_book",
    worth: |w| w.jalapeno_book,
    kind: EntryKind::JalapenoBook,
};

pub const TUNED_TRANSMISSION: CounterRule = CounterRule {
    name: "tuned_transmission",
    field: |c| c.tuned_transmission,
    material: "transmission_tuner",
    worth: |w| w.tuned_transmission,
    kind: EntryKind::TunedTransmission,
};

pub const MANA_DISINTEGRATOR: CounterRule = CounterRule {
    name: "mana_disintegrator",
    field: |c| c.mana_disintegrator,
    material: "mana_disintegrator",
    worth: |w| w.mana_disintegrator,
    kind: EntryKind::ManaDisintegrator,
};

pub const ART_OF_WAR: CounterRule = CounterRule {
    name: "art_of_war",
    field: |c| c.art_of_war,
    material: "the_art_of_war",
    worth: |w| w.art_of_war,
    kind: EntryKind::ArtOfWar,
};

pub const ART_OF_PEACE: CounterRule = CounterRule {
    name: "art_of_peace",
    field: |c| c.art_of_peace,
    material: "the_art_of_peace",
    worth: |w| w.art_of_peace,
    kind: EntryKind::ArtOfPeace,
};

pub const FARMING_FOR_DUMMIES: CounterRule = CounterRule {
    name: "farming_for_dummies",
    field: |c| c.farming_for_dummies,
    material: "farming_for_dummies",
    worth: |w| w.farming_for_dummies,
    kind: EntryKind::FarmingForDummies,
};

pub const DIVAN_POWDER_COATING: CounterRule = CounterRule {
    name: "divan_powder_coating",
    field: |c| c.divan_powder_coating,
    material: "divan_powder_coating",
    worth: |w| w.divan_powder_coating,
    kind: EntryKind::DivanPowderCoating,
};

pub const POLARVOID: CounterRule = CounterRule {
    name: "polarvoid",
    field: |c| c.polarvoid,
    material: "polarvoid_book",
    worth: |w| w.polarvoid,
    kind: EntryKind::Polarvoid,
};

pub const ETHERWARP: CounterRule = CounterRule {
    name: "etherwarp",
    field: |c| c.ethermerge,
    material: "etherwarp_conduit",
    worth: |w| w.etherwarp,
    kind: EntryKind::Etherwarp,
};
