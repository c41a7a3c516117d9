use alloc::{boxed::Box, vec::Vec};

use crate::{
    error::{tz::table::Error as E, Error},
    tz::{
        table::ZoneRecord,
        types::TypeCatalog,
    },
    util::itime::ITimestamp,
};

/// The transitions of a single zone, as one ascending sequence.
///
/// A zone record stores its transitions in three tiers (before `i32::MIN`,
/// 32-bit, after `i32::MAX`). The tiers are merged here when a registry is
/// built, so that searching is written once.
#[derive(Clone, Debug)]
pub(crate) struct TransitionIndex {
    /// Strictly increasing instants, in seconds since the Unix epoch.
    instants: Box<[i64]>,
    /// Parallel to `instants`. Each entry is the type that takes effect at
    /// the corresponding instant.
    type_map: Box<[u8]>,
}

impl TransitionIndex {
    /// Merges and checks the transitions of the given zone record.
    pub(crate) fn new(
        record: &ZoneRecord,
        types: &TypeCatalog,
    ) -> Result<TransitionIndex, Error> {
        let total = record.trans_pre32.len()
            + record.trans.len()
            + record.trans_post32.len();
        if record.type_map.len() != total {
            return Err(Error::from(E::TypeMapLength {
                type_map: record.type_map.len(),
                transitions: total,
            }));
        }

        let mut instants: Vec<i64> = Vec::with_capacity(total);
        for (position, (tier, instant)) in record.tiered().enumerate() {
            if !tier.contains(instant) {
                let tier = tier.name();
                return Err(Error::from(E::TierMisplaced { tier, instant }));
            }
            if !(ITimestamp { second: instant }).is_valid() {
                return Err(Error::from(E::TransitionOutOfRange { instant }));
            }
            if let Some(&previous) = instants.last() {
                if instant <= previous {
                    return Err(Error::from(E::TransitionsNotIncreasing {
                        position,
                        previous,
                        next: instant,
                    }));
                }
            }
            instants.push(instant);
        }
        for (position, &index) in record.type_map.iter().enumerate() {
            if usize::from(index) >= types.len() {
                return Err(Error::from(E::TypeMapOutOfRange {
                    position,
                    index,
                    len: types.len(),
                }));
            }
        }
        Ok(TransitionIndex {
            instants: instants.into_boxed_slice(),
            type_map: record.type_map.clone().into_boxed_slice(),
        })
    }

    /// The total number of transitions across all tiers.
    pub(crate) fn len(&self) -> usize {
        self.instants.len()
    }

    /// The type map, parallel to the merged transition instants.
    pub(crate) fn type_map(&self) -> &[u8] {
        &self.type_map
    }

    /// Returns the instant of the last transition, if there are any.
    pub(crate) fn last(&self) -> Option<i64> {
        self.instants.last().copied()
    }

    /// Returns the position of the greatest transition less than or equal
    /// to `instant`, or `None` if `instant` precedes every transition.
    ///
    /// A transition at `T` governs `[T, next)`, so an instant exactly equal
    /// to a transition finds that transition.
    pub(crate) fn search(&self, instant: i64) -> Option<usize> {
        self.instants.partition_point(|&t| t <= instant).checked_sub(1)
    }

    /// Returns the type in effect at the transition in the given position.
    pub(crate) fn type_at(&self, position: usize) -> u8 {
        self.type_map[position]
    }

    /// Returns the position of the first transition strictly after
    /// `instant`.
    pub(crate) fn after(&self, instant: i64) -> Option<usize> {
        let i = self.instants.partition_point(|&t| t <= instant);
        if i < self.instants.len() {
            Some(i)
        } else {
            None
        }
    }

    /// Returns the position of the last transition strictly before
    /// `instant`.
    pub(crate) fn before(&self, instant: i64) -> Option<usize> {
        self.instants.partition_point(|&t| t < instant).checked_sub(1)
    }

    /// Returns the instant of the transition in the given position.
    pub(crate) fn instant(&self, position: usize) -> i64 {
        self.instants[position]
    }
}
