use alloc::{boxed::Box, vec};

use crate::{
    error::{
        tz::{db::Error as DbError, table::Error as TableError},
        Error, ErrorContext,
    },
    tz::table::{AliasRecord, ZoneRecord},
};

/// The default number of aliases followed before giving up.
pub(crate) const DEFAULT_HOP_LIMIT: usize = 16;

/// What a slot in the name catalog refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    /// A name with neither a zone nor an alias behind it.
    Empty,
    /// A canonical zone, given by its position in the zone table.
    Zone(usize),
    /// An alias to another slot.
    Alias(u32),
}

/// Resolves slots, following alias chains to a canonical zone.
///
/// Chains are followed with a bounded loop. Cycles aren't rejected when the
/// tables are loaded. Instead, resolving any alias that takes part in one
/// (or leads into one) fails with a "cycle detected" error once the hop
/// limit is reached.
#[derive(Clone, Debug)]
pub(crate) struct AliasResolver {
    slots: Box<[Slot]>,
    hop_limit: usize,
}

impl AliasResolver {
    /// Builds the slot table and checks that every slot is claimed at most
    /// once and that every alias targets a zone or another alias.
    pub(crate) fn new(
        names: &[Box<str>],
        zones: &[ZoneRecord],
        aliases: &[AliasRecord],
        hop_limit: usize,
    ) -> Result<AliasResolver, Error> {
        let len = names.len();
        let mut slots = vec![Slot::Empty; len];
        let mut claim = |slot: u32, what: Slot| -> Result<(), Error> {
            let Some(entry) = usize::try_from(slot)
                .ok()
                .and_then(|i| slots.get_mut(i))
            else {
                return Err(Error::from(TableError::SlotOutOfRange {
                    slot,
                    len,
                }));
            };
            if *entry != Slot::Empty {
                return Err(Error::from(TableError::DuplicateSlot { slot }));
            }
            *entry = what;
            Ok(())
        };
        for (position, zone) in zones.iter().enumerate() {
            claim(zone.index, Slot::Zone(position))?;
        }
        for alias in aliases.iter() {
            claim(alias.index, Slot::Alias(alias.target))?;
        }
        for alias in aliases.iter() {
            let target = usize::try_from(alias.target)
                .ok()
                .and_then(|i| slots.get(i));
            let result = match target {
                None => Err(Error::from(TableError::SlotOutOfRange {
                    slot: alias.target,
                    len,
                })),
                Some(Slot::Empty) => {
                    Err(Error::from(TableError::AliasTargetEmpty {
                        target: alias.target,
                    }))
                }
                Some(_) => Ok(()),
            };
            result.with_context(|| TableError::Alias {
                // OK because the alias slot was claimed above.
                name: names[alias.index as usize].clone(),
            })?;
        }
        Ok(AliasResolver { slots: slots.into_boxed_slice(), hop_limit })
    }

    /// Returns what the given slot refers to, if the slot exists.
    pub(crate) fn slot(&self, slot: u32) -> Option<Slot> {
        self.slots.get(usize::try_from(slot).ok()?).copied()
    }

    /// Returns the position of the canonical zone that `slot` leads to,
    /// or `None` if the chain ends at an empty slot or never ends.
    ///
    /// Unlike `resolve`, this ignores the configured hop limit. Any chain
    /// that ends does so within one hop per slot.
    pub(crate) fn canonical(&self, slot: u32) -> Option<usize> {
        let mut current = slot;
        for _ in 0..=self.slots.len() {
            match self.slot(current)? {
                Slot::Empty => return None,
                Slot::Zone(position) => return Some(position),
                Slot::Alias(target) => current = target,
            }
        }
        None
    }

    pub(crate) fn hop_limit(&self) -> usize {
        self.hop_limit
    }

    /// Follows `slot` to the position of a canonical zone.
    ///
    /// `names` is only used for error reporting.
    pub(crate) fn resolve(
        &self,
        slot: u32,
        names: &[Box<str>],
    ) -> Result<usize, Error> {
        let mut current = slot;
        let mut hops = 0;
        loop {
            match self.slot(current) {
                None | Some(Slot::Empty) => {
                    return Err(Error::from(DbError::UnknownZoneIndex {
                        index: current,
                    }));
                }
                Some(Slot::Zone(position)) => return Ok(position),
                Some(Slot::Alias(target)) => {
                    if hops >= self.hop_limit {
                        let name = names[slot as usize].clone();
                        warn!(
                            "alias {name:?} did not resolve after \
                             {hops} hops, giving up",
                        );
                        return Err(Error::from(DbError::CycleDetected {
                            name,
                            hops,
                        }));
                    }
                    hops += 1;
                    current = target;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn names(n: usize) -> Vec<Box<str>> {
        (0..n).map(|i| alloc::format!("Name/{i}").into()).collect()
    }

    fn zone(index: u32) -> ZoneRecord {
        ZoneRecord { index, ..ZoneRecord::default() }
    }

    fn alias(index: u32, target: u32) -> AliasRecord {
        AliasRecord { index, target }
    }

    #[test]
    fn follows_chains() {
        let names = names(5);
        let zones = [zone(0), zone(3)];
        let aliases = [alias(1, 0), alias(2, 1), alias(4, 2)];
        let resolver =
            AliasResolver::new(&names, &zones, &aliases, DEFAULT_HOP_LIMIT)
                .unwrap();

        assert_eq!(resolver.resolve(0, &names).unwrap(), 0);
        assert_eq!(resolver.resolve(3, &names).unwrap(), 1);
        assert_eq!(resolver.resolve(1, &names).unwrap(), 0);
        assert_eq!(resolver.resolve(2, &names).unwrap(), 0);
        assert_eq!(resolver.resolve(4, &names).unwrap(), 0);
        assert_eq!(resolver.slot(4), Some(Slot::Alias(2)));
        assert_eq!(resolver.slot(5), None);

        let err = resolver.resolve(5, &names).unwrap_err();
        assert!(err.is_unknown_zone_index());
    }

    #[test]
    fn hop_limit_bounds_chains() {
        let names = names(4);
        let zones = [zone(0)];
        let aliases = [alias(1, 0), alias(2, 1), alias(3, 2)];

        let resolver =
            AliasResolver::new(&names, &zones, &aliases, 3).unwrap();
        assert_eq!(resolver.resolve(3, &names).unwrap(), 0);

        let resolver =
            AliasResolver::new(&names, &zones, &aliases, 2).unwrap();
        assert_eq!(resolver.resolve(2, &names).unwrap(), 0);
        let err = resolver.resolve(3, &names).unwrap_err();
        assert!(err.is_cycle_detected());
        // The hop limit only applies to lookups.
        assert_eq!(resolver.canonical(3), Some(0));
    }

    #[test]
    fn cycles_are_detected() {
        let names = names(4);
        let zones = [zone(0)];
        // 1 -> 2 -> 3 -> 1, and nothing ever reaches zone 0.
        let aliases = [alias(1, 2), alias(2, 3), alias(3, 1)];
        let resolver =
            AliasResolver::new(&names, &zones, &aliases, DEFAULT_HOP_LIMIT)
                .unwrap();
        for slot in 1..=3 {
            let err = resolver.resolve(slot, &names).unwrap_err();
            assert!(err.is_cycle_detected());
        }
        assert_eq!(resolver.resolve(0, &names).unwrap(), 0);
        assert_eq!(resolver.canonical(1), None);
        assert_eq!(resolver.canonical(0), Some(0));

        let err = resolver.resolve(1, &names).unwrap_err();
        assert_eq!(
            alloc::string::ToString::to_string(&err),
            "alias `Name/1` did not reach a canonical zone \
             after following 16 aliases (is there a cycle?)",
        );
    }

    #[test]
    fn self_alias_is_a_cycle() {
        let names = names(2);
        let resolver =
            AliasResolver::new(&names, &[zone(0)], &[alias(1, 1)], 16)
                .unwrap();
        assert!(resolver.resolve(1, &names).unwrap_err().is_cycle_detected());
    }

    #[test]
    fn rejects_bad_slots() {
        let names = names(3);

        let err = AliasResolver::new(&names, &[zone(3)], &[], 16).unwrap_err();
        assert!(err.is_malformed_table());

        let err = AliasResolver::new(&names, &[zone(0)], &[alias(0, 0)], 16)
            .unwrap_err();
        assert!(err.is_malformed_table());

        let err = AliasResolver::new(&names, &[zone(0), zone(0)], &[], 16)
            .unwrap_err();
        assert!(err.is_malformed_table());

        let err = AliasResolver::new(&names, &[zone(0)], &[alias(1, 2)], 16)
            .unwrap_err();
        assert!(err.is_malformed_table());

        let err = AliasResolver::new(&names, &[zone(0)], &[alias(1, 7)], 16)
            .unwrap_err();
        assert!(err.is_malformed_table());
    }
}
