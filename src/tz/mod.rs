/*!
Routines for resolving zone names and looking up UTC offsets.

The main type in this module is [`ZoneRegistry`]. It is built once from a
set of [`Tables`] and answers every query after that:

* [`ZoneRegistry::resolve_zone`] turns a zone name (or an alias of one) into
a [`ZoneIndex`].
* [`ZoneRegistry::offset_at`] returns the UTC offset, DST status and
abbreviation in effect in a zone at a particular instant.
* [`ZoneRegistry::list_zones`] enumerates the canonical zones, in table
order.

Offsets come from each zone's table of transitions. Past the end of that
table, a zone may carry a continuation [`Rule`], which describes a recurring
pair of daylight saving time transitions. Offsets for instants governed by a
rule are computed on demand.

# Example

```
use tzcompact::tz::{Tables, TypeDescriptor, ZoneRecord, ZoneRegistry};

let tables = Tables {
    zones: vec![ZoneRecord {
        index: 0,
        trans: vec![-1830383032],
        type_offsets: vec![
            TypeDescriptor::new(-968, false, 0).pack(),
            TypeDescriptor::new(0, false, 1).pack(),
        ],
        type_map: vec![1],
        ..ZoneRecord::default()
    }],
    names: vec!["Africa/Abidjan".to_string()],
    regions: vec!["CI".to_string()],
    abbreviations: vec!["LMT".to_string(), "GMT".to_string()],
    ..Tables::default()
};
let registry = ZoneRegistry::new(tables)?;

let info = registry.offset_at("Africa/Abidjan", -1830383033)?;
assert_eq!(info.offset(), -968);
assert_eq!(info.abbreviation(), "LMT");

let info = registry.offset_at("Africa/Abidjan", -1830383032)?;
assert_eq!(info.offset(), 0);
assert_eq!(info.abbreviation(), "GMT");
assert!(info.dst().is_std());

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    registry::{
        ContinuationRule, Zone, ZoneId, ZoneIter, ZoneRegistry,
        ZoneRegistryBuilder,
    },
    rule::{DstInfo, Rule},
    table::{
        split_halves, AliasRecord, RuleRecord, Tables, TypeDescriptor,
        ZoneRecord,
    },
};

mod alias;
mod registry;
mod rule;
mod table;
#[cfg(test)]
pub(crate) mod testdata;
mod transitions;
mod types;

/// The identity of a zone: its slot in the name and region catalogs.
///
/// Values of this type are produced by a [`ZoneRegistry`], but they can
/// also be created from a raw slot with [`ZoneIndex::new`]. If that slot
/// holds an alias, queries follow the alias to its canonical zone.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ZoneIndex(u32);

impl ZoneIndex {
    /// Creates a zone index from a raw slot.
    pub const fn new(slot: u32) -> ZoneIndex {
        ZoneIndex(slot)
    }

    /// Returns the raw slot of this index.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ZoneIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Whether daylight saving time (DST) is in effect.
///
/// Every offset type in a zone carries this flag. Converting from a `bool`
/// maps `true` to `Dst::Yes`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Dst {
    /// DST is not in effect. In other words, standard time is in effect.
    No,
    /// DST is in effect.
    Yes,
}

impl Dst {
    /// Returns true when this value is equal to `Dst::Yes`.
    pub fn is_dst(self) -> bool {
        matches!(self, Dst::Yes)
    }

    /// Returns true when this value is equal to `Dst::No`.
    ///
    /// `std` in this context refers to "standard time." That is, it is the
    /// offset from UTC used when DST is not in effect.
    pub fn is_std(self) -> bool {
        matches!(self, Dst::No)
    }
}

impl From<bool> for Dst {
    fn from(is_dst: bool) -> Dst {
        if is_dst {
            Dst::Yes
        } else {
            Dst::No
        }
    }
}

/// The offset, DST status and abbreviation in effect in a zone.
///
/// This is what [`ZoneRegistry::offset_at`] and [`Zone::offset_at`] return.
/// The abbreviation borrows from the registry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OffsetInfo<'a> {
    offset: i32,
    dst: Dst,
    abbreviation: &'a str,
}

impl<'a> OffsetInfo<'a> {
    pub(crate) fn from_descriptor(
        desc: TypeDescriptor,
        abbreviations: &'a [alloc::boxed::Box<str>],
    ) -> OffsetInfo<'a> {
        // OK because abbreviation indices are checked when a registry is
        // built.
        let abbreviation =
            &abbreviations[usize::from(desc.abbreviation_index())];
        OffsetInfo {
            // OK because offsets are checked to be within +/- 25:59:59
            // when a registry is built.
            offset: desc.offset() as i32,
            dst: Dst::from(desc.is_dst()),
            abbreviation,
        }
    }

    /// The total UTC offset in seconds. That is, the standard offset plus
    /// any DST savings. Local time is UTC plus this offset.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Whether daylight saving time is in effect.
    pub fn dst(&self) -> Dst {
        self.dst
    }

    /// The designation in effect, e.g., `EST` or `AEDT`.
    pub fn abbreviation(&self) -> &'a str {
        self.abbreviation
    }
}

/// A change in a zone's offset, DST status or abbreviation.
///
/// This is returned by [`Zone::next_transition`] and
/// [`Zone::previous_transition`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition<'a> {
    instant: i64,
    info: OffsetInfo<'a>,
}

impl<'a> Transition<'a> {
    /// The instant, in seconds since the Unix epoch, at which the change
    /// takes effect.
    pub fn instant(&self) -> i64 {
        self.instant
    }

    /// What is in effect starting at [`Transition::instant`].
    pub fn info(&self) -> OffsetInfo<'a> {
        self.info
    }
}
