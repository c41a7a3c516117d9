use alloc::boxed::Box;

use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Abbreviation { index: u16, len: usize },
    Alias { name: Box<str> },
    AliasTargetEmpty { target: u32 },
    CatalogLengthMismatch { names: usize, regions: usize },
    DuplicateName { name: Box<str> },
    DuplicateRule { id: Box<str> },
    DuplicateSlot { slot: u32 },
    NoTypes,
    Rule { id: Box<str> },
    RuleMissingType { dst: bool, offset: i64 },
    SlotOutOfRange { slot: u32, len: usize },
    TierMisplaced { tier: &'static str, instant: i64 },
    TooManyTypes { count: usize },
    TransitionOutOfRange { instant: i64 },
    TransitionsNotIncreasing { position: usize, previous: i64, next: i64 },
    TypeMapLength { type_map: usize, transitions: usize },
    TypeMapOutOfRange { position: usize, index: u8, len: usize },
    TypeOffsetOutOfRange { offset: i64 },
    UnknownRule { id: Box<str> },
    Zone { name: Box<str> },
    ZoneAliasOutOfRange { alias: u16, len: usize },
    ZoneAliasTarget { alias: Box<str> },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzTable(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            Abbreviation { index, len } => write!(
                f,
                "abbreviation index {index} is out of bounds for \
                 a catalog of {len} abbreviations",
            ),
            Alias { ref name } => write!(f, "alias `{name}` is invalid"),
            AliasTargetEmpty { target } => write!(
                f,
                "alias target {target} is neither a zone nor an alias",
            ),
            CatalogLengthMismatch { names, regions } => write!(
                f,
                "name catalog has {names} entries but region catalog \
                 has {regions} entries",
            ),
            DuplicateName { ref name } => {
                write!(f, "name `{name}` appears in more than one slot")
            }
            DuplicateRule { ref id } => {
                write!(f, "continuation rule `{id}` is defined more than once")
            }
            DuplicateSlot { slot } => write!(
                f,
                "slot {slot} is claimed by more than one zone or alias",
            ),
            NoTypes => f.write_str("zone has no offset types"),
            Rule { ref id } => {
                write!(f, "continuation rule `{id}` is invalid")
            }
            RuleMissingType { dst: false, offset } => write!(
                f,
                "no standard time type with offset {offset} \
                 for the continuation rule",
            ),
            RuleMissingType { dst: true, offset } => write!(
                f,
                "no DST type with offset {offset} \
                 for the continuation rule",
            ),
            SlotOutOfRange { slot, len } => write!(
                f,
                "slot {slot} is out of bounds for a name catalog \
                 of {len} entries",
            ),
            TierMisplaced { tier, instant } => write!(
                f,
                "transition at {instant} does not belong in the {tier} tier",
            ),
            TooManyTypes { count } => write!(
                f,
                "zone has {count} offset types, but at most 256 are allowed",
            ),
            TransitionOutOfRange { instant } => write!(
                f,
                "transition at {instant} is outside the supported range",
            ),
            TransitionsNotIncreasing { position, previous, next } => write!(
                f,
                "transition {position} at {next} does not come after \
                 the previous transition at {previous}",
            ),
            TypeMapLength { type_map, transitions } => write!(
                f,
                "type map has {type_map} entries, but there are \
                 {transitions} transitions",
            ),
            TypeMapOutOfRange { position, index, len } => write!(
                f,
                "type map entry {position} refers to type {index}, but \
                 the zone only has {len} types",
            ),
            TypeOffsetOutOfRange { offset } => write!(
                f,
                "offset of {offset} seconds is not in the range \
                 -93599..=93599",
            ),
            UnknownRule { ref id } => {
                write!(f, "no continuation rule with identifier `{id}`")
            }
            Zone { ref name } => write!(f, "zone `{name}` is invalid"),
            ZoneAliasOutOfRange { alias, len } => write!(
                f,
                "alias list entry {alias} is out of bounds for an alias \
                 table of {len} entries",
            ),
            ZoneAliasTarget { ref alias } => write!(
                f,
                "alias `{alias}` is listed by the zone but does not \
                 resolve to it",
            ),
        }
    }
}
