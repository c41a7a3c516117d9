/*!
The flat record layout consumed by a [`ZoneRegistry`](crate::tz::ZoneRegistry).

These records are what an external build step produces from the IANA tz
database sources. They are plain data: nothing in this module checks them.
All validation happens once, when a registry is built from a [`Tables`]
value.

Every record derives `Serialize` and `Deserialize` when the `serde` crate
feature is enabled, which makes it easy to ship generated tables as JSON (or
any other format with a serde implementation).
*/

use alloc::{string::String, vec::Vec};

/// One canonical zone.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneRecord {
    /// The slot of this zone in the name and region catalogs. This is also
    /// its [`ZoneIndex`](crate::tz::ZoneIndex).
    pub index: u32,
    /// Transitions before `i32::MIN`, split into `[hi, lo]` 32-bit halves.
    pub trans_pre32: Vec<[i32; 2]>,
    /// Transitions representable in 32 bits.
    pub trans: Vec<i32>,
    /// Transitions after `i32::MAX`, split into `[hi, lo]` 32-bit halves.
    pub trans_post32: Vec<[i32; 2]>,
    /// Packed offset types. See [`TypeDescriptor`].
    pub type_offsets: Vec<i64>,
    /// One index into `type_offsets` per transition, across all three
    /// tiers in order.
    pub type_map: Vec<u8>,
    /// The identifier of the continuation rule, if any.
    pub final_rule: Option<String>,
    /// The standard offset, in seconds, that the continuation rule applies
    /// its savings on top of.
    pub final_raw: i32,
    /// The first year governed by the continuation rule.
    pub final_year: i32,
    /// Positions in [`Tables::aliases`] of the aliases for this zone.
    pub aliases: Vec<u16>,
}

impl ZoneRecord {
    /// Returns every transition of this zone as a single ascending sequence
    /// of seconds since the Unix epoch.
    ///
    /// The tiers exist only to permit narrower storage. This joins them.
    pub fn transitions(&self) -> impl Iterator<Item = i64> + '_ {
        self.tiered().map(|(_, instant)| instant)
    }

    /// Like `transitions`, but also reports the tier each instant was
    /// stored in.
    pub(crate) fn tiered(&self) -> impl Iterator<Item = (Tier, i64)> + '_ {
        let pre =
            self.trans_pre32.iter().map(|&p| (Tier::Pre, join_halves(p)));
        let mid = self.trans.iter().map(|&t| (Tier::Mid, i64::from(t)));
        let post =
            self.trans_post32.iter().map(|&p| (Tier::Post, join_halves(p)));
        pre.chain(mid).chain(post)
    }
}

/// The storage tier a transition was found in.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Tier {
    Pre,
    Mid,
    Post,
}

impl Tier {
    pub(crate) fn contains(self, instant: i64) -> bool {
        match self {
            Tier::Pre => instant < i64::from(i32::MIN),
            Tier::Mid => true,
            Tier::Post => instant > i64::from(i32::MAX),
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Tier::Pre => "pre-32-bit",
            Tier::Mid => "32-bit",
            Tier::Post => "post-32-bit",
        }
    }
}

/// A POSIX-style continuation rule.
///
/// See [`Rule`](crate::tz::Rule) for the meaning of each of the 11 values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleRecord {
    /// The unique identifier of this rule, e.g., `US` or `EU`.
    pub id: String,
    /// The encoded rule.
    pub values: [i32; 11],
}

/// An alternate name for a zone.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AliasRecord {
    /// The slot of the alias itself in the name and region catalogs.
    pub index: u32,
    /// The slot this alias points to. This may be another alias.
    pub target: u32,
}

/// Everything a [`ZoneRegistry`](crate::tz::ZoneRegistry) is built from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tables {
    pub zones: Vec<ZoneRecord>,
    pub rules: Vec<RuleRecord>,
    pub aliases: Vec<AliasRecord>,
    /// One name per slot.
    pub names: Vec<String>,
    /// One region per slot. This is usually a two letter country code, and
    /// may be empty.
    pub regions: Vec<String>,
    /// Designations referenced by packed type descriptors.
    pub abbreviations: Vec<String>,
}

/// An unpacked entry of [`ZoneRecord::type_offsets`].
///
/// Each packed `i64` is laid out as follows:
///
/// * Bit `0` is the DST flag.
/// * Bits `1..=16` are an index into [`Tables::abbreviations`].
/// * Bits `17..=63` are the total UTC offset in seconds, as a signed
///   integer.
///
/// # Example
///
/// ```
/// use tzcompact::tz::TypeDescriptor;
///
/// let edt = TypeDescriptor::new(-4 * 60 * 60, true, 2);
/// let packed = edt.pack();
/// assert_eq!(TypeDescriptor::unpack(packed), edt);
/// assert_eq!(edt.offset(), -14400);
/// assert!(edt.is_dst());
/// assert_eq!(edt.abbreviation_index(), 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TypeDescriptor {
    offset: i64,
    dst: bool,
    abbreviation: u16,
}

impl TypeDescriptor {
    const DST_BITS: u32 = 1;
    const ABBREVIATION_BITS: u32 = 16;
    const OFFSET_SHIFT: u32 = Self::DST_BITS + Self::ABBREVIATION_BITS;

    /// Creates a new descriptor from a total UTC offset in seconds, a DST
    /// flag and an index into the abbreviation catalog.
    ///
    /// Offsets whose magnitude doesn't fit into 47 bits are truncated by
    /// [`TypeDescriptor::pack`]. Registries reject any offset outside of
    /// `-93599..=93599` anyway.
    pub const fn new(offset: i64, dst: bool, abbreviation: u16) -> Self {
        TypeDescriptor { offset, dst, abbreviation }
    }

    /// Decodes a packed descriptor.
    pub const fn unpack(packed: i64) -> Self {
        let dst = packed & 1 == 1;
        let abbreviation = ((packed >> Self::DST_BITS) & 0xFFFF) as u16;
        let offset = packed >> Self::OFFSET_SHIFT;
        TypeDescriptor { offset, dst, abbreviation }
    }

    /// Encodes this descriptor.
    pub const fn pack(self) -> i64 {
        (self.offset << Self::OFFSET_SHIFT)
            | ((self.abbreviation as i64) << Self::DST_BITS)
            | (self.dst as i64)
    }

    /// The total UTC offset, in seconds, of this type.
    pub const fn offset(self) -> i64 {
        self.offset
    }

    /// Whether this type is in effect during daylight saving time.
    pub const fn is_dst(self) -> bool {
        self.dst
    }

    /// The position of this type's designation in
    /// [`Tables::abbreviations`].
    pub const fn abbreviation_index(self) -> u16 {
        self.abbreviation
    }
}

/// Joins `[hi, lo]` 32-bit halves into one instant.
pub(crate) fn join_halves([hi, lo]: [i32; 2]) -> i64 {
    (i64::from(hi) << 32) | i64::from(lo as u32)
}

/// Splits an instant into `[hi, lo]` 32-bit halves.
///
/// This is the inverse of the joining done by
/// [`ZoneRecord::transitions`], and is what a build step uses to fill
/// [`ZoneRecord::trans_pre32`] and [`ZoneRecord::trans_post32`].
pub fn split_halves(instant: i64) -> [i32; 2] {
    [(instant >> 32) as i32, instant as u32 as i32]
}
