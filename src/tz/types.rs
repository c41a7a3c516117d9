use alloc::{boxed::Box, vec::Vec};

use crate::{
    error::{tz::table::Error as E, Error},
    tz::{table::TypeDescriptor, OffsetInfo},
};

/// The largest magnitude of any offset accepted in a type.
const MAX_OFFSET_SECONDS: i64 = 93599;

/// The deduplicated offset types of a single zone.
///
/// Types are never shared between zones, even when two zones have
/// numerically identical ones. A zone refers to its types by a one byte
/// index, which is why there can be at most 256 of them.
#[derive(Clone, Debug)]
pub(crate) struct TypeCatalog {
    types: Box<[TypeDescriptor]>,
}

impl TypeCatalog {
    /// Decodes and checks the packed types of one zone.
    ///
    /// `abbreviations` is the number of entries in the global abbreviation
    /// catalog.
    pub(crate) fn new(
        packed: &[i64],
        abbreviations: usize,
    ) -> Result<TypeCatalog, Error> {
        if packed.is_empty() {
            return Err(Error::from(E::NoTypes));
        }
        if packed.len() > 256 {
            return Err(Error::from(E::TooManyTypes { count: packed.len() }));
        }
        let mut types = Vec::with_capacity(packed.len());
        for &p in packed.iter() {
            let desc = TypeDescriptor::unpack(p);
            if !(-MAX_OFFSET_SECONDS..=MAX_OFFSET_SECONDS)
                .contains(&desc.offset())
            {
                return Err(Error::from(E::TypeOffsetOutOfRange {
                    offset: desc.offset(),
                }));
            }
            let index = desc.abbreviation_index();
            if usize::from(index) >= abbreviations {
                return Err(Error::from(E::Abbreviation {
                    index,
                    len: abbreviations,
                }));
            }
            types.push(desc);
        }
        Ok(TypeCatalog { types: types.into_boxed_slice() })
    }

    /// The number of types in this catalog. This is always at least 1.
    pub(crate) fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns the type at the given index.
    ///
    /// Callers must only use indices checked against `len`. Every index in
    /// a validated type map is.
    pub(crate) fn get(&self, index: u8) -> TypeDescriptor {
        self.types[usize::from(index)]
    }

    /// Finds the index of a type with the given offset and DST flag.
    ///
    /// When several types match, the one referenced last in `type_map` wins,
    /// since it carries the designation in most recent use. If no
    /// transition refers to a matching type, the first matching type is
    /// used.
    pub(crate) fn find(
        &self,
        offset: i64,
        dst: bool,
        type_map: &[u8],
    ) -> Option<u8> {
        let matches = |desc: &TypeDescriptor| {
            desc.offset() == offset && desc.is_dst() == dst
        };
        type_map
            .iter()
            .rev()
            .copied()
            .find(|&i| matches(&self.get(i)))
            .or_else(|| {
                let i = self.types.iter().position(matches)?;
                u8::try_from(i).ok()
            })
    }

    /// Resolves the type at `index` into a query result.
    pub(crate) fn info<'a>(
        &self,
        index: u8,
        abbreviations: &'a [Box<str>],
    ) -> OffsetInfo<'a> {
        OffsetInfo::from_descriptor(self.get(index), abbreviations)
    }
}
