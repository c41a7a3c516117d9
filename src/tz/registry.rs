use alloc::{boxed::Box, string::String, vec::Vec};
use core::cmp::Ordering;

use crate::{
    error::{
        timestamp::Error as TimestampError,
        tz::{db::Error as DbError, table::Error as TableError},
        Error, ErrorContext,
    },
    tz::{
        alias::{AliasResolver, Slot, DEFAULT_HOP_LIMIT},
        rule::Rule,
        table::{AliasRecord, Tables, ZoneRecord},
        transitions::TransitionIndex,
        types::TypeCatalog,
        OffsetInfo, Transition, ZoneIndex,
    },
    util::itime::{IDate, ITimestamp},
};

/// An immutable, validated set of time zone tables.
///
/// A registry is built once from [`Tables`] and then answers queries. Every
/// query is a read of immutable data, so a registry can be shared freely
/// between threads (for example, in a `static` initialized once, or behind
/// an `Arc`).
///
/// Building a registry checks every structural invariant the queries rely
/// on. This means that, other than asking for a zone that doesn't exist or
/// an instant outside the supported range, queries cannot fail.
///
/// # Example
///
/// This shows how to resolve an alias and look up an offset with a
/// registry built from a single zone:
///
/// ```
/// use tzcompact::tz::{
///     AliasRecord, Tables, TypeDescriptor, ZoneRecord, ZoneRegistry,
/// };
///
/// let tables = Tables {
///     zones: vec![ZoneRecord {
///         index: 0,
///         trans: vec![-2019705670],
///         type_offsets: vec![
///             TypeDescriptor::new(21200, false, 0).pack(),
///             TypeDescriptor::new(19800, false, 1).pack(),
///         ],
///         type_map: vec![1],
///         aliases: vec![0],
///         ..ZoneRecord::default()
///     }],
///     aliases: vec![AliasRecord { index: 1, target: 0 }],
///     names: vec!["Asia/Kolkata".to_string(), "Asia/Calcutta".to_string()],
///     regions: vec!["IN".to_string(), "IN".to_string()],
///     abbreviations: vec!["HMT".to_string(), "IST".to_string()],
///     ..Tables::default()
/// };
/// let registry = ZoneRegistry::new(tables)?;
///
/// let index = registry.resolve_zone("Asia/Calcutta")?;
/// assert_eq!(registry.zone_by_index(index)?.name(), "Asia/Kolkata");
///
/// // 2024-06-01T00:00:00Z
/// let info = registry.offset_at(index, 1717200000)?;
/// assert_eq!(info.offset(), 19800);
/// assert_eq!(info.abbreviation(), "IST");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ZoneRegistry {
    zones: Box<[ZoneData]>,
    /// Sorted by identifier.
    rules: Box<[Rule]>,
    aliases: Box<[AliasRecord]>,
    names: Box<[Box<str>]>,
    regions: Box<[Box<str>]>,
    abbreviations: Box<[Box<str>]>,
    resolver: AliasResolver,
    /// Occupied slots, sorted by name.
    by_name: Box<[u32]>,
    /// Occupied slots, sorted by name without regard to ASCII case.
    by_folded: Box<[u32]>,
}

impl ZoneRegistry {
    /// Builds a registry from the given tables with the default
    /// configuration.
    ///
    /// Use [`ZoneRegistryBuilder`] to change the configuration.
    ///
    /// # Errors
    ///
    /// This returns an error when the tables are malformed. Every such error
    /// reports `true` from either [`Error::is_malformed_table`] or, when a
    /// continuation rule can't be decoded, [`Error::is_malformed_rule`].
    pub fn new(tables: Tables) -> Result<ZoneRegistry, Error> {
        ZoneRegistryBuilder::new().build(tables)
    }

    /// Returns a builder for configuring a registry.
    pub fn builder() -> ZoneRegistryBuilder {
        ZoneRegistryBuilder::new()
    }

    fn from_tables(
        tables: Tables,
        hop_limit: usize,
    ) -> Result<ZoneRegistry, Error> {
        let Tables { zones, rules, aliases, names, regions, abbreviations } =
            tables;
        if names.len() != regions.len() {
            return Err(Error::from(TableError::CatalogLengthMismatch {
                names: names.len(),
                regions: regions.len(),
            }));
        }
        let names = boxed_strings(names);
        let regions = boxed_strings(regions);
        let abbreviations = boxed_strings(abbreviations);

        let mut rules =
            rules.iter().map(Rule::new).collect::<Result<Vec<Rule>, _>>()?;
        rules.sort_by(|r1, r2| r1.id().cmp(r2.id()));
        if let Some(pair) = rules.windows(2).find(|p| p[0].id() == p[1].id())
        {
            return Err(Error::from(TableError::DuplicateRule {
                id: pair[0].id().into(),
            }));
        }

        let resolver =
            AliasResolver::new(&names, &zones, &aliases, hop_limit)?;
        let mut data = Vec::with_capacity(zones.len());
        for (position, record) in zones.iter().enumerate() {
            let zone = ZoneData::new(
                record,
                position,
                &rules,
                &aliases,
                &resolver,
                &names,
                abbreviations.len(),
            )
            .with_context(|| TableError::Zone {
                // OK because every zone slot was checked by the resolver.
                name: names[record.index as usize].clone(),
            })?;
            data.push(zone);
        }

        let occupied: Vec<u32> = (0..names.len())
            .filter_map(|i| u32::try_from(i).ok())
            .filter(|&slot| resolver.slot(slot) != Some(Slot::Empty))
            .collect();
        let mut by_name = occupied.clone();
        by_name.sort_by(|&s1, &s2| {
            names[s1 as usize].cmp(&names[s2 as usize])
        });
        if let Some(pair) = by_name
            .windows(2)
            .find(|p| names[p[0] as usize] == names[p[1] as usize])
        {
            return Err(Error::from(TableError::DuplicateName {
                name: names[pair[0] as usize].clone(),
            }));
        }
        // This is a stable sort, so when two names differ only by case,
        // the one in the lower slot is found first.
        let mut by_folded = occupied;
        by_folded.sort_by(|&s1, &s2| {
            cmp_ignore_ascii_case(&names[s1 as usize], &names[s2 as usize])
        });

        debug!(
            "built zone registry with {} zones, {} aliases, {} rules \
             and {} abbreviations",
            data.len(),
            aliases.len(),
            rules.len(),
            abbreviations.len(),
        );
        Ok(ZoneRegistry {
            zones: data.into_boxed_slice(),
            rules: rules.into_boxed_slice(),
            aliases: aliases.into_boxed_slice(),
            names,
            regions,
            abbreviations,
            resolver,
            by_name: by_name.into_boxed_slice(),
            by_folded: by_folded.into_boxed_slice(),
        })
    }

    /// Resolves a zone name to the index of its canonical zone.
    ///
    /// The name may be a canonical zone name or an alias. Aliases are
    /// followed until a canonical zone is reached. An exact match is
    /// preferred, but if there isn't one, names are compared without regard
    /// to ASCII case.
    ///
    /// # Errors
    ///
    /// This returns an error when no zone or alias has the given name, or
    /// when following an alias exceeds the configured hop limit.
    ///
    /// # Example
    ///
    /// ```
    /// use tzcompact::tz::{Tables, TypeDescriptor, ZoneRecord, ZoneRegistry};
    ///
    /// let tables = Tables {
    ///     zones: vec![ZoneRecord {
    ///         index: 0,
    ///         type_offsets: vec![TypeDescriptor::new(0, false, 0).pack()],
    ///         ..ZoneRecord::default()
    ///     }],
    ///     names: vec!["Etc/UTC".to_string()],
    ///     regions: vec!["".to_string()],
    ///     abbreviations: vec!["UTC".to_string()],
    ///     ..Tables::default()
    /// };
    /// let registry = ZoneRegistry::new(tables)?;
    /// assert_eq!(registry.resolve_zone("etc/utc")?.get(), 0);
    /// assert!(registry.resolve_zone("Etc/Zulu").unwrap_err()
    ///     .is_unknown_zone_name());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn resolve_zone(&self, name: &str) -> Result<ZoneIndex, Error> {
        self.zone_by_name(name).map(|zone| zone.index())
    }

    /// Looks up a zone by name.
    ///
    /// This is like [`ZoneRegistry::resolve_zone`], but returns a view of
    /// the zone itself.
    pub fn zone_by_name(&self, name: &str) -> Result<Zone<'_>, Error> {
        let Some(slot) = self.find_slot(name) else {
            return Err(Error::from(DbError::UnknownZoneName {
                name: name.into(),
            }));
        };
        let position = self.resolver.resolve(slot, &self.names)?;
        Ok(self.zone_at(position))
    }

    /// Looks up a zone by its index.
    ///
    /// When the index refers to the slot of an alias, the alias is followed
    /// to its canonical zone.
    ///
    /// # Errors
    ///
    /// This returns an error when the slot is out of bounds or holds
    /// neither a zone nor an alias.
    pub fn zone_by_index(&self, index: ZoneIndex) -> Result<Zone<'_>, Error> {
        let position = self.resolver.resolve(index.get(), &self.names)?;
        Ok(self.zone_at(position))
    }

    /// Returns the offset, DST status and abbreviation in effect in a zone
    /// at the given instant.
    ///
    /// The zone may be given either by name (`&str`) or by [`ZoneIndex`].
    /// The instant is in seconds since the Unix epoch. A transition at an
    /// instant `T` is in effect starting at `T`.
    ///
    /// # Errors
    ///
    /// This returns an error when the zone can't be found, or when the
    /// instant is outside of the range `-377705116800..=253402300799`.
    pub fn offset_at<'n>(
        &self,
        zone: impl Into<ZoneId<'n>>,
        instant: i64,
    ) -> Result<OffsetInfo<'_>, Error> {
        let zone = match zone.into() {
            ZoneId::Name(name) => self.zone_by_name(name)?,
            ZoneId::Index(index) => self.zone_by_index(index)?,
        };
        zone.offset_at(instant)
    }

    /// Returns an iterator over every canonical zone, in table order.
    ///
    /// Aliases are not included. The iterator is lazy, and since it borrows
    /// the registry, it can be cloned or recreated to start over.
    pub fn list_zones(&self) -> ZoneIter<'_> {
        ZoneIter { registry: self, it: self.zones.iter() }
    }

    /// Returns the continuation rule with the given identifier.
    pub fn rule(&self, id: &str) -> Result<&Rule, Error> {
        match self.rules.binary_search_by(|rule| rule.id().cmp(id)) {
            Ok(i) => Ok(&self.rules[i]),
            Err(_) => Err(Error::from(DbError::UnknownRule { id: id.into() })),
        }
    }

    /// Returns the name catalog, in slot order.
    ///
    /// This includes canonical zones, aliases and any unoccupied slots.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(|name| &**name)
    }

    /// Returns the region catalog, in slot order.
    ///
    /// Regions are usually ISO 3166 country codes. A region may be empty.
    pub fn regions(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.regions.iter().map(|region| &**region)
    }

    /// Returns the maximum number of aliases followed when resolving a name.
    pub fn alias_hop_limit(&self) -> usize {
        self.resolver.hop_limit()
    }

    fn zone_at(&self, position: usize) -> Zone<'_> {
        Zone { registry: self, data: &self.zones[position] }
    }

    fn find_slot(&self, name: &str) -> Option<u32> {
        let names = &self.names;
        if let Ok(i) = self
            .by_name
            .binary_search_by(|&slot| (*names[slot as usize]).cmp(name))
        {
            return Some(self.by_name[i]);
        }
        let i = self.by_folded.partition_point(|&slot| {
            cmp_ignore_ascii_case(&names[slot as usize], name)
                == Ordering::Less
        });
        let slot = *self.by_folded.get(i)?;
        if names[slot as usize].eq_ignore_ascii_case(name) {
            Some(slot)
        } else {
            None
        }
    }
}

/// A builder for configuring a [`ZoneRegistry`].
///
/// # Example
///
/// ```
/// use tzcompact::tz::{Tables, ZoneRegistry};
///
/// let registry = ZoneRegistry::builder()
///     .alias_hop_limit(4)
///     .build(Tables::default())?;
/// assert_eq!(registry.alias_hop_limit(), 4);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ZoneRegistryBuilder {
    hop_limit: usize,
}

impl ZoneRegistryBuilder {
    /// Creates a builder with the default configuration.
    pub const fn new() -> ZoneRegistryBuilder {
        ZoneRegistryBuilder { hop_limit: DEFAULT_HOP_LIMIT }
    }

    /// Sets the maximum number of aliases followed when resolving a name.
    ///
    /// Resolving an alias that needs more hops than this fails with an
    /// error for which [`Error::is_cycle_detected`] returns `true`. Setting
    /// this to `0` disables aliases entirely.
    ///
    /// The default is `16`. Real alias chains are at most two hops long.
    pub const fn alias_hop_limit(self, limit: usize) -> ZoneRegistryBuilder {
        ZoneRegistryBuilder { hop_limit: limit }
    }

    /// Validates the given tables and builds a registry from them.
    ///
    /// See [`ZoneRegistry::new`] for the errors this may return.
    pub fn build(&self, tables: Tables) -> Result<ZoneRegistry, Error> {
        ZoneRegistry::from_tables(tables, self.hop_limit)
    }
}

impl Default for ZoneRegistryBuilder {
    fn default() -> ZoneRegistryBuilder {
        ZoneRegistryBuilder::new()
    }
}

/// A reference to a zone, by name or by index.
///
/// This is what [`ZoneRegistry::offset_at`] accepts. It is usually created
/// implicitly from a `&str` or a [`ZoneIndex`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZoneId<'n> {
    /// A canonical zone name or an alias.
    Name(&'n str),
    /// A slot in the name catalog.
    Index(ZoneIndex),
}

impl<'n> From<&'n str> for ZoneId<'n> {
    fn from(name: &'n str) -> ZoneId<'n> {
        ZoneId::Name(name)
    }
}

impl<'n> From<&'n String> for ZoneId<'n> {
    fn from(name: &'n String) -> ZoneId<'n> {
        ZoneId::Name(name.as_str())
    }
}

impl From<ZoneIndex> for ZoneId<'static> {
    fn from(index: ZoneIndex) -> ZoneId<'static> {
        ZoneId::Index(index)
    }
}

/// A view of a single canonical zone in a [`ZoneRegistry`].
#[derive(Clone, Copy)]
pub struct Zone<'a> {
    registry: &'a ZoneRegistry,
    data: &'a ZoneData,
}

impl<'a> Zone<'a> {
    /// Returns the index of this zone.
    pub fn index(&self) -> ZoneIndex {
        ZoneIndex::new(self.data.slot)
    }

    /// Returns the canonical name of this zone, e.g., `America/New_York`.
    pub fn name(&self) -> &'a str {
        &self.registry.names[self.data.slot as usize]
    }

    /// Returns the region of this zone. This may be empty.
    pub fn region(&self) -> &'a str {
        &self.registry.regions[self.data.slot as usize]
    }

    /// Returns the names of the aliases recorded for this zone.
    pub fn aliases(&self) -> impl Iterator<Item = &'a str> + 'a {
        let registry = self.registry;
        self.data.aliases.iter().map(move |&i| {
            let alias = &registry.aliases[usize::from(i)];
            &*registry.names[alias.index as usize]
        })
    }

    /// Returns the number of transitions in this zone's table.
    ///
    /// This doesn't count transitions produced by a continuation rule.
    pub fn transition_count(&self) -> usize {
        self.data.transitions.len()
    }

    /// Returns the continuation rule of this zone, if it has one.
    pub fn final_rule(&self) -> Option<ContinuationRule<'a>> {
        let fr = self.data.final_rule.as_ref()?;
        Some(ContinuationRule {
            rule: &self.registry.rules[fr.rule],
            raw: fr.raw,
            first_year: fr.year,
        })
    }

    /// Returns the offset, DST status and abbreviation in effect in this
    /// zone at the given instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant is outside of the range
    /// `-377705116800..=253402300799`.
    ///
    /// # Example
    ///
    /// ```
    /// use tzcompact::tz::{
    ///     RuleRecord, Tables, TypeDescriptor, ZoneRecord, ZoneRegistry,
    /// };
    ///
    /// // A zone whose offsets all come from its continuation rule.
    /// let tables = Tables {
    ///     zones: vec![ZoneRecord {
    ///         index: 0,
    ///         type_offsets: vec![
    ///             TypeDescriptor::new(-18000, false, 0).pack(),
    ///             TypeDescriptor::new(-14400, true, 1).pack(),
    ///         ],
    ///         final_rule: Some("US".to_string()),
    ///         final_raw: -18000,
    ///         final_year: 2007,
    ///         ..ZoneRecord::default()
    ///     }],
    ///     rules: vec![RuleRecord {
    ///         id: "US".to_string(),
    ///         values: [2, 8, -1, 7200, 0, 10, 1, -1, 7200, 0, 3600],
    ///     }],
    ///     names: vec!["EST5EDT".to_string()],
    ///     regions: vec!["".to_string()],
    ///     abbreviations: vec!["EST".to_string(), "EDT".to_string()],
    ///     ..Tables::default()
    /// };
    /// let registry = ZoneRegistry::new(tables)?;
    /// let zone = registry.zone_by_name("EST5EDT")?;
    ///
    /// // 2024-03-10T07:00:00Z
    /// let info = zone.offset_at(1710054000)?;
    /// assert_eq!((info.offset(), info.abbreviation()), (-14400, "EDT"));
    /// let info = zone.offset_at(1710054000 - 1)?;
    /// assert_eq!((info.offset(), info.abbreviation()), (-18000, "EST"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn offset_at(&self, instant: i64) -> Result<OffsetInfo<'a>, Error> {
        check_instant(instant)?;
        Ok(self.lookup(instant))
    }

    /// Returns the first transition strictly after the given instant.
    ///
    /// Past the end of this zone's table, transitions are computed from the
    /// continuation rule. `None` is returned when there are no more
    /// transitions.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant is outside of the supported
    /// range.
    pub fn next_transition(
        &self,
        instant: i64,
    ) -> Result<Option<Transition<'a>>, Error> {
        check_instant(instant)?;
        let transitions = &self.data.transitions;
        let next = match transitions.after(instant) {
            Some(position) => Some(transitions.instant(position)),
            None => self.next_from_rule(instant),
        };
        Ok(next.map(|instant| self.transition(instant)))
    }

    /// Returns the last transition strictly before the given instant.
    ///
    /// `None` is returned when the instant precedes every transition.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant is outside of the supported
    /// range.
    pub fn previous_transition(
        &self,
        instant: i64,
    ) -> Result<Option<Transition<'a>>, Error> {
        check_instant(instant)?;
        let transitions = &self.data.transitions;
        let previous = self.previous_from_rule(instant).or_else(|| {
            transitions.before(instant).map(|p| transitions.instant(p))
        });
        Ok(previous.map(|instant| self.transition(instant)))
    }

    fn transition(&self, instant: i64) -> Transition<'a> {
        Transition { instant, info: self.lookup(instant) }
    }

    fn lookup(&self, instant: i64) -> OffsetInfo<'a> {
        let index = self.type_index(instant);
        self.data.types.info(index, &self.registry.abbreviations)
    }

    /// Returns the index of the type in effect at the given instant, which
    /// must be within the supported range.
    fn type_index(&self, instant: i64) -> u8 {
        let transitions = &self.data.transitions;
        let position = transitions.search(instant);
        if let Some(ref fr) = self.data.final_rule {
            let at_end = match position {
                None => transitions.len() == 0,
                Some(p) => p + 1 == transitions.len(),
            };
            let year = ITimestamp { second: instant }.to_date().year;
            if at_end && i32::from(year) >= fr.year {
                let rule = &self.registry.rules[fr.rule];
                let dst = rule.is_dst(fr.raw, instant);
                trace!(
                    "using continuation rule {} in {} for instant {instant} \
                     (year {year}, dst: {dst})",
                    rule.id(),
                    self.name(),
                );
                return if dst { fr.dst_type } else { fr.std_type };
            }
        }
        // Before the first transition, the zone's first type (typically
        // local mean time) is in effect.
        position.map_or(0, |p| transitions.type_at(p))
    }

    /// Returns true when the type in effect changes exactly at `instant`.
    fn changes_at(&self, instant: i64) -> bool {
        instant > ITimestamp::MIN.second
            && ITimestamp { second: instant }.is_valid()
            && self.type_index(instant) != self.type_index(instant - 1)
    }

    /// Returns the first transition produced by the continuation rule that
    /// comes strictly after `instant` and after every tabulated transition.
    fn next_from_rule(&self, instant: i64) -> Option<i64> {
        let fr = self.data.final_rule.as_ref()?;
        if fr.year > 9999 {
            return None;
        }
        let rule = &self.registry.rules[fr.rule];
        let floor = self.data.transitions.last().map_or(instant, |last| {
            last.max(instant)
        });
        // OK because `fr.year` is at most 9999 and clamped to at least -9999.
        let first_year = fr.year.max(-9999) as i16;
        let first_day = IDate::first_of_year(first_year).to_epoch_day();
        let from = floor.max(first_day.to_timestamp().second - 1);
        rule.around(fr.raw, from)
            .flat_map(|info| [info.start(), info.end()])
            .filter(|&candidate| {
                candidate > floor && self.changes_at(candidate)
            })
            .min()
    }

    /// Returns the last transition produced by the continuation rule that
    /// comes strictly before `instant` and after every tabulated transition.
    fn previous_from_rule(&self, instant: i64) -> Option<i64> {
        let fr = self.data.final_rule.as_ref()?;
        let rule = &self.registry.rules[fr.rule];
        let floor = self.data.transitions.last();
        rule.around(fr.raw, instant)
            .flat_map(|info| [info.start(), info.end()])
            .filter(|&candidate| {
                candidate < instant
                    && floor.map_or(true, |floor| candidate > floor)
                    && self.changes_at(candidate)
            })
            .max()
    }
}

impl<'a> core::fmt::Debug for Zone<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Zone")
            .field("index", &self.index())
            .field("name", &self.name())
            .finish()
    }
}

/// The continuation rule of a zone, along with how the zone applies it.
///
/// This is returned by [`Zone::final_rule`].
#[derive(Clone, Copy, Debug)]
pub struct ContinuationRule<'a> {
    rule: &'a Rule,
    raw: i32,
    first_year: i32,
}

impl<'a> ContinuationRule<'a> {
    /// The rule itself.
    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// The standard offset, in seconds, that the rule's savings are added
    /// to.
    pub fn raw_offset(&self) -> i32 {
        self.raw
    }

    /// The first year (in UTC) in which the rule, rather than the zone's
    /// table, determines the offset.
    pub fn first_year(&self) -> i32 {
        self.first_year
    }
}

/// An iterator over the canonical zones in a [`ZoneRegistry`].
///
/// This yields the index and canonical name of each zone, in table order.
///
/// This is created by [`ZoneRegistry::list_zones`].
#[derive(Clone)]
pub struct ZoneIter<'a> {
    registry: &'a ZoneRegistry,
    it: core::slice::Iter<'a, ZoneData>,
}

impl<'a> Iterator for ZoneIter<'a> {
    type Item = (ZoneIndex, &'a str);

    fn next(&mut self) -> Option<(ZoneIndex, &'a str)> {
        let data = self.it.next()?;
        let zone = Zone { registry: self.registry, data };
        Some((zone.index(), zone.name()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a> ExactSizeIterator for ZoneIter<'a> {}

impl<'a> core::iter::FusedIterator for ZoneIter<'a> {}

impl<'a> core::fmt::Debug for ZoneIter<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ZoneIter").field("remaining", &self.it.len()).finish()
    }
}

/// A validated zone record.
#[derive(Clone, Debug)]
struct ZoneData {
    slot: u32,
    types: TypeCatalog,
    transitions: TransitionIndex,
    final_rule: Option<FinalRule>,
    /// Positions in the registry's alias table.
    aliases: Box<[u16]>,
}

/// A continuation rule as used by one zone, with the zone's types for
/// standard and daylight saving time resolved ahead of time.
#[derive(Clone, Copy, Debug)]
struct FinalRule {
    /// Position in the registry's (sorted) rules.
    rule: usize,
    raw: i32,
    year: i32,
    std_type: u8,
    dst_type: u8,
}

impl ZoneData {
    fn new(
        record: &ZoneRecord,
        position: usize,
        rules: &[Rule],
        aliases: &[AliasRecord],
        resolver: &AliasResolver,
        names: &[Box<str>],
        abbreviation_count: usize,
    ) -> Result<ZoneData, Error> {
        let types =
            TypeCatalog::new(&record.type_offsets, abbreviation_count)?;
        let transitions = TransitionIndex::new(record, &types)?;
        let final_rule = match record.final_rule {
            None => None,
            Some(ref id) => Some(FinalRule::new(
                id,
                record,
                rules,
                &types,
                &transitions,
            )?),
        };
        for &alias in record.aliases.iter() {
            let Some(entry) = aliases.get(usize::from(alias)) else {
                return Err(Error::from(TableError::ZoneAliasOutOfRange {
                    alias,
                    len: aliases.len(),
                }));
            };
            if resolver.canonical(entry.index) != Some(position) {
                return Err(Error::from(TableError::ZoneAliasTarget {
                    // OK because every alias slot was checked by the
                    // resolver.
                    alias: names[entry.index as usize].clone(),
                }));
            }
        }
        Ok(ZoneData {
            slot: record.index,
            types,
            transitions,
            final_rule,
            aliases: record.aliases.clone().into_boxed_slice(),
        })
    }
}

impl FinalRule {
    fn new(
        id: &str,
        record: &ZoneRecord,
        rules: &[Rule],
        types: &TypeCatalog,
        transitions: &TransitionIndex,
    ) -> Result<FinalRule, Error> {
        let rule = rules
            .binary_search_by(|rule| rule.id().cmp(id))
            .map_err(|_| TableError::UnknownRule { id: id.into() })?;
        let std_offset = i64::from(record.final_raw);
        let dst_offset = std_offset + i64::from(rules[rule].savings());
        let find = |offset: i64, dst: bool| {
            types.find(offset, dst, transitions.type_map()).ok_or(
                TableError::RuleMissingType { dst, offset },
            )
        };
        let std_type = find(std_offset, false)?;
        let dst_type = find(dst_offset, true)?;
        Ok(FinalRule {
            rule,
            raw: record.final_raw,
            year: record.final_year,
            std_type,
            dst_type,
        })
    }
}

fn check_instant(instant: i64) -> Result<(), Error> {
    if !(ITimestamp { second: instant }).is_valid() {
        return Err(Error::from(TimestampError::OutOfRange { given: instant }));
    }
    Ok(())
}

fn boxed_strings(strings: Vec<String>) -> Box<[Box<str>]> {
    strings.into_iter().map(String::into_boxed_str).collect()
}

/// Like std's `eq_ignore_ascii_case`, but returns a full `Ordering`.
fn cmp_ignore_ascii_case(s1: &str, s2: &str) -> Ordering {
    let it1 = s1.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    let it2 = s2.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    it1.cmp(it2)
}
