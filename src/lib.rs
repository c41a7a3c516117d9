/*!
A compact time zone database lookup engine.

This crate answers one question quickly: given a time zone (by name or by
index) and an instant, what UTC offset, daylight saving time status and
abbreviation are in effect? It does so over a compact, precomputed set of
tables derived from the IANA time zone database.

The tables themselves are produced by an external build step. This crate
consumes them as plain records (see [`tz::Tables`]), validates them once and
then serves every query from immutable, in-memory data.

# Overview

* [`tz::ZoneRegistry`] owns the validated tables. It resolves names and
aliases to zones, answers offset queries and enumerates the canonical zones.
* [`tz::Zone`] is a view of one zone. Besides offset queries, it can find
the transitions adjacent to an instant.
* [`tz::Rule`] is a POSIX-style continuation rule. Zones use one to compute
their offsets past the end of their tabulated transitions.
* [`Error`] is the single error type used throughout the crate.

Instants are always given as seconds since the Unix epoch. The supported
range is `-9999-01-01T00:00:00Z` through `9999-12-31T23:59:59Z`.

# Example

```
use tzcompact::tz::{
    AliasRecord, RuleRecord, Tables, TypeDescriptor, ZoneRecord,
    ZoneRegistry,
};

let tables = Tables {
    zones: vec![ZoneRecord {
        index: 0,
        trans: vec![1173596400, 1194156000],
        type_offsets: vec![
            TypeDescriptor::new(-18000, false, 0).pack(),
            TypeDescriptor::new(-14400, true, 1).pack(),
        ],
        type_map: vec![1, 0],
        final_rule: Some("US".to_string()),
        final_raw: -18000,
        final_year: 2008,
        aliases: vec![0],
        ..ZoneRecord::default()
    }],
    rules: vec![RuleRecord {
        id: "US".to_string(),
        values: [2, 8, -1, 7200, 0, 10, 1, -1, 7200, 0, 3600],
    }],
    aliases: vec![AliasRecord { index: 1, target: 0 }],
    names: vec!["America/New_York".to_string(), "US/Eastern".to_string()],
    regions: vec!["US".to_string(), "US".to_string()],
    abbreviations: vec!["EST".to_string(), "EDT".to_string()],
};
let registry = ZoneRegistry::new(tables)?;

// 2024-07-04T16:00:00Z, computed from the continuation rule.
let info = registry.offset_at("US/Eastern", 1720108800)?;
assert_eq!(info.offset(), -4 * 60 * 60);
assert_eq!(info.abbreviation(), "EDT");
assert!(info.dst().is_dst());

for (index, name) in registry.list_zones() {
    assert_eq!((index.get(), name), (0, "America/New_York"));
}

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** (enabled by default) - When enabled, [`Error`] implements
`std::error::Error`. Nothing else in this crate needs the standard library,
but an allocator is always required.
* **logging** - When enabled, the `log` crate is used to emit messages about
what the registry is doing. For example, table sizes are logged when a
registry is built, and alias resolution that gives up is logged as a
warning.
* **serde** - When enabled, every record in [`tz::Tables`] implements
`Serialize` and `Deserialize`, which makes it possible to ship generated
tables in any format with a serde implementation.
*/

#![allow(warnings)]
#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
// This adds Cargo feature annotations to items in the rustdoc output.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::error::Error;

#[macro_use]
mod logging;

mod error;
pub mod tz;
mod util;
