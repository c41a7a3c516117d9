use tzcompact::tz::{AliasRecord, ZoneRegistry};

use crate::Result;

#[test]
fn chains_resolve_to_canonical_zone() -> Result {
    let r = ZoneRegistry::new(crate::tables())?;
    for name in ["Europe/Berlin", "Europe/Busingen", "Link/Busingen"] {
        let zone = r.zone_by_name(name)?;
        assert_eq!(zone.name(), "Europe/Berlin");
        assert_eq!(r.resolve_zone(name)?.get(), 0);
    }
    Ok(())
}

#[test]
fn names_are_matched_without_regard_to_case() -> Result {
    let r = ZoneRegistry::new(crate::tables())?;
    assert_eq!(r.resolve_zone("europe/berlin")?.get(), 0);
    assert_eq!(r.resolve_zone("LINK/BUSINGEN")?.get(), 0);
    assert_eq!(r.resolve_zone("etc/future")?.get(), 2);

    let err = r.resolve_zone("Europe/Berlin ").unwrap_err();
    assert!(err.is_unknown_zone_name());
    // The unoccupied slot has an empty name, but it can't be looked up.
    assert!(r.resolve_zone("").unwrap_err().is_unknown_zone_name());
    Ok(())
}

#[test]
fn hop_limit_is_configurable() -> Result {
    let r = ZoneRegistry::builder()
        .alias_hop_limit(1)
        .build(crate::tables())?;
    assert_eq!(r.alias_hop_limit(), 1);
    assert_eq!(r.resolve_zone("Europe/Busingen")?.get(), 0);

    let err = r.resolve_zone("Link/Busingen").unwrap_err();
    assert!(err.is_cycle_detected());
    assert!(!err.is_unknown_zone_name());
    assert_eq!(
        err.to_string(),
        "alias `Link/Busingen` did not reach a canonical zone \
         after following 1 aliases (is there a cycle?)",
    );
    Ok(())
}

#[test]
fn cycles_are_reported_not_followed_forever() -> Result {
    let mut tables = crate::tables();
    // Slot 4 is unoccupied, so name it and make it point at itself.
    tables.names[4] = "Loop/Self".to_string();
    tables.aliases.push(AliasRecord { index: 4, target: 4 });
    let r = ZoneRegistry::new(tables)?;

    let err = r.resolve_zone("Loop/Self").unwrap_err();
    assert!(err.is_cycle_detected());
    let err = r.offset_at("Loop/Self", 0).unwrap_err();
    assert!(err.is_cycle_detected());

    // Everything else still works.
    assert_eq!(r.resolve_zone("Link/Busingen")?.get(), 0);
    Ok(())
}
