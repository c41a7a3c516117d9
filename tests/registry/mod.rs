use tzcompact::tz::{Dst, ZoneIndex, ZoneRegistry};

use crate::Result;

mod alias;
mod malformed;

fn registry() -> ZoneRegistry {
    ZoneRegistry::new(crate::tables()).unwrap()
}

#[test]
fn half_open_transitions() -> Result {
    let r = registry();
    let berlin = "Europe/Berlin";

    let info = r.offset_at(berlin, -2422054408 - 1)?;
    assert_eq!((info.offset(), info.abbreviation()), (3208, "LMT"));
    let info = r.offset_at(berlin, -2422054408)?;
    assert_eq!((info.offset(), info.abbreviation()), (3600, "CET"));

    let info = r.offset_at(berlin, -1693706400 - 1)?;
    assert_eq!(info.dst(), Dst::No);
    let info = r.offset_at(berlin, -1693706400)?;
    assert_eq!((info.offset(), info.dst()), (7200, Dst::Yes));
    assert_eq!(info.abbreviation(), "CEST");

    let info = r.offset_at(berlin, 1667091600 - 1)?;
    assert_eq!(info.abbreviation(), "CEST");
    let info = r.offset_at(berlin, 1667091600)?;
    assert_eq!(info.abbreviation(), "CET");

    Ok(())
}

#[test]
fn rule_governs_after_final_year() -> Result {
    let r = registry();
    let berlin = r.zone_by_name("Europe/Berlin")?;

    // The last tabulated type is used until the rule's first year.
    // 2022-12-31T23:59:59Z
    assert_eq!(berlin.offset_at(1672531199)?.abbreviation(), "CET");

    for (start, end) in [
        (1679792400, 1698541200),
        (1711846800, 1729990800),
        (1743296400, 1761440400),
    ] {
        assert_eq!(berlin.offset_at(start - 1)?.abbreviation(), "CET");
        assert_eq!(berlin.offset_at(start)?.abbreviation(), "CEST");
        assert_eq!(berlin.offset_at(end - 1)?.offset(), 7200);
        assert_eq!(berlin.offset_at(end)?.offset(), 3600);
    }

    let fr = berlin.final_rule().unwrap();
    assert_eq!(fr.rule().id(), "EU");
    assert_eq!(fr.raw_offset(), 3600);
    assert_eq!(fr.first_year(), 2023);

    Ok(())
}

#[test]
fn lookup_by_index_matches_lookup_by_name() -> Result {
    let r = registry();
    let index = r.resolve_zone("Europe/Berlin")?;
    assert_eq!(index, ZoneIndex::new(0));
    for t in [-4_000_000_000, 0, 1719792000, 253402300799] {
        assert_eq!(r.offset_at(index, t)?, r.offset_at("Europe/Berlin", t)?);
        assert_eq!(r.offset_at(ZoneIndex::new(3), t)?, r.offset_at(index, t)?);
    }
    Ok(())
}

#[test]
fn far_future_tier() -> Result {
    let r = registry();
    let zone = r.zone_by_name("Etc/Future")?;
    assert_eq!(zone.transition_count(), 1);
    assert_eq!(zone.offset_at(4102444799)?.abbreviation(), "NOW");
    assert_eq!(zone.offset_at(4102444800)?.abbreviation(), "LATER");
    assert_eq!(zone.offset_at(253402300799)?.offset(), 3600);

    let next = zone.next_transition(0)?.unwrap();
    assert_eq!(next.instant(), 4102444800);
    assert_eq!(next.info().offset(), 3600);
    assert!(zone.next_transition(4102444800)?.is_none());
    Ok(())
}

#[test]
fn transitions_across_the_end_of_the_table() -> Result {
    let r = registry();
    let berlin = r.zone_by_name("Europe/Berlin")?;

    let next = berlin.next_transition(1667091600)?.unwrap();
    assert_eq!(next.instant(), 1679792400);
    assert_eq!(next.info().abbreviation(), "CEST");

    let next = berlin.next_transition(1719792000)?.unwrap();
    assert_eq!(next.instant(), 1729990800);
    assert_eq!(next.info().dst(), Dst::No);

    let previous = berlin.previous_transition(1679792400)?.unwrap();
    assert_eq!(previous.instant(), 1667091600);
    assert_eq!(previous.info().abbreviation(), "CET");

    let previous = berlin.previous_transition(1719792000)?.unwrap();
    assert_eq!(previous.instant(), 1711846800);

    assert!(berlin.previous_transition(-2422054408)?.is_none());
    Ok(())
}

#[test]
fn list_zones_is_restartable() {
    let r = registry();
    let expected = vec![
        (ZoneIndex::new(0), "Europe/Berlin"),
        (ZoneIndex::new(2), "Etc/Future"),
    ];
    assert_eq!(r.list_zones().collect::<Vec<_>>(), expected);
    assert_eq!(r.list_zones().collect::<Vec<_>>(), expected);

    let mut it = r.list_zones();
    assert_eq!(it.next(), Some(expected[0]));
    let rest = it.clone();
    assert_eq!(it.collect::<Vec<_>>(), &expected[1..]);
    assert_eq!(rest.collect::<Vec<_>>(), &expected[1..]);
}

#[test]
fn zone_metadata() -> Result {
    let r = registry();
    let berlin = r.zone_by_index(ZoneIndex::new(1))?;
    assert_eq!(berlin.name(), "Europe/Berlin");
    assert_eq!(berlin.region(), "DE");
    assert_eq!(berlin.aliases().collect::<Vec<_>>(), vec!["Europe/Busingen"]);
    assert_eq!(berlin.transition_count(), 5);

    assert_eq!(r.names().count(), 5);
    assert_eq!(r.regions().filter(|region| region.is_empty()).count(), 3);

    let err = r.zone_by_index(ZoneIndex::new(4)).unwrap_err();
    assert!(err.is_unknown_zone_index());
    let err = r.zone_by_index(ZoneIndex::new(u32::MAX)).unwrap_err();
    assert!(err.is_unknown_zone_index());
    Ok(())
}

#[test]
fn out_of_range_instants() {
    let r = registry();
    // -10000-12-31T00:00:00Z is the whole day before the supported range.
    let day_before = -377705116800 - 86400;
    for t in [i64::MIN, day_before, -377705116801, 253402300800, i64::MAX] {
        let err = r.offset_at("Europe/Berlin", t).unwrap_err();
        assert!(err.is_instant_out_of_range(), "{t}: {err}");
    }
    // -9999-01-01T00:00:00Z
    assert!(r.offset_at("Europe/Berlin", -377705116800).is_ok());
    // 9999-12-31T23:59:59Z
    assert!(r.offset_at("Europe/Berlin", 253402300799).is_ok());
}

#[test]
fn shared_between_threads() {
    let r = registry();
    std::thread::scope(|s| {
        for i in 0..4i64 {
            let r = &r;
            s.spawn(move || {
                let t = 1711846800 + i * 86400 * 60;
                let info = r.offset_at("Link/Busingen", t).unwrap();
                let expected = if t < 1729990800 { "CEST" } else { "CET" };
                assert_eq!(info.abbreviation(), expected);
            });
        }
    });
}

#[cfg(feature = "serde")]
#[test]
fn tables_from_json() -> anyhow::Result<()> {
    let tables = crate::tables();
    let json = serde_json::to_string(&tables)?;
    let decoded: tzcompact::tz::Tables = serde_json::from_str(&json)?;
    assert_eq!(decoded, tables);

    let r = ZoneRegistry::new(decoded)?;
    assert_eq!(r.offset_at("Europe/Busingen", 1719792000)?.offset(), 7200);
    Ok(())
}
