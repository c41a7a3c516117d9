use tzcompact::tz::{Rule, RuleRecord, ZoneRegistry};

use crate::Result;

fn rule(id: &str, values: [i32; 11]) -> Rule {
    Rule::new(&RuleRecord { id: id.to_string(), values }).unwrap()
}

#[test]
fn registry_exposes_rules() -> Result {
    let r = ZoneRegistry::new(crate::tables())?;
    let eu = r.rule("EU")?;
    assert_eq!(eu.id(), "EU");
    assert_eq!(eu.savings(), 3600);

    let info = eu.evaluate(3600, 2024)?;
    assert_eq!(info.start(), 1711846800);
    assert_eq!(info.end(), 1729990800);
    assert_eq!(info.std_offset(), 3600);
    assert_eq!(info.dst_offset(), 7200);
    assert_eq!(info.ordered(), (1711846800, 1729990800));

    // Rules with a UTC time of day don't depend on the zone's offset.
    let info = eu.evaluate(0, 2024)?;
    assert_eq!((info.start(), info.end()), (1711846800, 1729990800));

    let err = r.rule("US").unwrap_err();
    assert_eq!(err.to_string(), "no continuation rule with identifier `US`");
    Ok(())
}

#[test]
fn dst_is_half_open() -> Result {
    let info = rule("EU", crate::EU).evaluate(3600, 2024)?;
    assert!(!info.in_dst(info.start() - 1));
    assert!(info.in_dst(info.start()));
    assert!(info.in_dst(info.end() - 1));
    assert!(!info.in_dst(info.end()));
    Ok(())
}

#[test]
fn southern_hemisphere_wraps_the_year() -> Result {
    // Chile: from the first Sunday on or after September 2 at 04:00 UTC to
    // the first Sunday on or after April 2 at 03:00 UTC.
    let cl = rule("CL", [8, 2, -1, 4 * 3600, 2, 3, 2, -1, 3 * 3600, 2, 3600]);
    let info = cl.evaluate(-4 * 3600, 2024)?;
    // 2024-09-08T04:00:00Z
    assert_eq!(info.start(), 1725768000);
    // 2024-04-07T03:00:00Z
    assert_eq!(info.end(), 1712458800);
    assert!(info.end() < info.start());
    assert_eq!(info.ordered(), (1712458800, 1725768000));

    // 2024-01-01T00:00:00Z
    assert!(info.in_dst(1704067200));
    assert!(info.in_dst(info.end() - 1));
    assert!(!info.in_dst(info.end()));
    assert!(!info.in_dst(info.start() - 1));
    assert!(info.in_dst(info.start()));
    Ok(())
}

#[test]
fn years_out_of_range() {
    let eu = rule("EU", crate::EU);
    assert!(eu.evaluate(3600, 9999).is_ok());
    assert!(eu.evaluate(3600, -9999).is_ok());
    let err = eu.evaluate(3600, 10000).unwrap_err();
    assert!(err.is_instant_out_of_range());
    let err = eu.evaluate(3600, i16::MIN).unwrap_err();
    assert!(err.is_instant_out_of_range());
}

#[test]
fn malformed_encodings() {
    let cases: &[[i32; 11]] = &[
        // Month out of range.
        [12, 1, 0, 0, 0, 0, 1, 0, 0, 0, 3600],
        // Day of week out of range.
        [2, 1, 8, 0, 0, 9, 1, 0, 0, 0, 3600],
        // The sixth Sunday of a month.
        [2, 6, 1, 0, 0, 9, 1, 1, 0, 0, 3600],
        // April 31.
        [0, 1, 0, 0, 0, 3, 31, 0, 0, 0, 3600],
        // Julian day 366.
        [-1, 366, 0, 0, 0, 9, 1, 0, 0, 0, 3600],
        // Unknown time mode.
        [2, 1, 0, 0, 3, 9, 1, 0, 0, 0, 3600],
        // Time of day more than a week away.
        [2, 1, 0, 604800, 0, 9, 1, 0, 0, 0, 3600],
        // Savings of a whole day.
        [2, 1, 0, 0, 0, 9, 1, 0, 0, 0, 86400],
    ];
    for &values in cases {
        let record = RuleRecord { id: "BAD".to_string(), values };
        let err = Rule::new(&record).unwrap_err();
        assert!(err.is_malformed_rule(), "{values:?}: {err}");
        assert!(err.to_string().starts_with("continuation rule `BAD`"));
    }
}
