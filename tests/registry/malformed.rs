use tzcompact::{
    tz::{split_halves, RuleRecord, Tables, TypeDescriptor, ZoneRegistry},
    Error,
};

fn build(modify: impl FnOnce(&mut Tables)) -> Error {
    let mut tables = crate::tables();
    modify(&mut tables);
    ZoneRegistry::new(tables).unwrap_err()
}

#[test]
fn empty_tables_are_fine() {
    let r = ZoneRegistry::new(Tables::default()).unwrap();
    assert_eq!(r.list_zones().count(), 0);
    assert!(r.resolve_zone("UTC").unwrap_err().is_unknown_zone_name());
}

#[test]
fn transitions() {
    let err = build(|t| t.zones[0].trans.swap(0, 1));
    assert!(err.is_malformed_table());
    assert_eq!(
        err.to_string(),
        "zone `Europe/Berlin` is invalid: transition 2 at -1693706400 \
         does not come after the previous transition at -1680483600",
    );

    // A 32-bit value stored in the far future tier.
    let err = build(|t| t.zones[1].trans_post32 = vec![split_halves(0)]);
    assert!(err.is_malformed_table());

    let err = build(|t| {
        t.zones[0].trans_post32 = vec![split_halves(300_000_000_000)];
        t.zones[0].type_map.push(1);
    });
    assert!(err.is_malformed_table());

    let err = build(|t| {
        t.zones[0].type_map.pop();
    });
    assert!(err.is_malformed_table());
}

#[test]
fn types() {
    let err = build(|t| t.zones[1].type_offsets.clear());
    assert!(err.is_malformed_table());
    assert_eq!(
        err.to_string(),
        "zone `Etc/Future` is invalid: zone has no offset types",
    );

    let err = build(|t| {
        t.zones[1].type_offsets =
            (0..257).map(|_| TypeDescriptor::new(0, false, 3).pack()).collect()
    });
    assert!(err.is_malformed_table());

    let err = build(|t| {
        t.zones[1].type_offsets[0] =
            TypeDescriptor::new(26 * 60 * 60, false, 3).pack()
    });
    assert!(err.is_malformed_table());

    let err = build(|t| t.abbreviations.truncate(4));
    assert!(err.is_malformed_table());
}

#[test]
fn catalogs_and_aliases() {
    let err = build(|t| t.names.push("Extra/Name".to_string()));
    assert!(err.is_malformed_table());

    let err = build(|t| t.zones[1].index = 0);
    assert!(err.is_malformed_table());

    let err = build(|t| t.aliases[0].target = 4);
    assert!(err.is_malformed_table());
    assert_eq!(
        err.to_string(),
        "alias `Europe/Busingen` is invalid: \
         alias target 4 is neither a zone nor an alias",
    );

    let err = build(|t| t.zones[0].aliases.push(7));
    assert!(err.is_malformed_table());

    // `Link/Busingen` leads to `Europe/Berlin`, not `Etc/Future`.
    let err = build(|t| t.zones[1].aliases.push(1));
    assert!(err.is_malformed_table());
    assert_eq!(
        err.to_string(),
        "zone `Etc/Future` is invalid: alias `Link/Busingen` \
         is listed by the zone but does not resolve to it",
    );

    // A zone may list an alias that reaches it through another alias.
    let mut tables = crate::tables();
    tables.zones[0].aliases.push(1);
    assert!(ZoneRegistry::new(tables).is_ok());
}

#[test]
fn rules() {
    let err = build(|t| t.zones[0].final_rule = Some("US".to_string()));
    assert!(err.is_malformed_table());

    // No type has the DST offset the rule produces.
    let err = build(|t| t.rules[0].values[10] = 1800);
    assert!(err.is_malformed_table());
    assert_eq!(
        err.to_string(),
        "zone `Europe/Berlin` is invalid: \
         no DST type with offset 5400 for the continuation rule",
    );

    let err = build(|t| {
        t.rules.push(RuleRecord { id: "EU".to_string(), values: crate::EU })
    });
    assert!(err.is_malformed_table());

    // An unrecognized day specification is a malformed rule, even when no
    // zone uses the rule.
    let err = build(|t| {
        let mut values = crate::EU;
        values[0] = -1;
        values[2] = 4;
        t.rules.push(RuleRecord { id: "XX".to_string(), values });
    });
    assert!(err.is_malformed_rule());
    assert!(!err.is_malformed_table());
    assert_eq!(
        err.to_string(),
        "continuation rule `XX` is invalid: unrecognized start day \
         specification (month -1, day of week 4)",
    );
}
