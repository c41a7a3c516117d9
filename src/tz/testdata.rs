/*!
Hand-assembled tables used by unit tests.

These are excerpts of real zones, cut down so that every instant in them can
be checked against `zdump` by hand. The transitions that were kept are real,
but most of each zone's history is missing.

Slots:

Slot | Name                 | Kind
-----|----------------------|-----
0    | `America/New_York`   | zone, continuation rule `US` from 2008
1    | `Asia/Calcutta`      | alias of 2
2    | `Asia/Kolkata`       | zone, no rule
3    | `Australia/ACT`      | alias of 5
4    | `Australia/Canberra` | alias of 3
5    | `Australia/Sydney`   | zone, continuation rule `AN` from 2009
6    | `US/Eastern`         | alias of 0
7    | `UTC`                | zone, no transitions
*/

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::tz::table::{
    split_halves, AliasRecord, RuleRecord, Tables, TypeDescriptor,
    ZoneRecord,
};

const LMT: u16 = 0;
const EST: u16 = 1;
const EDT: u16 = 2;
const AEST: u16 = 3;
const AEDT: u16 = 4;
const HMT: u16 = 5;
const MMT: u16 = 6;
const IST: u16 = 7;
const PLUS0630: u16 = 8;
const UTC: u16 = 9;

pub(crate) const US: [i32; 11] =
    [2, 8, -1, 7200, 0, 10, 1, -1, 7200, 0, 3600];
pub(crate) const AN: [i32; 11] =
    [9, 1, -1, 7200, 1, 3, 1, -1, 7200, 1, 3600];

fn types(list: &[(i64, bool, u16)]) -> Vec<i64> {
    list.iter()
        .map(|&(offset, dst, abbr)| TypeDescriptor::new(offset, dst, abbr))
        .map(TypeDescriptor::pack)
        .collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn new_york() -> ZoneRecord {
    ZoneRecord {
        index: 0,
        trans_pre32: vec![split_halves(-2717650800)],
        trans: vec![
            -1633280400,
            -1615140000,
            -1601830800,
            -1583690400,
            1143961200,
            1162101600,
            1173596400,
            1194156000,
        ],
        trans_post32: vec![],
        type_offsets: types(&[
            (-17762, false, LMT),
            (-18000, false, EST),
            (-14400, true, EDT),
        ]),
        type_map: vec![1, 2, 1, 2, 1, 2, 1, 2, 1],
        final_rule: Some("US".to_string()),
        final_raw: -18000,
        final_year: 2008,
        aliases: vec![3],
    }
}

pub(crate) fn kolkata() -> ZoneRecord {
    ZoneRecord {
        index: 2,
        trans_pre32: vec![
            split_halves(-3645237208),
            split_halves(-3155694800),
        ],
        trans: vec![
            -2019705670,
            -891581400,
            -872058600,
            -862637400,
            -764145000,
        ],
        trans_post32: vec![],
        type_offsets: types(&[
            (21208, false, LMT),
            (21200, false, HMT),
            (19270, false, MMT),
            (19800, false, IST),
            (23400, true, PLUS0630),
        ]),
        type_map: vec![1, 2, 3, 4, 3, 4, 3],
        final_rule: None,
        final_raw: 0,
        final_year: 0,
        aliases: vec![0],
    }
}

pub(crate) fn sydney() -> ZoneRecord {
    ZoneRecord {
        index: 5,
        trans_pre32: vec![split_halves(-2364113092)],
        trans: vec![
            -1672560000,
            -1665388800,
            1193500800,
            1207411200,
            1223136000,
        ],
        trans_post32: vec![],
        type_offsets: types(&[
            (36292, false, LMT),
            (36000, false, AEST),
            (39600, true, AEDT),
        ]),
        type_map: vec![1, 2, 1, 2, 1, 2],
        final_rule: Some("AN".to_string()),
        final_raw: 36000,
        final_year: 2009,
        aliases: vec![1, 2],
    }
}

pub(crate) fn utc() -> ZoneRecord {
    ZoneRecord {
        index: 7,
        type_offsets: types(&[(0, false, UTC)]),
        ..ZoneRecord::default()
    }
}

/// Returns the full set of test tables.
pub(crate) fn tables() -> Tables {
    Tables {
        zones: vec![new_york(), kolkata(), sydney(), utc()],
        rules: vec![
            RuleRecord { id: "AN".to_string(), values: AN },
            RuleRecord { id: "US".to_string(), values: US },
        ],
        aliases: vec![
            AliasRecord { index: 1, target: 2 },
            AliasRecord { index: 3, target: 5 },
            AliasRecord { index: 4, target: 3 },
            AliasRecord { index: 6, target: 0 },
        ],
        names: strings(&[
            "America/New_York",
            "Asia/Calcutta",
            "Asia/Kolkata",
            "Australia/ACT",
            "Australia/Canberra",
            "Australia/Sydney",
            "US/Eastern",
            "UTC",
        ]),
        regions: strings(&["US", "IN", "IN", "AU", "AU", "AU", "US", ""]),
        abbreviations: strings(&[
            "LMT", "EST", "EDT", "AEST", "AEDT", "HMT", "MMT", "IST",
            "+0630", "UTC",
        ]),
    }
}
