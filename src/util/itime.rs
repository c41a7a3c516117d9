/*!
This module defines the internal core time data types.

These types exist to provide a home for the handful of calendar algorithms
needed to evaluate continuation rules: converting an instant to a Gregorian
date (to find the year a rule applies to), converting a date back to days
since the Unix epoch, and finding the weekday of a date.

These routines are specifically implemented on simple primitive integer types
and implicitly assume that the inputs are valid (i.e., within the supported
range of years `-9999..=9999`).

# Naming

The types in this module are prefixed with letter `I` to make it clear that
they are internal types.
*/

/// The number of seconds in a single civil day.
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// An instant in time, as a number of seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimestamp {
    pub(crate) second: i64,
}

impl ITimestamp {
    /// The smallest supported instant: `-9999-01-01T00:00:00Z`.
    pub(crate) const MIN: ITimestamp = ITimestamp { second: -377705116800 };
    /// The largest supported instant: `9999-12-31T23:59:59Z`.
    pub(crate) const MAX: ITimestamp = ITimestamp { second: 253402300799 };

    /// Returns true when this instant is within `MIN..=MAX`.
    #[inline]
    pub(crate) const fn is_valid(&self) -> bool {
        ITimestamp::MIN.second <= self.second
            && self.second <= ITimestamp::MAX.second
    }

    /// Returns the civil date, in UTC, of this instant.
    #[inline(always)]
    pub(crate) const fn to_date(&self) -> IDate {
        let epoch_day = self.second.div_euclid(SECONDS_PER_DAY) as i32;
        IEpochDay { epoch_day }.to_date()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IEpochDay {
    pub(crate) epoch_day: i32,
}

impl IEpochDay {
    /// Converts days since the Unix epoch to a Gregorian date.
    ///
    /// This is Neri-Schneider. There's no branching or divisions.
    ///
    /// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L40C3-L40C34>
    #[inline(always)]
    #[allow(non_upper_case_globals, non_snake_case)] // to mimic source
    pub(crate) const fn to_date(&self) -> IDate {
        const s: u32 = 82;
        const K: u32 = 719468 + 146097 * s;
        const L: u32 = 400 * s;

        let N_U = self.epoch_day as u32;
        let N = N_U.wrapping_add(K);

        let N_1 = 4 * N + 3;
        let C = N_1 / 146097;
        let N_C = (N_1 % 146097) / 4;

        let N_2 = 4 * N_C + 3;
        let P_2 = 2939745 * (N_2 as u64);
        let Z = (P_2 / 4294967296) as u32;
        let N_Y = (P_2 % 4294967296) as u32 / 2939745 / 4;
        let Y = 100 * C + Z;

        let N_3 = 2141 * N_Y + 197913;
        let M = N_3 / 65536;
        let D = (N_3 % 65536) / 2141;

        let J = N_Y >= 306;
        let year = Y.wrapping_sub(L).wrapping_add(J as u32) as i16;
        let month = (if J { M - 12 } else { M }) as i8;
        let day = (D + 1) as i8;
        IDate { year, month, day }
    }

    /// Returns the weekday of this day, where `0` is Sunday and `6` is
    /// Saturday.
    #[inline]
    pub(crate) const fn weekday(&self) -> i8 {
        // 1970-01-01 was a Thursday.
        (self.epoch_day as i64 + 4).rem_euclid(7) as i8
    }

    /// Returns the instant at the start of this day, in UTC.
    #[inline]
    pub(crate) const fn to_timestamp(&self) -> ITimestamp {
        ITimestamp { second: (self.epoch_day as i64) * SECONDS_PER_DAY }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDate {
    pub(crate) year: i16,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl IDate {
    /// Converts a Gregorian date to days since the Unix epoch.
    ///
    /// This is Neri-Schneider. There's no branching or divisions.
    ///
    /// Ref: https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L83
    #[inline(always)]
    #[allow(non_upper_case_globals, non_snake_case)] // to mimic source
    pub(crate) const fn to_epoch_day(&self) -> IEpochDay {
        const s: u32 = 82;
        const K: u32 = 719468 + 146097 * s;
        const L: u32 = 400 * s;

        let year = self.year as u32;
        let month = self.month as u32;
        let day = self.day as u32;

        let J = month <= 2;
        let Y = year.wrapping_add(L).wrapping_sub(J as u32);
        let M = if J { month + 12 } else { month };
        let D = day - 1;
        let C = Y / 100;

        let y_star = 1461 * Y / 4 - C + C / 4;
        let m_star = (979 * M - 2919) / 32;
        let N = y_star + m_star + D;

        let N_U = N.wrapping_sub(K);
        let epoch_day = N_U as i32;
        IEpochDay { epoch_day }
    }

    /// Returns the weekday of this date, where `0` is Sunday.
    #[inline]
    pub(crate) const fn weekday(&self) -> i8 {
        self.to_epoch_day().weekday()
    }

    /// Returns the first day of the year given.
    #[inline]
    pub(crate) const fn first_of_year(year: i16) -> IDate {
        IDate { year, month: 1, day: 1 }
    }

    /// Returns the last day of the year given.
    #[inline]
    pub(crate) const fn last_of_year(year: i16) -> IDate {
        IDate { year, month: 12, day: 31 }
    }
}

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    // A year divisible by 25 is also divisible by 100. Such a year is only
    // a leap year when it is also divisible by 400, which (given the
    // divisibility by 25) is the same as being divisible by 16.
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Return the number of days in the given month.
#[inline]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ month >> 3)
    }
}
