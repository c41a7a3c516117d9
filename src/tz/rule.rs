use alloc::boxed::Box;

use crate::{
    error::{
        timestamp::Error as TimestampError,
        tz::rule::{Boundary, Error as E},
        Error, ErrorContext,
    },
    tz::table::RuleRecord,
    util::itime::{
        days_in_month, is_leap_year, IDate, IEpochDay, ITimestamp,
        SECONDS_PER_DAY,
    },
};

/// A POSIX-style continuation rule.
///
/// A continuation rule describes a recurring pair of daylight saving time
/// transitions. Zones use one to extrapolate their offsets past the last
/// transition in their table.
///
/// A rule is built from the 11 values of a [`RuleRecord`]:
///
/// Index | Meaning
/// ------|--------
/// 0     | start month, zero-based (`0..=11`), or `-1` for a Julian day
/// 1     | start day
/// 2     | start day of week, which also picks how `day` is read
/// 3     | start time of day in seconds (`-604799..=604799`)
/// 4     | start time mode: `0` wall clock, `1` standard time, `2` UTC
/// 5..=9 | the end, encoded the same way as the start
/// 10    | DST savings in seconds
///
/// The start and end days are read as follows, where `dow` is the day of
/// week value and `1` means Sunday:
///
/// * `dow == 0`: the given day of the month. February 29 is moved to
/// February 28 in common years.
/// * `dow` in `1..=7`: the `day`th such weekday of the month. `day` is in
/// `1..=5` or `-5..=-1`, where negative values count from the end of the
/// month. `5` and `-1` both mean "the last one."
/// * `dow` in `-7..=-1` and `day > 0`: the first weekday `-dow` on or after
/// the given day of the month.
/// * `dow` in `-7..=-1` and `day < 0`: the last weekday `-dow` on or before
/// day `-day` of the month.
/// * month `-1` and `dow == 0`: the Julian day `day` in `1..=365`. Leap days
/// are never counted, so day 60 is always March 1.
/// * month `-1` and `dow == 1`: the zero-based Julian day `day` in `0..=365`.
/// Leap days are counted.
///
/// Any other combination is rejected.
///
/// # Example
///
/// This decodes the rule used in most of the United States since 2007 and
/// evaluates it for 2024, in New York:
///
/// ```
/// use tzcompact::tz::{Rule, RuleRecord};
///
/// let record = RuleRecord {
///     id: "US".to_string(),
///     values: [2, 8, -1, 7200, 0, 10, 1, -1, 7200, 0, 3600],
/// };
/// let rule = Rule::new(&record)?;
/// let info = rule.evaluate(-5 * 60 * 60, 2024)?;
/// // 2024-03-10T07:00:00Z
/// assert_eq!(info.start(), 1710054000);
/// // 2024-11-03T06:00:00Z
/// assert_eq!(info.end(), 1730613600);
/// assert_eq!(info.dst_offset(), -4 * 60 * 60);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    id: Box<str>,
    start: RuleTransition,
    end: RuleTransition,
    savings: i32,
}

impl Rule {
    /// Decodes the given rule record.
    ///
    /// # Errors
    ///
    /// This returns an error when the record uses an encoding that isn't
    /// described in the [type level documentation](Rule). Such errors
    /// report `true` from [`Error::is_malformed_rule`].
    pub fn new(record: &RuleRecord) -> Result<Rule, Error> {
        let decode = || -> Result<Rule, Error> {
            let v = &record.values;
            let start = RuleTransition::decode(
                Boundary::Start,
                [v[0], v[1], v[2], v[3], v[4]],
            )?;
            let end = RuleTransition::decode(
                Boundary::End,
                [v[5], v[6], v[7], v[8], v[9]],
            )?;
            let savings = v[10];
            if !(-86399..=86399).contains(&savings) {
                return Err(Error::from(E::InvalidSavings { savings }));
            }
            Ok(Rule { id: record.id.as_str().into(), start, end, savings })
        };
        decode().with_context(|| {
            crate::error::tz::table::Error::Rule {
                id: record.id.as_str().into(),
            }
        })
    }

    /// Returns the identifier of this rule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the number of seconds added to the standard offset while
    /// daylight saving time is in effect.
    pub fn savings(&self) -> i32 {
        self.savings
    }

    /// Computes the two transitions of this rule in the given year, for a
    /// zone whose standard offset is `raw` seconds.
    ///
    /// # Errors
    ///
    /// This returns an error when `year` is outside of `-9999..=9999`.
    pub fn evaluate(&self, raw: i32, year: i16) -> Result<DstInfo, Error> {
        if !(-9999..=9999).contains(&year) {
            return Err(Error::from(TimestampError::YearOutOfRange {
                given: i32::from(year),
            }));
        }
        Ok(self.dst_info(raw, year))
    }

    /// Returns true when this rule puts a zone whose standard offset is
    /// `raw` seconds in DST at the given instant.
    ///
    /// The instant must be within the supported range.
    ///
    /// A transition's time of day (and the offset it is measured in) can
    /// move it into the previous or next year. So instead of evaluating only
    /// the year containing `instant`, this looks at the transitions of the
    /// neighboring years too and picks the last one at or before `instant`.
    pub(crate) fn is_dst(&self, raw: i32, instant: i64) -> bool {
        let mut last: Option<(i64, bool)> = None;
        for info in self.around(raw, instant) {
            for (at, dst) in [(info.start, true), (info.end, false)] {
                if at <= instant && last.map_or(true, |(prev, _)| at >= prev) {
                    last = Some((at, dst));
                }
            }
        }
        match last {
            Some((_, dst)) => dst,
            None => {
                let year = local_year(raw, instant);
                self.dst_info(raw, year).in_dst(instant)
            }
        }
    }

    /// Returns the transitions of the years before, containing and after
    /// `instant` in the standard time of a zone with offset `raw`. Years
    /// outside of `-9999..=9999` are skipped.
    pub(crate) fn around(
        &self,
        raw: i32,
        instant: i64,
    ) -> impl Iterator<Item = DstInfo> + '_ {
        let year = i32::from(local_year(raw, instant));
        (year - 1..=year + 1)
            .filter(|year| (-9999..=9999).contains(year))
            // OK because `year` is within `-9999..=9999`.
            .map(move |year| self.dst_info(raw, year as i16))
    }

    /// Like `evaluate`, but assumes the year is in range.
    pub(crate) fn dst_info(&self, raw: i32, year: i16) -> DstInfo {
        let std_offset = raw;
        let dst_offset = raw + self.savings;
        // DST starts with respect to standard time and ends with respect to
        // DST.
        let start = self.start.to_instant(year, std_offset, std_offset);
        let end = self.end.to_instant(year, dst_offset, std_offset);
        DstInfo { start, end, std_offset, dst_offset }
    }
}

/// The daylight saving time boundaries produced by a [`Rule`] for one year.
///
/// The `start` and `end` instants are given in seconds since the Unix epoch.
/// They are computed from the local dates in the year the rule was evaluated
/// for, so a transition shortly after midnight on January 1 (or shortly
/// before midnight on December 31) can fall in a neighboring year in UTC.
///
/// Note that `start` may be greater than `end`. This happens in the
/// southern hemisphere, where DST is in effect at the beginning and end of
/// the calendar year, and not in the middle of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DstInfo {
    start: i64,
    end: i64,
    std_offset: i32,
    dst_offset: i32,
}

impl DstInfo {
    /// The instant (inclusive) at which DST begins.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// The instant (exclusive) at which DST ends.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The total UTC offset, in seconds, outside of DST.
    pub fn std_offset(&self) -> i32 {
        self.std_offset
    }

    /// The total UTC offset, in seconds, during DST.
    pub fn dst_offset(&self) -> i32 {
        self.dst_offset
    }

    /// Returns true if and only if DST is in effect at the given instant.
    ///
    /// When `start <= end`, DST is in effect in `[start, end)`. Otherwise,
    /// DST is in effect everywhere outside of `[end, start)`.
    ///
    /// # Example
    ///
    /// ```
    /// use tzcompact::tz::{Rule, RuleRecord};
    ///
    /// // New South Wales: DST from the first Sunday in October until the
    /// // first Sunday in April.
    /// let record = RuleRecord {
    ///     id: "AN".to_string(),
    ///     values: [9, 1, -1, 7200, 1, 3, 1, -1, 7200, 1, 3600],
    /// };
    /// let info = Rule::new(&record)?.evaluate(10 * 60 * 60, 2024)?;
    /// assert!(info.end() < info.start());
    /// // 2024-01-15T00:00:00Z
    /// assert!(info.in_dst(1705276800));
    /// // 2024-07-01T00:00:00Z
    /// assert!(!info.in_dst(1719792000));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn in_dst(&self, instant: i64) -> bool {
        if self.start <= self.end {
            self.start <= instant && instant < self.end
        } else {
            !(self.end <= instant && instant < self.start)
        }
    }

    /// Returns the earlier and later of the two transitions.
    pub fn ordered(&self) -> (i64, i64) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// Returns the year containing `instant` on a clock at the given offset.
fn local_year(offset: i32, instant: i64) -> i16 {
    let second = instant + i64::from(offset);
    let year = ITimestamp { second }.to_date().year;
    year.clamp(-9999, 9999)
}

/// One half of a rule: a day, a time on that day, and the clock the time is
/// measured against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct RuleTransition {
    day: DaySpec,
    time: i32,
    mode: TimeMode,
}

impl RuleTransition {
    fn decode(
        boundary: Boundary,
        [month, day, dow, time, mode]: [i32; 5],
    ) -> Result<RuleTransition, Error> {
        if !(-604799..=604799).contains(&time) {
            return Err(Error::from(E::InvalidTime { boundary, time }));
        }
        let mode = match mode {
            0 => TimeMode::Wall,
            1 => TimeMode::Standard,
            2 => TimeMode::Utc,
            _ => {
                return Err(Error::from(E::InvalidTimeMode { boundary, mode }))
            }
        };
        let day = DaySpec::decode(boundary, month, day, dow)?;
        Ok(RuleTransition { day, time, mode })
    }

    /// Returns the instant of this transition in the given year.
    ///
    /// `wall_offset` is the offset in effect just before the transition, and
    /// `std_offset` is the standard offset.
    fn to_instant(&self, year: i16, wall_offset: i32, std_offset: i32) -> i64 {
        let offset = match self.mode {
            TimeMode::Wall => wall_offset,
            TimeMode::Standard => std_offset,
            TimeMode::Utc => 0,
        };
        let local = match self.day.to_epoch_day(year) {
            Some(day) => day.to_timestamp().second + i64::from(self.time),
            None => {
                let last = IDate::last_of_year(year).to_epoch_day();
                last.to_timestamp().second + SECONDS_PER_DAY - 1
            }
        };
        local - i64::from(offset)
    }
}

/// The clock a rule's time of day is measured against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TimeMode {
    Wall,
    Standard,
    Utc,
}

/// A specification for the day on which a transition occurs.
///
/// Months are 1-based and weekdays are `0..=6` with `0` being Sunday.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DaySpec {
    /// A fixed day of the month.
    DayOfMonth { month: i8, day: i8 },
    /// The nth weekday of the month. Negative values count from the end.
    WeekdayOfMonth { month: i8, nth: i8, weekday: i8 },
    /// The first weekday on or after the given day.
    WeekdayOnOrAfter { month: i8, day: i8, weekday: i8 },
    /// The last weekday on or before the given day.
    WeekdayOnOrBefore { month: i8, day: i8, weekday: i8 },
    /// Julian day in `1..=365`, never counting leap days.
    JulianOne(i16),
    /// Julian day in `0..=365`, counting leap days.
    JulianZero(i16),
}

impl DaySpec {
    fn decode(
        boundary: Boundary,
        month: i32,
        day: i32,
        dow: i32,
    ) -> Result<DaySpec, Error> {
        if month == -1 {
            return match dow {
                0 if (1..=365).contains(&day) => {
                    Ok(DaySpec::JulianOne(day as i16))
                }
                1 if (0..=365).contains(&day) => {
                    Ok(DaySpec::JulianZero(day as i16))
                }
                0 | 1 => Err(Error::from(E::InvalidJulianDay {
                    boundary,
                    day,
                    zero_based: dow == 1,
                })),
                _ => Err(Error::from(E::InvalidDiscriminant {
                    boundary,
                    month,
                    dow,
                })),
            };
        }
        if !(0..=11).contains(&month) {
            return Err(Error::from(E::InvalidMonth { boundary, month }));
        }
        let month = (month + 1) as i8;
        // Days are checked against a leap year, which permits February 29.
        let max_day = i32::from(days_in_month(2000, month));
        let check_day = |day: i32| -> Result<i8, Error> {
            if (1..=max_day).contains(&day) {
                Ok(day as i8)
            } else {
                let month = i32::from(month) - 1;
                Err(Error::from(E::InvalidDayOfMonth { boundary, month, day }))
            }
        };
        match dow {
            0 => Ok(DaySpec::DayOfMonth { month, day: check_day(day)? }),
            1..=7 => {
                if day == 0 || !(-5..=5).contains(&day) {
                    return Err(Error::from(E::InvalidNthWeekday {
                        boundary,
                        nth: day,
                    }));
                }
                let weekday = (dow - 1) as i8;
                Ok(DaySpec::WeekdayOfMonth { month, nth: day as i8, weekday })
            }
            -7..=-1 => {
                let weekday = (-dow - 1) as i8;
                if day >= 0 {
                    let day = check_day(day)?;
                    Ok(DaySpec::WeekdayOnOrAfter { month, day, weekday })
                } else {
                    let day = check_day(-day)?;
                    Ok(DaySpec::WeekdayOnOrBefore { month, day, weekday })
                }
            }
            _ => Err(Error::from(E::InvalidDayOfWeek { boundary, dow })),
        }
    }

    /// Converts this specification to a day in the given year.
    ///
    /// This returns `None` only for the zero-based Julian day `365` in a
    /// common year. Callers should treat that as the end of the year.
    fn to_epoch_day(&self, year: i16) -> Option<IEpochDay> {
        let date = |month: i8, day: i8| IDate { year, month, day };
        let shift = |day: IEpochDay, days: i32| IEpochDay {
            epoch_day: day.epoch_day + days,
        };
        match *self {
            DaySpec::DayOfMonth { month, day } => {
                let day = day.min(days_in_month(year, month));
                Some(date(month, day).to_epoch_day())
            }
            DaySpec::WeekdayOfMonth { month, nth, weekday } => {
                let last = days_in_month(year, month);
                let day = if nth > 0 {
                    let first = date(month, 1).weekday();
                    let mut day = 1 + (weekday - first).rem_euclid(7)
                        + 7 * (nth - 1);
                    if day > last {
                        day -= 7;
                    }
                    day
                } else {
                    let last_weekday = date(month, last).weekday();
                    let mut day = last
                        - (last_weekday - weekday).rem_euclid(7)
                        - 7 * (-nth - 1);
                    if day < 1 {
                        day += 7;
                    }
                    day
                };
                Some(date(month, day).to_epoch_day())
            }
            DaySpec::WeekdayOnOrAfter { month, day, weekday } => {
                let day = date(month, day.min(days_in_month(year, month)));
                let delta = (weekday - day.weekday()).rem_euclid(7);
                Some(shift(day.to_epoch_day(), i32::from(delta)))
            }
            DaySpec::WeekdayOnOrBefore { month, day, weekday } => {
                let day = date(month, day.min(days_in_month(year, month)));
                let delta = (day.weekday() - weekday).rem_euclid(7);
                Some(shift(day.to_epoch_day(), -i32::from(delta)))
            }
            DaySpec::JulianOne(day) => {
                let jan1 = IDate::first_of_year(year).to_epoch_day();
                let mut days = i32::from(day) - 1;
                if is_leap_year(year) && day >= 60 {
                    days += 1;
                }
                Some(shift(jan1, days))
            }
            DaySpec::JulianZero(day) => {
                if day == 365 && !is_leap_year(year) {
                    return None;
                }
                let jan1 = IDate::first_of_year(year).to_epoch_day();
                Some(shift(jan1, i32::from(day)))
            }
        }
    }
}
