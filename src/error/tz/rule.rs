use crate::error;

/// Which half of a continuation rule an error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Boundary {
    Start,
    End,
}

impl core::fmt::Display for Boundary {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Boundary::Start => f.write_str("start"),
            Boundary::End => f.write_str("end"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Error {
    InvalidDayOfMonth { boundary: Boundary, month: i32, day: i32 },
    InvalidDayOfWeek { boundary: Boundary, dow: i32 },
    InvalidDiscriminant { boundary: Boundary, month: i32, dow: i32 },
    InvalidJulianDay { boundary: Boundary, day: i32, zero_based: bool },
    InvalidMonth { boundary: Boundary, month: i32 },
    InvalidNthWeekday { boundary: Boundary, nth: i32 },
    InvalidSavings { savings: i32 },
    InvalidTime { boundary: Boundary, time: i32 },
    InvalidTimeMode { boundary: Boundary, mode: i32 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzRule(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            InvalidDayOfMonth { boundary, month, day } => write!(
                f,
                "{boundary} day {day} does not exist in month {month} \
                 (months are zero-based)",
            ),
            InvalidDayOfWeek { boundary, dow } => write!(
                f,
                "{boundary} day of week {dow} is not in the range \
                 1..=7 or -7..=-1",
            ),
            InvalidDiscriminant { boundary, month, dow } => write!(
                f,
                "unrecognized {boundary} day specification \
                 (month {month}, day of week {dow})",
            ),
            InvalidJulianDay { boundary, day, zero_based: false } => write!(
                f,
                "{boundary} Julian day {day} is not in the range 1..=365",
            ),
            InvalidJulianDay { boundary, day, zero_based: true } => write!(
                f,
                "{boundary} zero-based Julian day {day} is not in \
                 the range 0..=365",
            ),
            InvalidMonth { boundary, month } => write!(
                f,
                "{boundary} month {month} is not in the range 0..=11 \
                 (or -1 for a Julian day)",
            ),
            InvalidNthWeekday { boundary, nth } => write!(
                f,
                "{boundary} weekday ordinal {nth} is not in the range \
                 1..=5 or -5..=-1",
            ),
            InvalidSavings { savings } => write!(
                f,
                "DST savings of {savings} seconds is not in the range \
                 -86399..=86399",
            ),
            InvalidTime { boundary, time } => write!(
                f,
                "{boundary} time of {time} seconds is not in the range \
                 -604799..=604799",
            ),
            InvalidTimeMode { boundary, mode } => write!(
                f,
                "{boundary} time mode {mode} is not one of \
                 0 (wall), 1 (standard) or 2 (UTC)",
            ),
        }
    }
}
