use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    OutOfRange { given: i64 },
    YearOutOfRange { given: i32 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Timestamp(err).into()
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
            OutOfRange { given } => write!(
                f,
                "instant {given} is not in the supported range of \
                 -377705116800..=253402300799 seconds",
            ),
            YearOutOfRange { given } => write!(
                f,
                "year {given} is not in the supported range of -9999..=9999",
            ),
        }
    }
}
