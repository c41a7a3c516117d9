use alloc::boxed::Box;

use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    CycleDetected { name: Box<str>, hops: usize },
    UnknownRule { id: Box<str> },
    UnknownZoneIndex { index: u32 },
    UnknownZoneName { name: Box<str> },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzDb(err).into()
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
            CycleDetected { ref name, hops } => write!(
                f,
                "alias `{name}` did not reach a canonical zone \
                 after following {hops} aliases (is there a cycle?)",
            ),
            UnknownRule { ref id } => {
                write!(f, "no continuation rule with identifier `{id}`")
            }
            UnknownZoneIndex { index } => {
                write!(f, "no zone or alias at index {index}")
            }
            UnknownZoneName { ref name } => {
                write!(f, "failed to find time zone `{name}` in registry")
            }
        }
    }
}
