use alloc::sync::Arc;

pub(crate) mod timestamp;
pub(crate) mod tz;

/// An error that can occur in this crate.
///
/// Errors fall into two broad groups:
///
/// * Lookup failures. These are recoverable and usually the result of a
/// caller asking for something that isn't in the tables, like a misspelled
/// zone name or an instant outside the supported range. See
/// [`Error::is_unknown_zone_name`], [`Error::is_unknown_zone_index`],
/// [`Error::is_cycle_detected`] and [`Error::is_instant_out_of_range`].
/// * Defects in the static tables themselves. These are reported when a
/// [`ZoneRegistry`](crate::tz::ZoneRegistry) is built and indicate a bug
/// in whatever generated the tables. See [`Error::is_malformed_rule`] and
/// [`Error::is_malformed_table`].
///
/// # Introspection is limited
///
/// Other than implementing the [`std::error::Error`] trait when the
/// `std` feature is enabled, the [`core::fmt::Debug`] trait and the
/// [`core::fmt::Display`] trait, this error type only provides the `is_*`
/// predicates. The predicates always look at the root cause of an error, so
/// any context added on top of it does not change how it is classified.
///
/// # Design
///
/// This crate follows the "One True God Error Type Pattern," where only one
/// error type exists for a variety of different operations. Errors carry a
/// chain of context. For example, a malformed rule found while building a
/// registry renders as the rule's identifier followed by what exactly is
/// wrong with its encoding.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cloneable and to keep it one
    /// word in size.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Returns true when this error originated from looking up a zone name
    /// that is neither a canonical zone nor an alias.
    ///
    /// # Example
    ///
    /// ```
    /// use tzcompact::tz::{Tables, ZoneRegistry};
    ///
    /// let registry = ZoneRegistry::new(Tables::default())?;
    /// let err = registry.resolve_zone("Mars/Olympus_Mons").unwrap_err();
    /// assert!(err.is_unknown_zone_name());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_unknown_zone_name(&self) -> bool {
        use self::{tz::db::Error as DbError, ErrorKind::*};
        matches!(*self.root().kind(), TzDb(DbError::UnknownZoneName { .. }))
    }

    /// Returns true when this error originated from using a zone index that
    /// doesn't refer to a zone (or an alias of one).
    pub fn is_unknown_zone_index(&self) -> bool {
        use self::{tz::db::Error as DbError, ErrorKind::*};
        matches!(*self.root().kind(), TzDb(DbError::UnknownZoneIndex { .. }))
    }

    /// Returns true when this error originated from an alias chain that
    /// didn't reach a canonical zone within the configured hop limit.
    pub fn is_cycle_detected(&self) -> bool {
        use self::{tz::db::Error as DbError, ErrorKind::*};
        matches!(*self.root().kind(), TzDb(DbError::CycleDetected { .. }))
    }

    /// Returns true when this error originated from a continuation rule
    /// whose encoding could not be decoded.
    ///
    /// Rules are static data, so this always indicates a defect in the
    /// tables.
    pub fn is_malformed_rule(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::TzRule(_))
    }

    /// Returns true when this error originated from an instant (or a year)
    /// outside of the range supported by this crate.
    ///
    /// The supported range is `-9999-01-01T00:00:00Z` through
    /// `9999-12-31T23:59:59Z`.
    pub fn is_instant_out_of_range(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Timestamp(_))
    }

    /// Returns true when this error originated from tables that violate one
    /// of the structural invariants checked when building a registry.
    ///
    /// Problems with the encoding of a continuation rule are reported via
    /// [`Error::is_malformed_rule`] instead.
    pub fn is_malformed_table(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::TzTable(_))
    }
}

impl Error {
    #[inline(never)]
    #[cold]
    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, mut consequent: Error) -> Error {
        let inner = Arc::get_mut(&mut consequent.inner)
            .filter(|inner| inner.cause.is_none());
        match inner {
            Some(inner) => {
                inner.cause = Some(self);
                consequent
            }
            // A consequent is always freshly created, so this can't happen
            // in practice. If it somehow does, keep the root cause since
            // that's what the predicates inspect.
            None => self,
        }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Timestamp(self::timestamp::Error),
    TzDb(self::tz::db::Error),
    TzRule(self::tz::rule::Error),
    TzTable(self::tz::table::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Timestamp(ref err) => err.fmt(f),
            TzDb(ref err) => err.fmt(f),
            TzRule(ref err) => err.fmt(f),
            TzTable(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls for the internal error enums.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful when creating the consequent error allocates, since
    /// the closure avoids paying that cost in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}
