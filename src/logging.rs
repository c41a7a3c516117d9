// Some feature combinations result in some of these macros never being used.
// Which is fine. Just squash the warnings.
#![allow(unused_macros)]

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

macro_rules! error {
    ($($tt:tt)*) => { log!(log::error!($($tt)*)) }
}

macro_rules! warn {
    ($($tt:tt)*) => { log!(log::warn!($($tt)*)) }
}

macro_rules! info {
    ($($tt:tt)*) => { log!(log::info!($($tt)*)) }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}

/// A simple logger that writes every message to stderr and keeps a copy of
/// it in memory.
///
/// This is only used in tests. It makes it possible to see what the registry
/// is doing (for example, when it falls back to a continuation rule) by
/// running tests with `--features logging -- --nocapture`, and it lets tests
/// check that a message was emitted.
#[cfg(all(test, feature = "std", feature = "logging"))]
#[derive(Debug)]
pub(crate) struct Logger(());

#[cfg(all(test, feature = "std", feature = "logging"))]
const LOGGER: &'static Logger = &Logger(());

/// Every message logged so far, from every test in this process.
#[cfg(all(test, feature = "std", feature = "logging"))]
static RECORDS: std::sync::Mutex<std::vec::Vec<(log::Level, Message)>> =
    std::sync::Mutex::new(std::vec::Vec::new());

#[cfg(all(test, feature = "std", feature = "logging"))]
type Message = std::string::String;

#[cfg(all(test, feature = "std", feature = "logging"))]
impl Logger {
    /// Install this logger globally and enable every log level.
    ///
    /// This returns an error if a logger has already been installed. Tests
    /// generally ignore it, since any test may be the first one to run.
    pub(crate) fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    /// Returns true if a message at the given level satisfying `matches`
    /// has been logged.
    ///
    /// Tests run concurrently and share this logger, so callers should look
    /// for a message that only they could have caused.
    pub(crate) fn logged(
        level: log::Level,
        matches: impl Fn(&str) -> bool,
    ) -> bool {
        let records = match RECORDS.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.iter().any(|(l, message)| *l == level && matches(message))
    }
}

#[cfg(all(test, feature = "std", feature = "logging"))]
impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let message = std::format!("{}", record.args());
        if let Ok(mut records) = RECORDS.lock() {
            records.push((record.level(), message));
        }
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                std::eprintln!(
                    "{}|{}|{}:{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    line,
                    record.args()
                );
            }
            (Some(file), None) => {
                std::eprintln!(
                    "{}|{}|{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    record.args()
                );
            }
            _ => {
                std::eprintln!(
                    "{}|{}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}
