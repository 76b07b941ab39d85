// Logging facade: routes to `log` or `defmt` when the matching feature is
// enabled, otherwise compiles to nothing.

#[cfg(feature = "log")]
macro_rules! engine_log {
    (trace, $($arg:expr),*) => { log::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { log::debug!($($arg),*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! engine_log {
    (trace, $($arg:expr),*) => { defmt::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { defmt::debug!($($arg),*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! engine_log {
    ($level:ident, $($arg:expr),*) => {{ $( let _ = $arg; )* }}
}

macro_rules! engine_trace {
    ($($arg:expr),*) => (engine_log!(trace, $($arg),*));
}

macro_rules! engine_debug {
    ($($arg:expr),*) => (engine_log!(debug, $($arg),*));
}
