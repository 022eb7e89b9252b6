// Log-Makros: leiten nur mit aktivem `defmt` Feature an defmt weiter,
// ansonsten werden sie komplett wegkompiliert (Host-Tests ohne Logger).

macro_rules! trace {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)+);
    );
}

macro_rules! debug {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
    );
}

macro_rules! warning {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
    );
}

pub(crate) use {debug, trace, warning};
