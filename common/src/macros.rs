//! Status-line macros shared by every crate.
//!
//! They forward to `tracing` so the binary's formatter decides how each line
//! looks. `success!` is an `INFO` event on its own target.

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "recipebook::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}
