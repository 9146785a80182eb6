/// Conditional logging module for development builds
///
/// The `log!` macro provides informational console logging that is compiled out
/// in production (release) builds by default. Failures that should always reach the
/// console go through `log_error!`.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// Both macros only touch the browser console on `wasm32`; native builds (tests,
/// benches) evaluate the arguments and discard them.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::logging::log;
///
/// let dropped = 2;
/// log!("Dropped {} malformed rows", dropped);
/// ```
/// Conditionally log to console in development builds
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {{
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        web_sys::console::log_1(&format!($($arg),+).into());
        #[cfg(not(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging"))))]
        let _ = ($(&$arg,)+);
    }};
}

/// Always log an error to the console (no-op on native targets)
#[macro_export]
macro_rules! log_error {
    ($($arg:expr),+ $(,)?) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!($($arg),+).into());
        #[cfg(not(target_arch = "wasm32"))]
        let _ = ($(&$arg,)+);
    }};
}

pub use crate::{log, log_error};
