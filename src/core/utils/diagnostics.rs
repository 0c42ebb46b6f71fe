//! Diagnostics Macros
//!
//! Debug builds talk, release builds stay quiet.
//!
//! In wasm32: messages go to the browser console via `web_sys::console`
//! Elsewhere: messages go to stderr
//!
//! Usage:
//! ```rust
//! use motion_engine::{console_log, debug_warn};
//!
//! console_log!("bodies: {}", 3);
//! // Compiled out of release builds entirely
//! debug_warn!("unsupported pair: {} vs {}", "polygon", "polygon");
//! ```

/// Write one line to the host console (browser console or stderr).
#[doc(hidden)]
pub fn __emit_log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&msg.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("{}", msg);
    }
}

/// Write one warning line to the host console.
#[doc(hidden)]
pub fn __emit_warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&msg.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("warning: {}", msg);
    }
}

/// Always-on log line
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        $crate::core::utils::diagnostics::__emit_log(&format!($($arg)*));
    }};
}

/// Debug-only warning
///
/// - Debug: formats and emits the warning
/// - Release: expands to nothing (arguments are not evaluated)
#[macro_export]
macro_rules! debug_warn {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            $crate::core::utils::diagnostics::__emit_warn(&format!($($arg)*));
        }
    }};
}
