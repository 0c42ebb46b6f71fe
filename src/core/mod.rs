//! Core - shared error type and diagnostics macros

pub mod error;

#[macro_use]
pub mod utils {
    #[macro_use]
    pub mod diagnostics;
}

pub use error::ConfigurationError;
