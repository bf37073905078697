//! # mentor-core - Core Domain Types
//!
//! Foundation crate for Code Mentor. Provides the analysis domain types,
//! error handling, generation counters and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Mode`] - Input method: repository URL, pasted snippet, or zip upload
//! - [`AnalysisResult`] - Structured analysis returned by the backend
//! - [`LibraryInfo`], [`FunctionInfo`] - Entries of the result lists
//!
//! ### Generations (`generation`)
//! - [`Generation`] - Tag attached to every asynchronous operation
//! - [`GenerationCounter`] - Issues generations and recognises stale ones
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum; analysis failures display as their bare message
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use mentor_core::prelude::*;
//! ```

pub mod error;
pub mod generation;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all Code Mentor crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use generation::{Generation, GenerationCounter};
pub use types::{AnalysisResult, FunctionInfo, LibraryInfo, Mode, MIN_DIAGRAM_LEN};
