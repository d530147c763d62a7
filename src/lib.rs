//! This file is the root of the `shorttext` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`bridge`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python (feature `python`).
//!
//! The JNI entry points live in `ffi::jni` (feature `jni`) and are exported by
//! symbol name, so they need no registration here.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod logging;
pub mod traits;

mod ffi;

pub use bridge::{compress, decompress, Bridge, CallStage};
pub use config::{BridgeConfig, DEFAULT_MAX_BUFFER_SIZE};
pub use error::{BridgeError, ErrorCategory, ErrorKind, Operation};
pub use kernels::CodebookCodec;
pub use traits::ShortTextCodec;

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `shorttext` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn shorttext(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::compress_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::decompress_py, m)?)?;

    // --- Turn on diagnostic logging ---
    m.add_function(wrap_pyfunction!(ffi::enable_verbose_logging_py, m)?)?;

    // --- Expose the scratch ceiling and version string as module attributes ---
    m.add("MAX_BUFFER_SIZE", DEFAULT_MAX_BUFFER_SIZE)?;
    m.add("__version__", VERSION)?;

    Ok(())
}
