//! This module serves as the public API for the Foreign Function Interface (FFI) layer.
//!
//! Its primary responsibility is to declare the sub-modules that handle the
//! "impedance mismatch" between the bridge and each managed runtime. Every front
//! end is feature-gated so the plain Rust library builds without any of them.

//==================================================================================
// 1. Module Declarations
//==================================================================================
/// Contains all logic for interfacing with the Python/CPython ecosystem.
#[cfg(feature = "python")]
pub mod python;

/// Contains the JNI entry points for Kotlin/Java callers.
#[cfg(feature = "jni")]
pub mod jni;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
// The functions `lib.rs` registers on the Python module.
#[cfg(feature = "python")]
pub use self::python::{compress_py, decompress_py, enable_verbose_logging_py};
