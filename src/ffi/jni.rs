//! JNI (Java Native Interface) bindings for Android and desktop JVMs.
//!
//! These functions are called directly from Kotlin/Java. Each one borrows the
//! caller's object only long enough to copy it, runs the bridge, and then either
//! hands back a fresh Java object or throws.
//!
//! # Package Name
//! The JNI functions are named for package: `org.operatorfoundation.shorttext`
//! Class: `ShortText`
//!
//! ```kotlin
//! object ShortText {
//!     init { System.loadLibrary("shorttext") }
//!     external fun compress(text: String): ByteArray
//!     external fun decompress(compressed: ByteArray): String
//!     external fun enableVerboseLogging()
//! }
//! ```

use jni::objects::{JByteArray, JObject, JString};
use jni::sys::{jbyteArray, jstring};
use jni::JNIEnv;

use crate::bridge::Bridge;
use crate::error::{BridgeError, ErrorCategory, Operation};
use crate::kernels::CodebookCodec;
use crate::logging;

// =============================================================================
// Error Translation
// =============================================================================

/// The Java exception class thrown for each error category.
fn exception_class(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::InvalidArgument => "java/lang/IllegalArgumentException",
        ErrorCategory::ResourceExhaustion => "java/lang/OutOfMemoryError",
        ErrorCategory::InternalFailure => "java/lang/RuntimeException",
    }
}

/// Throws `err` into the JVM. Nothing is thrown if an exception is already
/// pending, so an `OutOfMemoryError` raised by a failed JNI call is never
/// replaced.
fn throw(env: &mut JNIEnv, err: &BridgeError) {
    if env.exception_check().unwrap_or(false) {
        return;
    }
    let _ = env.throw_new(exception_class(err.category()), err.to_string());
}

// =============================================================================
// Input Helpers
// =============================================================================

/// Copies a Java string out as UTF-8. The `JavaStr` handle is released before
/// this returns, whatever the outcome.
fn read_string(env: &mut JNIEnv, text: &JString) -> Result<Option<String>, jni::errors::Error> {
    if text.is_null() {
        return Ok(None);
    }
    let java_str = env.get_string(text)?;
    Ok(Some(java_str.into()))
}

/// Copies a Java byte array out. No array elements stay pinned after this returns.
fn read_bytes(env: &mut JNIEnv, array: &JByteArray) -> Result<Option<Vec<u8>>, jni::errors::Error> {
    if array.is_null() {
        return Ok(None);
    }
    env.convert_byte_array(array).map(Some)
}

// =============================================================================
// JNI Entry Points
// =============================================================================

/// `external fun compress(text: String): ByteArray`
#[no_mangle]
pub extern "system" fn Java_org_operatorfoundation_shorttext_ShortText_compress<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    text: JString<'local>,
) -> jbyteArray {
    let text = match read_string(&mut env, &text) {
        Ok(text) => text,
        Err(_) => {
            throw(&mut env, &BridgeError::AllocationFailure(Operation::Compress));
            return std::ptr::null_mut();
        }
    };

    let compressed = match Bridge::<CodebookCodec>::default().compress(text.as_deref()) {
        Ok(compressed) => compressed,
        Err(err) => {
            throw(&mut env, &err);
            return std::ptr::null_mut();
        }
    };

    match env.byte_array_from_slice(&compressed) {
        Ok(array) => array.into_raw(),
        Err(_) => {
            throw(&mut env, &BridgeError::AllocationFailure(Operation::Compress));
            std::ptr::null_mut()
        }
    }
}

/// `external fun decompress(compressed: ByteArray): String`
#[no_mangle]
pub extern "system" fn Java_org_operatorfoundation_shorttext_ShortText_decompress<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    compressed: JByteArray<'local>,
) -> jstring {
    let bytes = match read_bytes(&mut env, &compressed) {
        Ok(bytes) => bytes,
        Err(_) => {
            throw(&mut env, &BridgeError::AllocationFailure(Operation::Decompress));
            return std::ptr::null_mut();
        }
    };

    let text = match Bridge::<CodebookCodec>::default().decompress(bytes.as_deref()) {
        Ok(text) => text,
        Err(err) => {
            throw(&mut env, &err);
            return std::ptr::null_mut();
        }
    };

    match env.new_string(text) {
        Ok(string) => string.into_raw(),
        Err(_) => {
            throw(&mut env, &BridgeError::AllocationFailure(Operation::Decompress));
            std::ptr::null_mut()
        }
    }
}

/// `external fun enableVerboseLogging()`
#[no_mangle]
pub extern "system" fn Java_org_operatorfoundation_shorttext_ShortText_enableVerboseLogging<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
) {
    if let Err(e) = logging::enable_verbose_logging(None) {
        let _ = env.throw_new("java/io/IOException", e.to_string());
    }
}
