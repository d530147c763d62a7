// In: src/ffi/python.rs

//! The CPython front end.
//!
//! Python `None` reaches the bridge as a null input. The codec runs with the GIL
//! released. Result objects are created only after the bridge has returned, so
//! the scratch buffer is already freed if CPython then fails to allocate; that
//! failure surfaces as Python's own `MemoryError`.

use std::path::Path;

use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::bridge::Bridge;
use crate::kernels::CodebookCodec;
use crate::logging;

//==================================================================================
// I. Stateless API
//==================================================================================

/// Compresses `text` into a `bytes` object.
///
/// Raises `ValueError` for `None` or empty text, `MemoryError` if no buffer can
/// be allocated and `RuntimeError` if the codec fails.
#[pyfunction]
#[pyo3(name = "compress", signature = (text))]
pub fn compress_py<'py>(py: Python<'py>, text: Option<&str>) -> PyResult<Bound<'py, PyBytes>> {
    let compressed =
        py.allow_threads(move || Bridge::<CodebookCodec>::default().compress(text))?;

    PyBytes::new_bound_with(py, compressed.len(), |buf| {
        buf.copy_from_slice(&compressed);
        Ok(())
    })
}

/// Decompresses `data` back into a `str`.
///
/// Raises `ValueError` for `None`, empty or corrupt data and `MemoryError` if no
/// buffer can be allocated.
#[pyfunction]
#[pyo3(name = "decompress", signature = (data))]
pub fn decompress_py<'py>(py: Python<'py>, data: Option<&[u8]>) -> PyResult<Bound<'py, PyAny>> {
    let text = py.allow_threads(move || Bridge::<CodebookCodec>::default().decompress(data))?;

    // `PyString::new_bound` panics on allocation failure; go through the C API
    // so CPython's MemoryError is what the caller sees.
    let len = pyo3::ffi::Py_ssize_t::try_from(text.len())
        .map_err(|_| pyo3::exceptions::PyOverflowError::new_err("decompressed text too large"))?;
    // SAFETY: `text` is a live, valid UTF-8 `String` of exactly `len` bytes for
    // the whole call, and CPython copies it. `from_owned_ptr_or_err` takes the
    // new reference, or fetches the pending Python error when `ptr` is null.
    unsafe {
        let ptr = pyo3::ffi::PyUnicode_FromStringAndSize(text.as_ptr().cast(), len);
        Bound::from_owned_ptr_or_err(py, ptr)
    }
}

//==================================================================================
// II. Diagnostics
//==================================================================================

#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<()> {
    logging::enable_verbose_logging(log_file.as_deref().map(Path::new))?;
    Ok(())
}
