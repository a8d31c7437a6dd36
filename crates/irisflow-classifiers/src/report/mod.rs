//! Diagnostic outputs that are produced alongside training but never gate it.
pub mod diagram;
