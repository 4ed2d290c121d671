//! fa command-line tools - expose modules for testing
//!
//! Two binaries share this library: `fill-pdf` (list or fill AcroForm fields)
//! and `validate-marketplace` (check plugin marketplace manifests).

pub mod commands;
pub mod common;

pub use common::GlobalOpts;
