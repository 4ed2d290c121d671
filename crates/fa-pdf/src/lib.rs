//! AcroForm field listing and form filling
//!
//! All PDF parsing and serialization is delegated to [`lopdf`]; this crate
//! only walks the interactive-form structures, matches field names against a
//! caller-supplied mapping and writes values back.

pub mod errors;
pub mod fields;
pub mod fill;
pub mod mapping;
mod objects;
pub mod preflight;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::FormError;
pub use fields::{list_fields, ChoiceOption, FieldListing, FormField, NO_FIELDS_MESSAGE};
pub use fill::{fill_form, FillReport};
pub use mapping::{FieldValue, FieldValueMapping};
