pub mod fields;
pub mod fill;
pub mod validate;
