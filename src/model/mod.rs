//! Customer data model.
//!
//! This module contains the input record, its field table and the tabular
//! encoding handed to the predictor.

pub mod features;
pub mod fields;
mod record;

pub use features::FeatureRow;
pub use fields::{FieldKind, FieldSpec, FIELDS, FIELD_COUNT};
pub use record::{
    CityTier, ContactType, CustomerRecord, Designation, FieldValue, Flag, Gender, MaritalStatus,
    Occupation, ProductPitched,
};
