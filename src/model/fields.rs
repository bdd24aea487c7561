//! Static field table
//!
//! Column order, labels and input constraints for the eighteen record fields.
//! The form is rendered from this table and the record's bounds check reads
//! it, so the two can never disagree.

use super::record::{
    CityTier, ContactType, Designation, Flag, Gender, MaritalStatus, Occupation, ProductPitched,
};

/// Number of columns the model is trained on
pub const FIELD_COUNT: usize = 18;

/// Input constraints of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free numeric input with inclusive bounds
    Number {
        min: f64,
        max: f64,
        default: f64,
        /// Render as a slider instead of a number box
        slider: bool,
    },
    /// One of a fixed set of options; the first is the default
    Choice {
        options: &'static [&'static str],
        /// Encoded as the option's position rather than its numeric value
        categorical: bool,
    },
}

/// One column of the customer record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Wire name (JSON key, form field name, artifact column)
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn number(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Number {
            min,
            max,
            default,
            slider: false,
        },
    }
}

const fn choice(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    categorical: bool,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Choice {
            options,
            categorical,
        },
    }
}

pub const FIELDS: [FieldSpec; FIELD_COUNT] = [
    number("Age", "Age", 18.0, 100.0, 35.0),
    number("NumberOfPersonVisiting", "Number Of Person Visiting", 1.0, 10.0, 2.0),
    number("PreferredPropertyStar", "Preferred Property Star", 1.0, 5.0, 3.0),
    number("NumberOfTrips", "Number Of Trips per year", 0.0, 50.0, 2.0),
    number("NumberOfChildrenVisiting", "Number Of Children Visiting", 0.0, 10.0, 0.0),
    number("MonthlyIncome", "Monthly Income", 1_000.0, 1_000_000.0, 50_000.0),
    FieldSpec {
        name: "PitchSatisfactionScore",
        label: "Pitch Satisfaction Score",
        kind: FieldKind::Number {
            min: 1.0,
            max: 5.0,
            default: 3.0,
            slider: true,
        },
    },
    number("NumberOfFollowups", "Number Of Followups", 0.0, 20.0, 2.0),
    number("DurationOfPitch", "Duration Of Pitch (minutes)", 0.0, 120.0, 15.0),
    choice("TypeofContact", "Type of Contact", ContactType::VALUES, true),
    choice("CityTier", "City Tier", CityTier::VALUES, false),
    choice("Occupation", "Occupation", Occupation::VALUES, true),
    choice("Gender", "Gender", Gender::VALUES, true),
    choice("MaritalStatus", "Marital Status", MaritalStatus::VALUES, true),
    choice("Passport", "Passport", Flag::VALUES, false),
    choice("OwnCar", "Own Car", Flag::VALUES, false),
    choice("Designation", "Designation", Designation::VALUES, true),
    choice("ProductPitched", "Product Pitched", ProductPitched::VALUES, true),
];

/// Column names in training order
pub fn column_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|f| f.name)
}

/// Categorical columns and their vocabularies, in column order
pub fn vocabularies() -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
    FIELDS.iter().filter_map(|f| match f.kind {
        FieldKind::Choice {
            options,
            categorical: true,
        } => Some((f.name, options)),
        _ => None,
    })
}

/// Look up a field by wire name
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}
