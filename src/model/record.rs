//! Customer record: the eighteen-field input schema
//!
//! Field names on the wire are PascalCase (`TypeofContact` keeps its lower-case
//! `of`). Categorical fields are closed enums, so an out-of-vocabulary value is
//! rejected while deserializing, before anything reaches the model.

use std::fmt;

use anyhow::{bail, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::fields::{FieldKind, FIELDS, FIELD_COUNT};

/// Declares a string-valued categorical field.
///
/// Variant order is the vocabulary order the model was trained with; the
/// zero-based position is the encoded feature value.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Accepted values in vocabulary order
            pub const VALUES: &'static [&'static str] = &[$($label),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Position of this value in [`Self::VALUES`]
            pub fn code(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// How the customer was contacted
    ContactType {
        SelfEnquiry => "Self Enquiry",
        CompanyInvited => "Company Invited",
    }
}

categorical! {
    Occupation {
        Salaried => "Salaried",
        SelfEmployed => "Self Employed",
        Business => "Business",
        FreeLancer => "Free Lancer",
        Other => "Other",
    }
}

categorical! {
    Gender {
        Male => "Male",
        Female => "Female",
    }
}

categorical! {
    MaritalStatus {
        Single => "Single",
        Married => "Married",
        Divorced => "Divorced",
    }
}

categorical! {
    /// Job designation of the customer
    Designation {
        Executive => "Executive",
        Manager => "Manager",
        SeniorManager => "Senior Manager",
        Avp => "AVP",
        Vp => "VP",
        Other => "Other",
    }
}

categorical! {
    /// Package that was pitched to the customer
    ProductPitched {
        Basic => "Basic",
        Standard => "Standard",
        Deluxe => "Deluxe",
        SuperDeluxe => "Super Deluxe",
        King => "King",
    }
}

/// City tier (1, 2 or 3), numeric on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntegerCode", into = "u8")]
pub enum CityTier {
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
}

impl CityTier {
    pub const VALUES: &'static [&'static str] = &["1", "2", "3"];
}

impl TryFrom<IntegerCode> for CityTier {
    type Error = String;

    fn try_from(code: IntegerCode) -> Result<Self, Self::Error> {
        match code.0 {
            1 => Ok(CityTier::Tier1),
            2 => Ok(CityTier::Tier2),
            3 => Ok(CityTier::Tier3),
            other => Err(format!("invalid city tier {}, expected 1, 2 or 3", other)),
        }
    }
}

impl From<CityTier> for u8 {
    fn from(tier: CityTier) -> Self {
        tier as u8
    }
}

/// Yes/no attribute encoded as 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntegerCode", into = "u8")]
pub enum Flag {
    No = 0,
    Yes = 1,
}

impl Flag {
    pub const VALUES: &'static [&'static str] = &["0", "1"];
}

impl TryFrom<IntegerCode> for Flag {
    type Error = String;

    fn try_from(code: IntegerCode) -> Result<Self, Self::Error> {
        match code.0 {
            0 => Ok(Flag::No),
            1 => Ok(Flag::Yes),
            other => Err(format!("invalid flag {}, expected 0 or 1", other)),
        }
    }
}

impl From<Flag> for u8 {
    fn from(flag: Flag) -> Self {
        flag as u8
    }
}

/// Integer accepted from JSON numbers (`1`, `1.0`) or strings (`"1"`).
///
/// Form posts carry every value as a string, JSON bodies carry numbers.
#[derive(Debug, Clone, Copy)]
pub struct IntegerCode(i64);

impl<'de> Deserialize<'de> for IntegerCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IntegerCodeVisitor)
    }
}

struct IntegerCodeVisitor;

impl IntegerCodeVisitor {
    fn from_float<E: de::Error>(v: f64) -> Result<IntegerCode, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() <= i64::MAX as f64 {
            Ok(IntegerCode(v as i64))
        } else {
            Err(E::custom(format!("expected an integer, got {}", v)))
        }
    }
}

impl<'de> Visitor<'de> for IntegerCodeVisitor {
    type Value = IntegerCode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(IntegerCode(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(IntegerCode)
            .map_err(|_| E::custom(format!("integer {} out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Self::from_float(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if let Ok(parsed) = trimmed.parse::<i64>() {
            return Ok(IntegerCode(parsed));
        }
        match trimmed.parse::<f64>() {
            Ok(parsed) => Self::from_float(parsed),
            Err(_) => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

/// Finite number from a JSON number or a numeric string (`35`, `"35"`)
fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(NumberVisitor)
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a finite number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// One prospective customer
///
/// Numeric fields and integer codes accept numeric strings as well as
/// numbers; categorical fields only accept their exact labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerRecord {
    #[serde(deserialize_with = "number")]
    pub age: f64,
    #[serde(deserialize_with = "number")]
    pub number_of_person_visiting: f64,
    #[serde(deserialize_with = "number")]
    pub preferred_property_star: f64,
    #[serde(deserialize_with = "number")]
    pub number_of_trips: f64,
    #[serde(deserialize_with = "number")]
    pub number_of_children_visiting: f64,
    #[serde(deserialize_with = "number")]
    pub monthly_income: f64,
    #[serde(deserialize_with = "number")]
    pub pitch_satisfaction_score: f64,
    #[serde(deserialize_with = "number")]
    pub number_of_followups: f64,
    #[serde(deserialize_with = "number")]
    pub duration_of_pitch: f64,
    pub typeof_contact: ContactType,
    pub city_tier: CityTier,
    pub occupation: Occupation,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub passport: Flag,
    pub own_car: Flag,
    pub designation: Designation,
    pub product_pitched: ProductPitched,
}

/// A single field value, tagged with how it is encoded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Continuous or count value, used as-is
    Number(f64),
    /// Numeric code (city tier, flags), used as its integer value
    Code(u8),
    /// Categorical label and its vocabulary position
    Label(&'static str, usize),
}

impl FieldValue {
    /// Value as it appears in the model's tabular input
    pub fn encoded(self) -> f64 {
        match self {
            FieldValue::Number(v) => v,
            FieldValue::Code(c) => f64::from(c),
            FieldValue::Label(_, position) => position as f64,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Code(c) => write!(f, "{}", c),
            FieldValue::Label(label, _) => f.write_str(label),
        }
    }
}

impl CustomerRecord {
    /// All fields in column order
    pub fn values(&self) -> [(&'static str, FieldValue); FIELD_COUNT] {
        use FieldValue::{Code, Label, Number};

        [
            ("Age", Number(self.age)),
            ("NumberOfPersonVisiting", Number(self.number_of_person_visiting)),
            ("PreferredPropertyStar", Number(self.preferred_property_star)),
            ("NumberOfTrips", Number(self.number_of_trips)),
            ("NumberOfChildrenVisiting", Number(self.number_of_children_visiting)),
            ("MonthlyIncome", Number(self.monthly_income)),
            ("PitchSatisfactionScore", Number(self.pitch_satisfaction_score)),
            ("NumberOfFollowups", Number(self.number_of_followups)),
            ("DurationOfPitch", Number(self.duration_of_pitch)),
            (
                "TypeofContact",
                Label(self.typeof_contact.as_str(), self.typeof_contact.code()),
            ),
            ("CityTier", Code(self.city_tier.into())),
            (
                "Occupation",
                Label(self.occupation.as_str(), self.occupation.code()),
            ),
            ("Gender", Label(self.gender.as_str(), self.gender.code())),
            (
                "MaritalStatus",
                Label(self.marital_status.as_str(), self.marital_status.code()),
            ),
            ("Passport", Code(self.passport.into())),
            ("OwnCar", Code(self.own_car.into())),
            (
                "Designation",
                Label(self.designation.as_str(), self.designation.code()),
            ),
            (
                "ProductPitched",
                Label(self.product_pitched.as_str(), self.product_pitched.code()),
            ),
        ]
    }

    /// Reject values serde cannot rule out on its own (NaN, infinities).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.values() {
            if let FieldValue::Number(v) = value {
                if !v.is_finite() {
                    bail!("{} must be a finite number", name);
                }
            }
        }
        Ok(())
    }

    /// Check numeric fields against the form bounds.
    ///
    /// Only the interactive form enforces these; the JSON API accepts any
    /// finite number.
    pub fn check_bounds(&self) -> Result<()> {
        self.validate()?;

        for ((name, value), spec) in self.values().iter().zip(FIELDS.iter()) {
            if let (FieldValue::Number(v), FieldKind::Number { min, max, .. }) = (value, &spec.kind)
            {
                if v < min || v > max {
                    bail!("{} must be between {} and {}, got {}", name, min, max, v);
                }
            }
        }
        Ok(())
    }
}

impl Default for CustomerRecord {
    /// The form's initial values
    fn default() -> Self {
        Self {
            age: 35.0,
            number_of_person_visiting: 2.0,
            preferred_property_star: 3.0,
            number_of_trips: 2.0,
            number_of_children_visiting: 0.0,
            monthly_income: 50_000.0,
            pitch_satisfaction_score: 3.0,
            number_of_followups: 2.0,
            duration_of_pitch: 15.0,
            typeof_contact: ContactType::SelfEnquiry,
            city_tier: CityTier::Tier1,
            occupation: Occupation::Salaried,
            gender: Gender::Male,
            marital_status: MaritalStatus::Single,
            passport: Flag::No,
            own_car: Flag::No,
            designation: Designation::Executive,
            product_pitched: ProductPitched::Basic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "Age": 35,
            "NumberOfPersonVisiting": 2,
            "PreferredPropertyStar": 3,
            "NumberOfTrips": 2,
            "NumberOfChildrenVisiting": 0,
            "MonthlyIncome": 50000,
            "PitchSatisfactionScore": 3,
            "NumberOfFollowups": 2,
            "DurationOfPitch": 15,
            "TypeofContact": "Self Enquiry",
            "CityTier": 1,
            "Occupation": "Salaried",
            "Gender": "Male",
            "MaritalStatus": "Single",
            "Passport": 0,
            "OwnCar": 1,
            "Designation": "Executive",
            "ProductPitched": "Basic"
        })
    }

    #[test]
    fn test_deserialize_sample() {
        let record: CustomerRecord = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(record.age, 35.0);
        assert_eq!(record.typeof_contact, ContactType::SelfEnquiry);
        assert_eq!(record.city_tier, CityTier::Tier1);
        assert_eq!(record.own_car, Flag::Yes);
        assert_eq!(record.product_pitched, ProductPitched::Basic);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let record: CustomerRecord = serde_json::from_value(sample_json()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), FIELD_COUNT);
        assert_eq!(object["TypeofContact"], "Self Enquiry");
        assert_eq!(object["CityTier"], 1);
        assert_eq!(object["OwnCar"], 1);
        assert_eq!(object["Designation"], "Executive");
    }

    #[test]
    fn test_every_field_is_required() {
        for (name, _) in CustomerRecord::default().values() {
            let mut json = sample_json();
            json.as_object_mut().unwrap().remove(name);
            let err = serde_json::from_value::<CustomerRecord>(json).unwrap_err();
            assert!(
                err.to_string().contains(name),
                "error for missing {} was: {}",
                name,
                err
            );
        }
    }

    #[test]
    fn test_out_of_vocabulary_rejected() {
        let mut json = sample_json();
        json["Occupation"] = "Astronaut".into();
        let err = serde_json::from_value::<CustomerRecord>(json).unwrap_err();
        assert!(err.to_string().contains("Astronaut"));

        let mut json = sample_json();
        json["Gender"] = "Fe Male".into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());
    }

    #[test]
    fn test_numeric_codes() {
        let mut json = sample_json();
        json["CityTier"] = 4.into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());

        let mut json = sample_json();
        json["Passport"] = 2.into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());

        let mut json = sample_json();
        json["CityTier"] = 3.0.into();
        json["Passport"] = "1".into();
        let record: CustomerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.city_tier, CityTier::Tier3);
        assert_eq!(record.passport, Flag::Yes);

        let mut json = sample_json();
        json["CityTier"] = 1.5.into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut json = sample_json();
        json["Age"] = "35".into();
        json["MonthlyIncome"] = " 50000.5 ".into();
        json["CityTier"] = "2".into();
        let record: CustomerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.age, 35.0);
        assert_eq!(record.monthly_income, 50_000.5);
        assert_eq!(record.city_tier, CityTier::Tier2);

        // Serialized back as numbers
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Age"], 35.0);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut json = sample_json();
        json["Age"] = "thirty-five".into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());

        let mut json = sample_json();
        json["DurationOfPitch"] = "NaN".into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());

        let mut json = sample_json();
        json["NumberOfTrips"] = true.into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());

        let mut json = sample_json();
        json["TypeofContact"] = 1.into();
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());
    }

    #[test]
    fn test_values_follow_field_table() {
        let names: Vec<&str> = CustomerRecord::default()
            .values()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        let expected: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_bounds() {
        let mut record = CustomerRecord::default();
        assert!(record.check_bounds().is_ok());

        record.age = 17.0;
        let err = record.check_bounds().unwrap_err();
        assert!(err.to_string().contains("Age"));

        record.age = 35.0;
        record.monthly_income = 2_000_000.0;
        assert!(record.check_bounds().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let record = CustomerRecord {
            duration_of_pitch: f64::NAN,
            ..Default::default()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_vocabulary_codes() {
        assert_eq!(Occupation::VALUES.len(), 5);
        assert_eq!(Occupation::FreeLancer.code(), 3);
        assert_eq!(Designation::VALUES[Designation::SeniorManager.code()], "Senior Manager");
        assert_eq!(ProductPitched::SuperDeluxe.to_string(), "Super Deluxe");
    }
}
