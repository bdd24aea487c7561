//! Tabular model input

use super::fields::FIELD_COUNT;
use super::record::CustomerRecord;

/// A customer record encoded as the single row the model scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow([f64; FIELD_COUNT]);

impl FeatureRow {
    pub fn from_record(record: &CustomerRecord) -> Self {
        let mut row = [0.0; FIELD_COUNT];
        for (slot, (_, value)) in row.iter_mut().zip(record.values()) {
            *slot = value.encoded();
        }
        Self(row)
    }

    pub fn from_values(values: [f64; FIELD_COUNT]) -> Self {
        Self(values)
    }

    /// Value of the column at `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<&CustomerRecord> for FeatureRow {
    fn from(record: &CustomerRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{CityTier, Designation, Flag, Occupation, ProductPitched};

    #[test]
    fn test_encoding() {
        let record = CustomerRecord {
            city_tier: CityTier::Tier3,
            occupation: Occupation::FreeLancer,
            own_car: Flag::Yes,
            designation: Designation::Vp,
            product_pitched: ProductPitched::King,
            ..Default::default()
        };
        let row = FeatureRow::from_record(&record);

        assert_eq!(row.get(0), Some(35.0));
        assert_eq!(row.get(5), Some(50_000.0));
        assert_eq!(row.get(9), Some(0.0)); // Self Enquiry
        assert_eq!(row.get(10), Some(3.0));
        assert_eq!(row.get(11), Some(3.0));
        assert_eq!(row.get(14), Some(0.0));
        assert_eq!(row.get(15), Some(1.0));
        assert_eq!(row.get(16), Some(4.0));
        assert_eq!(row.get(17), Some(4.0));
        assert_eq!(row.get(FIELD_COUNT), None);
    }
}
