use crate::structs::Table;
use log::debug;

/// Meters per inch.
pub const INCHES_TO_METERS: f64 = 0.0254;
/// Kilograms per pound.
pub const POUNDS_TO_KILOGRAMS: f64 = 0.45359237;

/// Converts every row from inches/pounds to meters/kilograms.
///
/// Row count, row order and names are untouched. Both measurements are rounded
/// to two decimals. No range checks are applied, so zero and negative values
/// convert like any other number.
///
/// # Arguments
/// * `table` - Rows as extracted, height in inches and weight in pounds
///
/// # Returns
/// The same rows with height in meters and weight in kilograms.
pub fn transform(mut table: Table) -> Table {
    debug!("Converting units for {} rows", table.len());
    for record in &mut table {
        record.height = inches_to_meters(record.height);
        record.weight = pounds_to_kilograms(record.weight);
    }
    table
}

pub fn inches_to_meters(inches: f64) -> f64 {
    round2(inches * INCHES_TO_METERS)
}

pub fn pounds_to_kilograms(pounds: f64) -> f64 {
    round2(pounds * POUNDS_TO_KILOGRAMS)
}

/// Rounds to two decimal places from the exact binary value.
///
/// `{:.2}` rounds the exact expansion, so `3.1749999...` becomes `3.17`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::Record;

    #[test]
    fn test_reference_conversions() {
        assert_eq!(inches_to_meters(70.0), 1.78);
        assert_eq!(pounds_to_kilograms(150.0), 68.04);
    }

    #[test]
    fn test_transform_preserves_order_and_names() {
        let table = vec![
            Record::new("alex", 65.78, 112.99),
            Record::new("ajay", 71.52, 136.49),
            Record::new("alice", 69.40, 153.03),
        ];

        let out = transform(table);
        assert_eq!(
            out,
            vec![
                Record::new("alex", 1.67, 51.25),
                Record::new("ajay", 1.82, 61.91),
                Record::new("alice", 1.76, 69.41),
            ]
        );
    }

    #[test]
    fn test_rounding_below_half_stays_down() {
        assert_eq!(inches_to_meters(125.0), 3.17);
        assert_eq!(inches_to_meters(225.0), 5.71);
        assert_eq!(inches_to_meters(275.0), 6.98);
    }

    #[test]
    fn test_transform_is_permissive() {
        let out = transform(vec![Record::new("nobody", 0.0, -10.0)]);
        assert_eq!(out[0].height, 0.0);
        assert_eq!(out[0].weight, -4.54);
    }

    #[test]
    fn test_transform_empty_table() {
        assert!(transform(Vec::new()).is_empty());
    }
}
