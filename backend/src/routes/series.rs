//! Flat array responses.
//!
//! `/api/v1.0/precipitation` and `/api/v1.0/tobs` answer with the queried
//! rows raveled into one JSON array: `[date1, value1, date2, value2, ...]`.
//! Dates are JSON strings, measurements JSON numbers, and a missing
//! precipitation reading is `null`. This is the documented wire contract; no
//! keyed `{date, prcp}` objects are emitted. Values stay numeric even when a
//! series has no `null` (so `/tobs` yields `77.0`, never `"77.0"`).

use serde::{Deserialize, Serialize};

use crate::models::{PrecipitationRow, TemperatureRow};

/// One scalar of a flat array response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Date(String),
    Value(Option<f64>),
}

/// A raveled `(date, value)` result set.
pub type FlatSeries = Vec<FlatValue>;

/// Ravel `(date, prcp)` rows, keeping query order.
pub fn flatten_precipitation(rows: Vec<PrecipitationRow>) -> FlatSeries {
    let mut series = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        series.push(FlatValue::Date(row.date));
        series.push(FlatValue::Value(row.prcp));
    }
    series
}

/// Ravel `(date, tobs)` rows, keeping query order.
pub fn flatten_temperatures(rows: Vec<TemperatureRow>) -> FlatSeries {
    let mut series = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        series.push(FlatValue::Date(row.date));
        series.push(FlatValue::Value(Some(row.tobs)));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_precipitation_serializes_flat() {
        let series = flatten_precipitation(vec![
            PrecipitationRow {
                date: "2016-08-23".to_string(),
                prcp: Some(0.0),
            },
            PrecipitationRow {
                date: "2016-08-23".to_string(),
                prcp: None,
            },
        ]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"["2016-08-23",0.0,"2016-08-23",null]"#);
    }

    #[test]
    fn test_temperatures_serialize_flat() {
        let series = flatten_temperatures(vec![TemperatureRow {
            date: "2016-08-24".to_string(),
            tobs: 77.0,
        }]);
        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            serde_json::json!(["2016-08-24", 77.0])
        );
    }

    #[test]
    fn test_empty_rows_give_empty_array() {
        assert_eq!(serde_json::to_string(&flatten_precipitation(vec![])).unwrap(), "[]");
    }

    proptest! {
        #[test]
        fn prop_flatten_alternates_date_and_value(
            rows in proptest::collection::vec(
                ("20[0-9]{2}-0[1-9]-[0-2][1-9]", proptest::option::of(0.0f64..20.0)),
                0..50,
            )
        ) {
            let rows: Vec<PrecipitationRow> = rows.into_iter().map(PrecipitationRow::from).collect();
            let series = flatten_precipitation(rows.clone());
            prop_assert_eq!(series.len(), rows.len() * 2);
            for (i, row) in rows.iter().enumerate() {
                prop_assert_eq!(&series[2 * i], &FlatValue::Date(row.date.clone()));
                prop_assert_eq!(&series[2 * i + 1], &FlatValue::Value(row.prcp));
            }
        }
    }
}
