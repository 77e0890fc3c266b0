// Mirrors the tables of resources/hawaii.sqlite.

diesel::table! {
    measurement (id) {
        id -> Integer,
        station -> Text,
        date -> Text,
        prcp -> Nullable<Double>,
        tobs -> Double,
    }
}

diesel::table! {
    station (id) {
        id -> Integer,
        #[sql_name = "station"]
        station_id -> Text,
        name -> Text,
        latitude -> Double,
        longitude -> Double,
        elevation -> Double,
    }
}

diesel::allow_tables_to_appear_in_same_query!(measurement, station);

/// Columns the queries read, checked against the live schema at startup.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station"]),
];
