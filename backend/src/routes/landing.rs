//! Route table and the plain-text landing page.

pub const PRECIPITATION: &str = "/api/v1.0/precipitation";
pub const STATIONS: &str = "/api/v1.0/stations";
pub const TOBS: &str = "/api/v1.0/tobs";
pub const TEMPERATURE_FROM: &str = "/api/v1.0/<start>";
pub const TEMPERATURE_BETWEEN: &str = "/api/v1.0/<start>/<end>";

/// Body served at `/`.
///
/// Routes are separated by literal `<br/>` tags; the two templated routes keep
/// their trailing `;`.
pub fn welcome_text() -> String {
    format!(
        "Available Routes:<br/>{}<br/>{}<br/>{}<br/>{};<br/>{};",
        PRECIPITATION, STATIONS, TOBS, TEMPERATURE_FROM, TEMPERATURE_BETWEEN
    )
}
