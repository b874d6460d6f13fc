//! The footer's date, time and location line.

use std::fmt;

use chrono::NaiveDateTime;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Builds the ticker line for local time `now`.
///
/// Without coordinates the location reads `Unavailable`.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use shoreline::ticker::{Coordinates, ticker_text};
/// let now = NaiveDate::from_ymd_opt(2024, 3, 7)
///     .unwrap()
///     .and_hms_opt(14, 5, 9)
///     .unwrap();
///
/// assert_eq!(
///     ticker_text(now, Some(Coordinates::new(6.4541, 3.39468))),
///     "Date: 3/7/2024  Time: 2:05:09 PM  |  Location: 6.4541, 3.3947",
/// );
/// ```
pub fn ticker_text(now: NaiveDateTime, coords: Option<Coordinates>) -> String {
    let location = match coords {
        Some(coords) => coords.to_string(),
        None => "Unavailable".to_string(),
    };
    format!(
        "Date: {}  Time: {}  |  Location: {location}",
        now.format("%-m/%-d/%Y"),
        now.format("%-I:%M:%S %p"),
    )
}
