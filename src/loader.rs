//! CSV loading for city trip data.
//!
//! Each city has one CSV file. Rows are parsed into [`TripRecord`]s with
//! the calendar fields (month, day of week, hour) derived from the start
//! timestamp once at load time, then filtered by the [`FilterSpec`].

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::filters::{City, FilterSpec};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single row as it appears in the source CSV files.
///
/// Gender and Birth Year columns only exist in some cities, and even
/// where present individual cells may be empty; both cases map to `None`.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: u64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // Written as floats in the source data ("1992.0").
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// One trip with its derived calendar fields populated.
#[derive(Debug, Clone)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    pub duration_secs: u64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // Derived from start_time, invariant under re-filtering.
    pub month: u32,
    pub day_of_week: String,
    pub hour: u32,
}

impl TripRecord {
    fn from_raw(raw: RawTrip, row: usize) -> Result<Self> {
        let start_time = NaiveDateTime::parse_from_str(&raw.start_time, TIMESTAMP_FORMAT)
            .map_err(|_| BikeshareError::Timestamp {
                row,
                value: raw.start_time.clone(),
            })?;
        let end_time = raw
            .end_time
            .map(|value| {
                NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
                    .map_err(|_| BikeshareError::Timestamp { row, value })
            })
            .transpose()?;

        Ok(TripRecord {
            month: start_time.month(),
            day_of_week: start_time.format("%A").to_string(),
            hour: start_time.hour(),
            start_time,
            end_time,
            start_station: raw.start_station,
            end_station: raw.end_station,
            duration_secs: raw.trip_duration,
            user_type: raw.user_type,
            gender: raw.gender,
            birth_year: raw.birth_year.map(|y| y as i32),
        })
    }
}

/// Reads trip records from any CSV source, preserving row order.
pub fn read_trips<R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let raw: RawTrip = result?;
        // Row numbers are 1-based and include the header line.
        trips.push(TripRecord::from_raw(raw, i + 2)?);
    }

    Ok(trips)
}

/// Loads every trip for a city, unfiltered.
pub fn load_city(data_dir: &Path, city: City) -> Result<Vec<TripRecord>> {
    let path = data_dir.join(city.file_name());
    debug!(path = %path.display(), "Loading city CSV");

    let file = File::open(&path).map_err(|source| BikeshareError::FileRead { path, source })?;
    read_trips(file)
}

/// Loads a city's trips and applies the month/day filters.
///
/// Filtering is a pure selection: output rows keep the source file order.
pub fn load_data(data_dir: &Path, spec: &FilterSpec) -> Result<Vec<TripRecord>> {
    let mut trips = load_city(data_dir, spec.city)?;
    let loaded = trips.len();

    if let Some(month) = spec.month {
        trips.retain(|t| t.month == month);
    }
    if let Some(day) = &spec.day {
        trips.retain(|t| t.day_of_week == *day);
    }

    debug!(
        city = spec.city.title(),
        loaded,
        matched = trips.len(),
        "City data filtered"
    );
    Ok(trips)
}
