//! Fixed city/month/day enumerations and the filter value type.

use crate::error::{BikeshareError, Result};

/// Cities we have trip data for, in lowercase as users type them.
pub const CITIES: &[&str] = &["chicago", "new york", "washington"];

/// Months covered by the datasets. The source files only span
/// January through June, so anything else is invalid input.
pub const MONTHS: &[&str] = &["january", "february", "march", "april", "may", "june"];

/// Days of the week, in lowercase as users type them.
pub const DAYS: &[&str] = &[
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Parses a user-supplied city name, case-insensitively.
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            other => Err(BikeshareError::InvalidCity(other.to_string())),
        }
    }

    /// CSV file name for this city inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Display name.
    pub fn title(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }
}

/// Which trip records to consider: a city plus optional month and day
/// filters (`None` means "all").
///
/// The interactive shell activates at most one of month/day; the web
/// query endpoint may activate both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: Option<u32>,
    pub day: Option<String>,
}

impl FilterSpec {
    /// Validates the three user-supplied values and builds a spec.
    /// All validation happens here, before any file is touched.
    pub fn new(city: &str, month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            city: City::parse(city)?,
            month: parse_month(month)?,
            day: parse_day(day)?,
        })
    }

    pub fn unfiltered(city: City) -> Self {
        Self {
            city,
            month: None,
            day: None,
        }
    }
}

/// Parses a month name into its 1-based number, or `None` for "all".
pub fn parse_month(input: &str) -> Result<Option<u32>> {
    let m = input.trim().to_lowercase();
    if m == "all" {
        return Ok(None);
    }
    MONTHS
        .iter()
        .position(|&name| name == m)
        .map(|i| Some(i as u32 + 1))
        .ok_or(BikeshareError::InvalidMonth(m))
}

/// Parses a day name into its display form ("Monday"), or `None` for "all".
pub fn parse_day(input: &str) -> Result<Option<String>> {
    let d = input.trim().to_lowercase();
    if d == "all" {
        return Ok(None);
    }
    DAYS.iter()
        .find(|&&name| name == d)
        .map(|&name| Some(title_case(name)))
        .ok_or(BikeshareError::InvalidDay(d))
}

/// Display name for a 1-based month number, if it is in the dataset range.
pub fn month_title(month: u32) -> Option<String> {
    MONTHS
        .get(month.checked_sub(1)? as usize)
        .map(|&name| title_case(name))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
