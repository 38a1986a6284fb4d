//! The four aggregation routines over a filtered set of trips.
//!
//! All routines are stateless and take the record slice produced by the
//! loader. The time/station/duration routines return `None` when no rows
//! matched the filters; user stats always return, with empty count tables.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use crate::filters::month_title;
use crate::loader::TripRecord;

/// Counts occurrences of each value, ordered by descending count.
/// Equal counts keep first-occurrence order, so results are deterministic
/// for a given input order.
pub fn frequency_table<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();

    for v in values {
        let count = counts.entry(v.clone()).or_insert(0);
        if *count == 0 {
            order.push(v);
        }
        *count += 1;
    }

    let mut table: Vec<(T, usize)> = order
        .into_iter()
        .map(|v| {
            let count = counts[&v];
            (v, count)
        })
        .collect();
    // Stable sort: ties stay in first-occurrence order.
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// Most frequent value, ties broken by the first-encountered one.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    frequency_table(values).into_iter().next().map(|(v, _)| v)
}

/// Formats a 0-23 hour on the 12-hour clock. Hours 0 and 12 both read "12".
pub fn clock_12h(hour: u32) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h} {period}")
}

/// Most frequent times of travel.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TimeStats {
    pub popular_month: String,
    pub popular_day: String,
    pub popular_hour: String,
}

pub fn time_stats(trips: &[TripRecord]) -> Option<TimeStats> {
    let month = mode(trips.iter().map(|t| t.month))?;
    let day = mode(trips.iter().map(|t| t.day_of_week.clone()))?;
    let hour = mode(trips.iter().map(|t| t.hour))?;

    Some(TimeStats {
        popular_month: month_title(month).unwrap_or_else(|| month.to_string()),
        popular_day: day,
        popular_hour: clock_12h(hour),
    })
}

/// Most popular stations and start-to-end combination.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start: String,
    pub popular_end: String,
    pub popular_trip: String,
}

pub fn station_stats(trips: &[TripRecord]) -> Option<StationStats> {
    let popular_start = mode(trips.iter().map(|t| t.start_station.clone()))?;
    let popular_end = mode(trips.iter().map(|t| t.end_station.clone()))?;
    let popular_trip = mode(
        trips
            .iter()
            .map(|t| format!("{} to {}", t.start_station, t.end_station)),
    )?;

    Some(StationStats {
        popular_start,
        popular_end,
        popular_trip,
    })
}

/// A duration broken into hours, minutes and seconds.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Decomposes a second count by integer division. Used for both the total
/// and the mean, so minutes and seconds never exceed 59.
pub fn hms(total_secs: u64) -> Hms {
    Hms {
        hours: total_secs / 3600,
        minutes: total_secs % 3600 / 60,
        seconds: total_secs % 60,
    }
}

/// Total and average trip duration.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DurationStats {
    pub total_secs: u64,
    pub mean_secs: u64,
    pub total: Hms,
    pub mean: Hms,
}

pub fn duration_stats(trips: &[TripRecord]) -> Option<DurationStats> {
    if trips.is_empty() {
        return None;
    }

    let total_secs: u64 = trips.iter().map(|t| t.duration_secs).sum();
    let mean_secs = (total_secs as f64 / trips.len() as f64).round() as u64;

    Some(DurationStats {
        total_secs,
        mean_secs,
        total: hms(total_secs),
        mean: hms(mean_secs),
    })
}

/// Earliest, most recent and most common birth year among riders.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics. `genders` and `birth_years` are `None` when the
/// city's dataset does not carry those columns.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(trips: &[TripRecord]) -> UserStats {
    let user_types = frequency_table(trips.iter().filter_map(|t| t.user_type.clone()));

    let genders = if trips.iter().any(|t| t.gender.is_some()) {
        Some(frequency_table(trips.iter().filter_map(|t| t.gender.clone())))
    } else {
        None
    };

    let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
    let birth_years = match (
        years.iter().copied().min(),
        years.iter().copied().max(),
        mode(years.iter().copied()),
    ) {
        (Some(earliest), Some(most_recent), Some(most_common)) => Some(BirthYearStats {
            earliest,
            most_recent,
            most_common,
        }),
        _ => None,
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn trip(start: &str, duration: u64, from: &str, to: &str) -> TripRecord {
        use chrono::{Datelike, Timelike};

        let start_time = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap();
        TripRecord {
            month: start_time.month(),
            day_of_week: start_time.format("%A").to_string(),
            hour: start_time.hour(),
            start_time,
            end_time: None,
            start_station: from.to_string(),
            end_station: to.to_string(),
            duration_secs: duration,
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode(vec!["a", "b", "b", "c"]), Some("b"));
    }

    #[test]
    fn test_mode_tie_breaks_on_first_occurrence() {
        // a and b both occur twice; a is seen first.
        assert_eq!(mode(vec!["a", "b", "b", "a"]), Some("a"));
        assert_eq!(mode(vec!["b", "a", "a", "b"]), Some("b"));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_frequency_table_orders_by_count_then_occurrence() {
        let table = frequency_table(vec!["x", "y", "y", "z", "x", "y"]);
        assert_eq!(table, vec![("y", 3), ("x", 2), ("z", 1)]);

        // Tied counts keep source order.
        let tied = frequency_table(vec!["x", "y", "x", "y"]);
        assert_eq!(tied, vec![("x", 2), ("y", 2)]);
    }

    #[test]
    fn test_clock_12h() {
        assert_eq!(clock_12h(0), "12 AM");
        assert_eq!(clock_12h(9), "9 AM");
        assert_eq!(clock_12h(12), "12 PM");
        assert_eq!(clock_12h(13), "1 PM");
        assert_eq!(clock_12h(23), "11 PM");
    }

    #[test]
    fn test_hms_decomposition() {
        assert_eq!(
            hms(3661),
            Hms {
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(
            hms(59),
            Hms {
                hours: 0,
                minutes: 0,
                seconds: 59
            }
        );
    }

    #[test]
    fn test_duration_stats_sum_and_mean() {
        let trips = vec![
            trip("2017-01-01 09:00:00", 10, "A", "B"),
            trip("2017-01-01 10:00:00", 20, "A", "B"),
            trip("2017-01-01 11:00:00", 30, "A", "B"),
        ];
        let stats = duration_stats(&trips).unwrap();
        assert_eq!(stats.total_secs, 60);
        assert_eq!(stats.mean_secs, 20);
        assert_eq!(
            stats.total,
            Hms {
                hours: 0,
                minutes: 1,
                seconds: 0
            }
        );
        assert_eq!(
            stats.mean,
            Hms {
                hours: 0,
                minutes: 0,
                seconds: 20
            }
        );
    }

    #[test]
    fn test_duration_stats_empty() {
        assert_eq!(duration_stats(&[]), None);
    }

    #[test]
    fn test_time_stats() {
        let trips = vec![
            trip("2017-01-01 09:00:00", 60, "A", "B"), // Sunday
            trip("2017-01-02 09:30:00", 60, "A", "B"), // Monday
            trip("2017-01-09 17:00:00", 60, "A", "B"), // Monday
            trip("2017-06-15 09:00:00", 60, "A", "B"), // Thursday
        ];
        let stats = time_stats(&trips).unwrap();
        assert_eq!(stats.popular_month, "January");
        assert_eq!(stats.popular_day, "Monday");
        assert_eq!(stats.popular_hour, "9 AM");
    }

    #[test]
    fn test_time_stats_empty() {
        assert_eq!(time_stats(&[]), None);
    }

    #[test]
    fn test_station_stats_tie_break() {
        // Two start stations tied at 2; the first one in source order wins.
        let trips = vec![
            trip("2017-01-01 09:00:00", 60, "A", "C"),
            trip("2017-01-01 09:00:00", 60, "B", "C"),
            trip("2017-01-01 09:00:00", 60, "B", "D"),
            trip("2017-01-01 09:00:00", 60, "A", "D"),
        ];
        let stats = station_stats(&trips).unwrap();
        assert_eq!(stats.popular_start, "A");
        assert_eq!(stats.popular_end, "C");
        assert_eq!(stats.popular_trip, "A to C");
    }

    #[test]
    fn test_user_stats_without_demographics() {
        let trips = vec![
            trip("2017-01-01 09:00:00", 60, "A", "B"),
            trip("2017-01-01 10:00:00", 60, "A", "B"),
        ];
        let stats = user_stats(&trips);
        assert_eq!(stats.user_types, vec![("Subscriber".to_string(), 2)]);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let mut a = trip("2017-01-01 09:00:00", 60, "A", "B");
        a.gender = Some("Male".to_string());
        a.birth_year = Some(1992);
        let mut b = trip("2017-01-01 10:00:00", 60, "A", "B");
        b.gender = Some("Female".to_string());
        b.birth_year = Some(1968);
        b.user_type = Some("Customer".to_string());
        let mut c = trip("2017-01-01 11:00:00", 60, "A", "B");
        c.gender = Some("Male".to_string());
        c.birth_year = Some(1992);

        let stats = user_stats(&[a, b, c]);
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert_eq!(
            stats.genders,
            Some(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: 1968,
                most_recent: 1992,
                most_common: 1992,
            })
        );
    }

    #[test]
    fn test_user_stats_empty() {
        let stats = user_stats(&[]);
        assert!(stats.user_types.is_empty());
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }
}
