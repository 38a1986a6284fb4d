//! Human-readable rendering of the stat summaries for the CLI surfaces.

use std::fmt::Write;

use crate::filters::City;
use crate::stats::{DurationStats, Hms, StationStats, TimeStats, UserStats};

const NO_DATA: &str = "No trips matched the selected filters.";

pub fn time_report(stats: Option<&TimeStats>) -> String {
    let Some(s) = stats else {
        return NO_DATA.to_string();
    };
    format!(
        "Most Common Month: {}\nMost Common Day of the Week: {}\nMost Common Start Hour: {}",
        s.popular_month, s.popular_day, s.popular_hour
    )
}

pub fn station_report(stats: Option<&StationStats>) -> String {
    let Some(s) = stats else {
        return NO_DATA.to_string();
    };
    format!(
        "Most Common Start Station: {}\nMost Common End Station: {}\nMost Common Trip from Start to End: {}",
        s.popular_start, s.popular_end, s.popular_trip
    )
}

fn spell_out(hms: Hms) -> String {
    format!(
        "{} Hours, {} Minutes, and {} Seconds",
        hms.hours, hms.minutes, hms.seconds
    )
}

pub fn duration_report(stats: Option<&DurationStats>) -> String {
    let Some(s) = stats else {
        return NO_DATA.to_string();
    };
    format!(
        "Total Travel Time: {}.\nAverage Travel Time: {}.",
        spell_out(s.total),
        spell_out(s.mean)
    )
}

pub fn user_report(stats: &UserStats, city: City) -> String {
    let mut out = String::new();

    out.push_str("Counts of Each User Type:\n");
    for (user_type, count) in &stats.user_types {
        let _ = writeln!(out, "  {user_type}: {count}");
    }
    if stats.user_types.is_empty() {
        out.push_str("  (none)\n");
    }

    match &stats.genders {
        Some(genders) => {
            out.push_str("Counts of Each User Gender:\n");
            for (gender, count) in genders {
                let _ = writeln!(out, "  {gender}: {count}");
            }
        }
        None => {
            let _ = writeln!(out, "No gender data available for {}.", city.title());
        }
    }

    match &stats.birth_years {
        Some(years) => {
            let _ = writeln!(out, "Oldest User(s) Birth Year: {}", years.earliest);
            let _ = writeln!(out, "Youngest User(s) Birth Year: {}", years.most_recent);
            let _ = write!(out, "Most Common Birth Year: {}", years.most_common);
        }
        None => {
            let _ = write!(out, "No birth year data available for {}.", city.title());
        }
    }

    out
}
