//! Interactive prompt loop for exploring the data from a terminal.

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use bikeshare_explorer::filters::{City, FilterSpec, parse_day, parse_month};
use bikeshare_explorer::loader::load_data;
use bikeshare_explorer::report;
use bikeshare_explorer::stats::{duration_stats, station_stats, time_stats, user_stats};

/// Runs load-and-report cycles until the user declines to restart.
pub fn run(data_dir: &Path) -> Result<()> {
    println!("Hello! Let's explore some US bikeshare data!");

    loop {
        let spec = get_filters()?;
        let trips = load_data(data_dir, &spec)?;

        print_section("Calculating The Most Popular Times of Travel...", || {
            report::time_report(time_stats(&trips).as_ref())
        });
        print_section("Calculating The Most Popular Stations and Trip...", || {
            report::station_report(station_stats(&trips).as_ref())
        });
        print_section("Calculating Trip Duration...", || {
            report::duration_report(duration_stats(&trips).as_ref())
        });
        print_section("Calculating User Stats...", || {
            report::user_report(&user_stats(&trips), spec.city)
        });

        let restart = ask("\nWould you like to restart? Enter yes or no.\n")?;
        if !restart.trim().eq_ignore_ascii_case("yes") {
            break;
        }
    }

    Ok(())
}

fn print_section(heading: &str, render: impl FnOnce() -> String) {
    println!("\n{heading}\n");
    let started = Instant::now();
    let body = render();
    println!("{body}");
    println!("\nThis took {:.6} seconds.", started.elapsed().as_secs_f64());
    println!("{}", "-".repeat(40));
}

/// Asks for city, then for at most one of month/day, re-prompting until
/// every answer is valid.
fn get_filters() -> Result<FilterSpec> {
    let city = loop {
        let answer = ask(
            "\nWould you like to see insights for:\n- Chicago\n- New York\n- Washington\n",
        )?;
        match City::parse(&answer) {
            Ok(city) => break city,
            Err(_) => println!("Please enter a valid city name"),
        }
    };

    let (month, day) = loop {
        let kind = ask("\nWould you like to filter the data by:\n- month\n- day\n- not at all?\n")?;
        match kind.trim().to_lowercase().as_str() {
            "month" => {
                let answer = ask(
                    "\nWhich month?\n- January\n- February\n- March\n- April\n- May\n- June\n",
                )?;
                match parse_month(&answer) {
                    Ok(month) => break (month, None),
                    Err(_) => println!("Please enter a valid month"),
                }
            }
            "day" => {
                let answer = ask(
                    "\nWhich day?\n- Monday\n- Tuesday\n- Wednesday\n- Thursday\n- Friday\n- Saturday\n- Sunday\n",
                )?;
                match parse_day(&answer) {
                    Ok(day) => break (None, day),
                    Err(_) => println!("Please enter a valid day"),
                }
            }
            "not at all" => break (None, None),
            _ => println!("Please answer month, day, or not at all"),
        }
    };

    let month_label = month
        .and_then(bikeshare_explorer::filters::month_title)
        .unwrap_or_else(|| "All".to_string());
    let day_label = day.clone().unwrap_or_else(|| "All".to_string());
    println!(
        "\nYou selected {}, {}, and {}.",
        city.title(),
        month_label,
        day_label
    );
    println!("{}", "-".repeat(40));

    Ok(FilterSpec { city, month, day })
}

fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer)
}
