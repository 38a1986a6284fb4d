//! Web UI: a landing page charting user types across all cities, and a
//! query endpoint charting one city under month/day filters.
//!
//! The composite all-cities table is loaded once at startup and shared
//! read-only; per-query tables are loaded fresh and dropped afterward.

use anyhow::{Result, anyhow};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::chart::BarChart;
use crate::filters::{City, FilterSpec};
use crate::loader::{self, TripRecord};

#[derive(Clone)]
struct AppState {
    data_dir: Arc<PathBuf>,
    composite: Arc<Vec<TripRecord>>,
}

/// Loads the composite table and serves the UI until the process exits.
pub async fn run_server(host: &str, port: u16, data_dir: PathBuf) -> Result<()> {
    let mut composite = Vec::new();
    for city in City::ALL {
        let mut trips = loader::load_city(&data_dir, city)?;
        info!(city = city.title(), rows = trips.len(), "City data loaded");
        composite.append(&mut trips);
    }
    info!(rows = composite.len(), "Composite table ready");

    let state = AppState {
        data_dir: Arc::new(data_dir),
        composite: Arc::new(composite),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/stats", get(stats_page))
        .with_state(state);

    let bind = format!("{host}:{port}")
        .parse::<SocketAddr>()
        .map_err(|err| anyhow!("invalid bind address: {err}"))?;

    info!(address = %bind, "Bikeshare explorer listening");
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let chart = BarChart::user_types("User types across all cities", &state.composite);
    Html(render_page("US Bikeshare Explorer", &chart))
}

#[derive(Deserialize)]
struct StatsQuery {
    city: String,
    month: Option<String>,
    day: Option<String>,
}

async fn stats_page(State(state): State<AppState>, Query(query): Query<StatsQuery>) -> Response {
    let month = query.month.as_deref().unwrap_or("all");
    let day = query.day.as_deref().unwrap_or("all");

    // Validate against the enumerated sets before touching any file.
    let spec = match FilterSpec::new(&query.city, month, day) {
        Ok(spec) => spec,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    let trips = match loader::load_data(&state.data_dir, &spec) {
        Ok(trips) => trips,
        Err(err) => {
            error!(error = %err, city = spec.city.title(), "Failed to load city data");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to load city data".to_string(),
            )
                .into_response();
        }
    };

    let title = format!(
        "User types in {} (month: {month}, day: {day})",
        spec.city.title()
    );
    let chart = BarChart::user_types(title.clone(), &trips);
    Html(render_page(&title, &chart)).into_response()
}

fn render_page(heading: &str, chart: &BarChart) -> String {
    let payload = serde_json::to_string(chart).unwrap_or_else(|_| "null".to_string());
    PAGE_TEMPLATE
        .replace("{{heading}}", heading)
        .replace("{{chart}}", &payload)
}

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>US Bikeshare Explorer</title>
<style>
  body { font-family: sans-serif; margin: 2rem auto; max-width: 40rem; }
  .bar { background: #3573b9; color: white; padding: 2px 6px; margin: 4px 0; }
  form { margin-bottom: 1.5rem; }
</style>
</head>
<body>
<h1>{{heading}}</h1>
<form action="/stats" method="get">
  <select name="city">
    <option value="chicago">Chicago</option>
    <option value="new york">New York</option>
    <option value="washington">Washington</option>
  </select>
  <select name="month">
    <option value="all">All months</option>
    <option>january</option><option>february</option><option>march</option>
    <option>april</option><option>may</option><option>june</option>
  </select>
  <select name="day">
    <option value="all">All days</option>
    <option>sunday</option><option>monday</option><option>tuesday</option>
    <option>wednesday</option><option>thursday</option><option>friday</option>
    <option>saturday</option>
  </select>
  <button type="submit">Explore</button>
</form>
<div id="chart"></div>
<script>
  const chart = {{chart}};
  const root = document.getElementById("chart");
  if (!chart || chart.values.length === 0) {
    root.textContent = "No trips matched the selected filters.";
  } else {
    const max = Math.max(...chart.values);
    chart.labels.forEach((label, i) => {
      const row = document.createElement("div");
      const bar = document.createElement("div");
      bar.className = "bar";
      bar.style.width = (chart.values[i] / max * 100) + "%";
      bar.textContent = label + ": " + chart.values[i];
      row.appendChild(bar);
      root.appendChild(row);
    });
  }
</script>
</body>
</html>
"#;
