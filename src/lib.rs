pub mod chart;
pub mod error;
pub mod filters;
pub mod loader;
pub mod report;
pub mod stats;
pub mod web;
