//! Typed records for every query shape the dashboard reads.
//!
//! Each struct is one row of one query, decoded with `sqlx::FromRow`. Field
//! names match the column aliases used in the `database` crate's SQL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `season` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SeasonRow {
    pub year: i32,
}

/// One race of a season.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RaceRow {
    pub id: i64,
    pub year: i32,
    pub round: i32,
    pub date: NaiveDate,
    pub official_name: String,
    pub circuit_id: String,
}

/// A constructor's season summary (`season_constructor`) joined with the
/// constructor's display names.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SeasonConstructorRow {
    pub year: i32,
    pub constructor_id: String,
    pub constructor_name: String,
    pub constructor_full_name: String,
    /// Final championship position; `None` when unclassified.
    pub position_number: Option<i32>,
    pub best_starting_grid_position: Option<i32>,
    pub best_race_result: Option<i32>,
    pub total_race_entries: i64,
    pub total_race_starts: i64,
    pub total_race_wins: i64,
    pub total_1_and_2_finishes: i64,
    pub total_race_laps: i64,
    pub total_podiums: i64,
    pub total_podium_races: i64,
    pub total_points: f64,
    pub total_pole_positions: i64,
    pub total_fastest_laps: i64,
}

/// A classified row of the season's constructors' championship.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ConstructorStandingRow {
    pub year: i32,
    pub position_display_order: i32,
    pub position_number: Option<i32>,
    pub constructor_id: String,
    pub engine_manufacturer_id: String,
    pub engine_manufacturer_name: String,
    pub points: f64,
}

/// A drivers' championship row joined with the team and engine the driver
/// was entered with that season.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct DriverStandingRow {
    pub year: i32,
    pub position_display_order: i32,
    pub position_number: Option<i32>,
    pub driver_id: String,
    pub driver_name: String,
    pub points: f64,
    pub entrant_id: String,
    pub constructor_id: String,
    pub constructor_name: String,
    pub engine_manufacturer_id: String,
    pub engine_manufacturer_name: String,
}

/// Number of drivers sharing one nationality, across all seasons.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct NationalityCount {
    pub country_id: String,
    pub country_name: String,
    pub driver_count: i64,
}

/// Number of race wins attributed to one engine manufacturer, across all seasons.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ManufacturerWins {
    pub engine_manufacturer_id: String,
    pub engine_manufacturer_name: String,
    pub country_id: String,
    pub country_name: Option<String>,
    pub wins: i64,
}
