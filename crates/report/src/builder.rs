use crate::error::ReportError;
use crate::model::{Cell, Chart, ChartSize, ReportModel, Section, Table};
use core_types::{
    ConstructorStandingRow, DriverStandingRow, ManufacturerWins, NationalityCount, RaceRow,
    SeasonConstructorRow,
};
use std::collections::{HashMap, HashSet};

/// Assembles the report of one season.
///
/// # Arguments
///
/// * `year` - The season, used in headings only.
/// * `races` - The season's races in calendar order.
/// * `constructors` - The season's constructors by final position.
/// * `standings` - The constructors' championship rows.
/// * `driver_standings` - The drivers' championship rows joined with their entries.
///
/// Empty inputs give a report with every section, table and chart present
/// but without rows or categories.
pub fn build_season_report(
    year: i32,
    races: &[RaceRow],
    constructors: &[SeasonConstructorRow],
    standings: &[ConstructorStandingRow],
    driver_standings: &[DriverStandingRow],
) -> Result<ReportModel, ReportError> {
    let names: HashMap<&str, &str> = constructors
        .iter()
        .map(|c| (c.constructor_id.as_str(), c.constructor_name.as_str()))
        .collect();

    let sections = vec![
        races_section(year, races)?,
        constructors_section(year, constructors, standings)?,
        constructor_standings_section(year, standings, &names)?,
        driver_standings_section(year, driver_standings)?,
    ];

    let report = ReportModel {
        title: None,
        sections,
    };
    tracing::debug!(
        year,
        tables = report.tables().count(),
        charts = report.charts().count(),
        "Season report built."
    );
    Ok(report)
}

/// Assembles the all-years statistics shown under every season.
pub fn build_global_stats_report(
    nationality_counts: &[NationalityCount],
    engine_wins: &[ManufacturerWins],
) -> Result<ReportModel, ReportError> {
    // I. Drivers per nationality
    let mut nationality = Section::new("Drivers Nationality");
    let mut table = Table::new("driver_nationality", &["Country", "Number of drivers"]);
    for count in nationality_counts {
        table.push_row(vec![
            Cell::from(count.country_name.as_str()),
            Cell::from(count.driver_count),
        ])?;
    }
    nationality.tables.push(table);

    let mut chart = Chart::new(
        "driver_nationality",
        "Drivers",
        "Country",
        "Number of drivers",
        ChartSize::ALL_YEARS,
        nationality_counts.iter().map(|c| c.country_name.clone()).collect(),
    );
    chart.add_series(
        "Number of drivers",
        nationality_counts.iter().map(|c| c.driver_count as f64).collect(),
    )?;
    nationality.charts.push(chart);

    // II. Wins per engine manufacturer
    let mut wins = Section::new("Engine Manufacturers Wins");
    let mut table = Table::new(
        "engine_manufacturer_wins",
        &["Number of wins", "Engine Manufacturer", "Country"],
    );
    for row in engine_wins {
        let country = row.country_name.as_deref().unwrap_or(&row.country_id);
        table.push_row(vec![
            Cell::from(row.wins),
            Cell::from(row.engine_manufacturer_name.as_str()),
            Cell::from(country),
        ])?;
    }
    wins.tables.push(table);

    let mut chart = Chart::new(
        "engine_manufacturer_wins",
        "Engine Manufacturers",
        "Manufacturer",
        "Number of wins",
        ChartSize::ALL_YEARS,
        engine_wins.iter().map(|w| w.engine_manufacturer_name.clone()).collect(),
    );
    chart.add_series(
        "Number of wins",
        engine_wins.iter().map(|w| w.wins as f64).collect(),
    )?;
    wins.charts.push(chart);

    Ok(ReportModel {
        title: Some("Other Statistics (All years)".to_string()),
        sections: vec![nationality, wins],
    })
}

fn races_section(year: i32, races: &[RaceRow]) -> Result<Section, ReportError> {
    let mut section = Section::new(format!("Formula 1 Standings {}", year));
    section.summary.push(format!("Number of races: {}", races.len()));

    let mut table = Table::new("races", &["Date", "Grand Prix", "Round"]);
    for race in races {
        table.push_row(vec![
            Cell::from(race.date),
            Cell::from(race.official_name.as_str()),
            Cell::from(race.round),
        ])?;
    }
    section.tables.push(table);
    Ok(section)
}

fn constructors_section(
    year: i32,
    constructors: &[SeasonConstructorRow],
    standings: &[ConstructorStandingRow],
) -> Result<Section, ReportError> {
    let mut section = Section::new(format!("Constructors {}", year));

    let mut table = Table::new(
        "constructors",
        &[
            "Pos",
            "Constructor",
            "Best Starting Grid Position",
            "Best Race Result",
            "Total Race Entries",
            "Total Race Starts",
            "Total Race Wins",
            "Total 1 and 2 Finishes",
            "Total Race Laps",
            "Total Podiums",
            "Total Podium Races",
            "Total Points",
            "Total Pole Positions",
            "Total Fastest Laps",
        ],
    );
    // Grid position and race result are raw ranks, shown as stored.
    for c in constructors {
        table.push_row(vec![
            Cell::from(c.position_number),
            Cell::from(c.constructor_full_name.as_str()),
            Cell::from(c.best_starting_grid_position),
            Cell::from(c.best_race_result),
            Cell::from(c.total_race_entries),
            Cell::from(c.total_race_starts),
            Cell::from(c.total_race_wins),
            Cell::from(c.total_1_and_2_finishes),
            Cell::from(c.total_race_laps),
            Cell::from(c.total_podiums),
            Cell::from(c.total_podium_races),
            Cell::from(c.total_points),
            Cell::from(c.total_pole_positions),
            Cell::from(c.total_fastest_laps),
        ])?;
    }
    section.tables.push(table);

    section.charts.push(constructor_points_chart(constructors, standings)?);

    let mut podiums = Chart::new(
        "constructors_podiums",
        "Constructors",
        "Position",
        "Total",
        ChartSize::STANDINGS,
        constructors.iter().map(|c| c.constructor_name.clone()).collect(),
    );
    podiums.add_series(
        "Total Podiums",
        constructors.iter().map(|c| c.total_podiums as f64).collect(),
    )?;
    podiums.add_series(
        "Total Race Wins",
        constructors.iter().map(|c| c.total_race_wins as f64).collect(),
    )?;
    section.charts.push(podiums);

    Ok(section)
}

/// Championship points per constructor, in final-position order.
///
/// Categories come from the constructors list and values from the standings;
/// the two are joined on `constructor_id` rather than zipped, since the two
/// queries order their rows independently. A constructor with several
/// standings rows (one per engine) gets the sum. Constructors without a
/// standings row are left out; standings rows whose constructor is not in the
/// list are appended under their id.
fn constructor_points_chart(
    constructors: &[SeasonConstructorRow],
    standings: &[ConstructorStandingRow],
) -> Result<Chart, ReportError> {
    let mut points: HashMap<&str, f64> = HashMap::new();
    let mut standings_order: Vec<&str> = Vec::new();
    for row in standings {
        let id = row.constructor_id.as_str();
        if !points.contains_key(id) {
            standings_order.push(id);
        }
        *points.entry(id).or_insert(0.0) += row.points;
    }

    let mut labels = Vec::new();
    let mut values = Vec::new();
    let mut placed: HashSet<&str> = HashSet::new();
    for c in constructors {
        let id = c.constructor_id.as_str();
        if let Some(p) = points.get(id) {
            if placed.insert(id) {
                labels.push(c.constructor_name.clone());
                values.push(*p);
            }
        }
    }
    for id in standings_order {
        if placed.insert(id) {
            labels.push(id.to_string());
            values.push(points.get(id).copied().unwrap_or_default());
        }
    }

    let mut chart = Chart::new(
        "constructors_points",
        "Constructors",
        "Position",
        "Points",
        ChartSize::STANDINGS,
        labels,
    );
    chart.add_series("Points", values)?;
    Ok(chart)
}

fn constructor_standings_section(
    year: i32,
    standings: &[ConstructorStandingRow],
    names: &HashMap<&str, &str>,
) -> Result<Section, ReportError> {
    let mut section = Section::new(format!("Constructors Standing {}", year));
    let mut table = Table::new(
        "constructor_standings",
        &["Pos", "Constructor", "Engine Manufacturer", "Points"],
    );
    for row in standings {
        let name = names
            .get(row.constructor_id.as_str())
            .copied()
            .unwrap_or(row.constructor_id.as_str());
        table.push_row(vec![
            Cell::from(row.position_number),
            Cell::from(name),
            Cell::from(row.engine_manufacturer_name.as_str()),
            Cell::from(row.points),
        ])?;
    }
    section.tables.push(table);
    Ok(section)
}

fn driver_standings_section(
    year: i32,
    driver_standings: &[DriverStandingRow],
) -> Result<Section, ReportError> {
    let mut section = Section::new(format!("Drivers Standing {}", year));
    let mut table = Table::new(
        "driver_standings",
        &["Pos", "Driver", "Points", "Team", "Engine Manufacturer"],
    );
    for row in driver_standings {
        table.push_row(vec![
            Cell::from(row.position_number),
            Cell::from(row.driver_name.as_str()),
            Cell::from(row.points),
            Cell::from(row.constructor_name.as_str()),
            Cell::from(row.engine_manufacturer_name.as_str()),
        ])?;
    }
    section.tables.push(table);

    // A driver entered by two teams has two table rows but one bar.
    let mut seen: HashSet<&str> = HashSet::new();
    let (labels, values): (Vec<String>, Vec<f64>) = driver_standings
        .iter()
        .filter(|row| seen.insert(row.driver_id.as_str()))
        .map(|row| (row.driver_name.clone(), row.points))
        .unzip();

    let mut chart = Chart::new(
        "drivers_points",
        "Drivers",
        "Position",
        "Points",
        ChartSize::STANDINGS,
        labels,
    );
    chart.add_series("Points", values)?;
    section.charts.push(chart);
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn race(id: i64, round: i32, date: (i32, u32, u32)) -> RaceRow {
        RaceRow {
            id,
            year: date.0,
            round,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            official_name: format!("Grand Prix {}", round),
            circuit_id: "circuit".to_string(),
        }
    }

    fn constructor(id: &str, name: &str, position: Option<i32>, podiums: i64) -> SeasonConstructorRow {
        SeasonConstructorRow {
            year: 2021,
            constructor_id: id.to_string(),
            constructor_name: name.to_string(),
            constructor_full_name: format!("{} Racing", name),
            position_number: position,
            best_starting_grid_position: Some(1),
            best_race_result: Some(1),
            total_race_entries: 2,
            total_race_starts: 2,
            total_race_wins: 1,
            total_1_and_2_finishes: 0,
            total_race_laps: 100,
            total_podiums: podiums,
            total_podium_races: podiums,
            total_points: 0.0,
            total_pole_positions: 0,
            total_fastest_laps: 0,
        }
    }

    fn standing(order: i32, id: &str, engine: &str, points: f64) -> ConstructorStandingRow {
        ConstructorStandingRow {
            year: 2021,
            position_display_order: order,
            position_number: Some(order),
            constructor_id: id.to_string(),
            engine_manufacturer_id: engine.to_lowercase(),
            engine_manufacturer_name: engine.to_string(),
            points,
        }
    }

    fn driver(order: i32, id: &str, team: &str, points: f64) -> DriverStandingRow {
        DriverStandingRow {
            year: 2021,
            position_display_order: order,
            position_number: Some(order),
            driver_id: id.to_string(),
            driver_name: format!("Driver {}", id),
            points,
            entrant_id: format!("{}-team", team),
            constructor_id: team.to_lowercase(),
            constructor_name: team.to_string(),
            engine_manufacturer_id: "mercedes".to_string(),
            engine_manufacturer_name: "Mercedes".to_string(),
        }
    }

    fn assert_aligned(report: &ReportModel) {
        for chart in report.charts() {
            for series in &chart.series {
                assert_eq!(chart.x_labels.len(), series.values.len(), "chart {}", chart.name);
            }
        }
    }

    #[test]
    fn two_constructor_season() {
        let races = vec![race(2, 1, (2021, 3, 28)), race(1, 2, (2021, 4, 18))];
        let constructors = vec![constructor("a", "A", Some(1), 4), constructor("b", "B", Some(2), 3)];
        let standings = vec![standing(1, "a", "Mercedes", 400.0), standing(2, "b", "Ferrari", 300.0)];

        let report = build_season_report(2021, &races, &constructors, &standings, &[]).unwrap();

        assert_eq!(report.sections[0].heading, "Formula 1 Standings 2021");
        assert_eq!(report.sections[0].summary, vec!["Number of races: 2"]);
        let race_dates: Vec<String> = report
            .table("races")
            .unwrap()
            .rows
            .iter()
            .map(|r| r[0].to_string())
            .collect();
        assert_eq!(race_dates, vec!["2021-03-28", "2021-04-18"]);

        let table = report.table("constructors").unwrap();
        assert_eq!(table.rows[0][1], Cell::from("A Racing"));
        assert_eq!(table.rows[1][1], Cell::from("B Racing"));

        let chart = report.chart("constructors_points").unwrap();
        assert_eq!(chart.x_labels, vec!["A", "B"]);
        assert_eq!(chart.series[0].name, "Points");
        assert_eq!(chart.series[0].values, vec![400.0, 300.0]);
        assert_aligned(&report);
    }

    #[test]
    fn points_are_joined_by_constructor_not_by_row_order() {
        let constructors = vec![constructor("a", "A", Some(1), 4), constructor("b", "B", Some(2), 3)];
        // Standings deliberately listed in the opposite order.
        let standings = vec![standing(2, "b", "Ferrari", 300.0), standing(1, "a", "Mercedes", 400.0)];

        let report = build_season_report(2021, &[], &constructors, &standings, &[]).unwrap();
        let chart = report.chart("constructors_points").unwrap();
        assert_eq!(chart.x_labels, vec!["A", "B"]);
        assert_eq!(chart.series[0].values, vec![400.0, 300.0]);
    }

    #[test]
    fn multi_engine_constructor_points_are_summed() {
        let constructors = vec![constructor("a", "A", Some(1), 4), constructor("c", "C", None, 0)];
        let standings = vec![
            standing(1, "a", "Climax", 30.0),
            standing(2, "ghost", "Maserati", 10.0),
            standing(3, "a", "Maserati", 6.0),
        ];

        let report = build_season_report(1960, &[], &constructors, &standings, &[]).unwrap();
        let chart = report.chart("constructors_points").unwrap();
        // C has no standings row; "ghost" is not in the constructors list.
        assert_eq!(chart.x_labels, vec!["A", "ghost"]);
        assert_eq!(chart.series[0].values, vec![36.0, 10.0]);

        let table = report.table("constructor_standings").unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1][1], Cell::from("ghost"));
        assert_eq!(table.rows[2][1], Cell::from("A"));
    }

    #[test]
    fn podium_chart_has_two_aligned_series() {
        let constructors = vec![constructor("a", "A", Some(1), 4), constructor("b", "B", Some(2), 3)];
        let report = build_season_report(2021, &[], &constructors, &[], &[]).unwrap();
        let chart = report.chart("constructors_podiums").unwrap();
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Total Podiums", "Total Race Wins"]);
        assert_eq!(chart.series[0].values, vec![4.0, 3.0]);
        assert_aligned(&report);
    }

    #[test]
    fn driver_with_two_entries_gets_one_bar() {
        let drivers = vec![
            driver(1, "d1", "A", 250.0),
            driver(2, "d2", "A", 200.0),
            driver(2, "d2", "B", 200.0),
        ];
        let report = build_season_report(2021, &[], &[], &[], &drivers).unwrap();

        assert_eq!(report.table("driver_standings").unwrap().rows.len(), 3);
        let chart = report.chart("drivers_points").unwrap();
        assert_eq!(chart.x_labels, vec!["Driver d1", "Driver d2"]);
        assert_eq!(chart.series[0].values, vec![250.0, 200.0]);
    }

    #[test]
    fn empty_season_keeps_its_structure() {
        let report = build_season_report(1955, &[], &[], &[], &[]).unwrap();
        assert_eq!(report.sections.len(), 4);
        assert!(report.tables().all(|t| t.is_empty()));
        assert!(report.charts().all(|c| c.is_empty()));
        assert_eq!(report.sections[0].summary, vec!["Number of races: 0"]);
        report.validate().unwrap();
    }

    #[test]
    fn global_stats_report() {
        let nationality = vec![
            NationalityCount {
                country_id: "united-kingdom".to_string(),
                country_name: "United Kingdom".to_string(),
                driver_count: 166,
            },
            NationalityCount {
                country_id: "united-states-of-america".to_string(),
                country_name: "United States".to_string(),
                driver_count: 161,
            },
        ];
        let wins = vec![ManufacturerWins {
            engine_manufacturer_id: "ferrari".to_string(),
            engine_manufacturer_name: "Ferrari".to_string(),
            country_id: "italy".to_string(),
            country_name: None,
            wins: 249,
        }];

        let report = build_global_stats_report(&nationality, &wins).unwrap();
        assert_eq!(report.title.as_deref(), Some("Other Statistics (All years)"));

        let chart = report.chart("driver_nationality").unwrap();
        assert_eq!(chart.x_labels, vec!["United Kingdom", "United States"]);
        assert_eq!(chart.series[0].values, vec![166.0, 161.0]);
        assert_eq!(chart.size, ChartSize::ALL_YEARS);

        let table = report.table("engine_manufacturer_wins").unwrap();
        // Unresolved country names fall back to the id.
        assert_eq!(
            table.rows[0],
            vec![Cell::from(249_i64), Cell::from("Ferrari"), Cell::from("italy")]
        );
        assert_aligned(&report);
    }

    #[test]
    fn building_twice_is_identical() {
        let constructors = vec![constructor("a", "A", Some(1), 4), constructor("b", "B", Some(2), 3)];
        let standings = vec![standing(1, "a", "Mercedes", 400.0), standing(2, "b", "Ferrari", 300.0)];
        let first = build_season_report(2021, &[], &constructors, &standings, &[]).unwrap();
        let second = build_season_report(2021, &[], &constructors, &standings, &[]).unwrap();
        assert_eq!(first, second);
    }
}
