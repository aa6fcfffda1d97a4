//! A small results store for tests.
//!
//! The schema is the subset of the production store the dashboard reads. The
//! sample rows cover three seasons:
//!
//! - 2021: two races inserted out of calendar order, constructors A (1st,
//!   400 pts) and B (2nd, 300 pts) plus an unclassified C, four classified
//!   drivers.
//! - 2022: driver `d5` has a standings row but no entrant row.
//! - 2020: one win with an engine entry (Renault) and one without (Ferrari).

use crate::{DbError, DbRepository};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub const SCHEMA: &str = r#"
CREATE TABLE season (year INTEGER PRIMARY KEY);

CREATE TABLE country (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    continent_id TEXT NOT NULL
);

CREATE TABLE race (
    id INTEGER PRIMARY KEY,
    year INTEGER NOT NULL REFERENCES season (year),
    round INTEGER NOT NULL,
    date DATE NOT NULL,
    official_name TEXT NOT NULL,
    circuit_id TEXT NOT NULL
);

CREATE TABLE constructor (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    full_name TEXT NOT NULL,
    country_id TEXT NOT NULL REFERENCES country (id)
);

CREATE TABLE season_constructor (
    year INTEGER NOT NULL,
    constructor_id TEXT NOT NULL REFERENCES constructor (id),
    position_number INTEGER,
    best_starting_grid_position INTEGER,
    best_race_result INTEGER,
    total_race_entries INTEGER NOT NULL,
    total_race_starts INTEGER NOT NULL,
    total_race_wins INTEGER NOT NULL,
    total_1_and_2_finishes INTEGER NOT NULL,
    total_race_laps INTEGER NOT NULL,
    total_podiums INTEGER NOT NULL,
    total_podium_races INTEGER NOT NULL,
    total_points DECIMAL(8,2) NOT NULL,
    total_pole_positions INTEGER NOT NULL,
    total_fastest_laps INTEGER NOT NULL,
    PRIMARY KEY (year, constructor_id)
);

CREATE TABLE engine_manufacturer (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    country_id TEXT NOT NULL
);

CREATE TABLE engine (
    id TEXT PRIMARY KEY,
    engine_manufacturer_id TEXT NOT NULL REFERENCES engine_manufacturer (id),
    name TEXT NOT NULL,
    full_name TEXT NOT NULL
);

CREATE TABLE season_constructor_standing (
    year INTEGER NOT NULL,
    position_display_order INTEGER NOT NULL,
    position_number INTEGER,
    constructor_id TEXT NOT NULL,
    engine_manufacturer_id TEXT NOT NULL,
    points DECIMAL(8,2) NOT NULL,
    PRIMARY KEY (year, position_display_order)
);

CREATE TABLE driver (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    nationality_country_id TEXT NOT NULL
);

CREATE TABLE season_driver_standing (
    year INTEGER NOT NULL,
    position_display_order INTEGER NOT NULL,
    position_number INTEGER,
    driver_id TEXT NOT NULL,
    points DECIMAL(8,2) NOT NULL,
    PRIMARY KEY (year, position_display_order)
);

CREATE TABLE season_entrant_driver (
    year INTEGER NOT NULL,
    entrant_id TEXT NOT NULL,
    constructor_id TEXT NOT NULL,
    engine_manufacturer_id TEXT NOT NULL,
    driver_id TEXT NOT NULL,
    PRIMARY KEY (year, entrant_id, constructor_id, engine_manufacturer_id, driver_id)
);

CREATE TABLE season_entrant_engine (
    year INTEGER NOT NULL,
    entrant_id TEXT NOT NULL,
    constructor_id TEXT NOT NULL,
    engine_manufacturer_id TEXT NOT NULL,
    engine_id TEXT NOT NULL,
    PRIMARY KEY (year, entrant_id, constructor_id, engine_manufacturer_id, engine_id)
);

CREATE TABLE race_data (
    race_id INTEGER NOT NULL REFERENCES race (id),
    type TEXT NOT NULL,
    position_display_order INTEGER NOT NULL,
    position_number INTEGER,
    driver_id TEXT NOT NULL,
    constructor_id TEXT NOT NULL,
    engine_manufacturer_id TEXT NOT NULL,
    PRIMARY KEY (race_id, type, position_display_order)
);
"#;

pub const SAMPLE_DATA: &str = r#"
INSERT INTO season (year) VALUES (2020), (2021), (2022);

INSERT INTO country (id, name, continent_id) VALUES
    ('united-kingdom', 'United Kingdom', 'europe'),
    ('spain', 'Spain', 'europe'),
    ('monaco', 'Monaco', 'europe'),
    ('germany', 'Germany', 'europe'),
    ('italy', 'Italy', 'europe'),
    ('france', 'France', 'europe');

INSERT INTO race (id, year, round, date, official_name, circuit_id) VALUES
    (1, 2021, 2, '2021-04-18', 'Formula 1 Emilia Romagna Grand Prix 2021', 'imola'),
    (2, 2021, 1, '2021-03-28', 'Formula 1 Gulf Air Bahrain Grand Prix 2021', 'bahrain'),
    (3, 2022, 1, '2022-03-20', 'Formula 1 Bahrain Grand Prix 2022', 'bahrain'),
    (4, 2020, 1, '2020-07-05', 'Formula 1 Austrian Grand Prix 2020', 'spielberg'),
    (5, 2020, 2, '2020-07-12', 'Formula 1 Styrian Grand Prix 2020', 'spielberg');

INSERT INTO constructor (id, name, full_name, country_id) VALUES
    ('alpha', 'A', 'Alpha Racing', 'united-kingdom'),
    ('bravo', 'B', 'Bravo Grand Prix', 'italy'),
    ('charlie', 'C', 'Charlie Motorsport', 'germany');

INSERT INTO season_constructor (
    year, constructor_id, position_number, best_starting_grid_position, best_race_result,
    total_race_entries, total_race_starts, total_race_wins, total_1_and_2_finishes, total_race_laps,
    total_podiums, total_podium_races, total_points, total_pole_positions, total_fastest_laps
) VALUES
    (2021, 'charlie', NULL, 14, 11, 4, 4, 0, 0, 210, 0, 0, 0, 0, 0),
    (2021, 'bravo', 2, 1, 1, 4, 4, 1, 0, 228, 3, 2, 300, 1, 1),
    (2021, 'alpha', 1, 1, 1, 4, 4, 1, 1, 230, 4, 2, 400, 1, 1),
    (2022, 'alpha', 1, 1, 1, 2, 2, 1, 0, 114, 1, 1, 350, 1, 0),
    (2020, 'charlie', 1, 2, 1, 4, 4, 1, 0, 280, 2, 2, 100, 0, 1);

INSERT INTO engine_manufacturer (id, name, country_id) VALUES
    ('mercedes', 'Mercedes', 'germany'),
    ('ferrari', 'Ferrari', 'italy'),
    ('renault', 'Renault', 'france');

INSERT INTO engine (id, engine_manufacturer_id, name, full_name) VALUES
    ('mercedes-m12', 'mercedes', 'M12', 'Mercedes M12 E Performance'),
    ('ferrari-065', 'ferrari', '065', 'Ferrari 065/6'),
    ('renault-e-tech-20', 'renault', 'E-Tech 20', 'Renault E-Tech 20');

INSERT INTO season_constructor_standing (year, position_display_order, position_number, constructor_id, engine_manufacturer_id, points) VALUES
    (2021, 2, 2, 'bravo', 'ferrari', 300),
    (2021, 1, 1, 'alpha', 'mercedes', 400),
    (2022, 1, 1, 'alpha', 'mercedes', 350),
    (2020, 1, 1, 'charlie', 'renault', 100);

INSERT INTO driver (id, name, nationality_country_id) VALUES
    ('d1', 'Lewis Driver', 'united-kingdom'),
    ('d2', 'George Driver', 'united-kingdom'),
    ('d3', 'Charles Driver', 'monaco'),
    ('d4', 'Carlos Driver', 'spain'),
    ('d5', 'Fernando Driver', 'spain'),
    ('d6', 'Sebastian Driver', 'germany');

INSERT INTO season_driver_standing (year, position_display_order, position_number, driver_id, points) VALUES
    (2021, 1, 1, 'd1', 250),
    (2021, 2, 2, 'd3', 200),
    (2021, 3, 3, 'd2', 150),
    (2021, 4, 4, 'd4', 100.5),
    (2022, 1, 1, 'd1', 300),
    (2022, 2, 2, 'd5', 120),
    (2022, 3, 3, 'd2', 50),
    (2020, 1, 1, 'd6', 25);

INSERT INTO season_entrant_driver (year, entrant_id, constructor_id, engine_manufacturer_id, driver_id) VALUES
    (2021, 'alpha-team', 'alpha', 'mercedes', 'd1'),
    (2021, 'alpha-team', 'alpha', 'mercedes', 'd2'),
    (2021, 'bravo-team', 'bravo', 'ferrari', 'd3'),
    (2021, 'bravo-team', 'bravo', 'ferrari', 'd4'),
    (2022, 'alpha-team', 'alpha', 'mercedes', 'd1'),
    (2022, 'alpha-team', 'alpha', 'mercedes', 'd2'),
    (2020, 'charlie-team', 'charlie', 'renault', 'd6');

INSERT INTO season_entrant_engine (year, entrant_id, constructor_id, engine_manufacturer_id, engine_id) VALUES
    (2021, 'alpha-team', 'alpha', 'mercedes', 'mercedes-m12'),
    (2021, 'alpha-junior', 'alpha', 'mercedes', 'mercedes-m12'),
    (2021, 'bravo-team', 'bravo', 'ferrari', 'ferrari-065'),
    (2022, 'alpha-team', 'alpha', 'mercedes', 'mercedes-m12'),
    (2020, 'charlie-team', 'charlie', 'renault', 'renault-e-tech-20');

INSERT INTO race_data (race_id, type, position_display_order, position_number, driver_id, constructor_id, engine_manufacturer_id) VALUES
    (1, 'RACE_RESULT', 1, 1, 'd1', 'alpha', 'mercedes'),
    (1, 'RACE_RESULT', 2, 2, 'd3', 'bravo', 'ferrari'),
    (1, 'QUALIFYING_RESULT', 1, 1, 'd3', 'bravo', 'ferrari'),
    (2, 'RACE_RESULT', 1, 1, 'd3', 'bravo', 'ferrari'),
    (2, 'RACE_RESULT', 2, 2, 'd1', 'alpha', 'mercedes'),
    (3, 'RACE_RESULT', 1, 1, 'd1', 'alpha', 'mercedes'),
    (4, 'RACE_RESULT', 1, 1, 'd6', 'charlie', 'renault'),
    (5, 'RACE_RESULT', 1, 1, 'd5', 'bravo', 'ferrari');
"#;

/// A single-connection in-memory pool. The database lives as long as the
/// pool's one connection, so it is never reaped.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

pub async fn seed_sample_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SAMPLE_DATA).execute(pool).await?;
    Ok(())
}

/// A repository over the schema with no rows at all.
pub async fn empty_repository() -> Result<DbRepository, DbError> {
    let pool = memory_pool().await?;
    create_schema(&pool).await?;
    Ok(DbRepository::new(pool))
}

/// A repository over the sample seasons.
pub async fn sample_repository() -> Result<DbRepository, DbError> {
    let pool = memory_pool().await?;
    create_schema(&pool).await?;
    seed_sample_data(&pool).await?;
    Ok(DbRepository::new(pool))
}

/// Writes the sample store to a file, for tests that open it through `connect`.
pub async fn create_file_store(path: &Path) -> Result<(), sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    create_schema(&pool).await?;
    seed_sample_data(&pool).await?;
    pool.close().await;
    Ok(())
}
