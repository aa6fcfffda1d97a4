use crate::DbError;
use core_types::{
    ConstructorStandingRow, DriverStandingRow, ManufacturerWins, NationalityCount, RaceRow,
    SeasonConstructorRow, SeasonRow,
};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool};

/// `race_data.type` value of a classified race result row.
pub const RACE_RESULT: &str = "RACE_RESULT";

/// The `DbRepository` owns the process-wide connection pool and hands out
/// per-request read sessions. It is cheap to clone.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Acquires one connection for the duration of a request.
    ///
    /// The connection goes back to the pool when the session is dropped, so it
    /// is released on every exit path of the caller.
    pub async fn session(&self) -> Result<ReadSession, DbError> {
        let conn = self.pool.acquire().await?;
        Ok(ReadSession { conn })
    }
}

/// One short-lived read session against the results store.
///
/// All the dashboard's queries run through here. Points columns are declared
/// `DECIMAL` in the store, so SQLite keeps whole-number points as INTEGER;
/// they are cast to REAL in the select list to decode as `f64`. Every year filter is a bound
/// parameter and every ordering carries an explicit tie-break, so identical
/// calls against an unchanged store return identical rows.
pub struct ReadSession {
    conn: PoolConnection<Sqlite>,
}

impl ReadSession {
    /// All known seasons, most recent first.
    pub async fn seasons(&mut self) -> Result<Vec<SeasonRow>, DbError> {
        let seasons = sqlx::query_as::<_, SeasonRow>("SELECT year FROM season ORDER BY year DESC")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(seasons)
    }

    /// The races of one season in calendar order.
    pub async fn races_for_year(&mut self, year: i32) -> Result<Vec<RaceRow>, DbError> {
        let races = sqlx::query_as::<_, RaceRow>(
            r#"
            SELECT id, year, round, date, official_name, circuit_id
            FROM race
            WHERE year = ?1
            ORDER BY date ASC, round ASC
            "#,
        )
        .bind(year)
        .fetch_all(&mut *self.conn)
        .await?;
        tracing::debug!(year, rows = races.len(), "Fetched races.");
        Ok(races)
    }

    /// The constructors entered in a season with their season totals, by final
    /// position. Unclassified constructors sort last.
    pub async fn constructors_for_year(
        &mut self,
        year: i32,
    ) -> Result<Vec<SeasonConstructorRow>, DbError> {
        let constructors = sqlx::query_as::<_, SeasonConstructorRow>(
            r#"
            SELECT
                sc.year, sc.constructor_id, c.name AS constructor_name, c.full_name AS constructor_full_name,
                sc.position_number, sc.best_starting_grid_position, sc.best_race_result,
                sc.total_race_entries, sc.total_race_starts, sc.total_race_wins, sc.total_1_and_2_finishes,
                sc.total_race_laps, sc.total_podiums, sc.total_podium_races,
                CAST(sc.total_points AS REAL) AS total_points,
                sc.total_pole_positions, sc.total_fastest_laps
            FROM
                season_constructor AS sc
            JOIN
                constructor AS c ON c.id = sc.constructor_id
            WHERE
                sc.year = ?1
            ORDER BY
                sc.position_number IS NULL, sc.position_number ASC, c.name ASC
            "#,
        )
        .bind(year)
        .fetch_all(&mut *self.conn)
        .await?;
        tracing::debug!(year, rows = constructors.len(), "Fetched season constructors.");
        Ok(constructors)
    }

    /// The constructors' championship of a season.
    pub async fn constructor_standings_for_year(
        &mut self,
        year: i32,
    ) -> Result<Vec<ConstructorStandingRow>, DbError> {
        let standings = sqlx::query_as::<_, ConstructorStandingRow>(
            r#"
            SELECT
                scs.year, scs.position_display_order, scs.position_number, scs.constructor_id,
                scs.engine_manufacturer_id, em.name AS engine_manufacturer_name,
                CAST(scs.points AS REAL) AS points
            FROM
                season_constructor_standing AS scs
            JOIN
                engine_manufacturer AS em ON em.id = scs.engine_manufacturer_id
            WHERE
                scs.year = ?1
            ORDER BY
                scs.position_number IS NULL, scs.position_number ASC, scs.position_display_order ASC
            "#,
        )
        .bind(year)
        .fetch_all(&mut *self.conn)
        .await?;
        tracing::debug!(year, rows = standings.len(), "Fetched constructor standings.");
        Ok(standings)
    }

    /// The drivers' championship of a season, inner-joined on (year, driver_id)
    /// with the entrant record naming the driver's team and engine.
    ///
    /// A standings row without an entrant row for that year is not returned. A
    /// driver entered by more than one team yields one row per entry.
    pub async fn driver_standings_for_year(
        &mut self,
        year: i32,
    ) -> Result<Vec<DriverStandingRow>, DbError> {
        let standings = sqlx::query_as::<_, DriverStandingRow>(
            r#"
            SELECT
                sds.year, sds.position_display_order, sds.position_number, sds.driver_id,
                d.name AS driver_name, CAST(sds.points AS REAL) AS points, sed.entrant_id, sed.constructor_id,
                c.name AS constructor_name, sed.engine_manufacturer_id,
                em.name AS engine_manufacturer_name
            FROM
                season_driver_standing AS sds
            JOIN
                season_entrant_driver AS sed ON sed.year = sds.year AND sed.driver_id = sds.driver_id
            JOIN
                driver AS d ON d.id = sds.driver_id
            JOIN
                constructor AS c ON c.id = sed.constructor_id
            JOIN
                engine_manufacturer AS em ON em.id = sed.engine_manufacturer_id
            WHERE
                sds.year = ?1
            ORDER BY
                sds.position_number IS NULL, sds.position_number ASC,
                sds.position_display_order ASC, c.name ASC
            "#,
        )
        .bind(year)
        .fetch_all(&mut *self.conn)
        .await?;
        tracing::debug!(year, rows = standings.len(), "Fetched driver standings.");
        Ok(standings)
    }

    /// Drivers per nationality over the whole dataset, most common first.
    pub async fn driver_nationality_counts(&mut self) -> Result<Vec<NationalityCount>, DbError> {
        let counts = sqlx::query_as::<_, NationalityCount>(
            r#"
            SELECT
                co.id AS country_id, co.name AS country_name, COUNT(d.id) AS driver_count
            FROM
                driver AS d
            JOIN
                country AS co ON co.id = d.nationality_country_id
            GROUP BY
                co.id, co.name
            ORDER BY
                driver_count DESC, co.name ASC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        tracing::debug!(rows = counts.len(), "Fetched driver nationality counts.");
        Ok(counts)
    }

    /// Race wins per engine manufacturer over the whole dataset.
    ///
    /// A win is attributed to the manufacturer on the result row, and only when
    /// the winning constructor held a season entry with an engine from that
    /// manufacturer in the race's year. The `EXISTS` keeps a win counted once
    /// however many entrant/engine rows match.
    pub async fn engine_manufacturer_wins(&mut self) -> Result<Vec<ManufacturerWins>, DbError> {
        let wins = sqlx::query_as::<_, ManufacturerWins>(
            r#"
            SELECT
                em.id AS engine_manufacturer_id, em.name AS engine_manufacturer_name,
                em.country_id, co.name AS country_name, COUNT(*) AS wins
            FROM
                race_data AS rd
            JOIN
                race AS r ON r.id = rd.race_id
            JOIN
                constructor AS c ON c.id = rd.constructor_id
            JOIN
                engine_manufacturer AS em ON em.id = rd.engine_manufacturer_id
            LEFT JOIN
                country AS co ON co.id = em.country_id
            WHERE
                rd.type = ?1
                AND rd.position_number = 1
                AND EXISTS (
                    SELECT 1
                    FROM season_entrant_engine AS see
                    JOIN engine AS e ON e.id = see.engine_id
                    WHERE see.year = r.year
                      AND see.constructor_id = c.id
                      AND see.engine_manufacturer_id = em.id
                )
            GROUP BY
                em.id, em.name, em.country_id, co.name
            ORDER BY
                wins DESC, em.name ASC
            "#,
        )
        .bind(RACE_RESULT)
        .fetch_all(&mut *self.conn)
        .await?;
        tracing::debug!(rows = wins.len(), "Fetched engine manufacturer wins.");
        Ok(wins)
    }
}
