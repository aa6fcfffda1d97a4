//! # F1 Stats Aggregator
//!
//! Turns a season selector into the raw row sets a report is built from. All
//! grouping, counting and joining happens in the store; this crate decides
//! which queries a request needs and how an empty selection short-circuits.

use core_types::{
    ConstructorStandingRow, CoreError, DriverStandingRow, ManufacturerWins, NationalityCount,
    RaceRow, SeasonConstructorRow, SeasonSelector,
};
use database::ReadSession;
use serde::Serialize;

pub mod error;

pub use error::AggregatorError;

/// Everything a season report needs, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonOverview {
    pub selector: SeasonSelector,
    pub races: Vec<RaceRow>,
    pub constructors: Vec<SeasonConstructorRow>,
    pub constructor_standings: Vec<ConstructorStandingRow>,
    pub driver_standings: Vec<DriverStandingRow>,
}

impl SeasonOverview {
    /// The overview of "nothing selected".
    pub fn empty() -> Self {
        Self {
            selector: SeasonSelector::Unset,
            races: Vec::new(),
            constructors: Vec::new(),
            constructor_standings: Vec::new(),
            driver_standings: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
            && self.constructors.is_empty()
            && self.constructor_standings.is_empty()
            && self.driver_standings.is_empty()
    }
}

/// The season-independent statistics shown under every season report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalStats {
    pub nationality_counts: Vec<NationalityCount>,
    pub engine_wins: Vec<ManufacturerWins>,
}

/// The aggregation engine. It borrows the request's read session, so every
/// query of one request shares a single connection.
pub struct Aggregator<'s> {
    session: &'s mut ReadSession,
}

impl<'s> Aggregator<'s> {
    pub fn new(session: &'s mut ReadSession) -> Self {
        Self { session }
    }

    /// Fetches the races, constructors and both championships of a season.
    ///
    /// An unset selector returns the empty overview without touching the store.
    /// A year with no data returns empty sequences rather than an error.
    pub async fn season_overview(
        &mut self,
        selector: SeasonSelector,
    ) -> Result<SeasonOverview, AggregatorError> {
        let year = match selector {
            SeasonSelector::Unset | SeasonSelector::Year(0) => return Ok(SeasonOverview::empty()),
            SeasonSelector::Year(y) if y < 0 => return Err(CoreError::InvalidSelector(y).into()),
            SeasonSelector::Year(y) => y,
        };

        let races = self.session.races_for_year(year).await?;
        let constructors = self.session.constructors_for_year(year).await?;
        let constructor_standings = self.session.constructor_standings_for_year(year).await?;
        let driver_standings = self.session.driver_standings_for_year(year).await?;

        tracing::info!(
            year,
            races = races.len(),
            constructors = constructors.len(),
            drivers = driver_standings.len(),
            "Season overview aggregated."
        );

        Ok(SeasonOverview {
            selector,
            races,
            constructors,
            constructor_standings,
            driver_standings,
        })
    }

    /// Drivers per nationality across all seasons, most common first.
    pub async fn driver_nationality_distribution(
        &mut self,
    ) -> Result<Vec<NationalityCount>, AggregatorError> {
        Ok(self.session.driver_nationality_counts().await?)
    }

    /// Race wins per engine manufacturer across all seasons, most wins first.
    pub async fn engine_manufacturer_win_counts(
        &mut self,
    ) -> Result<Vec<ManufacturerWins>, AggregatorError> {
        Ok(self.session.engine_manufacturer_wins().await?)
    }

    pub async fn global_stats(&mut self) -> Result<GlobalStats, AggregatorError> {
        let nationality_counts = self.driver_nationality_distribution().await?;
        let engine_wins = self.engine_manufacturer_win_counts().await?;
        Ok(GlobalStats {
            nationality_counts,
            engine_wins,
        })
    }

    /// Every season year in the store, most recent first.
    pub async fn list_seasons(&mut self) -> Result<Vec<i32>, AggregatorError> {
        let seasons = self.session.seasons().await?;
        Ok(seasons.into_iter().map(|s| s.year).collect())
    }
}
