use crate::{AppState, error::AppError, render};
use aggregator::Aggregator;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use core_types::SeasonSelector;
use report::{ReportModel, build_global_stats_report, build_season_report};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NOT_FOUND_PAGE: &str = "<h1>404</h1>";

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub year: Option<i32>,
}

/// Body of `GET /api/season.json`.
#[derive(Debug, Serialize)]
pub struct SeasonReports {
    pub season: Option<ReportModel>,
    pub global: ReportModel,
}

/// # GET /
/// The page shell with every known season, newest first.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let mut session = state.db_repo.session().await?;
    let seasons = Aggregator::new(&mut session).list_seasons().await?;
    Ok(Html(render::render_page(&seasons)))
}

/// # GET /api/season?year=<int>
/// The season report fragment followed by the all-years statistics. Year `0`
/// or no year yields an empty body.
pub async fn season(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let selector = SeasonSelector::from_query(query.year)?;
    if selector.is_unset() {
        return Ok(Html(String::new()));
    }

    let reports = load_reports(&state, selector).await?;
    let mut body = String::new();
    if let Some(season) = &reports.season {
        body.push_str(&render::render_report(season));
    }
    body.push_str(&render::render_report(&reports.global));
    Ok(Html(body))
}

/// # GET /api/season.json?year=<int>
/// The same reports as `/api/season`, as data. `season` is null when no year
/// is selected.
pub async fn season_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeasonQuery>,
) -> Result<Json<SeasonReports>, AppError> {
    let selector = SeasonSelector::from_query(query.year)?;
    Ok(Json(load_reports(&state, selector).await?))
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// Fallback for every unknown path.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

/// Runs every query of the request over one read session, releases it, then
/// builds the reports.
async fn load_reports(
    state: &AppState,
    selector: SeasonSelector,
) -> Result<SeasonReports, AppError> {
    let (overview, stats) = {
        let mut session = state.db_repo.session().await?;
        let mut aggregator = Aggregator::new(&mut session);
        let overview = aggregator.season_overview(selector).await?;
        let stats = aggregator.global_stats().await?;
        (overview, stats)
    };

    let season = match selector.year() {
        Some(year) => Some(build_season_report(
            year,
            &overview.races,
            &overview.constructors,
            &overview.constructor_standings,
            &overview.driver_standings,
        )?),
        None => None,
    };
    let global = build_global_stats_report(&stats.nationality_counts, &stats.engine_wins)?;

    tracing::info!(season = %selector, "Reports built.");
    Ok(SeasonReports { season, global })
}
