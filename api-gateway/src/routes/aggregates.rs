use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use pipeline::{
    CategoryField, CrossTab, DashboardSummary, FilterCriteria, GroupSummary, TimeRange,
    WeeklyBucket, apply_filters, cross_tab, group_by_category, summarize, weekly_series,
};

use crate::routes::chains::{FilterQuery, as_load_failure};
use crate::state::SharedState;

fn parse_category(raw: &str) -> Result<CategoryField, (StatusCode, String)> {
    CategoryField::parse(raw)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown category {raw:?}")))
}

/// `GET /aggregates/{category}`
///
/// Groups the (optionally pre-filtered) record set by one categorical field
/// and returns the per-group summaries in first-seen token order.
pub async fn aggregate_by_category(
    State(state): State<SharedState>,
    Path(category): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<GroupSummary>>, (StatusCode, String)> {
    let field = parse_category(&category)?;
    let run = state.engine.run().await.map_err(as_load_failure)?;
    let criteria: FilterCriteria = query.into();
    let records = apply_filters(&run.records, &criteria);
    Ok(Json(group_by_category(&records, field)))
}

/// Query parameters for `GET /crosstab`.
#[derive(Debug, Deserialize)]
pub struct CrossTabQuery {
    pub rows: String,
    pub cols: String,
}

/// `GET /crosstab?rows={category}&cols={category}`
///
/// Cross-tabulates two categorical fields; the response covers the full
/// Cartesian product of tokens present in the data, zero cells included.
pub async fn crosstab(
    State(state): State<SharedState>,
    Query(query): Query<CrossTabQuery>,
) -> Result<Json<Vec<CrossTab>>, (StatusCode, String)> {
    let rows = parse_category(&query.rows)?;
    let cols = parse_category(&query.cols)?;
    let run = state.engine.run().await.map_err(as_load_failure)?;
    Ok(Json(cross_tab(&run.records, rows, cols)))
}

/// Query parameters for `GET /transactions/weekly`.
#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    /// Trailing window: `all`, `1w`, `1m`, `3m`, or `1y`. Defaults to `all`.
    pub range: Option<String>,
}

/// `GET /transactions/weekly`
///
/// Pools every chain's daily series into Monday-aligned weekly totals
/// within the requested trailing window, honouring the same equality
/// filters as the other data routes.
pub async fn weekly_transactions(
    State(state): State<SharedState>,
    Query(query): Query<WeeklyQuery>,
    Query(filters): Query<FilterQuery>,
) -> Result<Json<Vec<WeeklyBucket>>, (StatusCode, String)> {
    let range = match query.range.as_deref() {
        None => TimeRange::All,
        Some(raw) => TimeRange::parse(raw)
            .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown range {raw:?}")))?,
    };

    let mut criteria: FilterCriteria = filters.into();
    criteria.time_range = range;

    let run = state.engine.run().await.map_err(as_load_failure)?;
    let records = apply_filters(&run.records, &criteria);
    let today = Utc::now().date_naive();
    Ok(Json(weekly_series(&records, criteria.time_range, today)))
}

/// `GET /summary`
///
/// Headline totals for the dashboard header box.
pub async fn summary(
    State(state): State<SharedState>,
) -> Result<Json<DashboardSummary>, (StatusCode, String)> {
    let run = state.engine.run().await.map_err(as_load_failure)?;
    Ok(Json(summarize(&run.records)))
}
