use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::Deserialize;

use pipeline::{ChainRecord, FilterCriteria, RegistryError, apply_filters};

use crate::state::SharedState;

/// Query-string form of the filter-bar criteria.
///
/// Field names match the category wire names used across the API
/// (`framework`, `vertical`, `da`, `l2_or_l3`, `raas`, `settlement`).
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub framework: Option<String>,
    pub vertical: Option<String>,
    pub da: Option<String>,
    pub l2_or_l3: Option<String>,
    pub raas: Option<String>,
    pub settlement: Option<String>,
}

impl From<FilterQuery> for FilterCriteria {
    fn from(q: FilterQuery) -> Self {
        FilterCriteria {
            framework: q.framework,
            vertical: q.vertical,
            data_availability: q.da,
            l2_or_l3: q.l2_or_l3,
            raas_provider: q.raas,
            settlement: q.settlement,
            time_range: Default::default(),
        }
    }
}

/// Maps a fatal registry failure to the single user-visible error state.
pub fn as_load_failure(err: RegistryError) -> (StatusCode, String) {
    (StatusCode::BAD_GATEWAY, format!("failed to load data: {err}"))
}

/// `GET /chains`
///
/// Runs the pipeline and returns the enriched record sequence, pre-filtered
/// by the optional equality filters. Sentinel values serialize as `"--"`
/// (categorical fields) or `null` (enrichment fields); partial enrichment
/// failure is not an error.
pub async fn list_chains(
    State(state): State<SharedState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<ChainRecord>>, (StatusCode, String)> {
    let run = state.engine.run().await.map_err(as_load_failure)?;
    let criteria: FilterCriteria = query.into();
    Ok(Json(apply_filters(&run.records, &criteria)))
}
