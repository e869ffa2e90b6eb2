use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use wasser_client::{
    analytics::{
        compute_kpis, default_year, distinct_months, distinct_years, filter_and_summarize,
    },
    db::RecordFilter,
    MonthlyRecord,
};

use super::{
    dto::{
        FiltersResponse, IncomingRecord, IncomingUpdate, KpiResponse, MessageResponse,
        RecordQuery, RecordView, TableResponse, TableRowView,
    },
    error::{ApiError, CREATE_FAILED, FETCH_FAILED, SAVE_FAILED},
    AppState,
};
use crate::validation;

async fn snapshot(state: &AppState) -> Result<Vec<MonthlyRecord>, ApiError> {
    state
        .store
        .list_records(RecordFilter::all())
        .await
        .map_err(ApiError::store(FETCH_FAILED))
}

/// # GET /api/wassermonat
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<RecordView>>, ApiError> {
    metrics::counter!("http_requests_total", "route" => "list").increment(1);

    let filter = validation::validate_query(&query)?;
    let records = state
        .store
        .list_records(filter)
        .await
        .map_err(ApiError::store(FETCH_FAILED))?;

    Ok(Json(records.iter().map(RecordView::from).collect()))
}

/// # POST /api/wassermonat
pub async fn create_record(
    State(state): State<AppState>,
    Json(incoming): Json<IncomingRecord>,
) -> Result<(StatusCode, Json<RecordView>), ApiError> {
    metrics::counter!("http_requests_total", "route" => "create").increment(1);

    let new = validation::validate_new_record(incoming)?;
    let created = state
        .store
        .create_record(new)
        .await
        .map_err(ApiError::store(CREATE_FAILED))?;

    metrics::counter!("records_created_total").increment(1);
    tracing::info!(
        id = ?created.id,
        jahr = created.year,
        monat = created.month,
        "record created"
    );

    Ok((StatusCode::CREATED, Json(RecordView::from(&created))))
}

/// # PUT /api/wassermonat/:id
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(incoming): Json<IncomingUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    metrics::counter!("http_requests_total", "route" => "update").increment(1);

    let (meter_reading, consumption) = validation::validate_update(incoming)?;
    state
        .store
        .update_record(id, meter_reading, consumption)
        .await
        .map_err(ApiError::store(SAVE_FAILED))?;

    metrics::counter!("records_updated_total").increment(1);
    tracing::info!(id, "record updated");

    Ok(Json(MessageResponse {
        message: "Daten erfolgreich geändert",
    }))
}

/// # GET /api/wassermonat/table
/// Filtered, month-ordered rows plus the `Summe` row. `jahr` defaults to the
/// latest stored year.
pub async fn table(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<TableResponse>, ApiError> {
    metrics::counter!("http_requests_total", "route" => "table").increment(1);

    let filter = validation::validate_query(&query)?;
    let records = snapshot(&state).await?;
    let Some(year) = filter.year.or_else(|| default_year(&records)) else {
        return Ok(Json(TableResponse {
            jahr: None,
            monat: filter.month,
            rows: Vec::new(),
        }));
    };

    let rows = filter_and_summarize(&records, year, filter.month)
        .into_iter()
        .map(TableRowView::from)
        .collect();

    Ok(Json(TableResponse {
        jahr: Some(year),
        monat: filter.month,
        rows,
    }))
}

/// # GET /api/wassermonat/kpis
pub async fn kpis(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<KpiResponse>, ApiError> {
    metrics::counter!("http_requests_total", "route" => "kpis").increment(1);

    let filter = validation::validate_query(&query)?;
    let records = snapshot(&state).await?;
    let jahr = filter.year.or_else(|| default_year(&records));
    let kpis = jahr.map(|year| compute_kpis(&records, year)).unwrap_or_default();

    Ok(Json(KpiResponse { jahr, kpis }))
}

/// # GET /api/wassermonat/filters
/// Choices for the year/month selectors.
pub async fn filters(State(state): State<AppState>) -> Result<Json<FiltersResponse>, ApiError> {
    metrics::counter!("http_requests_total", "route" => "filters").increment(1);

    let records = snapshot(&state).await?;

    Ok(Json(FiltersResponse {
        years: distinct_years(&records),
        months: distinct_months(&records),
        default_year: default_year(&records),
    }))
}
