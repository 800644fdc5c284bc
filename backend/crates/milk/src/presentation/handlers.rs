//! HTTP Handlers

use crate::application::config::MilkConfig;
use crate::application::daily_entry::{DailyEntryUseCase, SubmitEntryInput};
use crate::application::monthly_report::{MonthlyReportUseCase, ReportQuery};
use crate::application::price::PriceUseCase;
use crate::domain::repository::MilkRepository;
use crate::domain::value_objects::{EntryDate, Quantity, ReportMonth, ReportSort};
use crate::error::MilkResult;
use crate::infra::xlsx;
use crate::presentation::dto::{
    EntryQuery, EntryStateResponse, PriceResponse, ReportParams, ReportResponse, SetPriceRequest,
    SetPriceResponse, SubmitEntryRequest, SubmitEntryResponse,
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct MilkAppState<R>
where
    R: MilkRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<MilkConfig>,
}

/// GET /api/price
pub async fn get_price<R>(State(state): State<MilkAppState<R>>) -> MilkResult<Json<PriceResponse>>
where
    R: MilkRepository,
{
    let use_case = PriceUseCase::new(state.repo.clone());
    let price = use_case.current().await?;

    Ok(Json(PriceResponse {
        price,
        currency_symbol: state.config.currency_symbol.clone(),
    }))
}

/// PUT /api/price
pub async fn set_price<R>(
    State(state): State<MilkAppState<R>>,
    payload: Result<Json<SetPriceRequest>, JsonRejection>,
) -> MilkResult<Json<SetPriceResponse>>
where
    R: MilkRepository,
{
    let Json(req) = payload?;

    let use_case = PriceUseCase::new(state.repo.clone());
    let output = use_case.set(req.price).await?;

    Ok(Json(SetPriceResponse {
        price: output.price,
        replaced: output.replaced,
        message: output.message.to_string(),
    }))
}

/// GET /api/entries?date=YYYY-MM-DD
pub async fn lookup_entry<R>(
    State(state): State<MilkAppState<R>>,
    query: Result<Query<EntryQuery>, QueryRejection>,
) -> MilkResult<Json<EntryStateResponse>>
where
    R: MilkRepository,
{
    let Query(query) = query?;
    let date = query.date.as_deref().map(EntryDate::parse).transpose()?;

    let use_case = DailyEntryUseCase::new(state.repo.clone(), state.repo.clone());
    let entry = use_case.lookup(date).await;

    Ok(Json(entry.into()))
}

/// POST /api/entries
pub async fn submit_entry<R>(
    State(state): State<MilkAppState<R>>,
    payload: Result<Json<SubmitEntryRequest>, JsonRejection>,
) -> MilkResult<impl IntoResponse>
where
    R: MilkRepository,
{
    let Json(req) = payload?;
    let input = SubmitEntryInput {
        date: EntryDate::parse(&req.date)?,
        quantity: Quantity::new(req.quantity)?,
    };

    let use_case = DailyEntryUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case.submit(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitEntryResponse {
            recorded: output.recorded.into(),
            next: output.next.into(),
        }),
    ))
}

/// GET /api/reports?month=YYYY-MM&sortBy=quantity&sortOrder=desc
pub async fn monthly_report<R>(
    State(state): State<MilkAppState<R>>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> MilkResult<Json<ReportResponse>>
where
    R: MilkRepository,
{
    let Query(params) = params?;
    let query = report_query(&params, &state.config)?;

    let use_case =
        MonthlyReportUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let report = use_case.execute(query).await?;

    Ok(Json(ReportResponse::new(
        report,
        &state.config.currency_symbol,
    )))
}

/// GET /api/reports/export?month=YYYY-MM&sortBy=quantity&sortOrder=desc
pub async fn export_report<R>(
    State(state): State<MilkAppState<R>>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> MilkResult<impl IntoResponse>
where
    R: MilkRepository,
{
    let Query(params) = params?;
    let query = report_query(&params, &state.config)?;

    let use_case =
        MonthlyReportUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let exported = use_case.export(query).await?;

    let disposition = format!("attachment; filename=\"{}\"", exported.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, xlsx::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    ))
}

fn report_query(params: &ReportParams, config: &MilkConfig) -> MilkResult<ReportQuery> {
    let month = match params.month.as_deref() {
        Some(month) => ReportMonth::parse(month)?,
        None => ReportMonth::current(),
    };
    let sort = ReportSort::new(
        params.sort_by.unwrap_or(config.default_sort.field),
        params.sort_order.unwrap_or(config.default_sort.order),
    );
    Ok(ReportQuery { month, sort })
}
