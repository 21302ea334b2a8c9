use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use standard_error::{StandardError, Status};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                mutators::JobMutator,
                query::{JobFilter, Pagination, SortKey},
                selectors::JobSelector,
                spec::{JobEntry, JobStatus, JobType},
                stats::{DefaultStats, MonthlyCount, monthly_series},
            },
            auth::CurrentUser,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "position is required"))]
    pub position: String,
    pub job_location: Option<String>,
    pub job_status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchJobInput {
    #[validate(length(min = 1, message = "company is required"))]
    pub company: Option<String>,
    #[validate(length(min = 1, message = "position is required"))]
    pub position: Option<String>,
    #[validate(length(min = 1, message = "job location is required"))]
    pub job_location: Option<String>,
    pub job_status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsParams {
    pub search: Option<String>,
    pub job_status: Option<String>,
    pub job_type: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub total_jobs: i64,
    pub number_of_pages: i64,
    pub current_page: i64,
    pub job: Vec<JobEntry>,
}

#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobEntry,
}

#[derive(Serialize)]
pub struct JobMessageResponse {
    pub msg: &'static str,
    pub job: JobEntry,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub default_stats: DefaultStats,
    pub monthly_applications: Vec<MonthlyCount>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<JobListResponse>> {
    let filter = JobFilter::new(&user.user_id)
        .search(params.search.as_deref())
        .job_status(params.job_status.as_deref())
        .job_type(params.job_type.as_deref());
    let sort = SortKey::resolve(params.sort.as_deref());
    let pages = Pagination::resolve(params.page.as_deref(), params.limit.as_deref());

    let mut tx = state.db_pool.begin_txn().await?;
    let total_jobs = JobSelector::new(&mut tx).count(&filter).await?;
    let job = JobSelector::new(&mut tx).page(&filter, sort, &pages).await?;
    Ok(Json(JobListResponse {
        total_jobs,
        number_of_pages: pages.pages_for(total_jobs),
        current_page: pages.page,
        job,
    }))
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
) -> Result<Json<StatsResponse>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let counts = JobSelector::new(&mut tx).status_counts(&user.user_id).await?;
    let buckets = JobSelector::new(&mut tx).monthly_counts(&user.user_id).await?;
    Ok(Json(StatsResponse {
        default_stats: DefaultStats::from_counts(&counts),
        monthly_applications: monthly_series(buckets),
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    input.validate().map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION: {}", e)).code(StatusCode::BAD_REQUEST)
    })?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(input, &user.user_id).await?;
    tx.commit().await?;
    tracing::info!("job {} created by {}", job.id, &user.user_id);
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

pub async fn get_single(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Path(id): Path<i32>,
) -> Result<Json<JobResponse>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = fetch_owned(&mut tx, id, &user).await?;
    Ok(Json(JobResponse { job }))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Path(id): Path<i32>,
    Json(input): Json<PatchJobInput>,
) -> Result<Json<JobMessageResponse>> {
    input.validate().map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION: {}", e)).code(StatusCode::BAD_REQUEST)
    })?;
    let mut tx = state.db_pool.begin_txn().await?;
    fetch_owned(&mut tx, id, &user).await?;
    let job = JobMutator::new(&mut tx)
        .update(id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;
    Ok(Json(JobMessageResponse {
        msg: "job modified",
        job,
    }))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Path(id): Path<i32>,
) -> Result<Json<JobMessageResponse>> {
    let mut tx = state.db_pool.begin_txn().await?;
    fetch_owned(&mut tx, id, &user).await?;
    let job = JobMutator::new(&mut tx)
        .delete(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;
    tracing::info!("job {} deleted by {}", id, &user.user_id);
    Ok(Json(JobMessageResponse {
        msg: "job deleted",
        job,
    }))
}

// ownership check for the id-addressed routes, admins pass
async fn fetch_owned(tx: &mut PgConnection, id: i32, user: &CurrentUser) -> Result<JobEntry> {
    let job = JobSelector::new(tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if job.created_by != user.user_id && !user.is_admin() {
        return Err(StandardError::new("ERR-JOB-002").code(StatusCode::FORBIDDEN));
    }
    Ok(job)
}

fn not_found(id: i32) -> StandardError {
    StandardError::new(&format!("ERR-JOB-001: no job with id {}", id)).code(StatusCode::NOT_FOUND)
}
