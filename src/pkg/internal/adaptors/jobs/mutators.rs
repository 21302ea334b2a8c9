use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobStatus, JobType};
use crate::pkg::server::handlers::jobs::{CreateJobInput, PatchJobInput};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: CreateJobInput, created_by: &str) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (company, "position", job_location, job_status, job_type, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company, "position", job_location, job_status, job_type, created_by, created_at, updated_at
            "#,
        )
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.job_location.as_deref().unwrap_or("city"))
        .bind(job.job_status.unwrap_or(JobStatus::Pending))
        .bind(job.job_type.unwrap_or(JobType::FullTime))
        .bind(created_by)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i32, job: PatchJobInput) -> Result<Option<JobEntry>> {
        let mut qb =
            QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = CURRENT_TIMESTAMP");
        if let Some(company) = job.company {
            qb.push(", company = ").push_bind(company);
        }
        if let Some(position) = job.position {
            qb.push(r#", "position" = "#).push_bind(position);
        }
        if let Some(location) = job.job_location {
            qb.push(", job_location = ").push_bind(location);
        }
        if let Some(status) = job.job_status {
            qb.push(", job_status = ").push_bind(status);
        }
        if let Some(job_type) = job.job_type {
            qb.push(", job_type = ").push_bind(job_type);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(
            r#" RETURNING id, company, "position", job_location, job_status, job_type, created_by, created_at, updated_at"#,
        );
        let row = qb
            .build_query_as::<JobEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"DELETE FROM jobs WHERE id = $1
             RETURNING id, company, "position", job_location, job_status, job_type, created_by, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }
}
