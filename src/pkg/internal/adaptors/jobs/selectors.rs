use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::query::{JobFilter, Pagination, SortKey};
use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, MonthBucket, StatusCount};
use crate::prelude::Result;

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"SELECT id, company, "position", job_location, job_status, job_type, created_by, created_at, updated_at
             FROM jobs WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    // total matching the predicate, independent of paging
    pub async fn count(&mut self, filter: &JobFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT count(*) FROM jobs");
        filter.push_where(&mut qb);
        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }

    pub async fn page(
        &mut self,
        filter: &JobFilter,
        sort: SortKey,
        pages: &Pagination,
    ) -> Result<Vec<JobEntry>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"SELECT id, company, "position", job_location, job_status, job_type, created_by, created_at, updated_at FROM jobs"#,
        );
        filter.push_where(&mut qb);
        qb.push(" ORDER BY ").push(sort.order_by());
        qb.push(" LIMIT ")
            .push_bind(pages.limit)
            .push(" OFFSET ")
            .push_bind(pages.skip());
        let rows = qb
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count_all(&mut self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM jobs")
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }

    pub async fn status_counts(&mut self, created_by: &str) -> Result<Vec<StatusCount>> {
        let rows = sqlx::query_as::<_, StatusCount>(
            "SELECT job_status, count(*) AS count FROM jobs
             WHERE created_by = $1 GROUP BY job_status",
        )
        .bind(created_by)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    // trailing window: six most recent year/month groups, newest first
    pub async fn monthly_counts(&mut self, created_by: &str) -> Result<Vec<MonthBucket>> {
        let rows = sqlx::query_as::<_, MonthBucket>(
            "SELECT extract(year FROM created_at)::int4 AS year,
                    extract(month FROM created_at)::int4 AS month,
                    count(*) AS count
             FROM jobs WHERE created_by = $1
             GROUP BY 1, 2 ORDER BY 1 DESC, 2 DESC LIMIT 6",
        )
        .bind(created_by)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
