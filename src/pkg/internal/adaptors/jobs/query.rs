use sqlx::{Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JobStatus, JobType};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Newest,
    Oldest,
    AZ,
    ZA,
}

impl SortKey {
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some("oldest") => SortKey::Oldest,
            Some("a-z") => SortKey::AZ,
            Some("z-a") => SortKey::ZA,
            _ => SortKey::Newest,
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            SortKey::Newest => "created_at desc",
            SortKey::Oldest => "created_at asc",
            SortKey::AZ => r#""position" asc"#,
            SortKey::ZA => r#""position" desc"#,
        }
    }
}

// conjunction of the restrictions active for one list request, always
// scoped to the owner; built once, applied to both the count and page queries
#[derive(Debug, Clone)]
pub struct JobFilter {
    created_by: String,
    search: Option<String>,
    job_status: Option<JobStatus>,
    job_type: Option<JobType>,
}

impl JobFilter {
    pub fn new(created_by: &str) -> Self {
        JobFilter {
            created_by: created_by.to_string(),
            search: None,
            job_status: None,
            job_type: None,
        }
    }

    pub fn search(mut self, value: Option<&str>) -> Self {
        self.search = value.filter(|s| !s.is_empty()).map(|s| s.to_string());
        self
    }

    // "all" and values outside the enumeration impose no restriction
    pub fn job_status(mut self, value: Option<&str>) -> Self {
        self.job_status = value
            .filter(|v| *v != "all")
            .and_then(JobStatus::from_param);
        self
    }

    pub fn job_type(mut self, value: Option<&str>) -> Self {
        self.job_type = value.filter(|v| *v != "all").and_then(JobType::from_param);
        self
    }

    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" where created_by = ").push_bind(self.created_by.clone());
        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(r#" and ("position" ilike "#)
                .push_bind(pattern.clone())
                .push(" or company ilike ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(status) = self.job_status {
            qb.push(" and job_status = ").push_bind(status);
        }
        if let Some(job_type) = self.job_type {
            qb.push(" and job_type = ").push_bind(job_type);
        }
    }
}

// user input is matched literally, not as a LIKE pattern
pub fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn resolve(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE)
            .max(1);
        let limit = limit
            .and_then(|l| l.parse::<i64>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT);
        Pagination { page, limit }
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn pages_for(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Execute;

    fn rendered(filter: &JobFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("select count(*) from jobs");
        filter.push_where(&mut qb);
        qb.build().sql().to_string()
    }

    #[test]
    fn test_sort_defaults_to_newest() {
        assert_eq!(SortKey::resolve(None), SortKey::Newest);
        assert_eq!(SortKey::resolve(Some("newest")), SortKey::Newest);
        assert_eq!(SortKey::resolve(Some("garbage")), SortKey::Newest);
    }

    #[test]
    fn test_sort_mappings() {
        assert_eq!(SortKey::resolve(Some("oldest")).order_by(), "created_at asc");
        assert_eq!(SortKey::resolve(Some("a-z")).order_by(), r#""position" asc"#);
        assert_eq!(SortKey::resolve(Some("z-a")).order_by(), r#""position" desc"#);
        assert_eq!(SortKey::Newest.order_by(), "created_at desc");
    }

    #[test]
    fn test_base_predicate_is_ownership_only() {
        let sql = rendered(&JobFilter::new("user-1"));
        assert!(sql.contains("where created_by = "));
        assert!(!sql.contains("ilike"));
        assert!(!sql.contains("job_status"));
        assert!(!sql.contains("job_type"));
    }

    #[test]
    fn test_search_adds_disjunction_on_position_and_company() {
        let sql = rendered(&JobFilter::new("user-1").search(Some("acme")));
        assert!(sql.contains(r#"and ("position" ilike "#));
        assert!(sql.contains("or company ilike "));
    }

    #[test]
    fn test_empty_search_imposes_no_restriction() {
        let sql = rendered(&JobFilter::new("user-1").search(Some("")));
        assert!(!sql.contains("ilike"));
    }

    #[test]
    fn test_status_and_type_restrictions_conjoin() {
        let filter = JobFilter::new("user-1")
            .job_status(Some("pending"))
            .job_type(Some("remote"));
        let sql = rendered(&filter);
        assert!(sql.contains("and job_status = "));
        assert!(sql.contains("and job_type = "));
    }

    #[test]
    fn test_all_sentinel_imposes_no_restriction() {
        let filter = JobFilter::new("user-1")
            .job_status(Some("all"))
            .job_type(Some("all"));
        let sql = rendered(&filter);
        assert!(!sql.contains("job_status ="));
        assert!(!sql.contains("job_type ="));
    }

    #[test]
    fn test_unknown_enum_values_impose_no_restriction() {
        let filter = JobFilter::new("user-1")
            .job_status(Some("ghosted"))
            .job_type(Some("gig"));
        let sql = rendered(&filter);
        assert!(!sql.contains("job_status ="));
        assert!(!sql.contains("job_type ="));
    }

    #[test]
    fn test_escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("acme"), "acme");
    }

    #[test]
    fn test_pagination_defaults() {
        let pages = Pagination::resolve(None, None);
        assert_eq!(pages.page, 1);
        assert_eq!(pages.limit, 10);
        assert_eq!(pages.skip(), 0);
    }

    #[test]
    fn test_pagination_non_numeric_falls_back() {
        let pages = Pagination::resolve(Some("abc"), Some("xyz"));
        assert_eq!(pages.page, 1);
        assert_eq!(pages.limit, 10);
    }

    #[test]
    fn test_pagination_clamps_degenerate_values() {
        let pages = Pagination::resolve(Some("0"), Some("0"));
        assert_eq!(pages.page, 1);
        assert_eq!(pages.limit, 10);
        let pages = Pagination::resolve(Some("-3"), Some("-5"));
        assert_eq!(pages.page, 1);
        assert_eq!(pages.limit, 10);
    }

    #[test]
    fn test_pagination_arithmetic() {
        let pages = Pagination::resolve(Some("2"), Some("10"));
        assert_eq!(pages.skip(), 10);
        assert_eq!(pages.pages_for(15), 2);
        assert_eq!(pages.pages_for(20), 2);
        assert_eq!(pages.pages_for(21), 3);
        assert_eq!(pages.pages_for(0), 0);
    }
}
