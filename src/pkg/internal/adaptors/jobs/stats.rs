use chrono::NaiveDate;
use serde::Serialize;

use crate::pkg::internal::adaptors::jobs::spec::{JobStatus, MonthBucket, StatusCount};

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DefaultStats {
    pub pending: i64,
    pub interview: i64,
    pub declined: i64,
}

impl DefaultStats {
    // statuses absent from the grouped rows stay at zero
    pub fn from_counts(counts: &[StatusCount]) -> Self {
        let mut stats = DefaultStats::default();
        for entry in counts {
            match entry.job_status {
                JobStatus::Pending => stats.pending = entry.count,
                JobStatus::Interview => stats.interview = entry.count,
                JobStatus::Declined => stats.declined = entry.count,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub date: String,
    pub count: i64,
}

// buckets arrive newest first from the store, the wire order is oldest first
pub fn monthly_series(buckets: Vec<MonthBucket>) -> Vec<MonthlyCount> {
    buckets
        .into_iter()
        .rev()
        .map(|bucket| MonthlyCount {
            date: month_label(bucket.year, bucket.month),
            count: bucket.count,
        })
        .collect()
}

fn month_label(year: i32, month: i32) -> String {
    NaiveDate::from_ymd_opt(year, month as u32, 1)
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_else(|| format!("{:02} {:02}", month, year.rem_euclid(100)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(status: JobStatus, count: i64) -> StatusCount {
        StatusCount {
            job_status: status,
            count,
        }
    }

    #[test]
    fn test_default_stats_zero_fills_missing_statuses() {
        let stats = DefaultStats::from_counts(&[
            count(JobStatus::Pending, 2),
            count(JobStatus::Interview, 1),
        ]);
        assert_eq!(
            stats,
            DefaultStats {
                pending: 2,
                interview: 1,
                declined: 0
            }
        );
    }

    #[test]
    fn test_default_stats_all_zero_without_records() {
        assert_eq!(DefaultStats::from_counts(&[]), DefaultStats::default());
    }

    #[test]
    fn test_month_label_format() {
        assert_eq!(month_label(2024, 1), "Jan 24");
        assert_eq!(month_label(2023, 12), "Dec 23");
    }

    #[test]
    fn test_monthly_series_reverses_to_oldest_first() {
        let buckets = vec![
            MonthBucket {
                year: 2024,
                month: 3,
                count: 4,
            },
            MonthBucket {
                year: 2024,
                month: 2,
                count: 1,
            },
            MonthBucket {
                year: 2023,
                month: 12,
                count: 7,
            },
        ];
        let series = monthly_series(buckets);
        assert_eq!(
            series,
            vec![
                MonthlyCount {
                    date: "Dec 23".into(),
                    count: 7
                },
                MonthlyCount {
                    date: "Feb 24".into(),
                    count: 1
                },
                MonthlyCount {
                    date: "Mar 24".into(),
                    count: 4
                },
            ]
        );
    }

    #[test]
    fn test_monthly_series_keeps_sparse_months_unpadded() {
        let series = monthly_series(vec![MonthBucket {
            year: 2024,
            month: 6,
            count: 2,
        }]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, "Jun 24");
    }

    #[test]
    fn test_monthly_series_empty() {
        assert!(monthly_series(Vec::new()).is_empty());
    }
}
