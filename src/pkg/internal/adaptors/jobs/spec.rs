use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Interview,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Internship,
    Remote,
}

impl JobStatus {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(JobStatus::Pending),
            "interview" => Some(JobStatus::Interview),
            "declined" => Some(JobStatus::Declined),
            _ => None,
        }
    }
}

impl JobType {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "full-time" => Some(JobType::FullTime),
            "part-time" => Some(JobType::PartTime),
            "internship" => Some(JobType::Internship),
            "remote" => Some(JobType::Remote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i32,
    pub company: String,
    pub position: String,
    pub job_location: String,
    pub job_status: JobStatus,
    pub job_type: JobType,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct StatusCount {
    pub job_status: JobStatus,
    pub count: i64,
}

#[derive(Debug, FromRow)]
pub struct MonthBucket {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}
