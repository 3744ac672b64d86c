use crate::error::Result;
use crate::io::atomic_write;
use crate::paths;
use crate::report::ReadinessReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::FormData;

/// Outcome reported by a submission backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn accepted(id: impl Into<String>) -> Self {
        Self {
            success: true,
            submission_id: Some(id.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            submission_id: None,
            error: Some(error.into()),
        }
    }
}

/// Backend that receives completed assessments. `Err` means the backend could
/// not be reached; a reachable backend that refuses the submission returns
/// `Ok` with `success: false`.
pub trait SubmissionService: Send + Sync {
    fn submit(&self, answers: &FormData) -> Result<SubmissionResult>;
}

/// What gets written for each locally recorded submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: FormData,
    pub report: ReadinessReport,
}

/// Records submissions as YAML files under `.readiness/submissions/`.
#[derive(Debug, Clone)]
pub struct LocalSubmissionService {
    root: PathBuf,
}

impl LocalSubmissionService {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn load(&self, id: &str) -> Result<SubmissionRecord> {
        let data = std::fs::read_to_string(paths::submission_path(&self.root, id))?;
        Ok(serde_yaml::from_str(&data)?)
    }
}

impl SubmissionService for LocalSubmissionService {
    fn submit(&self, answers: &FormData) -> Result<SubmissionResult> {
        let id = uuid::Uuid::new_v4().to_string();
        let record = SubmissionRecord {
            id: id.clone(),
            submitted_at: Utc::now(),
            answers: answers.clone(),
            report: ReadinessReport::from_answers(answers),
        };
        let data = serde_yaml::to_string(&record)?;
        atomic_write(&paths::submission_path(&self.root, &id), data.as_bytes())?;
        Ok(SubmissionResult::accepted(id))
    }
}
