use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("not initialized: run 'readiness init'")]
    NotInitialized,

    #[error("roadmap item not found: {0}")]
    RoadmapItemNotFound(String),

    #[error("catalog entry not found: {source_name}/{id}")]
    CatalogEntryNotFound { source_name: String, id: String },

    #[error("invalid id '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidId(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid catalog source: {0}")]
    InvalidSource(String),

    #[error("invalid complexity: {0}")]
    InvalidComplexity(String),

    #[error("assessment section not found: {0}")]
    SectionNotFound(String),

    #[error("question '{question}' not found in section '{section}'")]
    QuestionNotFound { section: String, question: String },

    #[error("invalid answer for '{question}': {reason}")]
    InvalidAnswer { question: String, reason: String },

    #[error("assessment incomplete: {missing} required question(s) unanswered")]
    AssessmentIncomplete { missing: usize },

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReadinessError>;
