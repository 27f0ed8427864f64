use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;
use crate::template::TemplateValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("invalid template: {0}")]
    Validation(#[from] TemplateValidationError),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template already registered: {0}")]
    DuplicateTemplate(String),

    #[error("unknown question '{question_id}' for template '{template_code}'")]
    UnknownQuestion {
        template_code: String,
        question_id: String,
    },

    #[error("{value} is not an option value of question '{question_id}'")]
    InvalidOptionValue { question_id: String, value: u32 },

    #[error("no interpretation band covers score {0}")]
    NoInterpretationForScore(u32),

    #[error("assessment incomplete: {answered} of {total} questions answered")]
    IncompleteAssessment { answered: usize, total: usize },

    #[error("session is {0}")]
    SessionClosed(SessionState),

    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
