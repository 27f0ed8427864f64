use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::risk::RiskLevel;
use crate::error::CoreError;

/// Immutable record of a finalized assessment, handed to the audit/storage
/// collaborator exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletedAssessment {
    pub id: Uuid,
    pub session_id: Uuid,
    pub template_code: String,
    pub patient_id: String,
    pub score: u32,
    pub max_score: u32,
    pub risk_level: RiskLevel,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
    /// Answers in template question order.
    pub responses: Vec<AnsweredQuestion>,
    pub started_at: jiff::Timestamp,
    pub completed_at: jiff::Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub question_text: String,
    pub selected_value: u32,
    pub selected_label: String,
}

impl CompletedAssessment {
    pub fn has_alert(&self) -> bool {
        self.alert_message.is_some()
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnsweredQuestion> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }

    /// Serialize as a single line of JSON (no trailing newline).
    pub fn to_json_line(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
