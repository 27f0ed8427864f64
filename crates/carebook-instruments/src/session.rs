//! Assessment session state machine.
//!
//! A session binds one template to one patient and recomputes the score and
//! risk band after every change, so a form can render a live preview. Only a
//! fully answered session can be finalized into a
//! [`CompletedAssessment`]; `completed` and `abandoned` are terminal.

use std::fmt;
use std::sync::Arc;

use carebook_core::models::completed::{AnsweredQuestion, CompletedAssessment};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::InstrumentError;
use crate::interpret;
use crate::responses::ResponseSet;
use crate::scoring::compute_score;
use crate::template::{Band, QuestionnaireTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    InProgress,
    Completed,
    Abandoned,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::InProgress => "in_progress",
            SessionState::Completed => "completed",
            SessionState::Abandoned => "abandoned",
        })
    }
}

/// What the UI renders after each change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiveState {
    pub current_score: u32,
    pub max_score: u32,
    /// `None` until at least one question is answered.
    pub current_band: Option<Band>,
    pub completion_ratio: f64,
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug)]
pub struct AssessmentSession {
    id: Uuid,
    template: Arc<QuestionnaireTemplate>,
    patient_id: String,
    responses: ResponseSet,
    current_score: u32,
    current_band: Option<usize>,
    started_at: jiff::Timestamp,
    state: SessionState,
}

impl AssessmentSession {
    /// Open a new in-progress session with no answers.
    ///
    /// Fails if the template does not pass validation, so a broken template
    /// can never reach scoring.
    pub fn start(
        template: Arc<QuestionnaireTemplate>,
        patient_id: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        template.validate()?;

        let session = Self {
            id: Uuid::new_v4(),
            template,
            patient_id: patient_id.into(),
            responses: ResponseSet::new(),
            current_score: 0,
            current_band: None,
            started_at: jiff::Timestamp::now(),
            state: SessionState::InProgress,
        };
        info!(
            session_id = %session.id,
            template = %session.template.code,
            patient_id = %session.patient_id,
            "assessment session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn template(&self) -> &QuestionnaireTemplate {
        &self.template
    }

    pub fn template_code(&self) -> &str {
        &self.template.code
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn current_band(&self) -> Option<&Band> {
        self.current_band
            .map(|index| &self.template.interpretation_rules[index])
    }

    pub fn started_at(&self) -> jiff::Timestamp {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn completion_ratio(&self) -> f64 {
        self.responses.completion_ratio(&self.template)
    }

    pub fn live_state(&self) -> LiveState {
        LiveState {
            current_score: self.current_score,
            max_score: self.template.max_score,
            current_band: self.current_band().cloned(),
            completion_ratio: self.completion_ratio(),
            answered: self.responses.answered_count(),
            total: self.template.question_count(),
        }
    }

    /// Record an answer and refresh the score and band.
    ///
    /// On any error the session is left exactly as it was.
    pub fn answer(&mut self, question_id: &str, value: u32) -> Result<LiveState, InstrumentError> {
        self.ensure_in_progress()?;

        let previous = self
            .responses
            .set_answer(&self.template, question_id, value)?;
        if let Err(e) = self.recompute() {
            self.responses.restore(question_id, previous);
            return Err(e);
        }

        debug!(
            session_id = %self.id,
            question_id,
            value,
            score = self.current_score,
            "answer recorded"
        );
        Ok(self.live_state())
    }

    /// Revert a question to unanswered and refresh the score and band.
    pub fn clear_answer(&mut self, question_id: &str) -> Result<LiveState, InstrumentError> {
        self.ensure_in_progress()?;
        if self.template.question(question_id).is_none() {
            return Err(InstrumentError::UnknownQuestion {
                template_code: self.template.code.clone(),
                question_id: question_id.to_string(),
            });
        }

        let previous = self.responses.clear(question_id);
        if let Err(e) = self.recompute() {
            self.responses.restore(question_id, previous);
            return Err(e);
        }

        debug!(session_id = %self.id, question_id, score = self.current_score, "answer cleared");
        Ok(self.live_state())
    }

    /// Freeze a fully answered session into its completed record.
    pub fn finalize(&mut self) -> Result<CompletedAssessment, InstrumentError> {
        self.ensure_in_progress()?;

        let total = self.template.question_count();
        let answered = self.responses.answered_count();
        if !self.responses.is_complete(&self.template) {
            return Err(InstrumentError::IncompleteAssessment { answered, total });
        }

        let band = interpret::resolve(&self.template, self.current_score)?;

        let mut responses = Vec::with_capacity(total);
        for question in &self.template.questions {
            let value = self
                .responses
                .get(&question.id)
                .ok_or(InstrumentError::IncompleteAssessment { answered, total })?;
            let option =
                question
                    .option(value)
                    .ok_or_else(|| InstrumentError::InvalidOptionValue {
                        question_id: question.id.clone(),
                        value,
                    })?;
            responses.push(AnsweredQuestion {
                question_id: question.id.clone(),
                question_text: question.text.clone(),
                selected_value: value,
                selected_label: option.text.clone(),
            });
        }

        let record = CompletedAssessment {
            id: Uuid::new_v4(),
            session_id: self.id,
            template_code: self.template.code.clone(),
            patient_id: self.patient_id.clone(),
            score: self.current_score,
            max_score: self.template.max_score,
            risk_level: band.level,
            interpretation: band.interpretation.clone(),
            recommendations: band.recommendations.clone(),
            alert_message: band.alert_message.clone(),
            responses,
            started_at: self.started_at,
            completed_at: jiff::Timestamp::now(),
        };

        self.state = SessionState::Completed;
        info!(
            session_id = %self.id,
            template = %record.template_code,
            score = record.score,
            risk_level = %record.risk_level,
            alert = record.has_alert(),
            "assessment finalized"
        );
        Ok(record)
    }

    /// Discard the attempt. No record is produced.
    pub fn abandon(&mut self) -> Result<(), InstrumentError> {
        self.ensure_in_progress()?;
        self.responses = ResponseSet::new();
        self.current_score = 0;
        self.current_band = None;
        self.state = SessionState::Abandoned;
        info!(session_id = %self.id, "assessment session abandoned");
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), InstrumentError> {
        match self.state {
            SessionState::InProgress => Ok(()),
            other => Err(InstrumentError::SessionClosed(other)),
        }
    }

    /// Refresh score and band from the current responses. Leaves both
    /// untouched when no band covers the new score.
    fn recompute(&mut self) -> Result<(), InstrumentError> {
        let score = self.responses.running_total();
        debug_assert_eq!(score, compute_score(&self.template, &self.responses));

        let band = if self.responses.is_empty() {
            None
        } else {
            Some(interpret::resolve_index(&self.template, score)?)
        };

        self.current_score = score;
        self.current_band = band;
        Ok(())
    }
}
