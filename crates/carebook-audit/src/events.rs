use carebook_core::models::completed::CompletedAssessment;
use serde::Serialize;
use tracing::{info, warn};

/// A structured audit event for clinically relevant actions.
///
/// Events are logged via `tracing`; whatever subscriber the host installs
/// decides where they end up.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor: actor.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// The event recorded when a finalized assessment is handed off.
    pub fn assessment_completed(record: &CompletedAssessment, actor: impl Into<String>) -> Self {
        Self::new("assessment.completed", "assessment", record.id.to_string(), actor).with_details(
            serde_json::json!({
                "template_code": record.template_code,
                "patient_id": record.patient_id,
                "score": record.score,
                "max_score": record.max_score,
                "risk_level": record.risk_level,
                "alert": record.has_alert(),
            }),
        )
    }

    /// Emit this audit event via tracing. Events carrying an alert are
    /// logged at `warn`.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        if self.is_alert() {
            warn!(
                audit.action = %self.action,
                audit.resource_type = %self.resource_type,
                audit.resource_id = %self.resource_id,
                audit.actor = %self.actor,
                audit.details = %details,
                "audit event"
            );
        } else {
            info!(
                audit.action = %self.action,
                audit.resource_type = %self.resource_type,
                audit.resource_id = %self.resource_id,
                audit.actor = %self.actor,
                audit.details = %details,
                "audit event"
            );
        }
    }

    pub fn is_alert(&self) -> bool {
        self.details
            .as_ref()
            .and_then(|d| d.get("alert"))
            .and_then(|a| a.as_bool())
            .unwrap_or(false)
    }
}
