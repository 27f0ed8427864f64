use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::Path;

use carebook_audit::sink::{AssessmentSink, read_json_lines};
use carebook_core::models::completed::CompletedAssessment;
use carebook_instruments::session::{AssessmentSession, LiveState};
use carebook_instruments::store::TemplateStore;
use serde::Serialize;

use crate::config::CarebookConfig;

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub code: String,
    pub name: String,
    pub questions: usize,
    pub max_score: u32,
}

/// Result of replaying an answer file through a session.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutcome {
    pub live: LiveState,
    pub unanswered: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<CompletedAssessment>,
}

/// Build the template store the config describes.
pub fn build_store(config: &CarebookConfig) -> eyre::Result<TemplateStore> {
    let mut store = if config.include_builtin {
        TemplateStore::with_builtin()?
    } else {
        TemplateStore::new()
    };
    if let Some(dir) = &config.template_dir {
        store.load_dir(dir)?;
    }
    Ok(store)
}

pub fn list_templates(store: &TemplateStore) -> Vec<TemplateSummary> {
    store
        .iter()
        .map(|t| TemplateSummary {
            code: t.code.clone(),
            name: t.name.clone(),
            questions: t.question_count(),
            max_score: t.max_score,
        })
        .collect()
}

pub fn show_template(store: &TemplateStore, code: &str) -> eyre::Result<String> {
    let template = store.get(code)?;
    Ok(serde_json::to_string_pretty(&*template)?)
}

/// Read an answer file: a JSON object mapping question id to option value.
pub fn read_answers(path: &Path) -> eyre::Result<Vec<(String, u32)>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
    let answers: BTreeMap<String, u32> = serde_json::from_str(&contents)?;
    Ok(answers.into_iter().collect())
}

/// Replay `answers` through a fresh session. When a sink is given the
/// session is finalized and the completed record appended to it.
pub fn score(
    store: &TemplateStore,
    code: &str,
    patient_id: &str,
    answers: &[(String, u32)],
    sink: Option<&mut dyn AssessmentSink>,
) -> eyre::Result<ScoreOutcome> {
    let template = store.get(code)?;
    let mut session = AssessmentSession::start(template, patient_id)?;
    for (question_id, value) in answers {
        session.answer(question_id, *value)?;
    }

    let live = session.live_state();
    let unanswered = session
        .responses()
        .unanswered(session.template())
        .into_iter()
        .map(str::to_string)
        .collect();

    let completed = match sink {
        Some(sink) => {
            let record = session.finalize()?;
            sink.append(&record)?;
            Some(record)
        }
        None => None,
    };

    Ok(ScoreOutcome {
        live,
        unanswered,
        completed,
    })
}

/// Completed assessments from the audit log, optionally for one patient.
/// A missing log means nothing has been recorded yet.
pub fn history(
    audit_log: &Path,
    patient_id: Option<&str>,
) -> eyre::Result<Vec<CompletedAssessment>> {
    if !audit_log.exists() {
        return Ok(Vec::new());
    }
    let file = std::fs::File::open(audit_log)?;
    let mut records = read_json_lines(BufReader::new(file))?;
    if let Some(patient_id) = patient_id {
        records.retain(|r| r.patient_id == patient_id);
    }
    Ok(records)
}
