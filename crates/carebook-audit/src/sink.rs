//! Destinations for finalized assessments.
//!
//! A sink only appends. It never confirms durability back to the engine and
//! never retries; a failed append is returned to the caller as-is.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, Write};
use std::path::Path;

use carebook_core::models::completed::CompletedAssessment;
use tracing::info;

use crate::error::AuditError;
use crate::events::AuditEvent;

pub trait AssessmentSink {
    fn append(&mut self, record: &CompletedAssessment) -> Result<(), AuditError>;
}

/// Keeps records in memory, in append order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<CompletedAssessment>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CompletedAssessment] {
        &self.records
    }
}

impl AssessmentSink for MemorySink {
    fn append(&mut self, record: &CompletedAssessment) -> Result<(), AuditError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<File> {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: &Path) -> Result<Self, AuditError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> AssessmentSink for JsonLinesSink<W> {
    fn append(&mut self, record: &CompletedAssessment) -> Result<(), AuditError> {
        let mut line = record.to_json_line()?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Emits an [`AuditEvent`] for every record and forwards it to an inner sink.
#[derive(Debug)]
pub struct AuditedSink<S> {
    inner: S,
    actor: String,
}

impl<S: AssessmentSink> AuditedSink<S> {
    pub fn new(inner: S, actor: impl Into<String>) -> Self {
        Self {
            inner,
            actor: actor.into(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: AssessmentSink> AssessmentSink for AuditedSink<S> {
    fn append(&mut self, record: &CompletedAssessment) -> Result<(), AuditError> {
        self.inner.append(record)?;
        AuditEvent::assessment_completed(record, self.actor.as_str()).emit();
        Ok(())
    }
}

/// Read back every record of a JSON-lines audit log. Blank lines are skipped.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<CompletedAssessment>, AuditError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| AuditError::MalformedLine {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    info!(count = records.len(), "audit log read");
    Ok(records)
}
