use std::collections::BTreeMap;

use crate::error::InstrumentError;
use crate::template::QuestionnaireTemplate;

/// Answers selected so far in one assessment attempt.
///
/// Keeps a running total alongside the answers so that a changed answer
/// updates the score in constant time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSet {
    answers: BTreeMap<String, u32>,
    running_total: u32,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `question_id`, replacing any earlier answer.
    ///
    /// Returns the previous value. On error nothing is changed.
    pub fn set_answer(
        &mut self,
        template: &QuestionnaireTemplate,
        question_id: &str,
        value: u32,
    ) -> Result<Option<u32>, InstrumentError> {
        let question =
            template
                .question(question_id)
                .ok_or_else(|| InstrumentError::UnknownQuestion {
                    template_code: template.code.clone(),
                    question_id: question_id.to_string(),
                })?;
        if question.option(value).is_none() {
            return Err(InstrumentError::InvalidOptionValue {
                question_id: question_id.to_string(),
                value,
            });
        }

        let previous = self.answers.insert(question_id.to_string(), value);
        self.running_total = self.running_total - previous.unwrap_or(0) + value;
        Ok(previous)
    }

    /// Revert `question_id` to unanswered, returning the removed value.
    pub fn clear(&mut self, question_id: &str) -> Option<u32> {
        let removed = self.answers.remove(question_id)?;
        self.running_total -= removed;
        Some(removed)
    }

    /// Put back the state a `set_answer` call replaced.
    pub(crate) fn restore(&mut self, question_id: &str, previous: Option<u32>) {
        self.clear(question_id);
        if let Some(value) = previous {
            self.answers.insert(question_id.to_string(), value);
            self.running_total += value;
        }
    }

    pub fn get(&self, question_id: &str) -> Option<u32> {
        self.answers.get(question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Sum of all selected values, maintained incrementally.
    pub fn running_total(&self) -> u32 {
        self.running_total
    }

    /// Answered questions over total questions, in `[0, 1]`.
    pub fn completion_ratio(&self, template: &QuestionnaireTemplate) -> f64 {
        let total = template.question_count();
        if total == 0 {
            return 0.0;
        }
        self.answered_count() as f64 / total as f64
    }

    pub fn is_complete(&self, template: &QuestionnaireTemplate) -> bool {
        template
            .questions
            .iter()
            .all(|q| self.answers.contains_key(&q.id))
    }

    /// Ids of questions still unanswered, in template order.
    pub fn unanswered<'t>(&self, template: &'t QuestionnaireTemplate) -> Vec<&'t str> {
        template
            .questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| q.id.as_str())
            .collect()
    }
}
