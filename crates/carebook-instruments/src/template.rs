use std::collections::HashSet;

use carebook_core::models::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// One selectable answer. `value` is the number of points it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub value: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub order: u32,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, value: u32) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Highest value any option of this question contributes.
    pub fn max_value(&self) -> u32 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }
}

/// A score range mapped to a risk level and the guidance shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub min_score: u32,
    pub max_score: u32,
    pub level: RiskLevel,
    pub interpretation: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
}

impl Band {
    pub fn contains(&self, score: u32) -> bool {
        self.min_score <= score && score <= self.max_score
    }

    fn overlaps(&self, other: &Band) -> bool {
        self.min_score <= other.max_score && other.min_score <= self.max_score
    }
}

/// An immutable questionnaire definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireTemplate {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub max_score: u32,
    pub questions: Vec<Question>,
    /// Checked in declaration order; the first band containing a score wins.
    pub interpretation_rules: Vec<Band>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{template_code}: {field}: {message}")]
pub struct TemplateValidationError {
    pub template_code: String,
    pub field: String,
    pub message: String,
}

impl QuestionnaireTemplate {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Sum of the highest option value of every question, or `None` if it
    /// does not fit in a `u32`.
    pub fn achievable_max(&self) -> Option<u32> {
        self.questions
            .iter()
            .try_fold(0u32, |total, q| total.checked_add(q.max_value()))
    }

    /// Check every structural invariant the engine relies on.
    ///
    /// Overlapping bands are not an error: resolution is first-match, see
    /// [`QuestionnaireTemplate::overlapping_bands`].
    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        if self.code.trim().is_empty() {
            return Err(self.invalid("code", "must not be empty"));
        }
        if self.questions.is_empty() {
            return Err(self.invalid("questions", "template has no questions"));
        }

        let mut seen_ids = HashSet::new();
        for (i, question) in self.questions.iter().enumerate() {
            if question.id.trim().is_empty() {
                return Err(self.invalid(format!("questions[{i}].id"), "must not be empty"));
            }
            if !seen_ids.insert(question.id.as_str()) {
                return Err(self.invalid(
                    format!("questions[{i}].id"),
                    format!("duplicate question id '{}'", question.id),
                ));
            }
            if question.options.is_empty() {
                return Err(self.invalid(
                    format!("questions[{i}].options"),
                    format!("question '{}' has no options", question.id),
                ));
            }
            let mut seen_values = HashSet::new();
            for (j, option) in question.options.iter().enumerate() {
                if !seen_values.insert(option.value) {
                    return Err(self.invalid(
                        format!("questions[{i}].options[{j}].value"),
                        format!(
                            "value {} appears more than once in question '{}'",
                            option.value, question.id
                        ),
                    ));
                }
            }
        }

        let achievable = self
            .achievable_max()
            .ok_or_else(|| self.invalid("max_score", "sum of option maxima overflows u32"))?;
        if self.max_score != achievable {
            return Err(self.invalid(
                "max_score",
                format!(
                    "declared {} but the questions allow at most {achievable}",
                    self.max_score
                ),
            ));
        }

        if self.interpretation_rules.is_empty() {
            return Err(self.invalid("interpretation_rules", "no bands defined"));
        }
        for (i, band) in self.interpretation_rules.iter().enumerate() {
            if band.min_score > band.max_score {
                return Err(self.invalid(
                    format!("interpretation_rules[{i}]"),
                    format!(
                        "min_score {} is greater than max_score {}",
                        band.min_score, band.max_score
                    ),
                ));
            }
        }
        if let Some(score) = self.first_uncovered_score() {
            return Err(self.invalid(
                "interpretation_rules",
                format!("score {score} is not covered by any band"),
            ));
        }

        Ok(())
    }

    /// Lowest score in `[0, max_score]` that no band contains.
    ///
    /// Sweeps the band intervals sorted by `min_score`, so the cost depends on
    /// the number of bands rather than the width of the score range.
    fn first_uncovered_score(&self) -> Option<u32> {
        let mut ranges: Vec<(u32, u32)> = self
            .interpretation_rules
            .iter()
            .map(|b| (b.min_score, b.max_score))
            .collect();
        ranges.sort_unstable();

        // Next score not yet covered; u64 so `u32::MAX + 1` is representable.
        let mut next = 0u64;
        let end = u64::from(self.max_score);
        for (min, max) in ranges {
            if next > end {
                break;
            }
            if u64::from(min) > next {
                break;
            }
            next = next.max(u64::from(max) + 1);
        }
        // `next <= end <= u32::MAX` here, so the conversion cannot fail.
        (next <= end).then(|| u32::try_from(next).unwrap_or(u32::MAX))
    }

    /// Index pairs of bands whose ranges intersect. The earlier band of each
    /// pair shadows the later one for the shared scores.
    pub fn overlapping_bands(&self) -> Vec<(usize, usize)> {
        let rules = &self.interpretation_rules;
        let mut pairs = Vec::new();
        for (i, a) in rules.iter().enumerate() {
            for (j, b) in rules.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn invalid(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> TemplateValidationError {
        TemplateValidationError {
            template_code: self.code.clone(),
            field: field.into(),
            message: message.into(),
        }
    }
}
