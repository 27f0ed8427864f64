pub mod gad7;
pub mod phq9;
pub mod sdq;

use crate::template::{AnswerOption, Question};

/// The four-point frequency scale shared by the PHQ and GAD families.
pub(crate) fn frequency_options() -> Vec<AnswerOption> {
    [
        (0, "Not at all"),
        (1, "Several days"),
        (2, "More than half the days"),
        (3, "Nearly every day"),
    ]
    .into_iter()
    .map(|(value, text)| AnswerOption {
        value,
        text: text.to_string(),
        description: None,
    })
    .collect()
}

/// Build questions numbered from 1 with ids `{prefix}_{n}`, all sharing
/// the same options.
pub(crate) fn numbered_questions(
    prefix: &str,
    items: &[&str],
    options: Vec<AnswerOption>,
) -> Vec<Question> {
    items
        .iter()
        .enumerate()
        .map(|(i, text)| Question {
            id: format!("{prefix}_{}", i + 1),
            text: text.to_string(),
            order: i as u32 + 1,
            options: options.clone(),
        })
        .collect()
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
