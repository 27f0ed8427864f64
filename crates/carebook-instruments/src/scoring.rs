use crate::responses::ResponseSet;
use crate::template::QuestionnaireTemplate;

/// Total score of a complete or partial response set.
///
/// Unanswered questions contribute nothing. Answers to ids the template does
/// not define are ignored.
pub fn compute_score(template: &QuestionnaireTemplate, responses: &ResponseSet) -> u32 {
    template
        .questions
        .iter()
        .filter_map(|q| responses.get(&q.id))
        .sum()
}

