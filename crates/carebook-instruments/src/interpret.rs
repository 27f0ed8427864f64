use crate::error::InstrumentError;
use crate::template::{Band, QuestionnaireTemplate};

/// Find the band for `score`, scanning rules in declaration order.
///
/// First match wins when bands overlap. A score no band covers is a fault in
/// the template data.
pub fn resolve(template: &QuestionnaireTemplate, score: u32) -> Result<&Band, InstrumentError> {
    let index = resolve_index(template, score)?;
    Ok(&template.interpretation_rules[index])
}

/// Position of the band [`resolve`] would return.
pub fn resolve_index(
    template: &QuestionnaireTemplate,
    score: u32,
) -> Result<usize, InstrumentError> {
    template
        .interpretation_rules
        .iter()
        .position(|band| band.contains(score))
        .ok_or(InstrumentError::NoInterpretationForScore(score))
}
