//! carebook-instruments
//!
//! Questionnaire templates and the scoring/interpretation engine. Pure
//! in-memory computation: a template and a stream of answers go in, a live
//! score with its risk band comes out, and a finalized session freezes into a
//! [`carebook_core::models::completed::CompletedAssessment`].

pub mod error;
pub mod instruments;
pub mod interpret;
pub mod responses;
pub mod scoring;
pub mod session;
pub mod store;
pub mod template;

use template::QuestionnaireTemplate;

/// A standardized questionnaire shipped with the engine.
pub trait Instrument: Send + Sync {
    /// Template code (e.g., "PHQ-9").
    fn code(&self) -> &str {
        &self.template().code
    }

    /// Human-readable name.
    fn name(&self) -> &str {
        &self.template().name
    }

    /// The full template definition.
    fn template(&self) -> &QuestionnaireTemplate;
}

/// Return all built-in instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::sdq::Sdq),
    ]
}

/// Look up a built-in instrument by template code.
pub fn get_instrument(code: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.code() == code)
}
