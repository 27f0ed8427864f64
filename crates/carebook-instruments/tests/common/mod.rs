#![allow(dead_code)]

use std::sync::Arc;

use carebook_core::models::risk::RiskLevel;
use carebook_instruments::get_instrument;
use carebook_instruments::template::{AnswerOption, Band, Question, QuestionnaireTemplate};

pub fn phq9() -> Arc<QuestionnaireTemplate> {
    Arc::new(
        get_instrument("PHQ-9")
            .expect("PHQ-9 is built in")
            .template()
            .clone(),
    )
}

pub fn band(min_score: u32, max_score: u32, level: RiskLevel, interpretation: &str) -> Band {
    Band {
        min_score,
        max_score,
        level,
        interpretation: interpretation.to_string(),
        recommendations: Vec::new(),
        alert_message: None,
    }
}

/// Three questions scored 0..=2 each, max 6, two bands.
pub fn small_template() -> QuestionnaireTemplate {
    let questions = (1..=3)
        .map(|n| Question {
            id: format!("q{n}"),
            text: format!("Question {n}"),
            order: n,
            options: (0..=2)
                .map(|value| AnswerOption {
                    value,
                    text: format!("Option {value}"),
                    description: None,
                })
                .collect(),
        })
        .collect();

    QuestionnaireTemplate {
        code: "SMALL-3".to_string(),
        name: "Small test questionnaire".to_string(),
        description: None,
        max_score: 6,
        questions,
        interpretation_rules: vec![
            band(0, 3, RiskLevel::Low, "Within normal limits"),
            band(4, 6, RiskLevel::High, "Elevated"),
        ],
    }
}
