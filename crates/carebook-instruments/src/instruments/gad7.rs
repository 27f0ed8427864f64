use std::sync::LazyLock;

use carebook_core::models::risk::RiskLevel;

use super::{frequency_options, numbered_questions, strings};
use crate::Instrument;
use crate::template::{Band, QuestionnaireTemplate};

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0–3. Total 0–21; 10 is the usual referral cut-point.
pub struct Gad7;

impl Instrument for Gad7 {
    fn template(&self) -> &QuestionnaireTemplate {
        static TEMPLATE: LazyLock<QuestionnaireTemplate> = LazyLock::new(|| {
            let items = [
                "Feeling nervous, anxious, or on edge",
                "Not being able to stop or control worrying",
                "Worrying too much about different things",
                "Trouble relaxing",
                "Being so restless that it is hard to sit still",
                "Becoming easily annoyed or irritable",
                "Feeling afraid, as if something awful might happen",
            ];

            QuestionnaireTemplate {
                code: "GAD-7".to_string(),
                name: "Generalized Anxiety Disorder-7".to_string(),
                description: Some(
                    "Over the last 2 weeks, how often have you been bothered by the following problems?"
                        .to_string(),
                ),
                max_score: 21,
                questions: numbered_questions("gad7", &items, frequency_options()),
                interpretation_rules: vec![
                    Band {
                        min_score: 0,
                        max_score: 4,
                        level: RiskLevel::Low,
                        interpretation: "Minimal anxiety".to_string(),
                        recommendations: strings(&["No intervention indicated"]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 5,
                        max_score: 9,
                        level: RiskLevel::Low,
                        interpretation: "Mild anxiety".to_string(),
                        recommendations: strings(&["Monitor and rescreen in 4 weeks"]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 10,
                        max_score: 14,
                        level: RiskLevel::Medium,
                        interpretation: "Moderate anxiety".to_string(),
                        recommendations: strings(&[
                            "Further evaluation recommended",
                            "Consider referral for psychotherapy",
                        ]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 15,
                        max_score: 21,
                        level: RiskLevel::High,
                        interpretation: "Severe anxiety".to_string(),
                        recommendations: strings(&[
                            "Active treatment warranted",
                            "Refer to a mental health specialist",
                        ]),
                        alert_message: None,
                    },
                ],
            }
        });
        &TEMPLATE
    }
}
