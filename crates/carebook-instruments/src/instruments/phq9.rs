use std::sync::LazyLock;

use carebook_core::models::risk::RiskLevel;

use super::{frequency_options, numbered_questions, strings};
use crate::Instrument;
use crate::template::{Band, QuestionnaireTemplate};

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items rated 0–3 over the last two weeks. Total 0–27.
pub struct Phq9;

impl Instrument for Phq9 {
    fn template(&self) -> &QuestionnaireTemplate {
        static TEMPLATE: LazyLock<QuestionnaireTemplate> = LazyLock::new(|| {
            let items = [
                "Little interest or pleasure in doing things",
                "Feeling down, depressed, or hopeless",
                "Trouble falling or staying asleep, or sleeping too much",
                "Feeling tired or having little energy",
                "Poor appetite or overeating",
                "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
                "Trouble concentrating on things, such as reading the newspaper or watching television",
                "Moving or speaking so slowly that other people could have noticed, or being so fidgety or restless that you have been moving around a lot more than usual",
                "Thoughts that you would be better off dead, or of hurting yourself in some way",
            ];

            QuestionnaireTemplate {
                code: "PHQ-9".to_string(),
                name: "Patient Health Questionnaire-9".to_string(),
                description: Some(
                    "Over the last 2 weeks, how often have you been bothered by any of the following problems?"
                        .to_string(),
                ),
                max_score: 27,
                questions: numbered_questions("phq9", &items, frequency_options()),
                interpretation_rules: vec![
                    Band {
                        min_score: 0,
                        max_score: 4,
                        level: RiskLevel::Low,
                        interpretation: "Minimal or no depression".to_string(),
                        recommendations: strings(&["Rescreen at the next routine visit"]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 5,
                        max_score: 9,
                        level: RiskLevel::Low,
                        interpretation: "Mild depression".to_string(),
                        recommendations: strings(&[
                            "Watchful waiting",
                            "Repeat PHQ-9 at follow-up",
                        ]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 10,
                        max_score: 14,
                        level: RiskLevel::Medium,
                        interpretation: "Moderate depression".to_string(),
                        recommendations: strings(&[
                            "Develop a treatment plan",
                            "Consider counseling, follow-up and/or pharmacotherapy",
                        ]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 15,
                        max_score: 19,
                        level: RiskLevel::High,
                        interpretation: "Moderately severe depression".to_string(),
                        recommendations: strings(&[
                            "Active treatment with pharmacotherapy and/or psychotherapy",
                            "Schedule follow-up within 2 weeks",
                        ]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 20,
                        max_score: 27,
                        level: RiskLevel::Critical,
                        interpretation: "Severe depression".to_string(),
                        recommendations: strings(&[
                            "Immediate initiation of pharmacotherapy",
                            "Expedited referral to a mental health specialist",
                            "Assess suicide risk before the patient leaves",
                        ]),
                        alert_message: Some(
                            "Severe depression indicated. Complete a suicide risk assessment today."
                                .to_string(),
                        ),
                    },
                ],
            }
        });
        &TEMPLATE
    }
}
