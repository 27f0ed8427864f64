use std::sync::LazyLock;

use carebook_core::models::risk::RiskLevel;

use super::strings;
use crate::Instrument;
use crate::template::{AnswerOption, Band, Question, QuestionnaireTemplate};

/// SDQ: Strengths and Difficulties Questionnaire, parent report, total
/// difficulties score.
///
/// The 20 items from the emotional, conduct, hyperactivity and peer subscales,
/// each 0–2. Positively worded items carry reversed option values. The
/// prosocial subscale does not count towards total difficulties and is left out.
pub struct Sdq;

/// `(questionnaire item number, text, reverse scored)`
const ITEMS: [(u32, &str, bool); 20] = [
    (2, "Restless, overactive, cannot stay still for long", false),
    (3, "Often complains of headaches, stomach-aches or sickness", false),
    (5, "Often has temper tantrums or hot tempers", false),
    (6, "Rather solitary, tends to play alone", false),
    (7, "Generally obedient, usually does what adults request", true),
    (8, "Many worries, often seems worried", false),
    (10, "Constantly fidgeting or squirming", false),
    (11, "Has at least one good friend", true),
    (12, "Often fights with other children or bullies them", false),
    (13, "Often unhappy, down-hearted or tearful", false),
    (14, "Generally liked by other children", true),
    (15, "Easily distracted, concentration wanders", false),
    (16, "Nervous or clingy in new situations, easily loses confidence", false),
    (18, "Often lies or cheats", false),
    (19, "Picked on or bullied by other children", false),
    (21, "Thinks things out before acting", true),
    (22, "Steals from home, school or elsewhere", false),
    (23, "Gets on better with adults than with other children", false),
    (24, "Many fears, easily scared", false),
    (25, "Sees tasks through to the end, good attention span", true),
];

fn options(reversed: bool) -> Vec<AnswerOption> {
    let labels = ["Not true", "Somewhat true", "Certainly true"];
    labels
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let i = i as u32;
            AnswerOption {
                value: if reversed { 2 - i } else { i },
                text: text.to_string(),
                description: None,
            }
        })
        .collect()
}

impl Instrument for Sdq {
    fn template(&self) -> &QuestionnaireTemplate {
        static TEMPLATE: LazyLock<QuestionnaireTemplate> = LazyLock::new(|| {
            let questions = ITEMS
                .iter()
                .enumerate()
                .map(|(i, (item, text, reversed))| Question {
                    id: format!("sdq_{item}"),
                    text: text.to_string(),
                    order: i as u32 + 1,
                    options: options(*reversed),
                })
                .collect();

            QuestionnaireTemplate {
                code: "SDQ".to_string(),
                name: "Strengths and Difficulties Questionnaire (total difficulties)".to_string(),
                description: Some(
                    "Thinking about the child's behaviour over the last six months.".to_string(),
                ),
                max_score: 40,
                questions,
                interpretation_rules: vec![
                    Band {
                        min_score: 0,
                        max_score: 13,
                        level: RiskLevel::Low,
                        interpretation: "Close to average".to_string(),
                        recommendations: strings(&["No further action needed"]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 14,
                        max_score: 16,
                        level: RiskLevel::Medium,
                        interpretation: "Slightly raised".to_string(),
                        recommendations: strings(&[
                            "Review subscale items with the parent",
                            "Rescreen in 3 months",
                        ]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 17,
                        max_score: 19,
                        level: RiskLevel::High,
                        interpretation: "High".to_string(),
                        recommendations: strings(&[
                            "Arrange a full developmental and mental health assessment",
                        ]),
                        alert_message: None,
                    },
                    Band {
                        min_score: 20,
                        max_score: 40,
                        level: RiskLevel::High,
                        interpretation: "Very high".to_string(),
                        recommendations: strings(&[
                            "Refer to child and adolescent mental health services",
                            "Gather teacher-report SDQ to corroborate",
                        ]),
                        alert_message: None,
                    },
                ],
            }
        });
        &TEMPLATE
    }
}
