mod common;

use std::time::{Duration, Instant};

use carebook_core::models::risk::RiskLevel;
use carebook_instruments::all_instruments;
use carebook_instruments::template::{AnswerOption, QuestionnaireTemplate};
use common::{band, small_template};

#[test]
fn builtin_templates_are_valid() {
    for instrument in all_instruments() {
        let template = instrument.template();
        assert_eq!(template.validate(), Ok(()), "{} should validate", instrument.code());
        assert_eq!(template.achievable_max(), Some(template.max_score));
    }
}

#[test]
fn builtin_max_scores() {
    let max: Vec<(String, u32)> = all_instruments()
        .iter()
        .map(|i| (i.code().to_string(), i.template().max_score))
        .collect();
    assert!(max.contains(&("PHQ-9".to_string(), 27)));
    assert!(max.contains(&("GAD-7".to_string(), 21)));
    assert!(max.contains(&("SDQ".to_string(), 40)));
}

#[test]
fn question_without_options_names_the_field() {
    let mut template = small_template();
    template.questions[1].options.clear();
    template.max_score = 4;

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "questions[1].options");
    assert_eq!(err.template_code, "SMALL-3");
}

#[test]
fn gap_in_band_coverage_is_rejected() {
    let mut template = small_template();
    template.interpretation_rules = vec![
        band(0, 2, RiskLevel::Low, "Low"),
        band(4, 6, RiskLevel::High, "High"),
    ];

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "interpretation_rules");
    assert!(err.message.contains("score 3"));
}

#[test]
fn bands_stopping_short_of_max_are_rejected() {
    let mut template = small_template();
    template.interpretation_rules = vec![band(0, 5, RiskLevel::Low, "Low")];

    let err = template.validate().unwrap_err();
    assert!(err.message.contains("score 6"));
}

#[test]
fn max_score_must_match_options() {
    let mut template = small_template();
    template.max_score = 9;

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "max_score");
}

#[test]
fn duplicate_question_ids_are_rejected() {
    let mut template = small_template();
    template.questions[2].id = "q1".to_string();

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "questions[2].id");
}

#[test]
fn duplicate_option_values_are_rejected() {
    let mut template = small_template();
    template.questions[0].options[1].value = 0;

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "questions[0].options[1].value");
}

#[test]
fn inverted_band_is_rejected() {
    let mut template = small_template();
    template.interpretation_rules.push(band(5, 2, RiskLevel::Low, "Backwards"));

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "interpretation_rules[2]");
}

#[test]
fn empty_template_is_rejected() {
    let mut template = small_template();
    template.questions.clear();
    template.max_score = 0;
    assert_eq!(template.validate().unwrap_err().field, "questions");

    let mut template = small_template();
    template.code = "  ".to_string();
    assert_eq!(template.validate().unwrap_err().field, "code");

    let mut template = small_template();
    template.interpretation_rules.clear();
    assert_eq!(template.validate().unwrap_err().field, "interpretation_rules");
}

#[test]
fn overlapping_bands_validate_and_are_reported() {
    let mut template = small_template();
    template.interpretation_rules = vec![
        band(0, 4, RiskLevel::Low, "Low"),
        band(3, 6, RiskLevel::High, "High"),
    ];

    assert_eq!(template.validate(), Ok(()));
    assert_eq!(template.overlapping_bands(), vec![(0, 1)]);
    assert!(small_template().overlapping_bands().is_empty());
}

#[test]
fn template_json_uses_snake_case_fields() {
    let json = serde_json::to_value(small_template()).unwrap();
    assert_eq!(json["interpretation_rules"][1]["level"], "high");
    assert_eq!(json["questions"][0]["options"][2]["value"], 2);
    assert!(json["questions"][0]["options"][0].get("description").is_none());
}

#[test]
fn option_maxima_overflowing_u32_are_rejected() {
    let mut template = small_template();
    for question in &mut template.questions {
        question.options.push(AnswerOption {
            value: u32::MAX / 2,
            text: "Huge".to_string(),
            description: None,
        });
    }

    assert_eq!(template.achievable_max(), None);
    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "max_score");
    assert!(err.message.contains("overflows"));
}

/// Three questions with options {0, 1_000_000_000}; max 3_000_000_000.
fn wide_template() -> QuestionnaireTemplate {
    let mut template = small_template();
    for question in &mut template.questions {
        question.options = [0, 1_000_000_000]
            .into_iter()
            .map(|value| AnswerOption {
                value,
                text: format!("Option {value}"),
                description: None,
            })
            .collect();
    }
    template.max_score = 3_000_000_000;
    template.interpretation_rules = vec![band(0, 3_000_000_000, RiskLevel::Low, "All")];
    template
}

#[test]
fn wide_score_range_validates_quickly() {
    let template = wide_template();
    let started = Instant::now();
    assert_eq!(template.validate(), Ok(()));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn gap_is_found_in_wide_unsorted_bands() {
    let mut template = wide_template();
    template.interpretation_rules = vec![
        band(2_000_000_000, 3_000_000_000, RiskLevel::High, "Top"),
        band(0, 1_500_000_000, RiskLevel::Low, "Bottom"),
    ];

    let err = template.validate().unwrap_err();
    assert_eq!(err.field, "interpretation_rules");
    assert!(err.message.contains("score 1500000001 "));
}

#[test]
fn overlapping_unsorted_bands_still_cover() {
    let mut template = small_template();
    template.interpretation_rules = vec![
        band(3, 6, RiskLevel::High, "High"),
        band(0, 1, RiskLevel::Low, "Low"),
        band(1, 4, RiskLevel::Medium, "Middle"),
    ];
    assert_eq!(template.validate(), Ok(()));

    template.interpretation_rules.remove(2);
    assert!(template.validate().unwrap_err().message.contains("score 2 "));
}
