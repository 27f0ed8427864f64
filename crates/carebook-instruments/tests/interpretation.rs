mod common;

use carebook_core::models::risk::RiskLevel;
use carebook_instruments::all_instruments;
use carebook_instruments::error::InstrumentError;
use carebook_instruments::interpret::{resolve, resolve_index};
use common::{band, phq9, small_template};

#[test]
fn every_score_resolves_for_builtin_templates() {
    for instrument in all_instruments() {
        let template = instrument.template();
        for score in 0..=template.max_score {
            let band = resolve(template, score).unwrap();
            assert!(band.contains(score));
            let matching = template
                .interpretation_rules
                .iter()
                .filter(|b| b.contains(score))
                .count();
            assert_eq!(matching, 1, "{} score {score}", template.code);
        }
    }
}

#[test]
fn risk_never_decreases_as_score_rises() {
    for instrument in all_instruments() {
        let template = instrument.template();
        let mut last = RiskLevel::Low;
        for score in 0..=template.max_score {
            let level = resolve(template, score).unwrap().level;
            assert!(level >= last, "{} drops risk at score {score}", template.code);
            last = level;
        }
    }
}

#[test]
fn phq9_band_edges() {
    let template = phq9();
    let cases = [
        (0, "Minimal or no depression"),
        (4, "Minimal or no depression"),
        (5, "Mild depression"),
        (10, "Moderate depression"),
        (14, "Moderate depression"),
        (15, "Moderately severe depression"),
        (19, "Moderately severe depression"),
        (20, "Severe depression"),
        (27, "Severe depression"),
    ];
    for (score, expected) in cases {
        assert_eq!(resolve(&template, score).unwrap().interpretation, expected);
    }

    let severe = resolve(&template, 22).unwrap();
    assert_eq!(severe.level, RiskLevel::Critical);
    assert!(severe.alert_message.is_some());
}

#[test]
fn first_matching_band_wins_on_overlap() {
    let mut template = small_template();
    template.interpretation_rules = vec![
        band(0, 4, RiskLevel::Low, "first"),
        band(3, 6, RiskLevel::High, "second"),
    ];

    assert_eq!(resolve(&template, 3).unwrap().interpretation, "first");
    assert_eq!(resolve(&template, 4).unwrap().interpretation, "first");
    assert_eq!(resolve(&template, 5).unwrap().interpretation, "second");
    assert_eq!(resolve_index(&template, 4).unwrap(), 0);
}

#[test]
fn uncovered_score_is_a_data_fault() {
    let mut template = small_template();
    template.interpretation_rules = vec![band(0, 2, RiskLevel::Low, "Low")];

    let err = resolve(&template, 5).unwrap_err();
    assert!(matches!(err, InstrumentError::NoInterpretationForScore(5)));
}
