mod common;

use carebook_instruments::error::InstrumentError;
use carebook_instruments::responses::ResponseSet;
use carebook_instruments::scoring::compute_score;
use common::{phq9, small_template};

#[test]
fn empty_response_set_scores_zero() {
    let template = small_template();
    let responses = ResponseSet::new();
    assert_eq!(compute_score(&template, &responses), 0);
    assert_eq!(responses.completion_ratio(&template), 0.0);
}

#[test]
fn partial_answers_sum_selected_values() {
    let template = small_template();
    let mut responses = ResponseSet::new();
    responses.set_answer(&template, "q1", 2).unwrap();
    responses.set_answer(&template, "q3", 1).unwrap();

    assert_eq!(compute_score(&template, &responses), 3);
    assert_eq!(responses.running_total(), 3);
    assert_eq!(responses.unanswered(&template), vec!["q2"]);
}

#[test]
fn score_is_deterministic() {
    let template = phq9();
    let mut responses = ResponseSet::new();
    for (i, question) in template.questions.iter().enumerate() {
        responses
            .set_answer(&template, &question.id, (i % 4) as u32)
            .unwrap();
    }

    let first = compute_score(&template, &responses);
    for _ in 0..5 {
        assert_eq!(compute_score(&template, &responses), first);
    }
    assert_eq!(compute_score(&template, &responses.clone()), first);
}

#[test]
fn score_stays_within_bounds() {
    let template = phq9();
    let mut responses = ResponseSet::new();
    for value in 0..=3 {
        for question in &template.questions {
            responses.set_answer(&template, &question.id, value).unwrap();
            let score = compute_score(&template, &responses);
            assert!(score <= template.max_score);
        }
    }
    assert_eq!(compute_score(&template, &responses), template.max_score);
}

#[test]
fn overwrite_changes_score_by_difference() {
    let template = small_template();
    let mut responses = ResponseSet::new();
    responses.set_answer(&template, "q1", 1).unwrap();
    responses.set_answer(&template, "q2", 2).unwrap();
    let before = compute_score(&template, &responses);

    let previous = responses.set_answer(&template, "q2", 2).unwrap();
    assert_eq!(previous, Some(2));
    assert_eq!(compute_score(&template, &responses), before);

    responses.set_answer(&template, "q2", 0).unwrap();
    assert_eq!(compute_score(&template, &responses), before - 2);
    assert_eq!(responses.running_total(), before - 2);
    assert_eq!(responses.answered_count(), 2);
}

#[test]
fn clear_reverts_question_to_unanswered() {
    let template = small_template();
    let mut responses = ResponseSet::new();
    responses.set_answer(&template, "q1", 2).unwrap();
    responses.set_answer(&template, "q2", 1).unwrap();

    assert_eq!(responses.clear("q1"), Some(2));
    assert_eq!(responses.clear("q1"), None);
    assert_eq!(responses.get("q1"), None);
    assert_eq!(compute_score(&template, &responses), 1);
    assert_eq!(responses.running_total(), 1);
}

#[test]
fn unknown_question_is_rejected() {
    let template = small_template();
    let mut responses = ResponseSet::new();
    let err = responses.set_answer(&template, "q9", 1).unwrap_err();

    assert!(matches!(
        err,
        InstrumentError::UnknownQuestion { ref question_id, .. } if question_id == "q9"
    ));
    assert!(responses.is_empty());
}

#[test]
fn value_outside_options_is_rejected() {
    let template = small_template();
    let mut responses = ResponseSet::new();
    responses.set_answer(&template, "q1", 1).unwrap();

    let err = responses.set_answer(&template, "q1", 7).unwrap_err();
    assert!(matches!(err, InstrumentError::InvalidOptionValue { value: 7, .. }));
    assert_eq!(responses.get("q1"), Some(1));
    assert_eq!(responses.running_total(), 1);
}

#[test]
fn completion_ratio_tracks_answers() {
    let template = small_template();
    let mut responses = ResponseSet::new();
    responses.set_answer(&template, "q1", 0).unwrap();
    assert!((responses.completion_ratio(&template) - 1.0 / 3.0).abs() < 1e-9);

    responses.set_answer(&template, "q2", 0).unwrap();
    responses.set_answer(&template, "q3", 0).unwrap();
    assert_eq!(responses.completion_ratio(&template), 1.0);
    assert!(responses.is_complete(&template));
}
