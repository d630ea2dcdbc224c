use ielts_scoring::domain::{FeedbackDomain, feedback_for};

#[test]
fn given_writing_scores_when_selecting_feedback_then_lands_in_expected_buckets() {
    let cases = [(4.9, 0), (5.4, 1), (6.4, 2), (7.4, 3), (8.0, 4)];

    for (score, bucket) in cases {
        assert_eq!(
            feedback_for(FeedbackDomain::Writing, score).bucket(),
            bucket,
            "score {}",
            score
        );
    }
}

#[test]
fn given_speaking_scores_when_selecting_feedback_then_lands_in_expected_buckets() {
    let cases = [(4.9, 0), (6.4, 1), (8.0, 2)];

    for (score, bucket) in cases {
        assert_eq!(
            feedback_for(FeedbackDomain::Speaking, score).bucket(),
            bucket,
            "score {}",
            score
        );
    }
}

#[test]
fn given_score_on_threshold_when_selecting_feedback_then_moves_to_next_bucket() {
    assert_eq!(feedback_for(FeedbackDomain::Writing, 5.0).bucket(), 1);
    assert_eq!(feedback_for(FeedbackDomain::Writing, 7.5).bucket(), 4);
    assert_eq!(feedback_for(FeedbackDomain::Speaking, 6.5).bucket(), 2);
}

#[test]
fn given_nan_score_when_selecting_feedback_then_uses_final_bundle() {
    assert_eq!(feedback_for(FeedbackDomain::Writing, f32::NAN).bucket(), 4);
    assert_eq!(feedback_for(FeedbackDomain::Speaking, f32::NAN).bucket(), 2);
}

#[test]
fn given_writing_bundle_when_iterating_then_covers_all_writing_criteria() {
    let bundle = feedback_for(FeedbackDomain::Writing, 6.0);

    let names: Vec<&str> = bundle.iter().map(|(name, _)| name).collect();

    assert_eq!(
        names,
        vec!["task_response", "coherence_cohesion", "vocabulary", "grammar"]
    );
    assert!(bundle.iter().all(|(_, text)| !text.is_empty()));
}

#[test]
fn given_speaking_bundle_when_looking_up_criterion_then_returns_text() {
    let bundle = feedback_for(FeedbackDomain::Speaking, 7.0);

    assert!(bundle.get("pronunciation").is_some());
    assert!(bundle.get("fluency_coherence").is_some());
    assert!(bundle.get("task_response").is_none());
}

#[test]
fn given_different_buckets_when_comparing_texts_then_they_differ() {
    let low = feedback_for(FeedbackDomain::Writing, 4.0);
    let high = feedback_for(FeedbackDomain::Writing, 8.5);

    assert_ne!(low.get("grammar"), high.get("grammar"));
}
