use ielts_scoring::domain::{BandPrediction, ClassificationResult, TOP_PREDICTIONS, WRITING_BANDS};

#[test]
fn given_band_table_when_inspected_then_spans_half_bands_from_three_and_a_half_to_nine() {
    assert_eq!(WRITING_BANDS.len(), 12);
    assert_eq!(WRITING_BANDS[0], 3.5);
    assert_eq!(WRITING_BANDS[11], 9.0);
    assert!(WRITING_BANDS.windows(2).all(|w| (w[1] - w[0] - 0.5).abs() < f32::EPSILON));
}

#[test]
fn given_twelve_class_result_when_mapping_to_band_then_uses_predicted_index() {
    let mut logits = vec![0.0; 12];
    logits[7] = 4.0;
    logits[2] = 2.0;
    let result = ClassificationResult::from_logits(&logits).unwrap();

    let prediction = BandPrediction::from_classification(&result).unwrap();

    assert_eq!(prediction.band, 7.0);
    assert_eq!(prediction.confidence, result.confidence());
    assert_eq!(prediction.top_predictions.len(), TOP_PREDICTIONS);
    assert_eq!(prediction.top_predictions[0].band, 7.0);
    assert_eq!(prediction.top_predictions[1].band, 4.5);
}

#[test]
fn given_prediction_when_inspecting_top_predictions_then_sorted_and_bands_valid() {
    let logits: Vec<f32> = (0..12).map(|i| ((i * 7) % 5) as f32).collect();
    let result = ClassificationResult::from_logits(&logits).unwrap();

    let prediction = BandPrediction::from_classification(&result).unwrap();

    assert!(
        prediction
            .top_predictions
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability)
    );
    assert!(
        prediction
            .top_predictions
            .iter()
            .all(|r| WRITING_BANDS.contains(&r.band))
    );
    assert_eq!(prediction.top_predictions[0].band, prediction.band);
}

#[test]
fn given_wrong_class_count_when_mapping_to_band_then_returns_none() {
    let result = ClassificationResult::from_logits(&[1.0, 2.0, 3.0]).unwrap();

    assert!(BandPrediction::from_classification(&result).is_none());
}
