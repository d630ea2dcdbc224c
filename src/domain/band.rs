use super::classification::ClassificationResult;

/// Writing band classes in model output order.
pub const WRITING_BANDS: [f32; 12] = [3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0];

pub const TOP_PREDICTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedBand {
    pub band: f32,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandPrediction {
    pub band: f32,
    pub confidence: f32,
    pub top_predictions: Vec<RankedBand>,
}

impl BandPrediction {
    /// Maps a writing classification onto [`WRITING_BANDS`]. Returns `None`
    /// when the class count does not match the band table.
    pub fn from_classification(result: &ClassificationResult) -> Option<Self> {
        if result.num_classes() != WRITING_BANDS.len() {
            return None;
        }

        let top_predictions = result
            .top_k(TOP_PREDICTIONS)
            .into_iter()
            .map(|(index, probability)| RankedBand {
                band: WRITING_BANDS[index],
                probability,
            })
            .collect();

        Some(Self {
            band: WRITING_BANDS[result.predicted_index()],
            confidence: result.confidence(),
            top_predictions,
        })
    }
}
