/// Output of a single classification forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    predicted_index: usize,
    class_probabilities: Vec<f32>,
}

impl ClassificationResult {
    /// Builds a result from raw logits. Returns `None` for an empty or non-finite logit vector.
    pub fn from_logits(logits: &[f32]) -> Option<Self> {
        if logits.is_empty() || logits.iter().any(|l| !l.is_finite()) {
            return None;
        }

        let class_probabilities = softmax(logits);
        let predicted_index = argmax(&class_probabilities)?;

        Some(Self {
            predicted_index,
            class_probabilities,
        })
    }

    pub fn predicted_index(&self) -> usize {
        self.predicted_index
    }

    pub fn confidence(&self) -> f32 {
        self.class_probabilities[self.predicted_index]
    }

    pub fn class_probabilities(&self) -> &[f32] {
        &self.class_probabilities
    }

    pub fn num_classes(&self) -> usize {
        self.class_probabilities.len()
    }

    /// Class indices with their probabilities, highest first. Equal
    /// probabilities keep ascending index order.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f32)> {
        let mut indices: Vec<usize> = (0..self.class_probabilities.len()).collect();
        indices.sort_by(|&a, &b| {
            self.class_probabilities[b]
                .partial_cmp(&self.class_probabilities[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        indices
            .into_iter()
            .take(k)
            .map(|i| (i, self.class_probabilities[i]))
            .collect()
    }
}

/// Softmax with the max logit subtracted before exponentiating.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }

    let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f64> = logits
        .iter()
        .map(|&x| ((x - max_logit) as f64).exp())
        .collect();
    let sum: f64 = exps.iter().sum();

    exps.into_iter().map(|e| (e / sum) as f32).collect()
}

/// Index of the first maximum value.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
