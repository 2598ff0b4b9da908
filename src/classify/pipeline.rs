use image::RgbImage;
use ndarray::Array3;

use crate::{
    classify::{Label, Scorer, Verdict},
    error::{ForensicsError, Result},
    image_utils::{resize_bilinear, to_unit_tensor},
};

pub struct ForgeryClassifier {
    input_size: u32,
    threshold: f64,
}

impl ForgeryClassifier {
    pub fn new() -> Self {
        Self {
            input_size: 128,
            threshold: 0.5,
        }
    }

    pub fn with_input_size(mut self, size: u32) -> Self {
        self.input_size = size;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Resize the CEA map to the model input shape, rescale to [0, 1] and
    /// score it. The bilinear resize is a fixed contract the external
    /// classifier was trained against.
    pub fn classify<S: Scorer>(&self, cea: &RgbImage, scorer: &S) -> Result<Verdict> {
        if self.input_size == 0 {
            return Err(ForensicsError::InvalidParameter(
                "Classifier input size must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ForensicsError::InvalidParameter(format!(
                "Threshold {} outside [0, 1]",
                self.threshold
            )));
        }

        let resized = resize_bilinear(cea, self.input_size, self.input_size);
        let input = to_unit_tensor(&resized);
        check_input_shape(&input, self.input_size)?;

        let score = scorer.score(&input)?;
        log::debug!(
            "classifier score {:.4} against threshold {}",
            score,
            self.threshold
        );

        if !(0.0..=1.0).contains(&score) {
            return Err(ForensicsError::InvalidScore(score));
        }

        // Confidence is reported relative to the chosen label, so a
        // borderline score lands near 50% for either label.
        let verdict = if score >= self.threshold {
            Verdict {
                label: Label::Authentic,
                confidence: score * 100.0,
            }
        } else {
            Verdict {
                label: Label::Forged,
                confidence: (1.0 - score) * 100.0,
            }
        };

        Ok(verdict)
    }
}

fn check_input_shape(input: &Array3<f32>, size: u32) -> Result<()> {
    let expected = (size as usize, size as usize, 3);

    if input.dim() != expected {
        let (h, w, c) = input.dim();
        return Err(ForensicsError::ShapeMismatch {
            expected: format!("{}x{}x{}", expected.0, expected.1, expected.2),
            actual: format!("{}x{}x{}", h, w, c),
        });
    }

    Ok(())
}

impl Default for ForgeryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn cea_map() -> RgbImage {
        RgbImage::from_pixel(64, 64, Rgb([40, 40, 40]))
    }

    #[test]
    fn test_score_at_threshold_resolves_authentic() {
        let stub = |_: &Array3<f32>| 0.5;
        let verdict = ForgeryClassifier::new().classify(&cea_map(), &stub).unwrap();

        assert_eq!(verdict.label, Label::Authentic);
        assert_eq!(verdict.confidence, 50.0);
    }

    #[test]
    fn test_certain_authentic() {
        let stub = |_: &Array3<f32>| 1.0;
        let verdict = ForgeryClassifier::new().classify(&cea_map(), &stub).unwrap();

        assert_eq!(verdict.label, Label::Authentic);
        assert_eq!(verdict.confidence, 100.0);
    }

    #[test]
    fn test_certain_forged() {
        let stub = |_: &Array3<f32>| 0.0;
        let verdict = ForgeryClassifier::new().classify(&cea_map(), &stub).unwrap();

        assert_eq!(verdict.label, Label::Forged);
        assert_eq!(verdict.confidence, 100.0);
    }

    #[test]
    fn test_confidence_follows_chosen_label() {
        let authentic = ForgeryClassifier::new()
            .classify(&cea_map(), &|_: &Array3<f32>| 0.7)
            .unwrap();
        assert_eq!(authentic.label, Label::Authentic);
        assert_eq!(authentic.confidence_text(), "70.00%");

        let forged = ForgeryClassifier::new()
            .classify(&cea_map(), &|_: &Array3<f32>| 0.2)
            .unwrap();
        assert_eq!(forged.label, Label::Forged);
        assert_eq!(forged.confidence_text(), "80.00%");
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let stub = |_: &Array3<f32>| 1.5;
        let result = ForgeryClassifier::new().classify(&cea_map(), &stub);

        assert!(matches!(result, Err(ForensicsError::InvalidScore(s)) if s == 1.5));
    }

    #[test]
    fn test_scorer_receives_normalized_input() {
        let stub = |input: &Array3<f32>| {
            assert_eq!(input.dim(), (128, 128, 3));
            assert!(input.iter().all(|&v| (0.0..=1.0).contains(&v)));
            0.9
        };

        let verdict = ForgeryClassifier::new().classify(&cea_map(), &stub).unwrap();
        assert_eq!(verdict.label, Label::Authentic);
    }

    #[test]
    fn test_custom_threshold_inclusive_boundary() {
        let stub = |_: &Array3<f32>| 0.75;
        let verdict = ForgeryClassifier::new()
            .with_threshold(0.75)
            .classify(&cea_map(), &stub)
            .unwrap();

        assert_eq!(verdict.label, Label::Authentic);
        assert_eq!(verdict.confidence_text(), "75.00%");
    }

    #[test]
    fn test_threshold_outside_unit_range_is_rejected() {
        let stub = |_: &Array3<f32>| 0.5;
        let result = ForgeryClassifier::new()
            .with_threshold(1.5)
            .classify(&cea_map(), &stub);

        assert!(matches!(result, Err(ForensicsError::InvalidParameter(_))));
    }

    #[test]
    fn test_zero_input_size_is_rejected() {
        let stub = |_: &Array3<f32>| 0.5;
        let result = ForgeryClassifier::new()
            .with_input_size(0)
            .classify(&cea_map(), &stub);

        assert!(matches!(result, Err(ForensicsError::InvalidParameter(_))));
    }

    #[test]
    fn test_check_input_shape_mismatch() {
        let wrong = Array3::<f32>::zeros((64, 128, 3));
        let result = check_input_shape(&wrong, 128);

        assert!(matches!(result, Err(ForensicsError::ShapeMismatch { .. })));
    }
}
