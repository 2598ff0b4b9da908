use std::io::Cursor;

use image::{DynamicImage, RgbImage};
use ndarray::Array3;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    CeaResult,
    error::{ForensicsError, Result},
    image_utils::{array_to_rgb, rgb_to_array},
};

/// Compression error analysis: re-encode the source at several JPEG quality
/// levels and average the normalized per-level error maps. Regions with a
/// compression history that does not match the rest of the image stand out
/// in the averaged map.
pub struct CeaAnalyzer {
    qualities: Vec<u8>,
    parallel: bool,
}

impl CeaAnalyzer {
    pub fn new(qualities: &[u8]) -> Result<Self> {
        if qualities.is_empty() {
            return Err(ForensicsError::InvalidParameter(
                "Quality list must not be empty".into(),
            ));
        }

        Ok(Self {
            qualities: qualities.iter().map(|&q| q.min(100)).collect(),
            parallel: true,
        })
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn qualities(&self) -> &[u8] {
        &self.qualities
    }

    pub fn analyze(&self, image: &DynamicImage) -> Result<CeaResult> {
        let source = image.to_rgb8();

        let maps = if self.parallel {
            self.qualities
                .par_iter()
                .map(|&q| self.error_map(&source, q))
                .collect::<Result<Vec<_>>>()?
        } else {
            self.qualities
                .iter()
                .map(|&q| self.error_map(&source, q))
                .collect::<Result<Vec<_>>>()?
        };

        // Summed in quality-list order so parallel and sequential runs
        // produce identical bytes.
        let mut mean = Array3::<f64>::zeros(maps[0].dim());
        for map in &maps {
            mean += map;
        }
        mean /= maps.len() as f64;

        let (max_difference, mean_difference, std_deviation) = map_statistics(&mean);

        log::debug!(
            "averaged {} error maps: max {:.2}, mean {:.2}",
            maps.len(),
            max_difference,
            mean_difference
        );

        Ok(CeaResult {
            image: array_to_rgb(&mean),
            max_difference,
            mean_difference,
            std_deviation,
            qualities: self.qualities.clone(),
        })
    }

    fn error_map(&self, source: &RgbImage, quality: u8) -> Result<Array3<f64>> {
        let compressed = recompress_jpeg(source, quality)?;

        if compressed.dimensions() != source.dimensions() {
            return Err(ForensicsError::ShapeMismatch {
                expected: format!("{}x{}", source.width(), source.height()),
                actual: format!("{}x{}", compressed.width(), compressed.height()),
            });
        }

        let diff = (rgb_to_array(source) - rgb_to_array(&compressed)).mapv(f64::abs);

        Ok(normalize_map(diff))
    }
}

fn recompress_jpeg(source: &RgbImage, quality: u8) -> Result<RgbImage> {
    let mut buffer = Cursor::new(Vec::new());

    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    source
        .write_with_encoder(encoder)
        .map_err(ForensicsError::Encode)?;

    buffer.set_position(0);
    let compressed =
        image::load_from_memory(&buffer.into_inner()).map_err(ForensicsError::Decode)?;

    Ok(compressed.to_rgb8())
}

/// Stretch the dynamic range actually present in one quality level's error
/// map onto the full 8-bit range, so maps from different levels are
/// comparable before averaging. A zero-diff map stays zero.
fn normalize_map(diff: Array3<f64>) -> Array3<f64> {
    let max_diff = diff.iter().cloned().fold(0.0f64, f64::max);
    let max_diff = if max_diff == 0.0 { 1.0 } else { max_diff };
    let scale = 255.0 / max_diff;

    diff.mapv(|v| (v * scale).clamp(0.0, 255.0))
}

fn map_statistics(map: &Array3<f64>) -> (f64, f64, f64) {
    let len = map.len() as f64;
    let max = map.iter().cloned().fold(0.0f64, f64::max);
    let mean = map.iter().sum::<f64>() / len;
    let variance = map.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;

    (max, mean, variance.sqrt())
}
