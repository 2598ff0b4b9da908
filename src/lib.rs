use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::{
    analysis::cea::CeaAnalyzer,
    classify::{Scorer, Verdict, pipeline::ForgeryClassifier},
    error::{ForensicsError, Result},
};

pub mod error;
pub mod image_utils;
pub mod analysis;
pub mod classify;
pub mod report;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub qualities: Vec<u8>,
    pub input_size: u32,
    pub threshold: f64,
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            qualities: vec![95, 85, 75],
            input_size: 128,
            threshold: 0.5,
            parallel: true,
        }
    }
}

pub struct ForgeryAnalyzer {
    original: DynamicImage,
    config: AnalysisConfig,
}

impl ForgeryAnalyzer {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let original = image::open(&path).map_err(ForensicsError::Decode)?;

        Ok(Self {
            original,
            config: AnalysisConfig::default(),
        })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            original: image,
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cea(&self) -> Result<CeaResult> {
        let analyzer =
            CeaAnalyzer::new(&self.config.qualities)?.with_parallel(self.config.parallel);
        analyzer.analyze(&self.original)
    }

    pub fn classify<S: Scorer>(&self, scorer: &S) -> Result<Verdict> {
        let cea = self.cea()?;
        self.classify_cea(&cea, scorer)
    }

    pub fn analyze<S: Scorer>(&self, scorer: &S) -> Result<ForgeryReport> {
        let cea = self.cea()?;
        let verdict = self.classify_cea(&cea, scorer)?;

        Ok(ForgeryReport { cea, verdict })
    }

    fn classify_cea<S: Scorer>(&self, cea: &CeaResult, scorer: &S) -> Result<Verdict> {
        let classifier = ForgeryClassifier::new()
            .with_input_size(self.config.input_size)
            .with_threshold(self.config.threshold);
        classifier.classify(&cea.image, scorer)
    }
}

#[derive(Debug, Clone)]
pub struct CeaResult {
    pub image: RgbImage,
    pub max_difference: f64,
    pub mean_difference: f64,
    pub std_deviation: f64,
    pub qualities: Vec<u8>,
}

impl CeaResult {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path).map_err(|e| match e {
            image::ImageError::IoError(e) => ForensicsError::Io(e),
            e => ForensicsError::Encode(e),
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ForgeryReport {
    pub cea: CeaResult,
    pub verdict: Verdict,
}
