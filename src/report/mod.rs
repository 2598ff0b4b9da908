use serde::Serialize;

use crate::{ForgeryReport, classify::ConfidenceLevel};

#[derive(Serialize)]
pub struct JsonReport {
    pub prediction: String,
    pub confidence: String,
    pub confidence_level: ConfidenceLevel,
    pub cea_analysis: CeaReportSection,
}

#[derive(Serialize)]
pub struct CeaReportSection {
    pub qualities: Vec<u8>,
    pub max_difference: f64,
    pub mean_difference: f64,
    pub std_deviation: f64,
}

impl From<&ForgeryReport> for JsonReport {
    fn from(report: &ForgeryReport) -> Self {
        Self {
            prediction: report.verdict.label.to_string(),
            confidence: report.verdict.confidence_text(),
            confidence_level: report.verdict.confidence_level(),
            cea_analysis: CeaReportSection {
                qualities: report.cea.qualities.clone(),
                max_difference: report.cea.max_difference,
                mean_difference: report.cea.mean_difference,
                std_deviation: report.cea.std_deviation,
            },
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
