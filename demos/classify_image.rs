use cea_forensics::{ForgeryAnalyzer, error::Result, report::JsonReport};
use ndarray::Array3;

// Stand-in scorer: rates an image authentic when its CEA map is mostly dark.
// Swap in a scorer wired to a trained model for real verdicts.
fn mean_brightness_scorer(input: &Array3<f32>) -> f64 {
    let mean = input.iter().copied().map(f64::from).sum::<f64>() / input.len() as f64;
    1.0 - mean
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <image_path>", args[0]);
        return Ok(());
    }

    let analyzer = ForgeryAnalyzer::new(&args[1])?;
    let report = analyzer.analyze(&mean_brightness_scorer)?;

    println!("Prediction : {}", report.verdict.label);
    println!("Confidence : {}", report.verdict.confidence_text());

    match JsonReport::from(&report).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }

    Ok(())
}
