use cea_forensics::{ForgeryAnalyzer, error::Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <image_path> [output_path]", args[0]);
        return Ok(());
    }

    let output = args.get(2).map(String::as_str).unwrap_or("cea_map.png");

    let analyzer = ForgeryAnalyzer::new(&args[1])?;
    let cea = analyzer.cea()?;

    println!("Qualities      : {:?}", cea.qualities);
    println!("Max difference : {:.2}", cea.max_difference);
    println!("Mean difference: {:.2}", cea.mean_difference);
    println!("Std deviation  : {:.2}", cea.std_deviation);

    cea.save(output)?;
    println!("CEA map written to {}", output);

    Ok(())
}
