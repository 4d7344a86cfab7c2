use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use streaming_history_etl::core::headers;

#[derive(Parser)]
#[command(name = "validate-headers")]
#[command(about = "Compare the combined CSV header against the expected export columns")]
struct Args {
    /// Path to the combined CSV; the default is relative to the current
    /// working directory, normally the converter's run directory
    #[arg(long, default_value = "../Transformed Data/combined_streaming_history.csv")]
    csv: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match headers::check_headers(&args.csv)? {
        Some(report) => println!("{}", report),
        None => println!("CSV not found: {}", args.csv.display()),
    }

    Ok(())
}
