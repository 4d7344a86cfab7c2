use clap::Parser;
use streaming_history_etl::core::ConfigProvider;
use streaming_history_etl::utils::logger;
use streaming_history_etl::{CliConfig, EtlEngine, HistoryPipeline, LocalStorage};

fn main() {
    let args = CliConfig::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!("Source: {}", absolute(config.source_dir()).display());
    tracing::info!("Output: {}", absolute(config.output_dir()).display());

    let pipeline = HistoryPipeline::new(LocalStorage::new(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(_) => {
            let combined = engine.pipeline().config().output_path();
            tracing::info!("Done. Combined CSV path: {}", absolute(&combined).display());
        }
        Err(e) => {
            tracing::error!(
                "ETL run failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(1);
        }
    }
}

fn absolute(path: &std::path::Path) -> std::path::PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
