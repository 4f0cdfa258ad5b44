use clap::Parser;
use prun_tools::adapters::{KawaClient, LocalStorage};
use prun_tools::config::{cli::KawaArgs, KawaSettings};
use prun_tools::core::kawa::{ExportOptions, KawaPipeline, CSV_FILENAME, JSON_FILENAME};
use prun_tools::utils::error::ErrorSeverity;
use prun_tools::utils::{logger, validation::Validate};
use prun_tools::EtlEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = KawaArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("🚀 Starting KAWA price export");
    if let Some(path) = &args.config {
        tracing::info!("📁 Loading configuration from: {}", path);
    }

    let settings = match args.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&settings, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&settings);
        return Ok(());
    }

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let client = KawaClient::new(&settings.endpoint, settings.request_timeout)?;
    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = KawaPipeline::new(
        client,
        storage,
        ExportOptions {
            planet: settings.planet.clone(),
            per_page: settings.per_page,
            output_path: settings.output_path.clone(),
        },
    );

    let engine = EtlEngine::new_with_monitoring(pipeline, args.monitor);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Export completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Export completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(settings: &KawaSettings, args: &KawaArgs) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", settings.endpoint);
    println!("  Planet: {}", settings.planet);
    println!("  Page size: {}", settings.per_page);
    println!("  Output: {}", settings.output_path);
    println!("  Timeout: {}s", settings.request_timeout.as_secs());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(settings: &KawaSettings) {
    println!("🔍 Dry Run Analysis:");
    println!();
    println!("📡 Data Source:");
    println!(
        "  GET {}?page=1&perPage={} until the last page",
        settings.endpoint, settings.per_page
    );
    println!();
    println!("⚙️ Processing:");
    println!("  Keep entries whose planet is exactly \"{}\"", settings.planet);
    println!();
    println!("💾 Output:");
    println!("  {}/{}", settings.output_path, CSV_FILENAME);
    println!("  {}/{}", settings.output_path, JSON_FILENAME);
    println!();
    println!("✅ Dry run analysis complete.");
}
