use clap::Parser;
use prun_tools::config::cli::ServerArgs;
use prun_tools::utils::error::{ErrorSeverity, PrunError};
use prun_tools::utils::{logger, validation::Validate};
use prun_tools::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // read first: the file may switch logging to JSON
    let file = match args.load_config() {
        Ok(file) => file,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            tracing::error!("❌ Failed to load configuration: {}", e);
            fail(&e);
        }
    };
    let settings = args.resolve_with(&file);

    if settings.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting prun-tools dashboard");
    match &args.config {
        Some(path) => tracing::info!("📁 Loaded configuration from: {}", path),
        None => tracing::info!("📁 No configuration file, using flags and defaults"),
    }
    if args.verbose {
        tracing::debug!(
            "Settings: listen={} fio={} timeout={:?} identity_header={}",
            settings.listen,
            settings.fio_base_url,
            settings.request_timeout,
            settings.identity_header
        );
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    if let Err(e) = web::start_server(&settings).await {
        tracing::error!(
            "❌ Server stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        fail(&e);
    }

    Ok(())
}

fn fail(e: &PrunError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
