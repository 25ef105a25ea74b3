use clap::Parser;
use lenovo_warranty::config::cli::help_text;
use lenovo_warranty::utils::error::WarrantyError;
use lenovo_warranty::utils::{logger, validation::Validate};
use lenovo_warranty::{
    CliConfig, LenovoClient, LocalStorage, LookupEngine, LookupMode, WarrantyFileConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Warranty lookup failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: CliConfig) -> Result<(), WarrantyError> {
    if config.wants_help() {
        println!("{}", help_text());
        return Ok(());
    }

    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let file_config = WarrantyFileConfig::from_file(path)?;
            file_config.validate()?;
            Some(file_config)
        }
        None => None,
    };

    let mode = config.mode(file_config.as_ref());
    mode.validate()?;

    let settings = config.settings(file_config.as_ref());
    settings.validate()?;
    tracing::debug!("Lookup settings: {:?}", settings);

    let engine = LookupEngine::new(LocalStorage::default(), LenovoClient::new(&settings)?);

    println!("\nIn progress, please wait...\n");

    let mut out = std::io::stdout();
    match mode {
        LookupMode::Single(serial) => {
            engine.run_single(&serial, &mut out).await?;
        }
        LookupMode::Bulk { input, report } => {
            let now = chrono::Local::now().naive_local();
            engine.run_bulk(&input, &report, now, &mut out).await?;
        }
        LookupMode::Help => {}
    }

    tracing::info!("✅ Warranty lookup completed");
    Ok(())
}
