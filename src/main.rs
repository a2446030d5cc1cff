use clap::Parser;
use raven_log::utils::{logger, validation::Validate};
use raven_log::{AppContext, CliConfig, LogPipeline, RavenServiceProvider};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌，管道在 provider boot 後才會有 handler
    let pipeline = Arc::new(LogPipeline::new("raven-log"));
    if cli.json {
        logger::init_json_logger(&pipeline);
    } else {
        logger::init_cli_logger(cli.verbose, &pipeline);
    }

    let config = cli.resolve()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    let level = config.level;

    let app = AppContext::new(
        cli.environment.clone(),
        env!("CARGO_PKG_VERSION"),
        Arc::clone(&pipeline),
    );
    let mut provider = RavenServiceProvider::new(config, app);
    provider.register()?;

    if !provider.boot()? {
        tracing::warn!("Error reporting is disabled, nothing was sent");
        return Ok(());
    }

    tracing::error!(severity = %level, "{}", cli.message);

    if let Some(client) = provider.client() {
        let failed = client.flush().await;
        if failed > 0 {
            anyhow::bail!("{} event(s) could not be delivered", failed);
        }
        println!("✅ Test event sent to {}", client.servers().join(", "));
    }

    Ok(())
}
