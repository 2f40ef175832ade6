//! querypipe - a demonstration SQL pipeline toolkit.

use querypipe::cli::{Cli, Command};
use querypipe::config::{Config, SecretsBackend};
use querypipe::engine::MockExecutionEngine;
use querypipe::error::Result;
use querypipe::pipeline::{default_scripts, Pipeline};
use querypipe::secrets::{
    mask_secret, setup_demo_credentials, InMemorySecretStore, KeyringSecretStore, SecretStore,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    // CLI overrides take precedence over the config file.
    if let Some(dir) = &cli.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(ms) = cli.delay_ms {
        config.engine.delay_ms = ms;
    }

    let secrets = build_secret_store(&config);
    let engine = MockExecutionEngine::with_delay(config.engine.delay());

    match cli.command {
        Command::Run => {
            let pipeline = Pipeline::new(&engine)
                .with_secrets(secrets.as_ref(), config.secrets.bundle.clone());
            let analyses = pipeline.run_materializer_pipeline(&config.output_dir()).await?;

            println!("Pipeline execution completed successfully!");
            for analysis in &analyses {
                println!(
                    "  {} - complexity: {}, performance score: {}/100",
                    analysis.query_name, analysis.complexity, analysis.performance_score
                );
            }
            println!("Artifacts written to: {}", config.output_dir().display());
        }
        Command::Batch => {
            let pipeline = Pipeline::new(&engine)
                .with_secrets(secrets.as_ref(), config.secrets.bundle.clone());
            let summary = pipeline.run_batch_pipeline(&default_scripts()).await;

            println!("Batch execution summary:");
            for outcome in &summary.outcomes {
                println!(
                    "  [{}] {} - {} rows, {:.2} ms",
                    outcome.result.status,
                    outcome.script_name,
                    outcome.result.rows_affected,
                    outcome.result.execution_time_ms
                );
            }
            if let Some(name) = summary.failed_script() {
                println!("Batch stopped: validation failed for '{name}'");
            }
            println!(
                "Successful scripts: {}/{}",
                summary.successful_count(),
                summary.outcomes.len()
            );
            println!(
                "Total execution time: {:.2} ms",
                summary.total_execution_time_ms()
            );
        }
        Command::Render { dir } => {
            let pipeline = Pipeline::new(&engine)
                .with_secrets(secrets.as_ref(), config.secrets.bundle.clone());
            let views = pipeline.rerender(&dir).await?;

            println!("Re-rendered {} views in {}:", views.len(), dir.display());
            for view in &views {
                println!("  {}", view.path.display());
            }
        }
        Command::SetupSecrets => {
            if config.secrets.backend == SecretsBackend::Memory {
                println!(
                    "Note: the in-memory backend does not persist between runs; \
                     set secrets.backend = \"keyring\" in the config to keep credentials."
                );
            }
            let created = setup_demo_credentials(secrets.as_ref(), &config.secrets.bundle)?;
            if created {
                println!("Credential bundle '{}' created", config.secrets.bundle);
            } else {
                println!("Credential bundle '{}' already exists", config.secrets.bundle);
            }
            let bundle = secrets.get(&config.secrets.bundle)?;
            for (key, value) in &bundle {
                println!("  {key} = {}", mask_secret(value));
            }
        }
    }

    Ok(())
}

/// Builds the secret store configured for this run.
fn build_secret_store(config: &Config) -> Box<dyn SecretStore> {
    match config.secrets.backend {
        SecretsBackend::Memory => Box::new(InMemorySecretStore::new()),
        SecretsBackend::Keyring => {
            let store = KeyringSecretStore::new();
            if !store.is_available() {
                warn!("OS keyring unavailable; credential lookups will find no bundles");
            }
            Box::new(store)
        }
    }
}
