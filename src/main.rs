use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use knn_client::OpenSearchClientFactory;
use knn_core::{ExecutionContext, StepEngine};
use knn_datasets::FileDatasetOpener;
use knnperf::config::{init_dotenv, ENV_DEFAULTS};
use knnperf::{TestConfig, TestRunner};
use log::info;

#[derive(Parser)]
#[command(name = "knnperf")]
#[command(version, about = "Benchmark de búsquedas k-NN contra un servicio compatible con OpenSearch")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ejecuta un archivo de test y escribe el reporte JSON.
    Test {
        /// Archivo de test YAML.
        config: PathBuf,
        /// Destino del reporte (stdout si se omite).
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_dotenv();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match Cli::parse().command {
        Command::Test { config, output } => {
            let test = TestConfig::from_path(&config)?;
            let context = ExecutionContext::new(Arc::new(FileDatasetOpener::new()), Arc::new(OpenSearchClientFactory));
            let runner = TestRunner::new(StepEngine::new(knn_steps::default_registry()?, context), (*ENV_DEFAULTS).clone());
            let report = runner.run(&test).await?;
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    info!("report written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}
