//! Cropyield CLI
//!
//! Command-line front end for the crop-yield prediction service:
//! - Log in / register
//! - Browse the dataset, charts and prediction history
//! - Train models and predict yields
//! - Download CSV exports

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Number, Value};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cropyield::api::{Crop, HttpBackend, Irrigation, PredictionForm, Record, Season, Soil};
use cropyield::render::{Canvas, ChartRegistry, TextSurface};
use cropyield::session::{AuthSession, DashboardSession};
use cropyield::state::{DashboardTab, Download, Load, StatusKind};
use cropyield::{Config, DashboardView, LoggingConfig, Table};

#[derive(Parser)]
#[command(name = "cropyield")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Crop yield prediction client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Prediction service URL (overrides config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Config file (default: ~/.config/cropyield/config.toml or ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log in as this user before running the command
    #[arg(short, long, env = "CROPYIELD_USERNAME", global = true)]
    pub username: Option<String>,

    #[arg(short, long, env = "CROPYIELD_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check credentials
    Login,

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Show the first rows of the dataset
    Dataset,

    /// List the exploratory chart images
    Charts,

    /// Train all models and show their evaluation
    Train {
        /// Held-out share of the dataset, in percent
        #[arg(short, long)]
        test_size: Option<u8>,
    },

    /// Train, then predict the yield for one farm
    Predict {
        #[arg(long, default_value = "25")]
        farm_area: f64,
        #[arg(long, default_value = "250")]
        fertilizer: f64,
        #[arg(long, default_value = "25")]
        pesticide: f64,
        #[arg(long, default_value = "5000")]
        water: f64,
        #[arg(long, value_enum, default_value = "wheat")]
        crop: Crop,
        #[arg(long, value_enum, default_value = "drip")]
        irrigation: Irrigation,
        #[arg(long, value_enum, default_value = "loamy")]
        soil: Soil,
        #[arg(long, value_enum, default_value = "kharif")]
        season: Season,
        /// Held-out share used for the training run, in percent
        #[arg(short, long)]
        test_size: Option<u8>,
        /// Save the prediction to the history
        #[arg(long)]
        save: bool,
    },

    /// Show saved predictions
    History,

    /// Download a CSV export
    Download {
        #[arg(value_enum)]
        file: DownloadFile,
        /// Output file (default: the export's usual name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DownloadFile {
    Dataset,
    Predictions,
}

impl DownloadFile {
    fn download(&self) -> Download {
        match self {
            DownloadFile::Dataset => Download::Dataset,
            DownloadFile::Predictions => Download::Predictions,
        }
    }

    fn default_name(&self) -> &'static str {
        match self {
            DownloadFile::Dataset => "crop_yield_dataset.csv",
            DownloadFile::Predictions => "predictions.csv",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
    }

    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = cropyield::config::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let backend = HttpBackend::new(config.backend.http())?;
    tracing::debug!(url = %backend.config().base_url, "Using prediction service");

    if let Commands::Register {
        name,
        email,
        new_password,
        confirm,
    } = &cli.command
    {
        let mut auth = AuthSession::new(&backend, config.timings.timings());
        auth.submit_registration(name, email, new_password, confirm).await;
        return report_status(auth.view().message().kind(), auth.view().message().text());
    }

    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        let mut auth = AuthSession::new(&backend, config.timings.timings());
        auth.submit_login(username, password).await;
        let message = auth.view().message();
        if message.kind() != Some(StatusKind::Success) {
            bail!("{}", message.text().unwrap_or("Login failed"));
        }
        if matches!(cli.command, Commands::Login) {
            return report_status(message.kind(), message.text());
        }
    } else if matches!(cli.command, Commands::Login) {
        bail!("--username and --password are required");
    }

    let mut dashboard = DashboardSession::new(&backend);
    let test_size_default = config.training.test_size_percent;

    match cli.command {
        Commands::Dataset => {
            dashboard.select_tab(DashboardTab::Dataset).await;
            print_table(dashboard.view().dataset_table())?;
        }

        Commands::Charts => {
            dashboard.select_tab(DashboardTab::Eda).await;
            let Some(charts) = dashboard.view().eda_charts() else {
                bail!("Charts are not available");
            };
            for (image, alt) in charts.images() {
                println!("{:<12} {} bytes", alt, image.len());
            }
        }

        Commands::Train { test_size } => {
            train(&mut dashboard, test_size.unwrap_or(test_size_default)).await?;
            print_evaluation(dashboard.view())?;
        }

        Commands::Predict {
            farm_area,
            fertilizer,
            pesticide,
            water,
            crop,
            irrigation,
            soil,
            season,
            test_size,
            save,
        } => {
            train(&mut dashboard, test_size.unwrap_or(test_size_default)).await?;

            let form = PredictionForm {
                farm_area,
                fertilizer,
                pesticide,
                water,
                crop,
                irrigation,
                soil,
                season,
            };
            let predicted = dashboard.submit_prediction(form).await;
            print_notice(dashboard.view_mut());
            if !predicted {
                bail!("Prediction failed");
            }

            let view = dashboard.view();
            if let Some(headline) = view.prediction_headline() {
                println!("{}\n", headline);
            }
            if let Some(table) = view.comparison_table() {
                print!("{}", table);
            }
            print_charts(view, &[Canvas::Comparison]);

            if save {
                dashboard.save_prediction().await;
                print_notice(dashboard.view_mut());
                print_table(dashboard.view().history_table())?;
            }
        }

        Commands::History => {
            dashboard.load(Load::History).await;
            print_table(dashboard.view().history_table())?;
        }

        Commands::Download { file, output } => {
            let bytes = backend
                .download(file.download().endpoint())
                .await
                .context("download failed")?;
            let path = output.unwrap_or_else(|| PathBuf::from(file.default_name()));
            std::fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            println!("Saved {} ({} bytes)\n", path.display(), bytes.len());

            let records = csv_preview(&bytes, 5)?;
            print!("{}", Table::from_records(&records));
        }

        Commands::Login | Commands::Register { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cropyield={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn train(dashboard: &mut DashboardSession<&HttpBackend>, test_size: u8) -> anyhow::Result<()> {
    eprintln!(
        "{}",
        cropyield::state::dashboard::TRAINING_IN_PROGRESS
    );
    let trained = dashboard.train_models(test_size).await;

    let status = dashboard.view().training_status();
    if !trained {
        bail!("{}", status.text().unwrap_or("Training failed"));
    }
    eprintln!("{}\n", status.text().unwrap_or_default());
    Ok(())
}

fn report_status(kind: Option<StatusKind>, text: Option<&str>) -> anyhow::Result<()> {
    match kind {
        Some(StatusKind::Success) => {
            println!("{}", text.unwrap_or_default());
            Ok(())
        }
        _ => bail!("{}", text.unwrap_or("Request failed")),
    }
}

fn print_notice(view: &mut DashboardView) {
    if let Some(notice) = view.take_notice() {
        match notice.kind {
            StatusKind::Error => eprintln!("{}", notice.text),
            _ => println!("{}", notice.text),
        }
    }
}

fn print_table(table: Option<&Table>) -> anyhow::Result<()> {
    match table {
        Some(table) => {
            print!("{}", table);
            Ok(())
        }
        None => bail!("Could not load data from the prediction service"),
    }
}

fn print_evaluation(view: &DashboardView) -> anyhow::Result<()> {
    print_table(view.evaluation_table())?;
    println!();
    print_charts(view, &[Canvas::R2, Canvas::Rmse]);

    if let Some(images) = view.evaluation_images() {
        println!("Actual vs predicted charts:");
        for (model, image) in &images.charts {
            println!("  {:<20} {} bytes", model, image.len());
        }
    }
    Ok(())
}

fn print_charts(view: &DashboardView, canvases: &[Canvas]) {
    let mut surface = TextSurface::new(40);
    let mut registry = ChartRegistry::new();
    for &canvas in canvases {
        if let Some(chart) = view.chart(canvas) {
            registry.render(&mut surface, canvas, chart);
        }
    }
    for text in surface.take_output() {
        println!("{}", text);
    }
}

/// First `limit` rows of a CSV export, numeric cells kept numeric
fn csv_preview(bytes: &[u8], limit: usize) -> anyhow::Result<Vec<Record>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records().take(limit) {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let value = cell
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(cell.to_string()));
                (header.to_string(), value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}
