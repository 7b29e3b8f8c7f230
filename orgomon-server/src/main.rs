use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use orgomon_core::config::{MonitorConfig, DEFAULT_ENV_PREFIX};
use orgomon_core::{Monitor, ShutdownSignal};

mod context;
use context::AppContext;

#[derive(Parser, Debug, Clone)]
#[command(name = "orgomon")]
#[command(author, version, about = "Orgo node monitor - OCR dashboard for a fleet of remote VMs")]
pub struct Args {
    /// Prefix of the account variables (<PREFIX>_KEY_<N>, <PREFIX>_COMP_<N>)
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    prefix: String,

    /// First account index to read
    #[arg(long)]
    start_index: Option<u32>,

    /// Seconds between cycles; 0 or less polls once and then idles
    #[arg(long, allow_negative_numbers = true)]
    refresh_seconds: Option<i64>,

    /// Where screenshots are written while OCR runs
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Pause between connecting and the first cycle
    #[arg(long)]
    startup_delay_ms: Option<u64>,

    /// Tesseract language code(s), e.g. "eng" or "eng+deu"
    #[arg(long)]
    lang: Option<String>,

    /// Base URL of the Orgo API
    #[arg(long)]
    api_base: Option<String>,

    /// Path to the tesseract executable
    #[arg(long)]
    tesseract: Option<String>,

    /// Disable coloured status cells
    #[arg(long, default_value = "false")]
    no_color: bool,
}

impl Args {
    /// Command-line flags win over the environment.
    fn apply_to(&self, cfg: &mut MonitorConfig) {
        if let Some(v) = self.start_index {
            cfg.start_index = v;
        }
        if let Some(v) = self.refresh_seconds {
            cfg.refresh_seconds = v;
        }
        if let Some(v) = &self.temp_dir {
            cfg.scratch_dir = v.clone();
        }
        if let Some(v) = self.startup_delay_ms {
            cfg.startup_delay = std::time::Duration::from_millis(v);
        }
        if let Some(v) = &self.lang {
            cfg.ocr_language = v.clone();
        }
        if let Some(v) = &self.api_base {
            cfg.api_base = v.clone();
        }
        if let Some(v) = &self.tesseract {
            cfg.tesseract_bin = v.clone();
        }
        if self.no_color {
            cfg.color = false;
        }
    }
}

const DEFAULT_LOG_FILTER: &str = "orgomon=warn";

/// `RUST_LOG` when it is set and valid, otherwise warnings from our own crates only.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    let sub = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

#[tokio::main]
async fn main() {
    // A missing .env is fine; real env vars still apply.
    let _ = dotenv::dotenv();
    init_tracing();
    let args = Args::parse();

    match run_monitor(args).await {
        Ok(cycles) => {
            info!("Main finished after {} cycles. Goodbye!", cycles);
            std::process::exit(0);
        }
        Err(e) => {
            error!("Fatal: {:?}", e);
            eprintln!("ERROR: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run_monitor(args: Args) -> anyhow::Result<u64> {
    let mut config = MonitorConfig::from_env(&args.prefix)?;
    args.apply_to(&mut config);
    info!("orgomon starting. config={:?}", config);

    let ctx = AppContext::new(config);
    let shutdown = ShutdownSignal::new();

    // Ctrl-C flips the shutdown flag; the monitor does the cleanup.
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
            return;
        }
        info!("Ctrl-C detected; stopping monitor...");
        on_ctrl_c.trigger();
    });

    let mut monitor = Monitor::new(ctx.config, ctx.connector, ctx.recognizers, ctx.dashboard);
    let summary = monitor.run(shutdown).await?;
    Ok(summary.cycles_completed)
}
