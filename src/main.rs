use clap::Parser;
use lapwatch::core::config::{CliOverrides, LapwatchConfig, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lapwatch", about = "Terminal stopwatch with lap recording")]
struct Args {
    /// Tick interval in milliseconds (overrides config and LAPWATCH_TICK_MS)
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Hide the wall clock panel
    #[arg(long)]
    no_clock: bool,

    /// Where to write the log
    #[arg(long, default_value = "lapwatch.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // The terminal belongs to the TUI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("Lapwatch starting up");

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        LapwatchConfig::default()
    });
    let cli = CliOverrides {
        tick_interval_ms: args.tick_ms,
        no_clock: args.no_clock,
    };
    let config = resolve(&file_config, &cli);
    log::info!("Resolved config: {:?}", config);

    lapwatch::tui::run(config).await
}
