use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;

use jetson_exporter::core::config::ExporterConfig;
use jetson_exporter::core::system_monitor::Collector;

fn build_cli() -> Command {
    Command::new("jetson-exporter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prometheus exporter for Jetson hardware telemetry")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON configuration file"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64))
                .help("Telemetry sampling period in seconds (minimum 0.5)"),
        )
        .arg(
            Arg::new("listen")
                .short('l')
                .long("listen")
                .value_name("ADDR")
                .help("Address to serve /metrics on"),
        )
        .arg(
            Arg::new("snapshot")
                .short('s')
                .long("snapshot")
                .value_name("PATH")
                .help("Telemetry snapshot file written by the acquisition agent"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (error, warn, info, debug, trace)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print collected metrics as JSON instead of serving HTTP")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("With --json, print a single collection cycle and exit")
                .requires("json")
                .action(ArgAction::SetTrue),
        )
}

fn load_config(matches: &ArgMatches) -> Result<ExporterConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ExporterConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => ExporterConfig::default(),
    };

    if let Some(interval) = matches.get_one::<f64>("interval") {
        config.set_update_period_secs(*interval);
    }
    if let Some(listen) = matches.get_one::<String>("listen") {
        config.set_listen_address(listen)?;
    }
    if let Some(snapshot) = matches.get_one::<String>("snapshot") {
        config.set_snapshot_path(snapshot);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.set_log_level(level.as_str());
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run_json_output(mut collector: Collector, once: bool) -> Result<()> {
    loop {
        let records = collector.collect();
        println!("{}", serde_json::to_string(&records)?);

        if once {
            return Ok(());
        }
        std::thread::sleep(collector.update_period());
    }
}

fn run_server(config: ExporterConfig, collector: Collector) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(jetson_exporter::server::serve(&config, collector))
        .context("Metrics server failed")
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let config = load_config(&matches)?;
    jetson_exporter::init_logging(config.level_filter()?);

    log::info!(
        "Starting jetson-exporter {} (snapshot {:?})",
        env!("CARGO_PKG_VERSION"),
        config.snapshot_path
    );

    let collector = Collector::from_config(&config).context("Failed to create collector")?;

    if matches.get_flag("json") {
        run_json_output(collector, matches.get_flag("once"))
    } else {
        run_server(config, collector)
    }
}
