#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui::ViewportBuilder;
use kinoswap_client::{CandidateSource, ClientConfig, runtime_bridge};
use kinoswap_core::Route;
use kinoswap_gui::{AppFrame, Config};
use log::info;

#[derive(Debug, Parser,)]
#[command(about = "Pick a movie together by swiping")]
struct Cli {
    /// Room server base URL, overrides KINOSWAP_API_URL.
    #[arg(long)]
    api_url:    Option<String,>,
    /// Candidate source: demo or remote.
    #[arg(long)]
    candidates: Option<CandidateSource,>,
    /// Number of candidates requested from a remote source.
    #[arg(long)]
    count:      Option<usize,>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout:    Option<u64,>,
    /// Screen to open, e.g. `/rooms/482913/lobby`.
    #[arg(long, default_value = "/")]
    route:      Route,
}

impl Cli {
    fn client_config(&self,) -> ClientConfig {
        let mut config = ClientConfig::load();
        if let Some(url,) = &self.api_url {
            config.api_url.clone_from(url,);
        }
        if let Some(source,) = self.candidates {
            config.candidate_source = source;
        }
        if let Some(count,) = self.count {
            config.candidate_count = count;
        }
        if let Some(secs,) = self.timeout {
            config.request_timeout = Duration::from_secs(secs,);
        }
        config
    }
}

fn main() -> anyhow::Result<(),> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info,)
        .format_target(false,)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = Config {
        client:      cli.client_config(),
        start_route: cli.route.clone(),
    };
    info!("starting with {config:?}");

    let handle = runtime_bridge::start(config.client.clone(),)?;

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([420.0, 760.0,],)
            .with_min_inner_size([360.0, 640.0,],)
            .with_title("KinoSwap",),
        ..Default::default()
    };

    eframe::run_native(
        "kinoswap",
        native_options,
        Box::new(|cc| Ok(Box::new(AppFrame::new(config, handle, cc,),),),),
    )
    .map_err(|e| anyhow!("eframe failed: {e}"),)
}
