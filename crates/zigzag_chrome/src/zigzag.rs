#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use zigzag::{load_events, Args, FolderImageResolver, TimelineDriver, TimelineInfo};
use zigzag_chrome::{
    setup::{generate_native_options, setup_cc},
    ZigzagApp,
};

fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("zigzag").join("logs"))
}

/// The returned guard flushes the log file when dropped
fn setup_logging(logdir: Option<PathBuf>) -> Option<WorkerGuard> {
    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zigzag=info"));

    let Some(log_path) = logdir.or_else(default_log_dir) else {
        tracing_subscriber::fmt().with_env_filter(env_filter()).init();
        return None;
    };

    use tracing_appender::{
        non_blocking,
        rolling::{RollingFileAppender, Rotation},
    };
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        log_path,
        format!("zigzag-{}.log", env!("CARGO_PKG_VERSION")),
    );
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // Log to stdout (if you run with `RUST_LOG=debug`).
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(env_filter())
        .init();

    Some(guard)
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let (args, unrecognized_args) = Args::parse(&argv);

    let _log_guard = setup_logging(args.logdir.as_ref().map(PathBuf::from));

    for arg in &unrecognized_args {
        warn!("unrecognized argument: {arg}");
    }

    let config = match args.config() {
        Ok(config) => config,
        Err(err) => {
            error!("could not load config: {err}");
            return;
        }
    };

    let info = TimelineInfo::load(&config.title_path, &config.description_path);

    let store = match load_events(&config.csv_path) {
        Ok(store) => store,
        Err(err) => {
            error!("could not load timeline: {err}");
            return;
        }
    };

    let resolver = Arc::new(FolderImageResolver::new(&config.images_dir));
    let driver = TimelineDriver::start(Arc::new(store), resolver, &config);
    let options = args.options;

    info!("starting '{}'", info.title);
    let native_options = generate_native_options(&info.title);

    let res = eframe::run_native(
        "zigzag",
        native_options,
        Box::new(move |cc| {
            setup_cc(&cc.egui_ctx, options);
            Ok(Box::new(ZigzagApp::new(driver, info, &config, options)))
        }),
    );

    if let Err(err) = res {
        error!("zigzag exited with an error: {err}");
    }
}
