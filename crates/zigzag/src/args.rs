use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::{Density, ItemsPerRow, TimelineConfig};
use crate::{Result, ZigzagOptions};
use tracing::error;

/// Command line overrides. Anything left as `None` falls through to the
/// config file, then to the defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub title_path: Option<PathBuf>,
    pub description_path: Option<PathBuf>,
    pub items_per_row: Option<u8>,
    pub density: Option<u8>,
    pub connector_height: Option<f32>,
    pub resolve_timeout_ms: Option<u64>,
    pub sync_images: bool,
    pub options: ZigzagOptions,
    pub logdir: Option<String>,
}

impl Args {
    // parse arguments, return set of unrecognized args
    pub fn parse(args: &[String]) -> (Self, BTreeSet<String>) {
        let mut unrecognized_args = BTreeSet::new();
        let mut res = Args::default();

        let mut i = 0;
        let len = args.len();
        while i < len {
            let arg = &args[i];

            if arg == "--light" {
                res.options.set(ZigzagOptions::LightTheme, true);
            } else if arg == "--dark" {
                res.options.set(ZigzagOptions::LightTheme, false);
            } else if arg == "--debug" {
                res.options.set(ZigzagOptions::Debug, true);
            } else if arg == "--sync-images" {
                res.sync_images = true;
            } else if arg == "--config" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("config argument missing?");
                    continue;
                };
                res.config_path = Some(PathBuf::from(path));
            } else if arg == "--csv" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("csv argument missing?");
                    continue;
                };
                res.csv_path = Some(PathBuf::from(path));
            } else if arg == "--images" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("images argument missing?");
                    continue;
                };
                res.images_dir = Some(PathBuf::from(path));
            } else if arg == "--title" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("title argument missing?");
                    continue;
                };
                res.title_path = Some(PathBuf::from(path));
            } else if arg == "--description" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("description argument missing?");
                    continue;
                };
                res.description_path = Some(PathBuf::from(path));
            } else if arg == "--items-per-row" {
                i += 1;
                res.items_per_row = parse_value(arg, args.get(i));
            } else if arg == "--density" {
                i += 1;
                res.density = parse_value(arg, args.get(i));
            } else if arg == "--connector-height" {
                i += 1;
                res.connector_height = parse_value(arg, args.get(i));
            } else if arg == "--resolve-timeout-ms" {
                i += 1;
                res.resolve_timeout_ms = parse_value(arg, args.get(i));
            } else if arg == "--logdir" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("logdir argument missing?");
                    continue;
                };
                res.logdir = Some(path.clone());
            } else {
                unrecognized_args.insert(arg.clone());
            }

            i += 1;
        }

        (res, unrecognized_args)
    }

    /// Defaults, then the `--config` file if one was given, then flags
    pub fn config(&self) -> Result<TimelineConfig> {
        let mut config = match &self.config_path {
            Some(path) => TimelineConfig::from_file(path)?,
            None => TimelineConfig::default(),
        };

        if let Some(path) = &self.csv_path {
            config.csv_path = path.clone();
        }
        if let Some(path) = &self.images_dir {
            config.images_dir = path.clone();
        }
        if let Some(path) = &self.title_path {
            config.title_path = path.clone();
        }
        if let Some(path) = &self.description_path {
            config.description_path = path.clone();
        }
        if let Some(n) = self.items_per_row {
            config.items_per_row = ItemsPerRow::new(n);
        }
        if let Some(level) = self.density {
            config.density = Density::new(level);
        }
        if let Some(height) = self.connector_height {
            config.connector_height = height;
        }
        if let Some(ms) = self.resolve_timeout_ms {
            config.resolve_timeout_ms = ms;
        }
        if self.sync_images {
            config.background_images = false;
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(arg: &str, value: Option<&String>) -> Option<T> {
    let Some(value) = value else {
        error!("{arg} argument missing?");
        return None;
    };

    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            error!("failed to parse {arg} argument '{value}'");
            None
        }
    }
}
