// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

mod calculations;
mod configuration;
mod telemetry;

pub use configuration::Configuration;

use clap::{ArgEnum, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// Configuration file layered over the defaults
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long, default_value = "d2")]
    dimension: Dimension,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

/// Dimension of the hypercubic lattice
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum Dimension {
    D1,
    D2,
    D3,
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = App::parse();

    let config: Configuration<f64> = Configuration::build(cli.file_path.as_deref())?;

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &config.telemetry);
    telemetry::init_subscriber(subscriber)?;

    tracing::info!("log_level: {}", cli.log_level);
    tracing::info!("path: {:?}", cli.file_path);
    tracing::info!("dimension: {:?}", cli.dimension);

    match cli.dimension {
        Dimension::D1 => calculations::run_calculation::<1>(&config),
        Dimension::D2 => calculations::run_calculation::<2>(&config),
        Dimension::D3 => calculations::run_calculation::<3>(&config),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn command_line_defaults() {
        let cli = App::try_parse_from(["ladder"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(cli.dimension, Dimension::D2);
        assert!(cli.file_path.is_none());
    }

    #[test]
    fn command_line_options_parse() {
        let cli = App::try_parse_from(["ladder", "run.toml", "-l", "debug", "-d", "d3"]).unwrap();
        assert_eq!(cli.log_level.to_string(), "debug");
        assert_eq!(cli.dimension, Dimension::D3);
        assert_eq!(cli.file_path, Some(PathBuf::from("run.toml")));
    }
}
