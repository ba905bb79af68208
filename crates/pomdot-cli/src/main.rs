use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pomdot_core::storage::{expand_tilde, ConfigStore};
use pomdot_core::{parse_bar_width, parse_focus_or_rest, parse_repeat, SettingsLayer};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "pomdot", version, about = "Pomdot terminal timer")]
struct Cli {
    /// Timer config: FOCUS REST REPEAT, or FOCUS,REST,REPEAT.
    /// FOCUS/REST use N, Ns, or Nm. REPEAT is a non-negative integer.
    /// The sequence runs one base focus/rest cycle plus REPEAT cycles and
    /// ends on rest. Default: 30 5 0
    #[arg(short = 't', long = "time", num_args = 1..=3, value_name = "TIME")]
    time: Option<Vec<String>>,

    /// Show only the live countdown line for each stage
    #[arg(long, overrides_with = "no_compact")]
    compact: bool,

    /// Disable compact output
    #[arg(long, overrides_with = "compact")]
    no_compact: bool,

    /// Enable the bell at stage transitions and on completion
    #[arg(long, overrides_with = "no_bell")]
    bell: bool,

    /// Disable the bell
    #[arg(long, overrides_with = "bell")]
    no_bell: bool,

    /// Countdown bar width (minimum 10, default: 30)
    #[arg(long, value_name = "WIDTH", value_parser = parse_bar_width)]
    bar_width: Option<u16>,

    /// Path to config file (default: ~/.config/pomdot/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a starter config file and exit
    #[arg(
        long,
        conflicts_with_all = ["save_config", "status", "time", "compact", "no_compact", "bell", "no_bell", "bar_width"]
    )]
    write_config: bool,

    /// Save effective timer settings to config and exit
    #[arg(long, conflicts_with = "status")]
    save_config: bool,

    /// Show effective settings and their sources, then exit
    #[arg(long)]
    status: bool,

    /// Overwrite an existing config when used with --write-config
    #[arg(long, requires = "write_config")]
    force: bool,
}

impl Cli {
    fn mode(&self) -> commands::Mode {
        if self.write_config {
            commands::Mode::WriteConfig { force: self.force }
        } else if self.save_config {
            commands::Mode::SaveConfig
        } else if self.status {
            commands::Mode::Status
        } else {
            commands::Mode::Run
        }
    }

    fn store(&self) -> ConfigStore {
        match &self.config {
            Some(path) => ConfigStore::new(expand_tilde(path)),
            None => ConfigStore::at_default_location(),
        }
    }

    /// The command-line settings layer. Token errors exit through clap.
    fn settings_layer(&self) -> SettingsLayer {
        let mut layer = SettingsLayer {
            compact: flag_pair(self.compact, self.no_compact),
            bell_enabled: flag_pair(self.bell, self.no_bell),
            bar_width: self.bar_width,
            ..Default::default()
        };

        if let Some(raw) = &self.time {
            let [focus, rest, repeat] = normalize_time_values(raw);
            layer.focus_seconds = Some(parse_focus_or_rest(&focus).unwrap_or_else(|e| usage_error(e)));
            layer.rest_seconds = Some(parse_focus_or_rest(&rest).unwrap_or_else(|e| usage_error(e)));
            layer.repeat_count = Some(parse_repeat(&repeat).unwrap_or_else(|e| usage_error(e)));
        }
        layer
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Accept `-t 25 5 0` as well as `-t 25,5,0`.
fn normalize_time_values(raw: &[String]) -> [String; 3] {
    let values: Vec<String> = match raw {
        [single] if single.contains(',') => {
            single.split(',').map(|part| part.trim().to_string()).collect()
        }
        _ => raw.iter().map(|part| part.trim().to_string()).collect(),
    };
    match <[String; 3]>::try_from(values) {
        Ok(values) if values.iter().all(|v| !v.is_empty()) => values,
        _ => usage_error(
            "-t/--time must be either three values (FOCUS REST REPEAT) \
             or one comma-separated value (FOCUS,REST,REPEAT)",
        ),
    }
}

fn usage_error(message: impl std::fmt::Display) -> ! {
    Cli::command()
        .error(clap::error::ErrorKind::ValueValidation, message)
        .exit()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMDOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let mode = cli.mode();
    let store = cli.store();
    let layer = cli.settings_layer();
    tracing::debug!(?mode, path = %store.path().display(), "starting");

    match commands::run(mode, &store, &layer).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
