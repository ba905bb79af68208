use pomdot_core::{ConfigStore, CoreError, SettingsLayer};

pub mod config;
pub mod status;
pub mod timer;

/// What this invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    WriteConfig { force: bool },
    SaveConfig,
    Status,
}

/// Dispatch `mode`, returning the process exit code.
pub async fn run(mode: Mode, store: &ConfigStore, cli: &SettingsLayer) -> Result<i32, CoreError> {
    match mode {
        Mode::Run => timer::run(store, cli).await,
        Mode::WriteConfig { force } => config::write(store, force).map(|()| 0),
        Mode::SaveConfig => config::save(store, cli).map(|()| 0),
        Mode::Status => status::run(store, cli).map(|()| 0),
    }
}
