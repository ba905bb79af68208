use pomdot_core::render::APP_NAME;
use pomdot_core::{resolve, ConfigStore, CoreError, Defaults, SettingsLayer};

/// `--status`: resolved settings with their sources. Never starts a run.
pub fn run(store: &ConfigStore, cli: &SettingsLayer) -> Result<(), CoreError> {
    let config = store.load()?;
    let settings = resolve(cli, &config, &Defaults::default())?;

    println!("{APP_NAME} v{}", env!("CARGO_PKG_VERSION"));
    println!("config_path = {}", store.path().display());
    for field in settings.report() {
        println!("{:<9} = {} (source: {})", field.name, field.value, field.source);
    }
    Ok(())
}
