use pomdot_core::{resolve_for_save, ConfigStore, CoreError, Defaults, SettingsLayer};

/// `--write-config`: a starter file built from the defaults alone.
pub fn write(store: &ConfigStore, force: bool) -> Result<(), CoreError> {
    let record = resolve_for_save(&SettingsLayer::default(), &Defaults::default()).to_config_record();
    store.write(&record, force)?;
    println!("Wrote config: {}", store.path().display());
    Ok(())
}

/// `--save-config`: persist command-line values, defaults for the rest.
///
/// The existing file is neither read nor merged.
pub fn save(store: &ConfigStore, cli: &SettingsLayer) -> Result<(), CoreError> {
    let record = resolve_for_save(cli, &Defaults::default()).to_config_record();
    store.write(&record, true)?;

    let [focus, rest, repeat] = &record.time;
    println!("Saved config: {}", store.path().display());
    println!("time = [\"{focus}\", \"{rest}\", \"{repeat}\"]");
    println!("compact = {}", record.compact);
    println!("no_bell = {}", record.no_bell);
    println!("bar_width = {}", record.bar_width);
    Ok(())
}
