use clap::Subcommand;

use super::{load_settings, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a settings value by dot-separated key
    Get { key: String },
    /// Set a settings value
    Set { key: String, value: String },
    /// Print all settings as TOML
    List,
}

pub fn run(action: ConfigAction) -> CliResult {
    let mut settings = load_settings()?;

    match action {
        ConfigAction::Get { key } => match settings.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown settings key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            settings.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            print!("{}", toml::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
