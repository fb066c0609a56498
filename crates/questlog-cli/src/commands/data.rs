use std::path::PathBuf;

use clap::Subcommand;
use questlog_core::seed;
use questlog_core::storage::{backup, data_dir};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write a timestamped backup file
    Backup {
        /// Target directory; defaults to the data directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all data with a backup file's contents
    Restore { file: PathBuf },
    /// Delete everything and reseed defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    let db = open_store()?;

    match action {
        DataAction::Backup { out } => {
            let dir = match out {
                Some(dir) => dir,
                None => data_dir()?,
            };
            let path = backup::write_backup(&db, &dir)?;
            println!("Backup successful: {}", path.display());
        }
        DataAction::Restore { file } => {
            backup::restore_file(&db, &file)?;
            println!("Restore successful.");
        }
        DataAction::Reset { yes } => {
            if !yes {
                return Err("refusing to reset without --yes".into());
            }
            seed::reset_all_data(&db)?;
            println!("Data reset successfully.");
        }
    }
    Ok(())
}
