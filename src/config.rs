use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{data::GameData, error::DataError};

pub const DATA_DIR_ENV: &str = "PKSUMMARY_DATA_DIR";

/// Picks the data directory: an explicit path, then `PKSUMMARY_DATA_DIR`, then the user's
/// local data directory.
pub fn get_data_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(data_dir) = explicit {
        Some(data_dir.to_path_buf())
    } else if let Ok(Ok(env_data_dir)) =
        std::env::var(DATA_DIR_ENV).map(|path_str| PathBuf::from_str(&path_str))
    {
        Some(env_data_dir)
    } else if let Some(base_dirs) = directories::BaseDirs::new() {
        let mut data_dir = base_dirs.data_local_dir().to_path_buf();
        data_dir.push("pksummary");
        data_dir.push("data");
        Some(data_dir)
    } else {
        None
    }
}

/// Loads the lookup tables once at startup. A missing directory is not an error: the built-in
/// tables are used and names resolve to empty strings.
pub fn load_game_data(explicit: Option<&Path>) -> Result<GameData, DataError> {
    match get_data_dir(explicit) {
        Some(data_dir) if data_dir.is_dir() => GameData::load(&data_dir),
        Some(data_dir) => {
            log::warn!(
                "No data directory at {}, display names will be empty",
                data_dir.display()
            );
            Ok(GameData::builtin())
        }
        None => {
            log::warn!("No suitable data directory found, display names will be empty");
            Ok(GameData::builtin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let dir = Path::new("/some/data");
        assert_eq!(get_data_dir(Some(dir)), Some(PathBuf::from("/some/data")));
    }

    #[test]
    fn test_missing_dir_falls_back_to_builtin() {
        let missing = tempfile::tempdir().unwrap().path().join("missing");
        let data = load_game_data(Some(&missing)).unwrap();
        assert_eq!(data.nature_names().len(), 25);
        assert!(data.move_names().is_empty());
    }
}
