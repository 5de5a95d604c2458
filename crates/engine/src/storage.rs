//! File storage for the gym document.

use std::{fs, path::Path};

use crate::{Gym, ResultEngine, document};

/// Writes the gym to `path`.
///
/// The document is written next to the target first and then renamed over
/// it, so an interrupted save never leaves a truncated store behind.
pub fn save_to_path(path: &Path, gym: &Gym) -> ResultEngine<()> {
    let contents = document::save(gym)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a gym previously written with [`save_to_path`].
pub fn load_from_path(path: &Path) -> ResultEngine<Gym> {
    let contents = fs::read_to_string(path)?;
    document::load(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use std::path::PathBuf;

    fn scratch_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_stores")
            .join(format!("gym_storage_{}", uuid::Uuid::new_v4().simple()))
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = scratch_dir();
        let path = dir.join("nested").join("gym.json");
        let gym = Gym::builder().name("Iron Temple").build().unwrap();

        save_to_path(&path, &gym).unwrap();

        assert!(path.exists());
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.name(), "Iron Temple");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_from_path(&scratch_dir().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), "Io");
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gym.json");
        fs::write(&path, "not json").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, EngineError::CorruptDocument(_)));
        fs::remove_dir_all(dir).unwrap();
    }
}
