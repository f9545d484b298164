use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::DatacleanError;

const APP_NAME: &str = "dataclean";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), DatacleanError> {
    save_json_at(data, &get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    load_json_at_or_default(&get_data_file_path(filename))
}

pub fn save_json_at<T: Serialize>(data: &T, file_path: &Path) -> Result<(), DatacleanError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    tracing::info!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json_at<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, DatacleanError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_at_or_default<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json_at::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", file_path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{
        Deserialize,
        Serialize,
    };
    use tempfile::tempdir;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = tempdir().unwrap();
        let loaded: Sample = load_json_at(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn saved_data_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.json");
        let sample = Sample { name: "x".to_string(), count: 3 };

        save_json_at(&sample, &path).unwrap();
        assert_eq!(load_json_at::<Sample>(&path).unwrap(), sample);
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let loaded: Sample = load_json_at_or_default(&path);
        assert_eq!(loaded, Sample::default());
    }
}
