use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::engine::mastery::WordPerformance;
use crate::store::schema::{PerformanceData, SCHEMA_VERSION};
use crate::store::{PerformanceStore, StoreError};

const PERFORMANCES_FILE: &str = "performances.json";

/// File-backed performance store: one JSON document under the platform data
/// directory. Reads that fail for any reason degrade to an empty record set.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chunkr");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(PERFORMANCES_FILE)
    }

    fn write_atomic(&self, data: &PerformanceData) -> Result<(), StoreError> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl PerformanceStore for JsonStore {
    fn load(&self) -> Vec<WordPerformance> {
        let path = self.file_path();
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<PerformanceData>(&content)
                .map(|data| data.performances)
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn save(&mut self, performances: &[WordPerformance]) -> Result<(), StoreError> {
        self.write_atomic(&PerformanceData {
            schema_version: SCHEMA_VERSION,
            performances: performances.to_vec(),
        })
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let path = self.file_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
