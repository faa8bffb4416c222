//! Record Data Sources

use crate::error::SourceError;
use crate::record::TrajectoryRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supplier of the records a batch is computed over
pub trait DataSource {
    /// Records selected for feature extraction, in a stable order
    fn get_selected_data(&self) -> Result<Vec<TrajectoryRecord>, SourceError>;
}

impl DataSource for Vec<TrajectoryRecord> {
    fn get_selected_data(&self) -> Result<Vec<TrajectoryRecord>, SourceError> {
        Ok(self.clone())
    }
}

impl DataSource for [TrajectoryRecord] {
    fn get_selected_data(&self) -> Result<Vec<TrajectoryRecord>, SourceError> {
        Ok(self.to_vec())
    }
}

/// Records stored in a JSON file
///
/// Accepts either a top-level JSON array of records or JSON Lines
/// (one record object per non-blank line).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse records from already loaded file contents
    pub fn parse(contents: &str) -> Result<Vec<TrajectoryRecord>, SourceError> {
        if contents.trim_start().starts_with('[') {
            return serde_json::from_str(contents)
                .map_err(|source| SourceError::Parse { line: source.line(), source });
        }

        let mut records = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line)
                .map_err(|source| SourceError::Parse { line: idx + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl DataSource for JsonFileSource {
    fn get_selected_data(&self) -> Result<Vec<TrajectoryRecord>, SourceError> {
        debug!("Reading trajectory records from {}", self.path.display());
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = Self::parse(&contents)?;
        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let contents = r#"
            [
                {"traj_data": [[0, 0], [1, 0]], "label": "a"},
                {"traj_data": [[5, 5], [5, 6]], "label": "b"}
            ]
        "#;
        let records = JsonFileSource::parse(contents).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].metadata["label"], "b");
    }

    #[test]
    fn test_parse_json_lines_skips_blank() {
        let contents = "{\"traj_data\": [[0, 0], [1, 0]]}\n\n{\"traj_data\": [[0, 0], [0, 1]]}\n";
        let records = JsonFileSource::parse(contents).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let contents = "{\"traj_data\": [[0, 0], [1, 0]]}\n{not json}\n";
        match JsonFileSource::parse(contents) {
            Err(SourceError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let source = JsonFileSource::new("/nonexistent/trajectories.json");
        assert!(matches!(
            source.get_selected_data(),
            Err(SourceError::Io { .. })
        ));
    }

    #[test]
    fn test_in_memory_source() {
        let records = vec![TrajectoryRecord::from_rows(vec![vec![0.0, 0.0], vec![1.0, 1.0]])];
        assert_eq!(records.get_selected_data().unwrap(), records);
    }
}
