use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SinkError;
use crate::record::{ResultSet, COLUMNS};

/// Persists a finished result set. Returns the number of rows written.
pub trait ResultSink {
    fn persist(&mut self, results: &ResultSet) -> Result<usize, SinkError>;
}

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn csv_err(&self, source: csv::Error) -> SinkError {
        SinkError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultSink for CsvSink {
    fn persist(&mut self, results: &ResultSet) -> Result<usize, SinkError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| self.csv_err(e))?;

        // written by hand so an empty set still gets a header row
        writer.write_record(COLUMNS).map_err(|e| self.csv_err(e))?;
        for record in results {
            writer.serialize(record).map_err(|e| self.csv_err(e))?;
        }
        writer.flush().map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} resources to {:?}", results.len(), self.path);
        Ok(results.len())
    }
}
