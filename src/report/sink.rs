//! Log sinks.

use super::GenerationRecord;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for the fitness log of a run.
pub trait FitnessSink {
    /// Persists the ordered records of a completed run.
    fn write_records(&mut self, records: &[GenerationRecord]) -> Result<()>;
}

/// Keeps the records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<GenerationRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<GenerationRecord> {
        self.records
    }
}

impl FitnessSink for MemorySink {
    fn write_records(&mut self, records: &[GenerationRecord]) -> Result<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}

/// Writes the records as one pretty-printed JSON array to a writer.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FitnessSink for JsonSink<W> {
    fn write_records(&mut self, records: &[GenerationRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Creates (or truncates) a file and writes the records as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FitnessSink for JsonFileSink {
    fn write_records(&mut self, records: &[GenerationRecord]) -> Result<()> {
        let file = File::create(&self.path)?;
        JsonSink::new(BufWriter::new(file)).write_records(records)?;
        info!(
            "wrote {} generation records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulevoError;

    fn records() -> Vec<GenerationRecord> {
        vec![
            GenerationRecord {
                generation: 1,
                best: 10,
                average: 7.25,
                worst: 3,
            },
            GenerationRecord {
                generation: 2,
                best: 12,
                average: 8.0,
                worst: 4,
            },
        ]
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.write_records(&records()).unwrap();
        assert_eq!(sink.records(), records().as_slice());
        assert_eq!(sink.into_records().len(), 2);
    }

    #[test]
    fn test_json_sink_writes_array() {
        let mut sink = JsonSink::new(Vec::new());
        sink.write_records(&records()).unwrap();
        let bytes = sink.into_inner();
        let parsed: Vec<GenerationRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, records());
        // Pretty-printed, one field per line.
        assert!(String::from_utf8(bytes).unwrap().contains("\n  {"));
    }

    #[test]
    fn test_json_sink_empty() {
        let mut sink = JsonSink::new(Vec::new());
        sink.write_records(&[]).unwrap();
        assert_eq!(sink.into_inner(), b"[]");
    }

    #[test]
    fn test_json_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        let mut sink = JsonFileSink::new(&path);
        sink.write_records(&records()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<GenerationRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records());
    }

    #[test]
    fn test_json_file_sink_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("missing").join("log.json"));
        let err = sink.write_records(&records()).unwrap_err();
        assert!(matches!(err, RulevoError::Io(_)), "{err}");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_sink_writer_failure_surfaces() {
        let mut sink = JsonSink::new(FailingWriter);
        assert!(sink.write_records(&records()).is_err());
    }
}
