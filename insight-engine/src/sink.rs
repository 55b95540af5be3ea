//! Result sinks: an in-process collector and a pretty-JSON writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use insight_core::errors::SinkError;
use insight_core::models::RunOutput;
use insight_core::traits::IResultSink;
use insight_core::InsightResult;
use tracing::debug;

/// Keeps every persisted output in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    outputs: Mutex<Vec<RunOutput>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> Vec<RunOutput> {
        self.lock().clone()
    }

    /// The most recently persisted output.
    pub fn last(&self) -> Option<RunOutput> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RunOutput>> {
        self.outputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IResultSink for InMemorySink {
    fn persist(&self, output: &RunOutput) -> InsightResult<()> {
        self.lock().push(output.clone());
        Ok(())
    }
}

/// Writes each output as one pretty-printed JSON document.
#[derive(Debug)]
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JsonSink<BufWriter<File>> {
    /// Sink writing to a newly created file at `path`.
    pub fn create(path: impl AsRef<Path>) -> InsightResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SinkError::Io {
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> IResultSink for JsonSink<W> {
    fn persist(&self, output: &RunOutput) -> InsightResult<()> {
        let json = serde_json::to_vec_pretty(output).map_err(|e| SinkError::Serialization {
            reason: e.to_string(),
        })?;
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let io = |e: std::io::Error| SinkError::Io {
            reason: e.to_string(),
        };
        writer.write_all(&json).map_err(io)?;
        writer.write_all(b"\n").map_err(io)?;
        writer.flush().map_err(io)?;
        debug!(
            generation = %output.report.generation,
            bytes = json.len(),
            "run output written as json"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use insight_core::models::RunCheckpoint;
    use insight_core::models::RunReport;
    use insight_core::{AnalysisScope, GenerationId};

    use super::*;

    fn output() -> RunOutput {
        let generation = GenerationId::from("gen-1");
        RunOutput {
            report: RunReport::new(generation.clone(), AnalysisScope::new("tenant-a"), Utc::now()),
            findings: Vec::new(),
            rejections: Vec::new(),
            themes: Vec::new(),
            merges: Vec::new(),
            checkpoint: RunCheckpoint::new(generation),
        }
    }

    #[test]
    fn memory_sink_keeps_every_output() {
        let sink = InMemorySink::new();
        assert!(sink.is_empty());
        sink.persist(&output()).unwrap();
        sink.persist(&output()).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last().unwrap().report.scope.tenant_id, "tenant-a");
    }

    #[test]
    fn json_sink_writes_parseable_documents() {
        let sink = JsonSink::new(Vec::new());
        sink.persist(&output()).unwrap();
        let bytes = sink.into_inner();
        let parsed: RunOutput = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.report.generation.as_str(), "gen-1");
        assert_eq!(parsed.checkpoint.generation.as_str(), "gen-1");
        assert!(bytes.ends_with(b"\n"));
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
    fn write_failures_surface_as_sink_errors() {
        let err = JsonSink::new(FailingWriter).persist(&output()).unwrap_err();
        assert!(matches!(
            err,
            insight_core::InsightError::SinkError(SinkError::Io { .. })
        ));
    }
}
