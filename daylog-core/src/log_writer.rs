use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

/// A destination for console text. Implementations must accept writes from any thread.
pub trait OutputSink: Send + Sync {
    fn write_str(&self, text: &str) -> io::Result<()>;
}

/// Process stdout, flushed after every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_str(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write_str(&self, _: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps console output in memory; clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl OutputSink for MemorySink {
    fn write_str(&self, text: &str) -> io::Result<()> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
        Ok(())
    }
}

/// Adapts any [`Write`] into a sink.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write_str(&self, text: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }
}

#[test]
fn test_memory_sink_shares_buffer() {
    let sink = MemorySink::default();
    let clone = sink.clone();
    clone.write_str("Hello, ").unwrap();
    sink.write_str("world!\n").unwrap();
    assert_eq!(sink.contents(), "Hello, world!\n");
    sink.clear();
    assert!(clone.contents().is_empty());
}

#[test]
fn test_writer_sink() {
    let sink = WriterSink::new(Vec::new());
    sink.write_str("lorem ").unwrap();
    sink.write_str("ipsum").unwrap();
    NullSink.write_str("dropped").unwrap();
    assert_eq!(sink.into_inner(), b"lorem ipsum");
}
