use std::io::{self, Write};

/// Writes every buffer to each underlying sink, flushing after every
/// write so interactive output stays live while a copy lands in the
/// transcript file.
pub struct TeeWriter {
    sinks: Vec<Box<dyn Write>>,
}

impl TeeWriter {
    pub fn new(sinks: Vec<Box<dyn Write>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Box<dyn Write>) {
        self.sinks.push(sink);
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
            sink.flush()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
