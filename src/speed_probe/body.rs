use std::io::{self, Write};

use flate2::write::GzDecoder;

/// Counts bytes written to it and discards them.
#[derive(Debug, Default)]
pub struct ByteCounter(u64);

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Measures the decoded size of a response body fed to it chunk by chunk.
/// Gzip bodies are inflated on the fly, anything else is counted as received.
pub enum BodyMeter {
    Identity(u64),
    Gzip { raw: u64, decoder: GzDecoder<ByteCounter> },
}

impl BodyMeter {
    pub fn for_encoding(content_encoding: Option<&str>) -> Self {
        match content_encoding {
            Some(encoding) if encoding.trim().eq_ignore_ascii_case("gzip") => BodyMeter::Gzip {
                raw: 0,
                decoder: GzDecoder::new(ByteCounter::default()),
            },
            _ => BodyMeter::Identity(0),
        }
    }

    pub fn feed(&mut self, chunk: &[u8]) -> io::Result<()> {
        match self {
            BodyMeter::Identity(count) => *count += chunk.len() as u64,
            BodyMeter::Gzip { raw, decoder } => {
                *raw += chunk.len() as u64;
                decoder.write_all(chunk)?;
            }
        }
        Ok(())
    }

    /// Returns the decoded body length in bytes.
    pub fn finish(self) -> io::Result<u64> {
        match self {
            BodyMeter::Identity(count) => Ok(count),
            // An empty body carries no gzip stream at all.
            BodyMeter::Gzip { raw: 0, .. } => Ok(0),
            BodyMeter::Gzip { decoder, .. } => Ok(decoder.finish()?.0),
        }
    }
}
