use std::io as std_io;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::io as mod_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    JsonPretty,
}

pub fn serialize<T: Serialize>(data: &T, format: Format) -> std_io::Result<Vec<u8>> {
    let result = match format {
        Format::Json => serde_json::to_vec(data),
        Format::JsonPretty => serde_json::to_vec_pretty(data),
    };
    result.map_err(|e| std_io::Error::new(std_io::ErrorKind::InvalidData, e))
}

pub fn deserialize<'a, T: Deserialize<'a>>(bytes: &'a [u8], format: Format) -> std_io::Result<T> {
    match format {
        Format::Json | Format::JsonPretty => serde_json::from_slice(bytes).map_err(|e| {
            std_io::Error::new(std_io::ErrorKind::InvalidData, e)
        }),
    }
}

/// Writes one serialized record per line, or reads them back.
///
/// `JsonPretty` output spans several lines, so only `Json` can be read back.
pub struct Serializer<IO, T> {
    _phantom: PhantomData<T>,
    inner: IO,
    format: Format,
}

impl<IO, T> Serializer<IO, T> {
    pub fn new(io: IO, format: Format) -> Self {
        Serializer {
            _phantom: PhantomData,
            inner: io,
            format: format,
        }
    }

    pub fn inner(&self) -> &IO {
        &self.inner
    }

    pub fn into_inner(self) -> IO {
        self.inner
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl<T: Serialize, IO: std_io::Write> mod_io::Write for Serializer<IO, T> {
    type Item = T;

    fn write(&mut self, buf: &[Self::Item]) -> std_io::Result<usize> {
        for item in buf {
            let mut bytes = serialize(item, self.format)?;
            bytes.push(b'\n');
            self.inner.write_all(&bytes)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std_io::Result<()> {
        self.inner.flush()
    }
}

impl<T: DeserializeOwned, IO: std_io::BufRead> mod_io::Read for Serializer<IO, T> {
    type Item = T;

    fn read_upto(&mut self, num: usize, buf: &mut Vec<Self::Item>) -> std_io::Result<usize> {
        let mut count = 0;
        let mut line = Vec::new();
        while count < num {
            line.clear();
            match self.inner.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {
                    if line.iter().all(|b| b.is_ascii_whitespace()) {
                        continue;
                    }
                    buf.push(deserialize(&line, self.format)?);
                    count += 1;
                }
                Err(ref e) if e.kind() == std_io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(count)
    }
}
