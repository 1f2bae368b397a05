use std::error;
use std::fs::File;
use std::io;
use std::marker::PhantomData;
use std::path::Path;

pub use self::serialize::{deserialize, serialize, Format, Serializer};

pub mod serialize;

pub trait Read {
    type Item;

    fn read(&mut self, buf: &mut Vec<Self::Item>) -> io::Result<usize> {
        self.read_upto(usize::MAX, buf)
    }

    fn read_upto(&mut self, num: usize, buf: &mut Vec<Self::Item>) -> io::Result<usize>;
}

pub trait Write {
    type Item;

    fn write(&mut self, buf: &[Self::Item]) -> io::Result<usize>;

    fn flush(&mut self) -> io::Result<()>;
}

pub trait FromLine: Sized {
    type Err: Into<Box<dyn error::Error + Send + Sync>>;

    fn from_line(line: &str) -> Result<Self, Self::Err>;
}

pub trait FileOpen: Sized {
    fn open<P: AsRef<Path>>(path: P) -> io::Result<Self>;
}

#[derive(Debug)]
pub struct Reader<R, T> {
    inner: R,
    _phantom: PhantomData<T>,
}

impl<R: io::Read, T> Reader<R, T> {
    pub fn new(inner: R) -> Self {
        Reader {
            inner: inner,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn inner(&self) -> &R {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<T> FileOpen for Reader<io::BufReader<File>, T> {
    fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(io::BufReader::new(File::open(path)?)))
    }
}
