use bitcoin::{
    consensus::{encode, Decodable, Encodable},
    io::{self, Read, Write},
};

/// Trailing field that older payload versions simply do not carry.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Maybe<T>(pub Option<T>);

impl<T: Encodable> Encodable for Maybe<T> {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        match &self.0 {
            Some(v) => v.consensus_encode(w),
            None => Ok(0),
        }
    }
}

/// Absent only when the reader is already exhausted. A partially present
/// value is a decode error.
impl<T: Decodable> Decodable for Maybe<T> {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let mut first = [0u8; 1];
        if r.read(&mut first)? == 0 {
            return Ok(Self(None));
        }
        let mut reader = Prefixed {
            first: Some(first[0]),
            inner: r,
        };
        Ok(Self(Some(T::consensus_decode(&mut reader)?)))
    }
}

/// Replays one already consumed byte ahead of the inner reader.
struct Prefixed<'a, R: ?Sized> {
    first: Option<u8>,
    inner: &'a mut R,
}

impl<R: Read + ?Sized> Read for Prefixed<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.first.take() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => self.inner.read(buf),
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(v: Option<T>) -> Self {
        Self(v)
    }
}

/// Everything left in the reader, kept verbatim.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct RawBytes(pub Vec<u8>);

impl Encodable for RawBytes {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error> {
        writer.write_all(&self.0)?;
        Ok(self.0.len())
    }
}

impl Decodable for RawBytes {
    fn consensus_decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, encode::Error> {
        let mut bytes = Vec::new();
        let mut buf = [0u8; 512];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&buf[..n]);
        }
        Ok(Self(bytes))
    }
}

/// 96 byte BLS signature as used by provider transactions.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BlsSignature(pub [u8; 96]);

impl Encodable for BlsSignature {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error> {
        writer.write_all(&self.0)?;
        Ok(self.0.len())
    }
}

impl Decodable for BlsSignature {
    fn consensus_decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, encode::Error> {
        let mut sig = [0u8; 96];
        reader.read_exact(&mut sig)?;
        Ok(Self(sig))
    }
}
