pub mod client;
pub mod process_file;
pub mod server;
pub mod simulation;

use std::io::{self, Read, Write};

use crate::processing::Sample;

/// Bytes per sample on the wire: big-endian f64 timestamp, then big-endian
/// f64 value.
pub const SAMPLE_SIZE: usize = 16;

pub fn write_sample<W: Write>(writer: &mut W, sample: &Sample) -> io::Result<()> {
    let mut buffer = [0u8; SAMPLE_SIZE];
    buffer[..8].copy_from_slice(&sample.timestamp.to_be_bytes());
    buffer[8..].copy_from_slice(&sample.value.to_be_bytes());
    writer.write_all(&buffer)
}

/// Reads one sample. Returns `Ok(None)` on a clean end of stream, and an
/// `UnexpectedEof` error if the stream stops partway through a sample.
pub fn read_sample<R: Read>(reader: &mut R) -> io::Result<Option<Sample>> {
    let mut buffer = [0u8; SAMPLE_SIZE];
    let mut filled = 0;
    while filled < SAMPLE_SIZE {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                log::warn!("stream ended {} bytes into a sample", filled);
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("truncated sample: {} of {} bytes", filled, SAMPLE_SIZE),
                ));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    let mut timestamp = [0u8; 8];
    let mut value = [0u8; 8];
    timestamp.copy_from_slice(&buffer[..8]);
    value.copy_from_slice(&buffer[8..]);
    Ok(Some(Sample::new(
        f64::from_be_bytes(timestamp),
        f64::from_be_bytes(value),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sample_layout_is_big_endian() {
        let mut bytes = Vec::new();
        write_sample(&mut bytes, &Sample::new(1.5, -1.0)).unwrap();
        assert_eq!(bytes.len(), SAMPLE_SIZE);
        assert_eq!(&bytes[..8], &1.5f64.to_be_bytes());
        assert_eq!(&bytes[8..], &(-1.0f64).to_be_bytes());
    }

    #[test]
    fn stream_ends_cleanly() {
        let mut bytes = Vec::new();
        write_sample(&mut bytes, &Sample::new(0.02, 0.25)).unwrap();
        let mut cursor = Cursor::new(bytes);
        assert_eq!(
            read_sample(&mut cursor).unwrap(),
            Some(Sample::new(0.02, 0.25))
        );
        assert_eq!(read_sample(&mut cursor).unwrap(), None);
    }

    #[test]
    fn truncated_sample_is_an_error() {
        let mut bytes = Vec::new();
        write_sample(&mut bytes, &Sample::new(0.0, -1.0)).unwrap();
        write_sample(&mut bytes, &Sample::new(0.02, -1.0)).unwrap();
        bytes.truncate(SAMPLE_SIZE + 5);

        let mut cursor = Cursor::new(bytes);
        assert_eq!(
            read_sample(&mut cursor).unwrap(),
            Some(Sample::new(0.0, -1.0))
        );
        let err = read_sample(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn empty_stream_has_no_samples() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert_eq!(read_sample(&mut cursor).unwrap(), None);
    }
}
