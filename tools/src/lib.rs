use std::error::Error;
use std::io::Read;
use std::path::Path;

use env_logger::Env;
use flate2::read::GzDecoder;
use log::debug;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Set up logging for a tool, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Read a whole NBT file, decompressing it if it is gzipped.
pub fn load_file(path: &Path) -> Result<Vec<u8>> {
    let raw = std::fs::read(path)?;
    Ok(unwrap_gzip(raw)?)
}

/// Gunzip `data` if it starts with the gzip magic, otherwise hand it back.
pub fn unwrap_gzip(data: Vec<u8>) -> std::io::Result<Vec<u8>> {
    if !data.starts_with(&GZIP_MAGIC) {
        return Ok(data);
    }

    let mut out = Vec::new();
    GzDecoder::new(data.as_slice()).read_to_end(&mut out)?;
    debug!("gunzipped {} bytes into {}", data.len(), out.len());
    Ok(out)
}

/// Offset of the first byte where `a` and `b` differ, including one being
/// a prefix of the other.
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    #[test]
    fn plain_data_is_untouched() {
        let data = vec![0x0a, 0x00, 0x00, 0x00];
        assert_eq!(unwrap_gzip(data.clone()).unwrap(), data);
    }

    #[test]
    fn gzipped_data_is_unwrapped() {
        let data = vec![0x0a, 0x00, 0x00, 0x00];
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&data).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(unwrap_gzip(compressed).unwrap(), data);
    }

    #[test]
    fn differences() {
        assert_eq!(first_difference(b"abc", b"abc"), None);
        assert_eq!(first_difference(b"abc", b"abd"), Some(2));
        assert_eq!(first_difference(b"ab", b"abc"), Some(2));
        assert_eq!(first_difference(b"", b""), None);
    }
}
