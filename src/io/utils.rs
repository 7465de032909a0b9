//! Utilities for input/output.

use std::{fs, io, io::Read, path::Path};

#[cfg(feature = "json")]
use serde::Serialize;
#[cfg(feature = "json")]
use std::io::Write;

/// Reads and returns the content of the specified text file.
pub fn read_text_file<P: AsRef<Path>>(file_path: P) -> io::Result<String> {
    let file = fs::File::open(file_path)?;
    let mut text = String::new();
    let _ = io::BufReader::new(file).read_to_string(&mut text)?;
    Ok(text)
}

/// Serializes the given data into pretty-printed JSON and saves it at the
/// given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<P: AsRef<Path>, T: Serialize>(file_path: P, data: &T) -> io::Result<()> {
    let file = fs::File::create(file_path)?;
    let mut writer = io::BufWriter::new(file);
    write_data_as_json(&mut writer, data)?;
    writer.flush()
}

/// Serializes the given data into pretty-printed JSON and writes it to the
/// given writer.
#[cfg(feature = "json")]
pub fn write_data_as_json<W: Write, T: Serialize>(writer: W, data: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, data).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn missing_file_gives_not_found() {
        let err = read_text_file("this/file/does/not/exist.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn text_file_is_read_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"H0 = 70\nw = -1\n").unwrap();
        let text = read_text_file(file.path()).unwrap();
        assert_eq!(text, "H0 = 70\nw = -1\n");
    }

    #[cfg(feature = "json")]
    #[test]
    fn data_is_written_as_json() {
        let mut buffer = Vec::new();
        write_data_as_json(&mut buffer, &[1.5, 2.0]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let values: Vec<f64> = serde_json::from_str(&text).unwrap();
        assert_eq!(values, vec![1.5, 2.0]);
    }
}
