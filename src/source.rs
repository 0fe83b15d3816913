use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use flate2::bufread::GzDecoder;
use zip::ZipArchive;
use zstd::stream::read::Decoder as ZstdDecoder;

use crate::error::{BinsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    Gzip,
    Zstd,
    Zip,
    None,
}

impl Compression {
    fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "gz" | "gzip" => Compression::Gzip,
            "zst" | "zstd" => Compression::Zstd,
            "zip" => Compression::Zip,
            _ => Compression::None,
        }
    }
}

/// Iterator over the rows of a value file, one `Vec` of values per line
pub struct ValueIterator {
    reader: Box<dyn BufRead>,
    line_no: usize,
}

impl Iterator for ValueIterator {
    type Item = Result<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        // a line that fails to decode still counts
        self.line_no += 1;
        match self.reader.read_line(&mut line) {
            Ok(0) => None, // EOF
            Ok(_) => Some(ValueFile::parse_line(&line, self.line_no)),
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Text file of numbers, optionally compressed.
///
/// Numbers are separated by whitespace or commas; `#` starts a comment.
#[derive(Debug)]
pub struct ValueFile {
    file_path: PathBuf,
}

impl ValueFile {
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let path = file_path.into();
        // Verify file exists
        File::open(&path)?;
        Ok(Self { file_path: path })
    }

    /// Create a reader that handles compression based on file extension
    fn create_reader(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.file_path)?;

        let reader: Box<dyn BufRead> = match Compression::detect(&self.file_path) {
            Compression::Gzip => Box::new(BufReader::new(GzDecoder::new(BufReader::new(file)))),
            Compression::Zstd => Box::new(BufReader::new(ZstdDecoder::new(file)?)),
            Compression::Zip => {
                // only the first entry is read, fully into memory
                let mut archive = ZipArchive::new(file)?;
                if archive.is_empty() {
                    return Err(BinsError::EmptyArchive(self.file_path.clone()));
                }
                let mut contents = Vec::new();
                std::io::copy(&mut archive.by_index(0)?, &mut contents)?;
                Box::new(Cursor::new(contents))
            }
            Compression::None => Box::new(BufReader::new(file)),
        };
        Ok(reader)
    }

    /// Parse the numbers on one line; `line_no` is 1-based and only used
    /// for error reporting.
    fn parse_line(line: &str, line_no: usize) -> Result<Vec<f64>> {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };

        line.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| BinsError::ParseValue {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect()
    }

    /// Returns an iterator over all rows
    pub fn iter(&self) -> Result<ValueIterator> {
        let reader = self.create_reader()?;
        Ok(ValueIterator { reader, line_no: 0 })
    }

    /// All values in file order
    pub fn read_values(&self) -> Result<Vec<f64>> {
        let mut values = Vec::new();
        for row in self.iter()? {
            values.extend(row?);
        }
        Ok(values)
    }
}
