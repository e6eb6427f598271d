use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{MigrateError, MigrateResult};
use crate::model::RecordKind;

/// One CSV data row, keyed by header column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }

    /// Like `get`, but a column absent from the header is an error.
    pub fn require(&self, column: &str) -> MigrateResult<&str> {
        self.get(column).ok_or_else(|| MigrateError::MissingColumn {
            column: column.to_string(),
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Drops the spaces that open an unquoted field position, i.e. those at the
/// start of a line or right after a comma, before the CSV parser sees them.
/// Spaces inside quotes and anywhere else in a field are kept, so
/// `a, "b, c"` parses as two fields with the second one `b, c`.
pub struct SkipInitialSpace<R> {
    inner: R,
    state: FieldState,
}

impl<R: Read> SkipInitialSpace<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            state: FieldState::Start,
        }
    }

    fn keep(&mut self, byte: u8) -> bool {
        use FieldState::*;

        self.state = match (self.state, byte) {
            (Start, b' ') => return false,
            (Start, b'"') => Quoted,
            (Quoted, b'"') => QuoteInQuoted,
            (Quoted, _) => Quoted,
            (QuoteInQuoted, b'"') => Quoted,
            (_, b',' | b'\n') => Start,
            _ => Unquoted,
        };
        true
    }
}

impl<R: Read> Read for SkipInitialSpace<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }

            let mut kept = 0;
            for i in 0..n {
                let byte = buf[i];
                if self.keep(byte) {
                    buf[kept] = byte;
                    kept += 1;
                }
            }
            // A chunk of nothing but skipped spaces is not end of input.
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}

/// A CSV file with a header row, read lazily one `Row` at a time.
/// Open it again to restart from the top.
pub struct CsvSource {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<SkipInitialSpace<File>>,
}

impl CsvSource {
    pub fn open(path: &Path) -> MigrateResult<Self> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(SkipInitialSpace::new(file));
        let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();

        Ok(Self {
            headers,
            records: reader.into_records(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for CsvSource {
    type Item = MigrateResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let row = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        Some(Ok(row))
    }
}

/// Reads every row of a CSV file into memory.
pub fn parse_rows(path: &Path) -> MigrateResult<Vec<Row>> {
    CsvSource::open(path)?.collect()
}

/// An input file paired with the kind of record its rows hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub kind: RecordKind,
    pub path: PathBuf,
}

impl Input {
    pub fn new(kind: RecordKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// The four phone-call inputs under `data_dir`, in load order.
    /// Companies and people come first so contracts and calls can match them.
    pub fn phone_calls(data_dir: &Path) -> Vec<Input> {
        RecordKind::ALL
            .iter()
            .map(|&kind| Input::new(kind, data_dir.join(format!("{}.csv", kind.file_stem()))))
            .collect()
    }

    pub fn open(&self) -> MigrateResult<CsvSource> {
        CsvSource::open(&self.path)
    }
}
