use crate::data::{Error, Expense, HEADER};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// The append-only CSV file holding every expense ever recorded.
///
/// Nothing is cached: every read reopens and reparses the whole file, and the
/// store assumes it is the only writer for the lifetime of the process.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with its header row. An existing file is left untouched,
    /// even if its header is wrong.
    pub fn initialize(&self) -> Result<(), Error> {
        if self.path.exists() {
            return Ok(());
        }
        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record(HEADER)?;
        wtr.flush()?;
        info!("Created expense store {}", self.path.display());
        Ok(())
    }

    /// Appends one row. The header is never written here, so the file must have
    /// been initialized first.
    pub fn append(&self, expense: &Expense) -> Result<(), Error> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.serialize(expense)?;
        wtr.flush()?;
        info!(
            "Recorded {} {} for {:?}",
            expense.date, expense.amount, expense.category
        );
        Ok(())
    }

    /// Lazily parses the store row by row. The file is closed when the iterator
    /// is dropped.
    pub fn records(&self) -> Result<Records<File>, Error> {
        Records::new(File::open(&self.path)?)
    }

    /// Reads every record. The first malformed row aborts the whole read: a
    /// partial view of the store would silently under-report totals.
    pub fn read_all(&self) -> Result<Vec<Expense>, Error> {
        let expenses = self.records()?.collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Read {} expenses from {}",
            expenses.len(),
            self.path.display()
        );
        Ok(expenses)
    }
}

pub(crate) struct Records<R: std::io::Read> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
    /// Rows shorter than this are malformed.
    required_len: usize,
}

impl<R: std::io::Read> Records<R> {
    /// A file without even a header line reads as an empty store.
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let required_len = if headers.is_empty() {
            0
        } else {
            let mut required_len = 0;
            for name in HEADER {
                let idx = headers.iter().position(|h| h == name).ok_or_else(|| {
                    Error::Parse {
                        line: 1,
                        message: format!("missing required column {name:?}"),
                    }
                })?;
                required_len = required_len.max(idx + 1);
            }
            required_len
        };
        Ok(Self {
            reader,
            headers,
            required_len,
        })
    }

    fn parse_record(&self, record: &csv::StringRecord) -> Result<Expense, Error> {
        let line = record.position().map_or(0, |p| p.line());
        if record.len() < self.required_len {
            return Err(Error::Parse {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    self.required_len,
                    record.len()
                ),
            });
        }
        record
            .deserialize(Some(&self.headers))
            .map_err(|e| Error::Parse {
                line,
                message: e.to_string(),
            })
    }
}

impl<R: std::io::Read> Iterator for Records<R> {
    type Item = Result<Expense, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.headers.is_empty() {
            return None;
        }
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => Some(self.parse_record(&record)),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
