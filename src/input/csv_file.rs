//! CSV-backed relational input.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::error::{InputGenerationError, InputIterationError};
use crate::input::{RelationalInput, RelationalInputGenerator};

pub const DEFAULT_SEPARATOR: u8 = b',';
pub const DEFAULT_QUOTE: u8 = b'"';

type Row = Result<Vec<String>, InputIterationError>;

/// Iterates the rows of one CSV document
///
/// The column count is fixed by the header, or by the first row when there is no
/// header. Unnamed columns are called `column1`, `column2`, ...
pub struct CsvFile {
    relation_name: String,
    reader: Option<csv::Reader<Box<dyn Read + Send>>>,
    column_names: Vec<String>,
    pending: Option<Row>,
    rows_read: u64,
}

impl CsvFile {
    /// Header line expected, nothing skipped
    pub fn new(
        relation_name: impl Into<String>,
        reader: impl Read + Send + 'static,
        separator: u8,
        quote: u8,
    ) -> Result<Self, InputIterationError> {
        Self::with_options(relation_name, reader, separator, quote, 0, true)
    }

    pub fn with_options(
        relation_name: impl Into<String>,
        reader: impl Read + Send + 'static,
        separator: u8,
        quote: u8,
        skip_lines: usize,
        has_header: bool,
    ) -> Result<Self, InputIterationError> {
        let boxed: Box<dyn Read + Send> = Box::new(reader);
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(separator)
            .quote(quote)
            .from_reader(boxed);

        let mut csv_file = Self {
            relation_name: relation_name.into(),
            reader: Some(reader),
            column_names: Vec::new(),
            pending: None,
            rows_read: 0,
        };

        for _ in 0..skip_lines {
            if csv_file.read_row().transpose()?.is_none() {
                break;
            }
        }

        match csv_file.read_row().transpose()? {
            None => {}
            Some(first) if has_header => {
                csv_file.column_names = first;
                csv_file.pending = csv_file.read_row();
            }
            Some(first) => {
                csv_file.column_names = default_column_names(first.len());
                csv_file.pending = Some(Ok(first));
            }
        }
        Ok(csv_file)
    }

    fn read_row(&mut self) -> Option<Row> {
        let reader = self.reader.as_mut()?;
        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => Some(Ok(record.iter().map(str::to_string).collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

fn default_column_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("column{}", i)).collect()
}

impl RelationalInput for CsvFile {
    fn has_next(&self) -> bool {
        self.pending.is_some()
    }

    fn next(&mut self) -> Result<Vec<String>, InputIterationError> {
        let row = match self.pending.take() {
            Some(row) => row?,
            None => return Err(InputIterationError::Exhausted(self.relation_name.clone())),
        };
        self.rows_read += 1;
        self.pending = self.read_row();

        if row.len() != self.column_names.len() {
            return Err(InputIterationError::ColumnCountMismatch {
                row: self.rows_read,
                expected: self.column_names.len(),
                actual: row.len(),
            });
        }
        Ok(row)
    }

    fn number_of_columns(&self) -> usize {
        self.column_names.len()
    }

    fn relation_name(&self) -> &str {
        &self.relation_name
    }

    fn column_names(&self) -> &[String] {
        &self.column_names
    }

    fn close(&mut self) -> Result<(), InputIterationError> {
        self.reader = None;
        self.pending = None;
        Ok(())
    }
}

/// Opens a fresh [`CsvFile`] over a file on every request
#[derive(Debug, Clone)]
pub struct CsvFileGenerator {
    path: PathBuf,
    separator: u8,
    quote: u8,
    skip_lines: usize,
    has_header: bool,
}

impl CsvFileGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InputGenerationError> {
        let path = path.into();
        if !path.is_file() {
            return Err(InputGenerationError::FileNotFound(path));
        }
        Ok(Self {
            path,
            separator: DEFAULT_SEPARATOR,
            quote: DEFAULT_QUOTE,
            skip_lines: 0,
            has_header: true,
        })
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn relation_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl RelationalInputGenerator for CsvFileGenerator {
    fn generate_new_copy(&self) -> Result<Box<dyn RelationalInput>, InputGenerationError> {
        let file = File::open(&self.path)?;
        let csv_file = CsvFile::with_options(
            self.relation_name(),
            file,
            self.separator,
            self.quote,
            self.skip_lines,
            self.has_header,
        )
        .map_err(|e| InputGenerationError::Failed(e.to_string()))?;
        Ok(Box::new(csv_file))
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
