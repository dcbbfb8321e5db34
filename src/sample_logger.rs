use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::bin_format;
use crate::error::{LoggerError, Result};
use crate::sample::Sample;

/// Core implementation of the bounded sample log.
///
/// This module provides the SampleLogger struct: a capacity-bounded,
/// row-major store of samples with a two-dimensional write cursor and the
/// text/binary persistence paths built on top of it.

/// Delimiter used by convention between samples in text dumps.
pub const DEFAULT_TEXT_DELIMITER: &str = ", ";

/// A capacity-bounded, row/column-organized sample buffer.
///
/// Samples of one fixed element type are accumulated into a flat store
/// organized by row and column. Each row is one sample window, typically a
/// single time step of a measurement or simulation run, and each column is
/// one sampled quantity within that window. Capacity is fixed at
/// initialization; the logger never grows past it and never drops data to
/// make room.
///
/// # Lifecycle
///
/// A logger is created empty with [`SampleLogger::new`] and is unusable
/// until initialized through [`initialize_by_memory`] or
/// [`initialize_by_row_column`]. Either entry point may be called again at
/// any time; re-initialization discards all prior contents and resets the
/// write cursor. Once the last row is filled, further appends fail until
/// the logger is re-initialized.
///
/// # Thread Safety
///
/// **Important**: SampleLogger offers no internal synchronization and no
/// operation is designed for concurrent invocation. Callers that share one
/// instance across threads must serialize access themselves; the usual
/// setup is one logger per producing thread.
///
/// # Type Parameters
///
/// * `T` - The element type of the logged samples. Any type implementing
///   [`Sample`] works: it must render itself for text dumps and convert to
///   and from the 64-bit float word used by binary dumps.
///
/// # Examples
///
/// ```
/// use sample_logger::SampleLogger;
///
/// # fn main() -> sample_logger::Result<()> {
/// let mut log = SampleLogger::<f64>::new();
/// log.initialize_by_row_column(100, 3)?;
///
/// // One row per time step: time, voltage, current.
/// log.log(0.0)?.log(12.0)?.log(0.0)?;
/// log.log(1.0e-6)?.log(11.93)?.log(0.48)?;
///
/// assert_eq!(log.len(), 6);
/// assert_eq!(*log.get_at(1, 1)?, 11.93);
/// # Ok(())
/// # }
/// ```
///
/// [`initialize_by_memory`]: SampleLogger::initialize_by_memory
/// [`initialize_by_row_column`]: SampleLogger::initialize_by_row_column
#[derive(Debug, Clone)]
pub struct SampleLogger<T: Sample> {
    store: Vec<T>,
    max_bytes: usize,
    max_samples: usize,
    max_rows: usize,
    max_columns: usize,
    row_position: usize,
    column_position: usize,
}

impl<T: Sample> SampleLogger<T> {
    /// Creates an empty, uninitialized logger.
    ///
    /// All capacity fields start at zero; logging and dumping fail until
    /// one of the initialization methods has been called.
    pub fn new() -> Self {
        Self {
            store: Vec::new(),
            max_bytes: 0,
            max_samples: 0,
            max_rows: 0,
            max_columns: 0,
            row_position: 0,
            column_position: 0,
        }
    }

    /// (Re-)initializes the logger from a byte budget.
    ///
    /// The row capacity is derived as `max_bytes / (max_columns *
    /// size_of::<T>())`, rounded down; whatever part of the budget does not
    /// fit a whole row is left unused. Any previously logged contents are
    /// discarded and the write cursor returns to the first row.
    ///
    /// # Arguments
    ///
    /// * `max_columns` - Number of samples per row; must be nonzero
    /// * `max_bytes` - Memory budget for the sample store, in bytes
    ///
    /// # Returns
    ///
    /// The maximum number of samples the logger can now hold.
    ///
    /// # Errors
    ///
    /// * [`LoggerError::InvalidArgument`] when the budget is smaller than a
    ///   single sample, when `max_columns` is zero, or when one row does
    ///   not fit in the budget
    /// * [`LoggerError::Allocation`] when the backing store cannot reserve
    ///   the derived capacity; the logger keeps its pre-call state
    pub fn initialize_by_memory(&mut self, max_columns: usize, max_bytes: usize) -> Result<usize> {
        let word_size = std::mem::size_of::<T>();
        if max_bytes < word_size {
            return Err(LoggerError::InvalidArgument(format!(
                "cannot allocate {max_bytes} bytes, less than the {word_size}-byte size of one sample"
            )));
        }
        if max_columns == 0 {
            return Err(LoggerError::InvalidArgument(
                "number of columns must be nonzero when initializing by memory".to_owned(),
            ));
        }
        let row_bytes = max_columns
            .checked_mul(word_size)
            .ok_or_else(|| LoggerError::InvalidArgument("row size overflows".to_owned()))?;
        if row_bytes > max_bytes {
            return Err(LoggerError::InvalidArgument(format!(
                "a {max_bytes}-byte budget cannot hold one row of {max_columns} samples ({row_bytes} bytes)"
            )));
        }

        let max_rows = max_bytes / row_bytes;
        self.reset_storage(max_rows, max_columns, max_bytes)?;
        Ok(self.max_samples)
    }

    /// (Re-)initializes the logger from row and column counts.
    ///
    /// Any previously logged contents are discarded and the write cursor
    /// returns to the first row.
    ///
    /// # Returns
    ///
    /// The number of bytes allocated for the sample store.
    ///
    /// # Errors
    ///
    /// * [`LoggerError::InvalidArgument`] when the requested size overflows
    /// * [`LoggerError::Allocation`] when the backing store cannot reserve
    ///   the requested capacity; the logger keeps its pre-call state
    pub fn initialize_by_row_column(&mut self, max_rows: usize, max_columns: usize) -> Result<usize> {
        let max_bytes = max_rows
            .checked_mul(max_columns)
            .and_then(|samples| samples.checked_mul(std::mem::size_of::<T>()))
            .ok_or_else(|| {
                LoggerError::InvalidArgument(format!(
                    "a log of {max_rows} x {max_columns} samples overflows the addressable size"
                ))
            })?;
        self.reset_storage(max_rows, max_columns, max_bytes)?;
        Ok(self.max_bytes)
    }

    /// Shared reset-and-allocate routine behind both initializers.
    ///
    /// Reserves the new store before touching any field, so a failed
    /// reservation leaves the logger exactly as it was.
    fn reset_storage(&mut self, max_rows: usize, max_columns: usize, max_bytes: usize) -> Result<()> {
        let max_samples = max_rows.checked_mul(max_columns).ok_or_else(|| {
            LoggerError::InvalidArgument(format!(
                "a log of {max_rows} x {max_columns} samples overflows the addressable size"
            ))
        })?;

        let mut store = Vec::new();
        store
            .try_reserve_exact(max_samples)
            .map_err(|_| LoggerError::Allocation {
                samples: max_samples,
                bytes: max_bytes,
            })?;

        self.store = store;
        self.max_bytes = max_bytes;
        self.max_samples = max_samples;
        self.max_rows = max_rows;
        self.max_columns = max_columns;
        self.row_position = 0;
        self.column_position = 0;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Capacity and cursor queries
    // -------------------------------------------------------------------------

    /// Memory budget of the sample store, in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Maximum number of samples the logger can hold.
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Maximum number of rows in the log.
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Number of samples per row.
    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    /// Row index the write cursor currently sits in.
    pub fn row_position(&self) -> usize {
        self.row_position
    }

    /// Column index of the next sample in the current row.
    pub fn column_position(&self) -> usize {
        self.column_position
    }

    /// Number of samples stored so far.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when no samples have been logged.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Borrows the backing store, holding exactly the logged samples.
    pub fn samples(&self) -> &[T] {
        &self.store
    }

    /// True when the cursor sits past the last column of the current row.
    pub fn at_row_end(&self) -> bool {
        self.column_position >= self.max_columns
    }

    /// True when the cursor has advanced past the last row.
    ///
    /// The row advance happens lazily on the next append, so a log whose
    /// final row was just filled reports `false` here until something else
    /// moves the cursor; use [`is_full`](SampleLogger::is_full) to ask
    /// whether more samples fit.
    pub fn at_log_end(&self) -> bool {
        self.row_position >= self.max_rows
    }

    /// True when the current row holds all of its samples.
    pub fn is_current_row_full(&self) -> bool {
        self.column_position >= self.max_columns
    }

    /// True when every sample slot of the log is taken.
    ///
    /// Any attempt at logging while this returns true fails with
    /// [`LoggerError::Full`].
    pub fn is_full(&self) -> bool {
        self.store.len() >= self.max_samples
    }

    // -------------------------------------------------------------------------
    // Appending
    // -------------------------------------------------------------------------

    /// Logs a sample at the cursor position.
    ///
    /// When the current row is already full, the cursor first advances to
    /// the start of the next row, then the sample is stored there. The
    /// logger does **not** announce row boundaries; producers that care
    /// which row a sample lands in should check
    /// [`is_current_row_full`](SampleLogger::is_current_row_full) as they
    /// go, or seal rows explicitly with
    /// [`fill_current_row`](SampleLogger::fill_current_row).
    ///
    /// Returns the logger itself so appends chain:
    ///
    /// ```
    /// # use sample_logger::SampleLogger;
    /// # fn main() -> sample_logger::Result<()> {
    /// # let mut log = SampleLogger::<f64>::new();
    /// # log.initialize_by_row_column(10, 3)?;
    /// log.log(0.25)?.log(11.9)?.log(0.5)?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`LoggerError::Full`] when every row is already filled; the sample
    /// is not stored.
    pub fn log(&mut self, sample: T) -> Result<&mut Self> {
        if self.at_row_end() {
            self.column_position = 0;
            self.row_position += 1;
        }
        // The cursor check alone would let a zero-column log accept samples.
        if self.at_log_end() || self.is_full() {
            return Err(LoggerError::Full {
                max_rows: self.max_rows,
            });
        }

        self.store.push(sample);
        self.column_position += 1;
        Ok(self)
    }

    /// Streaming alias for [`log`](SampleLogger::log), with identical
    /// semantics. Reads naturally when a row is appended one quantity at a
    /// time: `log.push(time)?.push(voltage)?.push(current)?`.
    pub fn push(&mut self, sample: T) -> Result<&mut Self> {
        self.log(sample)
    }

    /// Fills the remainder of the current row with `default` and starts a
    /// fresh row.
    ///
    /// Guarantees the current row is completely populated: any columns not
    /// yet written in it are set to `default` and the cursor moves to the
    /// start of the next row. If the cursor already sits at a row boundary
    /// nothing is written and only the cursor advances, so this method also
    /// serves to initialize a new row (including the first) to all
    /// defaults, or to seal a finished log.
    ///
    /// # Errors
    ///
    /// [`LoggerError::Full`] when the row is partially filled and no rows
    /// remain to complete it.
    pub fn fill_current_row(&mut self, default: T) -> Result<&mut Self> {
        if self.at_row_end() {
            self.column_position = 0;
            self.row_position += 1;
            return Ok(self);
        }
        if self.at_log_end() {
            return Err(LoggerError::Full {
                max_rows: self.max_rows,
            });
        }

        while !self.at_row_end() {
            self.log(default)?;
        }
        self.column_position = 0;
        self.row_position += 1;
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Indexed access
    // -------------------------------------------------------------------------

    /// Gets the sample at a flat index into the store.
    ///
    /// # Errors
    ///
    /// [`LoggerError::OutOfRange`] when `index` is at or beyond the number
    /// of samples actually stored.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.store.get(index).ok_or(LoggerError::OutOfRange {
            index,
            len: self.store.len(),
        })
    }

    /// Gets the sample at a row and column position.
    ///
    /// The flat index is `row * max_columns + column`; bounds are checked
    /// against the number of samples actually stored, exactly as
    /// [`get`](SampleLogger::get).
    pub fn get_at(&self, row: usize, column: usize) -> Result<&T> {
        let index = row
            .saturating_mul(self.max_columns)
            .saturating_add(column);
        self.get(index)
    }

    /// Gets the sample at a flat index without any bounds checking.
    ///
    /// This exists purely as a performance escape hatch for hot read loops
    /// over a log of known length; prefer [`get`](SampleLogger::get)
    /// everywhere else.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](SampleLogger::len), otherwise the
    /// behavior is undefined.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        self.store.get_unchecked(index)
    }

    /// Gets the sample at a row and column position without any bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `row * max_columns + column` must be less than
    /// [`len`](SampleLogger::len), otherwise the behavior is undefined.
    pub unsafe fn get_at_unchecked(&self, row: usize, column: usize) -> &T {
        self.store.get_unchecked(row * self.max_columns + column)
    }

    // -------------------------------------------------------------------------
    // Text persistence
    // -------------------------------------------------------------------------

    /// Dumps the log contents to a delimited plain-text file.
    ///
    /// One line is written per row, from the first row through the row the
    /// cursor currently sits in. The current row is included even when it
    /// is only partially filled, with its unwritten cells rendered as
    /// `T::default()`. Every line carries `max_columns` delimiter-joined
    /// fields; floats render at 15 significant digits. The conventional
    /// delimiter is [`DEFAULT_TEXT_DELIMITER`].
    ///
    /// # Errors
    ///
    /// * [`LoggerError::NotInitialized`] when the logger holds no rows or
    ///   columns
    /// * [`LoggerError::Io`] when the file cannot be created or written
    pub fn dump_to_text_file<P: AsRef<Path>>(&self, path: P, delimiter: &str) -> Result<()> {
        self.write_text_file(path.as_ref(), delimiter, None)
    }

    /// Dumps the log contents to a delimited plain-text file with a title
    /// line.
    ///
    /// Same as [`dump_to_text_file`](SampleLogger::dump_to_text_file), with
    /// the delimiter-joined column titles written as the first line.
    ///
    /// # Errors
    ///
    /// In addition to the errors of
    /// [`dump_to_text_file`](SampleLogger::dump_to_text_file),
    /// [`LoggerError::InvalidArgument`] when the title count differs from
    /// the column count.
    pub fn dump_to_text_file_with_titles<P: AsRef<Path>>(
        &self,
        path: P,
        column_titles: &[String],
        delimiter: &str,
    ) -> Result<()> {
        self.write_text_file(path.as_ref(), delimiter, Some(column_titles))
    }

    /// Dumps the log contents as a plain ASCII matrix readable by
    /// MATLAB/Octave.
    ///
    /// Samples are single-space separated with no title line, so the file
    /// loads with `load filename.dat -ascii` into a matrix named after the
    /// file. Avoid the `.mat` extension, which MATLAB treats as its own
    /// binary format; `.dat` or `.txt` work.
    pub fn dump_to_ascii_matlab_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.dump_to_text_file(path, " ")
    }

    fn write_text_file(
        &self,
        path: &Path,
        delimiter: &str,
        column_titles: Option<&[String]>,
    ) -> Result<()> {
        if self.max_rows == 0 || self.max_columns == 0 {
            return Err(LoggerError::NotInitialized);
        }
        if let Some(titles) = column_titles {
            if titles.len() != self.max_columns {
                return Err(LoggerError::InvalidArgument(format!(
                    "expected {} column titles, got {}",
                    self.max_columns,
                    titles.len()
                )));
            }
        }

        debug!(
            path = %path.display(),
            rows = self.row_position + 1,
            samples = self.store.len(),
            "dumping log to text file"
        );

        let mut writer = BufWriter::new(File::create(path)?);
        if let Some(titles) = column_titles {
            writer.write_all(titles.join(delimiter).as_bytes())?;
            writer.write_all(b"\n")?;
        }

        let default = T::default();
        for row in 0..=self.row_position {
            for column in 0..self.max_columns {
                if column > 0 {
                    writer.write_all(delimiter.as_bytes())?;
                }
                let rendered = match self.store.get(row * self.max_columns + column) {
                    Some(sample) => sample.render(),
                    None => default.render(),
                };
                writer.write_all(rendered.as_bytes())?;
            }
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Binary persistence
    // -------------------------------------------------------------------------

    /// Dumps the log contents to a binary file.
    ///
    /// Faster to write and substantially smaller than a text dump. The file
    /// format is custom to this logger: a plain-text header describing the
    /// contents, then the raw samples, laid out exactly as
    ///
    /// ```text
    /// DATATYPE=double\n
    /// WORDSIZE=8\n
    /// NROWS=<max rows>\n
    /// NCOLUMNS=<max columns>\n
    /// <title1>,<title2>,...,<titleN>\n
    /// <raw 8-byte floats, one per stored sample, no delimiters>
    /// ```
    ///
    /// Every sample is converted to a 64-bit float before writing, whatever
    /// `T` is, and bytes are written in the host's native endianness
    /// without a byte-order tag.
    ///
    /// **Caution**: the header declares the logger's *capacity* row and
    /// column counts while the payload holds only the samples stored so
    /// far. Dumping a partially-filled log therefore produces a file whose
    /// header promises more words than the payload carries;
    /// [`load_from_bin_file`](SampleLogger::load_from_bin_file) rejects
    /// such a file with an `UnexpectedEof` I/O error, and any other loader
    /// must tolerate the shortfall explicitly or misread the file.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file, created or truncated
    /// * `column_titles` - One title per column, stored in the header
    ///
    /// # Errors
    ///
    /// * [`LoggerError::NotInitialized`] when the logger holds no rows or
    ///   columns
    /// * [`LoggerError::InvalidArgument`] when the title count differs from
    ///   the column count
    /// * [`LoggerError::Io`] when the file cannot be created or written
    pub fn dump_to_bin_file<P: AsRef<Path>>(&self, path: P, column_titles: &[String]) -> Result<()> {
        if self.max_rows == 0 || self.max_columns == 0 {
            return Err(LoggerError::NotInitialized);
        }
        if column_titles.len() != self.max_columns {
            return Err(LoggerError::InvalidArgument(format!(
                "expected {} column titles, got {}",
                self.max_columns,
                column_titles.len()
            )));
        }

        let path = path.as_ref();
        debug!(
            path = %path.display(),
            rows = self.max_rows,
            columns = self.max_columns,
            samples = self.store.len(),
            "dumping log to binary file"
        );

        let mut writer = BufWriter::new(File::create(path)?);
        bin_format::write_header(&mut writer, self.max_rows, self.max_columns, column_titles)?;
        for sample in &self.store {
            bin_format::write_word(&mut writer, sample.to_f64())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads a binary log file back into the logger.
    ///
    /// The inverse of [`dump_to_bin_file`](SampleLogger::dump_to_bin_file):
    /// the header's `NROWS`/`NCOLUMNS` re-initialize the logger (discarding
    /// whatever it held before), then `NROWS * NCOLUMNS` words are read
    /// from the payload and appended through the ordinary append path,
    /// leaving the log full and the cursor at its end. The `DATATYPE=` and
    /// `WORDSIZE=` header lines are skipped without validation.
    ///
    /// Only files written by a host of the same endianness load correctly;
    /// the format carries no byte-order tag.
    ///
    /// # Returns
    ///
    /// The column titles recorded in the file header.
    ///
    /// # Errors
    ///
    /// * [`LoggerError::Io`] when the file cannot be opened, or when the
    ///   payload ends before `NROWS * NCOLUMNS` words were read, which is
    ///   exactly what a dump of a partially-filled log produces
    /// * [`LoggerError::MalformedHeader`] when a header line is missing,
    ///   unparsable, or the title count does not match `NCOLUMNS`
    pub fn load_from_bin_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        let header = bin_format::read_header(&mut reader)?;
        self.initialize_by_row_column(header.rows, header.columns)?;
        for _ in 0..self.max_samples {
            let word = bin_format::read_word(&mut reader)?;
            self.log(T::from_f64(word))?;
        }

        debug!(
            path = %path.display(),
            rows = header.rows,
            columns = header.columns,
            "loaded log from binary file"
        );
        Ok(header.column_titles)
    }
}

impl<T: Sample> Default for SampleLogger<T> {
    fn default() -> Self {
        Self::new()
    }
}
