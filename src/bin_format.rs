//! On-disk layout of binary log files.
//!
//! A binary log file opens with a plain-text header followed by the raw
//! sample payload, laid out exactly as:
//!
//! ```text
//! DATATYPE=double\n
//! WORDSIZE=8\n
//! NROWS=<integer>\n
//! NCOLUMNS=<integer>\n
//! <title1>,<title2>,...,<titleN>\n
//! <raw 8-byte native-endian IEEE-754 floats, no delimiters>
//! ```
//!
//! `NROWS`/`NCOLUMNS` declare the *capacity* of the logger that produced the
//! file, while the payload holds only the samples that were actually stored
//! when the dump ran. Endianness is the host's and is not recorded; a file
//! is only readable on a platform with the same byte order as its writer.

use std::io::{BufRead, Read, Write};

use crate::error::{LoggerError, Result};

pub(crate) const DATATYPE_KEY: &str = "DATATYPE=";
pub(crate) const WORDSIZE_KEY: &str = "WORDSIZE=";
pub(crate) const NROWS_KEY: &str = "NROWS=";
pub(crate) const NCOLUMNS_KEY: &str = "NCOLUMNS=";
pub(crate) const TITLE_DELIMITER: char = ',';

/// Size of one payload word. Samples are always persisted as 64-bit floats
/// regardless of the in-memory sample type.
pub(crate) const WORD_SIZE: usize = std::mem::size_of::<f64>();

/// Header fields parsed from a binary log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BinHeader {
    pub rows: usize,
    pub columns: usize,
    pub column_titles: Vec<String>,
}

/// Writes the five header lines for a log with the given capacity.
pub(crate) fn write_header<W: Write>(
    writer: &mut W,
    rows: usize,
    columns: usize,
    column_titles: &[String],
) -> Result<()> {
    write!(
        writer,
        "{DATATYPE_KEY}double\n{WORDSIZE_KEY}{WORD_SIZE}\n{NROWS_KEY}{rows}\n{NCOLUMNS_KEY}{columns}\n"
    )?;

    let mut titles = column_titles.iter();
    if let Some(first) = titles.next() {
        write!(writer, "{first}")?;
        for title in titles {
            write!(writer, "{TITLE_DELIMITER}{title}")?;
        }
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Reads and parses the five header lines of a binary log file.
///
/// The `DATATYPE=` and `WORDSIZE=` lines are consumed without validation;
/// the payload word size is always assumed to be 8. `NROWS=`/`NCOLUMNS=`
/// are parsed by locating the `=` separator, and the title line must carry
/// exactly `NCOLUMNS` comma-separated entries.
pub(crate) fn read_header<R: BufRead>(reader: &mut R) -> Result<BinHeader> {
    let _datatype = read_header_line(reader)?;
    let _wordsize = read_header_line(reader)?;

    let rows = parse_count(&read_header_line(reader)?, NROWS_KEY)?;
    let columns = parse_count(&read_header_line(reader)?, NCOLUMNS_KEY)?;

    let title_line = read_header_line(reader)?;
    let column_titles: Vec<String> = if title_line.is_empty() && columns == 0 {
        Vec::new()
    } else {
        title_line
            .split(TITLE_DELIMITER)
            .map(str::to_owned)
            .collect()
    };
    if column_titles.len() != columns {
        return Err(LoggerError::MalformedHeader(format!(
            "expected {columns} column titles, found {}",
            column_titles.len()
        )));
    }

    Ok(BinHeader {
        rows,
        columns,
        column_titles,
    })
}

/// Writes one sample word as its native-endian byte encoding.
pub(crate) fn write_word<W: Write>(writer: &mut W, word: f64) -> Result<()> {
    writer.write_all(&word.to_ne_bytes())?;
    Ok(())
}

/// Reads one native-endian sample word from the payload.
///
/// A truncated payload surfaces as an `UnexpectedEof` I/O error.
pub(crate) fn read_word<R: Read>(reader: &mut R) -> Result<f64> {
    let mut bytes = [0u8; WORD_SIZE];
    reader.read_exact(&mut bytes)?;
    Ok(f64::from_ne_bytes(bytes))
}

/// Reads one newline-terminated header line, without the terminator.
fn read_header_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    let read = reader.read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Err(LoggerError::MalformedHeader(
            "unexpected end of file inside the header".to_owned(),
        ));
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    String::from_utf8(buf)
        .map_err(|_| LoggerError::MalformedHeader("header line is not valid UTF-8".to_owned()))
}

/// Parses the integer value after the `=` separator of a count line.
fn parse_count(line: &str, key: &str) -> Result<usize> {
    let (_, value) = line.split_once('=').ok_or_else(|| {
        LoggerError::MalformedHeader(format!("missing '=' separator in header line {line:?}"))
    })?;
    value.trim().parse().map_err(|_| {
        LoggerError::MalformedHeader(format!("cannot parse {key}{value} as a sample count"))
    })
}
