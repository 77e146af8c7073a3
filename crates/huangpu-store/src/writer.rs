//! Atomic CSV persistence for normalized tables.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

use huangpu_types::DataTable;

/// Errors that can occur while persisting a table.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create the target directory.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Failed to write or rename the target file.
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Writes a table as CSV to `path`, atomically replacing any previous file.
///
/// The content goes to a temporary file in the target directory and is
/// renamed into place, so readers never observe a partial file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written or renamed.
pub fn write_table(path: &Path, table: &DataTable) -> Result<(), StoreError> {
    let write_err = |source| StoreError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_csv(&mut writer, table).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Writes the table's header and rows in CSV form.
fn write_csv<W: Write>(writer: &mut W, table: &DataTable) -> io::Result<()> {
    writeln!(writer, "{}", table.fields().join(","))?;
    for row in table.rows() {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                write!(writer, ",")?;
            }
            write_cell(writer, value)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes one cell. Nulls become empty cells; strings are quoted only when
/// they contain a delimiter, quote, or newline.
fn write_cell<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::String(s) => {
            if s.contains([',', '"', '\n']) {
                write!(writer, "\"{}\"", s.replace('"', "\"\""))
            } else {
                write!(writer, "{s}")
            }
        }
        other => write!(writer, "{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(table: &DataTable) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, table).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_render_header_and_rows() {
        let table = DataTable::new(
            vec!["ts_code".into(), "close".into(), "note".into()],
            vec![
                vec![json!("600000.SH"), json!(7.42), Value::Null],
                vec![json!("000001.SZ"), json!(10), json!("ex-dividend")],
            ],
        );
        assert_eq!(
            render(&table),
            "ts_code,close,note\n600000.SH,7.42,\n000001.SZ,10,ex-dividend\n"
        );
    }

    #[test]
    fn test_render_quotes_awkward_strings() {
        let table = DataTable::new(
            vec!["name".into()],
            vec![vec![json!("Ping An, Bank")], vec![json!("say \"hi\"")]],
        );
        assert_eq!(
            render(&table),
            "name\n\"Ping An, Bank\"\n\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_write_table_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock_price/2025-01-06.csv");
        let table = DataTable::new(
            vec!["ts_code".into(), "close".into()],
            vec![vec![json!("600000.SH"), json!(7.42)]],
        );

        write_table(&path, &table).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "ts_code,close\n600000.SH,7.42\n");

        // A second write replaces the file in full.
        let empty = DataTable::new(vec!["ts_code".into()], Vec::new());
        write_table(&path, &empty).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ts_code\n");
    }
}
