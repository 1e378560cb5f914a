//! CSV output formatting.

use std::io;
use std::time::Duration;

/// Column names written once before the first record.
pub const CSV_HEADER: [&str; 3] = ["port", "host", "service"];

/// Format one record, without the trailing line terminator.
pub fn csv_line<I, T>(fields: I) -> io::Result<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(fields)?;

    let bytes = wtr
        .into_inner()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let line = String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Format the closing summary as a comment line.
pub fn csv_elapsed_line(elapsed: Duration) -> String {
    format!("# completed in {elapsed:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_line_quotes_commas() {
        let line = csv_line(["80", "10.0.0.1", "(http) Web, alternate"]).unwrap();
        assert_eq!(line, r#"80,10.0.0.1,"(http) Web, alternate""#);
    }

    #[test]
    fn test_csv_header() {
        assert_eq!(csv_line(CSV_HEADER).unwrap(), "port,host,service");
    }
}
