//! CSV parsing with encoding and delimiter auto-detection.
//!
//! Turns delimited text with a header row into [`RawRow`] maps. Cells are
//! parsed with RFC 4180 quoting so embedded JSON (commas, quotes) survives
//! intact. No user-specific logic here.

use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::RawRow;

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows in source order.
    pub rows: Vec<RawRow>,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
    /// Column headers from the first line.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        // Fallback: lossy UTF-8
        _ => Ok(String::from_utf8_lossy(bytes).to_string()),
    }
}

/// Detect the delimiter by counting occurrences in the header line.
///
/// The header line never contains quoted JSON, so a plain count is safe.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// Each data line becomes a [`RawRow`] keyed by header. A short row lacks
/// its trailing keys; extra trailing cells are dropped. Blank lines are
/// skipped.
///
/// # Example
/// ```ignore
/// use userload::parse_str;
///
/// let csv = "name,age\nAlice,30\nBob,25";
/// let result = parse_str(csv, ',').unwrap();
///
/// assert_eq!(result.rows.len(), 2);
/// assert_eq!(result.rows[0]["name"], "Alice");
/// assert_eq!(result.rows[0]["age"], "30");
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<ParseResult> {
    parse_with_encoding(content, delimiter, "utf-8".to_string())
}

fn parse_with_encoding(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), cell.to_string());
        }
        rows.push(row);
    }

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyInput);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    parse_with_encoding(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let mut bytes = Vec::new();
    std::fs::File::open(path.as_ref())?.read_to_end(&mut bytes)?;
    parse_bytes_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "name,age\nAlice,30\nBob,25";
        let result = parse_str(csv, ',').unwrap();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0]["name"], "Alice");
        assert_eq!(result.rows[0]["age"], "30");
        assert_eq!(result.rows[1]["name"], "Bob");
        assert_eq!(result.rows[1]["age"], "25");
    }

    #[test]
    fn test_dotted_headers() {
        let csv = "name.firstName,name.lastName,age\nRohit,Prasad,35";
        let result = parse_str(csv, ',').unwrap();

        assert_eq!(
            result.headers,
            vec!["name.firstName", "name.lastName", "age"]
        );
        assert_eq!(result.rows[0]["name.firstName"], "Rohit");
        assert_eq!(result.rows[0]["name.lastName"], "Prasad");
    }

    #[test]
    fn test_quoted_json_cell_survives() {
        let csv = r#"name,address
Alice,"{""city"": ""Pune"", ""state"": ""Maharashtra""}""#;
        let result = parse_str(csv, ',').unwrap();

        assert_eq!(result.rows.len(), 1);
        let cell = &result.rows[0]["address"];
        let value: serde_json::Value = serde_json::from_str(cell).unwrap();
        assert_eq!(value["city"], "Pune");
    }

    #[test]
    fn test_short_row_leaves_keys_absent() {
        let csv = "a,b,c\n1,2";
        let result = parse_str(csv, ',').unwrap();

        assert_eq!(result.rows[0]["a"], "1");
        assert_eq!(result.rows[0]["b"], "2");
        assert!(!result.rows[0].contains_key("c"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n";
        let result = parse_str(csv, ',').unwrap();

        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_empty_input_error() {
        let err = parse_str("", ',').unwrap_err();
        assert!(matches!(err, CsvError::EmptyInput));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "name;age\nAlice;30\nBob;25";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.headers, vec!["name", "age"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }

    #[test]
    fn test_parse_file_auto() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name,age\nAlice,30").unwrap();

        let result = parse_file_auto(file.path()).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0]["name"], "Alice");
    }
}
