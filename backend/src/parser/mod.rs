//! CSV ingestion with encoding auto-detection.
//!
//! Turns uploaded bytes into a grid of string tokens. There is no header
//! row: every record is data. Tokens are passed through untrimmed so the
//! engine sees exactly what the client sent.

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Reader settings for one upload.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Accept records of differing lengths (otherwise the reader rejects them)
    pub flexible: bool,
}

impl CsvOptions {
    /// Options with a delimiter given as a character.
    ///
    /// The CSV reader splits on single bytes, so only ASCII delimiters are accepted.
    pub fn with_delimiter(delimiter: char) -> CsvResult<Self> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(CsvError::Delimiter(delimiter))?;

        Ok(Self {
            delimiter,
            ..Self::default()
        })
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            flexible: false,
        }
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// UTF-8 must be valid. Other labels go through encoding_rs; labels it does
/// not know fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    if encoding.eq_ignore_ascii_case("utf-8") {
        return String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::Encoding(e.to_string()));
    }

    match encoding_rs::Encoding::for_label(encoding.as_bytes()) {
        Some(codec) => {
            let (text, _, had_errors) = codec.decode(bytes);
            if had_errors {
                return Err(CsvError::Encoding(format!("malformed {} input", codec.name())));
            }
            Ok(text.into_owned())
        }
        None => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Read every record of already-decoded CSV text.
pub fn parse_str(content: &str, options: &CsvOptions) -> CsvResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .flexible(options.flexible)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Parse uploaded CSV bytes into a grid of tokens.
///
/// Valid UTF-8 is read as is; only other input goes through encoding
/// detection.
///
/// # Example
/// ```
/// use matrixops::parser::{parse_bytes, CsvOptions};
///
/// let grid = parse_bytes(b"1,2,3\n4,5,6\n", &CsvOptions::default()).unwrap();
/// assert_eq!(grid, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
/// ```
pub fn parse_bytes(bytes: &[u8], options: &CsvOptions) -> CsvResult<Vec<Vec<String>>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(content) = std::str::from_utf8(bytes) {
        return parse_str(content, options);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_str(&content, options)
}

/// Read and parse a CSV file from disk.
pub fn parse_file<P: AsRef<Path>>(path: P, options: &CsvOptions) -> CsvResult<Vec<Vec<String>>> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_grid() {
        let grid = parse_bytes(b"1,2,3\n4,5,6\n", &CsvOptions::default()).unwrap();
        assert_eq!(grid, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
    }

    #[test]
    fn test_empty_input() {
        let grid = parse_bytes(b"", &CsvOptions::default()).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_no_trailing_newline() {
        let grid = parse_bytes(b"a,b\nc,d", &CsvOptions::default()).unwrap();
        assert_eq!(grid, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_tokens_not_trimmed() {
        let grid = parse_bytes(b" 1 , 2 \n", &CsvOptions::default()).unwrap();
        assert_eq!(grid, vec![vec![" 1 ", " 2 "]]);
    }

    #[test]
    fn test_quoted_field_keeps_comma() {
        let grid = parse_bytes(b"1,\"2,3\"\n4,5\n", &CsvOptions::default()).unwrap();
        assert_eq!(grid[0][1], "2,3");
    }

    #[test]
    fn test_ragged_records_rejected_by_default() {
        let result = parse_bytes(b"1,2\n3\n", &CsvOptions::default());
        assert!(matches!(result, Err(CsvError::Parse(_))));
    }

    #[test]
    fn test_flexible_passes_ragged_records() {
        let options = CsvOptions { flexible: true, ..CsvOptions::default() };
        let grid = parse_bytes(b"1,2\n3\n", &options).unwrap();
        assert_eq!(grid, vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn test_unclosed_quote_is_an_error_or_single_field() {
        // the csv crate reads an unterminated quote to end of input
        let result = parse_bytes(b"a,\"unclosed,quote\nb,c", &CsvOptions::default());
        match result {
            Ok(grid) => assert_eq!(grid.len(), 1),
            Err(err) => assert!(matches!(err, CsvError::Parse(_))),
        }
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = CsvOptions { delimiter: b';', ..CsvOptions::default() };
        let grid = parse_bytes(b"1;2\n3;4\n", &options).unwrap();
        assert_eq!(grid, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_utf8_upload_kept_intact() {
        let grid = parse_bytes("1,\u{e9}\n".as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(grid, vec![vec!["1", "é"]]);

        let grid = parse_bytes("Société,Ünïcödé\n".as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(grid, vec![vec!["Société", "Ünïcödé"]]);
    }

    #[test]
    fn test_non_utf8_upload_is_detected() {
        // "Société,1" in windows-1252 is not valid UTF-8
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9, b',', b'1', b'\n'];
        let grid = parse_bytes(bytes, &CsvOptions::default()).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0][1], "1");
        assert!(grid[0][0].starts_with("Soci"));
    }

    #[test]
    fn test_with_delimiter() {
        assert_eq!(CsvOptions::with_delimiter(';').unwrap().delimiter, b';');
        assert_eq!(CsvOptions::with_delimiter('\t').unwrap().delimiter, b'\t');
        assert!(!CsvOptions::with_delimiter(',').unwrap().flexible);
    }

    #[test]
    fn test_with_delimiter_rejects_multibyte() {
        for c in ['é', '€', '\u{ff}'] {
            let err = CsvOptions::with_delimiter(c).unwrap_err();
            assert!(matches!(err, CsvError::Delimiter(d) if d == c));
            assert!(err.to_string().contains(c));
        }
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode_content(&[0x31, 0xFF, 0x32], "utf-8").unwrap_err();
        assert!(matches!(err, CsvError::Encoding(_)));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"10,20\n30,40\n").unwrap();

        let grid = parse_file(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(grid, vec![vec!["10", "20"], vec!["30", "40"]]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_file(dir.path().join("absent.csv"), &CsvOptions::default());
        assert!(matches!(result, Err(CsvError::Io(_))));
    }
}
