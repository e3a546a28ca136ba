use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AnalyzerError;

/// Reads every line of `path` in file order, terminators stripped.
///
/// `\n`, `\r\n` and a lone `\r` all end a line, so logs written with
/// classic Mac line endings split the same way as Unix or Windows ones.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, AnalyzerError> {
    let path = path.as_ref();
    let read_err = |source| AnalyzerError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut text = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut text))
        .map_err(read_err)?;

    Ok(split_lines(&text))
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest.to_string());
                rest = "";
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_lines_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\r\nsecond\nthird").unwrap();

        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_lone_carriage_return_ends_a_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[1] TRADE 1->2 qty=1 price=1\r[2] TRADE 3->4 qty=2 price=2\r\r[3] TRADE 5->6 qty=3 price=3\r"
        )
        .unwrap();

        let lines = read_lines(file.path()).unwrap();
        assert_eq!(
            lines,
            vec![
                "[1] TRADE 1->2 qty=1 price=1",
                "[2] TRADE 3->4 qty=2 price=2",
                "",
                "[3] TRADE 5->6 qty=3 price=3",
            ]
        );
    }

    #[test]
    fn test_split_lines_matches_universal_newlines() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert_eq!(split_lines("\r\n"), vec![""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_empty_file_has_no_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_lines(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.log");

        match read_lines(&path) {
            Err(AnalyzerError::Read { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected read error, got {:?}", other),
        }
    }
}
