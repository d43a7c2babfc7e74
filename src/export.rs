use regex::Regex;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("BUG: invalid whitespace regex literal"));

/// `"Bank Account Closure"` becomes `"bank-account-closure.pdf"`.
pub fn document_filename(title: &str) -> String {
    let slug = WHITESPACE_RUN.replace_all(&title.to_lowercase(), "-").into_owned();
    format!("{}.pdf", slug)
}

/// Writes `bytes` to `dir/filename` through a temporary file in the same
/// directory, so the target either holds the complete document or is left
/// untouched.
pub fn persist_atomically(dir: &Path, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let mut components = Path::new(filename).components();
    if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' is not a plain file name", filename),
        ));
    }

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn filenames_are_lowercase_and_hyphenated() {
        assert_eq!(document_filename("Bank Account Closure"), "bank-account-closure.pdf");
        assert_eq!(document_filename("Cheque  Book\tRequest"), "cheque-book-request.pdf");
        assert_eq!(document_filename("NOC"), "noc.pdf");
    }

    #[test]
    fn persist_replaces_existing_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("letter.pdf"), b"old").unwrap();

        let path = persist_atomically(dir.path(), "letter.pdf", b"%PDF-new").unwrap();
        assert_eq!(path, dir.path().join("letter.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn path_components_in_the_filename_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for bad in ["../escape.pdf", "sub/letter.pdf", "", ".."] {
            let err = persist_atomically(dir.path(), bad, b"x").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{}", bad);
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(persist_atomically(&missing, "a.pdf", b"x").is_err());
        assert!(!missing.exists());
    }
}
