use std::{
    fs::OpenOptions,
    io::Write as _,
    path::Path,
};

use crate::error::Error;

/// Name of the output variable holding the decision.
pub const MATCH_SEEN: &str = "MATCH_SEEN";

/// Append `key=value` to the output file, creating it if needed.
pub fn write_output(path: impl AsRef<Path>, key: &str, value: &str) -> Result<(), Error> {
    let path = path.as_ref();
    let output_error = |source| Error::Output {
        path: path.to_owned(),
        source,
    };

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(output_error)?;
    writeln!(file, "{key}={value}").map_err(output_error)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn test_write_output_creates_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("output");

        write_output(&path, MATCH_SEEN, "true").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "MATCH_SEEN=true\n");
    }

    #[test]
    fn test_write_output_appends() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("output");
        std::fs::write(&path, "DEPLOY=yes\n").unwrap();

        write_output(&path, MATCH_SEEN, "false").unwrap();
        write_output(&path, MATCH_SEEN, "true").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            indoc! {"
                DEPLOY=yes
                MATCH_SEEN=false
                MATCH_SEEN=true
            "}
        );
    }

    #[test]
    fn test_write_output_missing_directory() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("missing").join("output");

        let error = write_output(&path, MATCH_SEEN, "true").unwrap_err();
        assert!(matches!(error, Error::Output { path: ref failed, .. } if *failed == path));
    }
}
