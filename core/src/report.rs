//! CSV report of probe results and the closing run summary.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use subscout_common::network::probe::ProbeResult;
use thiserror::Error;

pub const HEADER: [&str; 2] = ["Subdomain", "Working"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create report file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write report file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes the header and one row per result, sorted by hostname.
pub fn write_csv<W: Write>(writer: W, results: &[ProbeResult]) -> Result<(), csv::Error> {
    let mut rows: Vec<&ProbeResult> = results.iter().collect();
    rows.sort_by(|a, b| a.hostname().cmp(b.hostname()));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.write_record([row.hostname(), row.liveness().as_flag()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report into it.
pub fn save(path: &Path, results: &[ProbeResult]) -> Result<(), ReportError> {
    let file: File = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, results).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Counts shown at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub working: usize,
    pub not_working: usize,
}

impl Summary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let working: usize = results.iter().filter(|r| r.is_working()).count();
        Self {
            total: results.len(),
            working,
            not_working: results.len() - working,
        }
    }
}

#[cfg(test)]
mod tests {
    use subscout_common::network::probe::Protocol;
    use tempfile::TempDir;

    use super::*;

    fn results() -> Vec<ProbeResult> {
        vec![
            ProbeResult::working("www.example.com", Protocol::Https),
            ProbeResult::not_working("dead.example.com"),
            ProbeResult::working("api.example.com", Protocol::Http),
        ]
    }

    #[test]
    fn writes_sorted_rows_with_flags() {
        let mut buf: Vec<u8> = Vec::new();
        write_csv(&mut buf, &results()).unwrap();

        let text: String = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Subdomain,Working",
                "api.example.com,Y",
                "dead.example.com,N",
                "www.example.com,Y",
            ]
        );
    }

    #[test]
    fn empty_results_still_get_a_header() {
        let mut buf: Vec<u8> = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Subdomain,Working\n");
    }

    #[test]
    fn save_writes_the_file() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("example.com_subdomains.csv");

        save(&path, &results()).unwrap();

        let text: String = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("Subdomain,Working\n"));
    }

    #[test]
    fn save_into_missing_directory_fails_with_path() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("no-such-dir").join("out.csv");

        let err: ReportError = save(&path, &results()).unwrap_err();

        assert!(matches!(err, ReportError::Io { .. }));
        assert!(err.to_string().contains("no-such-dir"));
    }

    #[test]
    fn summary_counts() {
        assert_eq!(
            Summary::from_results(&results()),
            Summary {
                total: 3,
                working: 2,
                not_working: 1,
            }
        );
    }
}
