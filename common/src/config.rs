use std::path::PathBuf;
use std::time::Duration;

use crate::network::domain::Domain;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Config {
    /// Upper bound on liveness probes in flight at once.
    pub concurrency: usize,
    /// Per-request timeout for each HTTP(S) probe.
    pub probe_timeout: Duration,
    /// Where the CSV report goes.
    ///
    /// Falls back to `<domain>_subdomains.csv` in the working directory.
    pub output: Option<PathBuf>,
    /// Source names to leave out of the run, compared case-insensitively.
    pub excluded_sources: Vec<String>,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            output: None,
            excluded_sources: Vec::new(),
            quiet: 0,
            no_banner: false,
        }
    }
}

impl Config {
    pub fn report_path(&self, domain: &Domain) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(domain.report_file_name()))
    }

    pub fn is_source_excluded(&self, name: &str) -> bool {
        self.excluded_sources
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(name))
    }
}
