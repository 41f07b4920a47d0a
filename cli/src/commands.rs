pub mod enumerate;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use subscout_common::config::{Config, DEFAULT_CONCURRENCY};
use subscout_common::network::domain::Domain;

#[derive(Parser)]
#[command(name = "subscout")]
#[command(version)]
#[command(about = "Passive subdomain enumeration with liveness probing.")]
pub struct CommandLine {
    /// Target domain, e.g. example.com
    pub domain: Domain,

    /// Maximum number of liveness probes in flight
    #[arg(short, long, default_value_t = NonZeroUsize::new(DEFAULT_CONCURRENCY).unwrap_or(NonZeroUsize::MIN))]
    pub threads: NonZeroUsize,

    /// Write the CSV report here instead of <domain>_subdomains.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request HTTP probe timeout, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Skip a source by name (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "SOURCE")]
    pub exclude: Vec<String>,

    /// Reduce output; repeat for less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            concurrency: self.threads.get(),
            probe_timeout: Duration::from_secs(self.timeout),
            output: self.output.clone(),
            excluded_sources: self.exclude.clone(),
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_line_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli: CommandLine = CommandLine::try_parse_from(["subscout", "https://www.Example.com/"]).unwrap();
        let cfg: Config = cli.to_config();

        assert_eq!(cli.domain.as_str(), "example.com");
        assert_eq!(cfg.concurrency, 10);
        assert_eq!(cfg.probe_timeout, Duration::from_secs(10));
        assert!(cfg.excluded_sources.is_empty());
    }

    #[test]
    fn flags_map_onto_config() {
        let cli: CommandLine = CommandLine::try_parse_from([
            "subscout", "example.org", "-t", "32", "-x", "crt.sh", "--exclude", "Anubis", "-qq", "-o",
            "out.csv",
        ])
        .unwrap();
        let cfg: Config = cli.to_config();

        assert_eq!(cfg.concurrency, 32);
        assert_eq!(cfg.excluded_sources, vec!["crt.sh", "Anubis"]);
        assert_eq!(cfg.quiet, 2);
        assert_eq!(cfg.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(CommandLine::try_parse_from(["subscout"]).is_err());
        assert!(CommandLine::try_parse_from(["subscout", ""]).is_err());
        assert!(CommandLine::try_parse_from(["subscout", "exa mple.com"]).is_err());
        assert!(CommandLine::try_parse_from(["subscout", "example.com", "-t", "0"]).is_err());
        assert!(CommandLine::try_parse_from(["subscout", "example.com", "--timeout", "0"]).is_err());
    }
}
