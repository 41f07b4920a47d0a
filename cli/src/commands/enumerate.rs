use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::{Instrument, info_span, warn};

use crate::mprint;
use crate::terminal::{colors, print, spinner};
use subscout_common::config::Config;
use subscout_common::network::domain::Domain;
use subscout_common::network::probe::ProbeResult;
use subscout_common::sources::{SourceReport, SourceStatus};
use subscout_core::collection::{Collection, CollectionService};
use subscout_core::probe::{self as liveness, ProbeOrchestrator};
use subscout_core::report::{self, Summary};
use subscout_core::sources::{self, SourceClient};

pub async fn enumerate(domain: Domain, cfg: &Config) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();

    let http: SourceClient = SourceClient::new().context("building source HTTP client")?;
    let (selected, unknown) = sources::apply_exclusions(sources::default_sources(&http), cfg);
    for name in &unknown {
        warn!("No source named '{name}', ignoring exclusion");
    }

    let service: CollectionService = CollectionService::new(selected);
    let collection: Collection = collect(&service, &domain).await;

    print_sources(&collection.reports, cfg);

    if collection.candidates.is_empty() {
        no_subdomains_found(&domain, cfg);
        return Ok(());
    }

    let results: Vec<ProbeResult> = probe(&collection, cfg).await;

    let path: PathBuf = cfg.report_path(&domain);
    report::save(&path, &results)
        .with_context(|| format!("saving results for {domain}"))?;

    print_summary(Summary::from_results(&results), &path, start_time.elapsed(), cfg);
    Ok(())
}

async fn collect(service: &CollectionService, domain: &Domain) -> Collection {
    let span = info_span!("collection", indicatif.pb_show = true);
    spinner::start_collection_spinner(&span, service.source_names().len());

    service.aggregate(domain).instrument(span).await
}

async fn probe(collection: &Collection, cfg: &Config) -> Vec<ProbeResult> {
    let orchestrator: ProbeOrchestrator =
        ProbeOrchestrator::new(liveness::liveness_check(cfg.probe_timeout), cfg.concurrency);

    print::header("probing liveness", cfg.quiet);

    let span = info_span!("probing", indicatif.pb_show = true);
    spinner::start_probe_bar(&span, collection.candidates.len());

    let bar = span.clone();
    let quiet: u8 = cfg.quiet;
    orchestrator
        .probe_all(&collection.candidates, move |result| {
            spinner::advance(&bar);
            if quiet < 2 {
                print_working(result);
            }
        })
        .instrument(span)
        .await
}

fn print_working(result: &ProbeResult) {
    let Some(protocol) = result.protocol() else {
        return;
    };
    let output: String = format!(
        "{} {} - {} ({})",
        "✓".color(colors::WORKING).bold(),
        result.hostname().color(colors::PRIMARY),
        "Working".color(colors::WORKING),
        protocol.to_string().color(colors::SEPARATOR)
    );
    mprint!(&output);
}

fn print_sources(reports: &[SourceReport], cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    print::header("sources", cfg.quiet);
    let key_width: usize = reports.iter().map(|r| r.name.len()).max().unwrap_or(0);

    let mut ordered: Vec<&SourceReport> = reports.iter().collect();
    ordered.sort_by_key(|r| r.name.to_ascii_lowercase());

    for report in ordered {
        let value: ColoredString = match report.status {
            SourceStatus::Found => format!("{} found", report.count).color(colors::WORKING),
            SourceStatus::Empty => "0 found".color(colors::EMPTY),
            SourceStatus::Failed => "failed".color(colors::NOT_WORKING),
        };
        print::aligned_line(report.name, key_width, value);
    }
}

fn no_subdomains_found(domain: &Domain, cfg: &Config) {
    print::header("zero subdomains found", cfg.quiet);
    if cfg.quiet == 0 {
        print::no_results();
    }
    warn!("No subdomains found for {domain}, nothing to probe");
}

fn print_summary(summary: Summary, path: &Path, total_time: Duration, cfg: &Config) {
    let total: ColoredString = format!("{} subdomains", summary.total).bold().color(colors::PRIMARY);
    let working: ColoredString = format!("{} working", summary.working).bold().color(colors::WORKING);
    let not_working: ColoredString =
        format!("{} not working", summary.not_working).bold().color(colors::NOT_WORKING);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!(
        "{}",
        format!("{total}: {working}, {not_working} in {total_time}").color(colors::TEXT_DEFAULT)
    );

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            print::print_status(format!("Results saved to {}", path.display()));
        }
        _ => {
            mprint!();
            mprint!(&output);
            mprint!(&format!("Results saved to {}", path.display()));
        }
    }
}
