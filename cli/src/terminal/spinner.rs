use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::terminal::logging::SubscoutFormatter;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
    "▁▁▁▁▁",
];

/// Installs the global subscriber.
///
/// Log lines go through the indicatif writer so they print above any live
/// spinner or bar. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style());

    let filter: EnvFilter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .event_format(SubscoutFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .try_init();
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.green/bright_black}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
        .progress_chars("━╸ ")
}

/// Turns `span` into the spinner shown while sources are queried.
pub fn start_collection_spinner(span: &Span, sources: usize) {
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&format!("Querying {sources} sources..."));
}

/// Turns `span` into the bar shown while candidates are probed.
pub fn start_probe_bar(span: &Span, candidates: usize) {
    span.pb_set_style(&bar_style());
    span.pb_set_length(candidates as u64);
    span.pb_set_message("Probing");
}

pub fn advance(span: &Span) {
    span.pb_inc(1);
}
