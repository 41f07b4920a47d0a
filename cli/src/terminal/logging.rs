use std::any::Any;
use std::fmt;
use std::panic::{self, Location, PanicHookInfo};
use std::thread;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber, debug, error};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

/// Target of events that carry pre-rendered terminal output.
pub const PRINT_TARGET: &str = "subscout::print";

/// Prefixes each event with a coloured level marker.
///
/// Events sent to [`PRINT_TARGET`] are written verbatim instead, which is how
/// the `print` module gets its lines through the progress bars intact.
pub struct SubscoutFormatter;

impl<S, N> FormatEvent<S, N> for SubscoutFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw: RawMessage = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

/// Routes panic messages through tracing instead of raw stderr.
///
/// Panics on worker threads belong to spawned tasks, which are reported where
/// their `JoinError` is handled, so they only show up at debug level.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info: &PanicHookInfo<'_>| {
        let summary: String = panic_summary(info.payload(), info.location());
        if thread::current().name() == Some("main") {
            error!("{summary}");
        } else {
            debug!("task panicked: {summary}");
        }
    }));
}

fn panic_summary(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let message: &str = if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "Box<dyn Any>"
    };

    match location {
        Some(loc) => format!("{message} at {}:{}", loc.file(), loc.line()),
        None => message.to_string(),
    }
}
