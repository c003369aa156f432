use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Target of undecorated terminal lines, see [`crate::terminal::print::print`].
pub const PRINT_TARGET: &str = "recipebook::print";
const SUCCESS_TARGET: &str = "recipebook::success";

pub struct RecipebookFormatter;

impl<S, N> FormatEvent<S, N> for RecipebookFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO if meta.target() == SUCCESS_TARGET => ("[+]", |s| s.green().bold()),
            Level::INFO => ("[*]", |s| s.cyan()),
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
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

/// `RUST_LOG` wins when set. Otherwise status lines show from `info` up, or
/// from `warn` up once `-q` is given.
pub fn init_logging(quiet: u8) {
    let default = if quiet > 0 { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(always_shown(filter))
        .event_format(RecipebookFormatter)
        .init();
}

/// Plain output and success lines carry command results, so no level
/// setting hides them.
fn always_shown(mut filter: EnvFilter) -> EnvFilter {
    for target in [PRINT_TARGET, SUCCESS_TARGET] {
        if let Ok(directive) = format!("{target}=info").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture_quiet(emit: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(always_shown(EnvFilter::new("warn")))
            .event_format(RecipebookFormatter)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, emit);
        out.text()
    }

    #[test]
    fn quiet_keeps_success_and_plain_lines() {
        let text = capture_quiet(|| {
            recipebook_common::success!("Stored 'Pasta' as 1234");
            crate::terminal::print::print("1234\tPasta");
        });

        assert!(text.contains("Stored 'Pasta' as 1234"), "{text:?}");
        assert!(text.contains("[+]"), "{text:?}");
        assert!(text.contains("1234\tPasta"), "{text:?}");
    }

    #[test]
    fn quiet_drops_ordinary_info() {
        let text = capture_quiet(|| {
            tracing::info!("applied recipe store migration 2");
            tracing::warn!("ignoring category filter 9");
        });

        assert!(!text.contains("migration"), "{text:?}");
        assert!(text.contains("ignoring category filter 9"), "{text:?}");
    }
}
