use std::fmt::{self, Write as _};

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const RED_BOLD: &str = "\x1b[1;31m";

/// `<module>:<line>` on the first line, the message on the next.
///
/// Colored by level when the writer supports ANSI escapes. Error events
/// carrying an `error` field are shown in blue.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFormat;

/// `\n<module>:<line> | <timestamp>` followed by the message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let fields = EventFields::from_event(event);
        let meta = event.metadata();
        let style = writer
            .has_ansi_escapes()
            .then(|| level_style(meta.level(), fields.error.is_some()));

        if let Some(style) = style {
            writer.write_str(style)?;
        }
        write!(writer, "{}\n{}", location(event), fields)?;
        if style.is_some() {
            writer.write_str(RESET)?;
        }
        writeln!(writer)
    }
}

impl<S, N> FormatEvent<S, N> for FileFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let fields = EventFields::from_event(event);
        writeln!(
            writer,
            "\n{} | {}\n{}",
            location(event),
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            fields
        )
    }
}

fn location(event: &Event<'_>) -> String {
    let meta = event.metadata();
    format!(
        "{}:{}",
        meta.module_path().unwrap_or_else(|| meta.target()),
        meta.line().unwrap_or(0)
    )
}

fn level_style(level: &Level, has_error: bool) -> &'static str {
    match *level {
        Level::ERROR if has_error => BLUE,
        Level::ERROR => RED_BOLD,
        Level::WARN => YELLOW,
        Level::INFO => GREEN,
        _ => RESET,
    }
}

/// Fields of an event, split into message, attached error and the rest.
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    error: Option<String>,
    extra: Vec<(&'static str, String)>,
}

impl EventFields {
    fn from_event(event: &Event<'_>) -> Self {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        fields
    }

    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "error" => self.error = Some(value),
            name => self.extra.push((name, value)),
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }
}

impl fmt::Display for EventFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for (name, value) in &self.extra {
            write!(f, " {}={}", name, value)?;
        }
        if let Some(error) = &self.error {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_style() {
        assert_eq!(level_style(&Level::INFO, false), GREEN);
        assert_eq!(level_style(&Level::WARN, false), YELLOW);
        assert_eq!(level_style(&Level::ERROR, false), RED_BOLD);
        assert_eq!(level_style(&Level::ERROR, true), BLUE);
        assert_eq!(level_style(&Level::DEBUG, false), RESET);
    }

    #[test]
    fn test_event_fields_display() {
        let fields = EventFields {
            message: "File#:   1 | A.nc | modisa".to_string(),
            error: Some("Failed to open dataset".to_string()),
            extra: vec![("count", "3".to_string())],
        };

        assert_eq!(
            fields.to_string(),
            "File#:   1 | A.nc | modisa count=3\nFailed to open dataset"
        );
    }
}
