//! Logger core: configuration, line composition, and emission paths

use crate::core::color::{Color, ColorSpec, Style};
use crate::core::context::{self, Context};
use crate::core::emitter::Emitter;
use crate::core::error::Result;
use crate::core::level::Level;
use crate::core::sink::Sink;
use crate::core::source::{SourceFormat, SourceRecord};
use chrono::{DateTime, FixedOffset, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Default time field layout (date and time, local zone).
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Default short-form source location (file name and line number).
pub const DEFAULT_SOURCE_FORMAT: &str = "%{filename}:%{linenumber}:";

/// Zone a timestamp is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
    Offset(FixedOffset),
}

impl TimeZone {
    fn format(&self, at: DateTime<Utc>, layout: &str) -> String {
        match self {
            TimeZone::Local => at.with_timezone(&chrono::Local).format(layout).to_string(),
            TimeZone::Utc => at.format(layout).to_string(),
            TimeZone::Offset(offset) => at.with_timezone(offset).format(layout).to_string(),
        }
    }
}

#[derive(Clone)]
struct Config {
    sink: Arc<dyn Sink>,
    colorize: bool,
    level: Level,
    level_colors: HashMap<Level, ColorSpec>,
    time_format: String,
    time_zone: TimeZone,
    time_color: Option<ColorSpec>,
    source_format: Option<SourceFormat>,
    source_color: Option<ColorSpec>,
    prefix: String,
    prefix_color: Option<ColorSpec>,
    message_color: Option<ColorSpec>,
}

/// A leveled logger with caller attribution.
///
/// Configuration sits behind a single short-lived lock so instances can be
/// shared and reconfigured from any thread; clone-derived loggers share the
/// emission worker but own their configuration (including an independent
/// per-level color map).
pub struct Logger {
    emitter: Arc<Emitter>,
    config: RwLock<Config>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

/// Concatenate display arguments with no separator.
pub(crate) fn concat_args(args: &[&dyn fmt::Display]) -> String {
    args.iter().map(|arg| arg.to_string()).collect()
}

/// Join display arguments with single spaces.
pub(crate) fn join_args(args: &[&dyn fmt::Display]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Field colorizer resolution: the override if set, else the level's color,
/// else none; nothing at all when colorization is disabled.
fn pick_color<'a>(
    colorize: bool,
    specific: Option<&'a ColorSpec>,
    level_default: Option<&'a ColorSpec>,
) -> Option<&'a ColorSpec> {
    if colorize {
        specific.or(level_default)
    } else {
        None
    }
}

impl Logger {
    /// A logger writing to `sink` with the given threshold, carrying the
    /// default per-level color table, time format, and short source format.
    pub fn new(sink: Arc<dyn Sink>, level: Level) -> Logger {
        let mut level_colors = HashMap::new();
        let defaults = [
            (Level::Debug, Color::LIGHT_GRAY, Style::empty()),
            (Level::Info, Color::BLUE, Style::empty()),
            (Level::Warning, Color::YELLOW, Style::empty()),
            (Level::Error, Color::RED, Style::empty()),
            (Level::Critical, Color::RED, Style::BOLD | Style::BLINK),
        ];
        for (lvl, foreground, style) in defaults {
            if let Ok(spec) = ColorSpec::new(foreground, Color::DEFAULT, style) {
                level_colors.insert(lvl, spec);
            }
        }
        Logger {
            emitter: Arc::new(Emitter::new()),
            config: RwLock::new(Config {
                sink,
                colorize: false,
                level,
                level_colors,
                time_format: DEFAULT_TIME_FORMAT.to_string(),
                time_zone: TimeZone::Local,
                time_color: None,
                source_format: Some(SourceFormat::compile(DEFAULT_SOURCE_FORMAT)),
                source_color: None,
                prefix: String::new(),
                prefix_color: None,
                message_color: None,
            }),
        }
    }

    // -- configuration ----------------------------------------------------

    pub fn set_sink(&self, sink: Arc<dyn Sink>) {
        self.config.write().sink = sink;
    }

    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&self.config.read().sink)
    }

    pub fn set_colorize(&self, enabled: bool) {
        self.config.write().colorize = enabled;
    }

    pub fn colorize(&self) -> bool {
        self.config.read().colorize
    }

    pub fn set_level(&self, level: Level) {
        self.config.write().level = level;
    }

    pub fn level(&self) -> Level {
        self.config.read().level
    }

    /// Install a per-level color. A rejected color name leaves the prior
    /// entry (or its absence) in effect.
    pub fn set_level_color(
        &self,
        level: Level,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<()> {
        let spec = ColorSpec::new(foreground, background, style)?;
        self.config.write().level_colors.insert(level, spec);
        Ok(())
    }

    pub fn level_color(&self, level: Level) -> Option<ColorSpec> {
        self.config.read().level_colors.get(&level).cloned()
    }

    /// The time field layout; the empty string disables the field.
    pub fn set_time_format(&self, layout: impl Into<String>) {
        self.config.write().time_format = layout.into();
    }

    pub fn time_format(&self) -> String {
        self.config.read().time_format.clone()
    }

    pub fn set_time_zone(&self, zone: TimeZone) {
        self.config.write().time_zone = zone;
    }

    pub fn time_zone(&self) -> TimeZone {
        self.config.read().time_zone
    }

    pub fn set_time_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<()> {
        let spec = ColorSpec::new(foreground, background, style)?;
        self.config.write().time_color = Some(spec);
        Ok(())
    }

    pub fn time_color(&self) -> Option<ColorSpec> {
        self.config.read().time_color.clone()
    }

    /// Compile and install a source-location template; the empty string
    /// disables the field.
    pub fn set_source_format(&self, layout: &str) {
        self.config.write().source_format = if layout.is_empty() {
            None
        } else {
            Some(SourceFormat::compile(layout))
        };
    }

    pub fn source_format(&self) -> Option<SourceFormat> {
        self.config.read().source_format.clone()
    }

    pub fn set_source_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<()> {
        let spec = ColorSpec::new(foreground, background, style)?;
        self.config.write().source_color = Some(spec);
        Ok(())
    }

    pub fn source_color(&self) -> Option<ColorSpec> {
        self.config.read().source_color.clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.config.write().prefix = prefix.into();
    }

    pub fn prefix(&self) -> String {
        self.config.read().prefix.clone()
    }

    pub fn set_prefix_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<()> {
        let spec = ColorSpec::new(foreground, background, style)?;
        self.config.write().prefix_color = Some(spec);
        Ok(())
    }

    pub fn prefix_color(&self) -> Option<ColorSpec> {
        self.config.read().prefix_color.clone()
    }

    pub fn set_message_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<()> {
        let spec = ColorSpec::new(foreground, background, style)?;
        self.config.write().message_color = Some(spec);
        Ok(())
    }

    pub fn message_color(&self) -> Option<ColorSpec> {
        self.config.read().message_color.clone()
    }

    // -- clone-and-override variants --------------------------------------

    pub fn with_sink(&self, sink: Arc<dyn Sink>) -> Logger {
        let derived = self.clone();
        derived.set_sink(sink);
        derived
    }

    pub fn with_color(&self) -> Logger {
        let derived = self.clone();
        derived.set_colorize(true);
        derived
    }

    pub fn without_color(&self) -> Logger {
        let derived = self.clone();
        derived.set_colorize(false);
        derived
    }

    pub fn with_level(&self, level: Level) -> Logger {
        let derived = self.clone();
        derived.set_level(level);
        derived
    }

    pub fn with_level_color(
        &self,
        level: Level,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<Logger> {
        let derived = self.clone();
        derived.set_level_color(level, foreground, background, style)?;
        Ok(derived)
    }

    pub fn with_time_format(&self, layout: impl Into<String>) -> Logger {
        let derived = self.clone();
        derived.set_time_format(layout);
        derived
    }

    pub fn with_time_zone(&self, zone: TimeZone) -> Logger {
        let derived = self.clone();
        derived.set_time_zone(zone);
        derived
    }

    pub fn with_time_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<Logger> {
        let derived = self.clone();
        derived.set_time_color(foreground, background, style)?;
        Ok(derived)
    }

    pub fn with_source_format(&self, layout: &str) -> Logger {
        let derived = self.clone();
        derived.set_source_format(layout);
        derived
    }

    pub fn with_source_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<Logger> {
        let derived = self.clone();
        derived.set_source_color(foreground, background, style)?;
        Ok(derived)
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Logger {
        let derived = self.clone();
        derived.set_prefix(prefix);
        derived
    }

    pub fn with_prefix_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<Logger> {
        let derived = self.clone();
        derived.set_prefix_color(foreground, background, style)?;
        Ok(derived)
    }

    pub fn with_message_color(
        &self,
        foreground: Color,
        background: Color,
        style: Style,
    ) -> Result<Logger> {
        let derived = self.clone();
        derived.set_message_color(foreground, background, style)?;
        Ok(derived)
    }

    // -- composition and emission -----------------------------------------

    /// Compose one line under a single configuration snapshot. Field order
    /// is fixed: time, level, prefix, trace annotation, source, message.
    /// Each field uses its own color override, else the level's color, else
    /// nothing; the message is whitespace-trimmed; the line ends with one
    /// newline.
    fn compose(
        &self,
        level: Level,
        source: Option<&SourceRecord>,
        annotation: Option<&str>,
        message: &str,
    ) -> (Arc<dyn Sink>, Vec<u8>) {
        let config = self.config.read();
        let level_default = if config.colorize {
            config.level_colors.get(&level)
        } else {
            None
        };

        let mut line = String::new();
        if !config.time_format.is_empty() {
            let stamp = config.time_zone.format(Utc::now(), &config.time_format);
            match pick_color(config.colorize, config.time_color.as_ref(), level_default) {
                Some(color) => line.push_str(&color.colorize(&stamp)),
                None => line.push_str(&stamp),
            }
            line.push(' ');
        }
        let padded = level.padded(8);
        match level_default {
            Some(color) => line.push_str(&color.colorize(&padded)),
            None => line.push_str(&padded),
        }
        line.push(' ');
        if !config.prefix.is_empty() {
            match pick_color(config.colorize, config.prefix_color.as_ref(), level_default) {
                Some(color) => line.push_str(&color.colorize(&config.prefix)),
                None => line.push_str(&config.prefix),
            }
            line.push(' ');
        }
        if let Some(annotation) = annotation {
            match level_default {
                Some(color) => line.push_str(&color.colorize(annotation)),
                None => line.push_str(annotation),
            }
            line.push(' ');
        }
        if let Some(format) = &config.source_format {
            let rendered = match source {
                Some(record) => format.format_record(record),
                None => String::new(),
            };
            match pick_color(config.colorize, config.source_color.as_ref(), level_default) {
                Some(color) => line.push_str(&color.colorize(&rendered)),
                None => line.push_str(&rendered),
            }
            line.push(' ');
        }
        let message = message.trim();
        match pick_color(config.colorize, config.message_color.as_ref(), level_default) {
            Some(color) => line.push_str(&color.colorize(message)),
            None => line.push_str(message),
        }
        line.push('\n');
        (Arc::clone(&config.sink), line.into_bytes())
    }

    /// Compose and write one line from an already-captured source record,
    /// returning the sink's byte count and error verbatim. Records below
    /// the threshold report zero bytes and no error.
    pub fn emit_with_source(
        &self,
        level: Level,
        source: Option<&SourceRecord>,
        annotation: Option<&str>,
        message: &str,
    ) -> io::Result<usize> {
        if level > self.level() {
            return Ok(0);
        }
        let (sink, line) = self.compose(level, source, annotation, message);
        sink.write(&line)
    }

    /// Synchronous emission: capture the caller's frame at the carrier's
    /// depth, compose, and write on this thread.
    pub fn emit(&self, ctx: Option<&Context>, level: Level, message: &str) -> io::Result<usize> {
        if level > self.level() {
            return Ok(0);
        }
        let record = SourceRecord::capture(context::depth_of(ctx) + 1);
        self.emit_with_source(level, record.as_ref(), None, message)
    }

    /// Detached emission: the source record is captured on this thread
    /// before the hand-off (the worker must not add frames to the depth
    /// count), then the composed line is queued for the worker. Sink
    /// errors on this path are dropped.
    pub fn emit_detached(&self, ctx: Option<&Context>, level: Level, message: String) {
        if level > self.level() {
            return;
        }
        let record = SourceRecord::capture(context::depth_of(ctx) + 1);
        let (sink, line) = self.compose(level, record.as_ref(), None, &message);
        self.emitter.enqueue(sink, line);
    }

    /// Drain the detached emission queue.
    pub fn flush(&self) -> Result<()> {
        self.emitter.flush()
    }

    // -- leveled entry points ----------------------------------------------

    pub fn log(&self, ctx: Option<&Context>, level: Level, args: &[&dyn fmt::Display]) {
        if level > self.level() {
            return;
        }
        let ctx = context::deepen(ctx);
        self.emit_detached(Some(&ctx), level, concat_args(args));
    }

    pub fn logln(&self, ctx: Option<&Context>, level: Level, args: &[&dyn fmt::Display]) {
        if level > self.level() {
            return;
        }
        let ctx = context::deepen(ctx);
        self.emit_detached(Some(&ctx), level, join_args(args));
    }

    pub fn logf(&self, ctx: Option<&Context>, level: Level, args: fmt::Arguments<'_>) {
        if level > self.level() {
            return;
        }
        let ctx = context::deepen(ctx);
        self.emit_detached(Some(&ctx), level, args.to_string());
    }

    pub fn log_sync(
        &self,
        ctx: Option<&Context>,
        level: Level,
        args: &[&dyn fmt::Display],
    ) -> io::Result<usize> {
        if level > self.level() {
            return Ok(0);
        }
        let ctx = context::deepen(ctx);
        self.emit(Some(&ctx), level, &concat_args(args))
    }

    pub fn logln_sync(
        &self,
        ctx: Option<&Context>,
        level: Level,
        args: &[&dyn fmt::Display],
    ) -> io::Result<usize> {
        if level > self.level() {
            return Ok(0);
        }
        let ctx = context::deepen(ctx);
        self.emit(Some(&ctx), level, &join_args(args))
    }

    pub fn logf_sync(
        &self,
        ctx: Option<&Context>,
        level: Level,
        args: fmt::Arguments<'_>,
    ) -> io::Result<usize> {
        if level > self.level() {
            return Ok(0);
        }
        let ctx = context::deepen(ctx);
        self.emit(Some(&ctx), level, &args.to_string())
    }

    pub fn print(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.log(Some(&ctx), Level::None, args);
    }

    pub fn println(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.logln(Some(&ctx), Level::None, args);
    }

    pub fn printf(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        let ctx = context::deepen(ctx);
        self.logf(Some(&ctx), Level::None, args);
    }

    pub fn debug(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.log(Some(&ctx), Level::Debug, args);
    }

    pub fn debugln(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.logln(Some(&ctx), Level::Debug, args);
    }

    pub fn debugf(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        let ctx = context::deepen(ctx);
        self.logf(Some(&ctx), Level::Debug, args);
    }

    pub fn info(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.log(Some(&ctx), Level::Info, args);
    }

    pub fn infoln(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.logln(Some(&ctx), Level::Info, args);
    }

    pub fn infof(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        let ctx = context::deepen(ctx);
        self.logf(Some(&ctx), Level::Info, args);
    }

    pub fn warn(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.log(Some(&ctx), Level::Warning, args);
    }

    pub fn warnln(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.logln(Some(&ctx), Level::Warning, args);
    }

    pub fn warnf(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        let ctx = context::deepen(ctx);
        self.logf(Some(&ctx), Level::Warning, args);
    }

    pub fn error(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.log(Some(&ctx), Level::Error, args);
    }

    pub fn errorln(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        self.logln(Some(&ctx), Level::Error, args);
    }

    pub fn errorf(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        let ctx = context::deepen(ctx);
        self.logf(Some(&ctx), Level::Error, args);
    }

    // -- terminal entry points ---------------------------------------------
    //
    // Fatal and panic paths compose and write synchronously before invoking
    // the terminating primitive; a detached write could be lost.

    pub fn fatal(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        let _ = self.log_sync(Some(&ctx), Level::Critical, args);
        crate::core::default_logger::exit(1);
    }

    pub fn fatalln(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
        let ctx = context::deepen(ctx);
        let _ = self.logln_sync(Some(&ctx), Level::Critical, args);
        crate::core::default_logger::exit(1);
    }

    pub fn fatalf(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        let ctx = context::deepen(ctx);
        let _ = self.log_sync(Some(&ctx), Level::Critical, &[&message]);
        crate::core::default_logger::exit(1);
    }

    pub fn panic(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) -> ! {
        let ctx = context::deepen(ctx);
        let _ = self.log_sync(Some(&ctx), Level::Critical, args);
        panic!("{}", concat_args(args));
    }

    pub fn panicln(&self, ctx: Option<&Context>, args: &[&dyn fmt::Display]) -> ! {
        let ctx = context::deepen(ctx);
        let _ = self.logln_sync(Some(&ctx), Level::Critical, args);
        panic!("{}", join_args(args));
    }

    pub fn panicf(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        let ctx = context::deepen(ctx);
        let _ = self.log_sync(Some(&ctx), Level::Critical, &[&message]);
        panic!("{}", message);
    }

    // -- diagnostics -------------------------------------------------------

    /// Print the remaining call stack to the sink, two lines per frame,
    /// bypassing the level gate.
    pub fn stack_trace(&self, ctx: Option<&Context>) {
        let ctx = context::deepen(ctx);
        let prefix = self.prefix();
        self.raw_stack_trace(Some(&ctx), &prefix);
    }

    pub fn raw_stack_trace(&self, ctx: Option<&Context>, prefix: &str) {
        let (sink, mut padding) = {
            let config = self.config.read();
            let padding = if config.time_format.is_empty() {
                String::new()
            } else {
                let stamp = config.time_zone.format(Utc::now(), &config.time_format);
                format!("{stamp} ")
            };
            (Arc::clone(&config.sink), padding)
        };
        let mut skip = context::depth_of(ctx);
        let mut first = true;
        loop {
            let Some(record) = SourceRecord::capture(skip) else {
                return;
            };
            skip += 1;
            let line = format!(
                "{padding}{prefix} {}::{}()\n",
                record.package, record.qualified_function
            );
            let _ = sink.write(line.as_bytes());
            if first {
                padding = " ".repeat(padding.len());
                first = false;
            }
            let line = format!(
                "{padding}{prefix}     {}:{}\n",
                record.full_path, record.line
            );
            let _ = sink.write(line.as_bytes());
        }
    }

    /// Install this instance as the process-wide default.
    pub fn make_default(self) -> Arc<Logger> {
        crate::core::default_logger::install(self)
    }
}

impl Clone for Logger {
    /// Shares the sink and the emission worker; copies the configuration,
    /// including an independent level-color map, so mutating the clone's
    /// colors never affects the original.
    fn clone(&self) -> Logger {
        Logger {
            emitter: Arc::clone(&self.emitter),
            config: RwLock::new(self.config.read().clone()),
        }
    }
}

/// Routes each buffer through the logger as one synchronous LOG-level line.
/// Reports the input length as consumed; the composed line is longer.
impl io::Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let message = String::from_utf8_lossy(buf);
        let ctx = Context::new().with_depth(1);
        self.emit(Some(&ctx), Level::Log, &message)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self).map_err(io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn quiet_logger(level: Level) -> (Arc<MemorySink>, Logger) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(sink.clone(), level);
        logger.set_time_format("");
        logger.set_source_format("");
        (sink, logger)
    }

    #[test]
    fn test_default_configuration() {
        let (_, logger) = quiet_logger(Level::Info);
        assert_eq!(logger.level(), Level::Info);
        assert_eq!(logger.prefix(), "");
        assert!(!logger.colorize());
        assert_eq!(
            logger.level_color(Level::Info).unwrap().foreground(),
            &Color::BLUE
        );
        assert_eq!(
            logger.level_color(Level::Critical).unwrap().style(),
            Style::BOLD | Style::BLINK
        );
        assert!(logger.level_color(Level::Log).is_none());
        assert!(logger.time_color().is_none());
    }

    #[test]
    fn test_compose_field_order() {
        let (sink, logger) = quiet_logger(Level::Debug);
        logger.set_prefix("svc");
        let n = logger
            .emit_with_source(Level::Info, None, Some("t1 t2 00.000001s"), "  hello  ")
            .unwrap();
        let line = sink.contents_string();
        assert_eq!(line, "INFO     svc t1 t2 00.000001s hello\n");
        assert_eq!(n, line.len());
    }

    #[test]
    fn test_emit_below_threshold_writes_nothing() {
        let (sink, logger) = quiet_logger(Level::Error);
        let n = logger.emit(None, Level::Warning, "nope").unwrap();
        assert_eq!(n, 0);
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn test_admission_matrix_at_warning() {
        let (sink, logger) = quiet_logger(Level::Warning);
        for level in [Level::None, Level::Trace, Level::Log, Level::Debug, Level::Info] {
            assert_eq!(logger.emit(None, level, "suppressed").unwrap(), 0);
        }
        assert!(sink.contents().is_empty());
        for level in [Level::Warning, Level::Error, Level::Critical] {
            assert!(logger.emit(None, level, "emitted").unwrap() > 0);
        }
        assert_eq!(sink.contents_string().lines().count(), 3);
    }

    #[test]
    fn test_ignored_threshold_emits_nothing() {
        let (sink, logger) = quiet_logger(Level::Ignored);
        for level in Level::ALL.iter().skip(1) {
            assert_eq!(logger.emit(None, *level, "x").unwrap(), 0);
        }
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let (_, logger) = quiet_logger(Level::Debug);
        let derived = logger.clone();
        derived.set_level(Level::Info);
        assert_eq!(logger.level(), Level::Debug);
        assert_eq!(derived.level(), Level::Info);

        let derived = logger
            .with_level_color(Level::Error, Color::HOT_PINK, Color::DEFAULT, Style::empty())
            .unwrap();
        assert_eq!(
            derived.level_color(Level::Error).unwrap().foreground(),
            &Color::HOT_PINK
        );
        assert_eq!(
            logger.level_color(Level::Error).unwrap().foreground(),
            &Color::RED
        );
    }

    #[test]
    fn test_rejected_color_leaves_override_unset(){
        let (_, logger) = quiet_logger(Level::Debug);
        let err = logger
            .set_time_color(Color::from("fuschia"), Color::DEFAULT, Style::empty())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown foreground color 'fuschia'");
        assert!(logger.time_color().is_none());

        let err = logger
            .set_message_color(Color::DEFAULT, Color::from("rainbow"), Style::empty())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown background color 'rainbow'");
        assert!(logger.message_color().is_none());
    }

    #[test]
    fn test_message_is_trimmed() {
        let (sink, logger) = quiet_logger(Level::Debug);
        logger.emit(None, Level::Debug, "\t padded \n").unwrap();
        assert_eq!(sink.contents_string(), "DEBUG    padded\n");
    }

    #[test]
    fn test_none_level_renders_blank() {
        let (sink, logger) = quiet_logger(Level::None);
        logger.set_prefix("unittest");
        logger.emit(None, Level::None, "abcd").unwrap();
        assert_eq!(sink.contents_string(), "         unittest abcd\n");
    }

    #[test]
    fn test_colorized_fields_inherit_level_color() {
        let (sink, logger) = quiet_logger(Level::Debug);
        logger.set_colorize(true);
        logger.set_prefix("svc");
        logger
            .set_level_color(Level::Debug, Color::BLUE, Color::BLACK, Style::ITALIC)
            .unwrap();
        logger.emit(None, Level::Debug, "abcd").unwrap();
        let line = sink.contents_string();
        // prefix and message both fall back to the level color
        assert_eq!(
            line,
            "\x1b[34;40;3mDEBUG   \x1b[0m \x1b[34;40;3msvc\x1b[0m \x1b[34;40;3mabcd\x1b[0m\n"
        );
    }

    #[test]
    fn test_colorize_disabled_ignores_overrides() {
        let (sink, logger) = quiet_logger(Level::Debug);
        logger
            .set_message_color(Color::GREEN, Color::DEFAULT, Style::empty())
            .unwrap();
        logger.emit(None, Level::Debug, "plain").unwrap();
        assert_eq!(sink.contents_string(), "DEBUG    plain\n");
    }

    #[test]
    fn test_io_write_adapter() {
        use std::io::Write;
        let (sink, mut logger) = quiet_logger(Level::Log);
        let n = logger.write(b"when in the course of human events\n").unwrap();
        assert_eq!(n, 35);
        assert_eq!(
            sink.contents_string(),
            "LOG      when in the course of human events\n"
        );
    }
}
