//! Process-wide default logger
//!
//! One shared [`Logger`], initially bound to standard error at the WARNING
//! threshold, reachable from call sites that do not thread a carrier. The
//! package-level functions mirror the instance surface; `set_default` (or
//! [`Logger::make_default`]) replaces the instance wholesale, after which
//! default-scoped calls observe the replacement.

use crate::core::color::{Color, ColorSpec, Style};
use crate::core::context::{self, Context};
use crate::core::error::Result;
use crate::core::level::Level;
use crate::core::logger::{Logger, TimeZone};
use crate::core::sink::Sink;
use crate::core::source::SourceFormat;
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn cell() -> &'static RwLock<Arc<Logger>> {
    DEFAULT.get_or_init(|| {
        RwLock::new(Arc::new(Logger::new(
            Arc::new(ConsoleSink::stderr()),
            Level::Warning,
        )))
    })
}

/// The current process-wide default logger.
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&cell().read())
}

/// Replace the process-wide default logger.
pub fn set_default(logger: Logger) -> Arc<Logger> {
    install(logger)
}

pub(crate) fn install(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    *cell().write() = Arc::clone(&logger);
    logger
}

// -- exit hook ------------------------------------------------------------

type ExitHook = Box<dyn Fn(i32) + Send + Sync>;

static EXIT_HOOK: OnceLock<RwLock<ExitHook>> = OnceLock::new();

fn exit_hook() -> &'static RwLock<ExitHook> {
    EXIT_HOOK.get_or_init(|| RwLock::new(Box::new(|code| std::process::exit(code))))
}

/// Replace the process-termination primitive used by the fatal entry
/// points. The default hook calls `std::process::exit`.
pub fn set_exit_hook<F>(hook: F)
where
    F: Fn(i32) + Send + Sync + 'static,
{
    *exit_hook().write() = Box::new(hook);
}

pub(crate) fn exit(code: i32) {
    let hook = exit_hook().read();
    (*hook)(code);
}

// -- configuration pass-throughs ------------------------------------------

pub fn set_sink(sink: Arc<dyn Sink>) {
    default_logger().set_sink(sink);
}

pub fn set_level(level: Level) {
    default_logger().set_level(level);
}

pub fn level() -> Level {
    default_logger().level()
}

pub fn set_level_color(
    level: Level,
    foreground: Color,
    background: Color,
    style: Style,
) -> Result<()> {
    default_logger().set_level_color(level, foreground, background, style)
}

pub fn level_color(level: Level) -> Option<ColorSpec> {
    default_logger().level_color(level)
}

pub fn set_colorize(enabled: bool) {
    default_logger().set_colorize(enabled);
}

pub fn set_time_format(layout: impl Into<String>) {
    default_logger().set_time_format(layout);
}

pub fn time_format() -> String {
    default_logger().time_format()
}

pub fn set_time_zone(zone: TimeZone) {
    default_logger().set_time_zone(zone);
}

pub fn time_zone() -> TimeZone {
    default_logger().time_zone()
}

pub fn set_time_color(foreground: Color, background: Color, style: Style) -> Result<()> {
    default_logger().set_time_color(foreground, background, style)
}

pub fn time_color() -> Option<ColorSpec> {
    default_logger().time_color()
}

pub fn set_source_format(layout: &str) {
    default_logger().set_source_format(layout);
}

pub fn source_format() -> Option<SourceFormat> {
    default_logger().source_format()
}

pub fn set_source_color(foreground: Color, background: Color, style: Style) -> Result<()> {
    default_logger().set_source_color(foreground, background, style)
}

pub fn source_color() -> Option<ColorSpec> {
    default_logger().source_color()
}

pub fn set_prefix(prefix: impl Into<String>) {
    default_logger().set_prefix(prefix);
}

pub fn prefix() -> String {
    default_logger().prefix()
}

pub fn set_prefix_color(foreground: Color, background: Color, style: Style) -> Result<()> {
    default_logger().set_prefix_color(foreground, background, style)
}

pub fn prefix_color() -> Option<ColorSpec> {
    default_logger().prefix_color()
}

pub fn set_message_color(foreground: Color, background: Color, style: Style) -> Result<()> {
    default_logger().set_message_color(foreground, background, style)
}

pub fn message_color() -> Option<ColorSpec> {
    default_logger().message_color()
}

/// Drain the default logger's detached emission queue.
pub fn flush() -> Result<()> {
    default_logger().flush()
}

// -- emission pass-throughs ------------------------------------------------
//
// Each wrapper derives a one-deeper carrier so source attribution still
// lands on the application call site.

pub fn log(ctx: Option<&Context>, level: Level, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().log(Some(&ctx), level, args);
}

pub fn logln(ctx: Option<&Context>, level: Level, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().logln(Some(&ctx), level, args);
}

pub fn logf(ctx: Option<&Context>, level: Level, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().logf(Some(&ctx), level, args);
}

pub fn print(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().print(Some(&ctx), args);
}

pub fn println(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().println(Some(&ctx), args);
}

pub fn printf(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().printf(Some(&ctx), args);
}

pub fn debug(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().debug(Some(&ctx), args);
}

pub fn debugln(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().debugln(Some(&ctx), args);
}

pub fn debugf(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().debugf(Some(&ctx), args);
}

pub fn info(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().info(Some(&ctx), args);
}

pub fn infoln(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().infoln(Some(&ctx), args);
}

pub fn infof(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().infof(Some(&ctx), args);
}

pub fn warn(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().warn(Some(&ctx), args);
}

pub fn warnln(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().warnln(Some(&ctx), args);
}

pub fn warnf(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().warnf(Some(&ctx), args);
}

pub fn error(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().error(Some(&ctx), args);
}

pub fn errorln(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().errorln(Some(&ctx), args);
}

pub fn errorf(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().errorf(Some(&ctx), args);
}

pub fn fatal(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().fatal(Some(&ctx), args);
}

pub fn fatalln(ctx: Option<&Context>, args: &[&dyn fmt::Display]) {
    let ctx = context::deepen(ctx);
    ctx.logger().fatalln(Some(&ctx), args);
}

pub fn fatalf(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    let ctx = context::deepen(ctx);
    ctx.logger().fatalf(Some(&ctx), args);
}

pub fn panic(ctx: Option<&Context>, args: &[&dyn fmt::Display]) -> ! {
    let ctx = context::deepen(ctx);
    ctx.logger().panic(Some(&ctx), args)
}

pub fn panicln(ctx: Option<&Context>, args: &[&dyn fmt::Display]) -> ! {
    let ctx = context::deepen(ctx);
    ctx.logger().panicln(Some(&ctx), args)
}

pub fn panicf(ctx: Option<&Context>, args: fmt::Arguments<'_>) -> ! {
    let ctx = context::deepen(ctx);
    ctx.logger().panicf(Some(&ctx), args)
}

/// Print the remaining call stack through the default logger.
pub fn stack_trace(ctx: Option<&Context>) {
    let ctx = context::deepen(ctx);
    let logger = ctx.logger();
    let prefix = logger.prefix();
    logger.raw_stack_trace(Some(&ctx), &prefix);
}
