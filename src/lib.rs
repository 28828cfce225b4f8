//! # sitelog
//!
//! A leveled logging library that attaches caller-location, timestamp,
//! prefix, and level metadata to every line, colorizes each field
//! independently, and splits emission between a fire-and-forget detached
//! path and a fully synchronous path for fatal and panic exits.
//!
//! ## Features
//!
//! - **Caller attribution**: source records are captured by walking the
//!   stack at a carrier-tracked depth, so convenience wrappers never show
//!   up as the call site
//! - **Source templates**: `%{filename}:%{linenumber}:`-style formats are
//!   compiled once; unknown placeholders pass through literally
//! - **Per-field color**: every field carries its own color override and
//!   inherits the level color otherwise
//! - **Detached emission**: non-fatal calls hand composed lines to a
//!   bounded queue and never block on the sink

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        deepen, logger_from, Color, ColorSpec, Context, Level, LogError, Logger, Result, Sink,
        SourceFormat, SourceRecord, Style, TimeZone, DEFAULT_TRACE_ID,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    deepen, default_logger, logger_from, set_default, set_exit_hook, Color, ColorSpec, Context,
    Level, LogError, Logger, Result, Sink, SourceFormat, SourceRecord, Style, TimeZone,
    DEFAULT_SOURCE_FORMAT, DEFAULT_TIME_FORMAT, DEFAULT_TRACE_ID,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};

pub use crate::core::default_logger::{
    debug, debugf, debugln, error, errorf, errorln, fatal, fatalf, fatalln, flush, info, infof,
    infoln, log, logf, logln, panic, panicf, panicln, prefix, print, printf, println, set_colorize,
    set_level, set_level_color, set_message_color, set_prefix, set_prefix_color, set_sink,
    set_source_color, set_source_format, set_time_color, set_time_format, set_time_zone,
    stack_trace, warn, warnf, warnln,
};
