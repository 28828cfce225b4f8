//! Core logging engine

pub mod color;
pub mod context;
pub mod default_logger;
pub(crate) mod emitter;
pub mod error;
pub mod level;
pub mod logger;
pub mod sink;
pub mod source;
pub mod trace;

pub use color::{Color, ColorSpec, Style};
pub use context::{deepen, logger_from, Context, DEFAULT_TRACE_ID};
pub use default_logger::{default_logger, set_default, set_exit_hook};
pub use error::{LogError, Result};
pub use level::Level;
pub use logger::{Logger, TimeZone, DEFAULT_SOURCE_FORMAT, DEFAULT_TIME_FORMAT};
pub use sink::Sink;
pub use source::{SourceFormat, SourceRecord};
