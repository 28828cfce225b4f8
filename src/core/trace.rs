//! Trace spans correlating nested instrumented calls
//!
//! A span generates a child identifier, runs the instrumented function with
//! a child carrier (depth reset, child id installed), and emits one
//! synchronous TRACE line annotated with the parent id, the child id, and
//! the wall-clock duration. The function's result is returned unmodified;
//! tracing never prevents the traced function from running.

use crate::core::context::{self, Context, DEFAULT_TRACE_ID};
use crate::core::level::Level;
use crate::core::logger::{concat_args, join_args, Logger};
use crate::core::source::SourceRecord;
use rand::Rng;
use std::fmt;
use std::time::Instant;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Unpadded RFC 4648 base-32; 8 input bytes yield 13 characters.
fn base32_nopad(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &byte in bytes {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// A fresh span identifier; the sentinel when the random source fails.
fn generate_id() -> String {
    let mut bytes = [0u8; 8];
    if rand::thread_rng().try_fill(&mut bytes).is_err() {
        return DEFAULT_TRACE_ID.to_string();
    }
    base32_nopad(&bytes)
}

impl Logger {
    /// Run `f` as a trace span. The child carrier has its depth reset to
    /// zero and the new identifier installed; the emitted annotation is
    /// `"<parent> <child> <seconds %09.6f>s"`. Returns `f`'s result
    /// unmodified.
    pub fn trace_call<T, E, F>(
        &self,
        ctx: Option<&Context>,
        message: &str,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&Context) -> Result<T, E>,
    {
        let parent = match ctx {
            Some(ctx) => ctx.trace_id().to_string(),
            None => DEFAULT_TRACE_ID.to_string(),
        };
        let child = generate_id();
        let child_ctx = ctx
            .cloned()
            .unwrap_or_default()
            .with_trace_id(child.clone())
            .with_depth(0);
        let start = Instant::now();
        let result = f(&child_ctx);
        let elapsed = start.elapsed().as_secs_f64();
        let annotation = format!("{parent} {child} {elapsed:09.6}s");
        let record = SourceRecord::capture(context::depth_of(ctx) + 1);
        let _ = self.emit_with_source(Level::Trace, record.as_ref(), Some(&annotation), message);
        result
    }

    pub fn trace<T, E, F>(
        &self,
        ctx: Option<&Context>,
        args: &[&dyn fmt::Display],
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&Context) -> Result<T, E>,
    {
        let ctx = context::deepen(ctx);
        self.trace_call(Some(&ctx), &concat_args(args), f)
    }

    pub fn traceln<T, E, F>(
        &self,
        ctx: Option<&Context>,
        args: &[&dyn fmt::Display],
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&Context) -> Result<T, E>,
    {
        let ctx = context::deepen(ctx);
        self.trace_call(Some(&ctx), &join_args(args), f)
    }

    pub fn tracef<T, E, F>(
        &self,
        ctx: Option<&Context>,
        args: fmt::Arguments<'_>,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&Context) -> Result<T, E>,
    {
        let ctx = context::deepen(ctx);
        self.trace_call(Some(&ctx), &args.to_string(), f)
    }
}
