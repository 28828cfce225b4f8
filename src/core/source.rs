//! Caller attribution: stack capture and source-location formatting
//!
//! A [`SourceRecord`] is the decomposed identity of one stack frame. A
//! [`SourceFormat`] is a template compiled once into literal and field
//! segments; unrecognized placeholder names compile to literal segments so
//! a typo surfaces in the rendered output instead of failing compilation.

use regex::Regex;
use std::sync::OnceLock;

/// One captured stack frame, decomposed into its location fields.
///
/// Constructed fresh for every admitted emission; never cached, since every
/// call site differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub pc: usize,
    pub full_path: String,
    pub file_name: String,
    pub base_path: String,
    pub line: u32,
    pub package: String,
    pub qualified_function: String,
    pub function: String,
    pub receiver: String,
}

impl SourceRecord {
    /// Capture the frame `skip` levels above this function's caller
    /// (`skip == 0` is the immediate caller). Returns `None` when the stack
    /// is exhausted.
    ///
    /// The walk anchors on this function's own symbol instead of assuming a
    /// fixed number of unwinder-internal frames, so the skip count starts
    /// exactly at the caller.
    #[inline(never)]
    pub fn capture(skip: usize) -> Option<SourceRecord> {
        let trace = backtrace::Backtrace::new();
        let mut symbols = Vec::new();
        for frame in trace.frames() {
            for symbol in frame.symbols() {
                symbols.push(symbol);
            }
        }
        let anchor = symbols.iter().position(|symbol| {
            symbol.name().is_some_and(|name| {
                let name = name.to_string();
                name.contains("SourceRecord") && name.contains("capture")
            })
        })?;
        let symbol = symbols.get(anchor + 1 + skip).copied()?;
        Some(SourceRecord::from_symbol(symbol))
    }

    fn from_symbol(symbol: &backtrace::BacktraceSymbol) -> SourceRecord {
        let raw_name = symbol.name().map(|n| n.to_string()).unwrap_or_default();
        let (package, qualified_function, function, receiver) =
            split_symbol(strip_hash(&raw_name));
        let full_path = symbol
            .filename()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let file_name = symbol
            .filename()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_path = if package.is_empty() {
            file_name.clone()
        } else {
            format!("{}/{}", package.replace("::", "/"), file_name)
        };
        SourceRecord {
            pc: symbol.addr().map(|a| a as usize).unwrap_or(0),
            full_path,
            file_name,
            base_path,
            line: symbol.lineno().unwrap_or(0),
            package,
            qualified_function,
            function,
            receiver,
        }
    }
}

/// Drop the trailing `::h<16 hex digits>` disambiguator from a demangled
/// symbol name.
fn strip_hash(name: &str) -> &str {
    if let Some(idx) = name.rfind("::h") {
        let hash = &name[idx + 3..];
        if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..idx];
        }
    }
    name
}

/// Index of the `>` matching an already-consumed `<`, honoring nesting.
fn matching_angle(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, ch) in s.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decompose a demangled symbol name into
/// (package, qualified function, function, receiver).
///
/// `crate::module::func` has no receiver; an upper-case-initial penultimate
/// segment (`crate::module::Type::method`) is treated as the receiver; a
/// `<Type as Trait>::method` symbol resolves the receiver from the concrete
/// type. Trailing `{{closure}}` segments attribute to the enclosing
/// function.
fn split_symbol(name: &str) -> (String, String, String, String) {
    if name.is_empty() {
        return (String::new(), String::new(), String::new(), String::new());
    }
    if let Some(rest) = name.strip_prefix('<') {
        if let Some(close) = matching_angle(rest) {
            let inner = &rest[..close];
            let method_path = rest[close + 1..].trim_start_matches(':');
            let type_path = inner.split(" as ").next().unwrap_or(inner);
            let mut segments: Vec<&str> = type_path.split("::").collect();
            let receiver = segments.pop().unwrap_or("").to_string();
            let package = segments.join("::");
            let function = method_path
                .rsplit("::")
                .next()
                .unwrap_or(method_path)
                .to_string();
            let qualified = if receiver.is_empty() {
                function.clone()
            } else {
                format!("{receiver}::{function}")
            };
            return (package, qualified, function, receiver);
        }
    }
    let mut segments: Vec<&str> = name.split("::").collect();
    while segments.last() == Some(&"{{closure}}") {
        segments.pop();
    }
    let function = segments.pop().unwrap_or("").to_string();
    let receiver = match segments.last() {
        Some(seg) if seg.chars().next().is_some_and(|c| c.is_ascii_uppercase()) => {
            segments.pop().unwrap_or("").to_string()
        }
        _ => String::new(),
    };
    let package = segments.join("::");
    let qualified = if receiver.is_empty() {
        function.clone()
    } else {
        format!("{receiver}::{function}")
    };
    (package, qualified, function, receiver)
}

/// Recognized placeholder fields, each always supplied at render time
/// whether or not the template references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pc,
    FullPath,
    FileName,
    BasePath,
    Line,
    Package,
    Receiver,
    Function,
}

impl Field {
    fn from_name(name: &str) -> Option<Field> {
        match name {
            "pc" => Some(Field::Pc),
            "fullpath" => Some(Field::FullPath),
            "filename" => Some(Field::FileName),
            "basepath" => Some(Field::BasePath),
            "linenumber" => Some(Field::Line),
            "package" => Some(Field::Package),
            "receiver" => Some(Field::Receiver),
            "function" => Some(Field::Function),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Verb {
    #[default]
    Text,
    Decimal,
    Hex,
    HexUpper,
    Octal,
    Binary,
}

/// Runtime rendering directive parsed from a placeholder modifier. The last
/// modifier character is the verb; the rest are flags (`-` left-align, `0`
/// zero-pad) and a width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FormatSpec {
    left_align: bool,
    zero_pad: bool,
    width: Option<usize>,
    verb: Verb,
}

impl FormatSpec {
    fn parse(modifier: &str) -> FormatSpec {
        let mut chars: Vec<char> = modifier.chars().collect();
        let verb = match chars.pop() {
            Some('d') => Verb::Decimal,
            Some('x') => Verb::Hex,
            Some('X') => Verb::HexUpper,
            Some('o') => Verb::Octal,
            Some('b') => Verb::Binary,
            _ => Verb::Text,
        };
        let mut spec = FormatSpec {
            verb,
            ..FormatSpec::default()
        };
        let mut width: Option<usize> = None;
        for ch in chars {
            match ch {
                '-' => spec.left_align = true,
                '0' if width.is_none() => spec.zero_pad = true,
                d if d.is_ascii_digit() => {
                    width = Some(width.unwrap_or(0) * 10 + d.to_digit(10).unwrap_or(0) as usize);
                }
                _ => {}
            }
        }
        spec.width = width;
        spec
    }

    fn default_for(field: Field) -> FormatSpec {
        let verb = match field {
            Field::Line => Verb::Decimal,
            _ => Verb::Text,
        };
        FormatSpec {
            verb,
            ..FormatSpec::default()
        }
    }

    fn format_number(&self, value: u64) -> String {
        let digits = match self.verb {
            Verb::Hex => format!("{value:x}"),
            Verb::HexUpper => format!("{value:X}"),
            Verb::Octal => format!("{value:o}"),
            Verb::Binary => format!("{value:b}"),
            Verb::Decimal | Verb::Text => value.to_string(),
        };
        self.pad(digits)
    }

    fn format_text(&self, value: &str) -> String {
        self.pad(value.to_string())
    }

    fn pad(&self, rendered: String) -> String {
        let Some(width) = self.width else {
            return rendered;
        };
        if rendered.len() >= width {
            return rendered;
        }
        let fill = width - rendered.len();
        if self.left_align {
            format!("{}{}", rendered, " ".repeat(fill))
        } else if self.zero_pad {
            format!("{}{}", "0".repeat(fill), rendered)
        } else {
            format!("{}{}", " ".repeat(fill), rendered)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { field: Field, spec: FormatSpec },
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"%\{([a-z]+)(?::([^}]*))?\}").expect("placeholder pattern is valid")
    })
}

/// A source-location template compiled into positional rendering directives
/// plus literal pass-through segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFormat {
    layout: String,
    segments: Vec<Segment>,
}

impl SourceFormat {
    /// Compilation never fails: unrecognized placeholder names become
    /// literal segments holding the original token text.
    pub fn compile(layout: &str) -> SourceFormat {
        let mut segments = Vec::new();
        let mut prev = 0;
        for caps in token_pattern().captures_iter(layout) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > prev {
                segments.push(Segment::Literal(layout[prev..whole.start()].to_string()));
            }
            prev = whole.end();
            let name = &caps[1];
            match Field::from_name(name) {
                Some(field) => {
                    let spec = match caps.get(2) {
                        Some(modifier) => FormatSpec::parse(modifier.as_str()),
                        None => FormatSpec::default_for(field),
                    };
                    segments.push(Segment::Field { field, spec });
                }
                None => segments.push(Segment::Literal(whole.as_str().to_string())),
            }
        }
        if prev < layout.len() {
            segments.push(Segment::Literal(layout[prev..].to_string()));
        }
        SourceFormat {
            layout: layout.to_string(),
            segments,
        }
    }

    /// The template text this format was compiled from.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Substitute all fields of `record` in one pass.
    pub fn format_record(&self, record: &SourceRecord) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { field, spec } => {
                    let rendered = match field {
                        Field::Pc => spec.format_number(record.pc as u64),
                        Field::Line => spec.format_number(record.line as u64),
                        Field::FullPath => spec.format_text(&record.full_path),
                        Field::FileName => spec.format_text(&record.file_name),
                        Field::BasePath => spec.format_text(&record.base_path),
                        Field::Package => spec.format_text(&record.package),
                        Field::Receiver => spec.format_text(&record.receiver),
                        Field::Function => spec.format_text(&record.function),
                    };
                    out.push_str(&rendered);
                }
            }
        }
        out
    }

    /// Capture the frame `skip` levels above this function's caller and
    /// render it; the empty string when the stack is exhausted.
    pub fn render(&self, skip: usize) -> String {
        match SourceRecord::capture(skip + 1) {
            Some(record) => self.format_record(&record),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> SourceRecord {
        SourceRecord {
            pc: 0x2a,
            full_path: "/work/app/src/server.rs".to_string(),
            file_name: "server.rs".to_string(),
            base_path: "app/server/server.rs".to_string(),
            line: 42,
            package: "app::server".to_string(),
            qualified_function: "Handler::accept".to_string(),
            function: "accept".to_string(),
            receiver: "Handler".to_string(),
        }
    }

    #[test]
    fn test_plain_fields() {
        let format = SourceFormat::compile("%{filename}:%{linenumber}:");
        assert_eq!(format.format_record(&sample_record()), "server.rs:42:");
    }

    #[test]
    fn test_all_fields() {
        let format = SourceFormat::compile(
            "%{package} %{receiver}.%{function} (%{qualifiedfunction:}) %{fullpath}:%{linenumber}",
        );
        // qualifiedfunction is not a recognized name and passes through
        assert_eq!(
            format.format_record(&sample_record()),
            "app::server Handler.accept (%{qualifiedfunction:}) /work/app/src/server.rs:42"
        );
    }

    #[test]
    fn test_modifiers() {
        let format = SourceFormat::compile("%{linenumber:05x}");
        assert_eq!(format.format_record(&sample_record()), "0002a");

        let format = SourceFormat::compile("%{linenumber:5d}");
        assert_eq!(format.format_record(&sample_record()), "   42");

        let format = SourceFormat::compile("%{function:-10s}|");
        assert_eq!(format.format_record(&sample_record()), "accept    |");

        let format = SourceFormat::compile("%{pc:x}");
        assert_eq!(format.format_record(&sample_record()), "2a");
    }

    #[test]
    fn test_unknown_placeholder_passes_through() {
        let format = SourceFormat::compile("%{filename}:%{foo:x}");
        assert_eq!(format.format_record(&sample_record()), "server.rs:%{foo:x}");
    }

    #[test]
    fn test_literal_tails_and_heads() {
        let format = SourceFormat::compile("at %{basepath} line %{linenumber} end");
        assert_eq!(
            format.format_record(&sample_record()),
            "at app/server/server.rs line 42 end"
        );
    }

    #[test]
    fn test_compiled_equality() {
        assert_eq!(
            SourceFormat::compile("%{filename}:%{linenumber}:"),
            SourceFormat::compile("%{filename}:%{linenumber}:")
        );
        assert_ne!(
            SourceFormat::compile("%{filename}"),
            SourceFormat::compile("%{fullpath}")
        );
    }

    #[test]
    fn test_strip_hash() {
        assert_eq!(
            strip_hash("app::server::accept::h0123456789abcdef"),
            "app::server::accept"
        );
        assert_eq!(strip_hash("app::server::accept"), "app::server::accept");
        assert_eq!(strip_hash("app::hello"), "app::hello");
    }

    #[test]
    fn test_split_symbol_plain() {
        let (package, qualified, function, receiver) = split_symbol("app::server::accept");
        assert_eq!(package, "app::server");
        assert_eq!(qualified, "accept");
        assert_eq!(function, "accept");
        assert_eq!(receiver, "");
    }

    #[test]
    fn test_split_symbol_method() {
        let (package, qualified, function, receiver) = split_symbol("app::server::Handler::accept");
        assert_eq!(package, "app::server");
        assert_eq!(qualified, "Handler::accept");
        assert_eq!(function, "accept");
        assert_eq!(receiver, "Handler");
    }

    #[test]
    fn test_split_symbol_trait_impl() {
        let (package, qualified, function, receiver) =
            split_symbol("<app::server::Handler as std::io::Write>::write");
        assert_eq!(package, "app::server");
        assert_eq!(qualified, "Handler::write");
        assert_eq!(function, "write");
        assert_eq!(receiver, "Handler");
    }

    #[test]
    fn test_split_symbol_closure() {
        let (package, qualified, function, receiver) =
            split_symbol("app::server::accept::{{closure}}");
        assert_eq!(package, "app::server");
        assert_eq!(qualified, "accept");
        assert_eq!(function, "accept");
        assert_eq!(receiver, "");
    }

    #[test]
    fn test_capture_resolves_caller() {
        let record = SourceRecord::capture(0).expect("stack is not exhausted here");
        assert_eq!(record.file_name, "source.rs");
        assert!(record.line > 0);
        assert!(record.full_path.ends_with("source.rs"));
    }

    #[test]
    fn test_capture_exhausted_stack() {
        assert!(SourceRecord::capture(10_000).is_none());
    }

    #[test]
    fn test_render_uses_live_frame() {
        let format = SourceFormat::compile("%{filename}:%{linenumber}:");
        let rendered = format.render(0);
        assert!(rendered.starts_with("source.rs:"), "got {rendered:?}");
    }
}
