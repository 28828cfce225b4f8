//! Terminal color and style escape composition

use crate::core::error::{LogError, Result};
use bitflags::bitflags;
use std::borrow::Cow;

/// A symbolic color name.
///
/// The named constants cover the registry; arbitrary names can still be
/// constructed (`Color::from("fuschia")`) and are rejected when a
/// [`ColorSpec`] is composed from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const DEFAULT: Color = Color(Cow::Borrowed("default"));
    pub const BLACK: Color = Color(Cow::Borrowed("black"));
    pub const RED: Color = Color(Cow::Borrowed("red"));
    pub const GREEN: Color = Color(Cow::Borrowed("green"));
    pub const YELLOW: Color = Color(Cow::Borrowed("yellow"));
    pub const BLUE: Color = Color(Cow::Borrowed("blue"));
    pub const MAGENTA: Color = Color(Cow::Borrowed("magenta"));
    pub const CYAN: Color = Color(Cow::Borrowed("cyan"));
    pub const WHITE: Color = Color(Cow::Borrowed("white"));
    pub const HOT_PINK: Color = Color(Cow::Borrowed("hot pink"));
    pub const ORANGE: Color = Color(Cow::Borrowed("orange"));
    pub const PURPLE: Color = Color(Cow::Borrowed("purple"));
    pub const TURQUOISE: Color = Color(Cow::Borrowed("turquoise"));
    pub const LIGHT_GRAY: Color = Color(Cow::Borrowed("light gray"));
    pub const DARK_GRAY: Color = Color(Cow::Borrowed("dark gray"));

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color(Cow::Owned(name.to_string()))
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color(Cow::Owned(name))
    }
}

/// Escape fragment for a registered color name. Extended entries use
/// 256-color `8;5;NNN` fragments; the caller prepends `3` (foreground) or
/// `4` (background).
fn color_fragment(name: &str) -> Option<&'static str> {
    match name {
        "default" => Some("9"),
        "black" => Some("0"),
        "red" => Some("1"),
        "green" => Some("2"),
        "yellow" => Some("3"),
        "blue" => Some("4"),
        "magenta" => Some("5"),
        "cyan" => Some("6"),
        "white" => Some("7"),
        "hot pink" => Some("8;5;199"),
        "orange" => Some("8;5;208"),
        "purple" => Some("8;5;91"),
        "turquoise" => Some("8;5;80"),
        "light gray" => Some("8;5;250"),
        "dark gray" => Some("8;5;240"),
        _ => None,
    }
}

bitflags! {
    /// Font style flags. The bit values are part of the public surface;
    /// bits outside the registry are carried but contribute no escape code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Style: u16 {
        const BOLD = 2;
        const LIGHT = 4;
        const ITALIC = 8;
        const UNDERLINE = 16;
        const BLINK = 32;
        const REVERSE = 128;
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::empty()
    }
}

fn style_fragment(bit: u16) -> Option<&'static str> {
    match bit {
        2 => Some("1"),
        4 => Some("2"),
        8 => Some("3"),
        16 => Some("4"),
        32 => Some("5"),
        128 => Some("7"),
        _ => None,
    }
}

/// A validated (foreground, background, style) triple with its precomputed
/// terminal escape sequence.
///
/// The all-default triple composes to an empty escape, making
/// [`ColorSpec::colorize`] a pass-through rather than a reset-to-default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSpec {
    foreground: Color,
    background: Color,
    style: Style,
    escape: String,
}

impl ColorSpec {
    pub fn new(foreground: Color, background: Color, style: Style) -> Result<ColorSpec> {
        let mut spec = ColorSpec {
            foreground: Color::DEFAULT,
            background: Color::DEFAULT,
            style: Style::empty(),
            escape: String::new(),
        };
        spec.update(foreground, background, style)?;
        Ok(spec)
    }

    pub fn foreground(&self) -> &Color {
        &self.foreground
    }

    pub fn background(&self) -> &Color {
        &self.background
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn escape(&self) -> &str {
        &self.escape
    }

    /// Replace the foreground, revalidating the whole triple. A failed
    /// update leaves the prior state untouched.
    pub fn set_foreground(&mut self, foreground: Color) -> Result<()> {
        self.update(foreground, self.background.clone(), self.style)
    }

    pub fn set_background(&mut self, background: Color) -> Result<()> {
        self.update(self.foreground.clone(), background, self.style)
    }

    pub fn set_style(&mut self, style: Style) -> Result<()> {
        self.update(self.foreground.clone(), self.background.clone(), style)
    }

    fn update(&mut self, foreground: Color, background: Color, style: Style) -> Result<()> {
        if foreground == Color::DEFAULT && background == Color::DEFAULT && style.is_empty() {
            self.foreground = foreground;
            self.background = background;
            self.style = style;
            self.escape = String::new();
            return Ok(());
        }
        let mut codes = Vec::new();
        match color_fragment(foreground.name()) {
            Some(fragment) => codes.push(format!("3{fragment}")),
            None => return Err(LogError::UnknownForeground(foreground.name().to_string())),
        }
        match color_fragment(background.name()) {
            Some(fragment) => codes.push(format!("4{fragment}")),
            None => return Err(LogError::UnknownBackground(background.name().to_string())),
        }
        let raw = style.bits();
        let mut bit: u16 = 1;
        while bit <= 1024 {
            if raw & bit != 0 {
                if let Some(fragment) = style_fragment(bit) {
                    codes.push(fragment.to_string());
                }
            }
            bit <<= 1;
        }
        self.foreground = foreground;
        self.background = background;
        self.style = style;
        self.escape = format!("\x1b[{}m", codes.join(";"));
        Ok(())
    }

    /// Wrap `text` in the escape and a reset; a no-op when the escape is
    /// empty.
    pub fn colorize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.escape.is_empty() {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(format!("{}{}\x1b[0m", self.escape, text))
        }
    }
}
