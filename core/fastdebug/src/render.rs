//! Text layout of an inspection report.
//!
//! Scalars take a single line. Collections take a header line followed by one
//! row per element, drawn as a small tree:
//!
//! ```text
//! fd |  Vec  |  3  | numbers
//!  ╟ |  i32  |  0  | 1
//!  ╟ |  i32  |  1  | 2
//!  ╚ |  i32  |  2  | 3
//! ```
//!
//! Elements are classified but never expanded: a nested collection is printed
//! inline on its row.

use crate::{
    config::Config,
    error::{InspectError, InspectResult},
    resolver::ResolvedArgument,
    value::{Category, Value},
};
use colored::{Color, Colorize};
use std::fmt::{self, Display, Write};

/// Leading column of every top-level line.
pub const PREFIX: &str = "fd";

/// Width of the type column.
pub const TYPE_WIDTH: usize = 5;

/// Width of the index and length columns.
pub const INDEX_WIDTH: usize = 3;

/// Connector of every collection row except the last.
pub const TEE: &str = " ╟";

/// Connector of the last collection row.
pub const CORNER: &str = " ╚";

/// Terminal colour assigned to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    /// `true`.
    Green,
    /// `false`.
    Red,
    /// Numbers.
    Blue,
    /// Nested collections (xterm colour 230).
    Cornsilk,
}

impl Tint {
    /// The tint of `value`, if it has one. Text is never tinted.
    #[must_use]
    pub const fn for_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(true) => Some(Self::Green),
            Value::Bool(false) => Some(Self::Red),
            Value::Number { .. } => Some(Self::Blue),
            Value::Sequence { .. } | Value::Mapping { .. } => Some(Self::Cornsilk),
            Value::Text { .. } | Value::Unsupported { .. } => None,
        }
    }

    const fn color(self) -> Color {
        match self {
            Self::Green => Color::Green,
            Self::Red => Color::Red,
            Self::Blue => Color::Blue,
            Self::Cornsilk => Color::TrueColor {
                r: 255,
                g: 255,
                b: 215,
            },
        }
    }
}

/// Centres `value` in a field of `width` characters. Longer values are left
/// as they are.
///
/// When the padding is odd and `width` is odd too, the extra space goes on the
/// left (`" bool"`, `"  u8 "`); with an even `width` it goes on the right.
pub fn center(value: impl Display, width: usize) -> String {
    let text = value.to_string();
    let pad = width.saturating_sub(text.chars().count());
    let left = pad / 2 + (pad & width & 1);
    format!("{:left$}{text}{:right$}", "", "", right = pad - left)
}

/// Wraps `text` in the escape codes of `tint`.
#[must_use]
pub fn paint(text: &str, tint: Option<Tint>, enabled: bool) -> String {
    match tint {
        Some(tint) if enabled => text.color(tint.color()).to_string(),
        _ => text.to_string(),
    }
}

/// The connector drawn in front of row `index` of a collection of `len`.
#[must_use]
pub const fn connector(index: usize, len: usize) -> &'static str {
    if index + 1 == len { CORNER } else { TEE }
}

/// The type label and value of one value, padded and tinted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedVariable {
    /// Centred, tinted type label.
    pub type_label: String,
    /// Tinted inline value.
    pub value: String,
}

impl RenderedVariable {
    /// Renders `value` with its type label centred in `width`.
    ///
    /// # Errors
    ///
    /// Fails with [`InspectError::UnsupportedType`] when `value`, or anything
    /// nested in it, is unsupported.
    pub fn new(value: &Value, width: usize, color: bool) -> InspectResult<Self> {
        supported(value)?;
        let tint = Tint::for_value(value);
        Ok(Self {
            type_label: paint(&center(value.type_label(), width), tint, color),
            value: paint(&value.to_string(), tint, color),
        })
    }
}

fn supported(value: &Value) -> InspectResult<()> {
    match value.find_unsupported() {
        Some(type_name) => Err(InspectError::UnsupportedType { type_name }),
        None => Ok(()),
    }
}

/// Lays out resolved arguments as report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    nl: bool,
    color: bool,
}

impl Renderer {
    /// Creates a renderer honouring the `nl` and `color` flags of `config`.
    #[must_use]
    pub const fn new(config: &Config) -> Self {
        Self {
            nl: config.nl,
            color: config.color,
        }
    }

    /// Appends the lines of `argument` to `out`.
    ///
    /// # Errors
    ///
    /// Fails when the argument, or one of its elements, is unsupported.
    pub fn render(&self, argument: &ResolvedArgument, out: &mut String) -> InspectResult<()> {
        let ResolvedArgument { source, value } = argument;
        supported(value)?;
        match value {
            Value::Sequence { items, .. } => {
                self.header(out, value, source)?;
                for (index, item) in items.iter().enumerate() {
                    let row = RenderedVariable::new(item, TYPE_WIDTH, self.color)?;
                    self.line(
                        out,
                        format_args!(
                            "{} | {} | {} | {}",
                            connector(index, items.len()),
                            row.type_label,
                            center(index, INDEX_WIDTH),
                            row.value
                        ),
                    )?;
                }
            }
            Value::Mapping { entries, .. } => {
                self.header(out, value, source)?;
                for (index, (key, item)) in entries.iter().enumerate() {
                    let row = RenderedVariable::new(item, TYPE_WIDTH, self.color)?;
                    self.line(
                        out,
                        format_args!(
                            "{} | {} | {} | {}: {}",
                            connector(index, entries.len()),
                            row.type_label,
                            center(index, INDEX_WIDTH),
                            key.plain(),
                            row.value
                        ),
                    )?;
                }
            }
            _ => {
                let rendered = RenderedVariable::new(value, TYPE_WIDTH, self.color)?;
                self.line(
                    out,
                    format_args!(
                        "{PREFIX} | {} | {source}: {}",
                        rendered.type_label, rendered.value
                    ),
                )?;
            }
        }
        Ok(())
    }

    /// Appends a line that belongs to no argument, such as the timestamp.
    pub(crate) fn note(&self, out: &mut String, text: impl Display) -> fmt::Result {
        self.line(out, format_args!("{PREFIX} | {text}"))
    }

    fn header(&self, out: &mut String, value: &Value, source: &str) -> fmt::Result {
        debug_assert!(matches!(value.category(), Category::Ordered | Category::Keyed));
        self.line(
            out,
            format_args!(
                "{PREFIX} | {} | {} | {source}",
                center(value.type_label(), TYPE_WIDTH),
                center(value.len().unwrap_or_default(), INDEX_WIDTH)
            ),
        )
    }

    fn line(&self, out: &mut String, line: fmt::Arguments<'_>) -> fmt::Result {
        out.write_fmt(line)?;
        out.push('\n');
        if self.nl {
            out.push('\n');
        }
        Ok(())
    }
}
