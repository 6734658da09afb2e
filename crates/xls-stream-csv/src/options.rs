//! Engine options

use xls_stream_format::{FormatContext, Locale};

/// How formula cells are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// The cached result, formatted like any other value
    #[default]
    Values,
    /// The formula text, e.g. `SUM(A1:A3)`
    Expression,
}

/// What to do with a shared string index past the end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorruptIndexPolicy {
    /// Emit a placeholder field and continue
    #[default]
    Substitute,
    /// Fail the run
    Abort,
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineTerminator {
    /// Unix-style (LF)
    #[default]
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}

impl LineTerminator {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineTerminator::LF => b"\n",
            LineTerminator::CRLF => b"\r\n",
            LineTerminator::CR => b"\r",
        }
    }
}

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    /// Pad every row to at least this many fields (≤ 0 disables padding)
    pub min_columns: i32,
    /// Formula rendering, fixed for the whole run
    pub render_mode: RenderMode,
    /// Handling of out-of-range shared string indices
    pub corrupt_index: CorruptIndexPolicy,
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Line terminator
    pub line_terminator: LineTerminator,
    /// Separators handed to the number formatter
    pub locale: Locale,
    /// Initial date system; a DATEMODE record overrides it
    pub date_1904: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_columns: -1,
            render_mode: RenderMode::Values,
            corrupt_index: CorruptIndexPolicy::Substitute,
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::LF,
            locale: Locale::default(),
            date_1904: false,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_columns(mut self, min_columns: i32) -> Self {
        self.min_columns = min_columns;
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_corrupt_index(mut self, policy: CorruptIndexPolicy) -> Self {
        self.corrupt_index = policy;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_line_terminator(mut self, line_terminator: LineTerminator) -> Self {
        self.line_terminator = line_terminator;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_date_1904(mut self, date_1904: bool) -> Self {
        self.date_1904 = date_1904;
        self
    }

    /// Formatting context at the start of a run
    pub fn format_context(&self) -> FormatContext {
        FormatContext {
            locale: self.locale,
            date_1904: self.date_1904,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.min_columns, -1);
        assert_eq!(options.render_mode, RenderMode::Values);
        assert_eq!(options.corrupt_index, CorruptIndexPolicy::Substitute);
        assert_eq!(options.line_terminator.as_bytes(), b"\n");
    }

    #[test]
    fn test_builder() {
        let options = EngineOptions::new()
            .with_min_columns(5)
            .with_render_mode(RenderMode::Expression)
            .with_delimiter(b';')
            .with_locale(Locale::de_de())
            .with_date_1904(true);
        assert_eq!(options.min_columns, 5);
        assert_eq!(options.delimiter, b';');
        let ctx = options.format_context();
        assert!(ctx.date_1904);
        assert_eq!(ctx.locale.decimal_sep, ',');
    }
}
