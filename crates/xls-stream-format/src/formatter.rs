//! The formatting collaborator seen by the conversion engine.

use xls_stream_core::NumberFormat;

use crate::date::{format_datetime, serial_to_datetime};
use crate::locale::Locale;
use crate::number::{format_general, format_with_code};

/// Settings passed through to the formatter with every value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatContext {
    pub locale: Locale,
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date_1904: bool,
}

impl FormatContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            date_1904: false,
        }
    }
}

/// Renders a raw numeric cell value as display text.
///
/// Closures with the same signature are formatters too, which keeps test
/// doubles short.
pub trait CellFormatter {
    fn format_number(&self, value: f64, format: &NumberFormat, ctx: &FormatContext) -> String;
}

impl<F> CellFormatter for F
where
    F: Fn(f64, &NumberFormat, &FormatContext) -> String,
{
    fn format_number(&self, value: f64, format: &NumberFormat, ctx: &FormatContext) -> String {
        self(value, format, ctx)
    }
}

/// Default formatter for General, numeric, percent, scientific and
/// date/time format codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataFormatter;

impl CellFormatter for DataFormatter {
    fn format_number(&self, value: f64, format: &NumberFormat, ctx: &FormatContext) -> String {
        if format.is_date_format() {
            return match serial_to_datetime(value, ctx.date_1904) {
                Some(datetime) => format_datetime(datetime, format.format_string(), &ctx.locale),
                None => format_general(value, &ctx.locale),
            };
        }

        match format.format_string() {
            "General" | "@" => format_general(value, &ctx.locale),
            code => format_with_code(value, code, &ctx.locale),
        }
    }
}
