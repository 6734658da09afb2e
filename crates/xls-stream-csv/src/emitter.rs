//! CSV output.
//!
//! Separators are driven by the cursor's column rather than by a running
//! field count: a field gets a delimiter in front unless it sits in column
//! 0. Delimiters and row ends are written here; each field's bytes go
//! through a `csv-core` writer, one configured to always quote and one to
//! quote only when needed.

use std::io::{self, Write};

use csv_core::{QuoteStyle, Terminator, WriteResult, WriterBuilder};

use crate::options::{EngineOptions, LineTerminator};
use xls_stream_core::Sheet;

/// A resolved cell value, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Blank, boolean/error and missing cells
    Empty,
    /// Text: always quoted, embedded quotes doubled
    Quoted(String),
    /// Formatted numbers: quoted only when they contain the delimiter,
    /// the quote or a line break
    Plain(String),
}

impl Field {
    pub fn quoted<S: Into<String>>(text: S) -> Self {
        Field::Quoted(text.into())
    }

    pub fn plain<S: Into<String>>(text: S) -> Self {
        Field::Plain(text.into())
    }

    /// The unquoted text
    pub fn text(&self) -> &str {
        match self {
            Field::Empty => "",
            Field::Quoted(text) | Field::Plain(text) => text,
        }
    }
}

/// Writes fields, row ends and sheet headers to the output
pub struct CsvEmitter<W: Write> {
    writer: W,
    delimiter: u8,
    terminator: LineTerminator,
    /// Encoder for [`Field::Quoted`]
    always: WriterBuilder,
    /// Encoder for [`Field::Plain`]
    necessary: WriterBuilder,
}

impl<W: Write> CsvEmitter<W> {
    pub fn new(writer: W, options: &EngineOptions) -> Self {
        Self {
            writer,
            delimiter: options.delimiter,
            terminator: options.line_terminator,
            always: field_encoder(options, QuoteStyle::Always),
            necessary: field_encoder(options, QuoteStyle::Necessary),
        }
    }

    /// Write `field` at `column`, preceded by a delimiter unless `column` is 0
    pub fn emit_field(&mut self, column: u16, field: &Field) -> io::Result<()> {
        if column != 0 {
            self.writer.write_all(&[self.delimiter])?;
        }
        match field {
            Field::Empty => Ok(()),
            Field::Quoted(text) => encode(&mut self.writer, &self.always, text.as_bytes()),
            Field::Plain(text) if text.is_empty() => Ok(()),
            Field::Plain(text) => encode(&mut self.writer, &self.necessary, text.as_bytes()),
        }
    }

    /// Write `count` bare delimiters (empty trailing fields)
    pub fn emit_padding(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.writer.write_all(&[self.delimiter])?;
        }
        Ok(())
    }

    pub fn emit_row_end(&mut self) -> io::Result<()> {
        self.writer.write_all(self.terminator.as_bytes())
    }

    /// A blank line, then `Name [n]:`
    pub fn emit_sheet_header(&mut self, sheet: &Sheet) -> io::Result<()> {
        self.emit_row_end()?;
        self.writer.write_all(sheet.header().as_bytes())?;
        self.emit_row_end()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn field_encoder(options: &EngineOptions, style: QuoteStyle) -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(options.delimiter)
        .quote(options.quote)
        .double_quote(true)
        .quote_style(style)
        // Any CR or LF forces quoting, whatever the output line ending
        .terminator(Terminator::CRLF);
    builder
}

/// Write one field, quoted and escaped as `encoder` decides
fn encode<W: Write>(out: &mut W, encoder: &WriterBuilder, mut input: &[u8]) -> io::Result<()> {
    let mut encoder = encoder.build();
    let mut buf = [0u8; 1024];
    loop {
        let (result, nin, nout) = encoder.field(input, &mut buf);
        out.write_all(&buf[..nout])?;
        input = &input[nin..];
        if matches!(result, WriteResult::InputEmpty) {
            break;
        }
    }
    loop {
        let (result, nout) = encoder.finish(&mut buf);
        out.write_all(&buf[..nout])?;
        if matches!(result, WriteResult::InputEmpty) {
            return Ok(());
        }
    }
}
