//! Numeric format codes.

use crate::locale::Locale;

/// Significant digits shown by the General format
const GENERAL_PRECISION: i32 = 15;

/// Format a number the way the General format does: integers without a
/// fractional part, other values rounded to 15 significant digits with
/// trailing zeros removed, very large or small magnitudes in scientific form.
pub fn format_general(value: f64, locale: &Locale) -> String {
    if !value.is_finite() {
        return "#NUM!".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if value.fract() == 0.0 && magnitude < 1e15 {
        return format!("{}", value as i64);
    }

    if !(1e-9..1e15).contains(&magnitude) {
        return scientific(value, GENERAL_PRECISION as usize - 1, locale, true);
    }

    let exponent = magnitude.log10().floor() as i32;
    let decimals = (GENERAL_PRECISION - 1 - exponent).clamp(0, GENERAL_PRECISION) as usize;
    let value = round_half_up(value, decimals);
    let text = format!("{value:.decimals$}");
    let text = trim_fraction(&text);
    text.replace('.', &locale.decimal_sep.to_string())
}

/// A parsed numeric format section
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NumberPattern {
    prefix: String,
    suffix: String,
    decimals: usize,
    thousands: bool,
    percent: bool,
    scientific: bool,
    /// Digit placeholders were present at all
    has_digits: bool,
}

impl NumberPattern {
    /// Parse one section of a format code.
    pub(crate) fn parse(section: &str) -> Self {
        let chars: Vec<char> = section.chars().collect();
        let mut pattern = NumberPattern::default();
        let mut in_fraction = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            match c {
                '0' | '#' | '?' => {
                    // Exponent digits do not count as decimals
                    if in_fraction && !pattern.scientific {
                        pattern.decimals += 1;
                    }
                    pattern.has_digits = true;
                    // Text seen between placeholders (rare) is dropped
                    pattern.suffix.clear();
                }
                '.' if !pattern.scientific => in_fraction = true,
                ',' if pattern.has_digits && !in_fraction => {
                    let more_digits = chars[i + 1..]
                        .iter()
                        .take_while(|ch| !matches!(ch, '.' | ';'))
                        .any(|ch| matches!(ch, '0' | '#' | '?'));
                    if more_digits {
                        pattern.thousands = true;
                    }
                }
                'E' | 'e' if matches!(chars.get(i + 1), Some('+') | Some('-')) => {
                    pattern.scientific = true;
                    i += 1;
                }
                '%' => {
                    pattern.percent = true;
                    pattern.literal().push('%');
                }
                '"' => {
                    let literal: String =
                        chars[i + 1..].iter().take_while(|&&ch| ch != '"').collect();
                    i += literal.chars().count() + 1;
                    pattern.literal().push_str(&literal);
                }
                '\\' => {
                    if let Some(next) = chars.get(i + 1) {
                        pattern.literal().push(*next);
                    }
                    i += 1;
                }
                '_' => {
                    pattern.literal().push(' ');
                    i += 1;
                }
                '*' => i += 1,
                '[' => {
                    let skipped = chars[i + 1..].iter().take_while(|&&ch| ch != ']').count();
                    i += skipped + 1;
                }
                other => pattern.literal().push(other),
            }
            i += 1;
        }

        pattern
    }

    /// Literal text goes before the number until a digit placeholder is seen
    fn literal(&mut self) -> &mut String {
        if self.has_digits {
            &mut self.suffix
        } else {
            &mut self.prefix
        }
    }

    /// Render `value` (already made positive when a negative section applies).
    pub(crate) fn render(&self, value: f64, locale: &Locale, signed: bool) -> String {
        if !self.has_digits {
            return format!("{}{}", self.prefix, self.suffix);
        }

        let value = if self.percent { value * 100.0 } else { value };

        let body = if self.scientific {
            scientific(value.abs(), self.decimals, locale, false)
        } else {
            let rounded = round_half_up(value.abs(), self.decimals);
            let text = format!("{:.*}", self.decimals, rounded);
            let (int_part, frac_part) = match text.split_once('.') {
                Some((i, f)) => (i.to_string(), Some(f.to_string())),
                None => (text, None),
            };
            let int_part = if self.thousands {
                group_thousands(&int_part, locale.thousands_sep)
            } else {
                int_part
            };
            match frac_part {
                Some(frac) => format!("{int_part}{}{frac}", locale.decimal_sep),
                None => int_part,
            }
        };

        let is_zero = body.chars().all(|c| !c.is_ascii_digit() || c == '0');
        let sign = if signed && value < 0.0 && !is_zero {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{body}{}", self.prefix, self.suffix)
    }
}

/// Split a format code into its `;`-separated sections, ignoring
/// separators inside quoted literals.
pub(crate) fn sections(code: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in code.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                sections.push(&code[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&code[start..]);
    sections
}

/// Format with an explicit code, choosing the positive, negative or zero
/// section by sign.
pub(crate) fn format_with_code(value: f64, code: &str, locale: &Locale) -> String {
    let sections = sections(code);
    let (section, signed) = match sections.as_slice() {
        [_, neg, ..] if value < 0.0 => (*neg, false),
        [_, _, zero, ..] if value == 0.0 => (*zero, false),
        [first, ..] => (*first, true),
        [] => return format_general(value, locale),
    };

    if section.eq_ignore_ascii_case("General") || section.is_empty() {
        return format_general(value, locale);
    }
    let value = if signed { value } else { value.abs() };
    if let Some(fraction) = FractionPattern::parse(section) {
        return fraction.render(value, signed);
    }
    NumberPattern::parse(section).render(value, locale, signed)
}

/// A fraction section such as `# ?/?`, `??/??` or `# ?/8`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FractionPattern {
    /// An integer part precedes the fraction
    whole: bool,
    denominator: Denominator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Denominator {
    /// Best fit with at most this many digits
    Digits(u32),
    Fixed(u64),
}

impl FractionPattern {
    /// Recognize a fraction section. Literal text is not kept.
    pub(crate) fn parse(section: &str) -> Option<Self> {
        let bare = strip_literals(section);
        if bare.contains(['E', 'e']) {
            return None;
        }
        let (left, right) = bare.split_once('/')?;

        let is_placeholder = |c: char| matches!(c, '#' | '0' | '?');
        let left = left.trim_end();
        let numerator_len = left.chars().rev().take_while(|&c| is_placeholder(c)).count();
        if numerator_len == 0 {
            return None;
        }
        let whole = left
            .chars()
            .rev()
            .skip(numerator_len)
            .any(is_placeholder);

        let right = right.trim_start();
        let fixed: String = right.chars().take_while(char::is_ascii_digit).collect();
        let denominator = match fixed.parse::<u64>() {
            Ok(d) if d > 0 && !fixed.starts_with('0') => Denominator::Fixed(d),
            _ => {
                let digits = right.chars().take_while(|&c| is_placeholder(c)).count();
                if digits == 0 {
                    return None;
                }
                Denominator::Digits(digits.min(6) as u32)
            }
        };

        Some(Self { whole, denominator })
    }

    pub(crate) fn render(&self, value: f64, signed: bool) -> String {
        let magnitude = value.abs();
        let (mut integer, fraction) = if self.whole {
            (magnitude.trunc(), magnitude.fract())
        } else {
            (0.0, magnitude)
        };

        let (mut numerator, denominator) = self.closest(fraction);
        if self.whole && numerator == denominator {
            integer += 1.0;
            numerator = 0;
        }

        let sign = if signed && value < 0.0 && (integer != 0.0 || numerator != 0) {
            "-"
        } else {
            ""
        };
        let integer = integer as u64;
        match (self.whole, integer, numerator) {
            (true, _, 0) => format!("{sign}{integer}"),
            (true, 0, _) => format!("{sign}{numerator}/{denominator}"),
            (true, _, _) => format!("{sign}{integer} {numerator}/{denominator}"),
            (false, _, _) => format!("{sign}{numerator}/{denominator}"),
        }
    }

    /// Numerator and denominator closest to `fraction`; ties keep the
    /// smaller denominator.
    fn closest(&self, fraction: f64) -> (u64, u64) {
        let candidates = match self.denominator {
            Denominator::Fixed(d) => d..=d,
            Denominator::Digits(digits) => 1..=10u64.pow(digits) - 1,
        };

        let mut best = (0, 1, f64::INFINITY);
        for denominator in candidates {
            let numerator = (fraction * denominator as f64).round();
            let error = (fraction - numerator / denominator as f64).abs();
            if error < best.2 {
                best = (numerator as u64, denominator, error);
                if error == 0.0 {
                    break;
                }
            }
        }
        (best.0, best.1)
    }
}

/// Drop quoted text, escapes, fills and bracketed modifiers from a section
fn strip_literals(section: &str) -> String {
    let mut bare = String::with_capacity(section.len());
    let mut chars = section.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                for inner in chars.by_ref() {
                    if inner == '"' {
                        break;
                    }
                }
            }
            '[' => {
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                }
            }
            '\\' | '_' | '*' => {
                chars.next();
            }
            other => bare.push(other),
        }
    }
    bare
}

/// Round half away from zero at `decimals` places.
///
/// The scaled value is first cut to 15 significant digits, so a decimal
/// tie such as 0.125 or 1.005 is not lost to binary representation.
fn round_half_up(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 1e15 {
        return value;
    }
    let scaled: f64 = format!("{scaled:.14e}").parse().unwrap_or(scaled);
    scaled.round() / factor
}

fn scientific(value: f64, decimals: usize, locale: &Locale, trim: bool) -> String {
    let text = format!("{value:.14e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut mantissa = round_half_up(mantissa.parse().unwrap_or(value), decimals);
    if mantissa.abs() >= 10.0 {
        exponent += 1;
        mantissa /= 10.0;
    }

    let mantissa = format!("{mantissa:.decimals$}");
    let mantissa = if trim {
        trim_fraction(&mantissa)
    } else {
        mantissa
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    let mantissa = mantissa.replace('.', &locale.decimal_sep.to_string());
    format!("{mantissa}E{sign}{:02}", exponent.abs())
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
