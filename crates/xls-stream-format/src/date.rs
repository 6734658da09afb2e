//! Serial date conversion and date/time format codes.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::locale::Locale;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Serial of 9999-12-31, the last representable date
const MAX_SERIAL: f64 = 2_958_465.0;

/// Convert a serial date number to a date-time.
///
/// In the 1900 system serial 1 is 1900-01-01 and serial 60 is the
/// non-existent 1900-02-29, so serials from 61 on are shifted by one day.
/// In the 1904 system serial 0 is 1904-01-01. Negative or non-finite
/// serials, and serials past 9999-12-31, are not dates.
pub fn serial_to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }

    let mut days = serial.trunc() as i64;
    let mut seconds = ((serial - serial.trunc()) * SECONDS_PER_DAY).round() as i64;
    if seconds >= SECONDS_PER_DAY as i64 {
        days += 1;
        seconds -= SECONDS_PER_DAY as i64;
    }

    let epoch = if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else if days >= 61 {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    };

    let date = epoch.checked_add_signed(Duration::days(days))?;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Year(usize),
    /// Month or minute, decided once neighbours are known
    M(usize),
    Day(usize),
    Hour(usize),
    Second(usize),
    AmPm,
    Literal(String),
}

/// Render a date-time with an Excel date/time format code.
pub(crate) fn format_datetime(dt: NaiveDateTime, code: &str, locale: &Locale) -> String {
    let section = first_section(code);
    let tokens = tokenize(section, locale);
    let twelve_hour = tokens.contains(&Token::AmPm);

    let mut pattern = String::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Year(n) if *n <= 2 => pattern.push_str("%y"),
            Token::Year(_) => pattern.push_str("%Y"),
            Token::M(n) if is_minute(&tokens, i) => {
                pattern.push_str(if *n == 1 { "%-M" } else { "%M" })
            }
            Token::M(1) => pattern.push_str("%-m"),
            Token::M(2) => pattern.push_str("%m"),
            Token::M(3) => pattern.push_str("%b"),
            Token::M(_) => pattern.push_str("%B"),
            Token::Day(1) => pattern.push_str("%-d"),
            Token::Day(2) => pattern.push_str("%d"),
            Token::Day(3) => pattern.push_str("%a"),
            Token::Day(_) => pattern.push_str("%A"),
            Token::Hour(n) => pattern.push_str(match (twelve_hour, *n == 1) {
                (true, true) => "%-I",
                (true, false) => "%I",
                (false, true) => "%-H",
                (false, false) => "%H",
            }),
            Token::Second(1) => pattern.push_str("%-S"),
            Token::Second(_) => pattern.push_str("%S"),
            Token::AmPm => pattern.push_str("%p"),
            Token::Literal(text) => pattern.push_str(&text.replace('%', "%%")),
        }
    }

    dt.format(&pattern).to_string()
}

/// An `m` run is a minute when it follows an hour or precedes a second,
/// looking past literals.
fn is_minute(tokens: &[Token], index: usize) -> bool {
    if let Token::M(n) = tokens[index] {
        if n > 2 {
            return false;
        }
    }

    let previous = tokens[..index]
        .iter()
        .rev()
        .find(|t| !matches!(t, Token::Literal(_)));
    let next = tokens[index + 1..]
        .iter()
        .find(|t| !matches!(t, Token::Literal(_)));

    matches!(previous, Some(Token::Hour(_))) || matches!(next, Some(Token::Second(_)))
}

fn first_section(code: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in code.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => return &code[..i],
            _ => {}
        }
    }
    code
}

fn tokenize(code: &str, locale: &Locale) -> Vec<Token> {
    let chars: Vec<char> = code.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let push_literal = |tokens: &mut Vec<Token>, text: &str| {
        if let Some(Token::Literal(prev)) = tokens.last_mut() {
            prev.push_str(text);
        } else {
            tokens.push(Token::Literal(text.to_string()));
        }
    };

    while i < chars.len() {
        let c = chars[i];
        let lower = c.to_ascii_lowercase();

        if matches!(lower, 'y' | 'm' | 'd' | 'h' | 's') {
            let run = chars[i..]
                .iter()
                .take_while(|ch| ch.to_ascii_lowercase() == lower)
                .count();
            tokens.push(match lower {
                'y' => Token::Year(run),
                'm' => Token::M(run),
                'd' => Token::Day(run),
                'h' => Token::Hour(run),
                _ => Token::Second(run),
            });
            i += run;
            continue;
        }

        let rest: String = chars[i..].iter().take(5).collect();
        if rest.eq_ignore_ascii_case("AM/PM") {
            tokens.push(Token::AmPm);
            i += 5;
            continue;
        }
        if rest.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("A/P")) {
            tokens.push(Token::AmPm);
            i += 3;
            continue;
        }

        match c {
            '"' => {
                let literal: String = chars[i + 1..].iter().take_while(|&&ch| ch != '"').collect();
                i += literal.chars().count() + 2;
                push_literal(&mut tokens, &literal);
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    push_literal(&mut tokens, &next.to_string());
                }
                i += 2;
            }
            '[' => {
                let inner: String = chars[i + 1..].iter().take_while(|&&ch| ch != ']').collect();
                i += inner.chars().count() + 2;
                // Elapsed hours/minutes/seconds render like their plain forms
                match inner.to_ascii_lowercase().chars().next() {
                    Some('h') => tokens.push(Token::Hour(inner.len())),
                    Some('m') => tokens.push(Token::M(inner.len().min(2))),
                    Some('s') => tokens.push(Token::Second(inner.len())),
                    _ => {}
                }
            }
            '_' => {
                push_literal(&mut tokens, " ");
                i += 2;
            }
            '*' => i += 2,
            '/' => {
                push_literal(&mut tokens, &locale.date_sep.to_string());
                i += 1;
            }
            other => {
                push_literal(&mut tokens, &other.to_string());
                i += 1;
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_serial_1900() {
        assert_eq!(serial_to_datetime(1.0, false), Some(dt(1900, 1, 1, 0, 0, 0)));
        assert_eq!(serial_to_datetime(59.0, false), Some(dt(1900, 2, 28, 0, 0, 0)));
        assert_eq!(serial_to_datetime(61.0, false), Some(dt(1900, 3, 1, 0, 0, 0)));
        assert_eq!(
            serial_to_datetime(45000.5, false),
            Some(dt(2023, 3, 15, 12, 0, 0))
        );
    }

    #[test]
    fn test_serial_1904() {
        assert_eq!(serial_to_datetime(0.0, true), Some(dt(1904, 1, 1, 0, 0, 0)));
        assert_eq!(serial_to_datetime(1.25, true), Some(dt(1904, 1, 2, 6, 0, 0)));
    }

    #[test]
    fn test_serial_rejects_negative() {
        assert_eq!(serial_to_datetime(-1.0, false), None);
        assert_eq!(serial_to_datetime(f64::NAN, false), None);
    }

    #[test]
    fn test_format_dates() {
        let locale = Locale::en_us();
        let value = dt(2023, 3, 5, 14, 7, 9);
        assert_eq!(format_datetime(value, "m/d/yy", &locale), "3/5/23");
        assert_eq!(format_datetime(value, "yyyy-mm-dd", &locale), "2023-03-05");
        assert_eq!(format_datetime(value, "d-mmm-yy", &locale), "5-Mar-23");
        assert_eq!(format_datetime(value, "mmmm yyyy", &locale), "March 2023");
    }

    #[test]
    fn test_format_times() {
        let locale = Locale::en_us();
        let value = dt(2023, 3, 5, 14, 7, 9);
        assert_eq!(format_datetime(value, "h:mm", &locale), "14:07");
        assert_eq!(format_datetime(value, "hh:mm:ss", &locale), "14:07:09");
        assert_eq!(format_datetime(value, "h:mm AM/PM", &locale), "2:07 PM");
        assert_eq!(format_datetime(value, "mm:ss", &locale), "07:09");
        assert_eq!(format_datetime(value, "m/d/yy h:mm", &locale), "3/5/23 14:07");
    }

    #[test]
    fn test_format_literals_and_locale() {
        let value = dt(2023, 3, 5, 0, 0, 0);
        assert_eq!(
            format_datetime(value, "yyyy\"年\"m\"月\"", &Locale::en_us()),
            "2023年3月"
        );
        assert_eq!(format_datetime(value, "dd/mm/yyyy", &Locale::de_de()), "05.03.2023");
        assert_eq!(format_datetime(value, "[$-409]d\\%", &Locale::en_us()), "5%");
    }
}
