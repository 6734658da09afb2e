//! Number format codes attached to numeric cells

/// Number format of a numeric or formula cell, as resolved by the decoder
/// from the cell's XF record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by index
    BuiltIn(u16),

    /// Custom format from a FORMAT record (index, format code)
    Custom(u16, String),
}

impl NumberFormat {
    /// 0 - General
    pub const ID_GENERAL: u16 = 0;
    /// 14 - m/d/yy, the first built-in date format
    pub const ID_DATE_SHORT: u16 = 14;
    /// 22 - m/d/yy h:mm, the last built-in date format
    pub const ID_DATETIME: u16 = 22;
    /// 49 - @
    pub const ID_TEXT: u16 = 49;

    /// Create a format from a FORMAT record. An empty code falls back to the
    /// built-in format with the same index.
    pub fn from_record<S: Into<String>>(index: u16, code: S) -> Self {
        let code = code.into();
        if code.is_empty() {
            Self::from_id(index)
        } else {
            NumberFormat::Custom(index, code)
        }
    }

    /// Create a built-in format by index
    pub fn from_id(id: u16) -> Self {
        if id == Self::ID_GENERAL {
            NumberFormat::General
        } else {
            NumberFormat::BuiltIn(id)
        }
    }

    /// The format index as stored in the XF record
    pub fn index(&self) -> u16 {
        match self {
            NumberFormat::General => Self::ID_GENERAL,
            NumberFormat::BuiltIn(id) => *id,
            NumberFormat::Custom(id, _) => *id,
        }
    }

    /// Get the format string
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_format_string(*id),
            NumberFormat::Custom(_, s) => s,
        }
    }

    /// Get built-in format string by index
    fn builtin_format_string(id: u16) -> &'static str {
        match id {
            0 => "General",
            1 => "0",
            2 => "0.00",
            3 => "#,##0",
            4 => "#,##0.00",
            5 => "\"$\"#,##0_);(\"$\"#,##0)",
            6 => "\"$\"#,##0_);[Red](\"$\"#,##0)",
            7 => "\"$\"#,##0.00_);(\"$\"#,##0.00)",
            8 => "\"$\"#,##0.00_);[Red](\"$\"#,##0.00)",
            9 => "0%",
            10 => "0.00%",
            11 => "0.00E+00",
            12 => "# ?/?",
            13 => "# ??/??",
            14 => "m/d/yy",
            15 => "d-mmm-yy",
            16 => "d-mmm",
            17 => "mmm-yy",
            18 => "h:mm AM/PM",
            19 => "h:mm:ss AM/PM",
            20 => "h:mm",
            21 => "h:mm:ss",
            22 => "m/d/yy h:mm",
            37 => "#,##0_);(#,##0)",
            38 => "#,##0_);[Red](#,##0)",
            39 => "#,##0.00_);(#,##0.00)",
            40 => "#,##0.00_);[Red](#,##0.00)",
            45 => "mm:ss",
            46 => "[h]:mm:ss",
            47 => "mm:ss.0",
            48 => "##0.0E+0",
            49 => "@",
            _ => "General",
        }
    }

    /// Check if this is a date/time format
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(_, s) => is_date_code(s),
        }
    }
}

/// Whether a custom code contains date/time tokens outside of quoted
/// literals, escapes and bracketed sections (`[Red]`, `[$-409]`).
fn is_date_code(code: &str) -> bool {
    let section = code.split(';').next().unwrap_or(code);
    let mut chars = section.chars();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                // Elapsed-time markers: [h], [mm], [ss]
                if inner.chars().all(|c| matches!(c, 'h' | 'H' | 'm' | 'M' | 's' | 'S'))
                    && !inner.is_empty()
                {
                    return true;
                }
            }
            'y' | 'Y' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' | 'm' | 'M' => return true,
            _ => {}
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_date_formats() {
        assert!(NumberFormat::from_id(14).is_date_format());
        assert!(NumberFormat::from_id(22).is_date_format());
        assert!(!NumberFormat::from_id(2).is_date_format());
        assert!(!NumberFormat::General.is_date_format());
    }

    #[test]
    fn test_custom_date_detection() {
        assert!(NumberFormat::from_record(164, "yyyy-mm-dd").is_date_format());
        assert!(NumberFormat::from_record(165, "[$-409]h:mm AM/PM").is_date_format());
        assert!(NumberFormat::from_record(166, "[h]:mm").is_date_format());
        assert!(!NumberFormat::from_record(167, "#,##0.00\" days\"").is_date_format());
        assert!(!NumberFormat::from_record(168, "[Red]0.00").is_date_format());
    }

    #[test]
    fn test_format_string_and_index() {
        assert_eq!(NumberFormat::from_id(0), NumberFormat::General);
        assert_eq!(NumberFormat::from_id(4).format_string(), "#,##0.00");
        let custom = NumberFormat::from_record(170, "0.000");
        assert_eq!(custom.index(), 170);
        assert_eq!(custom.format_string(), "0.000");
        assert_eq!(NumberFormat::from_record(10, ""), NumberFormat::BuiltIn(10));
    }
}
