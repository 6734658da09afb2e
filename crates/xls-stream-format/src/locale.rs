//! Locale separators

/// Separators used when rendering numbers and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    /// Decimal separator (e.g. `.` in `en-US`, `,` in many EU locales).
    pub decimal_sep: char,
    /// Thousands separator (e.g. `,` in `en-US`, `.` in `de-DE`).
    pub thousands_sep: char,
    /// Date separator used when the format code uses `/`.
    pub date_sep: char,
}

impl Locale {
    pub const fn en_us() -> Self {
        Self {
            decimal_sep: '.',
            thousands_sep: ',',
            date_sep: '/',
        }
    }

    pub const fn de_de() -> Self {
        Self {
            decimal_sep: ',',
            thousands_sep: '.',
            date_sep: '.',
        }
    }

    pub const fn fr_fr() -> Self {
        Self {
            decimal_sep: ',',
            thousands_sep: '\u{00A0}',
            date_sep: '/',
        }
    }

    pub const fn zh_cn() -> Self {
        Self {
            decimal_sep: '.',
            thousands_sep: ',',
            date_sep: '-',
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}
