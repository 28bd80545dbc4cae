//! Metric value parsing.
//!
//! Detection order matters because the formats share characters:
//! `"12.5%"` has a decimal point and `"$3.2M"` has both a dollar sign and a
//! decimal point. The checks below run in a fixed priority:
//!
//! 1. `:` → ratio (magnitude is the part before the colon)
//! 2. `$` → currency (`$`, `,` and `M` stripped; `M` marks millions)
//! 3. anything else → digits and `.` kept; `%` marks a percentage,
//!    a remaining `.` marks a decimal, otherwise an integer

use crate::format::FormatKind;

/// A displayed metric value, parsed once when its animation starts.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    /// Original displayed text. Always the last thing written.
    raw_text: String,
    /// Parsed magnitude. NaN when the text has no numeric content.
    magnitude: f64,
    /// Display format for intermediate frames.
    kind: FormatKind,
}

impl MetricSpec {
    /// Parses displayed metric text.
    ///
    /// Never fails: text without numeric content yields a NaN magnitude,
    /// which [`MetricSpec::is_animatable`] reports as not animatable.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let (magnitude, kind) = if let Some((before_colon, _)) = text.split_once(':') {
            (parse_float_prefix(before_colon), FormatKind::Ratio)
        } else if text.contains('$') {
            let stripped: String = text
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | 'M'))
                .collect();
            let kind = if text.contains('M') {
                FormatKind::CurrencyMillions
            } else {
                FormatKind::Currency
            };
            (parse_float_prefix(&stripped), kind)
        } else {
            let stripped: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            let kind = if text.contains('%') {
                FormatKind::Percentage
            } else if stripped.contains('.') {
                FormatKind::Decimal
            } else {
                FormatKind::Integer
            };
            (parse_float_prefix(&stripped), kind)
        };

        Self {
            raw_text: text.to_owned(),
            magnitude,
            kind,
        }
    }

    /// Returns the original displayed text.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Returns the parsed magnitude (NaN when unparseable).
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the detected display format.
    #[must_use]
    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    /// Returns true if the value can be counted up.
    #[must_use]
    pub fn is_animatable(&self) -> bool {
        !self.magnitude.is_nan()
    }

    /// Formats an intermediate value in this metric's display format.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        self.kind.render(value)
    }
}

/// Parses the longest numeric prefix of `text`, like a browser's `parseFloat`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent, and `Infinity`. Returns NaN
/// when no digits are found.
#[must_use]
pub fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
