//! In-flight display formatting for metric values.
//!
//! Only intermediate frames go through here. The final frame always writes
//! the stored raw text, so exotic source formatting (thousands separators,
//! trailing zeros) never has to be reproduced.

use serde::{Deserialize, Serialize};

/// Display format detected from a metric's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    /// `42.0%` - one decimal plus a percent sign.
    Percentage,
    /// `4.5:1` - one decimal plus a `:1` suffix.
    Ratio,
    /// `$120` - dollar sign plus a whole number.
    Currency,
    /// `$3.2M` - dollar sign, one decimal, `M` suffix.
    CurrencyMillions,
    /// `0.857` - three decimals.
    Decimal,
    /// `120` - whole number.
    Integer,
}

impl FormatKind {
    /// Renders `value` the way an intermediate frame displays it.
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::CurrencyMillions => format!("${}M", fixed(value, 1)),
            Self::Currency => format!("${}", round_half_up(value)),
            Self::Ratio => format!("{}:1", fixed(value, 1)),
            Self::Percentage => format!("{}%", fixed(value, 1)),
            Self::Decimal => fixed(value, 3),
            Self::Integer => format!("{}", round_half_up(value)),
        }
    }
}

/// Formats `value` with `digits` decimals, rounding exact ties away from zero.
///
/// `{:.N}` alone breaks ties to even (`0.25` would show as `0.2`). Only a
/// value whose binary representation is exactly halfway counts as a tie.
fn fixed(value: f64, digits: usize) -> String {
    let scale = (0..digits).fold(2.0, |s, _| s * 10.0);
    let doubled = value.abs() * scale;
    let exact = value.abs().mul_add(scale, -doubled) == 0.0;
    if exact && doubled % 2.0 == 1.0 {
        let up = ((doubled + 1.0) / scale).copysign(value);
        return format!("{up:.digits$}");
    }
    format!("{value:.digits$}")
}

/// Rounds to the nearest integer, with ties going toward positive infinity.
///
/// Negative zero is normalized so it never renders as `-0`.
fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    let rounded = if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    };
    rounded + 0.0
}
