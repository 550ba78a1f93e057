use chrono::Month;
use serde::{Deserialize, Serialize};

/// Label shown for missing or non-finite values.
pub const MISSING_VALUE_LABEL: &str = "n/a";

const FR_MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Locale preset used by value and axis label formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NumberLocale {
    EnUs,
    #[default]
    FrFr,
}

impl NumberLocale {
    fn group_separator(self) -> &'static str {
        match self {
            Self::EnUs => ",",
            // Narrow no-break space, as `Intl.NumberFormat("fr-FR")` emits.
            Self::FrFr => "\u{202f}",
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::FrFr => ',',
        }
    }
}

/// Kind of quantity a chart plots; selects the formatting preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueKind {
    #[default]
    Temperature,
    Rainfall,
    Days,
    Magnitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub decimals: u8,
    pub unit: Option<&'static str>,
}

impl FormatOptions {
    #[must_use]
    pub const fn temperature() -> Self {
        Self {
            decimals: 1,
            unit: Some("°C"),
        }
    }

    #[must_use]
    pub const fn rainfall() -> Self {
        Self {
            decimals: 0,
            unit: Some("mm"),
        }
    }

    #[must_use]
    pub const fn days() -> Self {
        Self {
            decimals: 0,
            unit: Some("d"),
        }
    }

    #[must_use]
    pub const fn magnitude() -> Self {
        Self {
            decimals: 0,
            unit: None,
        }
    }

    #[must_use]
    pub const fn for_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Temperature => Self::temperature(),
            ValueKind::Rainfall => Self::rainfall(),
            ValueKind::Days => Self::days(),
            ValueKind::Magnitude => Self::magnitude(),
        }
    }

    /// Same precision, no unit suffix. Used for axis ticks.
    #[must_use]
    pub const fn without_unit(self) -> Self {
        Self {
            decimals: self.decimals,
            unit: None,
        }
    }
}

/// Locale-aware formatter for displayed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericFormatter {
    locale: NumberLocale,
}

impl NumericFormatter {
    #[must_use]
    pub const fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub fn locale(self) -> NumberLocale {
        self.locale
    }

    /// Formats `value`, or returns [`MISSING_VALUE_LABEL`] when it is absent
    /// or non-finite.
    #[must_use]
    pub fn format(self, value: Option<f64>, options: FormatOptions) -> String {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return MISSING_VALUE_LABEL.to_owned();
        };

        let precision = usize::from(options.decimals);
        let text = format!("{:.precision$}", value.abs());
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + 8);
        let is_zero = text.bytes().all(|b| b == b'0' || b == b'.');
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        push_grouped(&mut out, integer, self.locale.group_separator());
        if let Some(fraction) = fraction {
            out.push(self.locale.decimal_separator());
            out.push_str(fraction);
        }
        if let Some(unit) = options.unit {
            out.push(' ');
            out.push_str(unit);
        }
        out
    }

    /// Full month name for a 1-based month index.
    #[must_use]
    pub fn month_label(self, month_index: i32) -> Option<String> {
        let month = u8::try_from(month_index)
            .ok()
            .filter(|month| (1..=12).contains(month))?;
        match self.locale {
            NumberLocale::EnUs => Month::try_from(month).ok().map(|m| m.name().to_owned()),
            NumberLocale::FrFr => Some(FR_MONTH_NAMES[usize::from(month - 1)].to_owned()),
        }
    }
}

fn push_grouped(out: &mut String, digits: &str, separator: &str) {
    let len = digits.len();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(digit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let mut out = String::new();
        push_grouped(&mut out, "1234567", ",");
        assert_eq!(out, "1,234,567");

        let mut short = String::new();
        push_grouped(&mut short, "123", ",");
        assert_eq!(short, "123");
    }

    #[test]
    fn negative_zero_drops_sign() {
        let formatter = NumericFormatter::new(NumberLocale::EnUs);
        assert_eq!(formatter.format(Some(-0.04), FormatOptions::temperature()), "0.0 °C");
    }
}
