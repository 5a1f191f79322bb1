//! `TimeUnit`, the unit a [`Period`](crate::Period) is counted in.

/// Days, weeks, months or years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Calendar days.
    Days,
    /// Seven calendar days.
    Weeks,
    /// Calendar months, clamped to the month end.
    Months,
    /// Twelve calendar months.
    Years,
}

impl TimeUnit {
    /// Tenor letter: `D`, `W`, `M` or `Y`.
    pub fn abbreviation(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }

    /// Inverse of [`abbreviation`](Self::abbreviation), case-insensitive.
    pub fn from_abbreviation(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'D' => Some(TimeUnit::Days),
            'W' => Some(TimeUnit::Weeks),
            'M' => Some(TimeUnit::Months),
            'Y' => Some(TimeUnit::Years),
            _ => None,
        }
    }

    /// Whether the unit is a fixed number of days, so that month ends mean
    /// nothing to it.
    pub fn is_day_based(&self) -> bool {
        matches!(self, TimeUnit::Days | TimeUnit::Weeks)
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}
