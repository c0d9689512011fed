use std::fmt;
use std::str::FromStr;

use crate::core::TcmbError;

/// Output frequency of a series read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Calendar days.
    Daily,
    /// Business days.
    Business,
    /// Weekly, on Fridays.
    Weekly,
    /// Months.
    Monthly,
    /// Quarters.
    Quarterly,
    /// Half years.
    SemiAnnual,
    /// Years.
    Annual,
}

impl Frequency {
    /// Numeric code sent as `frequency=`.
    pub const fn code(self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::Business => 2,
            Self::Weekly => 3,
            Self::Monthly => 5,
            Self::Quarterly => 6,
            Self::SemiAnnual => 7,
            Self::Annual => 8,
        }
    }
}

impl FromStr for Frequency {
    type Err = TcmbError;

    /// Accepts the pandas-style tokens `D`, `B`, `W-FRI`, `W`, `M`, `Q`, `2Q`, `A`, `Y`, and the
    /// Turkish label `AYLIK` (monthly) used in series metadata.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "D" => Self::Daily,
            "B" => Self::Business,
            "W-FRI" | "W" => Self::Weekly,
            "M" | "AYLIK" => Self::Monthly,
            "Q" => Self::Quarterly,
            "2Q" => Self::SemiAnnual,
            "A" | "Y" => Self::Annual,
            other => {
                return Err(TcmbError::ArgumentValidation(format!(
                    "unknown frequency {other:?}"
                )));
            }
        })
    }
}

/// Aggregation applied when a series is resampled to a coarser frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Mean of the period.
    Avg,
    /// Lowest value of the period.
    Min,
    /// Highest value of the period.
    Max,
    /// First observation of the period.
    First,
    /// Last observation of the period.
    Last,
    /// Sum over the period.
    Sum,
}

impl Aggregation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
            Self::First => "first",
            Self::Last => "last",
            Self::Sum => "sum",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = TcmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "avg" => Self::Avg,
            "min" => Self::Min,
            "max" => Self::Max,
            "first" => Self::First,
            "last" => Self::Last,
            "sum" => Self::Sum,
            other => {
                return Err(TcmbError::ArgumentValidation(format!(
                    "unknown aggregation {other:?}"
                )));
            }
        })
    }
}

/// Transform applied to raw series values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    /// Values as published.
    Level,
    /// Percent change on the previous period.
    PercentChange,
    /// Difference from the previous period.
    Difference,
    /// Percent change on the same period of the previous year.
    YoyPercentChange,
    /// Difference from the same period of the previous year.
    YoyDifference,
    /// Percent change on the end of the previous year.
    YtdPercentChange,
    /// Difference from the end of the previous year.
    YtdDifference,
    /// Moving average.
    MovingAverage,
    /// Moving sum.
    MovingSum,
}

impl Formula {
    pub const fn code(self) -> u8 {
        match self {
            Self::Level => 0,
            Self::PercentChange => 1,
            Self::Difference => 2,
            Self::YoyPercentChange => 3,
            Self::YoyDifference => 4,
            Self::YtdPercentChange => 5,
            Self::YtdDifference => 6,
            Self::MovingAverage => 7,
            Self::MovingSum => 8,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<u8> for Formula {
    type Error = TcmbError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Level,
            1 => Self::PercentChange,
            2 => Self::Difference,
            3 => Self::YoyPercentChange,
            4 => Self::YoyDifference,
            5 => Self::YtdPercentChange,
            6 => Self::YtdDifference,
            7 => Self::MovingAverage,
            8 => Self::MovingSum,
            other => {
                return Err(TcmbError::ArgumentValidation(format!(
                    "unknown formula code {other}"
                )));
            }
        })
    }
}

/// Joins list-valued parameters the way EVDS expects (`a-b-c`).
pub(crate) fn join_dashed<T: fmt::Display>(items: &[T]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-"),
    )
}
