//! Shared value structs for the household retrofit simulation.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a construction year band string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YearBandError {
    /// The string was not of the form `"<start>-<end>"`.
    #[error("malformed construction year band {input:?}: expected \"<start>-<end>\"")]
    Malformed {
        /// The rejected input.
        input: String,
    },

    /// The band ends before it starts.
    #[error("construction year band {start}-{end} ends before it starts")]
    Reversed {
        /// First year of the band.
        start: u16,
        /// Last year of the band.
        end: u16,
    },
}

/// Closed range of construction years, e.g. `1945-1964`.
///
/// Both ends are inclusive. Serialized as the `"start-end"` string used by
/// housing-stock data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConstructionYearBand {
    start: u16,
    end: u16,
}

impl ConstructionYearBand {
    /// Create a band from its first and last year.
    ///
    /// # Errors
    ///
    /// Returns [`YearBandError::Reversed`] if `end < start`.
    pub const fn new(start: u16, end: u16) -> Result<Self, YearBandError> {
        if end < start {
            return Err(YearBandError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// First year of the band.
    pub const fn start(self) -> u16 {
        self.start
    }

    /// Last year of the band.
    pub const fn end(self) -> u16 {
        self.end
    }
}

impl FromStr for ConstructionYearBand {
    type Err = YearBandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || YearBandError::Malformed {
            input: s.to_owned(),
        };
        let (start, end) = s.trim().split_once('-').ok_or_else(malformed)?;
        let start = start.trim().parse::<u16>().map_err(|_e| malformed())?;
        let end = end.trim().parse::<u16>().map_err(|_e| malformed())?;
        Self::new(start, end)
    }
}

impl TryFrom<String> for ConstructionYearBand {
    type Error = YearBandError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConstructionYearBand> for String {
    fn from(band: ConstructionYearBand) -> Self {
        band.to_string()
    }
}

impl fmt::Display for ConstructionYearBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
