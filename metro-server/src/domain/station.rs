//! Station identifier types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station identifier {input:?}: {reason}")]
pub struct InvalidStationId {
    input: String,
    reason: &'static str,
}

/// A metro line, numbered 1 to 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LineNumber(u8);

impl LineNumber {
    /// Returns the line as an integer in `1..=9`.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated station identifier such as `"101"` or `"417"`.
///
/// The first character is the line the station belongs to, so `"305"` is
/// on line 3. Everything after it is opaque. The line is extracted once at
/// parse time; a `StationId` that exists is always well-formed.
///
/// Cloning is cheap: the text is reference counted.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationId;
///
/// let station = StationId::parse("305").unwrap();
/// assert_eq!(station.as_str(), "305");
/// assert_eq!(station.line().get(), 3);
///
/// // Line 0 does not exist
/// assert!(StationId::parse("012").is_err());
///
/// // Neither does a missing line digit
/// assert!(StationId::parse("A12").is_err());
/// assert!(StationId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId {
    // Field order matters for the derived Ord: text first.
    text: Arc<str>,
    line: LineNumber,
}

impl StationId {
    /// Parse a station identifier.
    ///
    /// The input must be non-empty and start with an ASCII digit 1-9.
    /// Surrounding whitespace is not stripped.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let first = s.as_bytes().first().copied().ok_or(InvalidStationId {
            input: s.to_string(),
            reason: "must not be empty",
        })?;

        if !(b'1'..=b'9').contains(&first) {
            return Err(InvalidStationId {
                input: s.to_string(),
                reason: "must start with a line digit 1-9",
            });
        }

        Ok(Self {
            text: Arc::from(s),
            line: LineNumber(first - b'0'),
        })
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the line this station belongs to.
    pub fn line(&self) -> LineNumber {
        self.line
    }

    /// Returns true if moving between `self` and `other` changes line.
    pub fn is_transfer_to(&self, other: &StationId) -> bool {
        self.line != other.line
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(value: StationId) -> Self {
        value.text.to_string()
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.as_str())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
