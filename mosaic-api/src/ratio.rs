//! Aspect ratios.
//!
//! Measured images are stored as reduced `w/h` fractions (`1920x1080` becomes
//! `16/9`) and turned back into a float ratio when laid out. Two parsers exist:
//! the strict [`Ratio::from_str`] and the forgiving [`parse_ratio_lenient`],
//! which never fails and falls back to a square.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from strict ratio parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    #[error("empty aspect ratio")]
    Empty,

    #[error("malformed aspect ratio: {0}")]
    Malformed(String),

    #[error("aspect ratio has a zero component: {width}/{height}")]
    Zero { width: u32, height: u32 },
}

/// A reduced width/height fraction. Both terms are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ratio {
    width: u32,
    height: u32,
}

impl Ratio {
    pub const SQUARE: Self = Self { width: 1, height: 1 };

    /// Build a ratio, reducing it by the greatest common divisor.
    pub fn new(width: u32, height: u32) -> Result<Self, RatioError> {
        if width == 0 || height == 0 {
            return Err(RatioError::Zero { width, height });
        }
        let divisor = gcd(width, height);
        Ok(Self {
            width: width / divisor,
            height: height / divisor,
        })
    }

    /// Reduce natural pixel dimensions. Returns `None` for an unmeasured (zero) side.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        Self::new(width, height).ok()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn value(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.width, self.height)
    }
}

impl FromStr for Ratio {
    type Err = RatioError;

    /// Accepts `w/h`, `w:h` and `wxh`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RatioError::Empty);
        }

        let (w, h) = trimmed
            .split_once(['/', ':', 'x'])
            .ok_or_else(|| RatioError::Malformed(trimmed.to_string()))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| RatioError::Malformed(trimmed.to_string()))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| RatioError::Malformed(trimmed.to_string()))?;

        Self::new(width, height)
    }
}

impl TryFrom<String> for Ratio {
    type Error = RatioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ratio> for String {
    fn from(ratio: Ratio) -> Self {
        ratio.to_string()
    }
}

/// Parse a ratio string without ever failing.
///
/// Splits on runs of non-digits and takes the first two numbers. A missing or
/// zero term counts as 1, so `None`, `""` and `"abc"` all yield `1.0`, and
/// `"16"` yields `16.0`.
pub fn parse_ratio_lenient(s: Option<&str>) -> f64 {
    let Some(s) = s else {
        return 1.0;
    };

    let mut terms = s
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok().filter(|n| *n > 0.0).unwrap_or(1.0));

    let width = terms.next().unwrap_or(1.0);
    let height = terms.next().unwrap_or(1.0);
    width / height
}

/// Replace an unusable ratio (zero, negative, NaN, infinite) with 1.
#[inline]
pub fn normalize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
