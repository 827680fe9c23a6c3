//! Path lengths with an explicit infinity sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative path length, or infinity when no path is known.
///
/// Infinity is represented by `u32::MAX` and compares greater than every
/// finite value, so `min`/`<` work directly on distances. Addition saturates:
/// adding anything to infinity yields infinity, and a finite sum that does not
/// fit is also treated as infinity.
///
/// Serialized as a JSON number, or `null` for infinity.
///
/// # Example
/// ```
/// use fwsim_core::Distance;
///
/// let a = Distance::new(3);
/// assert_eq!(a.saturating_add(Distance::new(4)), Distance::new(7));
/// assert!(a.saturating_add(Distance::INFINITY).is_infinite());
/// assert!(Distance::new(1_000_000) < Distance::INFINITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub struct Distance(u32);

impl Distance {
    /// The "no path" sentinel.
    pub const INFINITY: Self = Self(u32::MAX);

    /// Distance from a vertex to itself.
    pub const ZERO: Self = Self(0);

    /// Create a distance from a raw value. `u32::MAX` is infinity.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Whether this is the infinity sentinel.
    #[must_use]
    pub const fn is_infinite(self) -> bool {
        self.0 == u32::MAX
    }

    /// Whether this is a finite distance.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        !self.is_infinite()
    }

    /// The finite value, or `None` for infinity.
    #[must_use]
    pub const fn value(self) -> Option<u32> {
        if self.is_infinite() {
            None
        } else {
            Some(self.0)
        }
    }

    /// Add two distances, saturating at infinity.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        match (self.value(), rhs.value()) {
            (Some(a), Some(b)) => a.checked_add(b).map_or(Self::INFINITY, Self),
            _ => Self::INFINITY,
        }
    }
}

impl From<u32> for Distance {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Option<u32>> for Distance {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::INFINITY, Self)
    }
}

impl From<Distance> for Option<u32> {
    fn from(distance: Distance) -> Self {
        distance.value()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => fmt::Display::fmt(&v, f),
            None => f.pad("∞"),
        }
    }
}
