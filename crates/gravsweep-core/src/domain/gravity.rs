//! Gravity vector value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ports::CoreError;

/// A three-component acceleration vector in simulator units.
///
/// Serialized as a plain `[x, y, z]` array so sweep files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct GravityVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GravityVector {
    /// Create a new gravity vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Earth surface gravity along -z, the usual simulator default.
    #[must_use]
    pub const fn earth() -> Self {
        Self::new(0.0, 0.0, -9.81)
    }

    /// Components as an array, in `x, y, z` order.
    #[must_use]
    pub const fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for GravityVector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<GravityVector> for [f64; 3] {
    fn from(v: GravityVector) -> Self {
        v.components()
    }
}

/// Renders the space-separated form written into the `gravity` attribute.
impl fmt::Display for GravityVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Parses `x,y,z` (commas or whitespace between components).
impl FromStr for GravityVector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 3 {
            return Err(CoreError::Validation(format!(
                "gravity vector needs 3 components, got {} in '{s}'",
                parts.len()
            )));
        }

        let mut components = [0.0_f64; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                CoreError::Validation(format!("invalid gravity component '{part}' in '{s}'"))
            })?;
            if !slot.is_finite() {
                return Err(CoreError::Validation(format!(
                    "gravity component '{part}' is not finite"
                )));
            }
        }

        Ok(Self::from(components))
    }
}
