//! Power easing curves with gsap-style names
//!
//! `powerN` is a polynomial of degree N+1: `power1` is quadratic, `power2`
//! cubic, `power3` quartic, `power4` quintic. A bare `powerN` eases out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An easing curve mapping normalized progress [0, 1] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
}

impl Default for Ease {
    /// Decelerating cubic (`power2.out`).
    fn default() -> Self {
        Ease::PowerOut(2)
    }
}

impl Ease {
    fn exponent(power: u8) -> i32 {
        power as i32 + 1
    }

    /// Eased progress for `u`, clamped to [0, 1].
    pub fn apply(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => u,
            Ease::PowerIn(p) => u.powi(Self::exponent(p)),
            Ease::PowerOut(p) => 1.0 - (1.0 - u).powi(Self::exponent(p)),
            Ease::PowerInOut(p) => {
                let e = Self::exponent(p);
                if u < 0.5 {
                    (2.0 * u).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - u)).powi(e) / 2.0
                }
            }
        }
    }

    /// Slope of the curve at `u`, clamped to [0, 1].
    pub fn derivative(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => 1.0,
            Ease::PowerIn(p) => {
                let e = Self::exponent(p);
                e as f32 * u.powi(e - 1)
            }
            Ease::PowerOut(p) => {
                let e = Self::exponent(p);
                e as f32 * (1.0 - u).powi(e - 1)
            }
            Ease::PowerInOut(p) => {
                let e = Self::exponent(p);
                if u < 0.5 {
                    e as f32 * (2.0 * u).powi(e - 1)
                } else {
                    e as f32 * (2.0 * (1.0 - u)).powi(e - 1)
                }
            }
        }
    }
}

impl FromStr for Ease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if matches!(s, "none" | "linear" | "power0" | "power0.out" | "power0.in" | "power0.inOut") {
            return Ok(Ease::Linear);
        }

        let (name, kind) = s.split_once('.').unwrap_or((s, "out"));
        let power = match name {
            "power1" | "quad" => 1,
            "power2" | "cubic" => 2,
            "power3" | "quart" => 3,
            "power4" | "quint" | "strong" => 4,
            _ => return Err(format!("unknown ease '{}'", s)),
        };
        match kind {
            "in" => Ok(Ease::PowerIn(power)),
            "out" => Ok(Ease::PowerOut(power)),
            "inOut" => Ok(Ease::PowerInOut(power)),
            _ => Err(format!(
                "unknown ease direction '{}' in '{}'; expected in, out, or inOut",
                kind, s
            )),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::PowerIn(p) => write!(f, "power{}.in", p),
            Ease::PowerOut(p) => write!(f, "power{}.out", p),
            Ease::PowerInOut(p) => write!(f, "power{}.inOut", p),
        }
    }
}
