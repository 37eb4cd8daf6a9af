//! Easing curves for the brightness animations.
//!
//! Each curve maps a linear progress in `0.0..=1.0` onto a shaped progress in the same range.
//!
//! See <https://easings.net/>

use core::{f32::consts::FRAC_PI_2, fmt::Display, str::FromStr};

use crate::{Error, Result};

/// Bounce curve constants.
const BOUNCE_SCALE: f32 = 7.5625;
const BOUNCE_WIDTH: f32 = 2.75;

/// Supported easing curves.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum EaseKind {
    #[default]
    Linear,
    Quad,
    Cubic,
    /// Quarter sine curve.
    Sin,
    /// Exponential curve, it starts from `2^-10` instead of zero.
    Exp,
    Circle,
    /// Reserved, no elastic curve is implemented yet.
    Elastic,
    Bounce,
}

impl EaseKind {
    /// All curve names in the declaration order.
    pub const NAMES: [&'static str; 8] = [
        "linear", "quad", "cubic", "sin", "exp", "circle", "elastic", "bounce",
    ];

    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Checks that the curve can be evaluated.
    pub const fn ensure_supported(self) -> Result<Self> {
        match self {
            Self::Elastic => Err(Error::InvalidEaseKind),
            other => Ok(other),
        }
    }

    /// Applies the curve to the given progress.
    pub fn apply(self, t: f32) -> Result<f32> {
        ease(t, self)
    }
}

impl FromStr for EaseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s {
            "linear" => Self::Linear,
            "quad" => Self::Quad,
            "cubic" => Self::Cubic,
            "sin" => Self::Sin,
            "exp" => Self::Exp,
            "circle" => Self::Circle,
            "elastic" => Self::Elastic,
            "bounce" => Self::Bounce,
            _ => return Err(Error::InvalidEaseKind),
        };
        Ok(kind)
    }
}

impl Display for EaseKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps the linear progress `t` onto the curve of the given kind.
pub fn ease(t: f32, kind: EaseKind) -> Result<f32> {
    let value = match kind {
        EaseKind::Linear => t,
        EaseKind::Quad => t * t,
        EaseKind::Cubic => t * t * t,
        EaseKind::Sin => 1.0 - libm::cosf(t * FRAC_PI_2),
        EaseKind::Exp => libm::exp2f(10.0 * (t - 1.0)),
        EaseKind::Circle => 1.0 - libm::sqrtf(1.0 - t * t),
        EaseKind::Elastic => return Err(Error::InvalidEaseKind),
        EaseKind::Bounce => bounce_out(t),
    };
    Ok(value)
}

fn bounce_out(t: f32) -> f32 {
    let (offset, lift) = if t < 1.0 / BOUNCE_WIDTH {
        (0.0, 0.0)
    } else if t < 2.0 / BOUNCE_WIDTH {
        (1.5 / BOUNCE_WIDTH, 0.75)
    } else if t < 2.5 / BOUNCE_WIDTH {
        (2.25 / BOUNCE_WIDTH, 0.9375)
    } else {
        (2.625 / BOUNCE_WIDTH, 0.984_375)
    };

    let u = t - offset;
    BOUNCE_SCALE * u * u + lift
}

#[cfg(test)]
mod tests {
    use super::{ease, EaseKind};
    use crate::Error;

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn test_boundaries() {
        for kind in [
            EaseKind::Linear,
            EaseKind::Quad,
            EaseKind::Cubic,
            EaseKind::Sin,
            EaseKind::Circle,
            EaseKind::Bounce,
        ] {
            assert_close(ease(0.0, kind).unwrap(), 0.0);
            assert_close(ease(1.0, kind).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_exp_does_not_start_from_zero() {
        assert_close(ease(0.0, EaseKind::Exp).unwrap(), 1.0 / 1024.0);
        assert_close(ease(1.0, EaseKind::Exp).unwrap(), 1.0);
    }

    #[test]
    fn test_elastic_is_reserved() {
        assert_eq!(ease(0.5, EaseKind::Elastic), Err(Error::InvalidEaseKind));
        assert_eq!(
            EaseKind::Elastic.ensure_supported(),
            Err(Error::InvalidEaseKind)
        );
        assert_eq!(EaseKind::Sin.ensure_supported(), Ok(EaseKind::Sin));
    }

    #[test]
    fn test_midpoints() {
        assert_close(ease(0.5, EaseKind::Linear).unwrap(), 0.5);
        assert_close(ease(0.5, EaseKind::Quad).unwrap(), 0.25);
        assert_close(ease(0.5, EaseKind::Cubic).unwrap(), 0.125);
        assert_close(ease(0.5, EaseKind::Exp).unwrap(), 1.0 / 32.0);
        assert_close(
            ease(0.5, EaseKind::Sin).unwrap(),
            1.0 - core::f32::consts::FRAC_1_SQRT_2,
        );
        assert_close(ease(0.5, EaseKind::Circle).unwrap(), 1.0 - 0.75_f32.sqrt());
    }

    #[test]
    fn test_bounce_segments() {
        // First segment is a plain parabola.
        assert_close(ease(0.2, EaseKind::Bounce).unwrap(), 7.5625 * 0.04);
        // Segment peaks touch the lift values.
        assert_close(ease(1.5 / 2.75, EaseKind::Bounce).unwrap(), 0.75);
        assert_close(ease(2.25 / 2.75, EaseKind::Bounce).unwrap(), 0.9375);
        assert_close(ease(2.625 / 2.75, EaseKind::Bounce).unwrap(), 0.984_375);
    }

    #[test]
    fn test_apply_matches_ease() {
        assert_close(EaseKind::Quad.apply(0.3).unwrap(), 0.09);
        assert_eq!(EaseKind::Cubic.apply(0.7), ease(0.7, EaseKind::Cubic));
        assert_eq!(EaseKind::Elastic.apply(0.1), Err(Error::InvalidEaseKind));
    }

    #[test]
    fn test_parse_names() {
        for name in EaseKind::NAMES {
            let kind: EaseKind = name.parse().unwrap();
            assert_eq!(kind.name(), name);
        }
        assert_eq!("back".parse::<EaseKind>(), Err(Error::InvalidEaseKind));
        assert_eq!("".parse::<EaseKind>(), Err(Error::InvalidEaseKind));
    }
}
