use core::{fmt::Display, str::FromStr};

use crate::{Error, Result};

/// Lamp group addressed by a command.
///
/// The bridge controls up to four independent zones, `All` addresses every zone at once.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
pub enum Group {
    #[default]
    All,
    One,
    Two,
    Three,
    Four,
}

impl Group {
    /// All known groups in the ascending order of their numbers.
    pub const VALUES: [Self; 5] = [Self::All, Self::One, Self::Two, Self::Three, Self::Four];

    /// Returns the numeric identifier of the group.
    pub const fn number(self) -> u8 {
        match self {
            Self::All => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

/// Unknown group numbers fall back to the `All` group.
impl From<u8> for Group {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            _ => Self::All,
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            other => other.number().fmt(f),
        }
    }
}

/// Brightness or hue fraction in the `[0, 1]` range.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub struct Percent(f32);

impl Percent {
    pub const ZERO: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    /// Lowest brightness level understood by the bridge.
    pub const MIN_BRIGHTNESS_LEVEL: u8 = 2;
    /// Highest brightness level understood by the bridge.
    pub const MAX_BRIGHTNESS_LEVEL: u8 = 27;

    /// Creates a new percent value, values outside of `[0, 1]` are rejected.
    pub fn new(value: f32) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::OutOfRange)
        }
    }

    /// Creates a new percent value by clamping the given one into `[0, 1]`.
    ///
    /// `NaN` turns into zero.
    pub fn saturating(value: f32) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Returns the inner value.
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Scales the value into the bridge brightness range `[2, 27]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn brightness_level(self) -> u8 {
        let span = f32::from(Self::MAX_BRIGHTNESS_LEVEL - Self::MIN_BRIGHTNESS_LEVEL);
        libm::roundf(f32::from(Self::MIN_BRIGHTNESS_LEVEL) + self.0 * span) as u8
    }

    /// Scales the value into the bridge hue range `[0, 255]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hue_byte(self) -> u8 {
        libm::roundf(self.0 * f32::from(u8::MAX)) as u8
    }
}

impl FromStr for Percent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = f32::from_str(s.trim()).map_err(Error::invalid_parameter)?;
        Self::new(value)
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}

/// Additive color with components in the `[0, 1]` range.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const WHITE: Self = Self {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
    };
    /// Color of a torch flame.
    pub const FLAME: Self = Self {
        red: 1.0,
        green: 0.5,
        blue: 0.0,
    };

    /// Creates a new color, rejects components outside of `[0, 1]`.
    pub fn new(red: f32, green: f32, blue: f32) -> Result<Self> {
        for component in [red, green, blue] {
            Percent::new(component)?;
        }
        Ok(Self { red, green, blue })
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parses a comma separated triple, e.g. `1,0.5,0`.
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut components = s.split(',').map(|component| {
            f32::from_str(component.trim()).map_err(Error::invalid_parameter)
        });

        let mut next = || components.next().unwrap_or(Err(Error::InvalidParameter));
        let (red, green, blue) = (next()?, next()?, next()?);
        if components.next().is_some() {
            return Err(Error::InvalidParameter);
        }
        Self::new(red, green, blue)
    }
}
