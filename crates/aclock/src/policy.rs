//! Hand-angle conventions.
//!
//! Angles are radians internally and positive clockwise from 12 o'clock.
//! Degrees exist only for display.

use std::f64::consts::TAU;
use std::fmt;

use aclock_engine::render::shapes::polygon::Shape;
use clap::ValueEnum;

/// Rotation of a hand, clockwise from the 12 o'clock position.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Angle {
    radians: f32,
}

impl Angle {
    pub const ZERO: Angle = Angle { radians: 0.0 };

    /// `turns` full revolutions (1.0 = 360°).
    pub fn from_turns(turns: f64) -> Self {
        Self {
            radians: (turns * TAU) as f32,
        }
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    pub fn radians(self) -> f32 {
        self.radians
    }

    pub fn degrees(self) -> f32 {
        self.radians.to_degrees()
    }

    pub fn display(self, unit: AngleUnit) -> AngleDisplay {
        AngleDisplay { angle: self, unit }
    }
}

/// Unit used when angles are shown in logs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

pub struct AngleDisplay {
    angle: Angle,
    unit: AngleUnit,
}

impl fmt::Display for AngleDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AngleUnit::Degrees => write!(f, "{:.2}°", self.angle.degrees()),
            AngleUnit::Radians => write!(f, "{:.4} rad", self.angle.radians()),
        }
    }
}

/// Hours per revolution of the hour hand.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum Dial {
    #[default]
    #[value(name = "12")]
    Twelve,
    #[value(name = "24")]
    TwentyFour,
}

impl Dial {
    pub fn hours(self) -> u32 {
        match self {
            Dial::Twelve => 12,
            Dial::TwentyFour => 24,
        }
    }
}

/// Whether a hand moves continuously or jumps once per unit.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum HandMotion {
    /// Smaller units contribute, so the hand glides.
    #[default]
    Sweep,
    /// Only whole units count.
    Step,
}

/// How both hand angles are derived from a time of day.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HandPolicy {
    pub dial: Dial,
    pub hour_hand: HandMotion,
    pub minute_hand: HandMotion,
}

/// Primitive each hand is drawn with.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum HandShape {
    #[default]
    Triangle,
    Quad,
}

impl From<HandShape> for Shape {
    fn from(s: HandShape) -> Self {
        match s {
            HandShape::Triangle => Shape::Triangle,
            HandShape::Quad => Shape::Quad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_turn_is_ninety_degrees() {
        assert_abs_diff_eq!(Angle::from_turns(0.25).degrees(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn degrees_round_trip_through_radians() {
        assert_abs_diff_eq!(Angle::from_degrees(180.0).radians(), std::f32::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn display_uses_requested_unit() {
        let a = Angle::from_turns(0.5);
        assert_eq!(a.display(AngleUnit::Degrees).to_string(), "180.00°");
        assert_eq!(a.display(AngleUnit::Radians).to_string(), "3.1416 rad");
    }

    #[test]
    fn dial_hours() {
        assert_eq!(Dial::Twelve.hours(), 12);
        assert_eq!(Dial::TwentyFour.hours(), 24);
    }

    #[test]
    fn default_policy_sweeps_on_a_twelve_hour_dial() {
        let p = HandPolicy::default();
        assert_eq!(p.dial, Dial::Twelve);
        assert_eq!(p.hour_hand, HandMotion::Sweep);
        assert_eq!(p.minute_hand, HandMotion::Sweep);
    }
}
