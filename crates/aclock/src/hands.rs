//! Hand angles and transforms.
//!
//! Hand-space geometry is a unit shape with its base centered on the origin
//! and its tip at `(0, 1)`. A hand transform maps it into normalized drawing
//! space, applied right to left:
//!
//! `fit · rotate(angle) · translate(0, -tail) · scale(width, length)`

use aclock_engine::coords::Mat4;

use crate::policy::{Angle, HandMotion, HandPolicy};
use crate::time::ClockTime;

/// Hour hand length, in hand units.
pub const HOUR_HAND_LENGTH: f32 = 7.5;

/// Minute hand length, in hand units.
pub const MINUTE_HAND_LENGTH: f32 = 10.0;

pub const HAND_WIDTH: f32 = 1.0;

/// How far each hand extends behind the pivot.
pub const HAND_TAIL: f32 = 0.5;

/// Uniform scale bringing the longest hand into [-1, 1].
pub fn fit_scale() -> f32 {
    1.0 / HOUR_HAND_LENGTH.max(MINUTE_HAND_LENGTH)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandAngles {
    pub hour: Angle,
    pub minute: Angle,
}

/// Per-frame transforms for both hands.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandTransforms {
    pub hour: Mat4,
    pub minute: Mat4,
}

/// Minutes into the hour, with seconds when the minute hand sweeps.
fn minutes_into_hour(t: ClockTime, motion: HandMotion) -> f64 {
    match motion {
        HandMotion::Sweep => t.minute() as f64 + t.seconds_f64() / 60.0,
        HandMotion::Step => t.minute() as f64,
    }
}

pub fn minute_angle(t: ClockTime, policy: &HandPolicy) -> Angle {
    Angle::from_turns(minutes_into_hour(t, policy.minute_hand) / 60.0)
}

pub fn hour_angle(t: ClockTime, policy: &HandPolicy) -> Angle {
    let hours = policy.dial.hours();
    let whole = (t.hour() % hours) as f64;
    let fraction = match policy.hour_hand {
        HandMotion::Sweep => minutes_into_hour(t, policy.minute_hand) / 60.0,
        HandMotion::Step => 0.0,
    };
    Angle::from_turns((whole + fraction) / hours as f64)
}

pub fn hand_angles(t: ClockTime, policy: &HandPolicy) -> HandAngles {
    HandAngles {
        hour: hour_angle(t, policy),
        minute: minute_angle(t, policy),
    }
}

/// Transform placing a hand of `length` at `angle`.
pub fn hand_transform(angle: Angle, length: f32) -> Mat4 {
    Mat4::uniform_scale(fit_scale())
        * Mat4::rotation_cw(angle.radians())
        * Mat4::translation(0.0, -HAND_TAIL)
        * Mat4::scale(HAND_WIDTH, length)
}

/// Derives both hand transforms from one wall-clock reading.
pub fn compute_hand_transforms(now: ClockTime, policy: &HandPolicy) -> HandTransforms {
    let angles = hand_angles(now, policy);
    HandTransforms {
        hour: hand_transform(angles.hour, HOUR_HAND_LENGTH),
        minute: hand_transform(angles.minute, MINUTE_HAND_LENGTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Dial;
    use aclock_engine::coords::Vec2;
    use approx::assert_abs_diff_eq;

    fn t(h: u32, m: u32, s: u32) -> ClockTime {
        ClockTime::new(h, m, s).unwrap()
    }

    fn policy(dial: Dial, hour_hand: HandMotion, minute_hand: HandMotion) -> HandPolicy {
        HandPolicy { dial, hour_hand, minute_hand }
    }

    fn tip(m: &Mat4) -> Vec2 {
        m.transform_point(Vec2::new(0.0, 1.0))
    }

    // ── angles ────────────────────────────────────────────────────────────

    #[test]
    fn midnight_points_both_hands_up() {
        let a = hand_angles(t(0, 0, 0), &HandPolicy::default());
        assert_eq!(a.hour, Angle::ZERO);
        assert_eq!(a.minute, Angle::ZERO);
    }

    #[test]
    fn three_oclock_is_a_quarter_turn() {
        let a = hour_angle(t(3, 0, 0), &HandPolicy::default());
        assert_abs_diff_eq!(a.degrees(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn afternoon_hours_wrap_on_a_twelve_hour_dial() {
        let p = HandPolicy::default();
        assert_eq!(hour_angle(t(15, 0, 0), &p), hour_angle(t(3, 0, 0), &p));
    }

    #[test]
    fn half_past_points_down() {
        let a = minute_angle(t(7, 30, 0), &HandPolicy::default());
        assert_abs_diff_eq!(a.degrees(), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn hour_hand_moves_with_minutes() {
        let a = hour_angle(t(3, 30, 0), &HandPolicy::default());
        assert_abs_diff_eq!(a.degrees(), 105.0, epsilon = 1e-4);
    }

    #[test]
    fn stepped_hour_hand_ignores_minutes() {
        let p = policy(Dial::Twelve, HandMotion::Step, HandMotion::Sweep);
        assert_abs_diff_eq!(hour_angle(t(3, 59, 59), &p).degrees(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn stepped_minute_hand_ignores_seconds() {
        let p = policy(Dial::Twelve, HandMotion::Sweep, HandMotion::Step);
        assert_eq!(minute_angle(t(1, 15, 0), &p), minute_angle(t(1, 15, 59), &p));
        assert_abs_diff_eq!(minute_angle(t(1, 15, 59), &p).degrees(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn twenty_four_hour_dial_halves_the_rate() {
        let p = policy(Dial::TwentyFour, HandMotion::Sweep, HandMotion::Sweep);
        assert_abs_diff_eq!(hour_angle(t(6, 0, 0), &p).degrees(), 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hour_angle(t(18, 0, 0), &p).degrees(), 270.0, epsilon = 1e-4);
    }

    #[test]
    fn minute_hand_strictly_increases_through_the_minute() {
        let p = HandPolicy::default();
        for s in 0..59 {
            let a = minute_angle(t(10, 20, s), &p);
            let b = minute_angle(t(10, 20, s + 1), &p);
            assert!(b > a, "second {s}: {a:?} !< {b:?}");
        }
    }

    #[test]
    fn minute_hand_is_continuous_across_the_minute_boundary() {
        let p = HandPolicy::default();
        let end = minute_angle(t(10, 20, 59).with_nanos(999_999_999), &p);
        let next = minute_angle(t(10, 21, 0), &p);
        assert_abs_diff_eq!(end.degrees(), next.degrees(), epsilon = 1e-3);
    }

    #[test]
    fn sub_second_fraction_advances_the_minute_hand() {
        let p = HandPolicy::default();
        let a = minute_angle(t(4, 0, 10), &p);
        let b = minute_angle(t(4, 0, 10).with_nanos(500_000_000), &p);
        assert!(b > a);
    }

    #[test]
    fn hour_hand_strictly_increases_through_the_hour() {
        let p = HandPolicy::default();
        for m in 0..59 {
            let a = hour_angle(t(8, m, 0), &p);
            let b = hour_angle(t(8, m + 1, 0), &p);
            assert!(b > a, "minute {m}");
        }
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn midnight_tips_point_straight_up() {
        let hands = compute_hand_transforms(t(0, 0, 0), &HandPolicy::default());
        let hour = tip(&hands.hour);
        let minute = tip(&hands.minute);

        assert_abs_diff_eq!(hour.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(hour.y, (HOUR_HAND_LENGTH - HAND_TAIL) * fit_scale(), epsilon = 1e-6);
        assert_abs_diff_eq!(minute.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(minute.y, (MINUTE_HAND_LENGTH - HAND_TAIL) * fit_scale(), epsilon = 1e-6);
    }

    #[test]
    fn three_oclock_hour_tip_points_right() {
        let hands = compute_hand_transforms(t(3, 0, 0), &HandPolicy::default());
        let hour = tip(&hands.hour);
        assert!(hour.x > 0.0);
        assert_abs_diff_eq!(hour.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn base_straddles_the_pivot_behind_the_center() {
        let hands = compute_hand_transforms(t(0, 0, 0), &HandPolicy::default());
        let left = hands.minute.transform_point(Vec2::new(-0.5, 0.0));
        let right = hands.minute.transform_point(Vec2::new(0.5, 0.0));
        assert_abs_diff_eq!(left.x, -right.x, epsilon = 1e-6);
        assert_abs_diff_eq!(left.y, -HAND_TAIL * fit_scale(), epsilon = 1e-6);
    }

    #[test]
    fn minute_hand_is_longer_than_hour_hand() {
        let hands = compute_hand_transforms(t(5, 17, 42), &HandPolicy::default());
        assert!(tip(&hands.minute).length() > tip(&hands.hour).length());
    }

    #[test]
    fn every_hand_vertex_stays_inside_the_unit_disc() {
        let p = HandPolicy::default();
        let shape = [
            Vec2::new(-0.5, 0.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(0.5, 1.0),
            Vec2::new(-0.5, 1.0),
        ];
        let mut now = t(0, 0, 0);
        for _ in 0..(24 * 60 / 7) {
            let hands = compute_hand_transforms(now, &p);
            for m in [&hands.hour, &hands.minute] {
                for v in shape {
                    assert!(m.transform_point(v).length() <= 1.0, "{now} escapes the dial");
                }
            }
            now = now.plus_minutes(7);
        }
    }

    #[test]
    fn transforms_are_fresh_for_each_reading() {
        let p = HandPolicy::default();
        let a = compute_hand_transforms(t(1, 0, 0), &p);
        let b = compute_hand_transforms(t(1, 1, 0), &p);
        assert_ne!(a.minute, b.minute);
        assert_eq!(a, compute_hand_transforms(t(1, 0, 0), &p));
    }
}
