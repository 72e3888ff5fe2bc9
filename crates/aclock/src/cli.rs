//! Command-line options.

use std::time::Duration;

use aclock_engine::logging::LoggingConfig;
use aclock_engine::time::FramePacer;
use aclock_engine::window::RuntimeConfig;
use clap::Parser;
use winit::dpi::LogicalSize;

use crate::policy::{AngleUnit, Dial, HandMotion, HandPolicy, HandShape};
use crate::renderer::ClockConfig;
use crate::time::ClockTime;

/// Analog clock in a window.
#[derive(Debug, Parser)]
#[command(name = "aclock", version, about)]
pub struct Args {
    /// Window title.
    #[arg(long, default_value = "Analog Clock")]
    pub title: String,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Open the window without decorations.
    #[arg(long)]
    pub borderless: bool,

    /// Frames per second; 0 draws on every wakeup.
    #[arg(long, default_value_t = 60.0, value_parser = parse_fps)]
    pub fps: f32,

    /// Hours per hour-hand revolution.
    #[arg(long, value_enum, default_value_t)]
    pub dial: Dial,

    /// Whether seconds move the minute hand (sweep) or it jumps each minute (step).
    #[arg(long, value_enum, default_value_t)]
    pub minute_hand: HandMotion,

    /// Whether minutes move the hour hand (sweep) or it jumps each hour (step).
    #[arg(long, value_enum, default_value_t)]
    pub hour_hand: HandMotion,

    /// Primitive used for both hands.
    #[arg(long, value_enum, default_value_t)]
    pub shape: HandShape,

    /// Show a fixed time (HH:MM[:SS]) instead of the local clock.
    #[arg(long, value_name = "HH:MM[:SS]")]
    pub at: Option<ClockTime>,

    /// Log filter, e.g. `debug` or `aclock=trace,wgpu=warn`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Append the current time to the window title.
    #[arg(long)]
    pub time_in_title: bool,

    /// Unit for hand angles in debug logs.
    #[arg(long, value_enum, default_value_t)]
    pub angle_unit: AngleUnit,
}

fn parse_fps(s: &str) -> Result<f32, String> {
    let fps: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !fps.is_finite() || fps < 0.0 {
        return Err(format!("expected a non-negative number, got {s}"));
    }
    if fps > 0.0 && FramePacer::interval_for_fps(fps).is_none() {
        return Err(format!("{s} fps is too slow to schedule"));
    }
    Ok(fps)
}

impl Args {
    pub fn logging(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }

    pub fn frame_interval(&self) -> Option<Duration> {
        FramePacer::interval_for_fps(self.fps)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width as f64, self.height as f64),
            resizable: true,
            decorations: !self.borderless,
            frame_interval: self.frame_interval(),
        }
    }

    pub fn clock(&self) -> ClockConfig {
        ClockConfig {
            policy: HandPolicy {
                dial: self.dial,
                hour_hand: self.hour_hand,
                minute_hand: self.minute_hand,
            },
            shape: self.shape,
            title: self.title.clone(),
            time_in_title: self.time_in_title,
            angle_unit: self.angle_unit,
            ..ClockConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("aclock").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.title, "Analog Clock");
        assert_eq!((args.width, args.height), (640, 480));
        assert!(!args.borderless);
        assert_eq!(args.frame_interval(), FramePacer::interval_for_fps(60.0));
        assert_eq!(args.clock().policy, HandPolicy::default());
        assert_eq!(args.clock().shape, HandShape::Triangle);
        assert!(args.at.is_none());

        let runtime = args.runtime();
        assert!(runtime.decorations);
        assert!(runtime.resizable);
    }

    #[test]
    fn clock_options() {
        let args = parse(&[
            "--dial", "24", "--minute-hand", "step", "--hour-hand", "step", "--shape", "quad",
            "--angle-unit", "radians",
        ])
        .unwrap();

        let clock = args.clock();
        assert_eq!(clock.policy.dial, Dial::TwentyFour);
        assert_eq!(clock.policy.minute_hand, HandMotion::Step);
        assert_eq!(clock.policy.hour_hand, HandMotion::Step);
        assert_eq!(clock.shape, HandShape::Quad);
        assert_eq!(clock.angle_unit, AngleUnit::Radians);
    }

    #[test]
    fn window_options() {
        let args =
            parse(&["--borderless", "--width", "300", "--height", "200", "--title", "t"]).unwrap();
        let runtime = args.runtime();
        assert!(!runtime.decorations);
        assert_eq!(runtime.initial_size, LogicalSize::new(300.0, 200.0));
        assert_eq!(runtime.title, "t");
    }

    #[test]
    fn fixed_time() {
        let args = parse(&["--at", "03:30"]).unwrap();
        assert_eq!(args.at, ClockTime::new(3, 30, 0));
        assert!(parse(&["--at", "25:00"]).is_err());
    }

    #[test]
    fn zero_fps_is_unpaced() {
        let args = parse(&["--fps", "0"]).unwrap();
        assert_eq!(args.frame_interval(), None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--fps", "-1"]).is_err());
        assert!(parse(&["--fps", "nan"]).is_err());
        assert!(parse(&["--fps", "1e-20"]).is_err());
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--dial", "10"]).is_err());
    }

    #[test]
    fn hand_motion_flags_are_documented() {
        use clap::CommandFactory;

        let cmd = Args::command();
        for name in ["minute_hand", "hour_hand"] {
            let arg = cmd.get_arguments().find(|a| a.get_id() == name).unwrap();
            assert!(arg.get_help().is_some(), "--{name} has no help text");
        }
    }

    #[test]
    fn log_filter_is_explicit() {
        let args = parse(&["--log", "debug"]).unwrap();
        assert_eq!(args.logging().env_filter.as_deref(), Some("debug"));
    }
}
