//! The clock face: per-frame state machine driving the engine runtime.

use aclock_engine::coords::{Mat4, Viewport};
use aclock_engine::core::{App, AppControl, FrameCtx};
use aclock_engine::input::{InputEvent, Key};
use aclock_engine::paint::Color;
use aclock_engine::render::shapes::polygon::{Polygon, PolygonRenderer};
use aclock_engine::time::FrameTime;

use crate::hands::{compute_hand_transforms, hand_angles, HandTransforms};
use crate::policy::{AngleUnit, HandPolicy, HandShape};
use crate::time::{ClockTime, WallClock};

/// Appearance and behavior of the clock face.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    pub policy: HandPolicy,
    pub shape: HandShape,
    pub background: Color,
    pub hour_color: Color,
    pub minute_color: Color,
    /// Base window title; the current time is appended when
    /// `time_in_title` is set.
    pub title: String,
    pub time_in_title: bool,
    /// Unit used when hand angles are logged.
    pub angle_unit: AngleUnit,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            policy: HandPolicy::default(),
            shape: HandShape::default(),
            background: Color::BLACK,
            hour_color: Color::WHITE,
            minute_color: Color::from_srgb_u8(200, 200, 210, 255),
            title: "Analog Clock".to_string(),
            time_in_title: false,
            angle_unit: AngleUnit::default(),
        }
    }
}

/// Frames between two debug frame-rate lines.
const FRAME_REPORT_EVERY: u64 = 600;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClockState {
    Running,
    Terminated,
}

/// Drawable size in physical pixels, mutated only by resizes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
}

/// Everything one frame draws, derived from a single wall-clock reading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockFrame {
    pub time: ClockTime,
    pub transforms: HandTransforms,
}

/// Renders the two clock hands.
///
/// Owns its wall clock and the GPU renderer; nothing is shared outside the
/// render loop. GPU resources are created lazily on the first drawn frame.
pub struct ClockRenderer<C> {
    config: ClockConfig,
    clock: C,
    state: ClockState,
    window: WindowState,
    projection: Mat4,
    hands: PolygonRenderer,
    last_title: Option<String>,
    last_logged_minute: Option<(u32, u32)>,
}

impl<C: WallClock> ClockRenderer<C> {
    pub fn new(config: ClockConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            state: ClockState::Running,
            window: WindowState::default(),
            projection: Mat4::IDENTITY,
            hands: PolygonRenderer::new(),
            last_title: None,
            last_logged_minute: None,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Reads the wall clock and derives this frame's transforms.
    ///
    /// Returns `None` once terminated: no frame is drawn after a quit.
    pub fn next_frame(&mut self) -> Option<ClockFrame> {
        if self.state == ClockState::Terminated {
            return None;
        }

        let time = self.clock.now();
        self.log_angles(time);

        Some(ClockFrame {
            time,
            transforms: compute_hand_transforms(time, &self.config.policy),
        })
    }

    /// Updates the window size and the aspect-correct projection.
    ///
    /// A zero-sized window (minimized) keeps the previous projection.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized resize {width}x{height}");
            return;
        }

        self.window = WindowState { width, height };
        self.projection = Viewport::new(width as f32, height as f32).ortho_projection();
    }

    pub fn on_quit(&mut self) {
        if self.state == ClockState::Running {
            log::info!("clock stopped");
        }
        self.state = ClockState::Terminated;
    }

    /// Hand polygons for one frame, hour hand first so the minute hand draws
    /// on top.
    pub fn polygons(&self, transforms: &HandTransforms) -> [Polygon; 2] {
        let shape = self.config.shape.into();
        [
            Polygon {
                shape,
                transform: transforms.hour,
                color: self.config.hour_color,
            },
            Polygon {
                shape,
                transform: transforms.minute,
                color: self.config.minute_color,
            },
        ]
    }

    /// Clears the frame and draws both hands.
    pub fn render(&mut self, ctx: &mut FrameCtx<'_, '_>, transforms: &HandTransforms) -> AppControl {
        let polygons = self.polygons(transforms);
        let projection = self.projection;
        let renderer = &mut self.hands;

        ctx.render(self.config.background, |rctx, target| {
            renderer.render(rctx, target, projection, &polygons);
        })
    }

    /// Title to show for `time`, or `None` when it has not changed.
    pub fn title_update(&mut self, time: ClockTime) -> Option<String> {
        if !self.config.time_in_title {
            return None;
        }

        let title = format!("{} {:02}:{:02}", self.config.title, time.hour(), time.minute());
        if self.last_title.as_deref() == Some(title.as_str()) {
            return None;
        }
        self.last_title = Some(title.clone());
        Some(title)
    }

    fn log_angles(&mut self, time: ClockTime) {
        let key = (time.hour(), time.minute());
        if self.last_logged_minute == Some(key) || !log::log_enabled!(log::Level::Debug) {
            return;
        }
        self.last_logged_minute = Some(key);

        let angles = hand_angles(time, &self.config.policy);
        let unit = self.config.angle_unit;
        log::debug!(
            "{time}: hour {} minute {}",
            angles.hour.display(unit),
            angles.minute.display(unit)
        );
    }
}

fn frame_report(time: &FrameTime) -> Option<String> {
    (time.frame_index % FRAME_REPORT_EVERY == 0)
        .then(|| format!("frame {} ({:.1} fps)", time.frame_index, 1.0 / time.dt))
}

impl<C: WallClock> App for ClockRenderer<C> {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::Resized { width, height } => {
                self.on_resize(*width, *height);
                AppControl::Continue
            }
            InputEvent::CloseRequested => {
                self.on_quit();
                AppControl::Exit
            }
            ev if ev.is_key_press(Key::Escape) || ev.is_key_press(Key::Q) => {
                self.on_quit();
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Not every platform reports the initial size as a resize.
        let (width, height) = ctx.window.physical_size();
        if self.window != (WindowState { width, height }) {
            self.on_resize(width, height);
        }

        let Some(frame) = self.next_frame() else {
            return AppControl::Exit;
        };

        if let Some(report) = frame_report(&ctx.time) {
            log::debug!("{report}");
        }

        if let Some(title) = self.title_update(frame.time) {
            ctx.runtime.set_title(title);
        }

        self.render(ctx, &frame.transforms)
    }
}
