//! Timed celebrations played after a strategy completes.

use super::Strategy;
use crate::body::Body;
use crate::error::TransitError;
use crate::math::{axis, VERTICAL_AXIS};

pub const JUMP_DEFAULT_TIME: f64 = 4.0;
pub const JUMP_DEFAULT_HEIGHT: f64 = 5.0;
pub const SPIN_DEFAULT_TIME: f64 = 5.0;
pub const SPIN_DEFAULT_RATE: f64 = 10.0;

/// The effect a [`Celebration`] plays each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CelebrationKind {
    /// Vertical bounce between 0 and `peak`
    Jump {
        peak: f64,
        height: f64,
        ascending: bool,
    },

    /// Heading rotation at `rate` radians per unit of travel
    Spin { rate: f64 },
}

/// Wraps a strategy and, once it completes, celebrates for `time` seconds.
///
/// Celebrations nest: `Celebration::spin(Box::new(Celebration::jump(..)))`
/// first runs the path, then the jump, then the spin.
#[derive(Debug)]
pub struct Celebration {
    inner: Box<dyn Strategy>,

    /// Seconds to celebrate for
    time: f64,

    /// Ticks left, fixed from `time` and the tick length on the first celebration tick
    ticks_left: Option<u64>,

    kind: CelebrationKind,
}

impl Celebration {
    pub fn jump(inner: Box<dyn Strategy>, time: f64, peak: f64) -> Self {
        Self {
            inner,
            time,
            ticks_left: None,
            kind: CelebrationKind::Jump {
                peak,
                height: 0.0,
                ascending: true,
            },
        }
    }

    pub fn spin(inner: Box<dyn Strategy>, time: f64, rate: f64) -> Self {
        Self {
            inner,
            time,
            ticks_left: None,
            kind: CelebrationKind::Spin { rate },
        }
    }

    pub fn jump_default(inner: Box<dyn Strategy>) -> Self {
        Self::jump(inner, JUMP_DEFAULT_TIME, JUMP_DEFAULT_HEIGHT)
    }

    pub fn spin_default(inner: Box<dyn Strategy>) -> Self {
        Self::spin(inner, SPIN_DEFAULT_TIME, SPIN_DEFAULT_RATE)
    }

    pub fn kind(&self) -> CelebrationKind {
        self.kind
    }

    /// `None` until the celebration has started.
    pub fn ticks_left(&self) -> Option<u64> {
        self.ticks_left
    }

    /// Current jump height, if this is a jump.
    pub fn height(&self) -> Option<f64> {
        match self.kind {
            CelebrationKind::Jump { height, .. } => Some(height),
            CelebrationKind::Spin { .. } => None,
        }
    }

    fn celebrate(&mut self, body: &mut Body, dt: f64) -> Result<(), TransitError> {
        match &mut self.kind {
            CelebrationKind::Jump {
                peak,
                height,
                ascending,
            } => {
                let step = body.speed * dt;
                let y = axis(&body.position, VERTICAL_AXIS)?;
                if *ascending {
                    let rise = step.min(*peak - *height).max(0.0);
                    *height += rise;
                    body.position[VERTICAL_AXIS] = y + rise;
                    if *height >= *peak {
                        *ascending = false;
                    }
                } else {
                    let fall = step.min(*height).max(0.0);
                    *height -= fall;
                    body.position[VERTICAL_AXIS] = y - fall;
                    if *height <= 0.0 {
                        *ascending = true;
                    }
                }
            }
            CelebrationKind::Spin { rate } => body.rotate(dt * body.speed * *rate),
        }
        Ok(())
    }
}

/// Whole ticks needed to cover `time` seconds at `dt` seconds per tick.
fn tick_budget(time: f64, dt: f64) -> u64 {
    if time <= 0.0 || dt <= 0.0 {
        return 0;
    }
    (time / dt).ceil() as u64
}

impl Strategy for Celebration {
    fn step(&mut self, body: &mut Body, dt: f64) -> Result<(), TransitError> {
        if !self.inner.is_completed() {
            self.inner.step(body, dt)?;
        } else if !self.is_completed() {
            let left = match self.ticks_left {
                Some(left) => left,
                None => tick_budget(self.time, dt),
            };
            if left > 0 {
                self.celebrate(body, dt)?;
            }
            self.ticks_left = Some(left.saturating_sub(1));
        }
        Ok(())
    }

    fn is_completed(&self) -> bool {
        if !self.inner.is_completed() {
            return false;
        }
        match self.ticks_left {
            Some(left) => left == 0,
            None => self.time <= 0.0,
        }
    }

    fn total_distance(&self) -> Result<f64, TransitError> {
        self.inner.total_distance()
    }
}
