/// Scroll offset animation sampled by the adapter's frame clock.
///
/// Offsets are list scroll offsets in pixels; samples are rounded to the nearest pixel so a
/// finished tween always lands exactly on `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: i32,
    pub to: i32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: i32, to: i32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Signed distance covered by the whole animation.
    pub fn distance(&self) -> i32 {
        self.to - self.from
    }

    /// Linear time progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).min(1.0)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        self.duration_ms.saturating_sub(elapsed)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) == 0
    }

    pub fn sample(&self, now_ms: u64) -> i32 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let eased = self.easing.sample(self.progress(now_ms));
        self.from + round_px(self.distance() as f32 * eased)
    }

    /// Redirects a running animation from wherever it currently is.
    pub fn retarget(&mut self, now_ms: u64, new_to: i32, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

fn round_px(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// Symmetric cubic ease for user-requested jumps (e.g. tapping the peeking card).
    EaseInOutCubic,
    /// Fast start, gentle landing; the default for snap corrections.
    DecelerateQuad,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::DecelerateQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
