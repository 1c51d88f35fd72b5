//! Restartable opacity animation.

/// Animates a vector of per-point opacities toward a target.
///
/// Retargeting mid-flight starts the new animation from the values currently
/// on screen, so rapid filter changes never queue up.
#[derive(Debug, Clone)]
pub struct OpacityTransition {
    from: Vec<f32>,
    to: Vec<f32>,
    elapsed: f32,
    duration: f32,
}

impl OpacityTransition {
    /// `count` points at `initial` opacity, animating over `duration` seconds.
    pub fn new(count: usize, initial: f32, duration: f32) -> Self {
        Self {
            from: vec![initial; count],
            to: vec![initial; count],
            elapsed: duration.max(0.0),
            duration: duration.max(0.0),
        }
    }

    /// Start animating toward `targets`.
    pub fn retarget(&mut self, targets: Vec<f32>) {
        self.from = if targets.len() == self.to.len() {
            (0..targets.len()).map(|i| self.value(i)).collect()
        } else {
            targets.clone()
        };
        self.to = targets;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// True until the target is reached.
    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.to.len()
    }

    /// True when there are no points.
    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
    }

    /// Target opacity of point `i`.
    pub fn target(&self, i: usize) -> f32 {
        self.to.get(i).copied().unwrap_or(0.0)
    }

    /// Displayed opacity of point `i`.
    pub fn value(&self, i: usize) -> f32 {
        let (Some(from), Some(to)) = (self.from.get(i), self.to.get(i)) else {
            return 0.0;
        };
        if self.elapsed >= self.duration {
            return *to;
        }
        let t = ease_cubic_in_out(self.elapsed / self.duration);
        from + (to - from) * t
    }
}

fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
