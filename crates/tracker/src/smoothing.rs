//! Exponential cursor smoothing

use geometry::ScreenPoint;

/// Cursor position smoothed with an exponential moving average
///
/// Each update blends the previous position towards the new point by
/// `alpha`. The result depends on update order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSmoother {
    alpha: f64,
    position: ScreenPoint,
}

impl CursorSmoother {
    pub fn new(alpha: f64, start: ScreenPoint) -> Self {
        Self {
            alpha,
            position: start,
        }
    }

    /// Blend `raw` into the position and return the new position
    pub fn update(&mut self, raw: ScreenPoint) -> ScreenPoint {
        self.position = self.position.lerp(raw, self.alpha);
        self.position
    }

    /// Last smoothed position
    pub fn position(&self) -> ScreenPoint {
        self.position
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_is_alpha_of_the_way() {
        let mut smoother = CursorSmoother::new(0.15, ScreenPoint::new(0.0, 0.0));
        let p = smoother.update(ScreenPoint::new(100.0, 100.0));
        assert_eq!(p, ScreenPoint::new(15.0, 15.0));
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut smoother = CursorSmoother::new(0.15, ScreenPoint::new(0.0, 0.0));
        let target = ScreenPoint::new(100.0, 100.0);
        let mut previous = smoother.position();

        for _ in 0..10 {
            let p = smoother.update(target);
            assert!(p.x > previous.x && p.y > previous.y);
            assert!(p.x <= 100.0 && p.y <= 100.0);
            previous = p;
        }
        // 100 * (1 - 0.85^10)
        assert!((previous.x - 80.312_559_7).abs() < 1e-4);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let raws = [
            ScreenPoint::new(10.0, 500.0),
            ScreenPoint::new(900.0, 20.0),
            ScreenPoint::new(400.0, 400.0),
        ];
        let run = || {
            let mut s = CursorSmoother::new(0.15, ScreenPoint::new(960.0, 540.0));
            raws.iter().map(|&r| s.update(r)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
