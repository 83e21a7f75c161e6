use crate::config::DiamondSquareConfig;

// Displacement magnitude across iterations.
// Multiplicative then subtractive decay, held constant during free steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceSchedule {
    current: f64,
    smoothing: f64,
    decrement: f64,
    floor: f64,
    free_steps: u32,
}

impl VarianceSchedule {
    pub fn new(initial: f64, smoothing: f64, decrement: f64, floor: f64) -> Self {
        Self {
            current: initial,
            smoothing,
            decrement,
            floor,
            free_steps: 0,
        }
    }

    pub fn from_config(config: &DiamondSquareConfig) -> Self {
        Self::new(
            config.variance,
            config.smoothing,
            config.variance_decrement,
            config.variance_floor,
        )
        .with_free_steps(config.free_steps)
    }

    pub fn with_free_steps(mut self, free_steps: u32) -> Self {
        self.free_steps = free_steps;
        self
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    // Integer bound for this iteration's displacement, truncated toward zero
    #[inline]
    pub fn spread(&self) -> i32 {
        self.current as i32
    }

    #[inline]
    pub fn in_free_step(&self) -> bool {
        self.free_steps > 0
    }

    #[inline]
    pub fn free_steps_left(&self) -> u32 {
        self.free_steps
    }

    // Called once after each square+diamond iteration
    pub fn end_iteration(&mut self) {
        if self.free_steps > 0 {
            self.free_steps -= 1;
            return;
        }
        if self.current > 0.0 {
            self.current = self.current * self.smoothing - self.decrement;
        }
        if self.current < 1.0 {
            self.current = self.floor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VarianceSchedule;
    use crate::DiamondSquareConfig;

    #[test]
    fn decay_is_multiply_then_subtract() {
        let mut s = VarianceSchedule::new(100.0, 0.5, 2.0, 0.0);
        s.end_iteration();
        assert_eq!(s.current(), 48.0);
        s.end_iteration();
        assert_eq!(s.current(), 22.0);
    }

    #[test]
    fn decay_bottoms_out_at_floor() {
        let mut s = VarianceSchedule::new(3.0, 0.5, 1.0, 0.0);
        s.end_iteration(); // 0.5 -> snaps to floor
        assert_eq!(s.current(), 0.0);
        s.end_iteration();
        assert_eq!(s.current(), 0.0);

        let mut s = VarianceSchedule::new(3.0, 0.5, 1.0, 1.0);
        s.end_iteration();
        assert_eq!(s.current(), 1.0);
        s.end_iteration();
        assert_eq!(s.current(), 1.0);
        assert_eq!(s.spread(), 1);
    }

    #[test]
    fn free_steps_hold_variance() {
        let mut s = VarianceSchedule::new(200.0, 0.5, 0.0, 0.0).with_free_steps(2);
        assert!(s.in_free_step());
        s.end_iteration();
        s.end_iteration();
        assert_eq!(s.current(), 200.0);
        assert!(!s.in_free_step());
        s.end_iteration();
        assert_eq!(s.current(), 100.0);
    }

    #[test]
    fn spread_truncates() {
        let s = VarianceSchedule::new(12.9, 1.0, 0.0, 0.0);
        assert_eq!(s.spread(), 12);
    }

    #[test]
    fn from_config_copies_settings() {
        let mut c = DiamondSquareConfig::custom_range(500);
        c.free_steps = 3;
        let s = VarianceSchedule::from_config(&c);
        assert_eq!(s.current(), 250.0);
        assert_eq!(s.free_steps_left(), 3);
    }
}
