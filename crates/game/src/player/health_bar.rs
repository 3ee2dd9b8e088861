use crate::config::HealthBarConfig;

/// Model of a health bar the visual layer draws. The bar is centred on `x`,
/// so losing width also moves the centre left to keep the left edge fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    pub x: f32,
    pub width: f32,
    width_per_point: f32,
}

impl HealthBar {
    pub fn new(x: f32, width: f32, width_per_point: f32) -> Self {
        Self {
            x,
            width,
            width_per_point,
        }
    }

    pub fn shrink(&mut self, points: i32) {
        if points <= 0 {
            return;
        }
        let lost = (points as f32 * self.width_per_point).min(self.width);
        self.width -= lost;
        self.x -= lost / 2.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBars {
    pub local: HealthBar,
    pub opponent: HealthBar,
}

impl HealthBars {
    pub fn new(config: &HealthBarConfig) -> Self {
        Self {
            local: HealthBar::new(config.local_x, config.full_width, config.width_per_point),
            opponent: HealthBar::new(
                config.opponent_x,
                config.full_width,
                config.width_per_point,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinks_per_point() {
        let mut bar = HealthBar::new(100.0, 138.0, 1.38);
        bar.shrink(10);

        assert!((bar.width - 124.2).abs() < 0.001);
        assert!((bar.x - 93.1).abs() < 0.001);
    }

    #[test]
    fn never_goes_negative() {
        let mut bar = HealthBar::new(100.0, 138.0, 1.38);
        for _ in 0..20 {
            bar.shrink(10);
        }
        assert!(bar.width.abs() < 0.001);

        let before = bar;
        bar.shrink(0);
        assert_eq!(bar, before);
    }
}
