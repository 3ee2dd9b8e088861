use glam::Vec2;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub bullet_speed: f32,
    pub bullet_lifetime_ms: f32,
    pub bullet_damage: i32,

    pub max_health: i32,

    pub muzzle_offset: Vec2,

    // Vertical drift below this is not reported as movement.
    pub y_tolerance: f32,

    pub pickup_spawns: Vec<Vec2>,

    pub health_bar: HealthBarConfig,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            bullet_speed: 700.0,
            bullet_lifetime_ms: 900.0,
            bullet_damage: 10,

            max_health: 100,

            muzzle_offset: Vec2::new(10.0, 3.0),

            y_tolerance: 0.0005,

            pickup_spawns: vec![Vec2::new(100.0, 100.0), Vec2::new(900.0, 100.0)],

            health_bar: HealthBarConfig::default(),
        }
    }
}

impl TuningConfig {
    pub fn bullet_speed_per_ms(&self) -> f32 {
        self.bullet_speed / 1000.0
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HealthBarConfig {
    pub full_width: f32,
    pub width_per_point: f32,
    pub local_x: f32,
    pub opponent_x: f32,
}

impl Default for HealthBarConfig {
    fn default() -> Self {
        Self {
            full_width: 138.0,
            width_per_point: 1.38,
            local_x: 100.0,
            opponent_x: 967.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config: TuningConfig =
            serde_json::from_str(r#"{ "bullet_damage": 25, "max_health": 50 }"#).unwrap();

        assert_eq!(config.bullet_damage, 25);
        assert_eq!(config.max_health, 50);
        assert_eq!(config.bullet_speed, 700.0);
        assert_eq!(config.pickup_spawns.len(), 2);
        assert_eq!(config.health_bar.full_width, 138.0);
    }

    #[test]
    fn speed_is_per_millisecond() {
        let config = TuningConfig::default();
        assert!((config.bullet_speed_per_ms() - 0.7).abs() < f32::EPSILON);
    }
}
