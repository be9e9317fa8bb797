use std::str::FromStr;

/// Multiplier applied to a backend's base speaking rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedFactor(f32);

impl SpeedFactor {
    pub const NORMAL: SpeedFactor = SpeedFactor(1.0);

    pub fn new(value: f32) -> Result<Self, String> {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("Speed must be a positive number, got {}", value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn is_normal(&self) -> bool {
        (self.0 - 1.0).abs() < f32::EPSILON
    }

    /// Value restricted to what a provider accepts
    pub fn clamped(&self, min: f32, max: f32) -> f32 {
        self.0.clamp(min, max)
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl FromStr for SpeedFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| format!("Speed must be a number, got '{}'", s.trim()))?;
        Self::new(value)
    }
}

impl std::fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
