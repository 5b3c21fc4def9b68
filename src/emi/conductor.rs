use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, ensure_positive, EmiError, EmiResult};

/// 좌표 [m]. x는 수평 위치, y는 가공선의 지상 높이, z는 깊이 방향
/// (매설 배관은 음수, 가공선은 0 또는 양수).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub(crate) fn validate(&self, label: &str) -> EmiResult<()> {
        ensure_finite(&format!("{label} x"), self.x)?;
        ensure_finite(&format!("{label} y"), self.y)?;
        ensure_finite(&format!("{label} z"), self.z)
    }
}

/// 가공선 도체의 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductorRole {
    #[default]
    Phase,
    Neutral,
    Guard,
}

/// 송전선로의 가공 도체 한 가닥.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conductor {
    position: Position,
    current: Complex64,
    radius_m: f64,
    role: ConductorRole,
}

impl Conductor {
    pub fn new(
        position: Position,
        current: Complex64,
        radius_m: f64,
        role: ConductorRole,
    ) -> EmiResult<Self> {
        position.validate("도체 좌표")?;
        if position.y < 0.0 || position.z < 0.0 {
            return Err(EmiError::Domain(format!(
                "가공 도체는 지표 위에 있어야 합니다 (y={}, z={})",
                position.y, position.z
            )));
        }
        ensure_finite("도체 전류 실수부", current.re)?;
        ensure_finite("도체 전류 허수부", current.im)?;
        ensure_positive("도체 반지름", radius_m)?;
        Ok(Self {
            position,
            current,
            radius_m,
            role,
        })
    }

    /// 전류를 크기 [A]와 위상각 [deg]으로 받는다.
    pub fn from_polar(
        position: Position,
        current_a: f64,
        angle_deg: f64,
        radius_m: f64,
        role: ConductorRole,
    ) -> EmiResult<Self> {
        let current = Complex64::from_polar(current_a, angle_deg.to_radians());
        Self::new(position, current, radius_m, role)
    }

    /// 전류만 바꾼 복사본.
    pub fn with_current(&self, current: Complex64) -> EmiResult<Self> {
        Self::new(self.position, current, self.radius_m, self.role)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current(&self) -> Complex64 {
        self.current
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn role(&self) -> ConductorRole {
        self.role
    }

    /// 지상 높이 [m]
    pub fn height_m(&self) -> f64 {
        self.position.y
    }
}
