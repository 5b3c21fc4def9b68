use std::f64::consts::PI;

use super::error::{ensure_positive, EmiResult};
use crate::constants::DEFAULT_FREQUENCY_HZ;

/// 해석 주파수. 모든 유도 계산에 명시적으로 전달된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    hertz: f64,
}

impl Frequency {
    /// 0 이하 또는 유한하지 않은 주파수는 거부한다.
    pub fn new(hertz: f64) -> EmiResult<Self> {
        ensure_positive("주파수", hertz)?;
        Ok(Self { hertz })
    }

    pub fn hertz(self) -> f64 {
        self.hertz
    }

    /// 각주파수 ω = 2πf [rad/s]
    pub fn omega(self) -> f64 {
        2.0 * PI * self.hertz
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self {
            hertz: DEFAULT_FREQUENCY_HZ,
        }
    }
}
