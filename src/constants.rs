//! 전자기 결합 계산에 공통으로 쓰이는 물리 상수.

use std::f64::consts::PI;

/// 진공 투자율 μ0 [H/m]
pub const MU_0: f64 = 4.0 * PI * 1e-7;

/// 진공 유전율 ε0 [F/m]
pub const EPSILON_0: f64 = 8.854_187_817e-12;

/// 전력 계통 기본 주파수 [Hz]
pub const DEFAULT_FREQUENCY_HZ: f64 = 60.0;

/// ωμ0/(2π). 대지귀로 임피던스 항들의 공통 계수.
pub fn earth_return_coefficient(omega: f64) -> f64 {
    omega * MU_0 / (2.0 * PI)
}
