//! Carson 적분 폐형해에 들어가는 Struve/Bessel 조합의 구간별 근사.
//!
//! 정확한 특수함수가 아니라 실무용 근사식이다. 두 식은 |u| = 0.1에서
//! 연속이 아니다(약 0.575의 도약).

use std::f64::consts::PI;

use num_complex::Complex64;

/// 급수 전개 구간의 상한 |u|
pub const SMALL_ARGUMENT_THRESHOLD: f64 = 0.1;

/// SB(u) 근사.
///
/// - |u| < 0.1: (2/π)·(1 − u²/8 + u⁴/192)
/// - 그 외:     (2/π)·(1 − exp(−|u|)·cos(arg u))
pub fn struve_bessel_approx(u: Complex64) -> Complex64 {
    let scale = 2.0 / PI;
    let modulus = u.norm();
    if modulus < SMALL_ARGUMENT_THRESHOLD {
        let u2 = u * u;
        (Complex64::new(1.0, 0.0) - u2 / 8.0 + u2 * u2 / 192.0) * scale
    } else {
        Complex64::new(scale * (1.0 - (-modulus).exp() * u.arg().cos()), 0.0)
    }
}
