use std::f64::consts::PI;

use super::error::{ensure_positive, EmiResult};
use super::frequency::Frequency;
use crate::constants::MU_0;

/// 2층 대지 모델.
///
/// 표층(1층)과 하부층(2층)의 저항률, 표층 두께, 상대 유전율을 담는다.
/// 생성 후 변경할 수 없으며, 파라미터 스윕은 새 인스턴스를 만들어 수행한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilModel {
    layer1_resistivity_ohm_m: f64,
    layer2_resistivity_ohm_m: f64,
    layer1_thickness_m: f64,
    relative_permittivity: f64,
}

impl SoilModel {
    pub fn new(
        layer1_resistivity_ohm_m: f64,
        layer2_resistivity_ohm_m: f64,
        layer1_thickness_m: f64,
        relative_permittivity: f64,
    ) -> EmiResult<Self> {
        ensure_positive("1층 저항률", layer1_resistivity_ohm_m)?;
        ensure_positive("2층 저항률", layer2_resistivity_ohm_m)?;
        ensure_positive("1층 두께", layer1_thickness_m)?;
        ensure_positive("대지 상대 유전율", relative_permittivity)?;
        Ok(Self {
            layer1_resistivity_ohm_m,
            layer2_resistivity_ohm_m,
            layer1_thickness_m,
            relative_permittivity,
        })
    }

    /// 균질 대지. 두 층의 저항률이 같으므로 표층 두께는 결과에 영향이 없다.
    pub fn homogeneous(resistivity_ohm_m: f64, relative_permittivity: f64) -> EmiResult<Self> {
        Self::new(resistivity_ohm_m, resistivity_ohm_m, 1.0, relative_permittivity)
    }

    /// 층 저항률만 바꾼 새 모델을 만든다. 두께와 유전율은 유지한다.
    pub fn with_layer_resistivities(&self, rho1_ohm_m: f64, rho2_ohm_m: f64) -> EmiResult<Self> {
        Self::new(
            rho1_ohm_m,
            rho2_ohm_m,
            self.layer1_thickness_m,
            self.relative_permittivity,
        )
    }

    pub fn layer1_resistivity_ohm_m(&self) -> f64 {
        self.layer1_resistivity_ohm_m
    }

    pub fn layer2_resistivity_ohm_m(&self) -> f64 {
        self.layer2_resistivity_ohm_m
    }

    pub fn layer1_thickness_m(&self) -> f64 {
        self.layer1_thickness_m
    }

    pub fn relative_permittivity(&self) -> f64 {
        self.relative_permittivity
    }

    /// 주파수 의존 등가 균질 저항률 [Ω·m] (Tsiamitros 2층 → 1층 환산).
    ///
    /// ρ_eq = ρ1 · ((a1+a2) + (a1−a2)k)² / ((a1+a2) − (a1−a2)k)²,
    /// a_i = sqrt(1/ρ_i), k = exp(−2·h1·sqrt(π f μ0 / ρ1))
    pub fn equivalent_resistivity(&self, frequency: Frequency) -> f64 {
        let rho1 = self.layer1_resistivity_ohm_m;
        let a1 = (1.0 / rho1).sqrt();
        let a2 = (1.0 / self.layer2_resistivity_ohm_m).sqrt();
        let k = (-2.0 * self.layer1_thickness_m * (PI * frequency.hertz() * MU_0 / rho1).sqrt())
            .exp();

        let numerator = (a1 + a2) + (a1 - a2) * k;
        let denominator = (a1 + a2) - (a1 - a2) * k;
        rho1 * (numerator / denominator).powi(2)
    }
}
