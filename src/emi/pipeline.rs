use std::f64::consts::{PI, SQRT_2};

use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

use super::conductor::Position;
use super::error::{ensure_finite, ensure_positive, EmiError, EmiResult};
use super::frequency::Frequency;
use super::soil::SoilModel;
use super::struve::struve_bessel_approx;
use crate::constants::{earth_return_coefficient, EPSILON_0, MU_0};
use crate::material_db::PipeMaterial;

/// 압출 폴리에틸렌 피복의 대표 저항률 [Ω·m]
pub const DEFAULT_COATING_RESISTIVITY_OHM_M: f64 = 1e8;
/// 압출 폴리에틸렌 피복의 대표 상대 유전율
pub const DEFAULT_COATING_PERMITTIVITY: f64 = 2.3;

/// 매설 배관의 형상과 재질.
///
/// 전기 정수(자기 임피던스, 어드미턴스, 특성 임피던스, 전파 상수)는 저장하지 않고
/// 대지 모델과 주파수를 받아 호출할 때마다 계산한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    position: Position,
    outer_diameter_m: f64,
    wall_thickness_m: f64,
    coating_thickness_m: f64,
    material: PipeMaterial,
    coating_resistivity_ohm_m: f64,
    coating_permittivity: f64,
}

/// 배관의 분포 정수 묶음. 보고서에 그대로 실린다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineParameters {
    pub self_impedance_ohm_per_m: Complex64,
    pub admittance_s_per_m: Complex64,
    pub characteristic_impedance_ohm: Complex64,
    pub propagation_constant_per_m: Complex64,
    /// 1/Re(γ). Re(γ) ≤ 0 이면 무한대.
    pub characteristic_length_m: f64,
}

impl Pipeline {
    pub fn new(
        position: Position,
        outer_diameter_m: f64,
        wall_thickness_m: f64,
        coating_thickness_m: f64,
        material: PipeMaterial,
    ) -> EmiResult<Self> {
        position.validate("배관 좌표")?;
        if position.z >= 0.0 {
            return Err(EmiError::Domain(format!(
                "배관은 매설되어 있어야 합니다 (z < 0, 입력: {})",
                position.z
            )));
        }
        ensure_positive("배관 외경", outer_diameter_m)?;
        ensure_positive("배관 두께", wall_thickness_m)?;
        ensure_positive("피복 두께", coating_thickness_m)?;
        if wall_thickness_m >= outer_diameter_m / 2.0 {
            return Err(EmiError::Domain(format!(
                "배관 두께 {wall_thickness_m} m 가 외측 반지름 {} m 이상입니다",
                outer_diameter_m / 2.0
            )));
        }
        Ok(Self {
            position,
            outer_diameter_m,
            wall_thickness_m,
            coating_thickness_m,
            material,
            coating_resistivity_ohm_m: DEFAULT_COATING_RESISTIVITY_OHM_M,
            coating_permittivity: DEFAULT_COATING_PERMITTIVITY,
        })
    }

    /// 피복의 저항률/유전율을 바꾼 새 배관을 만든다.
    pub fn with_coating_dielectric(
        &self,
        coating_resistivity_ohm_m: f64,
        coating_permittivity: f64,
    ) -> EmiResult<Self> {
        ensure_positive("피복 저항률", coating_resistivity_ohm_m)?;
        ensure_positive("피복 상대 유전율", coating_permittivity)?;
        Ok(Self {
            coating_resistivity_ohm_m,
            coating_permittivity,
            ..*self
        })
    }

    /// 수평 위치만 옮긴 독립된 배관 인스턴스. 이격 거리 스윕에 쓴다.
    pub fn at_separation(&self, x_m: f64) -> EmiResult<Self> {
        ensure_finite("배관 수평 위치", x_m)?;
        Ok(Self {
            position: Position {
                x: x_m,
                ..self.position
            },
            ..*self
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn material(&self) -> PipeMaterial {
        self.material
    }

    pub fn outer_diameter_m(&self) -> f64 {
        self.outer_diameter_m
    }

    pub fn wall_thickness_m(&self) -> f64 {
        self.wall_thickness_m
    }

    pub fn coating_thickness_m(&self) -> f64 {
        self.coating_thickness_m
    }

    pub fn outer_radius_m(&self) -> f64 {
        self.outer_diameter_m / 2.0
    }

    pub fn inner_radius_m(&self) -> f64 {
        self.outer_radius_m() - self.wall_thickness_m
    }

    /// 매설 깊이 |z| [m]
    pub fn burial_depth_m(&self) -> f64 {
        self.position.z.abs()
    }

    /// 관형 도체의 기하 평균 반지름 [m]
    ///
    /// ln(GMR) = ln(r_o) − (r_o⁴ − r_i²·r_o² + r_i⁴·(3/4 + ln(r_i/r_o))) / (r_o² − r_i²)²
    pub fn geometric_mean_radius_m(&self) -> f64 {
        let ro = self.outer_radius_m();
        let ri = self.inner_radius_m();
        let ro2 = ro * ro;
        let ri2 = ri * ri;
        let correction =
            (ro2 * ro2 - ri2 * ro2 + ri2 * ri2 * (0.75 + (ri / ro).ln())) / (ro2 - ri2).powi(2);
        (ro.ln() - correction).exp()
    }

    /// 표피효과를 고려한 관 내부 임피던스 [Ω/m]. 실수부와 허수부가 같다.
    pub fn internal_impedance(&self, frequency: Frequency) -> Complex64 {
        let rho = self.material.resistivity_ohm_m();
        let mu = self.material.relative_permeability() * MU_0;
        let magnitude =
            (rho * mu * frequency.omega()).sqrt() / (PI * self.outer_diameter_m * SQRT_2);
        Complex64::new(magnitude, magnitude)
    }

    /// 대지귀로 외부 임피던스 [Ω/m]: 완전도체 대지 항 + Carson 보정 항.
    pub fn external_impedance(&self, soil: &SoilModel, frequency: Frequency) -> Complex64 {
        let omega = frequency.omega();
        let coeff = Complex64::new(0.0, earth_return_coefficient(omega));
        let two_depth = 2.0 * self.burial_depth_m();

        let perfect_earth = coeff * (two_depth / self.geometric_mean_radius_m()).ln();

        let rho_eq = soil.equivalent_resistivity(frequency);
        let gamma = (Complex64::new(0.0, omega * MU_0 / rho_eq)).sqrt();
        let carson = coeff * struve_bessel_approx(gamma * two_depth);

        perfect_earth + carson
    }

    /// 자기 임피던스 Z [Ω/m]
    pub fn self_impedance(&self, soil: &SoilModel, frequency: Frequency) -> Complex64 {
        self.internal_impedance(frequency) + self.external_impedance(soil, frequency)
    }

    /// 피복을 통한 누설 컨덕턴스와 정전용량으로 이루어진 병렬 어드미턴스 Y [S/m]
    pub fn shunt_admittance(&self, frequency: Frequency) -> Complex64 {
        let perimeter = PI * self.outer_diameter_m;
        let conductance = perimeter / (self.coating_resistivity_ohm_m * self.coating_thickness_m);
        let capacitance = EPSILON_0 * self.coating_permittivity * perimeter / self.coating_thickness_m;
        Complex64::new(conductance, frequency.omega() * capacitance)
    }

    /// Zc = sqrt(Z/Y) [Ω]
    pub fn characteristic_impedance(&self, soil: &SoilModel, frequency: Frequency) -> Complex64 {
        (self.self_impedance(soil, frequency) / self.shunt_admittance(frequency)).sqrt()
    }

    /// γ = sqrt(Z·Y) [1/m]
    pub fn propagation_constant(&self, soil: &SoilModel, frequency: Frequency) -> Complex64 {
        (self.self_impedance(soil, frequency) * self.shunt_admittance(frequency)).sqrt()
    }

    /// 1/Re(γ) [m]
    pub fn characteristic_length_m(&self, soil: &SoilModel, frequency: Frequency) -> f64 {
        characteristic_length_m(self.propagation_constant(soil, frequency))
    }

    /// Z, Y를 한 번씩만 계산해 분포 정수 전체를 만든다.
    pub fn electrical_parameters(&self, soil: &SoilModel, frequency: Frequency) -> PipelineParameters {
        let z = self.self_impedance(soil, frequency);
        let y = self.shunt_admittance(frequency);
        let gamma = (z * y).sqrt();
        let params = PipelineParameters {
            self_impedance_ohm_per_m: z,
            admittance_s_per_m: y,
            characteristic_impedance_ohm: (z / y).sqrt(),
            propagation_constant_per_m: gamma,
            characteristic_length_m: characteristic_length_m(gamma),
        };
        debug!(
            z = %params.self_impedance_ohm_per_m,
            y = %params.admittance_s_per_m,
            zc = %params.characteristic_impedance_ohm,
            gamma = %params.propagation_constant_per_m,
            "pipeline parameters"
        );
        params
    }
}

/// 감쇠 정수 Re(γ)로부터 특성 길이를 구한다. Re(γ) ≤ 0 이면 `f64::INFINITY`.
pub fn characteristic_length_m(propagation_constant: Complex64) -> f64 {
    if propagation_constant.re > 0.0 {
        1.0 / propagation_constant.re
    } else {
        f64::INFINITY
    }
}
