use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::conductor::Conductor;
use super::error::{EmiError, EmiResult};
use super::frequency::Frequency;
use super::pipeline::Pipeline;
use super::soil::SoilModel;
use super::struve::struve_bessel_approx;
use crate::constants::{earth_return_coefficient, EPSILON_0, MU_0};

/// 상호 임피던스 계산 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingMode {
    /// Carson 적분의 Theodoulidis 폐형해
    #[default]
    ClosedForm,
    /// 단순 Carson-Clem 근사. 빠른 검토용.
    Approximate,
}

/// 도체와 배관 사이의 기하 정보 [m].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouplingGeometry {
    /// 도체 → 배관 실제 위치
    pub direct_m: f64,
    /// 도체 → 지표면에 대해 뒤집은 배관 영상
    pub image_m: f64,
    /// H = 도체 높이 + 매설 깊이
    pub height_sum_m: f64,
    /// D' = 배관 x − 도체 x
    pub horizontal_m: f64,
    /// 두 좌표 사이의 3차원 직선 거리. 근사 방식에서 쓴다.
    pub straight_line_m: f64,
}

impl CouplingGeometry {
    pub fn between(conductor: &Conductor, pipeline: &Pipeline) -> Self {
        let c = conductor.position();
        let p = pipeline.position();
        let dx = p.x - c.x;
        // 거리는 도체 반지름 미만으로 내려가지 않는다.
        let floor = conductor.radius_m();
        Self {
            direct_m: dx.hypot(c.y - p.z).max(floor),
            image_m: dx.hypot(c.y + p.z).max(floor),
            height_sum_m: c.y + pipeline.burial_depth_m(),
            horizontal_m: dx,
            straight_line_m: (dx * dx + (c.y - p.y).powi(2) + (c.z - p.z).powi(2))
                .sqrt()
                .max(floor),
        }
    }
}

/// 가공 도체 묶음과 공유 대지 모델.
#[derive(Debug, Clone)]
pub struct TransmissionLine<'s> {
    conductors: Vec<Conductor>,
    soil: &'s SoilModel,
}

impl<'s> TransmissionLine<'s> {
    /// 도체가 하나도 없으면 거부한다.
    pub fn new(conductors: Vec<Conductor>, soil: &'s SoilModel) -> EmiResult<Self> {
        if conductors.is_empty() {
            return Err(EmiError::Domain(
                "송전선로에는 도체가 최소 1개 있어야 합니다".into(),
            ));
        }
        Ok(Self { conductors, soil })
    }

    pub fn conductors(&self) -> &[Conductor] {
        &self.conductors
    }

    pub fn soil(&self) -> &'s SoilModel {
        self.soil
    }

    /// 모든 도체 전류에 실수 배율을 곱한 새 선로.
    pub fn with_scaled_currents(&self, factor: f64) -> EmiResult<TransmissionLine<'s>> {
        let conductors = self
            .conductors
            .iter()
            .map(|c| c.with_current(c.current() * factor))
            .collect::<EmiResult<Vec<_>>>()?;
        TransmissionLine::new(conductors, self.soil)
    }

    /// 지정한 방식으로 도체-배관 상호 임피던스 [Ω/m]를 계산한다.
    pub fn coupling_impedance(
        &self,
        conductor: &Conductor,
        pipeline: &Pipeline,
        frequency: Frequency,
        mode: CouplingMode,
    ) -> Complex64 {
        match mode {
            CouplingMode::ClosedForm => self.mutual_impedance(conductor, pipeline, frequency),
            CouplingMode::Approximate => {
                self.approximate_mutual_impedance(conductor, pipeline, frequency)
            }
        }
    }

    /// Carson 적분 폐형해(Theodoulidis)에 의한 상호 임피던스 [Ω/m].
    ///
    /// Z' = jωμ0/(2π)·ln(D_ij'/D_ij),
    /// Z'' = jωμ0/(2π)·Σ_{u∈{u1,u2}} [(π/(2u))·SB(u) − 1/u²],
    /// u1,2 = γ(H ∓ jD'), γ = sqrt(jωμ0/ρ_eq − ω²μ0ε0εr)
    pub fn mutual_impedance(
        &self,
        conductor: &Conductor,
        pipeline: &Pipeline,
        frequency: Frequency,
    ) -> Complex64 {
        let omega = frequency.omega();
        let coeff = Complex64::new(0.0, earth_return_coefficient(omega));
        let geo = CouplingGeometry::between(conductor, pipeline);

        let perfect_earth = coeff * (geo.image_m / geo.direct_m).ln();

        let gamma = self.soil_propagation_constant(frequency);
        let u1 = gamma * Complex64::new(geo.height_sum_m, -geo.horizontal_m);
        let u2 = gamma * Complex64::new(geo.height_sum_m, geo.horizontal_m);
        let carson = coeff * (carson_term(u1) + carson_term(u2));

        perfect_earth + carson
    }

    /// Carson-Clem 근사 상호 임피던스 [Ω/m].
    ///
    /// Re = μ0ω/8, Im = μ0ω/(2π)·ln(1/(D·sqrt(ωμ0/ρ_eq))), D는 3차원 직선 거리
    pub fn approximate_mutual_impedance(
        &self,
        conductor: &Conductor,
        pipeline: &Pipeline,
        frequency: Frequency,
    ) -> Complex64 {
        let omega = frequency.omega();
        let rho_eq = self.soil.equivalent_resistivity(frequency);
        let distance = CouplingGeometry::between(conductor, pipeline).straight_line_m;
        let re = MU_0 * omega / 8.0;
        let im =
            earth_return_coefficient(omega) * (1.0 / (distance * (omega * MU_0 / rho_eq).sqrt())).ln();
        Complex64::new(re, im)
    }

    /// 변위전류를 포함한 대지 전파 상수 γ [1/m]
    pub fn soil_propagation_constant(&self, frequency: Frequency) -> Complex64 {
        let omega = frequency.omega();
        let rho_eq = self.soil.equivalent_resistivity(frequency);
        Complex64::new(
            -omega * omega * MU_0 * EPSILON_0 * self.soil.relative_permittivity(),
            omega * MU_0 / rho_eq,
        )
        .sqrt()
    }
}

fn carson_term(u: Complex64) -> Complex64 {
    (PI / 2.0) / u * struve_bessel_approx(u) - (u * u).inv()
}
