use std::fmt;

use num_complex::Complex64;
use serde::Serialize;
use tracing::{debug, warn};

use super::conductor::ConductorRole;
use super::error::{ensure_positive, EmiResult};
use super::frequency::Frequency;
use super::pipeline::{Pipeline, PipelineParameters};
use super::transmission_line::{CouplingMode, TransmissionLine};
use crate::material_db::CoatingType;

/// 결함부 등가 원통 모델의 계수
const DEFECT_SHAPE_FACTOR: f64 = 0.3927;
/// 교류 부식 위험 경계 [A/m²]
const LOW_RISK_LIMIT_A_PER_M2: f64 = 20e-3;
const MODERATE_RISK_LIMIT_A_PER_M2: f64 = 100e-3;

/// 해석 설정. 피복 종류와 결함 반지름, 결합 계산 방식을 고른다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisOptions {
    pub coating_type: CoatingType,
    /// 피복 결함 반지름 [m]
    pub defect_radius_m: f64,
    pub coupling_mode: CouplingMode,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            coating_type: CoatingType::default(),
            defect_radius_m: 0.001,
            coupling_mode: CouplingMode::default(),
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> EmiResult<()> {
        ensure_positive("결함 반지름", self.defect_radius_m)
    }
}

/// 교류 부식 위험 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrosionRisk {
    Low,
    Moderate,
    High,
}

impl CorrosionRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrosionRisk::Low => "Low",
            CorrosionRisk::Moderate => "Moderate",
            CorrosionRisk::High => "High",
        }
    }
}

impl fmt::Display for CorrosionRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 교류 전류밀도 [A/m²]로 부식 위험을 분류한다. 경계값은 위 등급에 속한다.
pub fn classify_corrosion_risk(current_density_a_per_m2: f64) -> CorrosionRisk {
    if current_density_a_per_m2 < LOW_RISK_LIMIT_A_PER_M2 {
        CorrosionRisk::Low
    } else if current_density_a_per_m2 < MODERATE_RISK_LIMIT_A_PER_M2 {
        CorrosionRisk::Moderate
    } else {
        CorrosionRisk::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InducedVoltage {
    pub magnitude_v: f64,
    pub phase_deg: f64,
    pub complex: Complex64,
}

impl From<Complex64> for InducedVoltage {
    fn from(v: Complex64) -> Self {
        Self {
            magnitude_v: v.norm(),
            phase_deg: v.arg().to_degrees(),
            complex: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoatingSafety {
    pub coating_type: CoatingType,
    pub voltage_kv: f64,
    pub limit_kv: f64,
    pub is_safe: bool,
    /// limit / 전압. 전압이 0이면 무한대.
    pub safety_margin: f64,
}

/// 피복 절연 내력 대비 유도 전압을 평가한다.
pub fn evaluate_coating(induced_voltage: Complex64, coating_type: CoatingType) -> CoatingSafety {
    let voltage_kv = induced_voltage.norm() / 1000.0;
    let limit_kv = coating_type.withstand_kv();
    CoatingSafety {
        coating_type,
        voltage_kv,
        limit_kv,
        is_safe: voltage_kv <= limit_kv,
        safety_margin: limit_kv / voltage_kv,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyEvaluation {
    pub coating: CoatingSafety,
    pub ac_current_density_ma_per_m2: f64,
    pub corrosion_risk: CorrosionRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilSummary {
    pub equivalent_resistivity_ohm_m: f64,
}

/// 도체별 기여분.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConductorContribution {
    pub index: usize,
    pub role: ConductorRole,
    pub mutual_impedance_ohm_per_m: Complex64,
    pub voltage: Complex64,
}

/// 간섭 해석 보고서.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterferenceReport {
    pub frequency_hz: f64,
    pub exposure_length_m: f64,
    pub coupling_mode: CouplingMode,
    pub induced_voltage: InducedVoltage,
    pub contributions: Vec<ConductorContribution>,
    pub pipeline_parameters: PipelineParameters,
    pub safety: SafetyEvaluation,
    pub soil: SoilSummary,
    pub warnings: Vec<String>,
}

impl InterferenceReport {
    /// 입력 해석 단계(재질 대체 등)에서 생긴 경고를 앞에 붙인다.
    pub fn with_input_warnings(mut self, input_warnings: Vec<String>) -> Self {
        let mut warnings = input_warnings;
        warnings.append(&mut self.warnings);
        self.warnings = warnings;
        self
    }
}

/// 송전선로와 배관의 유도 간섭 해석. 두 입력을 빌려 쓰기만 하며 상태가 없다.
#[derive(Debug, Clone, Copy)]
pub struct InterferenceAnalysis<'a> {
    line: &'a TransmissionLine<'a>,
    pipeline: &'a Pipeline,
    exposure_length_m: f64,
    frequency: Frequency,
    options: AnalysisOptions,
}

impl<'a> InterferenceAnalysis<'a> {
    pub fn new(
        line: &'a TransmissionLine<'a>,
        pipeline: &'a Pipeline,
        exposure_length_m: f64,
    ) -> EmiResult<Self> {
        ensure_positive("노출 길이", exposure_length_m)?;
        Ok(Self {
            line,
            pipeline,
            exposure_length_m,
            frequency: Frequency::default(),
            options: AnalysisOptions::default(),
        })
    }

    pub fn with_frequency(self, frequency: Frequency) -> Self {
        Self { frequency, ..self }
    }

    pub fn with_options(self, options: AnalysisOptions) -> EmiResult<Self> {
        options.validate()?;
        Ok(Self { options, ..self })
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn options(&self) -> AnalysisOptions {
        self.options
    }

    pub fn exposure_length_m(&self) -> f64 {
        self.exposure_length_m
    }

    pub fn conductor_contributions(&self) -> Vec<ConductorContribution> {
        self.line
            .conductors()
            .iter()
            .enumerate()
            .map(|(index, conductor)| {
                let z = self.line.coupling_impedance(
                    conductor,
                    self.pipeline,
                    self.frequency,
                    self.options.coupling_mode,
                );
                let voltage = z * conductor.current() * self.exposure_length_m;
                debug!(index, role = ?conductor.role(), z = %z, v = %voltage, "conductor contribution");
                ConductorContribution {
                    index,
                    role: conductor.role(),
                    mutual_impedance_ohm_per_m: z,
                    voltage,
                }
            })
            .collect()
    }

    /// ΣZ_m·I·L [V]
    pub fn total_induced_voltage(&self) -> Complex64 {
        self.conductor_contributions()
            .iter()
            .map(|c| c.voltage)
            .sum()
    }

    pub fn evaluate_coating(&self, induced_voltage: Complex64) -> CoatingSafety {
        evaluate_coating(induced_voltage, self.options.coating_type)
    }

    /// 원통형 피복 결함을 통한 교류 전류밀도 [A/m²]
    pub fn ac_current_density(&self, induced_voltage: Complex64) -> f64 {
        let rho_eq = self.line.soil().equivalent_resistivity(self.frequency);
        induced_voltage.norm()
            / (rho_eq
                * (DEFECT_SHAPE_FACTOR * self.options.defect_radius_m
                    + self.pipeline.coating_thickness_m()))
    }

    pub fn report(&self) -> InterferenceReport {
        let contributions = self.conductor_contributions();
        let total: Complex64 = contributions.iter().map(|c| c.voltage).sum();
        let coating = self.evaluate_coating(total);
        let density = self.ac_current_density(total);
        let corrosion_risk = classify_corrosion_risk(density);
        let pipeline_parameters = self
            .pipeline
            .electrical_parameters(self.line.soil(), self.frequency);

        let mut warnings = Vec::new();
        if pipeline_parameters.characteristic_length_m.is_infinite() {
            warn!("attenuation constant is not positive; characteristic length is unbounded");
            warnings.push("Re(γ) ≤ 0 이므로 특성 길이를 무한대로 보고합니다.".to_string());
        }
        if !coating.is_safe {
            warnings.push(format!(
                "유도 전압 {:.2} kV 가 {} 피복 한계 {:.1} kV 를 초과합니다.",
                coating.voltage_kv, coating.coating_type, coating.limit_kv
            ));
        }

        InterferenceReport {
            frequency_hz: self.frequency.hertz(),
            exposure_length_m: self.exposure_length_m,
            coupling_mode: self.options.coupling_mode,
            induced_voltage: InducedVoltage::from(total),
            contributions,
            pipeline_parameters,
            safety: SafetyEvaluation {
                coating,
                ac_current_density_ma_per_m2: density * 1000.0,
                corrosion_risk,
            },
            soil: SoilSummary {
                equivalent_resistivity_ohm_m: self.line.soil().equivalent_resistivity(self.frequency),
            },
            warnings,
        }
    }
}
