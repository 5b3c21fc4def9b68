//! TOML 스터디 파일(대지, 배관, 도체 배치)을 읽어 엔진 입력 값으로 바꾼다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::ConfigError;
use crate::emi::{Conductor, ConductorRole, EmiResult, Pipeline, Position, SoilModel};
use crate::material_db::PipeMaterial;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilInput {
    pub layer1_resistivity_ohm_m: f64,
    pub layer2_resistivity_ohm_m: f64,
    pub layer1_thickness_m: f64,
    #[serde(default = "default_soil_permittivity")]
    pub relative_permittivity: f64,
}

fn default_soil_permittivity() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineInput {
    #[serde(default)]
    pub x_m: f64,
    #[serde(default)]
    pub y_m: f64,
    /// 매설 깊이 좌표(음수)
    pub z_m: f64,
    pub outer_diameter_m: f64,
    pub wall_thickness_m: f64,
    pub coating_thickness_m: f64,
    /// 재질 태그. 표에 없으면 강관으로 대체하고 경고를 남긴다.
    #[serde(default = "default_material")]
    pub material: String,
}

fn default_material() -> String {
    "steel".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorInput {
    pub x_m: f64,
    pub height_m: f64,
    #[serde(default)]
    pub z_m: f64,
    /// 전류 크기 [A]
    pub current_a: f64,
    /// 전류 위상 [deg]
    #[serde(default)]
    pub angle_deg: f64,
    pub radius_m: f64,
    #[serde(default)]
    pub role: ConductorRole,
}

/// 스터디 케이스 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCase {
    pub name: String,
    /// 없으면 설정 파일의 노출 길이를 쓴다.
    #[serde(default)]
    pub exposure_length_m: Option<f64>,
    pub soil: SoilInput,
    pub pipeline: PipelineInput,
    pub conductors: Vec<ConductorInput>,
}

/// 검증을 마친 엔진 입력 값과 입력 해석 중 생긴 경고.
#[derive(Debug, Clone)]
pub struct StudyModel {
    pub soil: SoilModel,
    pub conductors: Vec<Conductor>,
    pub pipeline: Pipeline,
    pub warnings: Vec<String>,
}

impl StudyCase {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 138 kV 단일 회선, 8" 강관 1 km 병행 기준 케이스.
    pub fn reference_138kv() -> Self {
        let phase = |x_m: f64, height_m: f64, angle_deg: f64| ConductorInput {
            x_m,
            height_m,
            z_m: 0.0,
            current_a: 529.0,
            angle_deg,
            radius_m: 0.01257,
            role: ConductorRole::Phase,
        };
        Self {
            name: "138 kV reference".to_string(),
            exposure_length_m: Some(1000.0),
            soil: SoilInput {
                layer1_resistivity_ohm_m: 100.0,
                layer2_resistivity_ohm_m: 1000.0,
                layer1_thickness_m: 2.0,
                relative_permittivity: 10.0,
            },
            pipeline: PipelineInput {
                x_m: 0.0,
                y_m: 0.0,
                z_m: -1.5,
                outer_diameter_m: 0.219,
                wall_thickness_m: 0.0065,
                coating_thickness_m: 0.003,
                material: "steel".to_string(),
            },
            conductors: vec![
                phase(-3.3, 15.0, 0.0),
                phase(0.0, 19.0, -120.0),
                phase(3.3, 23.0, 120.0),
                ConductorInput {
                    x_m: 0.0,
                    height_m: 26.7,
                    z_m: 0.0,
                    current_a: 0.0,
                    angle_deg: 0.0,
                    radius_m: 0.004572,
                    role: ConductorRole::Guard,
                },
            ],
        }
    }

    /// 입력 값을 검증해 엔진 값 객체를 만든다. 하나라도 틀리면 전체가 실패한다.
    pub fn build(&self) -> EmiResult<StudyModel> {
        let mut warnings = Vec::new();

        let soil = SoilModel::new(
            self.soil.layer1_resistivity_ohm_m,
            self.soil.layer2_resistivity_ohm_m,
            self.soil.layer1_thickness_m,
            self.soil.relative_permittivity,
        )?;

        let (material, material_warning) = PipeMaterial::resolve_lenient(&self.pipeline.material);
        warnings.extend(material_warning);
        let p = &self.pipeline;
        let pipeline = Pipeline::new(
            Position::new(p.x_m, p.y_m, p.z_m),
            p.outer_diameter_m,
            p.wall_thickness_m,
            p.coating_thickness_m,
            material,
        )?;

        let conductors = self
            .conductors
            .iter()
            .map(|c| {
                Conductor::from_polar(
                    Position::new(c.x_m, c.height_m, c.z_m),
                    c.current_a,
                    c.angle_deg,
                    c.radius_m,
                    c.role,
                )
            })
            .collect::<EmiResult<Vec<_>>>()?;

        Ok(StudyModel {
            soil,
            conductors,
            pipeline,
            warnings,
        })
    }
}
