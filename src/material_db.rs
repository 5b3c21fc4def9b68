//! 배관 재질의 전기적 성질과 피복 종류별 절연 내력 표를 제공한다.
//! 값은 일반적인 참고치이며 실제 설계 시 제조사 자료로 검증해야 한다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::emi::EmiError;

#[derive(Debug)]
pub struct MaterialData {
    pub code: &'static str,
    pub name: &'static str,
    pub notes: &'static str,
    /// 전기 저항률 [Ω·m]
    pub resistivity_ohm_m: f64,
    /// 비투자율 μr
    pub relative_permeability: f64,
}

#[derive(Debug)]
pub struct CoatingData {
    pub code: &'static str,
    pub name: &'static str,
    /// 피복 절연 내력 [kV]
    pub withstand_kv: f64,
}

/// 지원하는 배관 재질. 표에 없는 재질은 받지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    Steel,
    Aluminum,
}

impl PipeMaterial {
    pub fn data(self) -> &'static MaterialData {
        match self {
            PipeMaterial::Steel => &MATERIALS[0],
            PipeMaterial::Aluminum => &MATERIALS[1],
        }
    }

    pub fn resistivity_ohm_m(self) -> f64 {
        self.data().resistivity_ohm_m
    }

    pub fn relative_permeability(self) -> f64 {
        self.data().relative_permeability
    }

    /// 관용적인 재질 해석. 표에 없는 태그는 강관으로 대체하고 경고 문구를 돌려준다.
    /// 돌려받은 경고는 보고서에 실어야 한다.
    pub fn resolve_lenient(tag: &str) -> (PipeMaterial, Option<String>) {
        match tag.parse::<PipeMaterial>() {
            Ok(material) => (material, None),
            Err(err) => {
                warn!(tag, "unrecognized pipe material, falling back to steel");
                (
                    PipeMaterial::Steel,
                    Some(format!("{err}; 강관(steel) 물성으로 대체했습니다.")),
                )
            }
        }
    }
}

impl FromStr for PipeMaterial {
    type Err = EmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if matches(&MATERIALS[0], tag) {
            Ok(PipeMaterial::Steel)
        } else if matches(&MATERIALS[1], tag) {
            Ok(PipeMaterial::Aluminum)
        } else {
            Err(EmiError::UnrecognizedMaterial(tag.to_string()))
        }
    }
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data().name)
    }
}

fn matches(data: &MaterialData, tag: &str) -> bool {
    data.code.eq_ignore_ascii_case(tag) || data.name.eq_ignore_ascii_case(tag)
}

/// 피복 종류. 절연 내력 평가의 설정 항목이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoatingType {
    /// 압출 폴리에틸렌(3LPE 등)
    #[default]
    ExtrudedPolyethylene,
    /// 융착 에폭시(FBE)
    FusionBondedEpoxy,
    /// 플라스틱 테이프
    PlasticTape,
}

impl CoatingType {
    pub fn data(self) -> &'static CoatingData {
        match self {
            CoatingType::ExtrudedPolyethylene => &COATINGS[0],
            CoatingType::FusionBondedEpoxy => &COATINGS[1],
            CoatingType::PlasticTape => &COATINGS[2],
        }
    }

    pub fn withstand_kv(self) -> f64 {
        self.data().withstand_kv
    }
}

impl FromStr for CoatingType {
    type Err = EmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        [
            CoatingType::ExtrudedPolyethylene,
            CoatingType::FusionBondedEpoxy,
            CoatingType::PlasticTape,
        ]
        .into_iter()
        .find(|c| {
            let d = c.data();
            d.code.eq_ignore_ascii_case(tag) || d.name.eq_ignore_ascii_case(tag)
        })
        .ok_or_else(|| EmiError::UnrecognizedMaterial(tag.to_string()))
    }
}

impl fmt::Display for CoatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data().name)
    }
}

pub fn materials() -> &'static [MaterialData] {
    MATERIALS
}

pub fn coatings() -> &'static [CoatingData] {
    COATINGS
}

const MATERIALS: &[MaterialData] = &[
    MaterialData {
        code: "steel",
        name: "Carbon steel",
        notes: "API 5L 계열 탄소강; 강자성 μr은 운전 자계에 따라 달라지므로 대표값",
        resistivity_ohm_m: 1.72e-7,
        relative_permeability: 300.0,
    },
    MaterialData {
        code: "aluminum",
        name: "Aluminum",
        notes: "비자성; 참고용",
        resistivity_ohm_m: 2.82e-8,
        relative_permeability: 1.0,
    },
];

const COATINGS: &[CoatingData] = &[
    CoatingData {
        code: "pe",
        name: "Extruded polyethylene",
        withstand_kv: 5.0,
    },
    CoatingData {
        code: "fbe",
        name: "Fusion-bonded epoxy",
        withstand_kv: 3.0,
    },
    CoatingData {
        code: "tape",
        name: "Plastic tape",
        withstand_kv: 2.0,
    },
];

// NOTE:
// - Withstand limits follow common NACE SP0177 practice for coating stress; they are screening values.
// - Coating dielectric properties (ρ = 1e8 Ω·m, εr = 2.3) used for shunt admittance are extruded-PE typical
//   and live on the pipeline, not in this table.
