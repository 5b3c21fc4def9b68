use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::DEFAULT_FREQUENCY_HZ;
use crate::emi::{AnalysisOptions, CouplingMode, EmiError, Frequency};
use crate::material_db::CoatingType;

/// 해석 기본값을 담는 애플리케이션 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 계통 주파수 [Hz]
    pub frequency_hz: f64,
    /// 스터디 파일에 값이 없을 때 쓰는 노출 길이 [m]
    pub exposure_length_m: f64,
    pub coating_type: CoatingType,
    /// 피복 결함 반지름 [m]
    pub defect_radius_m: f64,
    pub coupling_mode: CouplingMode,
}

impl Default for Config {
    fn default() -> Self {
        let options = AnalysisOptions::default();
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            exposure_length_m: 1000.0,
            coating_type: options.coating_type,
            defect_radius_m: options.defect_radius_m,
            coupling_mode: options.coupling_mode,
        }
    }
}

impl Config {
    pub fn frequency(&self) -> Result<Frequency, ConfigError> {
        Ok(Frequency::new(self.frequency_hz)?)
    }

    pub fn analysis_options(&self) -> Result<AnalysisOptions, ConfigError> {
        let options = AnalysisOptions {
            coating_type: self.coating_type,
            defect_radius_m: self.defect_radius_m,
            coupling_mode: self.coupling_mode,
        };
        options.validate()?;
        Ok(options)
    }

    /// 설정을 `path`에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 설정/스터디 파일 로드·저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 값은 읽었지만 물리적으로 유효하지 않음
    Invalid(EmiError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
            ConfigError::Invalid(e) => write!(f, "설정 값 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

impl From<EmiError> for ConfigError {
    fn from(value: EmiError) -> Self {
        ConfigError::Invalid(value)
    }
}

/// `path`의 설정을 로드하거나, 없으면 기본 설정을 만들어 저장한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}
