use tracing::info;

use crate::config::{self, Config, ConfigError};
use crate::emi::sweep::{self, SweepSettings};
use crate::emi::{EmiError, InterferenceAnalysis, InterferenceReport, TransmissionLine};
use crate::study::{StudyCase, StudyModel};
use crate::ui_cli::{self, Cli, Command, StudySource};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 설정/스터디 파일 오류
    Config(ConfigError),
    /// 해석 입력 오류
    Emi(EmiError),
    /// JSON 직렬화 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Emi(e) => write!(f, "해석 오류: {e}"),
            AppError::Json(e) => write!(f, "JSON 출력 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<EmiError> for AppError {
    fn from(value: EmiError) -> Self {
        AppError::Emi(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// 명령 하나를 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    match cli.command {
        Command::Analyze { study } => {
            let case = StudyCase::load(&study)?;
            analyze_case(&case, &cfg, cli.json)
        }
        Command::Reference => analyze_case(&StudyCase::reference_138kv(), &cfg, cli.json),
        Command::SweepDistance {
            source,
            from,
            to,
            points,
        } => {
            let (case, model) = load_source(&source)?;
            let line = TransmissionLine::new(model.conductors.clone(), &model.soil)?;
            let distances = sweep::linspace(from, to, points)?;
            let result = sweep::separation_sweep(
                &line,
                &model.pipeline,
                &distances,
                sweep_settings(&case, &cfg)?,
            )?;
            emit(cli.json, &result, ui_cli::print_separation)
        }
        Command::SweepFrequency {
            source,
            from_exp,
            to_exp,
            points,
        } => {
            let (case, model) = load_source(&source)?;
            let line = TransmissionLine::new(model.conductors.clone(), &model.soil)?;
            let frequencies = sweep::logspace(from_exp, to_exp, points)?;
            let result = sweep::frequency_sweep(
                &line,
                &model.pipeline,
                &frequencies,
                sweep_settings(&case, &cfg)?,
            )?;
            emit(cli.json, &result, ui_cli::print_frequency)
        }
        Command::SweepSoil { source, points } => {
            let (case, model) = load_source(&source)?;
            let line = TransmissionLine::new(model.conductors.clone(), &model.soil)?;
            let rho1 = sweep::logspace(1.0, 3.0, points)?;
            let rho2 = sweep::logspace(2.0, 4.0, points)?;
            let result = sweep::soil_sweep(
                &line,
                &model.pipeline,
                &rho1,
                &rho2,
                sweep_settings(&case, &cfg)?,
            )?;
            emit(cli.json, &result, ui_cli::print_soil)
        }
    }
}

/// 스터디 케이스 하나를 해석해 보고서를 만든다.
pub fn run_case(case: &StudyCase, cfg: &Config) -> Result<InterferenceReport, AppError> {
    let model = case.build()?;
    let line = TransmissionLine::new(model.conductors.clone(), &model.soil)?;
    let analysis = InterferenceAnalysis::new(&line, &model.pipeline, exposure_length(case, cfg))?
        .with_frequency(cfg.frequency()?)
        .with_options(cfg.analysis_options()?)?;
    info!(case = %case.name, conductors = line.conductors().len(), "running interference analysis");
    Ok(analysis.report().with_input_warnings(model.warnings))
}

fn analyze_case(case: &StudyCase, cfg: &Config, json: bool) -> Result<(), AppError> {
    let report = run_case(case, cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui_cli::print_report(&case.name, &report);
    }
    Ok(())
}

fn load_source(source: &StudySource) -> Result<(StudyCase, StudyModel), AppError> {
    let case = match &source.study {
        Some(path) => StudyCase::load(path)?,
        None => StudyCase::reference_138kv(),
    };
    let model = case.build()?;
    Ok((case, model))
}

fn exposure_length(case: &StudyCase, cfg: &Config) -> f64 {
    case.exposure_length_m.unwrap_or(cfg.exposure_length_m)
}

fn sweep_settings(case: &StudyCase, cfg: &Config) -> Result<SweepSettings, AppError> {
    Ok(SweepSettings {
        exposure_length_m: exposure_length(case, cfg),
        frequency: cfg.frequency()?,
        options: cfg.analysis_options()?,
    })
}

fn emit<T: serde::Serialize>(json: bool, points: &[T], print: fn(&[T])) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(points)?);
    } else {
        print(points);
    }
    Ok(())
}
