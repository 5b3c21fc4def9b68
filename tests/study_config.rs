//! 설정 파일과 스터디 파일(TOML) 로드 테스트.
use pipeline_emi_toolbox::config::{self, Config, ConfigError};
use pipeline_emi_toolbox::emi::{ConductorRole, CouplingMode};
use pipeline_emi_toolbox::material_db::{CoatingType, PipeMaterial};
use pipeline_emi_toolbox::study::StudyCase;

const STUDY: &str = r#"
name = "Parallel 69 kV"
exposure_length_m = 2500.0

[soil]
layer1_resistivity_ohm_m = 50.0
layer2_resistivity_ohm_m = 400.0
layer1_thickness_m = 3.0

[pipeline]
x_m = 20.0
z_m = -1.2
outer_diameter_m = 0.3239
wall_thickness_m = 0.0079
coating_thickness_m = 0.0035
material = "aluminum"

[[conductors]]
x_m = -2.5
height_m = 12.0
current_a = 300.0
radius_m = 0.0101

[[conductors]]
x_m = 2.5
height_m = 12.0
current_a = 300.0
angle_deg = -120.0
radius_m = 0.0101

[[conductors]]
x_m = 0.0
height_m = 18.0
current_a = 0.0
radius_m = 0.004
role = "guard"
"#;

#[test]
fn study_file_parses_with_defaults() {
    let case = StudyCase::from_toml_str(STUDY).expect("parse");
    assert_eq!(case.exposure_length_m, Some(2500.0));
    assert_eq!(case.soil.relative_permittivity, 10.0);
    assert_eq!(case.pipeline.y_m, 0.0);
    assert_eq!(case.conductors[0].role, ConductorRole::Phase);
    assert_eq!(case.conductors[0].angle_deg, 0.0);
    assert_eq!(case.conductors[2].role, ConductorRole::Guard);

    let model = case.build().expect("model");
    assert_eq!(model.pipeline.material(), PipeMaterial::Aluminum);
    assert!(model.warnings.is_empty());
    assert_eq!(model.conductors.len(), 3);
    let i2 = model.conductors[1].current();
    assert!((i2.norm() - 300.0).abs() < 1e-9);
    assert!((i2.arg().to_degrees() + 120.0).abs() < 1e-9);
}

#[test]
fn reference_case_survives_toml() {
    let case = StudyCase::reference_138kv();
    let text = case.to_toml_string().expect("serialize");
    let back = StudyCase::from_toml_str(&text).expect("parse");
    assert_eq!(back, case);
}

#[test]
fn invalid_study_values_fail_build() {
    let mut case = StudyCase::from_toml_str(STUDY).expect("parse");
    case.pipeline.wall_thickness_m = 0.2;
    assert!(case.build().is_err());

    let mut case = StudyCase::from_toml_str(STUDY).expect("parse");
    case.soil.layer2_resistivity_ohm_m = 0.0;
    assert!(case.build().is_err());
}

#[test]
fn malformed_study_is_parse_error() {
    let err = StudyCase::from_toml_str("name = 3").expect_err("should fail");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn config_defaults_and_partial_file() {
    let cfg: Config = toml::from_str("coating_type = \"fusion_bonded_epoxy\"\nfrequency_hz = 50.0")
        .expect("parse");
    assert_eq!(cfg.coating_type, CoatingType::FusionBondedEpoxy);
    assert_eq!(cfg.frequency_hz, 50.0);
    assert_eq!(cfg.coupling_mode, CouplingMode::ClosedForm);
    assert_eq!(cfg.defect_radius_m, 0.001);
    assert_eq!(cfg.frequency().expect("freq").hertz(), 50.0);

    let bad = Config {
        frequency_hz: -1.0,
        ..Config::default()
    };
    assert!(matches!(bad.frequency(), Err(ConfigError::Invalid(_))));
}

#[test]
fn load_or_default_writes_missing_file() {
    let path = std::env::temp_dir().join(format!(
        "pipeline_emi_toolbox_cfg_{}.toml",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let created = config::load_or_default(&path).expect("create");
    assert_eq!(created, Config::default());
    assert!(path.exists());
    let loaded = config::load_or_default(&path).expect("load");
    assert_eq!(loaded, created);
    let _ = std::fs::remove_file(&path);
}
