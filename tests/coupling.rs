//! 도체-배관 상호 임피던스와 유도 전압 중첩 테스트.
use num_complex::Complex64;
use pipeline_emi_toolbox::emi::{
    Conductor, ConductorRole, CouplingGeometry, CouplingMode, EmiError, Frequency,
    InterferenceAnalysis, Pipeline, Position, SoilModel, TransmissionLine,
};
use pipeline_emi_toolbox::material_db::PipeMaterial;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * expected.abs(),
        "{label} expected {expected:.9e} got {actual:.9e} (diff {diff:.3e}, tol {rel_tol})"
    );
}

fn soil() -> SoilModel {
    SoilModel::new(100.0, 1000.0, 2.0, 10.0).expect("soil")
}

fn pipe_at(x: f64) -> Pipeline {
    Pipeline::new(Position::new(x, 0.0, -1.5), 0.219, 0.0065, 0.003, PipeMaterial::Steel)
        .expect("pipe")
}

fn phase(x: f64, height: f64, angle_deg: f64) -> Conductor {
    Conductor::from_polar(Position::new(x, height, 0.0), 529.0, angle_deg, 0.01257, ConductorRole::Phase)
        .expect("conductor")
}

fn three_phase() -> Vec<Conductor> {
    vec![
        phase(-3.3, 15.0, 0.0),
        phase(0.0, 19.0, -120.0),
        phase(3.3, 23.0, 120.0),
        Conductor::new(
            Position::new(0.0, 26.7, 0.0),
            Complex64::new(0.0, 0.0),
            0.004572,
            ConductorRole::Guard,
        )
        .expect("guard"),
    ]
}

#[test]
fn geometry_uses_mirrored_pipe() {
    let c = phase(-3.3, 15.0, 0.0);
    let geo = CouplingGeometry::between(&c, &pipe_at(0.0));
    assert_close("direct", geo.direct_m, 3.3f64.hypot(16.5), 1e-12);
    assert_close("image", geo.image_m, 3.3f64.hypot(13.5), 1e-12);
    assert_close("H", geo.height_sum_m, 16.5, 1e-12);
    assert_close("D'", geo.horizontal_m, 3.3, 1e-12);
}

#[test]
fn mutual_impedance_reference_magnitudes() {
    let soil = soil();
    let line = TransmissionLine::new(three_phase(), &soil).expect("line");
    let pipe = pipe_at(0.0);
    let f = Frequency::default();
    let expected = [
        1.010_896_975_978_513_1,
        0.736_890_332_833_940_3,
        0.487_488_145_024_604_9,
        0.387_945_619_801_227_3,
    ];
    for (c, want) in line.conductors().iter().zip(expected) {
        assert_close("|Zm|", line.mutual_impedance(c, &pipe, f).norm(), want, 1e-6);
    }
}

#[test]
fn mutual_impedance_decreases_with_separation_in_near_field() {
    let soil = soil();
    let conductor = phase(0.0, 15.0, 0.0);
    let line = TransmissionLine::new(vec![conductor], &soil).expect("line");
    let f = Frequency::default();
    // 0 ≤ D < H(16.5 m) 구간
    let magnitudes: Vec<f64> = (0..33)
        .map(|i| line.mutual_impedance(&conductor, &pipe_at(i as f64 * 0.5), f).norm())
        .collect();
    for pair in magnitudes.windows(2) {
        assert!(pair[1] < pair[0], "{:?}", pair);
    }
}

#[test]
fn mutual_impedance_is_symmetric_in_horizontal_offset() {
    let soil = soil();
    let conductor = phase(0.0, 19.0, 0.0);
    let line = TransmissionLine::new(vec![conductor], &soil).expect("line");
    let f = Frequency::default();
    let left = line.mutual_impedance(&conductor, &pipe_at(-7.0), f);
    let right = line.mutual_impedance(&conductor, &pipe_at(7.0), f);
    assert!((left - right).norm() < 1e-12 * left.norm());
}

#[test]
fn induced_voltage_scales_linearly_with_currents() {
    let soil = soil();
    let line = TransmissionLine::new(three_phase(), &soil).expect("line");
    let pipe = pipe_at(0.0);
    let base = InterferenceAnalysis::new(&line, &pipe, 1000.0)
        .expect("analysis")
        .total_induced_voltage();
    for k in [2.5, 0.1, -3.0] {
        let scaled_line = line.with_scaled_currents(k).expect("scaled");
        let scaled = InterferenceAnalysis::new(&scaled_line, &pipe, 1000.0)
            .expect("analysis")
            .total_induced_voltage();
        assert!((scaled - base * k).norm() <= 1e-12 * (base * k).norm(), "k={k}");
    }
}

#[test]
fn approximate_coupling_mode() {
    let soil = soil();
    let line = TransmissionLine::new(three_phase(), &soil).expect("line");
    let pipe = pipe_at(0.0);
    let f = Frequency::default();
    let c = &line.conductors()[0];
    assert_eq!(
        line.coupling_impedance(c, &pipe, f, CouplingMode::Approximate),
        line.approximate_mutual_impedance(c, &pipe, f)
    );
    assert_eq!(
        line.coupling_impedance(c, &pipe, f, CouplingMode::ClosedForm),
        line.mutual_impedance(c, &pipe, f)
    );
    let z = line.approximate_mutual_impedance(c, &pipe, f);
    assert_close("Re", z.re, pipeline_emi_toolbox::constants::MU_0 * f.omega() / 8.0, 1e-12);
}

#[test]
fn approximate_mode_uses_straight_line_distance() {
    let soil = soil();
    let line = TransmissionLine::new(three_phase(), &soil).expect("line");
    let pipe = pipe_at(0.0);
    let f = Frequency::default();

    // (-3.3, 15, 0) → (0, 0, -1.5)
    let geo = CouplingGeometry::between(&line.conductors()[0], &pipe);
    assert_close("D", geo.straight_line_m, 15.431_785_379_534_022, 1e-12);
    assert!(geo.straight_line_m < geo.direct_m);

    let expected_im = [
        3.420_183_535_823_228e-4,
        3.261_005_608_367_88e-4,
        3.110_045_935_822_854_6e-4,
        3.005_636_716_099_987e-4,
    ];
    for (c, want) in line.conductors().iter().zip(expected_im) {
        let z = line.approximate_mutual_impedance(c, &pipe, f);
        assert_close("Im", z.im, want, 1e-8);
    }
}

#[test]
fn empty_line_is_domain_error() {
    let soil = soil();
    assert!(matches!(
        TransmissionLine::new(Vec::new(), &soil),
        Err(EmiError::Domain(_))
    ));
}

#[test]
fn conductor_validation() {
    let at = Position::new(0.0, 15.0, 0.0);
    let i = Complex64::new(100.0, 0.0);
    assert!(Conductor::new(at, i, 0.0, ConductorRole::Phase).is_err());
    assert!(Conductor::new(at, i, -0.01, ConductorRole::Phase).is_err());
    assert!(Conductor::new(Position::new(0.0, -1.0, 0.0), i, 0.01, ConductorRole::Phase).is_err());
    assert!(Conductor::new(at, Complex64::new(f64::NAN, 0.0), 0.01, ConductorRole::Neutral).is_err());
    assert!(Conductor::new(at, i, 0.01, ConductorRole::Neutral).is_ok());
}
