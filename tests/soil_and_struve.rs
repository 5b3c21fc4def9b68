//! 2층 대지 등가 저항률과 Struve-Bessel 근사 회귀 테스트.
use num_complex::Complex64;
use pipeline_emi_toolbox::emi::struve::SMALL_ARGUMENT_THRESHOLD;
use pipeline_emi_toolbox::emi::{struve_bessel_approx, Frequency, SoilModel};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * expected.abs(),
        "{label} expected {expected:.9e} got {actual:.9e} (diff {diff:.3e}, tol {rel_tol})"
    );
}

#[test]
fn equal_layers_reduce_to_homogeneous() {
    for (rho, h1, hz) in [(300.0, 5.0, 1000.0), (42.0, 0.3, 60.0), (5_000.0, 40.0, 1.0)] {
        let soil = SoilModel::new(rho, rho, h1, 10.0).expect("soil");
        let f = Frequency::new(hz).expect("freq");
        assert_eq!(soil.equivalent_resistivity(f), rho);
    }
    let soil = SoilModel::homogeneous(250.0, 8.0).expect("soil");
    assert_eq!(soil.equivalent_resistivity(Frequency::default()), 250.0);
}

#[test]
fn reference_two_layer_soil() {
    let soil = SoilModel::new(100.0, 1000.0, 2.0, 10.0).expect("soil");
    assert_close(
        "rho_eq 60Hz",
        soil.equivalent_resistivity(Frequency::default()),
        982.723_266_117_319_2,
        1e-9,
    );
    assert_close(
        "rho_eq 50Hz",
        soil.equivalent_resistivity(Frequency::new(50.0).expect("freq")),
        984.209_366_441_608_2,
        1e-9,
    );
}

#[test]
fn equivalent_resistivity_stays_between_layers() {
    let soil = SoilModel::new(100.0, 1000.0, 2.0, 10.0).expect("soil");
    for hz in [1.0, 60.0, 1_000.0, 100_000.0] {
        let rho = soil.equivalent_resistivity(Frequency::new(hz).expect("freq"));
        assert!(rho > 100.0 && rho < 1000.0, "f={hz} rho={rho}");
    }
}

#[test]
fn non_positive_frequency_rejected() {
    assert!(Frequency::new(0.0).is_err());
    assert!(Frequency::new(-60.0).is_err());
    assert!(Frequency::new(f64::INFINITY).is_err());
    assert_eq!(Frequency::default().hertz(), 60.0);
}

#[test]
fn struve_bessel_small_branch_series() {
    let u = Complex64::new(0.05, 0.02);
    let u2 = u * u;
    let expected = (Complex64::new(1.0, 0.0) - u2 / 8.0 + u2 * u2 / 192.0) * (2.0 / std::f64::consts::PI);
    let got = struve_bessel_approx(u);
    assert!((got - expected).norm() < 1e-15);
}

#[test]
fn struve_bessel_each_branch_continuous_near_threshold() {
    let sb = |x: f64| struve_bessel_approx(Complex64::new(x, 0.0));
    assert!((sb(0.0999) - sb(0.0998)).norm() < 1e-3);
    assert!((sb(0.1002) - sb(0.1001)).norm() < 1e-3);
}

#[test]
fn struve_bessel_threshold_jump_is_pinned() {
    // 두 근사식은 |u| = 0.1 에서 이어지지 않는다. 이 도약이 바뀌면 결과 전체가 바뀐다.
    let below = struve_bessel_approx(Complex64::new(0.0999, 0.0));
    let above = struve_bessel_approx(Complex64::new(0.1001, 0.0));
    assert_close("below", below.re, 0.635_825_918_654_273_2, 1e-9);
    assert_close("above", above.re, 0.060_639_982_126_877_76, 1e-9);
    assert_eq!(SMALL_ARGUMENT_THRESHOLD, 0.1);
}
