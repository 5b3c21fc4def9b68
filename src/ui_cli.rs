use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::emi::sweep::{FrequencyPoint, SeparationPoint, SoilPoint};
use crate::emi::InterferenceReport;

/// 가공 송전선로 ↔ 매설 배관 유도 간섭 해석 도구.
#[derive(Debug, Parser)]
#[command(name = "pipeline_emi_toolbox", version, about)]
pub struct Cli {
    /// 설정 파일 경로. 없으면 기본값으로 생성한다.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// 결과를 JSON으로 출력
    #[arg(long, global = true)]
    pub json: bool,

    /// 디버그 로그 출력 (RUST_LOG 가 있으면 그쪽이 우선)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 스터디 파일을 해석한다.
    Analyze {
        #[arg(long)]
        study: PathBuf,
    },
    /// 내장 138 kV 기준 케이스를 해석한다.
    Reference,
    /// 배관 수평 이격 거리에 따른 유도 전압
    SweepDistance {
        #[command(flatten)]
        source: StudySource,
        #[arg(long, default_value_t = 5.0)]
        from: f64,
        #[arg(long, default_value_t = 100.0)]
        to: f64,
        #[arg(long, default_value_t = 50)]
        points: usize,
    },
    /// 주파수 응답 (로그 간격, 지수로 지정: 0 → 1 Hz, 3 → 1 kHz)
    SweepFrequency {
        #[command(flatten)]
        source: StudySource,
        #[arg(long, default_value_t = 0.0)]
        from_exp: f64,
        #[arg(long, default_value_t = 3.0)]
        to_exp: f64,
        #[arg(long, default_value_t = 50)]
        points: usize,
    },
    /// ρ1 × ρ2 격자 (로그 간격)
    SweepSoil {
        #[command(flatten)]
        source: StudySource,
        #[arg(long, default_value_t = 20)]
        points: usize,
    },
}

/// 스윕 대상. 지정하지 않으면 기준 케이스를 쓴다.
#[derive(Debug, Args)]
pub struct StudySource {
    #[arg(long)]
    pub study: Option<PathBuf>,
}

pub fn print_report(name: &str, report: &InterferenceReport) {
    println!("\n=== {name} ===");
    println!(
        "주파수: {:.1} Hz, 노출 길이: {:.1} m, 결합 방식: {:?}",
        report.frequency_hz, report.exposure_length_m, report.coupling_mode
    );

    println!("\n1) 유도 전압");
    println!("   크기: {:.3e} V", report.induced_voltage.magnitude_v);
    println!("   위상: {:.1}°", report.induced_voltage.phase_deg);
    for c in &report.contributions {
        println!(
            "   도체 {} ({:?}): Zm = {:.4e} Ω/m, 기여 {:.3e} V",
            c.index + 1,
            c.role,
            c.mutual_impedance_ohm_per_m,
            c.voltage.norm()
        );
    }

    let p = &report.pipeline_parameters;
    println!("\n2) 배관 분포 정수");
    println!("   자기 임피던스: {:.4e} Ω/m", p.self_impedance_ohm_per_m);
    println!("   병렬 어드미턴스: {:.4e} S/m", p.admittance_s_per_m);
    println!(
        "   특성 임피던스: {:.4e} Ω (|Zc| = {:.3e})",
        p.characteristic_impedance_ohm,
        p.characteristic_impedance_ohm.norm()
    );
    println!("   전파 상수: {:.4e} 1/m", p.propagation_constant_per_m);
    println!("   특성 길이: {:.1} m", p.characteristic_length_m);

    let s = &report.safety;
    println!("\n3) 안전성 평가");
    println!(
        "   피복 전압: {:.2} kV / 한계 {:.1} kV ({}) → {}",
        s.coating.voltage_kv,
        s.coating.limit_kv,
        s.coating.coating_type,
        if s.coating.is_safe { "안전" } else { "위험" }
    );
    println!("   안전 계수: {:.3}", s.coating.safety_margin);
    println!("   교류 전류밀도: {:.1} mA/m²", s.ac_current_density_ma_per_m2);
    println!("   교류 부식 위험: {}", s.corrosion_risk);

    println!("\n4) 대지");
    println!(
        "   등가 저항률: {:.1} Ω·m",
        report.soil.equivalent_resistivity_ohm_m
    );

    if !report.warnings.is_empty() {
        println!("\n경고:");
        for w in &report.warnings {
            println!("   - {w}");
        }
    }
}

pub fn print_separation(points: &[SeparationPoint]) {
    println!("{:>12} {:>14}", "거리[m]", "|V|[V]");
    for p in points {
        println!("{:>12.2} {:>14.4e}", p.distance_m, p.magnitude_v);
    }
}

pub fn print_frequency(points: &[FrequencyPoint]) {
    println!("{:>12} {:>14} {:>10}", "f[Hz]", "|V|[V]", "위상[°]");
    for p in points {
        println!(
            "{:>12.3} {:>14.4e} {:>10.1}",
            p.frequency_hz, p.magnitude_v, p.phase_deg
        );
    }
}

pub fn print_soil(points: &[SoilPoint]) {
    println!("{:>12} {:>12} {:>14}", "ρ1[Ω·m]", "ρ2[Ω·m]", "|V|[V]");
    for p in points {
        println!(
            "{:>12.1} {:>12.1} {:>14.4e}",
            p.layer1_resistivity_ohm_m, p.layer2_resistivity_ohm_m, p.magnitude_v
        );
    }
}
