//! 이격 거리, 주파수, 대지 저항률에 대한 파라미터 스윕.
//!
//! 각 평가점마다 독립된 입력 값(배관, 대지 모델, 선로)을 새로 만들고
//! rayon으로 병렬 평가한다. 공유 입력은 읽기만 한다.

use rayon::prelude::*;
use serde::Serialize;

use super::analysis::{AnalysisOptions, InterferenceAnalysis};
use super::error::{EmiError, EmiResult};
use super::frequency::Frequency;
use super::pipeline::Pipeline;
use super::transmission_line::TransmissionLine;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeparationPoint {
    pub distance_m: f64,
    pub magnitude_v: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyPoint {
    pub frequency_hz: f64,
    pub magnitude_v: f64,
    pub phase_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilPoint {
    pub layer1_resistivity_ohm_m: f64,
    pub layer2_resistivity_ohm_m: f64,
    pub magnitude_v: f64,
}

/// 공통 스윕 조건.
#[derive(Debug, Clone, Copy)]
pub struct SweepSettings {
    pub exposure_length_m: f64,
    pub frequency: Frequency,
    pub options: AnalysisOptions,
}

/// 배관을 수평 위치 `distances_m` 로 옮겨가며 유도 전압 크기를 구한다.
pub fn separation_sweep(
    line: &TransmissionLine<'_>,
    pipeline: &Pipeline,
    distances_m: &[f64],
    settings: SweepSettings,
) -> EmiResult<Vec<SeparationPoint>> {
    distances_m
        .par_iter()
        .map(|&distance_m| {
            let moved = pipeline.at_separation(distance_m)?;
            let voltage = InterferenceAnalysis::new(line, &moved, settings.exposure_length_m)?
                .with_frequency(settings.frequency)
                .with_options(settings.options)?
                .total_induced_voltage();
            Ok(SeparationPoint {
                distance_m,
                magnitude_v: voltage.norm(),
            })
        })
        .collect()
}

/// 주파수 응답. `settings.frequency` 는 무시하고 각 점의 주파수를 쓴다.
pub fn frequency_sweep(
    line: &TransmissionLine<'_>,
    pipeline: &Pipeline,
    frequencies_hz: &[f64],
    settings: SweepSettings,
) -> EmiResult<Vec<FrequencyPoint>> {
    frequencies_hz
        .par_iter()
        .map(|&hz| {
            let frequency = Frequency::new(hz)?;
            let voltage = InterferenceAnalysis::new(line, pipeline, settings.exposure_length_m)?
                .with_frequency(frequency)
                .with_options(settings.options)?
                .total_induced_voltage();
            Ok(FrequencyPoint {
                frequency_hz: hz,
                magnitude_v: voltage.norm(),
                phase_deg: voltage.arg().to_degrees(),
            })
        })
        .collect()
}

/// ρ1 × ρ2 격자. 점마다 대지 모델과 선로를 새로 만든다. 결과는 ρ2 바깥, ρ1 안쪽 순서.
pub fn soil_sweep(
    line: &TransmissionLine<'_>,
    pipeline: &Pipeline,
    layer1_resistivities: &[f64],
    layer2_resistivities: &[f64],
    settings: SweepSettings,
) -> EmiResult<Vec<SoilPoint>> {
    let grid: Vec<(f64, f64)> = layer2_resistivities
        .iter()
        .flat_map(|&rho2| layer1_resistivities.iter().map(move |&rho1| (rho1, rho2)))
        .collect();

    grid.par_iter()
        .map(|&(rho1, rho2)| {
            let soil = line.soil().with_layer_resistivities(rho1, rho2)?;
            let local_line = TransmissionLine::new(line.conductors().to_vec(), &soil)?;
            let voltage = InterferenceAnalysis::new(&local_line, pipeline, settings.exposure_length_m)?
                .with_frequency(settings.frequency)
                .with_options(settings.options)?
                .total_induced_voltage();
            Ok(SoilPoint {
                layer1_resistivity_ohm_m: rho1,
                layer2_resistivity_ohm_m: rho2,
                magnitude_v: voltage.norm(),
            })
        })
        .collect()
}

/// [start, end] 를 `points` 개로 균등 분할한다.
pub fn linspace(start: f64, end: f64, points: usize) -> EmiResult<Vec<f64>> {
    match points {
        0 => Err(EmiError::Domain("스윕 점 개수는 1 이상이어야 합니다".into())),
        1 => Ok(vec![start]),
        n => {
            let step = (end - start) / (n - 1) as f64;
            Ok((0..n).map(|i| start + step * i as f64).collect())
        }
    }
}

/// 10^start_exp 부터 10^end_exp 까지 로그 균등 분할.
pub fn logspace(start_exp: f64, end_exp: f64, points: usize) -> EmiResult<Vec<f64>> {
    Ok(linspace(start_exp, end_exp, points)?
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(5.0, 100.0, 20).unwrap();
        assert_eq!(v.len(), 20);
        assert_eq!(v[0], 5.0);
        assert!((v[19] - 100.0).abs() < 1e-12);
    }

    #[test]
    fn logspace_decades() {
        let v = logspace(0.0, 3.0, 4).unwrap();
        for (got, want) in v.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
            assert!((got - want).abs() < 1e-9 * want);
        }
    }

    #[test]
    fn zero_points_rejected() {
        assert!(linspace(0.0, 1.0, 0).is_err());
    }
}
