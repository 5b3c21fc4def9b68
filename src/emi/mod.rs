//! 가공 송전선로에 의한 매설 배관 유도 간섭 해석 엔진.
//! 2층 대지 등가 저항률, Carson 폐형해 상호 임피던스, 배관 분포 정수,
//! 유도 전압 중첩과 피복/교류 부식 평가로 구성한다.

pub mod analysis;
pub mod conductor;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod soil;
pub mod struve;
pub mod sweep;
pub mod transmission_line;

pub use analysis::*;
pub use conductor::{Conductor, ConductorRole, Position};
pub use error::{EmiError, EmiResult};
pub use frequency::Frequency;
pub use pipeline::{characteristic_length_m, Pipeline, PipelineParameters};
pub use soil::SoilModel;
pub use struve::struve_bessel_approx;
pub use transmission_line::{CouplingGeometry, CouplingMode, TransmissionLine};
