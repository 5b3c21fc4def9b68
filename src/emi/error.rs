use thiserror::Error;

/// 간섭 해석 엔진에서 발생하는 오류.
///
/// 모든 입력 검증은 값 객체 생성 시점에 끝나므로, 유도 계산 함수들은
/// 이 오류를 돌려주지 않는다. 수치적 퇴화(예: Re(γ) ≤ 0)는 오류가 아니라
/// 보고서의 무한대 값과 경고로 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmiError {
    /// 물리적으로 성립하지 않는 입력 (음수 저항률, 두께, 빈 도체 목록 등)
    #[error("입력 오류: {0}")]
    Domain(String),
    /// 재질/피복 표에 없는 태그
    #[error("알 수 없는 재질 태그: {0}")]
    UnrecognizedMaterial(String),
}

pub type EmiResult<T> = Result<T, EmiError>;

/// `value`가 0보다 큰 유한값인지 확인한다.
pub(crate) fn ensure_positive(label: &str, value: f64) -> EmiResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EmiError::Domain(format!(
            "{label} 값은 0보다 큰 유한값이어야 합니다 (입력: {value})"
        )))
    }
}

pub(crate) fn ensure_finite(label: &str, value: f64) -> EmiResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EmiError::Domain(format!(
            "{label} 값이 유한하지 않습니다 (입력: {value})"
        )))
    }
}
