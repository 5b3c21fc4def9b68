//! 해석 엔진을 라이브러리로 분리하여 CLI 뿐 아니라 다른 보고/시각화 도구에서도 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod constants;
pub mod emi;
pub mod material_db;
pub mod study;
pub mod ui_cli;
