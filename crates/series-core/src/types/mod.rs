//! 시리즈 관련 기본 타입.

pub mod data_source;
pub mod series;

pub use data_source::*;
pub use series::*;
