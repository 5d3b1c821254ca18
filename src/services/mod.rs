//! # 서비스 모듈
//!
//! 라우트 핸들러와 DB 계층 사이의 비즈니스 로직을 담당합니다.
//! - `uploads`: 업로드된 이미지 파일의 디스크 저장/삭제

pub mod uploads;

pub use uploads::*;
