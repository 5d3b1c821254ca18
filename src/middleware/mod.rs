//! # 미들웨어 모듈
//!
//! 요청이 핸들러에 도달하기 전에 거치는 처리 계층입니다.
//! - `auth`: 세션 토큰 코덱과 쿠키 기반 인증 판정, 핸들러용 인증 추출자
//! - `admission`: /admin 경로 진입 규칙 (미인증 → 로그인으로 리다이렉트)

pub mod admission;
pub mod auth;
