//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 인증 관련 (로그인, 로그아웃, 세션 확인)
//! - `categories`: 카테고리 목록/생성/삭제 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `photos`: 사진 CRUD 및 업로드 핸들러 (공유 상태 AppState 포함)

pub mod auth;
pub mod categories;
pub mod health;
pub mod photos;

// 각 모듈의 핸들러 함수들을 재공개하여
// `routes::list_photos`처럼 바로 접근 가능하게 합니다.
pub use categories::*;
pub use health::*;
pub use photos::*;
