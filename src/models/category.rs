//! # 카테고리 모델 정의
//!
//! 사진을 묶는 카테고리(Category) 관련 데이터 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `Category`: 데이터베이스에 저장된 카테고리를 표현 (응답용)
//! - `CreateCategoryRequest`: 새 카테고리 생성 시 클라이언트가 보내는 JSON 본문
//!
//! 카테고리에는 수정(update) 연산이 없습니다 — 생성과 삭제만 존재합니다.

use serde::{Deserialize, Serialize};

/// 카테고리 엔티티 — DB의 `categories` 테이블 한 행(row)에 대응합니다.
///
/// # derive 매크로 설명
/// - `Serialize`: 이 구조체를 JSON으로 변환할 수 있게 합니다 (API 응답 시 사용)
/// - `Deserialize`: JSON을 이 구조체로 변환할 수 있게 합니다
/// - `sqlx::FromRow`: SQL 쿼리 결과(행)를 이 구조체로 자동 매핑합니다
/// - `Clone`: 값을 복제할 수 있게 합니다 (.clone() 메서드 제공)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// 카테고리 고유 식별자 (UUIDv4 형식 문자열, 생성 후 불변)
    pub id: String,
    /// 카테고리 이름 (예: "Travel", "Portrait") — 전체에서 유일해야 합니다
    pub name: String,
    /// 카테고리 설명, 없을 수도 있으므로 Option 타입
    /// Option<T>: 값이 있으면 Some(값), 없으면 None — Rust의 null 안전 처리 방식
    pub description: Option<String>,
}

/// 카테고리 생성 요청 — `POST /api/categories`의 요청 본문(body)에 해당합니다.
///
/// `name`에 `#[serde(default)]`를 붙인 이유:
/// 필드가 아예 빠진 요청도 일단 역직렬화한 뒤(빈 문자열로),
/// 핸들러에서 "이름 없음"을 400 Bad Request로 일관되게 처리하기 위해서입니다.
/// serde가 역직렬화 단계에서 거부하면 상태 코드를 제어할 수 없습니다.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// 생성할 카테고리 이름 (필수 — 비어 있으면 400)
    #[serde(default)]
    pub name: String,
    /// 카테고리 설명 (선택)
    pub description: Option<String>,
}
