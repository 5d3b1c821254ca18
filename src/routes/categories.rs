//! # 카테고리 API 라우트 핸들러
//!
//! 카테고리 목록/생성/삭제를 위한 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 인증 |
//! |--------|------|--------|------|
//! | GET | /api/categories | `list_categories` | 공개 |
//! | POST | /api/categories | `create_category` | 관리자 |
//! | DELETE | /api/categories/{id} | `delete_category` | 관리자 |
//! | GET | /api/categories/{id}/photos | `list_category_photos` | 공개 |
//!
//! 카테고리에는 수정(update) 엔드포인트가 없습니다 — 데이터 모델에
//! 수정 연산 자체가 정의되어 있지 않습니다.

use crate::{
    db,                              // 데이터베이스 쿼리 모듈
    error::AppError,                 // 에러 타입 (자동으로 HTTP 에러 응답으로 변환됨)
    middleware::auth::AdminSession,  // 세션 검증 추출자
    models::*,                       // 요청/응답 구조체들
    routes::photos::AppState,        // 애플리케이션 공유 상태 (DB 풀, 설정 등)
};
use axum::{
    extract::{Path, State}, // Axum 추출자: URL 파라미터, 앱 상태 추출
    Json,                   // JSON 요청/응답 처리
};
use serde_json::{json, Value}; // JSON 객체 생성용 매크로와 범용 JSON 타입

/// `GET /api/categories` — 전체 카테고리 목록을 조회합니다 (공개).
///
/// 이름 오름차순으로 정렬된 배열을 반환합니다. 인증 검사가 없습니다.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = db::list_categories(&state.pool).await?;
    Ok(Json(categories))
}

/// `POST /api/categories` — 새 카테고리를 생성합니다 (관리자 전용).
///
/// `Json(req)`: 요청 본문의 JSON을 `CreateCategoryRequest`로 파싱합니다.
/// 이름이 비어 있으면 400, 이미 존재하는 이름이면 409를 반환합니다.
/// `_session: AdminSession`: 세션 쿠키가 유효하지 않으면 핸들러 본문이
/// 실행되기 전에 401이 반환됩니다.
pub async fn create_category(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let category = db::create_category(&state.pool, &req).await?;
    Ok(Json(category))
}

/// `GET /api/categories/{id}/photos` — 카테고리에 속한 사진 목록을 조회합니다 (공개).
///
/// 카테고리 둘러보기 페이지가 사용하는 엔드포인트입니다.
/// 먼저 카테고리가 존재하는지 확인하고(없으면 404), 존재하면 해당
/// 카테고리의 사진을 생성 시각 내림차순으로 반환합니다.
/// `let _ = ...`: 반환값(Category)은 사용하지 않고 버립니다 (존재 확인만 목적)
pub async fn list_category_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Photo>>, AppError> {
    // 카테고리 존재 여부 확인 — 없으면 404 반환
    let _ = db::get_category(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let photos = db::list_photos_by_category(&state.pool, &id).await?;
    Ok(Json(photos))
}

/// `DELETE /api/categories/{id}` — 카테고리를 삭제합니다 (관리자 전용).
///
/// 이 카테고리를 참조하던 사진은 건드리지 않습니다 — dangling 참조는
/// 표시 계층이 "Uncategorized"로 해석합니다.
pub async fn delete_category(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = db::delete_category(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "success": true })))
}
