//! # 사진 데이터베이스 쿼리 모듈
//!
//! 사진 메타데이터의 CRUD를 담당하는 SQL 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! 이미지 파일 자체의 저장/삭제는 이 모듈의 책임이 아닙니다 —
//! 파일 I/O는 `services::uploads`가, 호출 순서는 라우트 핸들러가 담당합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 현재 시각을 ISO 8601 문자열로 반환합니다.
///
/// 밀리초 정밀도의 UTC (예: "2026-08-06T09:15:42.317Z").
/// `created_at`/`updated_at` 컬럼과 세션 토큰 외의 모든 타임스탬프가
/// 이 형식을 사용합니다.
fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 모든 사진을 생성 시각 내림차순(최신 먼저)으로 조회합니다.
///
/// DB 에러가 발생하면 로그에 남기고 빈 목록을 반환합니다 —
/// 공개 갤러리 페이지는 저장소 장애 시에도 응답해야 합니다.
pub async fn list_photos(pool: &SqlitePool) -> Result<Vec<Photo>, AppError> {
    let photos = sqlx::query_as::<_, Photo>(
        r#"
        SELECT id, title, description, image_url, background_color, category_id,
               created_at, updated_at
        FROM photos
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await;

    match photos {
        Ok(rows) => Ok(rows),
        Err(e) => {
            tracing::error!("Error listing photos: {}", e);
            Ok(Vec::new())
        }
    }
}

/// 특정 카테고리에 속한 사진들을 생성 시각 내림차순으로 조회합니다.
///
/// 목록 조회이므로 `list_photos`와 같은 에러 마스킹 정책을 따릅니다.
pub async fn list_photos_by_category(
    pool: &SqlitePool,
    category_id: &str,
) -> Result<Vec<Photo>, AppError> {
    let photos = sqlx::query_as::<_, Photo>(
        r#"
        SELECT id, title, description, image_url, background_color, category_id,
               created_at, updated_at
        FROM photos
        WHERE category_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await;

    match photos {
        Ok(rows) => Ok(rows),
        Err(e) => {
            tracing::error!("Error listing photos by category: {}", e);
            Ok(Vec::new())
        }
    }
}

/// ID로 사진 하나를 조회합니다.
///
/// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some(Photo)을 반환합니다.
pub async fn get_photo(pool: &SqlitePool, id: &str) -> Result<Option<Photo>, AppError> {
    let photo = sqlx::query_as::<_, Photo>(
        r#"
        SELECT id, title, description, image_url, background_color, category_id,
               created_at, updated_at
        FROM photos
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(photo)
}

/// 새 사진 메타데이터를 저장하고 생성된 사진을 반환합니다.
///
/// ## 처리 흐름
/// 1. UUIDv4로 고유 ID 생성
/// 2. 생성 시각을 한 번만 계산하여 `created_at == updated_at`으로 기록
/// 3. INSERT 후 다시 조회하여 완전한 Photo 객체를 반환
///
/// 이미지 파일은 이 함수 호출 전에 이미 디스크에 기록되어 있어야 하며,
/// `new.image_url`이 그 공개 경로를 가리킵니다. 파일 쓰기와 행 삽입은
/// 하나의 트랜잭션이 아닙니다 — 그 사이에 프로세스가 죽으면 참조되지 않는
/// 고아 파일이 남을 수 있고, 이는 허용되는 비일관성입니다.
pub async fn create_photo(pool: &SqlitePool, new: &NewPhoto) -> Result<Photo, AppError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_timestamp();

    sqlx::query(
        r#"
        INSERT INTO photos (id, title, description, image_url, background_color,
                            category_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.image_url)
    .bind(&new.background_color)
    .bind(&new.category_id)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    get_photo(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created photo".to_string()))
}

/// 사진 메타데이터를 부분 업데이트합니다.
///
/// 요청에 포함된 필드만 변경합니다. 수정 가능한 필드는
/// `UpdatePhotoRequest`에 열거된 네 가지(제목/설명/배경색/카테고리)뿐이며,
/// `id`/`created_at`은 절대 바뀌지 않고 `updated_at`은 항상 갱신됩니다.
///
/// `COALESCE(?, 컬럼)`: 바인딩된 값이 NULL(= 요청에 없는 필드)이면
/// 기존 컬럼 값을 유지합니다. 덕분에 부분 업데이트가 UPDATE 한 문장으로
/// 끝나고, 행 단위 원자성이 문장 원자성으로 보장됩니다.
///
/// ## 반환값
/// - `Ok(Some(Photo))`: 업데이트 성공, 변경된 사진 반환
/// - `Ok(None)`: 해당 ID의 사진이 존재하지 않음 (404 처리는 핸들러에 위임)
/// - `Err(...)`: DB 에러 발생
pub async fn update_photo(
    pool: &SqlitePool,
    id: &str,
    req: &UpdatePhotoRequest,
) -> Result<Option<Photo>, AppError> {
    let now = now_timestamp();

    let result = sqlx::query(
        r#"
        UPDATE photos
        SET title            = COALESCE(?, title),
            description      = COALESCE(?, description),
            background_color = COALESCE(?, background_color),
            category_id      = COALESCE(?, category_id),
            updated_at       = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.background_color)
    .bind(&req.category_id)
    .bind(&now)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    // 업데이트 후 최신 상태를 조회하여 반환
    get_photo(pool, id).await
}

/// ID로 사진 행을 삭제합니다.
///
/// 이미지 파일 삭제는 호출자(라우트 핸들러)의 best-effort 책임입니다 —
/// 파일 삭제가 실패해도 행 삭제는 롤백되지 않습니다.
///
/// ## 반환값
/// - `true`: 삭제 성공 (1행 이상 삭제됨)
/// - `false`: 해당 ID의 사진이 존재하지 않아 삭제된 행이 없음
pub async fn delete_photo(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM photos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
