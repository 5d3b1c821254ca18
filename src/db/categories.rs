//! # 카테고리 데이터베이스 쿼리 모듈
//!
//! 카테고리의 생성/조회/삭제를 담당하는 SQL 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! 카테고리에는 수정 연산이 없습니다. 이름은 `UNIQUE` 제약이 걸려 있으며,
//! 중복 생성 시도는 `AppError::Conflict`(HTTP 409)로 변환됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 모든 카테고리를 이름 오름차순으로 조회합니다.
///
/// `sqlx::query_as::<_, Category>(sql)` 설명:
/// - `query_as`는 SQL 결과를 지정한 구조체(Category)로 자동 변환합니다
/// - `<_, Category>`에서 `_`는 DB 드라이버(SQLite)를 컴파일러가 추론하게 하고,
///   `Category`는 결과를 매핑할 대상 구조체입니다
/// - `fetch_all`은 모든 행을 Vec으로 반환합니다
///
/// DB 에러가 발생하면 로그에 남기고 빈 목록을 반환합니다 — 공개 갤러리
/// 페이지는 저장소 장애 시에도 빈 화면으로나마 응답해야 합니다.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, description FROM categories ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await;

    match categories {
        Ok(rows) => Ok(rows),
        Err(e) => {
            tracing::error!("Error listing categories: {}", e);
            Ok(Vec::new())
        }
    }
}

/// ID로 카테고리 하나를 조회합니다.
///
/// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some(Category)를 반환합니다.
/// 존재 여부가 불확실한 조회에는 `fetch_one`보다 `fetch_optional`이 안전합니다.
pub async fn get_category(pool: &SqlitePool, id: &str) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// 새 카테고리를 생성하고 생성된 카테고리를 반환합니다.
///
/// ## 처리 흐름
/// 1. 이름이 비어 있으면 `BadRequest` (공백만 있는 이름도 비어 있는 것으로 간주)
/// 2. UUIDv4로 고유 ID 생성
/// 3. INSERT — 이름이 이미 존재하면 UNIQUE 제약 위반이 발생하며,
///    이를 `Conflict`로 변환합니다 (테이블에는 아무 행도 추가되지 않음)
/// 4. 방금 생성한 카테고리를 다시 조회하여 완전한 행을 반환
///
/// `.bind()`는 SQL의 `?` 플레이스홀더에 값을 바인딩합니다.
/// 직접 문자열을 SQL에 넣지 않고 바인딩을 쓰는 이유: SQL 인젝션 방지
pub async fn create_category(
    pool: &SqlitePool,
    req: &CreateCategoryRequest,
) -> Result<Category, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Category name is required".to_string()));
    }

    let id = uuid::Uuid::new_v4().to_string();

    let result = sqlx::query("INSERT INTO categories (id, name, description) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&req.name)
        .bind(&req.description) // Option<String>도 bind 가능 — None이면 SQL NULL로 처리됨
        .execute(pool)
        .await;

    if let Err(e) = result {
        // UNIQUE 제약 위반(중복 이름)은 409 Conflict로, 나머지는 500으로 변환합니다.
        // sqlx::Error::Database: DB 엔진이 보고한 에러 (제약 위반 등)
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return Err(AppError::Conflict(format!(
                    "Category '{}' already exists",
                    req.name
                )));
            }
        }
        return Err(AppError::Database(e));
    }

    // 생성 직후 조회하여 완전한 Category 객체를 반환합니다
    // ok_or(): Option을 Result로 변환 — None이면 지정한 에러를 반환
    get_category(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created category".to_string()))
}

/// ID로 카테고리를 삭제합니다.
///
/// 이 카테고리를 참조하던 사진은 건드리지 않습니다(cascade 없음).
/// 사진의 `category_id`는 남아 있는 dangling 참조가 되며,
/// 표시 계층이 "Uncategorized"로 해석합니다.
///
/// ## 반환값
/// - `true`: 삭제 성공 (1행 이상 삭제됨)
/// - `false`: 해당 ID의 카테고리가 존재하지 않아 삭제된 행이 없음
pub async fn delete_category(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    // rows_affected(): 이 쿼리로 영향받은 행 수를 반환
    Ok(result.rows_affected() > 0)
}
