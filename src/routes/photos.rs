//! # 사진(Photo) 라우트 핸들러
//!
//! 사진의 조회/업로드/수정/삭제를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET    /api/photos`      → 사진 목록 조회 (공개)
//! - `POST   /api/photos`      → 사진 업로드 (multipart 폼, 관리자 전용)
//! - `GET    /api/photos/{id}` → 단일 사진 조회 (공개)
//! - `PUT    /api/photos/{id}` → 사진 메타데이터 수정 (관리자 전용)
//! - `DELETE /api/photos/{id}` → 사진 삭제 + 이미지 파일 best-effort 삭제 (관리자 전용)
//!
//! ## Axum 핸들러 패턴
//! Axum 핸들러는 **Extractor(추출기)**를 매개변수로 받습니다.
//! Extractor는 HTTP 요청에서 데이터를 자동으로 추출합니다:
//! - `State(state)`: 앱 전역 상태 (DB 풀, 설정 등)
//! - `AdminSession`: 세션 쿠키 검증 — 실패 시 핸들러 본문 실행 전에 401 반환
//! - `Path(id)`: URL 경로 파라미터 (예: /photos/{id}에서 id)
//! - `Json(body)` / `Multipart`: 요청 본문 파싱
//!
//! 반환 타입이 `Result<T, AppError>`이면, Axum이 자동으로:
//! - `Ok(T)` → T를 HTTP 응답으로 변환 (IntoResponse 트레이트 사용)
//! - `Err(AppError)` → AppError를 에러 JSON 응답으로 변환

use crate::{
    db,            // 데이터베이스 접근 계층
    error::AppError,
    middleware::auth::AdminSession,
    models::*,     // 데이터 모델 구조체들
    services,      // 파일 I/O (업로드 저장/삭제)
};
use axum::{
    extract::{Multipart, Path, State}, // Axum Extractor: 요청에서 데이터 추출
    Json,                              // JSON 요청/응답 래퍼
};
use serde_json::{json, Value}; // JSON 값 생성 유틸리티
use sqlx::SqlitePool;          // SQLite 연결 풀 타입

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 의존성 주입(Dependency Injection) 메커니즘입니다.
///
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도
/// 실제 연결 풀이 복제되지 않고 같은 풀을 가리킵니다.
/// 풀은 프로세스 시작 시 한 번 만들어져 모든 요청이 재사용합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 세션 토큰 발급/검증용 공유 비밀값
    pub session_secret: String,
    /// 업로드된 사진이 저장되는 디렉토리 경로
    pub uploads_path: String,
}

/// `GET /api/photos` — 전체 사진 목록을 조회합니다 (공개).
///
/// 최신 사진이 먼저 오도록 생성 시각 내림차순으로 정렬된 배열을 반환합니다.
/// 인증 검사가 없습니다 — 방문자용 읽기 전용 API입니다.
pub async fn list_photos(State(state): State<AppState>) -> Result<Json<Vec<Photo>>, AppError> {
    let photos = db::list_photos(&state.pool).await?;
    Ok(Json(photos))
}

/// `GET /api/photos/{id}` — 단일 사진을 조회합니다 (공개).
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Photo>, AppError> {
    let photo = db::get_photo(&state.pool, &id)
        .await?
        // .ok_or(): Option이 None이면 지정한 에러를 반환합니다.
        // 사진을 찾지 못하면 404 NotFound 응답이 됩니다.
        .ok_or(AppError::NotFound)?;
    Ok(Json(photo))
}

/// `POST /api/photos` — 새 사진을 업로드합니다 (관리자 전용).
///
/// multipart/form-data 본문에서 파일과 메타데이터를 수집합니다:
/// `file`(필수), `title`(필수), `categoryId`(필수),
/// `description`/`backgroundColor`(선택).
///
/// 파일 바이트를 먼저 디스크에 기록한 뒤 DB에 행을 삽입합니다.
/// 두 쓰기는 트랜잭션이 아닙니다 — 사이에 실패하면 고아 파일이 남을 수
/// 있고, 이는 허용됩니다.
pub async fn upload_photo(
    State(state): State<AppState>,
    _session: AdminSession, // 세션 검증 — 미인증이면 여기서 401
    mut multipart: Multipart,
) -> Result<Json<Photo>, AppError> {
    // 폼 필드를 순회하며 수집합니다. 필드 순서는 클라이언트 마음이므로
    // 전부 모은 뒤에 필수 항목을 검사합니다.
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut background_color: Option<String> = None;
    let mut category_id: Option<String> = None;

    // next_field(): 다음 폼 필드를 비동기로 읽습니다. 본문이 잘못된
    // multipart면 에러 → 400 Bad Request로 변환합니다.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {}", e)))?
    {
        // 필드 이름을 먼저 소유된 String으로 복사합니다 — 아래에서
        // field 자체를 소비(bytes()/text())해야 하기 때문입니다.
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                // file_name(): 업로드 폼이 보낸 원본 파일명
                let filename = field.file_name().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid file field: {}", e)))?;
                if let Some(filename) = filename {
                    file = Some((filename, bytes.to_vec()));
                }
            }
            "title" => title = Some(read_text_field(field).await?),
            "description" => description = Some(read_text_field(field).await?),
            "backgroundColor" => background_color = Some(read_text_field(field).await?),
            "categoryId" => category_id = Some(read_text_field(field).await?),
            // 알 수 없는 필드는 무시합니다
            _ => {}
        }
    }

    // 필수 항목 검사 — 빈 문자열도 누락으로 간주합니다.
    // .filter(): Option 안의 값이 조건을 만족하지 않으면 None으로 바꿉니다.
    let title = title.filter(|t| !t.is_empty());
    let category_id = category_id.filter(|c| !c.is_empty());
    let (Some((filename, bytes)), Some(title), Some(category_id)) = (file, title, category_id)
    else {
        return Err(AppError::BadRequest(
            "Title, file, and category are required".to_string(),
        ));
    };

    // 1. 파일을 디스크에 저장하고 공개 경로를 받습니다
    let image_url = services::save_upload(&state.uploads_path, &filename, &bytes).await?;

    // 2. 메타데이터 행을 삽입합니다
    let photo = db::create_photo(
        &state.pool,
        &NewPhoto {
            title,
            description,
            image_url,
            background_color,
            category_id: Some(category_id),
        },
    )
    .await?;

    Ok(Json(photo))
}

/// multipart 텍스트 필드를 String으로 읽는 헬퍼입니다.
async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form field: {}", e)))
}

/// `PUT /api/photos/{id}` — 사진 메타데이터를 부분 수정합니다 (관리자 전용).
///
/// 본문에 포함된 필드만 변경됩니다. 수정 가능한 필드는
/// `UpdatePhotoRequest`가 열거한 네 가지뿐이며, 그 외의 키가 본문에
/// 있으면 역직렬화 단계에서 거부됩니다 (`deny_unknown_fields`).
pub async fn update_photo(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(req): Json<UpdatePhotoRequest>,
) -> Result<Json<Photo>, AppError> {
    let photo = db::update_photo(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(photo))
}

/// `DELETE /api/photos/{id}` — 사진을 삭제합니다 (관리자 전용).
///
/// 이미지 파일을 best-effort로 먼저 삭제한 뒤 행을 지웁니다.
/// 파일 삭제 실패는 로그만 남기고 무시합니다 — 행 삭제가 성공하면
/// 응답은 성공입니다.
pub async fn delete_photo(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let photo = db::get_photo(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    // best-effort: 실패해도 행 삭제를 막지 않습니다
    services::remove_upload(&state.uploads_path, &photo.image_url).await;

    db::delete_photo(&state.pool, &id).await?;
    Ok(Json(json!({ "success": true })))
}
