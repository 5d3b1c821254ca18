//! # 사진 모델 정의
//!
//! 포트폴리오의 사진(Photo) 관련 데이터 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `Photo`: 데이터베이스에 저장된 사진 메타데이터를 표현 (응답용)
//! - `NewPhoto`: 업로드 폼에서 수집한 필드 묶음 (생성 시 DB 계층에 전달)
//! - `UpdatePhotoRequest`: 사진 수정 시 클라이언트가 보내는 JSON 본문
//!
//! ## JSON 필드 이름
//! DB 컬럼과 Rust 필드는 snake_case(`image_url`)이지만,
//! API의 JSON은 camelCase(`imageUrl`)를 사용합니다.
//! `#[serde(rename_all = "camelCase")]`가 이 변환을 담당합니다.
//! `sqlx::FromRow`는 serde와 무관하게 Rust 필드 이름으로 컬럼을 찾습니다.

use serde::{Deserialize, Serialize};

/// 사진 엔티티 — DB의 `photos` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// 사진 고유 식별자 (UUIDv4 형식 문자열, 생성 후 불변)
    pub id: String,
    /// 사진 제목 (필수)
    pub title: String,
    /// 사진 설명 (선택)
    pub description: Option<String>,
    /// 저장된 이미지 파일의 공개 경로 (예: "/uploads/sunset.jpg")
    /// 생성 시 한 번 기록되며, 실제 파일 존재 여부는 검증하지 않습니다.
    pub image_url: String,
    /// 표시용 배경색 힌트 (예: "#1a1a2e"), 없으면 프론트엔드가 중립색을 사용
    pub background_color: Option<String>,
    /// 사진이 속한 카테고리의 id (선택) — 존재가 강제되지 않는 참조입니다.
    /// 카테고리가 삭제되어도 이 값은 남으며, 표시 계층이 "Uncategorized"로 처리합니다.
    pub category_id: Option<String>,
    /// 생성 시각 (ISO 8601 문자열, 생성 후 불변)
    pub created_at: String,
    /// 마지막 수정 시각 — 수정할 때마다 갱신됩니다
    pub updated_at: String,
}

/// 사진 생성 입력 — 업로드 핸들러가 multipart 폼에서 수집하여
/// DB 계층(`db::create_photo`)에 전달하는 필드 묶음입니다.
///
/// id와 created_at/updated_at은 여기 없습니다 — 서버가 생성 시점에 부여합니다.
#[derive(Debug)]
pub struct NewPhoto {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub background_color: Option<String>,
    pub category_id: Option<String>,
}

/// 사진 수정 요청 — `PUT /api/photos/{id}`의 요청 본문에 해당합니다.
///
/// 모든 필드가 Option인 이유: 부분 업데이트(partial update)이기 때문입니다.
/// 클라이언트가 변경하고 싶은 필드만 보내면 되고, 빠진 필드는 그대로 유지됩니다.
///
/// `deny_unknown_fields`: 여기 나열된 네 필드 외의 키(`id`, `createdAt`,
/// `updatedAt` 포함)가 본문에 있으면 역직렬화 자체를 거부합니다.
/// 수정 가능한 필드의 목록이 이 구조체 정의 하나로 고정됩니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePhotoRequest {
    /// 변경할 제목 (None이면 변경하지 않음)
    pub title: Option<String>,
    /// 변경할 설명 (None이면 변경하지 않음)
    pub description: Option<String>,
    /// 변경할 배경색 (None이면 변경하지 않음)
    pub background_color: Option<String>,
    /// 변경할 카테고리 id (None이면 변경하지 않음)
    pub category_id: Option<String>,
}
