//! # 업로드 이미지 파일 I/O 서비스
//!
//! 업로드된 사진 파일의 디스크 저장과 삭제를 담당합니다.
//!
//! 이 모듈의 함수들:
//! - `save_upload()`: 업로드 바이트를 디스크에 저장하고 공개 경로를 반환
//! - `remove_upload()`: 공개 경로가 가리키는 파일을 best-effort로 삭제
//!
//! 파일 쓰기와 DB 행 쓰기는 트랜잭션으로 묶이지 않습니다.
//! 그 사이에 프로세스가 죽으면 고아 파일이 남을 수 있으며,
//! 이는 허용되는 비일관성입니다 (재시도/중복제거/정합성 로직 없음).

use crate::error::AppError;
// Path: 파일 경로를 나타내는 불변 참조 타입 (&str과 비슷한 역할)
// PathBuf: 소유된 파일 경로 타입 (String과 비슷한 역할)
use std::path::PathBuf;
// tokio::fs: 비동기 파일 시스템 모듈
// 일반 std::fs는 동기(블로킹)이므로, 비동기 서버에서는 tokio::fs를 사용합니다.
use tokio::fs;

/// 업로드된 파일 바이트를 디스크에 저장하고 공개 URL 경로를 반환합니다.
///
/// 파일은 원본 파일명 그대로 `uploads_path` 아래에 저장됩니다.
/// 같은 이름의 파일이 이미 있으면 덮어씁니다.
///
/// # 매개변수
/// - `uploads_path`: 업로드 저장 루트 디렉토리 (예: "public/uploads")
/// - `filename`: 업로드 폼에서 받은 원본 파일명
/// - `bytes`: 파일 내용
///
/// # 반환값
/// - `Ok(String)`: 사진의 `image_url`로 기록될 공개 경로 (예: "/uploads/sunset.jpg")
/// - `Err(AppError::Io)`: 디렉토리 생성 또는 파일 쓰기 실패
pub async fn save_upload(
    uploads_path: &str,
    filename: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let full_path = PathBuf::from(uploads_path).join(filename);

    // 업로드 디렉토리가 없으면 생성합니다 (mkdir -p와 같음).
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs::write(&full_path, bytes).await?;
    Ok(format!("/uploads/{}", filename))
}

/// 공개 경로(`image_url`)가 가리키는 업로드 파일을 삭제합니다.
///
/// best-effort 연산입니다: 파일이 없거나 삭제가 실패해도 에러를 반환하지
/// 않고 로그만 남깁니다. 사진 행 삭제는 파일 삭제 실패와 무관하게
/// 성공으로 처리되어야 합니다 (행은 지워지고 파일만 남는 쪽을 허용).
pub async fn remove_upload(uploads_path: &str, image_url: &str) {
    // "/uploads/sunset.jpg" → "sunset.jpg"
    let filename = image_url.strip_prefix("/uploads/").unwrap_or(image_url);
    let full_path = PathBuf::from(uploads_path).join(filename);

    if let Err(e) = fs::remove_file(&full_path).await {
        tracing::error!("Error deleting image file {}: {}", full_path.display(), e);
    }
}
