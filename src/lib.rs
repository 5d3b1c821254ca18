//! # Aperture — 개인 사진 포트폴리오 백엔드
//!
//! 방문자는 카테고리별로 사진을 둘러보고, 단일 관리자는 로그인하여
//! 카테고리 생성, 사진 업로드/수정/삭제를 수행합니다.
//!
//! 모듈 구성:
//! - `config`: 환경변수 기반 설정
//! - `db`: 데이터베이스 접근 계층 (카테고리/사진/사용자)
//! - `error`: 공통 에러 타입과 HTTP 변환
//! - `middleware`: 세션 토큰 코덱/인증 판정과 /admin 진입 규칙
//! - `models`: 요청/응답/엔티티 구조체
//! - `routes`: HTTP 핸들러
//! - `services`: 업로드 파일 I/O
//!
//! 라우터 조립(`app`)이 이 파일에 있는 이유: 통합 테스트가 실제 서버를
//! 띄우지 않고도 같은 라우터를 만들어 요청을 흘려볼 수 있게 하기 위함입니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::{delete, get, post}, // HTTP 메서드별 라우팅 함수들
    Router,                        // 라우터: URL 경로와 핸들러를 연결하는 구조체
};
use middleware::admission::admission_gate;
use routes::*; // 핸들러 함수들 (glob import)
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},          // CORS(Cross-Origin Resource Sharing) 설정
    services::{ServeDir, ServeFile}, // 정적 파일 서빙 서비스
    trace::TraceLayer,               // HTTP 요청/응답 로깅 미들웨어
};

pub use routes::photos::AppState;

/// 전체 애플리케이션 라우터를 조립합니다.
///
/// 구성 순서:
/// 1. `/api` 아래의 JSON API 라우트 (인증/카테고리/사진/헬스체크)
/// 2. `/uploads` 아래의 업로드 이미지 정적 서빙
/// 3. 프론트엔드 빌드 산출물이 있으면 fallback으로 서빙 (SPA 라우팅 지원)
/// 4. /admin 진입 규칙 → CORS → 요청 로깅 레이어
///
/// 미들웨어 레이어는 등록된 모든 라우트(fallback 포함)를 감싸므로,
/// /admin 페이지가 fallback으로 서빙되더라도 진입 규칙이 먼저 적용됩니다.
pub fn app(state: AppState) -> Router {
    // 인증 관련 라우트 (로그인, 로그아웃, 세션 확인)
    let auth_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/check", get(routes::auth::check));

    // 모든 API 라우트를 하나로 합칩니다.
    let api_routes = Router::new()
        // .merge(): 다른 라우터의 라우트들을 현재 라우터에 합칩니다.
        .merge(auth_routes)
        // 카테고리 API — 목록/카테고리별 사진은 공개, 생성/삭제는 관리자 전용
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
        .route("/categories/{id}/photos", get(list_category_photos))
        // 사진 API — 조회는 공개, 업로드/수정/삭제는 관리자 전용
        // {id}는 URL 경로 파라미터 (Path<String>으로 핸들러에서 추출)
        .route("/photos", get(list_photos).post(upload_photo))
        .route(
            "/photos/{id}",
            get(get_photo).put(update_photo).delete(delete_photo),
        )
        // 헬스체크 API (서버 상태 확인용)
        .route("/health", get(health_check))
        // .with_state(): 이 라우터의 모든 핸들러에서 AppState를 사용할 수 있게 합니다.
        .with_state(state.clone());

    let router = Router::new()
        // .nest(): API 라우트를 /api 경로 아래에 중첩시킵니다.
        // 예: /photos → /api/photos
        .nest("/api", api_routes)
        // 업로드된 이미지 파일을 /uploads/* 로 서빙합니다.
        .nest_service("/uploads", ServeDir::new(&state.uploads_path));

    // 빌드된 프론트엔드 파일이 있으면 같은 서버에서 서빙합니다.
    // SPA(Single Page Application)이므로, 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let frontend_dist = Path::new("frontend/dist");
    let router = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from frontend/dist");

        // ServeDir: 디렉토리의 파일을 HTTP로 서빙하는 서비스
        // not_found_service: 파일을 찾지 못하면 index.html을 반환 (SPA 라우팅 지원)
        let serve_dir = ServeDir::new("frontend/dist")
            .not_found_service(ServeFile::new("frontend/dist/index.html"));

        router.fallback_service(serve_dir)
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");
        router
    };

    // CORS: 브라우저의 보안 정책. 다른 도메인에서의 API 호출을 허용/차단합니다.
    // 개발 환경에서는 Any(모두 허용)로 설정합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        // /admin 경로 진입 규칙 — 미인증 브라우저 내비게이션을 로그인으로,
        // 이미 로그인한 관리자의 로그인 페이지 접근을 대시보드로 돌려보냅니다.
        .layer(axum::middleware::from_fn_with_state(state, admission_gate))
        .layer(cors)
        .layer(TraceLayer::new_for_http()) // HTTP 요청/응답 자동 로깅
}
