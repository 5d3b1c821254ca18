//! # Aperture 웹 서버 진입점
//!
//! 이 파일은 Aperture 애플리케이션의 **시작점(entry point)**입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 업로드 디렉토리 생성
//! 6. 관리자 계정 시딩
//! 7. 라우터 조립 및 HTTP 서버 시작

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use aperture::{config::Config, db, routes::photos::AppState};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sqlx::sqlite::SqlitePoolOptions; // SQLite 연결 풀 설정 옵션
use sqlx::SqlitePool;
use std::path::Path; // 파일 경로를 다루는 표준 라이브러리 타입
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: 비동기 런타임을 시작하는 **어트리뷰트 매크로**
// async/await를 사용하려면 비동기 런타임(Tokio)이 필요합니다.
// 이 매크로가 내부적으로 tokio 런타임을 생성하고 main을 그 안에서 실행합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일에서 환경변수를 읽어옵니다. (예: DATABASE_URL, SESSION_SECRET 등)
    // .ok()는 Result를 Option으로 변환하여, .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry(): 로그 수집기를 만들고
    // .with(): 필터와 포맷터를 레이어처럼 쌓아올립니다
    tracing_subscriber::registry()
        .with(
            // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
            // 환경변수가 없으면 기본값으로 aperture, tower_http, axum 모듈을 debug 레벨로 설정
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aperture=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer()) // 로그를 터미널에 출력하는 포맷터 레이어
        .init(); // 전역 로거로 등록

    // ── 3단계: 설정 로딩 ──
    // `?` 연산자: Result가 Err이면 즉시 함수에서 반환(에러 전파).
    let config = Config::from_env()?;
    tracing::info!("Starting Aperture server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 연결 풀(Connection Pool): 데이터베이스 연결을 미리 여러 개 만들어두고
    // 재사용하는 패턴. 풀은 여기서 한 번만 만들어지고, 이후 모든 요청이
    // AppState를 통해 같은 풀을 공유합니다 (요청마다 재초기화하지 않음).
    let pool = SqlitePoolOptions::new()
        .max_connections(5) // 최대 5개의 동시 연결을 유지
        .connect(&config.database_url) // 데이터베이스에 연결 (비동기)
        .await?; // 연결 실패 시 에러 전파

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    // sqlx::migrate!는 컴파일 타임에 ./migrations 폴더의 SQL 파일들을 포함시키는 매크로
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool) // 아직 실행되지 않은 마이그레이션만 순서대로 실행
        .await?;

    // ── 6단계: 업로드 디렉토리 생성 ──
    // 업로드된 사진 파일을 저장할 디렉토리가 없으면 생성합니다.
    let uploads_path = Path::new(&config.uploads_path);
    if !uploads_path.exists() {
        // create_dir_all: 중간 디렉토리까지 모두 생성 (mkdir -p와 같음)
        tokio::fs::create_dir_all(uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    // ── 7단계: 관리자 계정 시딩 ──
    // users 테이블에 관리자 계정이 없으면 설정값으로 생성합니다.
    // 로그인 경로는 이 테이블을 조회하므로, 시딩이 곧 로그인 가능 조건입니다.
    seed_admin(&pool, &config).await?;

    // ── 8단계: 애플리케이션 상태(State) 생성 및 라우터 조립 ──
    // AppState: 모든 라우트 핸들러가 공유하는 데이터를 담는 구조체
    let state = AppState {
        pool: pool.clone(),
        session_secret: config.session_secret.clone(),
        uploads_path: config.uploads_path.clone(),
    };
    let app = aperture::app(state);

    // ── 9단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    // TcpListener: TCP 연결을 수신 대기하는 소켓
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // axum::serve(): Axum 서버를 시작하고 요청을 처리합니다.
    // 이 줄에서 서버가 영원히 실행됩니다 (Ctrl+C로 종료할 때까지).
    axum::serve(listener, app).await?;

    Ok(())
}

/// 관리자 계정이 없으면 생성합니다.
///
/// 비밀번호는 평문이 아니라 argon2 해시로 저장되며,
/// 로그인 핸들러가 같은 해시를 검증합니다.
async fn seed_admin(pool: &SqlitePool, config: &Config) -> Result<()> {
    if db::users::find_by_username(pool, &config.admin_username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    // Argon2id로 비밀번호 해싱 — 솔트는 OS 난수 생성기에서 생성
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(config.admin_password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    let id = uuid::Uuid::new_v4().to_string();
    db::users::create_user(pool, &id, &config.admin_username, &password_hash).await?;
    tracing::info!("Seeded admin user '{}'", config.admin_username);

    Ok(())
}
