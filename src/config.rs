//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `SESSION_SECRET`: 세션 토큰에 포함되는 공유 비밀값
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD`: 시작 시 시딩할 관리자 계정
//! - `UPLOADS_PATH`: 업로드된 사진 파일 저장 디렉토리
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

// std::env: Rust 표준 라이브러리의 환경변수 모듈
use std::env;

// #[derive(...)]: 자동으로 트레이트 구현을 생성하는 **derive 매크로**
// - Debug: {:?} 포맷으로 출력 가능 (디버깅용 문자열 표현)
// - Clone: .clone() 메서드로 값을 복제 가능
#[derive(Debug, Clone)]
/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
pub struct Config {
    /// SQLite 데이터베이스 파일 경로 (예: "sqlite:data/aperture.db")
    pub database_url: String,
    /// 세션 토큰 발급/검증에 사용하는 공유 비밀값
    ///
    /// 토큰은 서버 측 세션 테이블 없이 이 값만으로 검증되므로,
    /// 이 값을 바꾸면 발급된 모든 토큰이 즉시 무효가 됩니다.
    pub session_secret: String,
    /// 시작 시 users 테이블에 시딩할 관리자 아이디 (기본값: "admin")
    pub admin_username: String,
    /// 관리자 비밀번호 (기본값: "admin123") — 저장 시 argon2로 해싱됩니다
    pub admin_password: String,
    /// 업로드된 사진이 저장되는 디렉토리 경로
    pub uploads_path: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    /// u16: 0~65535 범위의 부호 없는 16비트 정수. 포트 번호에 딱 맞는 타입입니다.
    pub port: u16,
}

// impl: 구조체에 메서드를 추가하는 블록
impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 반환값
    /// - `Ok(Config)`: 필수 환경변수가 모두 있으면 설정 객체 반환
    /// - `Err(VarError)`: 필수 환경변수(DATABASE_URL, SESSION_SECRET)가 없으면 에러
    ///
    /// # 에러
    /// `DATABASE_URL`과 `SESSION_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            // env::var("KEY"): 환경변수를 읽습니다.
            // 반환 타입은 Result<String, VarError>이며,
            // `?`를 사용해 변수가 없으면 즉시 에러를 반환합니다.
            database_url: env::var("DATABASE_URL")?,      // 필수: 없으면 에러
            session_secret: env::var("SESSION_SECRET")?,   // 필수: 없으면 에러

            // unwrap_or_else(|_| ...): Result가 Err일 때 실행할 클로저를 지정합니다.
            admin_username: env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
            uploads_path: env::var("UPLOADS_PATH")
                .unwrap_or_else(|_| "public/uploads".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            // 포트 번호는 문자열 → 숫자 변환이 필요합니다.
            // .parse(): 문자열을 다른 타입으로 파싱. 여기서는 u16으로 변환합니다.
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000), // 파싱 실패 시 기본값
        })
    }
}
