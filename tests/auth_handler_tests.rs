use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use showcase_backend::auth::jwt::JwtService;
use showcase_backend::auth::password::hash_password;
use showcase_backend::entities::profile::{
    LoginUser, NewUser, Profile, ProfileAdminView, ProfileInsert, ROLE_USER,
};
use showcase_backend::errors::{AppError, AuthError};
use showcase_backend::repositories::profile::ProfileRepository;
use showcase_backend::settings::{AppConfig, AppEnvironment};
use showcase_backend::use_cases::auth::AuthHandler;

mock! {
    pub ProfileRepo {}

    #[async_trait::async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn create_profile(&self, profile: &ProfileInsert) -> Result<Uuid, AppError>;
        async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;
        async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError>;
        async fn list_profiles(&self) -> Result<Vec<ProfileAdminView>, AppError>;
        async fn toggle_role(&self, id: &Uuid) -> Result<String, AppError>;
        async fn toggle_disabled(&self, id: &Uuid) -> Result<bool, AppError>;
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Showcase Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: "postgres://localhost/unused".to_string(),
        cors_allowed_origins: vec!["*".to_string()],
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".to_string(),
        jwt_expiration_minutes: 15,
        refresh_token_secret: "test_refresh_secret_that_is_long_enough_1234567890".to_string(),
        refresh_token_exp_days: 7,
        upload_dir: "project-images".to_string(),
        public_base_url: "http://127.0.0.1:8080/images".to_string(),
        resend_api_key: None,
        mail_from: "Projects <projects@test.local>".to_string(),
    }
}

fn profile_with(password: &str, role: &str, is_disabled: bool) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        email: "someone@example.com".to_string(),
        username: Some("someone".to_string()),
        password_hash: hash_password(password).unwrap(),
        role: role.to_string(),
        is_disabled,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn register_creates_an_account() {
    let mut repo = MockProfileRepo::new();
    repo.expect_create_profile()
        .withf(|insert| insert.role == ROLE_USER && !insert.is_disabled)
        .returning(|_| Ok(Uuid::new_v4()));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let result = handler
        .register(NewUser {
            email: "new@example.com".to_string(),
            username: Some("newuser".to_string()),
            password: "Str0ng#Passw0rd!".to_string(),
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn register_rejects_weak_passwords() {
    let repo = MockProfileRepo::new();
    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let result = handler
        .register(NewUser {
            email: "new@example.com".to_string(),
            username: None,
            password: "password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn login_returns_tokens_for_valid_credentials() {
    let password = "Str0ng#Passw0rd!";
    let profile = profile_with(password, "user", false);

    let mut repo = MockProfileRepo::new();
    repo.expect_get_profile_by_email()
        .returning(move |_| Ok(Some(profile.clone())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let result = handler
        .login(LoginUser {
            email: "someone@example.com".to_string(),
            password: password.to_string(),
        })
        .await;

    let tokens = result.expect("login should succeed");
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());
    assert_eq!(tokens.token_type, "Bearer");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let profile = profile_with("Correct#Passw0rd!", "user", false);

    let mut repo = MockProfileRepo::new();
    repo.expect_get_profile_by_email()
        .returning(move |_| Ok(Some(profile.clone())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let result = handler
        .login(LoginUser {
            email: "someone@example.com".to_string(),
            password: "Wrong#Passw0rd!".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let mut repo = MockProfileRepo::new();
    repo.expect_get_profile_by_email().returning(|_| Ok(None));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let result = handler
        .login(LoginUser {
            email: "nobody@example.com".to_string(),
            password: "Whatever#1!".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[tokio::test]
async fn disabled_accounts_cannot_log_in() {
    let password = "Str0ng#Passw0rd!";
    let profile = profile_with(password, "user", true);

    let mut repo = MockProfileRepo::new();
    repo.expect_get_profile_by_email()
        .returning(move |_| Ok(Some(profile.clone())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let result = handler
        .login(LoginUser {
            email: "someone@example.com".to_string(),
            password: password.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::AccountDisabled)));
}

#[tokio::test]
async fn disabled_accounts_cannot_refresh() {
    let profile = profile_with("Str0ng#Passw0rd!", "user", true);
    let profile_id = profile.id;

    let jwt = JwtService::new(&test_config());
    let refresh_token = jwt.create_refresh_jwt(&profile_id).unwrap();

    let mut repo = MockProfileRepo::new();
    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(profile.clone())));

    let handler = AuthHandler::new(repo, jwt);

    let result = handler.refresh_token(&refresh_token).await;
    assert!(matches!(result, Err(AuthError::AccountDisabled)));
}

#[tokio::test]
async fn access_tokens_carry_the_admin_flag() {
    let profile = profile_with("Str0ng#Passw0rd!", "admin", false);

    let jwt = JwtService::new(&test_config());
    let token = jwt.create_jwt(&profile).unwrap();
    let decoded = jwt.decode_jwt(&token).unwrap();

    assert!(decoded.claims.admin);
    assert!(!decoded.claims.disabled);
    assert_eq!(decoded.claims.sub, profile.id.to_string());
}
