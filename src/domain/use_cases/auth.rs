use uuid::Uuid;
use validator::Validate;

use crate::entities::token::AuthResponse;
use crate::entities::profile::{LoginUser, NewUser, NewUserResponse, Profile};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::profile::ProfileRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::repositories::token::TokenServiceRepository;

pub struct AuthHandler<R, T>
where
    R: ProfileRepository,
    T: TokenServiceRepository,
{
    pub profile_repo: R,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: ProfileRepository,
    T: TokenServiceRepository,
{
    pub fn new(profile_repo: R, token_service: T) -> Self {
        AuthHandler {
            profile_repo,
            token_service
        }
    }

    /// Registers a new account after validation and password hashing
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let profile_insert = request.prepare_for_insert(hashed_password);

        let id = self.profile_repo.create_profile(&profile_insert).await?;

        Ok(NewUserResponse {
            id,
            message: "Account created successfully".to_string(),
        })
    }

    /// Logs in an account by validating credentials and generating JWTs
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let profile = self.profile_repo.get_profile_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &profile.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        if profile.is_disabled {
            return Err(AuthError::AccountDisabled);
        }

        let response = self.create_auth_response(&profile)?;

        tracing::info!("Account logged in successfully");
        Ok(response)
    }

    /// Create auth response
    pub fn create_auth_response(&self, profile: &Profile) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(profile)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&profile.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let profile_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let profile = self.profile_repo.get_profile_by_id(&profile_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        if profile.is_disabled {
            return Err(AuthError::AccountDisabled);
        }

        self.create_auth_response(&profile)
    }
}
