use std::borrow::Cow;

use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::seconds_until;
use crate::auth::password::{hash_password, verify_password};
use crate::cache::token_store::{TokenDenyList, ACCESS_DENY_PREFIX, REFRESH_DENY_PREFIX};
use crate::domain::password::validate_password_with_context;
use crate::entities::token::AuthResponse;
use crate::entities::user::{LoginUser, NewUser, NewUserResponse, PublicUser, User};
use crate::errors::{AppError, AuthError, FieldError};
use crate::repositories::token::TokenServiceRepository;
use crate::repositories::user::UserRepository;

pub struct AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub token_service: T,
    pub deny_list: Option<TokenDenyList>,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, token_service: T, deny_list: Option<TokenDenyList>) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            deny_list,
        }
    }

    /// Registers a new alumnus after validation and password hashing
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let context = [request.email.as_str(), request.display_name.as_str()];
        if let Err(err) = validate_password_with_context(&request.password, &context) {
            return Err(AppError::ValidationError(vec![FieldError {
                field: "password".to_string(),
                message: err
                    .message
                    .unwrap_or(Cow::Borrowed("Password is too weak"))
                    .into_owned(),
            }]));
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let id = self.user_repo.create_user(&user_insert).await?;
        tracing::info!(user_id = %id, "Registered new alumnus");

        Ok(NewUserResponse {
            id,
            message: "User created successfully".to_string(),
        })
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate().map_err(|_| AuthError::WrongCredentials)?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|e| {
                tracing::error!("User lookup failed during login: {}", e);
                AuthError::WrongCredentials
            })?
            .ok_or(AuthError::WrongCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Issues a new token pair. The presented refresh token is deny-listed
    /// when Redis is available, so each refresh token works once.
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        if self.is_revoked(REFRESH_DENY_PREFIX, token).await? {
            return Err(AuthError::TokenRevoked);
        }

        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .filter(|user| user.deleted_at.is_none())
            .ok_or(AuthError::WrongCredentials)?;

        let response = self.create_auth_response(&user)?;
        self.revoke(REFRESH_DENY_PREFIX, token, decoded.claims.exp).await?;

        Ok(response)
    }

    /// Revokes both tokens until they expire. Without Redis this is a no-op
    /// and the tokens simply run out.
    pub async fn logout(&self, refresh_token: &str, access_token: &str) -> Result<(), AuthError> {
        let access = self.token_service.decode_jwt(access_token)?.claims;
        let refresh = self.token_service.decode_refresh_jwt(refresh_token)?.claims;

        if access.sub != refresh.sub {
            return Err(AuthError::InvalidToken);
        }

        if self.deny_list.is_none() {
            tracing::debug!(user_id = %access.sub, "Logout without Redis; tokens expire naturally");
            return Ok(());
        }

        self.revoke(ACCESS_DENY_PREFIX, access_token, access.exp).await?;
        self.revoke(REFRESH_DENY_PREFIX, refresh_token, refresh.exp).await?;

        tracing::info!(user_id = %access.sub, "User logged out");
        Ok(())
    }

    pub async fn is_access_token_revoked(&self, token: &str) -> Result<bool, AuthError> {
        self.is_revoked(ACCESS_DENY_PREFIX, token).await
    }

    async fn is_revoked(&self, prefix: &str, token: &str) -> Result<bool, AuthError> {
        match &self.deny_list {
            Some(deny_list) => deny_list.is_revoked(prefix, token).await,
            None => Ok(false),
        }
    }

    async fn revoke(&self, prefix: &str, token: &str, exp: usize) -> Result<(), AuthError> {
        match &self.deny_list {
            Some(deny_list) => deny_list.revoke(prefix, token, seconds_until(exp)).await,
            None => Ok(()),
        }
    }

    /// Active account behind an authenticated request.
    pub async fn current_user(&self, user_id: &Uuid) -> Result<User, AppError> {
        self.user_repo
            .get_user_by_id(user_id)
            .await?
            .filter(|user| user.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn get_user(&self, user_id: &Uuid) -> Result<PublicUser, AppError> {
        self.current_user(user_id).await.map(PublicUser::from)
    }

    /// Soft-deletes `target_id`. Alumni may delete themselves; admins anyone.
    pub async fn delete_user(&self, target_id: Uuid, actor: &User) -> Result<(), AppError> {
        if actor.id != target_id && !actor.is_admin {
            tracing::warn!(actor = %actor.id, target = %target_id, "Refused account deletion");
            return Err(AppError::ForbiddenAccess);
        }

        self.user_repo.delete_user(&target_id, &actor.id).await?;
        tracing::info!(actor = %actor.id, target = %target_id, "Account soft-deleted");
        Ok(())
    }
}
