pub mod jwt;
pub mod password;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{
    db::now_sec,
    error::{AppError, AppResult},
    logger::AppLogger,
    models::{LoginRequest, LoginResponse, LoginUser},
    services::UserService,
};

use self::jwt::{Claims, JwtKeys};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub, email: claims.email }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(unauthorized)
    }
}

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    keys: JwtKeys,
    logger: AppLogger,
}

impl AuthService {
    pub fn new(users: UserService, keys: JwtKeys, logger: &AppLogger) -> Self {
        Self { users, keys, logger: logger.for_context("AuthService") }
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginResponse> {
        self.logger.log("Login attempt", json!({ "email": req.email }));

        let user = match self.users.find_by_email(&req.email).await? {
            Some(user) if user.is_active => user,
            _ => {
                self.logger.warn(
                    "Login rejected",
                    json!({ "email": req.email, "reason": "unknown or inactive user" }),
                );
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            },
        };

        if !self.users.verify_password(&user, &req.password)? {
            self.logger
                .warn("Login rejected", json!({ "email": req.email, "reason": "bad password" }));
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = self
            .keys
            .issue(user.id, &user.email, now_sec())
            .map_err(|e| anyhow::anyhow!("token signing failed: {e}"))?;

        self.logger.log("Login succeeded", json!({ "userId": user.id }));
        Ok(LoginResponse {
            access_token,
            user: LoginUser { id: user.id, email: user.email, role: user.role },
        })
    }

    pub fn verify(&self, token: &str) -> AppResult<AuthUser> {
        self.keys.verify(token).map(AuthUser::from).map_err(|_| unauthorized())
    }
}

/// Rejects the request with 401 unless it carries a valid
/// `Authorization: Bearer <token>` header.
pub async fn require_bearer(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(unauthorized)?;

    let user = auth.verify(token)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_string())
}
