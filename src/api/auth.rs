//! Caller identity
//!
//! Tokens are verified upstream. By the time a request reaches this service
//! the resolved user id and role are carried in `x-user-id` / `x-user-role`.

use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
    Admin,
}

impl Role {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "agent" => Role::Agent,
            _ => Role::User,
        }
    }
}

/// Authenticated caller. Rejects with 401 when no identity is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may modify a listing
    pub fn can_modify(&self, owner: &str) -> bool {
        self.is_admin() || self.user_id == owner
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "User role is not authorized to access this route".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let user_id = header(USER_ID_HEADER).ok_or(ApiError::Unauthorized)?;
        let role = header(USER_ROLE_HEADER).map(Role::parse).unwrap_or(Role::User);

        Ok(Caller {
            user_id: user_id.to_string(),
            role,
        })
    }
}
