//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use hrdocs_domain::Role;

use crate::backend::AuthBackend;
use crate::claims::AuthPayload;
use crate::error::AuthError;
use crate::guard::{guard, RouteAccess};

/// Any authenticated employee with an active contract
#[derive(Debug)]
pub struct AuthUser(pub AuthPayload);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let payload = guard(
            RouteAccess::Authenticated,
            parts.headers.get(AUTHORIZATION),
            &backend,
        )?
        .ok_or(AuthError::MissingAuthorization)?;

        Ok(AuthUser(payload))
    }
}

/// Role set a route requires
pub trait RoleSet: Send + Sync + 'static {
    const ROLES: &'static [Role];
}

#[derive(Debug)]
pub struct ManagerOrAdmin;

impl RoleSet for ManagerOrAdmin {
    const ROLES: &'static [Role] = &[Role::Manager, Role::Admin];
}

#[derive(Debug)]
pub struct AdminOnly;

impl RoleSet for AdminOnly {
    const ROLES: &'static [Role] = &[Role::Admin];
}

/// Authenticated employee holding one of `R::ROLES`.
///
/// Authentication failures (401) always win over role failures (403).
#[derive(Debug)]
pub struct RequireRoles<R: RoleSet> {
    pub payload: AuthPayload,
    _roles: PhantomData<R>,
}

impl<R: RoleSet> RequireRoles<R> {
    pub fn into_inner(self) -> AuthPayload {
        self.payload
    }
}

impl<S, R> FromRequestParts<S> for RequireRoles<R>
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
    R: RoleSet,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let payload = guard(
            RouteAccess::Roles(R::ROLES),
            parts.headers.get(AUTHORIZATION),
            &backend,
        )?
        .ok_or(AuthError::MissingAuthorization)?;

        Ok(RequireRoles {
            payload,
            _roles: PhantomData,
        })
    }
}

pub type ManagerOrAdminUser = RequireRoles<ManagerOrAdmin>;
pub type AdminUser = RequireRoles<AdminOnly>;
