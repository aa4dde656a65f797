//! 全局角色门禁
//!
//! 必须套在 `RequireJWT` 之内使用。只检查 `UserRole`（普通用户/管理员），
//! 课程内的教师、助教、学生身份在服务层按课程判断，见 `services::access`。
//!
//! ```rust,ignore
//! web::resource("")
//!     .route(web::post().to(create_course)
//!         .wrap(RequireRole::new_any(UserRole::admin_roles())))
//! ```

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 用户角色命中任一即可放行
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|role| (*role).clone()).collect(),
        }
    }

    pub fn permits(&self, role: &UserRole) -> bool {
        self.allowed.contains(role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            gate: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    gate: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            let verdict = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.role.clone()));

            let (status, code, message) = match verdict {
                Some((_, role)) if gate.permits(&role) => {
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Some((user_id, role)) => {
                    info!(
                        "User {} with role {} denied access to {}",
                        user_id,
                        role,
                        req.path()
                    );
                    (
                        StatusCode::FORBIDDEN,
                        ErrorCode::Forbidden,
                        "Administrator privileges required",
                    )
                }
                // RequireJWT 未生效
                None => (
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                ),
            };

            Ok(req.into_response(
                create_error_response(status, code, message).map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_gate_rejects_plain_users() {
        let gate = RequireRole::new_any(UserRole::admin_roles());
        assert!(gate.permits(&UserRole::Admin));
        assert!(!gate.permits(&UserRole::User));
    }

    #[test]
    fn test_any_gate_accepts_every_listed_role() {
        let gate = RequireRole::new_any(UserRole::all_roles());
        assert!(UserRole::all_roles().iter().all(|role| gate.permits(role)));
    }
}
