//! 课程级访问控制
//!
//! 全局角色由 `RequireRole` 中间件在路由层检查；课程内角色依赖请求中的课程，
//! 因此在服务层按需查询。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::courses::entities::CourseAccess;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::storage_error_response;

/// 课程访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// 任何课程成员
    Member,
    /// 教师或助教
    Staff,
    /// 教师
    Manage,
}

impl AccessLevel {
    pub fn allows(self, access: &CourseAccess) -> bool {
        match self {
            AccessLevel::Member => access.is_member(),
            AccessLevel::Staff => access.is_staff(),
            AccessLevel::Manage => access.can_manage(),
        }
    }
}

/// 取出 RequireJWT 写入的当前用户
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        ))
    })
}

/// 查询用户在课程中的身份，不做存在性检查
pub(crate) async fn course_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    course_id: &str,
) -> Result<CourseAccess, HttpResponse> {
    if user.is_admin() {
        return Ok(CourseAccess {
            is_admin: true,
            roles: Vec::new(),
        });
    }

    storage
        .get_user_course_roles(course_id, user.id)
        .await
        .map(|roles| CourseAccess {
            is_admin: false,
            roles,
        })
        .map_err(|e| storage_error_response(&e, ErrorCode::Conflict))
}

/// 校验课程存在且当前用户达到指定访问级别
pub(crate) async fn require_course_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    course_id: &str,
    level: AccessLevel,
) -> Result<CourseAccess, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Err(storage_error_response(&e, ErrorCode::Conflict)),
    }

    let access = course_access(storage, user, course_id).await?;
    if level.allows(&access) {
        Ok(access)
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to access this course",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::CourseRole;

    #[test]
    fn test_levels_map_to_course_roles() {
        let ta = CourseAccess {
            is_admin: false,
            roles: vec![CourseRole::Ta],
        };
        assert!(AccessLevel::Member.allows(&ta));
        assert!(AccessLevel::Staff.allows(&ta));
        assert!(!AccessLevel::Manage.allows(&ta));

        let student = CourseAccess {
            is_admin: false,
            roles: vec![CourseRole::Student],
        };
        assert!(AccessLevel::Member.allows(&student));
        assert!(!AccessLevel::Staff.allows(&student));
    }
}
