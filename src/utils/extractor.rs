//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_course_id;

fn bad_path_param(name: &str, detail: String) -> Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter '{name}': {detail}"),
    ));
    InternalError::from_response(detail, response).into()
}

fn extract_i64(req: &HttpRequest, name: &str) -> Result<i64, Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_path_param(name, "missing".to_string()))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_path_param(
            name,
            format!("'{raw}' is not a positive integer"),
        )),
    }
}

macro_rules! define_i64_path_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(extract_i64(req, $param).map($name))
                }
            }
        )*
    };
}

define_i64_path_extractor! {
    SafeIDI64 => "id",
    SafeAssignmentGroupIdI64 => "group_id",
    SafeAssignmentIdI64 => "assignment_id",
    SafeStudentAssignmentIdI64 => "student_assignment_id",
}

/// 课程号路径参数 `{course_id}`
#[derive(Debug, Clone)]
pub struct SafeCourseId(pub String);

impl FromRequest for SafeCourseId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("course_id") {
            Some(raw) => validate_course_id(raw)
                .map(|_| SafeCourseId(raw.to_string()))
                .map_err(|e| bad_path_param("course_id", e.to_string())),
            None => Err(bad_path_param("course_id", "missing".to_string())),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_i64_extractor_accepts_positive_ids() {
        let req = TestRequest::default().param("assignment_id", "42").to_http_request();
        let id = SafeAssignmentIdI64::extract(&req).await.expect("valid id");
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_i64_extractor_rejects_garbage() {
        let req = TestRequest::default().param("id", "abc").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());

        let req = TestRequest::default().param("id", "0").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_course_id_extractor() {
        let req = TestRequest::default().param("course_id", "CS101").to_http_request();
        let id = SafeCourseId::extract(&req).await.expect("valid course id");
        assert_eq!(id.0, "CS101");

        let req = TestRequest::default().param("course_id", "CS 101").to_http_request();
        assert!(SafeCourseId::extract(&req).await.is_err());
    }
}
