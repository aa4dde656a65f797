use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use coursemanager::config::DatabaseConfig;
use coursemanager::models::users::entities::UserRole;
use coursemanager::models::users::requests::CreateUserRequest;
use coursemanager::routes;
use coursemanager::storage::{SeaOrmStorage, Storage};
use coursemanager::utils::password::hash_password;
use coursemanager::utils::{json_error_handler, query_error_handler};

const ADMIN_PASSWORD: &str = "AdminPass123";
const USER_PASSWORD: &str = "SecurePass123";

async fn storage_with_admin() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect(&DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    })
    .await
    .expect("in-memory database");

    storage
        .create_user(CreateUserRequest {
            username: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password: hash_password(ADMIN_PASSWORD).expect("hash"),
            role: UserRole::Admin,
            display_name: None,
        })
        .await
        .expect("create admin");

    Arc::new(storage)
}

macro_rules! init_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_auth_routes)
                .configure(routes::configure_user_routes)
                .configure(routes::configure_course_routes)
                .configure(routes::configure_assignment_group_routes)
                .configure(routes::configure_assignment_routes)
                .configure(routes::configure_student_assignment_routes),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": $username, "password": $password}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }};
}

macro_rules! send {
    ($app:expr, $req:expr, $token:expr) => {{
        let req = $req
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! create_user {
    ($app:expr, $token:expr, $username:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post().uri("/api/v1/users").set_json(json!({
                "username": $username,
                "email": format!("{}@example.com", $username),
                "password": USER_PASSWORD,
            })),
            $token
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().expect("user id")
    }};
}

#[actix_web::test]
async fn login_rejects_wrong_password() {
    let storage = storage_with_admin().await;
    let app = init_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "admin", "password": "WrongPass123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn requests_without_token_are_unauthorized() {
    let storage = storage_with_admin().await;
    let app = init_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/courses/mine")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn course_roles_gate_course_writes() {
    let storage = storage_with_admin().await;
    let app = init_app!(storage);

    let admin = login!(app, "admin", ADMIN_PASSWORD);
    let teacher_id = create_user!(app, admin, "teacher");
    let alice_id = create_user!(app, admin, "alice");

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/v1/courses").set_json(json!({
            "id": "CS101",
            "title": "Intro to Programming",
            "instructors": [teacher_id],
            "students": [alice_id],
        })),
        admin
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["students"], json!([alice_id]));

    let teacher = login!(app, "teacher", USER_PASSWORD);
    let alice = login!(app, "alice", USER_PASSWORD);

    // 只有管理员可以创建课程
    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/v1/courses").set_json(json!({
            "id": "CS102",
            "title": "Data Structures",
            "instructors": [teacher_id],
        })),
        teacher
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses/CS101/assignment-groups")
            .set_json(json!({"title": "Homework", "points": 30})),
        alice
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses/CS101/assignment-groups")
            .set_json(json!({"title": "Homework", "points": 30})),
        teacher
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let group_id = body["data"]["id"].as_i64().expect("group id");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/assignments")
            .set_json(json!({
                "course_id": "CS101",
                "group_id": group_id,
                "title": "HW 1",
                "points": 10,
                "due_date": "2026-03-01T23:59:00Z",
            })),
        teacher
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");

    // 学生可以看到自己课程的作业
    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/v1/assignments"),
        alice
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["title"], "HW 1");

    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/v1/courses/mine"),
        alice
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student_courses"][0]["id"], "CS101");

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/v1/auth/me"), teacher);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "teacher");
    assert_eq!(body["data"]["courses"]["instructor_courses"][0]["id"], "CS101");

    // 唯一教师不能被删除
    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/users/{teacher_id}")),
        admin
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn check_in_by_qr_code_is_staff_only() {
    let storage = storage_with_admin().await;
    let app = init_app!(storage);

    let admin = login!(app, "admin", ADMIN_PASSWORD);
    let teacher_id = create_user!(app, admin, "teacher");
    let alice_id = create_user!(app, admin, "alice");
    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/v1/courses").set_json(json!({
            "id": "CS101",
            "title": "Intro to Programming",
            "instructors": [teacher_id],
            "students": [alice_id],
        })),
        admin
    );
    assert_eq!(status, StatusCode::CREATED);

    let teacher = login!(app, "teacher", USER_PASSWORD);
    let alice = login!(app, "alice", USER_PASSWORD);

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses/CS101/assignment-groups")
            .set_json(json!({"title": "Labs", "points": 20})),
        teacher
    );
    let group_id = body["data"]["id"].as_i64().expect("group id");
    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/assignments")
            .set_json(json!({
                "course_id": "CS101",
                "group_id": group_id,
                "title": "Lab 1",
                "points": 5,
                "due_date": "2026-03-08T23:59:00Z",
            })),
        teacher
    );
    let assignment_id = body["data"]["id"].as_i64().expect("assignment id");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/student-assignments")
            .set_json(json!({
                "assignment_id": assignment_id,
                "student_id": alice_id,
                "qr_code": "alice-lab1",
            })),
        teacher
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/student-assignments/check-in")
            .set_json(json!({"qr_code": "alice-lab1"})),
        alice
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/student-assignments/check-in")
            .set_json(json!({"qr_code": "alice-lab1"})),
        teacher
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["completed"], true);
    assert_eq!(body["data"]["grader_id"], teacher_id);

    // 学生只能查询自己的记录
    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/v1/student-assignments"),
        alice
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let (status, _) = send!(
        app,
        test::TestRequest::get().uri(&format!(
            "/api/v1/student-assignments?student_id={teacher_id}"
        )),
        alice
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}
