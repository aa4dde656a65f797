use chrono::{Duration, TimeZone, Utc};

use coursemanager::config::DatabaseConfig;
use coursemanager::errors::CourseManagerError;
use coursemanager::models::assignment_groups::requests::{
    CreateAssignmentGroupRequest, UpdateAssignmentGroupRequest,
};
use coursemanager::models::assignments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use coursemanager::models::courses::entities::{CourseDetail, CourseRole};
use coursemanager::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use coursemanager::models::student_assignments::requests::{
    CreateStudentAssignmentRequest, StudentAssignmentListQuery, UpdateStudentAssignmentRequest,
};
use coursemanager::models::users::entities::{User, UserRole};
use coursemanager::models::users::requests::{CreateUserRequest, UserListQuery};
use coursemanager::storage::{SeaOrmStorage, Storage};

async fn setup() -> SeaOrmStorage {
    SeaOrmStorage::connect(&DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    })
    .await
    .expect("in-memory database")
}

async fn user(storage: &SeaOrmStorage, username: &str) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "not-a-real-hash".to_string(),
            role: UserRole::User,
            display_name: None,
        })
        .await
        .expect("create user")
}

async fn course(
    storage: &SeaOrmStorage,
    id: &str,
    instructor: &User,
    students: &[&User],
) -> CourseDetail {
    storage
        .create_course(CreateCourseRequest {
            id: id.to_string(),
            title: format!("{id} title"),
            instructors: vec![instructor.id],
            tas: Vec::new(),
            students: students.iter().map(|s| s.id).collect(),
        })
        .await
        .expect("create course")
}

fn group(title: &str, points: i32) -> CreateAssignmentGroupRequest {
    CreateAssignmentGroupRequest {
        title: title.to_string(),
        points,
    }
}

fn assignment(course_id: &str, group_id: i64, title: &str, day: u32) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        course_id: course_id.to_string(),
        group_id,
        title: title.to_string(),
        points: 10,
        due_date: Utc
            .with_ymd_and_hms(2026, 3, day, 23, 59, 0)
            .single()
            .expect("valid date"),
    }
}

fn record(assignment_id: i64, student_id: i64) -> CreateStudentAssignmentRequest {
    CreateStudentAssignmentRequest {
        assignment_id,
        student_id,
        qr_code: None,
        completed: None,
        points_earned: None,
        comment: None,
        grader_id: None,
    }
}

#[tokio::test]
async fn course_detail_groups_members_by_role() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let ta = user(&storage, "ta").await;
    let alice = user(&storage, "alice").await;

    let detail = storage
        .create_course(CreateCourseRequest {
            id: "CS101".to_string(),
            title: "Intro to Programming".to_string(),
            instructors: vec![teacher.id],
            tas: vec![ta.id],
            students: vec![alice.id, alice.id],
        })
        .await
        .expect("create course");

    assert_eq!(detail.instructors, vec![teacher.id]);
    assert_eq!(detail.tas, vec![ta.id]);
    assert_eq!(detail.students, vec![alice.id]);

    let mine = storage.list_user_courses(alice.id).await.expect("courses");
    assert_eq!(mine.student_courses.len(), 1);
    assert!(mine.instructor_courses.is_empty());
}

#[tokio::test]
async fn course_requires_an_instructor() {
    let storage = setup().await;
    let alice = user(&storage, "alice").await;

    let result = storage
        .create_course(CreateCourseRequest {
            id: "CS101".to_string(),
            title: "Intro".to_string(),
            instructors: Vec::new(),
            tas: Vec::new(),
            students: vec![alice.id],
        })
        .await;

    assert!(matches!(result, Err(CourseManagerError::Validation(_))));
    assert!(storage.get_course_by_id("CS101").await.expect("query").is_none());
}

#[tokio::test]
async fn course_titles_are_unique() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;

    let duplicate = storage
        .create_course(CreateCourseRequest {
            id: "CS102".to_string(),
            title: "CS101 title".to_string(),
            instructors: vec![teacher.id],
            tas: Vec::new(),
            students: Vec::new(),
        })
        .await;
    assert!(matches!(duplicate, Err(CourseManagerError::Conflict(_))));

    let updated = storage
        .update_course(
            "CS101",
            UpdateCourseRequest {
                title: Some("Renamed".to_string()),
            },
        )
        .await
        .expect("update")
        .expect("course exists");
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn group_and_assignment_titles_are_unique_across_courses() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;
    course(&storage, "CS102", &teacher, &[]).await;

    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let duplicate = storage
        .create_assignment_group("CS102", group("Homework", 30))
        .await;
    assert!(matches!(duplicate, Err(CourseManagerError::Conflict(_))));

    let labs = storage
        .create_assignment_group("CS102", group("Labs", 10))
        .await
        .expect("create group");
    storage
        .create_assignment(assignment("CS101", homework.id, "Week 1", 10))
        .await
        .expect("create assignment");
    let duplicate = storage
        .create_assignment(assignment("CS102", labs.id, "Week 1", 12))
        .await;
    assert!(matches!(duplicate, Err(CourseManagerError::Conflict(_))));
}

#[tokio::test]
async fn last_instructor_cannot_be_removed() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let other = user(&storage, "other").await;
    course(&storage, "CS101", &teacher, &[]).await;

    let result = storage
        .remove_course_member("CS101", teacher.id, CourseRole::Instructor)
        .await;
    assert!(matches!(result, Err(CourseManagerError::Validation(_))));

    storage
        .add_course_member("CS101", other.id, CourseRole::Instructor)
        .await
        .expect("add instructor");
    let removed = storage
        .remove_course_member("CS101", teacher.id, CourseRole::Instructor)
        .await
        .expect("remove instructor");
    assert!(removed);

    let duplicate = storage
        .add_course_member("CS101", other.id, CourseRole::Instructor)
        .await;
    assert!(matches!(duplicate, Err(CourseManagerError::Conflict(_))));
}

#[tokio::test]
async fn group_points_must_fit_a_small_integer() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;

    for points in [-1, 32768] {
        let result = storage
            .create_assignment_group("CS101", group("Homework", points))
            .await;
        assert!(matches!(result, Err(CourseManagerError::Validation(_))));
    }

    let created = storage
        .create_assignment_group("CS101", group("Homework", 32767))
        .await
        .expect("max points accepted");
    assert_eq!(created.points, 32767);

    let unchanged = storage
        .update_assignment_group(created.id, UpdateAssignmentGroupRequest::default())
        .await
        .expect("update")
        .expect("group exists");
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn groups_are_ordered_by_points_then_title() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;

    for (title, points) in [("Exams", 50), ("Labs", 20), ("Homework", 20)] {
        storage
            .create_assignment_group("CS101", group(title, points))
            .await
            .expect("create group");
    }

    let titles: Vec<String> = storage
        .list_course_assignment_groups("CS101")
        .await
        .expect("list groups")
        .into_iter()
        .map(|g| g.title)
        .collect();
    assert_eq!(titles, vec!["Homework", "Labs", "Exams"]);
}

#[tokio::test]
async fn assignment_group_must_belong_to_the_same_course() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;
    course(&storage, "CS102", &teacher, &[]).await;

    let other_group = storage
        .create_assignment_group("CS102", group("Labs", 10))
        .await
        .expect("create group");

    let result = storage
        .create_assignment(assignment("CS101", other_group.id, "Lab 1", 1))
        .await;
    assert!(matches!(result, Err(CourseManagerError::Validation(_))));
}

#[tokio::test]
async fn assignments_are_listed_by_due_date() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;
    course(&storage, "CS102", &teacher, &[]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let labs = storage
        .create_assignment_group("CS102", group("Labs", 10))
        .await
        .expect("create group");

    // 截止时间优先于分值和标题
    for (title, points, day) in [
        ("HW A", 5, 20),
        ("HW Z", 20, 10),
        ("Quiz B", 5, 25),
        ("Quiz A", 5, 25),
        ("Quiz Z", 1, 25),
    ] {
        storage
            .create_assignment(CreateAssignmentRequest {
                points,
                ..assignment("CS101", homework.id, title, day)
            })
            .await
            .expect("create");
    }
    storage
        .create_assignment(assignment("CS102", labs.id, "Lab 1", 5))
        .await
        .expect("create");

    let listed = storage
        .list_assignments_with_pagination(AssignmentListQuery {
            course_id: Some("CS101".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    let titles: Vec<&str> = listed.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["HW Z", "HW A", "Quiz Z", "Quiz A", "Quiz B"]);
    assert_eq!(listed.pagination.total, 5);

    let scoped = storage
        .list_assignments_with_pagination(AssignmentListQuery {
            course_ids: Some(vec!["CS102".to_string()]),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(scoped.items.len(), 1);
    assert_eq!(scoped.items[0].display_name(&labs), "CS102 Labs Lab 1");

    let nothing = storage
        .list_assignments_with_pagination(AssignmentListQuery {
            course_ids: Some(Vec::new()),
            ..Default::default()
        })
        .await
        .expect("list");
    assert!(nothing.items.is_empty());
}

#[tokio::test]
async fn assignment_update_rechecks_group() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;
    course(&storage, "CS102", &teacher, &[]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let foreign = storage
        .create_assignment_group("CS102", group("Labs", 10))
        .await
        .expect("create group");
    let hw = storage
        .create_assignment(assignment("CS101", homework.id, "HW 1", 10))
        .await
        .expect("create");

    let moved = storage
        .update_assignment(
            hw.id,
            UpdateAssignmentRequest {
                group_id: Some(foreign.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(moved, Err(CourseManagerError::Validation(_))));

    let later = hw.due_date + Duration::days(7);
    let updated = storage
        .update_assignment(
            hw.id,
            UpdateAssignmentRequest {
                due_date: Some(later),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("assignment exists");
    assert_eq!(updated.due_date, later);
}

#[tokio::test]
async fn student_must_be_enrolled_to_get_a_record() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let alice = user(&storage, "alice").await;
    let bob = user(&storage, "bob").await;
    course(&storage, "CS101", &teacher, &[&alice]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let hw = storage
        .create_assignment(assignment("CS101", homework.id, "HW 1", 10))
        .await
        .expect("create");

    let outsider = storage.create_student_assignment(record(hw.id, bob.id)).await;
    assert!(matches!(outsider, Err(CourseManagerError::Validation(_))));

    let created = storage
        .create_student_assignment(record(hw.id, alice.id))
        .await
        .expect("create record");
    assert_eq!(created.points_earned, 0);
    assert_eq!(created.comment, "");
    assert!(!created.completed);
    assert!(!created.is_graded());
    assert_eq!(created.qr_code.len(), 16);

    let duplicate = storage
        .create_student_assignment(record(hw.id, alice.id))
        .await;
    assert!(matches!(duplicate, Err(CourseManagerError::Conflict(_))));
}

#[tokio::test]
async fn check_in_marks_completed_and_records_grader() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let alice = user(&storage, "alice").await;
    course(&storage, "CS101", &teacher, &[&alice]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let hw = storage
        .create_assignment(assignment("CS101", homework.id, "HW 1", 10))
        .await
        .expect("create");
    let created = storage
        .create_student_assignment(CreateStudentAssignmentRequest {
            qr_code: Some("  alice-hw1  ".to_string()),
            ..record(hw.id, alice.id)
        })
        .await
        .expect("create record");
    assert_eq!(created.qr_code, "alice-hw1");

    let checked = storage
        .check_in_student_assignment("alice-hw1", teacher.id)
        .await
        .expect("check in")
        .expect("record exists");
    assert!(checked.completed);
    assert_eq!(checked.grader_id, Some(teacher.id));

    let missing = storage
        .check_in_student_assignment("nope", teacher.id)
        .await
        .expect("check in");
    assert!(missing.is_none());
}

#[tokio::test]
async fn grading_validates_points() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let alice = user(&storage, "alice").await;
    course(&storage, "CS101", &teacher, &[&alice]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let hw = storage
        .create_assignment(assignment("CS101", homework.id, "HW 1", 10))
        .await
        .expect("create");
    let created = storage
        .create_student_assignment(record(hw.id, alice.id))
        .await
        .expect("create record");

    let negative = storage
        .update_student_assignment(
            created.id,
            UpdateStudentAssignmentRequest {
                points_earned: Some(-5),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(negative, Err(CourseManagerError::Validation(_))));

    let graded = storage
        .update_student_assignment(
            created.id,
            UpdateStudentAssignmentRequest {
                points_earned: Some(9),
                comment: Some("Nice work".to_string()),
                grader_id: Some(teacher.id),
                ..Default::default()
            },
        )
        .await
        .expect("grade")
        .expect("record exists");
    assert_eq!(graded.points_earned, 9);
    assert_eq!(graded.comment, "Nice work");
    assert!(graded.is_graded());
}

#[tokio::test]
async fn deleting_a_course_cascades_to_its_records() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let alice = user(&storage, "alice").await;
    course(&storage, "CS101", &teacher, &[&alice]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let hw = storage
        .create_assignment(assignment("CS101", homework.id, "HW 1", 10))
        .await
        .expect("create");
    let created = storage
        .create_student_assignment(record(hw.id, alice.id))
        .await
        .expect("create record");

    assert!(storage.delete_course("CS101").await.expect("delete"));

    assert!(
        storage
            .get_assignment_group_by_id(homework.id)
            .await
            .expect("query")
            .is_none()
    );
    assert!(storage.get_assignment_by_id(hw.id).await.expect("query").is_none());
    assert!(
        storage
            .get_student_assignment_by_id(created.id)
            .await
            .expect("query")
            .is_none()
    );
    assert!(storage.list_user_courses(alice.id).await.expect("query").student_courses.is_empty());
}

#[tokio::test]
async fn deleting_a_grader_keeps_the_grade() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let ta = user(&storage, "ta").await;
    let alice = user(&storage, "alice").await;
    course(&storage, "CS101", &teacher, &[&alice]).await;
    storage
        .add_course_member("CS101", ta.id, CourseRole::Ta)
        .await
        .expect("add ta");
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let hw = storage
        .create_assignment(assignment("CS101", homework.id, "HW 1", 10))
        .await
        .expect("create");
    let created = storage
        .create_student_assignment(CreateStudentAssignmentRequest {
            points_earned: Some(7),
            grader_id: Some(ta.id),
            ..record(hw.id, alice.id)
        })
        .await
        .expect("create record");
    assert_eq!(created.grader_id, Some(ta.id));

    assert!(storage.delete_user(ta.id).await.expect("delete"));

    let after = storage
        .get_student_assignment_by_id(created.id)
        .await
        .expect("query")
        .expect("record kept");
    assert_eq!(after.points_earned, 7);
    assert_eq!(after.grader_id, None);

    let listed = storage
        .list_student_assignments_with_pagination(StudentAssignmentListQuery {
            course_id: Some("CS101".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(listed.items.len(), 1);
}

#[tokio::test]
async fn student_assignments_follow_assignment_order() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let alice = user(&storage, "alice").await;
    let bob = user(&storage, "bob").await;
    course(&storage, "CS101", &teacher, &[&alice, &bob]).await;
    course(&storage, "CS102", &teacher, &[&alice]).await;
    let homework = storage
        .create_assignment_group("CS101", group("Homework", 30))
        .await
        .expect("create group");
    let labs = storage
        .create_assignment_group("CS102", group("Labs", 10))
        .await
        .expect("create group");

    // 先创建、标题靠前的作业截止更晚
    let project = storage
        .create_assignment(assignment("CS101", homework.id, "A Project", 20))
        .await
        .expect("create");
    let quiz = storage
        .create_assignment(assignment("CS101", homework.id, "Z Quiz", 10))
        .await
        .expect("create");
    let lab = storage
        .create_assignment(assignment("CS102", labs.id, "Lab 0", 1))
        .await
        .expect("create");

    for (assignment_id, student_id) in [
        (project.id, alice.id),
        (quiz.id, bob.id),
        (quiz.id, alice.id),
        (lab.id, alice.id),
    ] {
        storage
            .create_student_assignment(record(assignment_id, student_id))
            .await
            .expect("create record");
    }

    let listed = storage
        .list_student_assignments_with_pagination(StudentAssignmentListQuery {
            course_id: Some("CS101".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    let order: Vec<(i64, i64)> = listed
        .items
        .iter()
        .map(|r| (r.assignment_id, r.student_id))
        .collect();
    assert_eq!(
        order,
        vec![(quiz.id, alice.id), (quiz.id, bob.id), (project.id, alice.id)]
    );

    let mine = storage
        .list_student_assignments_with_pagination(StudentAssignmentListQuery {
            student_id: Some(alice.id),
            ..Default::default()
        })
        .await
        .expect("list");
    let assignments: Vec<i64> = mine.items.iter().map(|r| r.assignment_id).collect();
    assert_eq!(assignments, vec![lab.id, quiz.id, project.id]);

    let bobs = storage
        .list_student_assignments_with_pagination(StudentAssignmentListQuery {
            course_id: Some("CS102".to_string()),
            student_id: Some(bob.id),
            ..Default::default()
        })
        .await
        .expect("list");
    assert!(bobs.items.is_empty());
}

#[tokio::test]
async fn last_instructor_cannot_be_deleted() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let co_teacher = user(&storage, "co_teacher").await;
    course(&storage, "CS101", &teacher, &[]).await;

    let result = storage.delete_user(teacher.id).await;
    assert!(matches!(result, Err(CourseManagerError::Validation(_))));
    assert!(storage.get_user_by_id(teacher.id).await.expect("query").is_some());

    storage
        .add_course_member("CS101", co_teacher.id, CourseRole::Instructor)
        .await
        .expect("add instructor");
    assert!(storage.delete_user(teacher.id).await.expect("delete"));

    let members = storage
        .list_course_members("CS101", Some(CourseRole::Instructor))
        .await
        .expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, co_teacher.id);
}

#[tokio::test]
async fn users_can_be_filtered_by_course() {
    let storage = setup().await;
    let teacher = user(&storage, "teacher").await;
    let alice = user(&storage, "alice").await;
    user(&storage, "bob").await;
    course(&storage, "CS101", &teacher, &[&alice]).await;

    let listed = storage
        .list_users_with_pagination(UserListQuery {
            course_id: Some("CS101".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    let names: Vec<&str> = listed.items.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "teacher"]);

    let searched = storage
        .list_users_with_pagination(UserListQuery {
            search: Some("bo".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(searched.items.len(), 1);
    assert_eq!(searched.pagination.total, 1);
}
