pub mod auth;

pub mod users;

pub mod courses;

pub mod assignment_groups;

pub mod assignments;

pub mod student_assignments;

pub use assignment_groups::configure_assignment_group_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use student_assignments::configure_student_assignment_routes;
pub use users::configure_user_routes;
