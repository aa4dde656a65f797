//! 预导入模块，方便使用

pub use super::assignment_groups::{
    ActiveModel as AssignmentGroupActiveModel, Entity as AssignmentGroups,
    Model as AssignmentGroupModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::course_members::{
    ActiveModel as CourseMemberActiveModel, Entity as CourseMembers, Model as CourseMemberModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::student_assignments::{
    ActiveModel as StudentAssignmentActiveModel, Entity as StudentAssignments,
    Model as StudentAssignmentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
