use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程号，如 "CS101"
    pub id: String,
    // 课程名称（全局唯一）
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程内角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseRole {
    Instructor, // 教师
    Ta,         // 助教
    Student,    // 学生
}

impl CourseRole {
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const TA: &'static str = "ta";
    pub const STUDENT: &'static str = "student";

    /// 可以评分、签到的角色
    pub fn staff_roles() -> &'static [CourseRole] {
        &[CourseRole::Instructor, CourseRole::Ta]
    }
    pub fn all_roles() -> &'static [CourseRole] {
        &[CourseRole::Instructor, CourseRole::Ta, CourseRole::Student]
    }
}

impl<'de> Deserialize<'de> for CourseRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CourseRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程角色: '{s}'. 支持的角色: instructor, ta, student"
            ))
        })
    }
}

impl std::fmt::Display for CourseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseRole::Instructor => write!(f, "{}", CourseRole::INSTRUCTOR),
            CourseRole::Ta => write!(f, "{}", CourseRole::TA),
            CourseRole::Student => write!(f, "{}", CourseRole::STUDENT),
        }
    }
}

impl std::str::FromStr for CourseRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CourseRole::INSTRUCTOR => Ok(CourseRole::Instructor),
            CourseRole::TA => Ok(CourseRole::Ta),
            CourseRole::STUDENT => Ok(CourseRole::Student),
            _ => Err(format!("Invalid course role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseMember {
    pub id: i64,
    pub course_id: String,
    pub user_id: i64,
    pub role: CourseRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 课程详情：课程本身加上三类成员的用户 ID
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub instructors: Vec<i64>,
    pub tas: Vec<i64>,
    pub students: Vec<i64>,
}

impl CourseDetail {
    pub fn new(course: Course, members: Vec<CourseMember>) -> Self {
        let mut detail = Self {
            course,
            instructors: Vec::new(),
            tas: Vec::new(),
            students: Vec::new(),
        };
        for member in members {
            match member.role {
                CourseRole::Instructor => detail.instructors.push(member.user_id),
                CourseRole::Ta => detail.tas.push(member.user_id),
                CourseRole::Student => detail.students.push(member.user_id),
            }
        }
        detail
    }
}

/// 当前用户对某门课程的访问身份
#[derive(Debug, Clone, Default)]
pub struct CourseAccess {
    pub is_admin: bool,
    pub roles: Vec<CourseRole>,
}

impl CourseAccess {
    pub fn has_role(&self, role: CourseRole) -> bool {
        self.roles.contains(&role)
    }

    /// 管理员或课程教师
    pub fn can_manage(&self) -> bool {
        self.is_admin || self.has_role(CourseRole::Instructor)
    }

    /// 管理员、教师或助教
    pub fn is_staff(&self) -> bool {
        self.is_admin
            || CourseRole::staff_roles()
                .iter()
                .any(|role| self.has_role(*role))
    }

    /// 任何课程成员或管理员
    pub fn is_member(&self) -> bool {
        self.is_admin || !self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(user_id: i64, role: CourseRole) -> CourseMember {
        CourseMember {
            id: user_id,
            course_id: "CS101".to_string(),
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_detail_groups_members_by_role() {
        let course = Course {
            id: "CS101".to_string(),
            title: "Intro".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let detail = CourseDetail::new(
            course,
            vec![
                member(1, CourseRole::Instructor),
                member(2, CourseRole::Ta),
                member(3, CourseRole::Student),
                member(4, CourseRole::Student),
            ],
        );

        assert_eq!(detail.instructors, vec![1]);
        assert_eq!(detail.tas, vec![2]);
        assert_eq!(detail.students, vec![3, 4]);
    }

    #[test]
    fn test_access_levels() {
        let ta = CourseAccess {
            is_admin: false,
            roles: vec![CourseRole::Ta],
        };
        assert!(ta.is_staff());
        assert!(ta.is_member());
        assert!(!ta.can_manage());

        let student = CourseAccess {
            is_admin: false,
            roles: vec![CourseRole::Student],
        };
        assert!(!student.is_staff());
        assert!(student.is_member());

        let outsider = CourseAccess::default();
        assert!(!outsider.is_member());

        let admin = CourseAccess {
            is_admin: true,
            roles: Vec::new(),
        };
        assert!(admin.can_manage());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ta".parse::<CourseRole>(), Ok(CourseRole::Ta));
        assert!("teacher".parse::<CourseRole>().is_err());
        assert_eq!(
            serde_json::from_str::<CourseRole>(r#""instructor""#).ok(),
            Some(CourseRole::Instructor)
        );
        for role in CourseRole::all_roles() {
            assert_eq!(role.to_string().parse::<CourseRole>().ok(), Some(*role));
        }
    }
}
