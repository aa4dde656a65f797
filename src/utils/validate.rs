use once_cell::sync::Lazy;
use regex::Regex;

/// 作业与作业组分值上限（small integer 列）
pub const MAX_POINTS: i32 = i16::MAX as i32;
/// 课程号与各类标题的最大长度
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_USERNAME_LEN: usize = 150;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static COURSE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid course id regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err("Username length must be between 1 and 150 characters");
    }
    // 只能包含字母、数字以及 @ . + - _
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, digits and @/./+/-/_");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 课程号出现在 URL 路径中，限制为安全字符
pub fn validate_course_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() || id.chars().count() > MAX_TITLE_LEN {
        return Err("Course id length must be between 1 and 100 characters");
    }
    if !COURSE_ID_RE.is_match(id) {
        return Err("Course id may contain only letters, digits, '.', '-' and '_'");
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    let len = title.trim().chars().count();
    if len == 0 {
        return Err("Title must not be empty");
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err("Title must be at most 100 characters");
    }
    Ok(())
}

/// 校验分值并收窄为存储使用的 i16
pub fn validate_points(points: i32) -> Result<i16, &'static str> {
    if !(0..=MAX_POINTS).contains(&points) {
        return Err("Points must be between 0 and 32767");
    }
    Ok(points as i16)
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 常见弱密码
    let weak_passwords = [
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
        "Admin1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_missing_character_classes() {
        assert!(!validate_password("abcd1234").is_valid);
        assert!(!validate_password("ABCD1234").is_valid);
        assert!(!validate_password("AbcdEfgh").is_valid);
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_points_bounds() {
        assert_eq!(validate_points(0), Ok(0));
        assert_eq!(validate_points(32767), Ok(i16::MAX));
        assert!(validate_points(-1).is_err());
        assert!(validate_points(32768).is_err());
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("Lab0").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_course_id_rules() {
        assert!(validate_course_id("CS101").is_ok());
        assert!(validate_course_id("cs-101.f26").is_ok());
        assert!(validate_course_id("CS 101").is_err());
        assert!(validate_course_id("CS/101").is_err());
        assert!(validate_course_id("").is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice.b+1@x").is_ok());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }
}
