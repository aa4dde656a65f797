use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成指定长度的随机字母数字串，用于签到二维码与初始密码
pub fn generate_random_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length_and_charset() {
        let code = generate_random_code(16);
        assert_eq!(code.len(), 16);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_differ() {
        assert_ne!(generate_random_code(16), generate_random_code(16));
    }
}
