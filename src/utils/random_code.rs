//! 随机代码生成
//!
//! 入口码字符集为大写字母 + 数字（36 个符号），4 位共约 168 万种组合。
//! 唯一性只在 open 状态的活动之间约束，由调用方查重并在冲突时重新生成。

use rand::Rng;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 入口码长度
pub const ENTRY_CODE_LENGTH: usize = 4;

/// 生成指定长度的随机代码（大写字母+数字）
pub fn generate_random_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

/// 生成一个 4 位入口码
pub fn generate_entry_code() -> String {
    generate_random_code(ENTRY_CODE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_code_format() {
        for _ in 0..1000 {
            let code = generate_entry_code();
            assert_eq!(code.len(), ENTRY_CODE_LENGTH);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
                "unexpected character in code: {code}"
            );
        }
    }

    #[test]
    fn test_random_code_length() {
        assert_eq!(generate_random_code(8).len(), 8);
        assert_eq!(generate_random_code(0).len(), 0);
    }

    #[test]
    fn test_codes_vary() {
        // 1000 次抽样中全部相同的概率可以忽略不计
        let first = generate_entry_code();
        let all_same = (0..1000).all(|_| generate_entry_code() == first);
        assert!(!all_same);
    }
}
