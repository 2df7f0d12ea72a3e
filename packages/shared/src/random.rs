//! URL-safe random identifiers.
//!
//! Room ids and client ids are opaque strings drawn from the thread-local
//! CSPRNG and encoded with the URL-safe base64 alphabet (`-` and `_` instead
//! of `+` and `/`, no padding).

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Default identifier length in characters.
pub const DEFAULT_ID_LENGTH: usize = 32;

/// Generate a random URL-safe identifier of exactly `length` characters.
///
/// Draws `ceil(length * 3 / 4)` random bytes, which always encode to at least
/// `length` base64 characters, then truncates.
pub fn random_id(length: usize) -> String {
    let mut bytes = vec![0u8; (length * 3).div_ceil(4)];
    rand::rng().fill_bytes(&mut bytes);

    let mut id = URL_SAFE_NO_PAD.encode(&bytes);
    id.truncate(length);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    fn is_url_safe(id: &str) -> bool {
        id.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn test_random_id_has_default_length() {
        // テスト項目: デフォルト長の ID が生成される
        // given (前提条件):
        let length = DEFAULT_ID_LENGTH;

        // when (操作):
        let id = random_id(length);

        // then (期待する結果):
        assert_eq!(id.len(), 32);
        assert!(is_url_safe(&id));
    }

    #[test]
    fn test_random_id_respects_lengths_not_divisible_by_four() {
        // テスト項目: 4 で割り切れない長さでも指定通りの長さになる
        for length in [1, 2, 3, 5, 7, 10, 33] {
            // when (操作):
            let id = random_id(length);

            // then (期待する結果):
            assert_eq!(id.len(), length, "length {length}");
            assert!(is_url_safe(&id));
        }
    }

    #[test]
    fn test_random_id_zero_length_is_empty() {
        // テスト項目: 長さ 0 の場合は空文字列
        assert_eq!(random_id(0), "");
    }

    #[test]
    fn test_random_id_does_not_repeat() {
        // テスト項目: 連続生成しても衝突しない
        // given (前提条件):
        let mut seen = HashSet::new();

        // when (操作) / then (期待する結果):
        for _ in 0..1000 {
            assert!(seen.insert(random_id(DEFAULT_ID_LENGTH)));
        }
    }
}
