pub mod sanitize;
pub mod url_validator;

pub use sanitize::{
    checked_id, checked_platform, escape_html, is_valid_link_id, sanitize_id, sanitize_platform,
};

/// 链接 ID 字符表
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| ID_ALPHABET[rand::random_range(0..ID_ALPHABET.len())] as char)
        .take(length)
        .collect()
}
