//! Input-shape contracts applied by collaborators (the console front) before
//! an orchestrator is invoked. Rejection here leaves the store untouched.

/// Phone body: 10-15 digits, digits only, no dial code.
pub fn is_valid_phone(digits: &str) -> bool {
    (10..=15).contains(&digits.len()) && digits.chars().all(|ch| ch.is_ascii_digit())
}

/// OTP: exactly 6 numeral characters.
pub fn is_valid_otp(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|ch| ch.is_ascii_digit())
}

/// Display name: 2-50 characters after trimming.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (2..=50).contains(&len)
}

/// Chatroom title: 1-100 characters after trimming.
pub fn is_valid_title(title: &str) -> bool {
    let len = title.trim().chars().count();
    (1..=100).contains(&len)
}

/// Message body: non-empty after trimming, at most 4000 characters.
pub fn is_valid_message(content: &str) -> bool {
    let trimmed = content.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= 4000
}
