//! Log sanitization utilities
//!
//! Bridge stderr can carry page dumps and library debug output; phone
//! numbers identify the account holder. Neither goes to the log verbatim.

/// Maximum number of bytes of bridge output included in a log line.
const TRUNCATE_LIMIT: usize = 512;

/// Number of trailing phone digits left visible.
const PHONE_VISIBLE_DIGITS: usize = 3;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Trim surrounding whitespace and cap the length for logging.
pub fn truncate_for_log(s: &str) -> String {
    let s = s.trim();
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Replace every digit of a phone number except the last few with `*`.
pub fn mask_phone_number(phone: &str) -> String {
    let digit_count = phone.chars().filter(char::is_ascii_digit).count();
    let hidden = digit_count.saturating_sub(PHONE_VISIBLE_DIGITS);

    let mut seen = 0;
    phone
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen <= hidden {
                    return '*';
                }
            }
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_is_trimmed_only() {
        assert_eq!(truncate_for_log("  launching chromium\n"), "launching chromium");
    }

    #[test]
    fn long_output_is_truncated() {
        let s = "x".repeat(TRUNCATE_LIMIT + 40);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 40)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_output_does_not_split_chars() {
        let s = "ש".repeat(TRUNCATE_LIMIT);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated"));
    }

    #[test]
    fn phone_keeps_last_digits_and_separators() {
        assert_eq!(mask_phone_number("050-1234567"), "***-****567");
        assert_eq!(mask_phone_number("+972501234567"), "+*********567");
    }

    #[test]
    fn short_phone_is_left_alone() {
        assert_eq!(mask_phone_number("12"), "12");
    }
}
