//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("firmware 2.5.6", 32), "firmware 2.5.6");
        // max_len=12 keeps 9 bytes before the ellipsis
        assert_eq!(truncate("Connected to radio", 12), "Connected...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "台灣節點" is 4 chars x 3 bytes
        assert_eq!(truncate("台灣節點", 12), "台灣節點");
        // max_len=10 -> target=7 -> back to char boundary at 6
        assert_eq!(truncate("台灣節點", 10), "台灣...");
    }
}
