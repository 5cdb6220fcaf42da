use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_megabytes(mb: f32) -> String {
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{mb:.1} MB")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_unicode("bash", 10), "bash");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_unicode("systemd-journald", 8), "systemd\u{2026}");
    }

    #[test]
    fn megabytes_switch_to_gigabytes() {
        assert_eq!(format_megabytes(2.0), "2.0 MB");
        assert_eq!(format_megabytes(1536.0), "1.5 GB");
    }
}
