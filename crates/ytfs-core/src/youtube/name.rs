//! File names for videos.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Builds `"<title>.<ext>"` with every character of `invalid_chars` removed.
///
/// `/` and control characters become `_` so a title can never introduce a
/// path separator. An empty title falls back to the video id. The title part
/// is shortened so the whole name fits in 255 bytes.
pub fn entry_name(title: &str, video_id: &str, extension: &str, invalid_chars: &str) -> String {
    build(title, video_id, extension, "", invalid_chars)
}

/// Name used when two entries of one listing would collide: `"<title> (<id>).<ext>"`.
///
/// `attempt` counts repeated collisions: attempt 2 and later yield
/// `"<title> (<id> <attempt>).<ext>"`. The suffix always survives truncation.
pub fn disambiguated_name(
    title: &str,
    video_id: &str,
    extension: &str,
    invalid_chars: &str,
    attempt: usize,
) -> String {
    let tag = if attempt <= 1 {
        format!(" ({video_id})")
    } else {
        format!(" ({video_id} {attempt})")
    };
    build(title, video_id, extension, &tag, invalid_chars)
}

fn clean(s: &str, invalid_chars: &str) -> String {
    s.chars()
        .filter(|c| !invalid_chars.contains(*c))
        .map(|c| if c == '/' || c.is_control() { '_' } else { c })
        .collect()
}

/// `"<stem><suffix>.<ext>"`, with only the stem shortened to fit NAME_MAX.
fn build(
    title: &str,
    video_id: &str,
    extension: &str,
    suffix: &str,
    invalid_chars: &str,
) -> String {
    let ext = clean(extension, invalid_chars);
    let suffix = clean(suffix, invalid_chars);
    let mut stem = clean(title, invalid_chars).trim().to_string();
    if stem.is_empty() {
        stem = clean(video_id, invalid_chars);
    }

    let ext_len = if ext.is_empty() { 0 } else { ext.len() + 1 };
    let budget = NAME_MAX.saturating_sub(ext_len + suffix.len());
    if stem.len() > budget {
        let mut take = budget;
        while take > 0 && !stem.is_char_boundary(take) {
            take -= 1;
        }
        stem.truncate(take);
    }
    stem.push_str(&suffix);

    if ext.is_empty() {
        stem
    } else {
        format!("{stem}.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID: &str = "\0\"\\[]+|<>=;?*:";

    #[test]
    fn strips_invalid_characters() {
        assert_eq!(
            entry_name("Live: [HD] \"A|B\" <1+1=2>?", "id", "mp4", INVALID),
            "Live HD AB 112.mp4"
        );
    }

    #[test]
    fn slashes_and_control_chars_replaced() {
        assert_eq!(entry_name("AC/DC\tlive", "id", "webm", INVALID), "AC_DC_live.webm");
    }

    #[test]
    fn empty_title_uses_id() {
        assert_eq!(entry_name("  ", "cpPG0bKHYKc", "mp4", INVALID), "cpPG0bKHYKc.mp4");
        assert_eq!(entry_name("???", "cpPG0bKHYKc", "mp4", INVALID), "cpPG0bKHYKc.mp4");
    }

    #[test]
    fn long_titles_fit_name_max() {
        let title = "é".repeat(300);
        let name = entry_name(&title, "id", "mp4", INVALID);
        assert!(name.len() <= NAME_MAX);
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn disambiguation_keeps_extension() {
        assert_eq!(
            disambiguated_name("Same", "abc", "mp4", INVALID, 1),
            "Same (abc).mp4"
        );
        assert_eq!(
            disambiguated_name("Same", "abc", "mp4", INVALID, 3),
            "Same (abc 3).mp4"
        );
    }

    #[test]
    fn disambiguation_survives_truncation_of_long_cjk_titles() {
        // 96 characters, 288 bytes in UTF-8.
        let title = "日本語のタイトル".repeat(12);
        let plain = entry_name(&title, "cpPG0bKHYKc", "mp4", INVALID);
        let other = disambiguated_name(&title, "cpPG0bKHYKc", "mp4", INVALID, 1);
        let third = disambiguated_name(&title, "cpPG0bKHYKc", "mp4", INVALID, 2);

        assert_ne!(plain, other);
        assert_ne!(other, third);
        for name in [&plain, &other, &third] {
            assert!(name.len() <= NAME_MAX, "{} bytes", name.len());
        }
        assert!(other.ends_with(" (cpPG0bKHYKc).mp4"));
        assert!(third.ends_with(" (cpPG0bKHYKc 2).mp4"));
        assert!(other.starts_with("日本語のタイトル"));
    }
}
