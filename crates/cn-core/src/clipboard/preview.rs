/// Default number of characters kept in a preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Marker appended to a truncated preview.
pub const ELLIPSIS: &str = "...";

/// Build the bounded display form of `content`.
///
/// 生成内容的预览文本。
///
/// Content longer than `max_chars` characters is cut to its first `max_chars`
/// characters followed by [`ELLIPSIS`]; shorter content is returned unchanged.
/// Lengths are counted in `char`s so a multi-byte character is never split.
pub fn make_preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut preview = String::with_capacity(cut + ELLIPSIS.len());
            preview.push_str(&content[..cut]);
            preview.push_str(ELLIPSIS);
            preview
        }
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_content_is_truncated_with_ellipsis() {
        let content = "a".repeat(250);
        let preview = make_preview(&content, DEFAULT_PREVIEW_CHARS);
        assert_eq!(preview.len(), 103);
        assert!(preview.ends_with(ELLIPSIS));
        assert_eq!(&preview[..100], &content[..100]);
    }

    #[test]
    fn short_content_is_unchanged() {
        let content = "b".repeat(50);
        assert_eq!(make_preview(&content, DEFAULT_PREVIEW_CHARS), content);
    }

    #[test]
    fn exactly_max_chars_is_unchanged() {
        let content = "c".repeat(100);
        assert_eq!(make_preview(&content, DEFAULT_PREVIEW_CHARS), content);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let content = "剪".repeat(101);
        let preview = make_preview(&content, DEFAULT_PREVIEW_CHARS);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.starts_with(&"剪".repeat(100)));
    }
}
