//! Filesystem-safe display name generation.
//!
//! Video titles feed directly into `Content-Disposition` headers and output
//! filenames, so they are folded to ASCII-safe characters. The transform is
//! deterministic: the same title always produces the same name.

/// Fold a Vietnamese accented character to its unaccented base letter.
///
/// Returns `None` for characters outside the mapping.
fn fold_vietnamese(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ắ' | 'ằ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ấ' | 'ầ'
        | 'ẩ' | 'ẫ' | 'ậ' => 'a',
        'đ' => 'd',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ế' | 'ề' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ố' | 'ồ' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ớ' | 'ờ'
        | 'ở' | 'ỡ' | 'ợ' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ứ' | 'ừ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        _ => return None,
    };
    Some(folded)
}

/// Sanitize a title into a filesystem- and header-safe filename stem.
///
/// - Vietnamese accented characters fold to their base letters (case kept)
/// - Anything outside alphanumerics, `.`, `-`, and whitespace becomes `_`
/// - Whitespace runs become a single `_`
/// - Consecutive underscores collapse to one
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());

    for c in title.chars() {
        let c = if let Some(f) = fold_vietnamese(c) {
            f
        } else if c.is_uppercase() {
            // Uppercase accented variants fold through their lowercase form
            match c.to_lowercase().next().and_then(fold_vietnamese) {
                Some(f) => f.to_ascii_uppercase(),
                None => c,
            }
        } else {
            c
        };

        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            out.push(c);
        } else if !out.ends_with('_') {
            // Whitespace and every other character map to a single underscore
            out.push('_');
        }
    }

    if out.is_empty() {
        out.push('_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_passes_through() {
        assert_eq!(sanitize_filename("My-Song.v2"), "My-Song.v2");
    }

    #[test]
    fn test_spaces_become_underscores() {
        assert_eq!(sanitize_filename("Never Gonna Give"), "Never_Gonna_Give");
    }

    #[test]
    fn test_special_characters_replaced() {
        assert_eq!(
            sanitize_filename("Song (Official Video) [HD]"),
            "Song_Official_Video_HD_"
        );
        assert_eq!(sanitize_filename("a/b\\c:d"), "a_b_c_d");
    }

    #[test]
    fn test_consecutive_replacements_collapse() {
        assert_eq!(sanitize_filename("a   ---   b"), "a_---_b");
        assert_eq!(sanitize_filename("a!!!b"), "a_b");
    }

    #[test]
    fn test_vietnamese_folding() {
        assert_eq!(sanitize_filename("Đàn cò"), "Dan_co");
        assert_eq!(sanitize_filename("tiếng Việt"), "tieng_Viet");
    }

    #[test]
    fn test_deterministic() {
        let title = "Một bài hát (Official) — 2024!";
        assert_eq!(sanitize_filename(title), sanitize_filename(title));
    }

    #[test]
    fn test_degenerate_titles_stay_nonempty() {
        assert_eq!(sanitize_filename(""), "_");
        assert_eq!(sanitize_filename("???"), "_");
    }
}
