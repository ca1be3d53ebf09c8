/// Split the final path component into (stem, extension).
///
/// Follows the usual path rules: the extension starts at the last dot, a
/// leading dot does not start one, and a trailing dot leaves the name whole.
pub(crate) fn split_extension(filename: &str) -> (&str, Option<&str>) {
    let name = last_component(filename);
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

fn last_component(filename: &str) -> &str {
    let trimmed = filename.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Turn a filename into a display title.
///
/// Drops the extension, treats `_` and `-` as word breaks, and collapses
/// whitespace: `Heart_Disease-FAQ.pdf` becomes `Heart Disease FAQ`.
pub fn format_title(filename: &str) -> String {
    let (stem, _) = split_extension(filename);
    let spaced: String = stem
        .chars()
        .map(|c| if matches!(c, '_' | '-') { ' ' } else { c })
        .collect();
    spaced
        .split(is_separator_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the ASCII information separators `\x1c`..=`\x1f`,
/// which filenames produced by older tooling occasionally carry.
fn is_separator_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_separators_and_strips_extension() {
        assert_eq!(format_title("Heart_Disease-FAQ.pdf"), "Heart Disease FAQ");
        assert_eq!(format_title("Flu__Season  --Guide.PDF"), "Flu Season Guide");
        assert_eq!(format_title("  _Asthma_ .pdf"), "Asthma");
    }

    #[test]
    fn only_last_extension_is_removed() {
        assert_eq!(format_title("report.v2.pdf"), "report.v2");
        assert_eq!(format_title("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn names_without_extension_are_kept() {
        assert_eq!(format_title("Readme"), "Readme");
        assert_eq!(format_title(".hidden"), ".hidden");
        assert_eq!(format_title("trailing."), "trailing.");
        assert_eq!(format_title(""), "");
    }

    #[test]
    fn uses_final_path_component() {
        assert_eq!(format_title("resources/cancer/Bowel_Screening.pdf"), "Bowel Screening");
    }

    #[test]
    fn information_separators_count_as_whitespace() {
        assert_eq!(format_title("Flu\x1fShot\x1c.pdf"), "Flu Shot");
        assert_eq!(format_title("Flu\u{3000}Shot.pdf"), "Flu Shot");
    }

    #[test]
    fn keeps_non_ascii_text() {
        assert_eq!(format_title("糖尿病_中文.pdf"), "糖尿病 中文");
    }

    #[test]
    fn output_has_no_separators_or_double_spaces() {
        for name in [
            "a-b_c.pdf",
            "--__--",
            " x \t y\n.pdf",
            "Mental_Health - Tips_ENG.pdf",
            "-.-",
        ] {
            let title = format_title(name);
            assert!(!title.contains('_') && !title.contains('-'), "{name:?} -> {title:?}");
            assert!(!title.contains("  "), "{name:?} -> {title:?}");
            assert_eq!(title, title.trim(), "{name:?} -> {title:?}");
        }
    }

    #[test]
    fn split_extension_edges() {
        assert_eq!(split_extension("a.pdf"), ("a", Some("pdf")));
        assert_eq!(split_extension(".pdf"), (".pdf", None));
        assert_eq!(split_extension("a."), ("a.", None));
        assert_eq!(split_extension("dir/"), ("dir", None));
    }
}
