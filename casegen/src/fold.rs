//! Turning font names into fragments of Rust identifiers

use std::sync::OnceLock;

use regex::Regex;

/// Extensions that say nothing about the test, so are dropped.
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc", "woff", "woff2", "dfont"];

/// Characters dropped without leaving a separator behind.
fn is_dropped(c: char) -> bool {
    matches!(c, '-' | '.' | '[' | ']' | ',')
}

fn not_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_]+").unwrap())
}

fn repeated_underscore() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_{2,}").unwrap())
}

fn strip_font_extension(name: &str) -> &str {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return name;
    };
    if FONT_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
    {
        stem
    } else {
        name
    }
}

/// Fold a font name, typically a filename, into a lowercase snake_case fragment.
///
/// `NotoSans-Regular.ttf` becomes `noto_sans_regular`. Every capital after the
/// first character starts a new segment, so acronyms split per letter
/// (`NotoSansCJK` is `noto_sans_c_j_k`) and existing underscores survive as a
/// single separator. A fragment that would start with a digit gets a leading `_`.
///
/// Not injective: `A.ttf` and `A.otf` both fold to `a`.
pub fn fold_name(name: &str) -> String {
    let name = strip_font_extension(name);

    let mut split = String::with_capacity(name.len() * 2);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            split.push('_');
        }
        split.extend(c.to_lowercase());
    }
    split.retain(|c| !is_dropped(c));

    let cleaned = not_identifier().replace_all(&split, "_");
    let collapsed = repeated_underscore().replace_all(&cleaned, "_");
    let fragment = collapsed.trim_matches('_');

    if fragment.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{fragment}")
    } else {
        fragment.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::fold_name;

    #[rstest]
    #[case::simple("FontA.ttf", "font_a")]
    #[case::hyphen("FontB-Bold.otf", "font_b_bold")]
    #[case::noto("NotoSans-Regular.ttf", "noto_sans_regular")]
    #[case::lowercase_hyphen("noto-sans.ttf", "notosans")]
    #[case::acronym("NotoSansCJK-Bold.otf", "noto_sans_c_j_k_bold")]
    #[case::underscores("My_Font__v2.ttf", "my_font_v2")]
    #[case::brackets("Roboto[wdth,wght].ttf", "robotowdthwght")]
    #[case::unknown_extension("Font.glyphs", "fontglyphs")]
    #[case::uppercase_extension("Font.TTF", "font")]
    #[case::woff2("Font.woff2", "font")]
    #[case::space("Source Serif.otf", "source_serif")]
    #[case::non_ascii("Ünïcode.ttf", "n_code")]
    #[case::leading_digit("3270Medium.otf", "_3270_medium")]
    #[case::only_extension(".ttf", "")]
    fn fold(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(expected, fold_name(name));
    }

    #[test]
    fn fold_is_not_injective() {
        assert_eq!(fold_name("NotoSans.ttf"), fold_name("NotoSans.otf"));
    }
}
