//! Text canonicalisation for portal cell text and professor names.
//!
//! The portal mixes Persian digits, Arabic-Indic digits and Arabic
//! look-alike letters freely, sometimes within one cell. Everything the
//! scraper and the registration path compare goes through here first.

use unicode_normalization::UnicodeNormalization;

/// Zero-width and directional marks that carry no meaning in cell text
const INVISIBLE_MARKS: [char; 6] = [
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{200E}', // left-to-right mark
    '\u{200F}', // right-to-left mark
    '\u{FEFF}', // byte order mark
];

/// Maps a single character to its canonical form.
///
/// # Returns
/// `None` if the character should be dropped entirely
fn canonical_char(c: char) -> Option<char> {
    match c {
        // Persian digits
        '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
        // Arabic-Indic digits
        '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
        // Arabic yeh, alef maqsura and yeh with hamza become Persian yeh
        'ي' | 'ى' | 'ئ' => Some('ی'),
        // Arabic kaf becomes Persian keheh
        'ك' => Some('ک'),
        // Heh variants
        'ة' | 'ۀ' | 'ۂ' | 'ۃ' => Some('ه'),
        '\u{00A0}' | '\u{202F}' => Some(' '),
        c if INVISIBLE_MARKS.contains(&c) => None,
        c => Some(c),
    }
}

/// Canonicalises digits and letters in portal text.
///
/// Persian (`۰`-`۹`) and Arabic-Indic (`٠`-`٩`) digits become ASCII, Arabic
/// look-alike letters become their Persian counterparts, zero-width marks
/// are removed and non-breaking spaces become plain spaces. The result is
/// trimmed.
///
/// # Arguments
/// * `text` - Raw cell text
///
/// # Returns
/// The canonical text; empty input yields an empty string
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .filter_map(canonical_char)
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Derives the de-duplication key for a person's name.
///
/// Applies [`normalize_digits`], composes the result to NFC and collapses
/// every whitespace run to a single space. An empty result means the name
/// is unusable as an identity.
pub fn normalize_name(text: &str) -> String {
    let composed = normalize_digits(text).nfc().collect::<String>();

    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persian_and_arabic_digits() {
        assert_eq!(normalize_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
        assert_eq!(normalize_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
        assert_eq!(normalize_digits("۱۴۰۳/۱۰/۱۵"), "1403/10/15");
    }

    #[test]
    fn test_look_alike_letters() {
        assert_eq!(normalize_digits("يك شنبه"), "یک شنبه");
        assert_eq!(normalize_digits("تاريخ"), "تاریخ");
    }

    #[test]
    fn test_invisible_marks_and_trim() {
        assert_eq!(normalize_digits("  پنج\u{200C}شنبه\u{00A0}"), "پنجشنبه");
        assert_eq!(normalize_digits("\u{200F}12\u{200E}"), "12");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_digits(""), "");
        assert_eq!(normalize_name("   \u{200C} "), "");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  علي   رضايي "), "علی رضایی");
        assert_eq!(normalize_name("فاطمة\tكريمي"), "فاطمه کریمی");
        // Same person typed with different letter forms maps to one key
        assert_eq!(normalize_name("مهدي كاظمي"), normalize_name("مهدی  کاظمی"));
    }
}
