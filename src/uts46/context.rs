//! контекстные правила CONTEXTJ и CONTEXTO (RFC 5892, приложение A)

use super::info::IdnaErrors;
use super::properties::{IdnaProperties, JoiningType, Script};
use crate::data::NormalizerData;

pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// CCC вирамы
const VIRAMA: u8 = 9;

const MIDDLE_DOT: char = '\u{B7}';
const GREEK_LOWER_NUMERAL_SIGN: char = '\u{375}';
const HEBREW_GERESH: char = '\u{5F3}';
const HEBREW_GERSHAYIM: char = '\u{5F4}';
const KATAKANA_MIDDLE_DOT: char = '\u{30FB}';

/// символы, допустимые только в определённом контексте
pub const CONTEXT_O_RANGES: [(u32, u32); 6] = [
    (0xB7, 0xB7),
    (0x375, 0x375),
    (0x5F3, 0x5F4),
    (0x660, 0x669),
    (0x6F0, 0x6F9),
    (0x30FB, 0x30FB),
];

/// A.1, A.2: ZWNJ допустим после вирамы или между символами с подходящим типом соединения,
/// ZWJ - только после вирамы
pub fn is_label_ok_context_j(data: &NormalizerData, properties: &IdnaProperties, label: &[char]) -> bool
{
    for (i, &c) in label.iter().enumerate() {
        if c != ZERO_WIDTH_NON_JOINER && c != ZERO_WIDTH_JOINER {
            continue;
        }

        let before = match i {
            0 => return false,
            _ => label[i - 1],
        };

        if data.combining_class(before as u32) == VIRAMA {
            continue;
        }

        if c == ZERO_WIDTH_JOINER {
            return false;
        }

        // (Joining_Type:{L,D})(Joining_Type:T)* перед ZWNJ
        let precontext = label[.. i]
            .iter()
            .rev()
            .map(|c| properties.joining_type(*c))
            .find(|t| *t != JoiningType::TRANSPARENT);

        if !matches!(precontext, Some(JoiningType::LEFT_JOINING) | Some(JoiningType::DUAL_JOINING)) {
            return false;
        }

        // (Joining_Type:T)*(Joining_Type:{R,D}) после ZWNJ
        let postcontext = label[i + 1 ..]
            .iter()
            .map(|c| properties.joining_type(*c))
            .find(|t| *t != JoiningType::TRANSPARENT);

        if !matches!(postcontext, Some(JoiningType::RIGHT_JOINING) | Some(JoiningType::DUAL_JOINING)) {
            return false;
        }
    }

    true
}

/// A.3 - A.9
pub fn check_label_context_o(properties: &IdnaProperties, label: &[char]) -> IdnaErrors
{
    let mut errors = IdnaErrors::empty();
    // -1 - арабские цифры, 1 - расширенные арабские цифры
    let mut arabic_digits = 0;

    for (i, &c) in label.iter().enumerate() {
        let before = i.checked_sub(1).map(|i| label[i]);
        let after = label.get(i + 1).copied();

        match c {
            MIDDLE_DOT => {
                if before != Some('l') || after != Some('l') {
                    errors |= IdnaErrors::CONTEXTO_PUNCTUATION;
                }
            }
            GREEK_LOWER_NUMERAL_SIGN => {
                if after.and_then(|c| properties.script(c)) != Some(Script::Greek) {
                    errors |= IdnaErrors::CONTEXTO_PUNCTUATION;
                }
            }
            HEBREW_GERESH | HEBREW_GERSHAYIM => {
                if before.and_then(|c| properties.script(c)) != Some(Script::Hebrew) {
                    errors |= IdnaErrors::CONTEXTO_PUNCTUATION;
                }
            }
            '\u{660}' ..= '\u{669}' => {
                if arabic_digits > 0 {
                    errors |= IdnaErrors::CONTEXTO_DIGITS;
                }

                arabic_digits = -1;
            }
            '\u{6F0}' ..= '\u{6F9}' => {
                if arabic_digits < 0 {
                    errors |= IdnaErrors::CONTEXTO_DIGITS;
                }

                arabic_digits = 1;
            }
            KATAKANA_MIDDLE_DOT => {
                if !label.iter().any(|c| properties.script(*c) == Some(Script::Japanese)) {
                    errors |= IdnaErrors::CONTEXTO_PUNCTUATION;
                }
            }
            _ => (),
        }
    }

    errors
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::data;

    fn chars(s: &str) -> Vec<char>
    {
        s.chars().collect()
    }

    #[test]
    fn context_j()
    {
        let nfc = data::nfc().unwrap();
        let properties = data::idna_properties().unwrap();

        // после вирамы (деванагари)
        assert!(is_label_ok_context_j(nfc, properties, &chars("\u{915}\u{94D}\u{200D}")));
        assert!(is_label_ok_context_j(nfc, properties, &chars("\u{915}\u{94D}\u{200C}")));
        // ZWJ без вирамы
        assert!(!is_label_ok_context_j(nfc, properties, &chars("a\u{200D}b")));
        // ZWNJ в начале метки
        assert!(!is_label_ok_context_j(nfc, properties, &chars("\u{200C}a")));
        // бет (D) + ZWNJ + бет (D)
        assert!(is_label_ok_context_j(nfc, properties, &chars("\u{628}\u{200C}\u{628}")));
        // бет (D) + ZWNJ + латиница
        assert!(!is_label_ok_context_j(nfc, properties, &chars("\u{628}\u{200C}a")));
    }

    #[test]
    fn context_o()
    {
        let properties = data::idna_properties().unwrap();

        assert!(check_label_context_o(properties, &chars("l\u{B7}l")).is_empty());
        assert_eq!(
            check_label_context_o(properties, &chars("a\u{B7}l")),
            IdnaErrors::CONTEXTO_PUNCTUATION
        );
        assert!(check_label_context_o(properties, &chars("\u{375}\u{3B1}")).is_empty());
        assert!(check_label_context_o(properties, &chars("\u{5D0}\u{5F3}")).is_empty());
        assert!(!check_label_context_o(properties, &chars("a\u{5F3}")).is_empty());
        assert!(check_label_context_o(properties, &chars("\u{30A2}\u{30FB}")).is_empty());
        assert!(!check_label_context_o(properties, &chars("a\u{30FB}")).is_empty());
        assert_eq!(
            check_label_context_o(properties, &chars("\u{661}\u{6F1}")),
            IdnaErrors::CONTEXTO_DIGITS
        );
    }
}
