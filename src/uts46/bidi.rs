//! правило BiDi для меток (RFC 5893, раздел 2)

use super::info::IdnaInfo;
use super::properties::{BidiClass, IdnaProperties};

const L: u32 = 1 << BidiClass::LEFT_TO_RIGHT.0;
const R: u32 = 1 << BidiClass::RIGHT_TO_LEFT.0;
const EN: u32 = 1 << BidiClass::EUROPEAN_NUMBER.0;
const ES: u32 = 1 << BidiClass::EUROPEAN_SEPARATOR.0;
const ET: u32 = 1 << BidiClass::EUROPEAN_TERMINATOR.0;
const AN: u32 = 1 << BidiClass::ARABIC_NUMBER.0;
const CS: u32 = 1 << BidiClass::COMMON_SEPARATOR.0;
const ON: u32 = 1 << BidiClass::OTHER_NEUTRAL.0;
const AL: u32 = 1 << BidiClass::ARABIC_LETTER.0;
const NSM: u32 = 1 << BidiClass::NONSPACING_MARK.0;
const BN: u32 = 1 << BidiClass::BOUNDARY_NEUTRAL.0;

const L_R_AL: u32 = L | R | AL;
const R_AL_AN: u32 = R | AL | AN;
const L_EN: u32 = L | EN;
const R_AL_EN_AN: u32 = R | AL | EN | AN;
const EN_AN: u32 = EN | AN;
const L_EN_ES_CS_ET_ON_BN_NSM: u32 = L_EN | ES | CS | ET | ON | BN | NSM;
const R_AL_AN_EN_ES_CS_ET_ON_BN_NSM: u32 = R_AL_EN_AN | ES | CS | ET | ON | BN | NSM;

/// проверить метку. метка с символами R, AL или AN делает имя двунаправленным,
/// нарушение любого из условий правила сбрасывает `is_ok_bidi`
pub fn check_label(properties: &IdnaProperties, label: &str, info: &mut IdnaInfo)
{
    let mut chars = label.chars();

    let first = match chars.next() {
        Some(c) => properties.bidi_class(c).mask(),
        None => return,
    };

    // 1. первый символ - L, R или AL
    if first & !L_R_AL != 0 {
        info.is_ok_bidi = false;
    }

    // последний символ, отличный от NSM
    let mut last = first;

    while let Some(c) = chars.next_back() {
        let bidi_class = properties.bidi_class(c);

        if bidi_class != BidiClass::NONSPACING_MARK {
            last = bidi_class.mask();
            break;
        }
    }

    // 3. RTL-метка заканчивается на R, AL, EN или AN (и, возможно, NSM)
    // 6. LTR-метка заканчивается на L или EN (и, возможно, NSM)
    let last_ok = match first & L != 0 {
        true => last & !L_EN == 0,
        false => last & !R_AL_EN_AN == 0,
    };

    if !last_ok {
        info.is_ok_bidi = false;
    }

    let mask = chars.fold(first | last, |mask, c| mask | properties.bidi_class(c).mask());

    match first & L != 0 {
        true => {
            // 5. в LTR-метке допустимы только L, EN, ES, CS, ET, ON, BN и NSM
            if mask & !L_EN_ES_CS_ET_ON_BN_NSM != 0 {
                info.is_ok_bidi = false;
            }
        }
        false => {
            // 2. в RTL-метке допустимы только R, AL, AN, EN, ES, CS, ET, ON, BN и NSM
            if mask & !R_AL_AN_EN_ES_CS_ET_ON_BN_NSM != 0 {
                info.is_ok_bidi = false;
            }

            // 4. EN и AN не могут встречаться в одной RTL-метке
            if mask & EN_AN == EN_AN {
                info.is_ok_bidi = false;
            }
        }
    }

    if mask & R_AL_AN != 0 {
        info.is_bidi = true;
    }
}

/// ASCII-метки двунаправленного имени, обработанные без полной проверки:
/// начинаются с L, заканчиваются на L или EN, не содержат B, S и WS
pub fn is_ascii_ok(text: &str) -> bool
{
    let bytes = text.as_bytes();
    let mut label_start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'.' {
            if i > label_start {
                let last = bytes[i - 1];

                if !last.is_ascii_lowercase() && !last.is_ascii_digit() {
                    return false;
                }
            }

            label_start = i + 1;
        } else if i == label_start {
            if !b.is_ascii_lowercase() {
                return false;
            }
        } else if b <= 0x20 && (b >= 0x1C || (0x09 ..= 0x0D).contains(&b)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::data;

    fn check(label: &str) -> IdnaInfo
    {
        let mut info = IdnaInfo::default();
        check_label(data::idna_properties().unwrap(), label, &mut info);

        info
    }

    #[test]
    fn ltr()
    {
        let info = check("abc1");
        assert!(info.is_ok_bidi);
        assert!(!info.is_bidi);

        // LTR-метка не может заканчиваться на ON
        assert!(!check("abc!").is_ok_bidi);
    }

    #[test]
    fn rtl()
    {
        // иврит
        let info = check("\u{5E9}\u{5DC}\u{5D5}\u{5DD}");
        assert!(info.is_ok_bidi);
        assert!(info.is_bidi);

        // RTL-метка с L
        assert!(!check("\u{5E9}a").is_ok_bidi);
        // начинается с цифры
        assert!(!check("1\u{5E9}").is_ok_bidi);
        // EN и AN в одной метке
        assert!(!check("\u{627}1\u{661}").is_ok_bidi);
    }

    #[test]
    fn ascii()
    {
        assert!(is_ascii_ok("abc.de1."));
        assert!(!is_ascii_ok("1abc."));
        assert!(!is_ascii_ok("abc-."));
    }
}
