use core::ops::RangeInclusive;

use icu_properties::props::BidiClass;
use icu_properties::props::CanonicalCombiningClass;
use icu_properties::props::DefaultIgnorableCodePoint;
use icu_properties::props::GeneralCategory;
use icu_properties::props::GeneralCategoryGroup;
use icu_properties::props::JoiningType;
use icu_properties::props::Script;
use icu_properties::CodePointMapData;
use icu_properties::CodePointSetData;

/// начало блока слогов хангыль
const HANGUL_S_BASE: u32 = 0xAC00;
/// количество слогов хангыль в Unicode
const HANGUL_S_COUNT: u32 = 11172;

/// группы письменностей, которые различают правила ContextO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdnaScript
{
    Greek,
    Hebrew,
    /// хирагана, катакана, иероглифы
    Japanese,
}

/// слог хангыль (декомпозиция вычисляется алгоритмически)
pub fn is_hangul_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// класс канонического комбинирования
pub fn combining_class(code: u32) -> u8
{
    CodePointMapData::<CanonicalCombiningClass>::new()
        .get32(code)
        .to_icu4c_value()
}

/// диапазоны кодпоинтов с ненулевым CCC
pub fn combining_class_ranges() -> Vec<(RangeInclusive<u32>, u8)>
{
    CodePointMapData::<CanonicalCombiningClass>::new()
        .iter_ranges()
        .map(|r| (r.range, r.value.to_icu4c_value()))
        .filter(|(_, ccc)| *ccc != 0)
        .collect()
}

/// назначенные кодпоинты, а также игнорируемые по умолчанию (среди них есть неназначенные)
pub fn assigned_codepoints() -> Vec<u32>
{
    let categories = CodePointMapData::<GeneralCategory>::new();
    let ignorables = CodePointSetData::new::<DefaultIgnorableCodePoint>();

    let mut codes: Vec<u32> = categories
        .iter_ranges()
        .filter(|r| {
            !matches!(
                r.value,
                GeneralCategory::Unassigned | GeneralCategory::PrivateUse | GeneralCategory::Surrogate
            )
        })
        .flat_map(|r| r.range)
        .collect();

    for range in ignorables.iter_ranges() {
        for code in range {
            if categories.get32(code) == GeneralCategory::Unassigned {
                codes.push(code);
            }
        }
    }

    codes.sort_unstable();
    codes
}

/// диапазоны с bidi-классом, отличным от L
pub fn bidi_class_ranges() -> Vec<(RangeInclusive<u32>, u8)>
{
    CodePointMapData::<BidiClass>::new()
        .iter_ranges()
        .filter(|r| r.value != BidiClass::LeftToRight)
        .map(|r| (r.range, r.value.to_icu4c_value()))
        .collect()
}

/// диапазоны с типом соединения, отличным от U (non joining)
pub fn joining_type_ranges() -> Vec<(RangeInclusive<u32>, u8)>
{
    CodePointMapData::<JoiningType>::new()
        .iter_ranges()
        .filter(|r| r.value != JoiningType::NonJoining)
        .map(|r| (r.range, r.value.to_icu4c_value()))
        .collect()
}

/// комбинируемые знаки (general category M*)
pub fn mark_ranges() -> Vec<RangeInclusive<u32>>
{
    CodePointMapData::<GeneralCategory>::new()
        .iter_ranges_for_group(GeneralCategoryGroup::Mark)
        .collect()
}

/// диапазоны письменности
pub fn script_ranges(script: IdnaScript) -> Vec<RangeInclusive<u32>>
{
    let scripts = CodePointMapData::<Script>::new();

    let values: &[Script] = match script {
        IdnaScript::Greek => &[Script::Greek],
        IdnaScript::Hebrew => &[Script::Hebrew],
        IdnaScript::Japanese => &[Script::Hiragana, Script::Katakana, Script::Han],
    };

    values
        .iter()
        .flat_map(|value| scripts.iter_ranges_for_value(*value))
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn ccc()
    {
        assert_eq!(combining_class(0x41), 0);
        assert_eq!(combining_class(0x301), 230);
        assert_eq!(combining_class(0x323), 220);
        assert_eq!(combining_class(0x94D), 9);
    }

    #[test]
    fn hangul()
    {
        assert!(is_hangul_syllable(0xAC00));
        assert!(is_hangul_syllable(0xD7A3));
        assert!(!is_hangul_syllable(0xD7A4));
        assert!(!is_hangul_syllable(0x1100));
    }
}
