use core::ops::RangeInclusive;
use std::collections::HashMap;

use icu_normalizer::uts46::Uts46MapperBorrowed;
use icu_normalizer::DecomposingNormalizerBorrowed;
use icu_properties::props::GeneralCategory;
use icu_properties::CodePointMapData;

use crate::unicode::{assigned_codepoints, is_hangul_syllable};

/// точка
const FULL_STOP: u32 = 0x2E;
/// идеографическая точка, полноширинная точка, полуширинная идеографическая точка
const LABEL_SEPARATORS: [u32; 3] = [0x3002, 0xFF0E, 0xFF61];

lazy_static! {
    /// отображение UTS #46 (без транзитивной обработки отклонений), в декомпозированном виде.
    /// игнорируемые - пустая последовательность, недопустимые - U+FFFD
    pub static ref UTS46_MAPPINGS: HashMap<u32, Vec<u32>> = uts46_mappings();
    /// неназначенные кодпоинты и кодпоинты для частного использования - недопустимы
    pub static ref UTS46_DISALLOWED: Vec<RangeInclusive<u32>> = uts46_disallowed();
}

fn uts46_mappings() -> HashMap<u32, Vec<u32>>
{
    let mapper = Uts46MapperBorrowed::new();
    let nfd = DecomposingNormalizerBorrowed::new_nfd();

    let mut map = HashMap::new();

    for code in assigned_codepoints() {
        if is_hangul_syllable(code) {
            continue;
        }

        let c = match char::from_u32(code) {
            Some(c) => c,
            None => continue,
        };

        let mapped: String = mapper.map_normalize(core::iter::once(c)).collect();
        let mapping: Vec<u32> = nfd.normalize(&mapped).chars().map(u32::from).collect();

        if mapping != [code] {
            map.insert(code, mapping);
        }
    }

    for separator in LABEL_SEPARATORS {
        map.insert(separator, vec![FULL_STOP]);
    }

    map
}

fn uts46_disallowed() -> Vec<RangeInclusive<u32>>
{
    let assigned = assigned_codepoints();
    let categories = CodePointMapData::<GeneralCategory>::new();

    categories
        .iter_ranges()
        .filter(|r| matches!(r.value, GeneralCategory::Unassigned | GeneralCategory::PrivateUse))
        .flat_map(|r| split_assigned(r.range, &assigned))
        .collect()
}

/// среди неназначенных кодпоинтов есть игнорируемые по умолчанию - они обрабатываются отдельно
fn split_assigned(range: RangeInclusive<u32>, assigned: &[u32]) -> Vec<RangeInclusive<u32>>
{
    let mut result = vec![];
    let mut start = *range.start();

    for code in range.clone() {
        if assigned.binary_search(&code).is_ok() {
            if start < code {
                result.push(start ..= code - 1);
            }
            start = code + 1;
        }
    }

    if start <= *range.end() {
        result.push(start ..= *range.end());
    }

    result
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn mappings()
    {
        // A -> a
        assert_eq!(UTS46_MAPPINGS[&0x41], vec![0x61]);
        // ß - отклонение, остаётся как есть
        assert!(!UTS46_MAPPINGS.contains_key(&0xDF));
        // мягкий перенос игнорируется
        assert_eq!(UTS46_MAPPINGS[&0xAD], vec![]);
        // идеографическая точка
        assert_eq!(UTS46_MAPPINGS[&0x3002], vec![0x2E]);
        // управляющие символы C1 недопустимы
        assert_eq!(UTS46_MAPPINGS[&0x80], vec![0xFFFD]);
    }

    #[test]
    fn disallowed()
    {
        assert!(UTS46_DISALLOWED.iter().any(|r| r.contains(&0xE000)));
        assert!(UTS46_DISALLOWED.iter().any(|r| r.contains(&0x10FFFF)));
        assert!(!UTS46_DISALLOWED.iter().any(|r| r.contains(&0x61)));
    }
}
