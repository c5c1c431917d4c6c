use std::collections::HashMap;

use icu_normalizer::properties::CanonicalDecompositionBorrowed;
use icu_normalizer::properties::Decomposed;
use icu_normalizer::DecomposingNormalizerBorrowed;

use crate::unicode::{assigned_codepoints, combining_class, is_hangul_syllable};

lazy_static! {
    /// полные канонические декомпозиции, слоги хангыль не включены
    pub static ref CANONICAL_DECOMPOSITIONS: HashMap<u32, Vec<u32>> = canonical();
    /// полные декомпозиции совместимости (включают и канонические), слоги хангыль не включены
    pub static ref COMPATIBILITY_DECOMPOSITIONS: HashMap<u32, Vec<u32>> = compatibility();
}

/// полная каноническая декомпозиция каждого кодпоинта, который её имеет
fn canonical() -> HashMap<u32, Vec<u32>>
{
    let decomposer = CanonicalDecompositionBorrowed::new();
    let mut map = HashMap::new();

    for code in assigned_codepoints() {
        if is_hangul_syllable(code) {
            continue;
        }

        let c = match char::from_u32(code) {
            Some(c) => c,
            None => continue,
        };

        let mut decomposition = decompose_entry(&decomposer, c);

        if decomposition != [code] {
            canonical_order(&mut decomposition);
            map.insert(code, decomposition);
        }
    }

    map
}

/// полная декомпозиция совместимости - NFKD отдельного символа
fn compatibility() -> HashMap<u32, Vec<u32>>
{
    let nfkd = DecomposingNormalizerBorrowed::new_nfkd();
    let mut map = HashMap::new();
    let mut buffer = [0u8; 4];

    for code in assigned_codepoints() {
        if is_hangul_syllable(code) {
            continue;
        }

        let c = match char::from_u32(code) {
            Some(c) => c,
            None => continue,
        };

        let source: &str = c.encode_utf8(&mut buffer);

        if nfkd.is_normalized(source) {
            continue;
        }

        let decomposition: Vec<u32> = nfkd.normalize(source).chars().map(u32::from).collect();

        if decomposition != [code] {
            map.insert(code, decomposition);
        }
    }

    map
}

/// рекурсивно разворачиваем одноуровневую декомпозицию
fn decompose_entry(decomposer: &CanonicalDecompositionBorrowed, c: char) -> Vec<u32>
{
    match decomposer.decompose(c) {
        Decomposed::Default => vec![u32::from(c)],
        Decomposed::Singleton(s) => decompose_entry(decomposer, s),
        Decomposed::Expansion(a, b) => {
            let mut result = decompose_entry(decomposer, a);
            result.extend(decompose_entry(decomposer, b));
            result
        }
    }
}

/// каноническое упорядочивание: стабильная сортировка последовательностей нестартеров по CCC
pub fn canonical_order(codes: &mut [u32])
{
    let mut start = 0;

    while start < codes.len() {
        if combining_class(codes[start]) == 0 {
            start += 1;
            continue;
        }

        let mut end = start;

        while end < codes.len() && combining_class(codes[end]) != 0 {
            end += 1;
        }

        codes[start .. end].sort_by_key(|code| combining_class(*code));
        start = end;
    }
}
