use std::collections::HashMap;
use std::collections::HashSet;

use icu_normalizer::properties::CanonicalCompositionBorrowed;
use icu_normalizer::properties::CanonicalDecompositionBorrowed;
use icu_normalizer::properties::Decomposed;

use crate::unicode::{assigned_codepoints, is_hangul_syllable};

lazy_static! {
    /// пары для композиции: первый кодпоинт -> (второй кодпоинт, результат), отсортированы по второму
    pub static ref COMPOSITION_PAIRS: HashMap<u32, Vec<(u32, u32)>> = pairs();
    /// кодпоинты, которые могут быть скомбинированы с предыдущими
    pub static ref COMBINES_BACKWARDS: HashSet<u32> = combines_backwards();
}

/// первичные композиты: каноническая декомпозиция из двух кодпоинтов, которая снова собирается в исходный кодпоинт
/// (исключения композиции в пары не попадают). хангыль комбинируется алгоритмически.
fn pairs() -> HashMap<u32, Vec<(u32, u32)>>
{
    let decomposer = CanonicalDecompositionBorrowed::new();
    let composer = CanonicalCompositionBorrowed::new();

    let mut map: HashMap<u32, Vec<(u32, u32)>> = HashMap::new();

    for code in assigned_codepoints() {
        if is_hangul_syllable(code) {
            continue;
        }

        let c = match char::from_u32(code) {
            Some(c) => c,
            None => continue,
        };

        if let Decomposed::Expansion(first, second) = decomposer.decompose(c) {
            if composer.compose(first, second) == Some(c) {
                map.entry(u32::from(first))
                    .or_default()
                    .push((u32::from(second), code));
            }
        }
    }

    for pairs in map.values_mut() {
        pairs.sort_unstable();
    }

    map
}

fn combines_backwards() -> HashSet<u32>
{
    COMPOSITION_PAIRS
        .values()
        .flat_map(|pairs| pairs.iter().map(|(second, _)| *second))
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn pairs()
    {
        // e + ́ = é
        let e = &COMPOSITION_PAIRS[&0x65];
        assert!(e.contains(&(0x301, 0xE9)));
        assert!(e.windows(2).all(|w| w[0].0 < w[1].0));

        assert!(COMBINES_BACKWARDS.contains(&0x301));
        assert!(!COMBINES_BACKWARDS.contains(&0x65));
    }

    #[test]
    fn exclusions()
    {
        // U+0958 (деванагари) - исключение композиции
        assert!(!COMPOSITION_PAIRS
            .get(&0x915)
            .map(|pairs| pairs.iter().any(|(_, composite)| *composite == 0x958))
            .unwrap_or(false));
    }
}
