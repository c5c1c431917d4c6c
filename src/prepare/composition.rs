use unicode_normalization_source::{combining_class, COMPOSITION_PAIRS};

use crate::data::{COMPOSITION_LAST, COMPOSITION_SECOND_SHIFT};
use crate::error::DataError;
use crate::normalization::composition::hangul;
use crate::trie::TrieBuilder;
use crate::trie::Trie;

/// таблица композиций: записи (второй кодпоинт, результат), сгруппированные по первому кодпоинту
/// и отсортированные по второму. индекс хранит позицию первой записи группы + 1
///
/// формат записи:
/// ssss ssss  ssss ssss    ssss ssss  ssss ssss    l___ ____  ___c cccc    cccc cccc  cccc cccc
/// где:
///     ss.. - второй кодпоинт
///     l    - последняя запись группы
///     cc.. - результат комбинирования
pub fn compositions() -> Result<(Vec<u64>, Trie<u16>), DataError>
{
    let mut starters: Vec<&u32> = COMPOSITION_PAIRS.keys().collect();
    starters.sort_unstable();

    let mut data: Vec<u64> = vec![];
    let mut index = TrieBuilder::new(0u16, 0u16);

    for starter in starters {
        let pairs = &COMPOSITION_PAIRS[starter];

        if data.len() >= u16::MAX as usize {
            return Err(DataError::CompositionsOverflow(data.len()));
        }

        index.set(*starter, data.len() as u16 + 1);

        for (i, (second, composite)) in pairs.iter().enumerate() {
            let last = match i + 1 == pairs.len() {
                true => COMPOSITION_LAST,
                false => 0,
            };

            data.push(((*second as u64) << COMPOSITION_SECOND_SHIFT) | last | *composite as u64);
        }
    }

    Ok((data, index.build()?))
}

/// каноническая композиция пары
pub fn compose(first: u32, second: u32) -> Option<u32>
{
    if let Some(composite) = hangul::compose_hangul(first, second) {
        return Some(composite);
    }

    COMPOSITION_PAIRS.get(&first).and_then(|pairs| {
        pairs
            .binary_search_by_key(&second, |(s, _)| *s)
            .ok()
            .map(|i| pairs[i].1)
    })
}

/// канонически скомбинировать декомпозированную последовательность.
/// при `only_contiguous` комбинируются только кодпоинты, следующие непосредственно за стартером
/// (или за уже скомбинированными с ним кодпоинтами)
pub fn recompose(codes: &[u32], only_contiguous: bool) -> Vec<u32>
{
    let mut result: Vec<u32> = Vec::with_capacity(codes.len());
    let mut starter: Option<usize> = None;
    // CCC последнего нескомбинированного кодпоинта после стартера
    let mut previous_ccc: Option<u8> = None;

    for &code in codes {
        let ccc = combining_class(code);

        if let Some(starter) = starter {
            let blocked = match previous_ccc {
                None => false,
                Some(previous) => only_contiguous || previous == 0 || previous >= ccc,
            };

            if !blocked {
                if let Some(composite) = compose(result[starter], code) {
                    result[starter] = composite;
                    continue;
                }
            }
        }

        match ccc == 0 {
            true => {
                starter = Some(result.len());
                previous_ccc = None;
            }
            false => previous_ccc = Some(ccc),
        }

        result.push(code);
    }

    result
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn recomposition()
    {
        // A + ̊ + ́ -> Ǻ
        assert_eq!(recompose(&[0x41, 0x30A, 0x301], false), vec![0x1FA]);
        // e + ̣ + ̂ -> ệ
        assert_eq!(recompose(&[0x65, 0x323, 0x302], false), vec![0x1EC7]);
        // ᄒ + ᅵ + ᇂ -> 힣
        assert_eq!(recompose(&[0x1112, 0x1175, 0x11C2], false), vec![0xD7A3]);
        // Å (ангстрем) не восстанавливается - синглтон
        assert_eq!(recompose(&[0x41, 0x30A], false), vec![0xC5]);
    }

    #[test]
    fn contiguous()
    {
        // a + ̖ + ́: ̖ с a не комбинируется и блокирует ́ для FCC
        assert_eq!(recompose(&[0x61, 0x316, 0x301], false), vec![0xE1, 0x316]);
        assert_eq!(recompose(&[0x61, 0x316, 0x301], true), vec![0x61, 0x316, 0x301]);
    }

    #[test]
    fn table()
    {
        let (data, index) = compositions().unwrap();

        let start = index.get(0x41) as usize;
        assert!(start > 0);

        let group: Vec<u64> = data[start - 1 ..]
            .iter()
            .copied()
            .take_while(|e| e & COMPOSITION_LAST == 0)
            .collect();

        assert!(group.iter().any(|e| (e >> COMPOSITION_SECOND_SHIFT) as u32 == 0x300));
        assert_eq!(index.get(0x300), 0);
    }
}
