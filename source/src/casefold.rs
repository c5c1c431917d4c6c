use std::collections::HashMap;

use icu_casemap::CaseMapper;
use icu_normalizer::ComposingNormalizerBorrowed;
use icu_normalizer::DecomposingNormalizerBorrowed;
use icu_properties::props::DefaultIgnorableCodePoint;
use icu_properties::CodePointSetData;
use writeable::Writeable;

use crate::unicode::{assigned_codepoints, is_hangul_syllable};

/// больше итераций NFKC_CF для стабилизации не требуется ни одному кодпоинту
const MAX_ITERATIONS: usize = 8;

lazy_static! {
    /// NFKC_Casefold: отображение кодпоинта в декомпозированном виде (NFKD от результата),
    /// игнорируемые по умолчанию кодпоинты отображаются в пустую последовательность
    pub static ref NFKC_CASEFOLD: HashMap<u32, Vec<u32>> = nfkc_casefold();
}

fn nfkc_casefold() -> HashMap<u32, Vec<u32>>
{
    let nfkc = ComposingNormalizerBorrowed::new_nfkc();
    let nfkd = DecomposingNormalizerBorrowed::new_nfkd();
    let casemap = CaseMapper::new();
    let ignorables = CodePointSetData::new::<DefaultIgnorableCodePoint>();

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
        let ignorable = ignorables.contains(c);

        // быстрая проверка: кодпоинт не меняется ни одним из шагов
        if !ignorable && nfkd.is_normalized(source) && casemap.fold(source).write_to_string() == source {
            continue;
        }

        let mut current = source.to_owned();

        for _ in 0 .. MAX_ITERATIONS {
            let folded = casemap.fold(&nfkc.normalize(&current)).write_to_string().into_owned();
            let stripped: String = folded.chars().filter(|c| !ignorables.contains(*c)).collect();
            let next = nfkc.normalize(&stripped).into_owned();

            if next == current {
                break;
            }

            current = next;
        }

        let mapping: Vec<u32> = nfkd.normalize(&current).chars().map(u32::from).collect();

        if mapping != [code] {
            map.insert(code, mapping);
        }
    }

    map
}
