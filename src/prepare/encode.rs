use std::collections::{BTreeSet, HashMap};

use unicode_normalization_source::{
    combining_class, combining_class_ranges, COMBINES_BACKWARDS as SOURCE_COMBINES_BACKWARDS, COMPOSITION_PAIRS,
    UTS46_DISALLOWED,
};

use super::composition::recompose;
use super::Form;
use crate::codepoint::Codepoint;
use crate::data::*;
use crate::error::DataError;
use crate::normalization::composition::hangul::*;
use crate::trie::TrieBuilder;
use crate::trie::Trie;

/// U+FFFD - замена недопустимых кодпоинтов UTS #46
const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// подготовленные значения кодпоинтов и таблица расширений
pub struct EncodedData
{
    pub values: Trie<u32>,
    pub expansions: Vec<u32>,
}

/// таблица расширений, одинаковые декомпозиции записываются один раз
#[derive(Default)]
struct Expansions
{
    data: Vec<u32>,
    positions: HashMap<Vec<u32>, u32>,
}

impl Expansions
{
    /// записать декомпозицию, получить её индекс
    fn insert(&mut self, code: u32, mapping: &[u32]) -> Result<u32, DataError>
    {
        if let Some(position) = self.positions.get(mapping) {
            return Ok(*position);
        }

        if mapping.len() > EXPANSION_LENGTH_MASK as usize {
            return Err(DataError::ExpansionTooLong(code));
        }

        let position = self.data.len();

        if position > u16::MAX as usize {
            return Err(DataError::ExpansionsOverflow(position));
        }

        let lead_ccc = mapping.first().map_or(0, |c| combining_class(*c)) as u32;
        let trail_ccc = mapping.last().map_or(0, |c| combining_class(*c)) as u32;

        self.data.push(
            mapping.len() as u32
                | (lead_ccc << EXPANSION_LEAD_CCC_SHIFT)
                | (trail_ccc << EXPANSION_TRAIL_CCC_SHIFT),
        );

        self.data.extend(
            mapping
                .iter()
                .map(|c| Codepoint::from_code_and_ccc(*c, combining_class(*c)).baked()),
        );

        self.positions.insert(mapping.to_vec(), position as u32);

        Ok(position as u32)
    }
}

/// может быть скомбинирован с предыдущим кодпоинтом
fn combines_backwards(code: u32) -> bool
{
    SOURCE_COMBINES_BACKWARDS.contains(&code) || is_vowel_or_trailing_consonant(code)
}

/// может быть скомбинирован со следующим кодпоинтом
fn combines_forwards(code: u32) -> bool
{
    COMPOSITION_PAIRS.contains_key(&code) || is_leading_consonant(code) || is_lv_syllable(code)
}

/// значения кодпоинтов формы нормализации
pub fn encode(form: Form) -> Result<EncodedData, DataError>
{
    let mappings = form.mappings();

    let mut builder = TrieBuilder::new(0u32, 0u32);
    let mut expansions = Expansions::default();

    // кодпоинты, отличные от стартеров без декомпозиции, не участвующих в композиции
    let mut codes: BTreeSet<u32> = mappings.keys().copied().collect();

    codes.extend(combining_class_ranges().into_iter().flat_map(|(range, _)| range));

    for (first, pairs) in COMPOSITION_PAIRS.iter() {
        codes.insert(*first);
        codes.extend(pairs.iter().map(|(second, _)| *second));
    }

    codes.extend(HANGUL_L_BASE .. HANGUL_L_BASE + HANGUL_L_COUNT);
    codes.extend(HANGUL_V_BASE .. HANGUL_V_BASE + HANGUL_V_COUNT);
    codes.extend(HANGUL_T_BASE + 1 .. HANGUL_T_BASE + 1 + HANGUL_T_COUNT);

    for code in codes {
        let value = encode_codepoint(code, mappings.get(&code), &mut expansions)?;
        builder.set(code, value);
    }

    for code in HANGUL_S_BASE .. HANGUL_S_BASE + HANGUL_S_COUNT {
        let value = match is_lv_syllable(code) {
            true => MARKER_HANGUL | COMBINES_FORWARDS | NO_COMPOSE_BOUNDARY_AFTER,
            false => MARKER_HANGUL,
        };

        builder.set(code, value);
    }

    if form == Form::Uts46 {
        let index = expansions.insert(REPLACEMENT_CHARACTER, &[REPLACEMENT_CHARACTER])?;
        let value = MARKER_EXPANSION | COMPOSE_QC_NO | FCC_QC_NO | (index << EXPANSION_SHIFT);

        for range in UTS46_DISALLOWED.iter() {
            builder.set_range(range.clone(), value);
        }
    }

    Ok(EncodedData {
        values: builder.build()?,
        expansions: expansions.data,
    })
}

/// значение кодпоинта. в отображении - декомпозированная последовательность
fn encode_codepoint(code: u32, mapping: Option<&Vec<u32>>, expansions: &mut Expansions) -> Result<u32, DataError>
{
    let ccc = combining_class(code);
    let mut value = ccc as u32;

    if combines_forwards(code) {
        value |= COMBINES_FORWARDS;
    }

    let mapping = match mapping {
        Some(mapping) => mapping,
        None => {
            if combines_backwards(code) {
                value |= COMBINES_BACKWARDS;
            }

            if ccc != 0 || combines_backwards(code) {
                value |= NO_COMPOSE_BOUNDARY_BEFORE;
            }

            // комбинируемый с предыдущим может образовать композит, комбинируемый со следующим (L + V + T)
            if ccc != 0 || combines_forwards(code) || combines_backwards(code) {
                value |= NO_COMPOSE_BOUNDARY_AFTER;
            }

            return Ok(value);
        }
    };

    value |= MARKER_EXPANSION | (expansions.insert(code, mapping)? << EXPANSION_SHIFT);

    let recomposed = recompose(mapping, false);

    if recomposed != [code] {
        value |= COMPOSE_QC_NO;
    }

    if recompose(mapping, true) != [code] {
        value |= FCC_QC_NO;
    }

    // удаляемый кодпоинт: текст до и после него может взаимодействовать
    let (first, last) = match (mapping.first(), mapping.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(value | NO_COMPOSE_BOUNDARY_BEFORE | NO_COMPOSE_BOUNDARY_AFTER),
    };

    if combines_backwards(first) {
        value |= COMBINES_BACKWARDS;
    }

    if combining_class(first) != 0 || combines_backwards(first) {
        value |= NO_COMPOSE_BOUNDARY_BEFORE;
    }

    let boundary_after = combining_class(last) == 0
        && recomposed
            .last()
            .map_or(false, |c| combining_class(*c) == 0 && !combines_forwards(*c) && !combines_backwards(*c));

    if !boundary_after {
        value |= NO_COMPOSE_BOUNDARY_AFTER;
    }

    Ok(value)
}
