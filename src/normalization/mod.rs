//! нормализация: декомпозиция (NFD, NFKD), композиция (NFC, NFKC, NFKC_Casefold, FCC) и FCD
//! поверх таблиц одной формы нормализации.

pub mod buffer;
pub mod composition;
pub mod decomposition;
pub mod fcd;
pub mod quick_check;

pub use composition::ComposingNormalizer;
pub use decomposition::DecomposingNormalizer;
pub use fcd::FcdNormalizer;
pub use quick_check::QuickCheck;

use crate::data::{self, NormalizerData};
use crate::error::DataError;

use composition::hangul::{decompose_hangul, is_syllable};

/// режим нормализации для [`instance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode
{
    /// NF(K)C
    Compose,
    /// FCC
    ComposeContiguous,
    /// NF(K)D
    Decompose,
    /// FCD
    Fcd,
}

/// общий интерфейс нормализаторов
pub trait Normalizer
{
    /// таблицы формы нормализации
    fn data(&self) -> &NormalizerData;

    /// нормализовать строку, дописав результат в `dest`
    fn normalize_to(&self, text: &str, dest: &mut String);

    /// длина нормализованного префикса строки. префикс заканчивается на границе сегмента
    fn span_quick_check_yes(&self, text: &str) -> usize;

    fn quick_check(&self, text: &str) -> QuickCheck;

    /// текст до кодпоинта не взаимодействует с ним при нормализации
    fn has_boundary_before(&self, c: char) -> bool;

    /// текст после кодпоинта не взаимодействует с ним при нормализации
    fn has_boundary_after(&self, c: char) -> bool;

    /// кодпоинт не меняется при нормализации и не взаимодействует с соседними
    fn is_inert(&self, c: char) -> bool;

    fn normalize(&self, text: &str) -> String
    {
        let mut result = String::with_capacity(text.len());
        self.normalize_to(text, &mut result);

        result
    }

    fn is_normalized(&self, text: &str) -> bool
    {
        let yes = self.span_quick_check_yes(text);

        if yes == text.len() {
            return true;
        }

        let rest = &text[yes ..];
        let mut normalized = String::with_capacity(rest.len());
        self.normalize_to(rest, &mut normalized);

        normalized == rest
    }

    /// дописать к нормализованной строке `first` строку `second`, нормализовав её.
    /// нормализуется только хвост `first` от последней границы сегмента
    fn normalize_second_and_append(&self, first: &mut String, second: &str)
    {
        let tail_start = last_boundary(self, first);
        let mut tail = first.split_off(tail_start);

        tail.push_str(second);
        self.normalize_to(&tail, first);
    }

    /// дописать к нормализованной строке `first` нормализованную строку `second`.
    /// нормализуется только место соединения строк
    fn append(&self, first: &mut String, second: &str)
    {
        let head_end = second
            .char_indices()
            .find(|(_, c)| self.has_boundary_before(*c))
            .map_or(second.len(), |(i, _)| i);

        let tail_start = last_boundary(self, first);
        let mut tail = first.split_off(tail_start);

        tail.push_str(&second[.. head_end]);
        self.normalize_to(&tail, first);
        first.push_str(&second[head_end ..]);
    }

    fn combining_class(&self, c: char) -> u8
    {
        self.data().combining_class(c as u32)
    }

    /// отображение кодпоинта, если он меняется при декомпозиции
    fn decomposition(&self, c: char) -> Option<String>
    {
        let code = c as u32;
        let data = self.data();
        let value = data.value(code);

        if is_syllable(code) {
            let (l, v, t) = decompose_hangul(code);

            return Some(
                [Some(l), Some(v), t]
                    .into_iter()
                    .flatten()
                    .filter_map(char::from_u32)
                    .collect(),
            );
        }

        match value.has_expansion() {
            true => Some(
                data.expansion(value)
                    .iter()
                    .map(|c| char::from(crate::codepoint::Codepoint::from_baked(*c)))
                    .collect(),
            ),
            false => None,
        }
    }

    /// каноническая композиция пары кодпоинтов
    fn compose_pair(&self, first: char, second: char) -> Option<char>
    {
        self.data()
            .compose_pair(first as u32, second as u32)
            .and_then(char::from_u32)
    }
}

/// начало последнего сегмента строки (позиция последнего кодпоинта с границей перед ним)
fn last_boundary<N: Normalizer + ?Sized>(normalizer: &N, text: &str) -> usize
{
    text.char_indices()
        .rev()
        .find(|(_, c)| normalizer.has_boundary_before(*c))
        .map_or(0, |(i, _)| i)
}

/// нормализатор по названию формы ("nfc", "nfkc", "nfkc_cf", "uts46") и режиму
pub fn instance(name: &str, mode: Mode) -> Result<Box<dyn Normalizer + Send + Sync>, DataError>
{
    let data: &'static NormalizerData = data::get(name)?;

    Ok(match mode {
        Mode::Compose => Box::new(ComposingNormalizer::from_data(data, false)),
        Mode::ComposeContiguous => Box::new(ComposingNormalizer::from_data(data, true)),
        Mode::Decompose => Box::new(DecomposingNormalizer::from_data(data)),
        Mode::Fcd => Box::new(FcdNormalizer::from_data(data)),
    })
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn instances()
    {
        let nfc = instance("nfc", Mode::Compose).unwrap();
        let nfd = instance("nfc", Mode::Decompose).unwrap();

        assert_eq!(nfc.normalize("e\u{301}"), "é");
        assert_eq!(nfd.normalize("é"), "e\u{301}");

        assert_eq!(
            instance("nfx", Mode::Compose).err(),
            Some(DataError::UnknownForm("nfx".to_owned()))
        );
    }

    #[test]
    fn append()
    {
        let nfc = ComposingNormalizer::new_nfc().unwrap();

        // ́ комбинируется с последним кодпоинтом первой строки
        let mut first = String::from("abce");
        nfc.normalize_second_and_append(&mut first, "\u{301}fg");
        assert_eq!(first, "abcéfg");

        let mut first = String::from("abce");
        nfc.append(&mut first, "\u{301}fg");
        assert_eq!(first, "abcéfg");

        // хангыль: LV + T
        let mut first = String::from("\u{AC00}");
        nfc.normalize_second_and_append(&mut first, "\u{11A8}");
        assert_eq!(first, "\u{AC01}");

        let mut first = String::new();
        nfc.normalize_second_and_append(&mut first, "A\u{30A}");
        assert_eq!(first, "\u{C5}");
    }

    #[test]
    fn decomposition()
    {
        let nfc = ComposingNormalizer::new_nfc().unwrap();
        let nfkc = ComposingNormalizer::new_nfkc().unwrap();

        assert_eq!(nfc.decomposition('é').as_deref(), Some("e\u{301}"));
        assert_eq!(nfc.decomposition('a'), None);
        assert_eq!(nfc.decomposition('\u{AC01}').as_deref(), Some("\u{1100}\u{1161}\u{11A8}"));
        assert_eq!(nfc.decomposition('\u{FB01}'), None);
        assert_eq!(nfkc.decomposition('\u{FB01}').as_deref(), Some("fi"));

        assert_eq!(nfc.compose_pair('e', '\u{301}'), Some('é'));
        assert_eq!(nfc.compose_pair('\u{1100}', '\u{1161}'), Some('\u{AC00}'));
        assert_eq!(nfc.compose_pair('a', 'b'), None);

        assert_eq!(nfc.combining_class('\u{301}'), 230);
        assert_eq!(nfc.combining_class('a'), 0);
    }
}
