use super::buffer::ReorderingBuffer;
use super::composition::hangul::decompose_hangul;
use super::quick_check::{decompose_quick_check, QuickCheck};
use super::Normalizer;
use crate::codepoint::Codepoint;
use crate::data::{self, DecValue, NormalizerData};
use crate::error::DataError;

/// записать в буфер декомпозицию кодпоинта
#[inline(always)]
pub(crate) fn decompose(data: &NormalizerData, code: u32, value: DecValue, buffer: &mut ReorderingBuffer)
{
    if value.is_hangul() {
        let (l, v, t) = decompose_hangul(code);

        buffer.push(Codepoint::from_code(l));
        buffer.push(Codepoint::from_code(v));

        if let Some(t) = t {
            buffer.push(Codepoint::from_code(t));
        }

        return;
    }

    match value.has_expansion() {
        true => data
            .expansion(value)
            .iter()
            .for_each(|c| buffer.push(Codepoint::from_baked(*c))),
        false => buffer.push(Codepoint::from_code_and_ccc(code, value.ccc())),
    }
}

/// декомпозиция не начинается с нестартера - текст до кодпоинта не переупорядочивается с ним
#[inline(always)]
pub(crate) fn has_decomposition_boundary_before(data: &NormalizerData, value: DecValue) -> bool
{
    data.lead_ccc(value) == 0
}

/// декомпозиция заканчивается стартером (или нестартером с CCC = 1 после стартера)
#[inline(always)]
pub(crate) fn has_decomposition_boundary_after(data: &NormalizerData, value: DecValue) -> bool
{
    match data.trail_ccc(value) {
        0 => true,
        1 => data.lead_ccc(value) == 0,
        _ => false,
    }
}

/// нормализатор NFD / NFKD
#[derive(Debug, Clone, Copy)]
pub struct DecomposingNormalizer<'a>
{
    data: &'a NormalizerData,
}

impl DecomposingNormalizer<'static>
{
    /// NFD-нормализатор
    pub fn new_nfd() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfc()?))
    }

    /// NFKD-нормализатор
    pub fn new_nfkd() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfkc()?))
    }
}

impl<'a> DecomposingNormalizer<'a>
{
    pub fn from_data(data: &'a NormalizerData) -> Self
    {
        Self { data }
    }

    /// декомпозиция с канонической сортировкой, начиная с границы сегмента
    pub(crate) fn decompose_to(&self, text: &str, dest: &mut String)
    {
        let mut buffer = ReorderingBuffer::new();

        for c in text.chars() {
            let code = c as u32;
            let value = self.data.value(code);

            if value.is_inert() {
                buffer.write_to(dest);
                dest.push(c);
                continue;
            }

            if has_decomposition_boundary_before(self.data, value) {
                buffer.write_to(dest);
            }

            decompose(self.data, code, value, &mut buffer);
        }

        buffer.write_to(dest);
    }
}

impl<'a> Normalizer for DecomposingNormalizer<'a>
{
    fn data(&self) -> &NormalizerData
    {
        self.data
    }

    fn normalize_to(&self, text: &str, dest: &mut String)
    {
        let (yes, _) = decompose_quick_check(self.data, text);

        dest.reserve(text.len());
        dest.push_str(&text[.. yes]);

        self.decompose_to(&text[yes ..], dest);
    }

    fn span_quick_check_yes(&self, text: &str) -> usize
    {
        decompose_quick_check(self.data, text).0
    }

    fn quick_check(&self, text: &str) -> QuickCheck
    {
        decompose_quick_check(self.data, text).1
    }

    fn has_boundary_before(&self, c: char) -> bool
    {
        has_decomposition_boundary_before(self.data, self.data.value(c as u32))
    }

    fn has_boundary_after(&self, c: char) -> bool
    {
        has_decomposition_boundary_after(self.data, self.data.value(c as u32))
    }

    fn is_inert(&self, c: char) -> bool
    {
        let value = self.data.value(c as u32);

        !value.has_decomposition() && value.ccc() == 0
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn nfd()
    {
        let nfd = DecomposingNormalizer::new_nfd().unwrap();

        assert_eq!(nfd.normalize("abc"), "abc");
        assert_eq!(nfd.normalize("é"), "e\u{301}");
        // Ǻ -> A + ̊ + ́
        assert_eq!(nfd.normalize("\u{1FA}"), "A\u{30A}\u{301}");
        // переупорядочивание: ́ (230) после ̣ (220)
        assert_eq!(nfd.normalize("a\u{301}\u{323}"), "a\u{323}\u{301}");
        // хангыль
        assert_eq!(nfd.normalize("\u{D7A3}"), "\u{1112}\u{1175}\u{11C2}");
        // ﬁ - декомпозиция совместимости, в NFD не раскладывается
        assert_eq!(nfd.normalize("\u{FB01}"), "\u{FB01}");
    }

    #[test]
    fn nfkd()
    {
        let nfkd = DecomposingNormalizer::new_nfkd().unwrap();

        assert_eq!(nfkd.normalize("\u{FB01}"), "fi");
        assert_eq!(nfkd.normalize("\u{2460}"), "1");
    }

    #[test]
    fn quick_check()
    {
        let nfd = DecomposingNormalizer::new_nfd().unwrap();

        assert_eq!(nfd.quick_check("abc"), QuickCheck::Yes);
        assert_eq!(nfd.quick_check("abé"), QuickCheck::No);
        assert_eq!(nfd.span_quick_check_yes("abé"), 2);
        // ̣ после ́ - граница перед b
        assert_eq!(nfd.span_quick_check_yes("ab\u{301}\u{323}"), 1);
    }

    #[test]
    fn boundaries()
    {
        let nfd = DecomposingNormalizer::new_nfd().unwrap();

        assert!(nfd.has_boundary_before('a'));
        assert!(!nfd.has_boundary_before('\u{301}'));
        assert!(nfd.has_boundary_after('a'));
        // é раскладывается в e + ́
        assert!(!nfd.has_boundary_after('é'));
        assert!(nfd.is_inert('a'));
        assert!(!nfd.is_inert('é'));
    }
}
