use super::buffer::ReorderingBuffer;
use super::decomposition::decompose;
use super::quick_check::{compose_quick_check, QuickCheck};
use super::Normalizer;
use crate::codepoint::Codepoint;
use crate::data::{self, NormalizerData};
use crate::error::DataError;

pub mod hangul;

/// композиция канонически упорядоченной последовательности на месте.
///
/// нестартер комбинируется с последним стартером, если между ними нет нескомбинированных кодпоинтов
/// с CCC, не меньшим его собственного. при `only_contiguous` (FCC) - если между ними нет нескомбинированных
/// кодпоинтов вообще. стартер, который не удалось скомбинировать с предыдущим, становится новым стартером
pub(crate) fn compose(data: &NormalizerData, codepoints: &mut Vec<Codepoint>, only_contiguous: bool)
{
    if codepoints.len() < 2 {
        return;
    }

    let mut starter: Option<usize> = None;
    let mut prev_ccc = 0;
    let mut write = 0;

    for read in 0 .. codepoints.len() {
        let codepoint = codepoints[read];
        let ccc = codepoint.ccc();

        if let Some(starter) = starter {
            let adjacent = write == starter + 1;

            let blocked = match adjacent {
                true => false,
                false => only_contiguous || prev_ccc == 0 || prev_ccc >= ccc,
            };

            if !blocked {
                if let Some(composite) = data.compose_pair(codepoints[starter].code(), codepoint.code()) {
                    codepoints[starter] = Codepoint::from_code_and_ccc(composite, data.combining_class(composite));
                    continue;
                }
            }
        }

        if ccc == 0 {
            starter = Some(write);
        }

        prev_ccc = ccc;
        codepoints[write] = codepoint;
        write += 1;
    }

    codepoints.truncate(write);
}

/// нормализатор NF(K)C, NFKC_Casefold, UTS #46 и FCC
#[derive(Debug, Clone, Copy)]
pub struct ComposingNormalizer<'a>
{
    data: &'a NormalizerData,
    /// FCC - комбинируются только соседние кодпоинты
    only_contiguous: bool,
}

impl ComposingNormalizer<'static>
{
    /// NFC-нормализатор
    pub fn new_nfc() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfc()?, false))
    }

    /// NFKC-нормализатор
    pub fn new_nfkc() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfkc()?, false))
    }

    /// NFKC_Casefold
    pub fn new_nfkc_cf() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfkc_cf()?, false))
    }

    /// FCC - NFC с комбинированием только соседних кодпоинтов
    pub fn new_fcc() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfc()?, true))
    }

    /// отображение UTS #46 с последующей NFC-нормализацией
    pub fn new_uts46() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::uts46()?, false))
    }
}

impl<'a> ComposingNormalizer<'a>
{
    pub fn from_data(data: &'a NormalizerData, only_contiguous: bool) -> Self
    {
        Self {
            data,
            only_contiguous,
        }
    }

    pub fn is_only_contiguous(&self) -> bool
    {
        self.only_contiguous
    }

    /// скомбинировать буфер и дописать в результат
    #[inline(always)]
    fn compose_and_write(&self, buffer: &mut ReorderingBuffer, dest: &mut String)
    {
        compose(self.data, buffer.codepoints_mut(), self.only_contiguous);
        buffer.write_to(dest);
    }

    /// нормализация, начиная с границы сегмента
    pub(crate) fn compose_to(&self, text: &str, dest: &mut String)
    {
        let mut buffer = ReorderingBuffer::new();

        for c in text.chars() {
            let code = c as u32;
            let value = self.data.value(code);

            if value.is_inert() {
                self.compose_and_write(&mut buffer, dest);
                dest.push(c);
                continue;
            }

            if value.has_compose_boundary_before() {
                self.compose_and_write(&mut buffer, dest);
            }

            decompose(self.data, code, value, &mut buffer);
        }

        self.compose_and_write(&mut buffer, dest);
    }
}

impl<'a> Normalizer for ComposingNormalizer<'a>
{
    fn data(&self) -> &NormalizerData
    {
        self.data
    }

    fn normalize_to(&self, text: &str, dest: &mut String)
    {
        let (yes, _) = compose_quick_check(self.data, text, self.only_contiguous, true);

        dest.reserve(text.len());
        dest.push_str(&text[.. yes]);

        self.compose_to(&text[yes ..], dest);
    }

    fn span_quick_check_yes(&self, text: &str) -> usize
    {
        compose_quick_check(self.data, text, self.only_contiguous, true).0
    }

    fn quick_check(&self, text: &str) -> QuickCheck
    {
        compose_quick_check(self.data, text, self.only_contiguous, false).1
    }

    fn is_normalized(&self, text: &str) -> bool
    {
        match compose_quick_check(self.data, text, self.only_contiguous, true) {
            (_, QuickCheck::No) => false,
            (yes, _) if yes == text.len() => true,
            (yes, _) => {
                let rest = &text[yes ..];
                let mut normalized = String::with_capacity(rest.len());

                self.compose_to(rest, &mut normalized);
                normalized == rest
            }
        }
    }

    fn has_boundary_before(&self, c: char) -> bool
    {
        self.data.value(c as u32).has_compose_boundary_before()
    }

    fn has_boundary_after(&self, c: char) -> bool
    {
        let value = self.data.value(c as u32);

        value.has_compose_boundary_after() && (!self.only_contiguous || self.data.trail_ccc(value) <= 1)
    }

    fn is_inert(&self, c: char) -> bool
    {
        let value = self.data.value(c as u32);

        value.is_inert()
            || (value.ccc() == 0
                && !value.is_compose_qc_no(self.only_contiguous)
                && !value.combines_forwards()
                && value.has_compose_boundary_before()
                && value.has_compose_boundary_after())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn nfc()
    {
        let nfc = ComposingNormalizer::new_nfc().unwrap();

        assert_eq!(nfc.normalize("abc"), "abc");
        assert_eq!(nfc.normalize("e\u{301}"), "é");
        assert_eq!(nfc.normalize("A\u{30A}\u{301}"), "\u{1FA}");
        // Å (ангстрем) -> Å
        assert_eq!(nfc.normalize("\u{212B}"), "\u{C5}");
        // ̣ (220) комбинируется раньше ́ (230): ệ не получится, получится ẹ́
        assert_eq!(nfc.normalize("e\u{301}\u{323}"), "\u{1EB9}\u{301}");
        // хангыль
        assert_eq!(nfc.normalize("\u{1112}\u{1175}\u{11C2}"), "\u{D7A3}");
        assert_eq!(nfc.normalize("\u{D788}\u{11C2}"), "\u{D7A3}");
        // исключение композиции
        assert_eq!(nfc.normalize("\u{958}"), "\u{915}\u{93C}");
    }

    #[test]
    fn blocked()
    {
        let nfc = ComposingNormalizer::new_nfc().unwrap();
        let fcc = ComposingNormalizer::new_fcc().unwrap();

        // ̖ (220) не комбинируется с a и не блокирует ́ (230)
        assert_eq!(nfc.normalize("a\u{316}\u{301}"), "á\u{316}");
        assert_eq!(fcc.normalize("a\u{316}\u{301}"), "a\u{316}\u{301}");

        // ⃐ (230) не комбинируется с a и блокирует ́ с тем же CCC
        assert_eq!(nfc.normalize("a\u{20D0}\u{301}"), "a\u{20D0}\u{301}");
        // после композиции â следующий кодпоинт снова соседний
        assert_eq!(nfc.normalize("a\u{302}\u{301}"), "\u{1EA5}");
    }

    #[test]
    fn compatibility()
    {
        let nfkc = ComposingNormalizer::new_nfkc().unwrap();
        let nfkc_cf = ComposingNormalizer::new_nfkc_cf().unwrap();

        assert_eq!(nfkc.normalize("\u{FB01}"), "fi");
        assert_eq!(nfkc.normalize("\u{2460}"), "1");
        assert_eq!(nfkc_cf.normalize("Straße"), "strasse");
        assert_eq!(nfkc_cf.normalize("\u{C9}"), "é");
        assert_eq!(nfkc_cf.normalize("soft\u{AD}hyphen"), "softhyphen");
    }

    #[test]
    fn quick_check()
    {
        let nfc = ComposingNormalizer::new_nfc().unwrap();

        assert_eq!(nfc.quick_check("é"), QuickCheck::Yes);
        assert_eq!(nfc.quick_check("\u{212B}"), QuickCheck::No);
        assert_eq!(nfc.quick_check("e\u{301}"), QuickCheck::Maybe);

        assert!(nfc.is_normalized("é"));
        assert!(!nfc.is_normalized("e\u{301}"));
        // ́ после стартера, с которым не комбинируется
        assert!(nfc.is_normalized("\u{4E00}\u{301}"));

        assert_eq!(nfc.span_quick_check_yes("abce\u{301}"), 3);

        // порядок проверяется по CCC самих кодпоинтов: ẛ (0) + ̣ (220) уже в NFC
        assert!(nfc.is_normalized("\u{1E9B}\u{323}"));
        assert_ne!(nfc.quick_check("\u{1E9B}\u{323}"), QuickCheck::No);
        assert_eq!(nfc.normalize("\u{1E9B}\u{323}"), "\u{1E9B}\u{323}");
        assert!(!nfc.is_normalized("a\u{301}\u{323}"));

        // для FCC - по CCC краёв декомпозиций: ẛ заканчивается на ̇ (230)
        let fcc = ComposingNormalizer::new_fcc().unwrap();

        assert_eq!(fcc.quick_check("\u{1E9B}\u{323}"), QuickCheck::No);
        assert!(!fcc.is_normalized("\u{1E9B}\u{323}"));
        assert_eq!(fcc.normalize("\u{1E9B}\u{323}"), "\u{17F}\u{323}\u{307}");
        assert!(fcc.is_normalized("\u{17F}\u{323}\u{307}"));
    }

    #[test]
    fn boundaries()
    {
        let nfc = ComposingNormalizer::new_nfc().unwrap();

        assert!(nfc.has_boundary_before('a'));
        assert!(!nfc.has_boundary_before('\u{301}'));
        // a комбинируется со следующими кодпоинтами
        assert!(!nfc.has_boundary_after('a'));
        assert!(nfc.has_boundary_after('\u{4E00}'));
        assert!(nfc.is_inert('\u{4E00}'));
        assert!(!nfc.is_inert('a'));

        // ᅡ комбинируется с предыдущим ᄀ, результат - со следующим ᆨ
        assert!(!nfc.has_boundary_after('\u{1161}'));
        assert!(!nfc.has_boundary_after('\u{11A8}'));
        assert!(!nfc.is_inert('\u{1161}'));
        assert_eq!(nfc.normalize("\u{1100}\u{1161}\u{11A8}"), "\u{AC01}");

        let fcc = ComposingNormalizer::new_fcc().unwrap();

        assert!(!fcc.has_boundary_after('\u{1161}'));
        assert!(!fcc.has_boundary_after('a'));
        assert!(fcc.has_boundary_after('\u{4E00}'));
    }
}
