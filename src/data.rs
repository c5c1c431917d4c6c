use lazy_static::lazy_static;

use crate::error::DataError;
use crate::normalization::composition::hangul;
use crate::prepare;
use crate::prepare::Form;
use crate::trie::Trie;
use crate::uts46::properties::IdnaProperties;

/// класс канонического комбинирования
pub const CCC_MASK: u32 = 0xFF;
/// декомпозиция хранится в таблице расширений
pub const MARKER_EXPANSION: u32 = 1 << 8;
/// слог хангыль, декомпозиция вычисляется
pub const MARKER_HANGUL: u32 = 1 << 9;
/// может быть скомбинирован с предыдущим кодпоинтом
pub const COMBINES_BACKWARDS: u32 = 1 << 10;
/// может быть скомбинирован со следующим кодпоинтом
pub const COMBINES_FORWARDS: u32 = 1 << 11;
/// не может встречаться в NF(K)C
pub const COMPOSE_QC_NO: u32 = 1 << 12;
/// не может встречаться в FCC
pub const FCC_QC_NO: u32 = 1 << 13;
/// текст перед кодпоинтом может взаимодействовать с ним при композиции
pub const NO_COMPOSE_BOUNDARY_BEFORE: u32 = 1 << 14;
/// текст после кодпоинта может взаимодействовать с ним при композиции
pub const NO_COMPOSE_BOUNDARY_AFTER: u32 = 1 << 15;
/// индекс в таблице расширений - старшие 16 бит
pub const EXPANSION_SHIFT: u32 = 16;

/// заголовок записи расширения: длина, CCC первого и последнего кодпоинтов
pub const EXPANSION_LENGTH_MASK: u32 = 0xFF;
pub const EXPANSION_LEAD_CCC_SHIFT: u32 = 8;
pub const EXPANSION_TRAIL_CCC_SHIFT: u32 = 16;

/// запись списка композиций: результат - младшие 21 бит, второй кодпоинт - старшие 32 бита
pub const COMPOSITION_CODE_MASK: u64 = 0x1F_FFFF;
/// последняя запись в списке первого кодпоинта
pub const COMPOSITION_LAST: u64 = 1 << 31;
pub const COMPOSITION_SECOND_SHIFT: u32 = 32;

/// значение кодпоинта в таблице нормализации.
/// нулевое значение - стартер без декомпозиции, не участвующий в композиции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecValue(pub u32);

impl DecValue
{
    #[inline(always)]
    pub fn ccc(self) -> u8
    {
        (self.0 & CCC_MASK) as u8
    }

    #[inline(always)]
    pub fn is_inert(self) -> bool
    {
        self.0 == 0
    }

    #[inline(always)]
    pub fn has_expansion(self) -> bool
    {
        self.0 & MARKER_EXPANSION != 0
    }

    #[inline(always)]
    pub fn is_hangul(self) -> bool
    {
        self.0 & MARKER_HANGUL != 0
    }

    /// кодпоинт меняется при декомпозиции
    #[inline(always)]
    pub fn has_decomposition(self) -> bool
    {
        self.0 & (MARKER_EXPANSION | MARKER_HANGUL) != 0
    }

    #[inline(always)]
    pub fn combines_backwards(self) -> bool
    {
        self.0 & COMBINES_BACKWARDS != 0
    }

    #[inline(always)]
    pub fn combines_forwards(self) -> bool
    {
        self.0 & COMBINES_FORWARDS != 0
    }

    #[inline(always)]
    pub fn is_compose_qc_no(self, only_contiguous: bool) -> bool
    {
        match only_contiguous {
            true => self.0 & FCC_QC_NO != 0,
            false => self.0 & COMPOSE_QC_NO != 0,
        }
    }

    #[inline(always)]
    pub fn has_compose_boundary_before(self) -> bool
    {
        self.0 & NO_COMPOSE_BOUNDARY_BEFORE == 0
    }

    #[inline(always)]
    pub fn has_compose_boundary_after(self) -> bool
    {
        self.0 & NO_COMPOSE_BOUNDARY_AFTER == 0
    }

    #[inline(always)]
    pub fn expansion_index(self) -> usize
    {
        (self.0 >> EXPANSION_SHIFT) as usize
    }
}

/// таблицы одной формы нормализации
#[derive(Debug)]
pub struct NormalizerData
{
    name: &'static str,
    /// значения кодпоинтов
    values: Trie<u32>,
    /// декомпозиции: заголовок, затем кодпоинты (код << 8 | CCC)
    expansions: Vec<u32>,
    /// индекс + 1 начала списка композиций первого кодпоинта
    composition_index: Trie<u16>,
    /// композиции, отсортированные по второму кодпоинту
    compositions: Vec<u64>,
}

impl NormalizerData
{
    pub fn new(
        name: &'static str,
        values: Trie<u32>,
        expansions: Vec<u32>,
        composition_index: Trie<u16>,
        compositions: Vec<u64>,
    ) -> Self
    {
        Self {
            name,
            values,
            expansions,
            composition_index,
            compositions,
        }
    }

    /// название формы ("nfc", "nfkc", "nfkc_cf", "uts46")
    pub fn name(&self) -> &'static str
    {
        self.name
    }

    #[inline(always)]
    pub fn value(&self, code: u32) -> DecValue
    {
        DecValue(self.values.get(code))
    }

    /// кодпоинты декомпозиции (код << 8 | CCC)
    #[inline(always)]
    pub fn expansion(&self, value: DecValue) -> &[u32]
    {
        let index = value.expansion_index();
        let length = (self.expansions[index] & EXPANSION_LENGTH_MASK) as usize;

        &self.expansions[index + 1 .. index + 1 + length]
    }

    /// CCC первого кодпоинта декомпозиции
    #[inline(always)]
    pub fn lead_ccc(&self, value: DecValue) -> u8
    {
        match value.has_expansion() {
            true => (self.expansions[value.expansion_index()] >> EXPANSION_LEAD_CCC_SHIFT) as u8,
            false => value.ccc(),
        }
    }

    /// CCC последнего кодпоинта декомпозиции
    #[inline(always)]
    pub fn trail_ccc(&self, value: DecValue) -> u8
    {
        match value.has_expansion() {
            true => (self.expansions[value.expansion_index()] >> EXPANSION_TRAIL_CCC_SHIFT) as u8,
            false => value.ccc(),
        }
    }

    /// декомпозиция пуста (кодпоинт удаляется при нормализации)
    #[inline(always)]
    pub fn is_removed(&self, value: DecValue) -> bool
    {
        value.has_expansion() && self.expansions[value.expansion_index()] & EXPANSION_LENGTH_MASK == 0
    }

    /// каноническая композиция пары кодпоинтов
    #[inline(always)]
    pub fn compose_pair(&self, first: u32, second: u32) -> Option<u32>
    {
        if let Some(composite) = hangul::compose_hangul(first, second) {
            return Some(composite);
        }

        let start = self.composition_index.get(first) as usize;

        if start == 0 {
            return None;
        }

        for &entry in &self.compositions[start - 1 ..] {
            let entry_second = (entry >> COMPOSITION_SECOND_SHIFT) as u32;

            if entry_second == second {
                return Some((entry & COMPOSITION_CODE_MASK) as u32);
            }

            if entry_second > second || entry & COMPOSITION_LAST != 0 {
                break;
            }
        }

        None
    }

    /// класс канонического комбинирования
    #[inline(always)]
    pub fn combining_class(&self, code: u32) -> u8
    {
        self.value(code).ccc()
    }

    /// размеры таблиц: trie значений, расширения, композиции
    pub fn sizes(&self) -> ((usize, usize), usize, usize)
    {
        (self.values.size(), self.expansions.len(), self.compositions.len())
    }
}

lazy_static! {
    static ref NFC: Result<NormalizerData, DataError> = prepare::normalizer_data(Form::Canonical);
    static ref NFKC: Result<NormalizerData, DataError> = prepare::normalizer_data(Form::Compatibility);
    static ref NFKC_CF: Result<NormalizerData, DataError> = prepare::normalizer_data(Form::CompatibilityCaseFold);
    static ref UTS46: Result<NormalizerData, DataError> = prepare::normalizer_data(Form::Uts46);
    static ref IDNA_PROPERTIES: Result<IdnaProperties, DataError> = prepare::idna_properties();
}

/// таблицы формы нормализации по названию. строятся один раз при первом обращении,
/// ошибка построения также сохраняется и возвращается при каждом следующем обращении
pub fn get(name: &str) -> Result<&'static NormalizerData, DataError>
{
    let cached: &'static Result<NormalizerData, DataError> = match name {
        "nfc" => &NFC,
        "nfkc" => &NFKC,
        "nfkc_cf" => &NFKC_CF,
        "uts46" => &UTS46,
        _ => return Err(DataError::UnknownForm(name.to_owned())),
    };

    cached.as_ref().map_err(Clone::clone)
}

/// данные для NFC / NFD / FCC / FCD
pub fn nfc() -> Result<&'static NormalizerData, DataError>
{
    get("nfc")
}

/// данные для NFKC / NFKD
pub fn nfkc() -> Result<&'static NormalizerData, DataError>
{
    get("nfkc")
}

/// данные для NFKC_Casefold
pub fn nfkc_cf() -> Result<&'static NormalizerData, DataError>
{
    get("nfkc_cf")
}

/// данные для отображения UTS #46
pub fn uts46() -> Result<&'static NormalizerData, DataError>
{
    get("uts46")
}

/// свойства кодпоинтов для проверок IDNA
pub fn idna_properties() -> Result<&'static IdnaProperties, DataError>
{
    IDNA_PROPERTIES.as_ref().map_err(Clone::clone)
}
