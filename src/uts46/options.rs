use bitflags::bitflags;

bitflags! {
    /// параметры обработки доменных имён
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Uts46Options: u32
    {
        /// в метках допустимы только буквы, цифры и дефис (STD3)
        const USE_STD3_RULES = 0x2;
        /// проверка правила BiDi (RFC 5893)
        const CHECK_BIDI = 0x4;
        /// проверка правил CONTEXTJ (RFC 5892, приложение A)
        const CHECK_CONTEXTJ = 0x8;
        /// ToASCII без транзитивной обработки отклонений (ß, ς, ZWJ, ZWNJ сохраняются)
        const NONTRANSITIONAL_TO_ASCII = 0x10;
        /// ToUnicode без транзитивной обработки отклонений
        const NONTRANSITIONAL_TO_UNICODE = 0x20;
        /// проверка правил CONTEXTO (RFC 5892, приложение A)
        const CHECK_CONTEXTO = 0x40;
    }
}

impl Uts46Options
{
    /// транзитивная обработка без дополнительных проверок
    pub const DEFAULT: Self = Self::empty();

    /// нетранзитивная обработка с проверками BiDi и CONTEXTJ (IDNA2008)
    pub const NONTRANSITIONAL: Self = Self::from_bits_truncate(
        Self::CHECK_BIDI.bits()
            | Self::CHECK_CONTEXTJ.bits()
            | Self::NONTRANSITIONAL_TO_ASCII.bits()
            | Self::NONTRANSITIONAL_TO_UNICODE.bits(),
    );

    /// обрабатывать ли отклонения транзитивно
    #[inline(always)]
    pub fn maps_deviations(&self, to_ascii: bool) -> bool
    {
        match to_ascii {
            true => !self.contains(Self::NONTRANSITIONAL_TO_ASCII),
            false => !self.contains(Self::NONTRANSITIONAL_TO_UNICODE),
        }
    }
}
