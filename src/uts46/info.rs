use bitflags::bitflags;

bitflags! {
    /// ошибки обработки доменного имени. ошибки накапливаются, обработка не прерывается
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IdnaErrors: u32
    {
        /// пустая метка (кроме завершающей пустой метки после корневой точки)
        const EMPTY_LABEL = 0x1;
        /// метка длиннее 63 байт в ASCII
        const LABEL_TOO_LONG = 0x2;
        /// имя длиннее 253 байт в ASCII (254 с завершающей точкой)
        const DOMAIN_NAME_TOO_LONG = 0x4;
        const LEADING_HYPHEN = 0x8;
        const TRAILING_HYPHEN = 0x10;
        /// дефисы на 3 и 4 позициях ("??--")
        const HYPHEN_3_4 = 0x20;
        /// метка начинается с комбинируемого знака
        const LEADING_COMBINING_MARK = 0x40;
        /// недопустимый символ
        const DISALLOWED = 0x80;
        /// ошибка декодирования Punycode
        const PUNYCODE = 0x100;
        /// точка внутри метки (при обработке отдельной метки)
        const LABEL_HAS_DOT = 0x200;
        /// метка с префиксом "xn--" не является корректной ACE-меткой
        const INVALID_ACE_LABEL = 0x400;
        const BIDI = 0x800;
        const CONTEXTJ = 0x1000;
        /// CONTEXTO: неверный контекст знака препинания
        const CONTEXTO_PUNCTUATION = 0x2000;
        /// CONTEXTO: арабские и расширенные арабские цифры в одной метке
        const CONTEXTO_DIGITS = 0x4000;
    }
}

impl IdnaErrors
{
    /// ошибки, после которых метка содержит U+FFFD и контекстные проверки не выполняются
    pub const SEVERE: Self = Self::from_bits_truncate(
        Self::LEADING_COMBINING_MARK.bits()
            | Self::DISALLOWED.bits()
            | Self::PUNYCODE.bits()
            | Self::LABEL_HAS_DOT.bits()
            | Self::INVALID_ACE_LABEL.bits(),
    );

    #[inline(always)]
    pub fn has_severe(&self) -> bool
    {
        self.intersects(Self::SEVERE)
    }
}

/// результат обработки доменного имени
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdnaInfo
{
    pub(crate) errors: IdnaErrors,
    /// ошибки текущей метки
    pub(crate) label_errors: IdnaErrors,
    /// результат транзитивной и нетранзитивной обработки различается
    pub(crate) is_transitional_different: bool,
    /// имя содержит метку с символами R, AL или AN
    pub(crate) is_bidi: bool,
    /// все метки удовлетворяют правилу BiDi
    pub(crate) is_ok_bidi: bool,
}

impl Default for IdnaInfo
{
    fn default() -> Self
    {
        Self {
            errors: IdnaErrors::empty(),
            label_errors: IdnaErrors::empty(),
            is_transitional_different: false,
            is_bidi: false,
            is_ok_bidi: true,
        }
    }
}

impl IdnaInfo
{
    pub fn errors(&self) -> IdnaErrors
    {
        self.errors
    }

    pub fn has_errors(&self) -> bool
    {
        !self.errors.is_empty()
    }

    /// имя содержит отклонения (ß, ς, ZWJ, ZWNJ)
    pub fn is_transitional_different(&self) -> bool
    {
        self.is_transitional_different
    }

    /// перенести ошибки метки в ошибки имени
    #[inline(always)]
    pub(crate) fn promote_label_errors(&mut self)
    {
        self.errors |= self.label_errors;
        self.label_errors = IdnaErrors::empty();
    }
}
