use crate::trie::Trie;

/// bidi-класс - младшие 5 бит
pub const BIDI_CLASS_MASK: u16 = 0x1F;
/// тип соединения - биты 5-7
pub const JOINING_TYPE_SHIFT: u16 = 5;
pub const JOINING_TYPE_MASK: u16 = 0x7;
/// комбинируемый знак (general category M*)
pub const MARK: u16 = 1 << 8;
/// письменность - биты 9-10
pub const SCRIPT_SHIFT: u16 = 9;
pub const SCRIPT_MASK: u16 = 0x3;

/// bidi-класс кодпоинта (значения совпадают с UCharDirection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BidiClass(pub u8);

impl BidiClass
{
    pub const LEFT_TO_RIGHT: Self = Self(0);
    pub const RIGHT_TO_LEFT: Self = Self(1);
    pub const EUROPEAN_NUMBER: Self = Self(2);
    pub const EUROPEAN_SEPARATOR: Self = Self(3);
    pub const EUROPEAN_TERMINATOR: Self = Self(4);
    pub const ARABIC_NUMBER: Self = Self(5);
    pub const COMMON_SEPARATOR: Self = Self(6);
    pub const PARAGRAPH_SEPARATOR: Self = Self(7);
    pub const SEGMENT_SEPARATOR: Self = Self(8);
    pub const WHITE_SPACE: Self = Self(9);
    pub const OTHER_NEUTRAL: Self = Self(10);
    pub const ARABIC_LETTER: Self = Self(13);
    pub const NONSPACING_MARK: Self = Self(17);
    pub const BOUNDARY_NEUTRAL: Self = Self(18);

    /// бит класса для проверки принадлежности набору классов
    #[inline(always)]
    pub fn mask(self) -> u32
    {
        1 << self.0
    }
}

/// тип соединения кодпоинта (значения совпадают с UJoiningType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoiningType(pub u8);

impl JoiningType
{
    pub const NON_JOINING: Self = Self(0);
    pub const JOIN_CAUSING: Self = Self(1);
    pub const DUAL_JOINING: Self = Self(2);
    pub const LEFT_JOINING: Self = Self(3);
    pub const RIGHT_JOINING: Self = Self(4);
    pub const TRANSPARENT: Self = Self(5);
}

/// письменности, различаемые правилами CONTEXTO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Script
{
    Greek = 1,
    Hebrew = 2,
    /// хирагана, катакана, иероглифы
    Japanese = 3,
}

/// свойства кодпоинтов для проверок IDNA
#[derive(Debug)]
pub struct IdnaProperties
{
    trie: Trie<u16>,
}

impl IdnaProperties
{
    pub fn new(trie: Trie<u16>) -> Self
    {
        Self { trie }
    }

    #[inline(always)]
    pub fn bidi_class(&self, c: char) -> BidiClass
    {
        BidiClass((self.trie.get(c as u32) & BIDI_CLASS_MASK) as u8)
    }

    #[inline(always)]
    pub fn joining_type(&self, c: char) -> JoiningType
    {
        JoiningType(((self.trie.get(c as u32) >> JOINING_TYPE_SHIFT) & JOINING_TYPE_MASK) as u8)
    }

    #[inline(always)]
    pub fn is_mark(&self, c: char) -> bool
    {
        self.trie.get(c as u32) & MARK != 0
    }

    #[inline(always)]
    pub fn script(&self, c: char) -> Option<Script>
    {
        match (self.trie.get(c as u32) >> SCRIPT_SHIFT) & SCRIPT_MASK {
            1 => Some(Script::Greek),
            2 => Some(Script::Hebrew),
            3 => Some(Script::Japanese),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::data;

    #[test]
    fn properties()
    {
        let properties = data::idna_properties().unwrap();

        assert_eq!(properties.bidi_class('a'), BidiClass::LEFT_TO_RIGHT);
        assert_eq!(properties.bidi_class('\u{5D0}'), BidiClass::RIGHT_TO_LEFT);
        assert_eq!(properties.bidi_class('\u{627}'), BidiClass::ARABIC_LETTER);
        assert_eq!(properties.bidi_class('1'), BidiClass::EUROPEAN_NUMBER);
        assert_eq!(properties.bidi_class('\u{301}'), BidiClass::NONSPACING_MARK);

        // бет - двустороннее соединение, алеф - правостороннее
        assert_eq!(properties.joining_type('\u{628}'), JoiningType::DUAL_JOINING);
        assert_eq!(properties.joining_type('\u{627}'), JoiningType::RIGHT_JOINING);
        assert_eq!(properties.joining_type('\u{64B}'), JoiningType::TRANSPARENT);
        assert_eq!(properties.joining_type('a'), JoiningType::NON_JOINING);

        assert!(properties.is_mark('\u{301}'));
        assert!(!properties.is_mark('a'));

        assert_eq!(properties.script('\u{3B1}'), Some(Script::Greek));
        assert_eq!(properties.script('\u{5D0}'), Some(Script::Hebrew));
        assert_eq!(properties.script('\u{3042}'), Some(Script::Japanese));
        assert_eq!(properties.script('\u{4E00}'), Some(Script::Japanese));
        assert_eq!(properties.script('a'), None);
    }
}
