use thiserror::Error;

/// ошибки построения инверсионного списка
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError
{
    #[error("значения инверсионного списка должны строго возрастать (позиция {0})")]
    NotIncreasing(usize),
    #[error("значение U+{0:04X} вне диапазона кодпоинтов")]
    OutOfRange(u32),
    #[error("инверсионный список должен завершаться 0x110000")]
    MissingTerminator,
}

/// ошибки построения trie
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError
{
    #[error("данные trie не помещаются в 16-битный индекс ({0} значений)")]
    DataTooLarge(usize),
    #[error("индекс trie не помещается в 16 бит ({0} записей)")]
    IndexTooLarge(usize),
    #[error("некорректная структура trie: {0}")]
    InvalidLayout(&'static str),
}

/// ошибки подготовки данных нормализации
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError
{
    #[error("неизвестная форма нормализации: {0}")]
    UnknownForm(String),
    #[error("таблица расширений не помещается в 16-битный индекс ({0} записей)")]
    ExpansionsOverflow(usize),
    #[error("таблица композиций не помещается в 16-битный индекс ({0} записей)")]
    CompositionsOverflow(usize),
    #[error("декомпозиция U+{0:04X} слишком длинная")]
    ExpansionTooLong(u32),
    #[error(transparent)]
    Trie(#[from] TrieError),
    #[error(transparent)]
    Set(#[from] SetError),
}

/// ошибки кодирования / декодирования Punycode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PunycodeError
{
    #[error("некорректная строка Punycode")]
    BadInput,
    #[error("переполнение при вычислении Punycode")]
    Overflow,
}
