//! многоуровневая таблица кодпоинт -> значение.
//!
//! BMP адресуется в два уровня: `index[c >> SHIFT_2]` даёт смещение блока данных (сдвинутое на INDEX_SHIFT),
//! к нему добавляются младшие биты кодпоинта. для дополнительных плоскостей добавляется индекс первого
//! уровня по `c >> SHIFT_1`. ведущие суррогаты как кодовые единицы имеют свой отдельный участок индекса
//! (LSCP) - там хранятся значения, отличные от значений суррогатов-кодпоинтов (например, смещения свёртки).

use core::fmt::Debug;
use core::hash::Hash;

use crate::error::TrieError;

pub use builder::TrieBuilder;

mod builder;

/// сдвиг индекса первого уровня: одна запись на 2048 кодпоинтов
pub const SHIFT_1: u32 = 6 + 5;
/// сдвиг индекса второго уровня: блоки данных по 32 значения
pub const SHIFT_2: u32 = 5;
/// разница сдвигов - количество бит, которые адресует блок индекса второго уровня
pub const SHIFT_1_2: u32 = SHIFT_1 - SHIFT_2;
/// записи индекса первого уровня, которые приходились бы на BMP и не хранятся
pub const OMITTED_BMP_INDEX_1_LENGTH: usize = 0x10000 >> SHIFT_1;
/// размер блока индекса второго уровня
pub const INDEX_2_BLOCK_LENGTH: usize = 1 << SHIFT_1_2;
pub const INDEX_2_MASK: u32 = INDEX_2_BLOCK_LENGTH as u32 - 1;
/// размер блока данных
pub const DATA_BLOCK_LENGTH: usize = 1 << SHIFT_2;
pub const DATA_MASK: u32 = DATA_BLOCK_LENGTH as u32 - 1;
/// смещения блоков данных кратны 4 и хранятся в индексе сдвинутыми на 2 бита
pub const INDEX_SHIFT: u32 = 2;
/// индекс второго уровня для всех кодпоинтов BMP
pub const INDEX_2_BMP_LENGTH: usize = 0x10000 >> SHIFT_2;
/// отдельный участок индекса для ведущих суррогатов как кодовых единиц
pub const LSCP_INDEX_2_OFFSET: usize = INDEX_2_BMP_LENGTH;
pub const LSCP_INDEX_2_LENGTH: usize = 0x400 >> SHIFT_2;
/// индекс первого уровня следует за индексом BMP и LSCP
pub const INDEX_1_OFFSET: usize = LSCP_INDEX_2_OFFSET + LSCP_INDEX_2_LENGTH;
/// Latin-1 хранится линейно в начале данных
pub const LATIN1_LENGTH: usize = 0x100;
/// маска младших бит завершающего суррогата
pub const SURROGATE_MASK: u16 = 0x3FF;

/// значение, хранимое в trie
pub trait TrieValue: Copy + Eq + Hash + Default + Debug
{
    fn to_u32(self) -> u32;
    /// более узкие варианты отбрасывают старшие биты
    fn from_u32_truncated(value: u32) -> Self;
}

macro_rules! trie_value {
    ($($t: ty),+) => {
        $(
            impl TrieValue for $t
            {
                #[inline(always)]
                fn to_u32(self) -> u32
                {
                    self as u32
                }

                #[inline(always)]
                fn from_u32_truncated(value: u32) -> Self
                {
                    value as $t
                }
            }
        )+
    };
}

trie_value!(u8, u16, u32);

/// получение смещения свёртки из значения ведущего суррогата
pub trait DataManipulate<T>
{
    /// смещение в индексе для завершающих суррогатов, 0 - данных нет
    fn folding_offset(&self, value: T) -> u32;
}

impl<T, F> DataManipulate<T> for F
where
    F: Fn(T) -> u32,
{
    fn folding_offset(&self, value: T) -> u32
    {
        self(value)
    }
}

#[derive(Debug, Clone)]
pub struct Trie<T: TrieValue>
{
    index: Vec<u16>,
    data: Vec<T>,
    /// начиная с этого кодпоинта все значения равны значению по смещению high_value_index
    high_start: u32,
    high_value_index: usize,
    initial_value: T,
    error_value: T,
}

impl<T: TrieValue> Trie<T>
{
    /// trie из готовых массивов, с проверкой их согласованности
    pub fn from_parts(
        index: Vec<u16>,
        data: Vec<T>,
        high_start: u32,
        high_value_index: usize,
        initial_value: T,
        error_value: T,
    ) -> Result<Self, TrieError>
    {
        if high_start < 0x10000 || high_start > 0x110000 || high_start & ((1 << SHIFT_1) - 1) != 0 {
            return Err(TrieError::InvalidLayout("граница high_start"));
        }

        let index_1_length = ((high_start - 0x10000) >> SHIFT_1) as usize;

        if index.len() < INDEX_1_OFFSET + index_1_length {
            return Err(TrieError::InvalidLayout("длина индекса"));
        }

        if data.len() < LATIN1_LENGTH || high_value_index >= data.len() {
            return Err(TrieError::InvalidLayout("длина данных"));
        }

        let block_fits = |entry: u16| ((entry as usize) << INDEX_SHIFT) + DATA_BLOCK_LENGTH <= data.len();

        if !index[.. INDEX_1_OFFSET].iter().all(|&entry| block_fits(entry)) {
            return Err(TrieError::InvalidLayout("блок данных за пределами массива"));
        }

        if (0 .. LATIN1_LENGTH / DATA_BLOCK_LENGTH).any(|block| (index[block] as usize) << INDEX_SHIFT != block * DATA_BLOCK_LENGTH) {
            return Err(TrieError::InvalidLayout("Latin-1 не линейна"));
        }

        for &i1 in &index[INDEX_1_OFFSET .. INDEX_1_OFFSET + index_1_length] {
            let i1 = i1 as usize;

            match index.get(i1 .. i1 + INDEX_2_BLOCK_LENGTH) {
                Some(block) if block.iter().all(|&entry| block_fits(entry)) => (),
                _ => return Err(TrieError::InvalidLayout("блок индекса второго уровня")),
            }
        }

        Ok(Self {
            index,
            data,
            high_start,
            high_value_index,
            initial_value,
            error_value,
        })
    }

    /// заглушка: все кодпоинты имеют значение initial_value, кроме ведущих суррогатов
    /// (как кодпоинтов, так и кодовых единиц) - у них lead_unit_value
    pub fn dummy(initial_value: T, lead_unit_value: T) -> Self
    {
        let null_block = LATIN1_LENGTH;
        let lead_block = match lead_unit_value == initial_value {
            true => null_block,
            false => null_block + DATA_BLOCK_LENGTH,
        };

        let mut data = vec![initial_value; LATIN1_LENGTH + DATA_BLOCK_LENGTH];

        if lead_block != null_block {
            data.extend([lead_unit_value; DATA_BLOCK_LENGTH]);
        }

        let entry = |offset: usize| (offset >> INDEX_SHIFT) as u16;

        let mut index = vec![entry(null_block); INDEX_1_OFFSET];

        for (block, value) in index[.. LATIN1_LENGTH / DATA_BLOCK_LENGTH].iter_mut().enumerate() {
            *value = entry(block * DATA_BLOCK_LENGTH);
        }

        let lead_blocks = (0xD800 >> SHIFT_2) .. (0xDC00 >> SHIFT_2);

        for value in index[lead_blocks].iter_mut() {
            *value = entry(lead_block);
        }

        for value in index[LSCP_INDEX_2_OFFSET .. INDEX_1_OFFSET].iter_mut() {
            *value = entry(lead_block);
        }

        Self {
            index,
            data,
            high_start: 0x10000,
            high_value_index: null_block,
            initial_value,
            error_value: initial_value,
        }
    }

    /// значение для кодпоинта; вне U+0000..U+10FFFF - error_value
    #[inline(always)]
    pub fn get(&self, c: u32) -> T
    {
        match self.raw_offset(c) {
            Some(offset) => self.data[offset],
            None => self.error_value,
        }
    }

    /// значение, расширенное до 32 бит
    #[inline(always)]
    pub fn get32(&self, c: u32) -> u32
    {
        self.get(c).to_u32()
    }

    /// смещение значения кодпоинта в массиве данных
    #[inline(always)]
    pub fn raw_offset(&self, c: u32) -> Option<usize>
    {
        match c {
            0 ..= 0xFFFF => Some(self.block_offset(0, c)),
            0x10000 ..= 0x10FFFF => match c < self.high_start {
                true => Some(self.supplementary_offset(c)),
                false => Some(self.high_value_index),
            },
            _ => None,
        }
    }

    /// значение в массиве данных по смещению
    #[inline(always)]
    pub fn data_value(&self, offset: usize) -> T
    {
        self.data[offset]
    }

    /// значение кодовой единицы BMP: ведущие суррогаты читаются из участка LSCP
    #[inline(always)]
    pub fn get_bmp_value(&self, c: u16) -> T
    {
        match c {
            0xD800 ..= 0xDBFF => self.get_lead_value(c),
            _ => self.data[self.block_offset(0, c as u32)],
        }
    }

    /// значение ведущего суррогата как кодовой единицы
    #[inline(always)]
    pub fn get_lead_value(&self, lead: u16) -> T
    {
        match lead {
            0xD800 ..= 0xDBFF => {
                let offset = self.block_offset(LSCP_INDEX_2_OFFSET, (lead - 0xD800) as u32);
                self.data[offset]
            }
            _ => self.get_bmp_value(lead),
        }
    }

    /// значение завершающего суррогата по значению ведущего и стратегии получения смещения свёртки
    #[inline(always)]
    pub fn get_trail_value<M: DataManipulate<T>>(&self, manipulate: &M, lead_value: T, trail: u16) -> T
    {
        let offset = manipulate.folding_offset(lead_value) as usize;

        match offset > 0 && offset + LSCP_INDEX_2_LENGTH <= self.index.len() {
            true => self
                .data
                .get(self.block_offset(offset, (trail & SURROGATE_MASK) as u32))
                .copied()
                .unwrap_or(self.initial_value),
            false => self.initial_value,
        }
    }

    /// значение суррогатной пары (трёхуровневая адресация)
    #[inline(always)]
    pub fn get_surrogate_value(&self, lead: u16, trail: u16) -> T
    {
        match (lead, trail) {
            (0xD800 ..= 0xDBFF, 0xDC00 ..= 0xDFFF) => {
                let c = (((lead as u32) - 0xD800) << 10) + ((trail as u32) - 0xDC00) + 0x10000;
                self.get(c)
            }
            _ => self.error_value,
        }
    }

    /// значение Latin-1 без обращения к индексу
    #[inline(always)]
    pub fn get_latin1_linear_value(&self, c: u8) -> T
    {
        self.data[c as usize]
    }

    /// смещение в индексе участка для завершающих суррогатов ведущего суррогата `lead`.
    /// 0 - для кодпоинтов этого суррогата отдельных данных нет (значение high)
    pub fn folding_offset(&self, lead: u16) -> u32
    {
        if !(0xD800 ..= 0xDBFF).contains(&lead) {
            return 0;
        }

        let c = (((lead as u32) - 0xD800) << 10) + 0x10000;

        if c >= self.high_start {
            return 0;
        }

        let i1 = self.index[INDEX_1_OFFSET - OMITTED_BMP_INDEX_1_LENGTH + (c >> SHIFT_1) as usize] as usize;

        (i1 + ((c >> SHIFT_2) & INDEX_2_MASK) as usize) as u32
    }

    pub fn initial_value(&self) -> T
    {
        self.initial_value
    }

    pub fn error_value(&self) -> T
    {
        self.error_value
    }

    pub fn high_start(&self) -> u32
    {
        self.high_start
    }

    /// размеры индекса и данных
    pub fn size(&self) -> (usize, usize)
    {
        (self.index.len(), self.data.len())
    }

    /// смещение значения: блок по индексу, начиная с позиции `index_offset`, и младшие биты кодпоинта
    #[inline(always)]
    fn block_offset(&self, index_offset: usize, c: u32) -> usize
    {
        let block = self.index[index_offset + (c >> SHIFT_2) as usize] as usize;

        (block << INDEX_SHIFT) + (c & DATA_MASK) as usize
    }

    #[inline(always)]
    fn supplementary_offset(&self, c: u32) -> usize
    {
        let i1 = self.index[INDEX_1_OFFSET - OMITTED_BMP_INDEX_1_LENGTH + (c >> SHIFT_1) as usize] as usize;
        let block = self.index[i1 + ((c >> SHIFT_2) & INDEX_2_MASK) as usize] as usize;

        (block << INDEX_SHIFT) + (c & DATA_MASK) as usize
    }
}
