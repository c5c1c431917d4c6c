use core::ops::RangeInclusive;

use crate::bmpset::BmpSet;
use crate::error::SetError;

/// граница диапазона кодпоинтов, завершающая инверсионный список
pub const UNICODE_LIMIT: u32 = 0x110000;

/// инверсионный список: возрастающие границы диапазонов [начало, конец), последний элемент - 0x110000.
/// кодпоинт входит в множество, если количество элементов списка, не превышающих его, нечётно.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InversionList
{
    list: Vec<u32>,
}

impl InversionList
{
    /// проверить и принять готовый инверсионный список
    pub fn try_from_vec(list: Vec<u32>) -> Result<Self, SetError>
    {
        match list.last() {
            Some(&UNICODE_LIMIT) => (),
            _ => return Err(SetError::MissingTerminator),
        }

        if let Some(&value) = list.iter().find(|&&value| value > UNICODE_LIMIT) {
            return Err(SetError::OutOfRange(value));
        }

        if let Some(position) = list.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SetError::NotIncreasing(position + 1));
        }

        Ok(Self { list })
    }

    /// собрать инверсионный список из диапазонов (в любом порядке, могут пересекаться)
    pub fn from_ranges<I>(ranges: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = RangeInclusive<u32>>,
    {
        let mut ranges: Vec<RangeInclusive<u32>> = ranges.into_iter().filter(|r| !r.is_empty()).collect();
        ranges.sort_by_key(|r| *r.start());

        let mut list: Vec<u32> = Vec::with_capacity(ranges.len() * 2 + 1);

        for range in ranges {
            let (start, end) = (*range.start(), *range.end());

            if end >= UNICODE_LIMIT {
                return Err(SetError::OutOfRange(end));
            }

            // пересекается или примыкает к предыдущему диапазону - расширяем его
            match list.last_mut() {
                Some(limit) if start <= *limit => {
                    if end + 1 > *limit {
                        *limit = end + 1;
                    }
                }
                _ => {
                    list.push(start);
                    list.push(end + 1);
                }
            }
        }

        match list.last() {
            Some(&UNICODE_LIMIT) => (),
            _ => list.push(UNICODE_LIMIT),
        }

        Self::try_from_vec(list)
    }

    /// входит ли кодпоинт в множество (двоичный поиск по списку)
    pub fn contains(&self, code: u32) -> bool
    {
        code < UNICODE_LIMIT && self.list.partition_point(|&value| value <= code) & 1 == 1
    }

    /// диапазоны множества
    pub fn ranges(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_
    {
        self.list
            .chunks_exact(2)
            .map(|pair| pair[0] ..= pair[1] - 1)
    }

    pub fn as_slice(&self) -> &[u32]
    {
        &self.list
    }

    /// быстрые проверки BMP поверх списка
    pub fn bmp_set(&self) -> BmpSet<'_>
    {
        BmpSet::new(self)
    }
}
