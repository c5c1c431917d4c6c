use core::ops::RangeInclusive;
use std::collections::HashMap;

use super::*;

/// количество кодпоинтов
const CODEPOINTS_COUNT: usize = 0x110000;
/// количество ведущих суррогатов
const LEAD_UNITS_COUNT: usize = 0x400;
/// максимальное смещение блока данных, которое можно записать в индекс
const MAX_DATA_OFFSET: usize = (u16::MAX as usize) << INDEX_SHIFT;

/// изменяемая заготовка trie: значения хранятся плоско, при сборке блоки данных и индекса дедуплицируются
#[derive(Debug, Clone)]
pub struct TrieBuilder<T: TrieValue>
{
    values: Vec<T>,
    lead_unit_values: Vec<T>,
    initial_value: T,
    error_value: T,
}

impl<T: TrieValue> TrieBuilder<T>
{
    pub fn new(initial_value: T, error_value: T) -> Self
    {
        Self {
            values: vec![initial_value; CODEPOINTS_COUNT],
            lead_unit_values: vec![initial_value; LEAD_UNITS_COUNT],
            initial_value,
            error_value,
        }
    }

    pub fn get(&self, c: u32) -> T
    {
        match self.values.get(c as usize) {
            Some(value) => *value,
            None => self.error_value,
        }
    }

    pub fn set(&mut self, c: u32, value: T)
    {
        self.values[c as usize] = value;
    }

    pub fn set_range(&mut self, range: RangeInclusive<u32>, value: T)
    {
        self.values[*range.start() as usize ..= *range.end() as usize].fill(value);
    }

    /// изменить значения диапазона на основе текущих
    pub fn update_range<F>(&mut self, range: RangeInclusive<u32>, f: F)
    where
        F: Fn(T) -> T,
    {
        for value in self.values[*range.start() as usize ..= *range.end() as usize].iter_mut() {
            *value = f(*value);
        }
    }

    /// значение ведущего суррогата как кодовой единицы (не кодпоинта)
    pub fn set_lead_unit_value(&mut self, lead: u16, value: T)
    {
        assert!((0xD800 ..= 0xDBFF).contains(&lead), "U+{:04X} не ведущий суррогат", lead);

        self.lead_unit_values[(lead - 0xD800) as usize] = value;
    }

    /// собрать trie. значения дополнительных плоскостей, совпадающие с последним, отсекаются по high_start
    pub fn build(&self) -> Result<Trie<T>, TrieError>
    {
        self.compact(true)
    }

    /// собрать trie, записав в значения ведущих суррогатов смещения свёртки для их завершающих суррогатов.
    /// `fold` получает смещение в индексе и возвращает значение для ведущего суррогата.
    /// ведущие суррогаты, все кодпоинты которых имеют начальное значение, не изменяются.
    pub fn build_folded<F>(&self, fold: F) -> Result<Trie<T>, TrieError>
    where
        F: Fn(u32) -> T,
    {
        // без отсечения high_start - каждому ведущему суррогату нужен свой участок индекса
        let probe = self.compact(false)?;
        let mut folded = self.clone();

        for lead in 0xD800u16 ..= 0xDBFF {
            let start = 0x10000 + (((lead - 0xD800) as usize) << 10);

            if folded.values[start .. start + LEAD_UNITS_COUNT]
                .iter()
                .all(|v| *v == self.initial_value)
            {
                continue;
            }

            folded.set_lead_unit_value(lead, fold(probe.folding_offset(lead)));
        }

        // значения LSCP записываются в данные после дополнительных плоскостей, смещения не меняются
        folded.compact(false)
    }

    fn compact(&self, cut_high: bool) -> Result<Trie<T>, TrieError>
    {
        let high_value = self.values[CODEPOINTS_COUNT - 1];

        let high_start = match cut_high {
            true => self.high_start(high_value),
            false => CODEPOINTS_COUNT as u32,
        };

        let index_1_length = ((high_start - 0x10000) >> SHIFT_1) as usize;

        let mut data: Vec<T> = Vec::with_capacity(0x10000);
        let mut blocks: HashMap<Vec<T>, usize> = HashMap::new();
        let mut index: Vec<u16> = vec![0; INDEX_1_OFFSET + index_1_length];

        // Latin-1 линейно, без дедупликации
        for block in 0 .. LATIN1_LENGTH / DATA_BLOCK_LENGTH {
            let offset = data.len();
            let values = &self.values[offset .. offset + DATA_BLOCK_LENGTH];

            data.extend_from_slice(values);
            blocks.entry(values.to_vec()).or_insert(offset);
            index[block] = index_entry(offset)?;
        }

        // BMP
        for block in LATIN1_LENGTH / DATA_BLOCK_LENGTH .. INDEX_2_BMP_LENGTH {
            let start = block * DATA_BLOCK_LENGTH;
            let offset = add_block(&mut data, &mut blocks, &self.values[start .. start + DATA_BLOCK_LENGTH]);

            index[block] = index_entry(offset)?;
        }

        // дополнительные плоскости: блоки индекса второго уровня тоже дедуплицируются
        let mut index_2_blocks: HashMap<Vec<u16>, usize> = HashMap::new();

        for i1 in 0 .. index_1_length {
            let base = 0x10000 + (i1 << SHIFT_1);
            let mut index_2 = Vec::with_capacity(INDEX_2_BLOCK_LENGTH);

            for i2 in 0 .. INDEX_2_BLOCK_LENGTH {
                let start = base + i2 * DATA_BLOCK_LENGTH;
                let offset = add_block(&mut data, &mut blocks, &self.values[start .. start + DATA_BLOCK_LENGTH]);

                index_2.push(index_entry(offset)?);
            }

            let position = match index_2_blocks.get(&index_2) {
                Some(position) => *position,
                None => {
                    let position = index.len();

                    index.extend_from_slice(&index_2);
                    index_2_blocks.insert(index_2, position);

                    position
                }
            };

            index[INDEX_1_OFFSET + i1] = u16::try_from(position).map_err(|_| TrieError::IndexTooLarge(position))?;
        }

        // ведущие суррогаты как кодовые единицы
        for block in 0 .. LSCP_INDEX_2_LENGTH {
            let start = block * DATA_BLOCK_LENGTH;
            let offset = add_block(
                &mut data,
                &mut blocks,
                &self.lead_unit_values[start .. start + DATA_BLOCK_LENGTH],
            );

            index[LSCP_INDEX_2_OFFSET + block] = index_entry(offset)?;
        }

        let high_value_index = add_block(&mut data, &mut blocks, &[high_value; DATA_BLOCK_LENGTH]);

        if index.len() > u16::MAX as usize {
            return Err(TrieError::IndexTooLarge(index.len()));
        }

        log::trace!(
            "trie: индекс {}, данные {}, high_start U+{:04X}",
            index.len(),
            data.len(),
            high_start
        );

        Trie::from_parts(
            index,
            data,
            high_start,
            high_value_index,
            self.initial_value,
            self.error_value,
        )
    }

    /// начало отрезка в конце кодового пространства, где все значения равны последнему, кратное 2048
    fn high_start(&self, high_value: T) -> u32
    {
        let mut c = CODEPOINTS_COUNT;

        while c > 0x10000 && self.values[c - 1] == high_value {
            c -= 1;
        }

        let granularity = 1 << SHIFT_1;

        ((c + granularity - 1) & !(granularity - 1)) as u32
    }
}

/// добавить блок данных или найти такой же среди добавленных
fn add_block<T: TrieValue>(data: &mut Vec<T>, blocks: &mut HashMap<Vec<T>, usize>, values: &[T]) -> usize
{
    if let Some(offset) = blocks.get(values) {
        return *offset;
    }

    let offset = data.len();

    data.extend_from_slice(values);
    blocks.insert(values.to_vec(), offset);

    offset
}

/// запись индекса второго уровня для смещения блока данных
fn index_entry(offset: usize) -> Result<u16, TrieError>
{
    match offset <= MAX_DATA_OFFSET {
        true => Ok((offset >> INDEX_SHIFT) as u16),
        false => Err(TrieError::DataTooLarge(offset)),
    }
}
