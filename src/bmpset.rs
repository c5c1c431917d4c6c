use crate::inversion_list::InversionList;
use crate::inversion_list::UNICODE_LIMIT;

/// условие продолжения span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanCondition
{
    /// идём, пока кодпоинты не входят в множество
    NotContained,
    /// идём, пока кодпоинты входят в множество
    Contained,
}

impl SpanCondition
{
    #[inline(always)]
    fn is_contained(self) -> bool
    {
        self == SpanCondition::Contained
    }
}

/// быстрые проверки вхождения кодпоинтов BMP в множество, заданное инверсионным списком.
///
/// - U+0000..U+00FF - прямая таблица;
/// - U+0100..U+07FF - "вертикальная" битовая матрица: слово - младшие 6 бит кодпоинта, бит - старшие 5;
/// - U+0800..U+FFFF - та же матрица для блоков по 64 кодпоинта: бит `lead` - блок целиком в множестве,
///   бит `lead + 16` - блок смешанный, тогда ищем в списке в пределах 4K-блока;
/// - суррогаты и дополнительные плоскости - двоичный поиск в ограниченной части списка.
#[derive(Debug, Clone)]
pub struct BmpSet<'a>
{
    list: &'a [u32],
    latin1_contains: [bool; 0x100],
    table_7ff: [u32; 64],
    bmp_block_bits: [u32; 64],
    /// индексы списка для U+0800, U+1000, .. U+10000 и последний элемент списка
    list_4k_starts: [usize; 18],
}

impl<'a> BmpSet<'a>
{
    pub fn new(set: &'a InversionList) -> Self
    {
        let list = set.as_slice();
        let last = list.len() - 1;

        let mut bmp = Self {
            list,
            latin1_contains: [false; 0x100],
            table_7ff: [0; 64],
            bmp_block_bits: [0; 64],
            list_4k_starts: [0; 18],
        };

        bmp.list_4k_starts[0] = bmp.find_code_point(0x800, 0, last);

        for i in 1 ..= 0x10 {
            bmp.list_4k_starts[i] = bmp.find_code_point((i as u32) << 12, bmp.list_4k_starts[i - 1], last);
        }

        bmp.list_4k_starts[0x11] = last;
        bmp.init_bits();

        bmp
    }

    /// входит ли кодпоинт в множество. вне диапазона U+0000..U+10FFFF - никогда
    pub fn contains(&self, c: u32) -> bool
    {
        match c {
            0 ..= 0xFF => self.latin1_contains[c as usize],
            0x100 ..= 0x7FF => self.table_7ff[(c & 0x3F) as usize] & (1 << (c >> 6)) != 0,
            0x800 ..= 0xD7FF | 0xE000 ..= 0xFFFF => self.contains_bmp_block(c),
            0xD800 ..= 0x10FFFF => self.contains_slow(c, self.list_4k_starts[0xD], self.list_4k_starts[0x11]),
            _ => false,
        }
    }

    pub fn contains_char(&self, c: char) -> bool
    {
        self.contains(u32::from(c))
    }

    /// пропустить с позиции `start` кодовые единицы UTF-16, удовлетворяющие условию.
    /// возвращает позицию остановки и количество пройденных кодпоинтов.
    /// одиночные суррогаты рассматриваются как кодпоинты.
    pub fn span(&self, text: &[u16], start: usize, condition: SpanCondition) -> (usize, usize)
    {
        let contained = condition.is_contained();
        let mut i = start;
        let mut count = 0;

        while i < text.len() {
            let c = text[i];

            let (is_contained, width) = match c {
                0xD800 ..= 0xDBFF => match text.get(i + 1) {
                    Some(&c2) if (0xDC00 ..= 0xDFFF).contains(&c2) => (
                        self.contains_supplementary(supplementary(c, c2)),
                        2,
                    ),
                    _ => (self.contains_surrogate(c), 1),
                },
                0xDC00 ..= 0xDFFF => (self.contains_surrogate(c), 1),
                _ => (self.contains_bmp(c), 1),
            };

            if is_contained != contained {
                break;
            }

            i += width;
            count += 1;
        }

        (i, count)
    }

    /// то же, что и `span`, но в обратную сторону от позиции `limit` (не включая её).
    /// возвращает позицию начала пройденного отрезка.
    pub fn span_back(&self, text: &[u16], limit: usize, condition: SpanCondition) -> usize
    {
        let contained = condition.is_contained();
        let mut i = limit.min(text.len());

        while i > 0 {
            let c = text[i - 1];

            let (is_contained, width) = match c {
                0xDC00 ..= 0xDFFF => match i.checked_sub(2).map(|p| text[p]) {
                    Some(c2) if (0xD800 ..= 0xDBFF).contains(&c2) => (
                        self.contains_supplementary(supplementary(c2, c)),
                        2,
                    ),
                    _ => (self.contains_surrogate(c), 1),
                },
                0xD800 ..= 0xDBFF => (self.contains_surrogate(c), 1),
                _ => (self.contains_bmp(c), 1),
            };

            if is_contained != contained {
                break;
            }

            i -= width;
        }

        i
    }

    /// span по UTF-8 строке: длина в байтах префикса, удовлетворяющего условию
    pub fn span_str(&self, text: &str, condition: SpanCondition) -> usize
    {
        let contained = condition.is_contained();

        text.char_indices()
            .find(|(_, c)| self.contains_char(*c) != contained)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    }

    /// span_back по UTF-8 строке: байтовая позиция начала суффикса, удовлетворяющего условию
    pub fn span_back_str(&self, text: &str, condition: SpanCondition) -> usize
    {
        let contained = condition.is_contained();

        text.char_indices()
            .rev()
            .find(|(_, c)| self.contains_char(*c) != contained)
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    /// кодовая единица BMP, не являющаяся суррогатом
    #[inline(always)]
    fn contains_bmp(&self, c: u16) -> bool
    {
        match c {
            0 ..= 0xFF => self.latin1_contains[c as usize],
            0x100 ..= 0x7FF => self.table_7ff[(c & 0x3F) as usize] & (1 << (c >> 6)) != 0,
            _ => self.contains_bmp_block(c as u32),
        }
    }

    /// U+0800..U+FFFF кроме суррогатов
    #[inline(always)]
    fn contains_bmp_block(&self, c: u32) -> bool
    {
        let lead = (c >> 12) as usize;
        let two_bits = (self.bmp_block_bits[((c >> 6) & 0x3F) as usize] >> lead) & 0x10001;

        match two_bits {
            0 => false,
            1 => true,
            _ => self.contains_slow(c, self.list_4k_starts[lead], self.list_4k_starts[lead + 1]),
        }
    }

    #[inline(always)]
    fn contains_surrogate(&self, c: u16) -> bool
    {
        self.contains_slow(c as u32, self.list_4k_starts[0xD], self.list_4k_starts[0xE])
    }

    #[inline(always)]
    fn contains_supplementary(&self, c: u32) -> bool
    {
        self.contains_slow(c, self.list_4k_starts[0x10], self.list_4k_starts[0x11])
    }

    #[inline(always)]
    fn contains_slow(&self, c: u32, lo: usize, hi: usize) -> bool
    {
        self.find_code_point(c, lo, hi) & 1 != 0
    }

    /// наименьший индекс i в [lo, hi], такой что c < list[i]
    fn find_code_point(&self, c: u32, mut lo: usize, mut hi: usize) -> usize
    {
        if c < self.list[lo] {
            return lo;
        }

        // чаще всего кодпоинт оказывается после последнего диапазона
        if lo >= hi || c >= self.list[hi - 1] {
            return hi;
        }

        loop {
            let i = (lo + hi) >> 1;

            if i == lo {
                break;
            }

            match c < self.list[i] {
                true => hi = i,
                false => lo = i,
            }
        }

        hi
    }

    /// заполнить таблицы, пройдя по инверсионному списку один раз
    fn init_bits(&mut self)
    {
        let list = self.list;
        let mut index = 0;

        // следующий диапазон [start, limit) списка
        let next_range = |index: &mut usize| -> (u32, u32) {
            let start = list[*index];
            *index += 1;

            let limit = match *index < list.len() {
                true => list[*index],
                false => UNICODE_LIMIT,
            };
            *index += 1;

            (start, limit)
        };

        // latin1_contains
        loop {
            let (mut start, limit) = next_range(&mut index);

            if start >= 0x100 {
                break;
            }

            while start < limit && start < 0x100 {
                self.latin1_contains[start as usize] = true;
                start += 1;
            }

            if limit > 0x100 {
                break;
            }
        }

        // снова ищем первый диапазон, пересекающийся с 0x80..0xFF или следующий за ним
        index = 0;

        let (mut start, mut limit) = loop {
            let (start, limit) = next_range(&mut index);

            if limit > 0x80 {
                break (start.max(0x80), limit);
            }
        };

        // table_7ff
        while start < 0x800 {
            set_32x64_bits(&mut self.table_7ff, start, limit.min(0x800));

            if limit > 0x800 {
                start = 0x800;
                break;
            }

            (start, limit) = next_range(&mut index);
        }

        // bmp_block_bits
        let mut min_start = 0x800;

        while start < 0x10000 {
            limit = limit.min(0x10000);
            start = start.max(min_start);

            // иначе - очередной диапазон целиком внутри уже отмеченного смешанного блока
            if start < limit {
                if start & 0x3F != 0 {
                    // смешанный блок из 64 кодпоинтов
                    let block = start >> 6;
                    self.bmp_block_bits[(block & 0x3F) as usize] |= 0x10001 << (block >> 6);

                    start = (block + 1) << 6;
                    min_start = start;
                }

                if start < limit {
                    if start < (limit & !0x3F) {
                        // несколько блоков целиком
                        set_32x64_bits(&mut self.bmp_block_bits, start >> 6, limit >> 6);
                    }

                    if limit & 0x3F != 0 {
                        // смешанный блок
                        let block = limit >> 6;
                        self.bmp_block_bits[(block & 0x3F) as usize] |= 0x10001 << (block >> 6);

                        limit = (block + 1) << 6;
                        min_start = limit;
                    }
                }
            }

            if limit == 0x10000 {
                break;
            }

            (start, limit) = next_range(&mut index);
        }
    }
}

/// установить биты для диапазона [start, limit) в пределах 0..0x800 в вертикальной матрице:
/// слово - младшие 6 бит, бит - старшие 5 бит
fn set_32x64_bits(table: &mut [u32; 64], start: u32, limit: u32)
{
    debug_assert!(start < limit && limit <= 0x800);

    let mut lead = start >> 6;
    let mut trail = (start & 0x3F) as usize;

    let mut bits = 1u32 << lead;

    // одиночный кодпоинт
    if start + 1 == limit {
        table[trail] |= bits;
        return;
    }

    let limit_lead = limit >> 6;
    let limit_trail = (limit & 0x3F) as usize;

    if lead == limit_lead {
        // часть одного столбца
        while trail < limit_trail {
            table[trail] |= bits;
            trail += 1;
        }

        return;
    }

    // часть столбца, прямоугольник, часть следующего столбца
    if trail > 0 {
        while trail < 64 {
            table[trail] |= bits;
            trail += 1;
        }

        lead += 1;
    }

    if lead < limit_lead {
        bits = !((1u32 << lead) - 1);

        if limit_lead < 0x20 {
            bits &= (1u32 << limit_lead) - 1;
        }

        for word in table.iter_mut() {
            *word |= bits;
        }
    }

    // при limit == 0x800 limit_trail == 0, и последний столбец не заполняется
    if limit_trail > 0 {
        bits = 1u32 << limit_lead;

        for word in table[.. limit_trail].iter_mut() {
            *word |= bits;
        }
    }
}

/// кодпоинт из суррогатной пары
#[inline(always)]
fn supplementary(lead: u16, trail: u16) -> u32
{
    (((lead as u32) - 0xD800) << 10) + ((trail as u32) - 0xDC00) + 0x10000
}
