use crate::codepoint::Codepoint;

/// буфер сегмента нормализации: декомпозированные кодпоинты в каноническом порядке.
/// нестартер вставляется после всех предшествующих нестартеров с CCC, не превышающим его собственный,
/// кодпоинты с одинаковым CCC сохраняют исходный порядок
#[derive(Debug, Default)]
pub struct ReorderingBuffer
{
    codepoints: Vec<Codepoint>,
}

impl ReorderingBuffer
{
    pub fn new() -> Self
    {
        Self {
            codepoints: Vec::with_capacity(18),
        }
    }

    #[inline(always)]
    pub fn push(&mut self, codepoint: Codepoint)
    {
        let ccc = codepoint.ccc();

        if ccc == 0 {
            self.codepoints.push(codepoint);
            return;
        }

        let mut position = self.codepoints.len();

        while position > 0 && self.codepoints[position - 1].ccc() > ccc {
            position -= 1;
        }

        self.codepoints.insert(position, codepoint);
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool
    {
        self.codepoints.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize
    {
        self.codepoints.len()
    }

    /// CCC последнего кодпоинта
    #[inline(always)]
    pub fn last_ccc(&self) -> u8
    {
        self.codepoints.last().map_or(0, |c| c.ccc())
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Codepoint]
    {
        &self.codepoints
    }

    /// содержимое для композиции на месте
    #[inline(always)]
    pub fn codepoints_mut(&mut self) -> &mut Vec<Codepoint>
    {
        &mut self.codepoints
    }

    /// дописать содержимое в результат и очистить буфер
    #[inline(always)]
    pub fn write_to(&mut self, dest: &mut String)
    {
        dest.extend(self.codepoints.drain(..).map(char::from));
    }
}
