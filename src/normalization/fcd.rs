use super::buffer::ReorderingBuffer;
use super::decomposition::{decompose, has_decomposition_boundary_after, has_decomposition_boundary_before};
use super::quick_check::{fcd_quick_check, QuickCheck};
use super::Normalizer;
use crate::data::{self, NormalizerData};
use crate::error::DataError;

/// FCD: строка, каноническая декомпозиция которой не требует переупорядочивания.
/// сегменты, нарушающие это условие, раскладываются в NFD, остальной текст не изменяется
#[derive(Debug, Clone, Copy)]
pub struct FcdNormalizer<'a>
{
    data: &'a NormalizerData,
}

impl FcdNormalizer<'static>
{
    pub fn new_fcd() -> Result<Self, DataError>
    {
        Ok(Self::from_data(data::nfc()?))
    }
}

impl<'a> FcdNormalizer<'a>
{
    pub fn from_data(data: &'a NormalizerData) -> Self
    {
        Self { data }
    }

    /// сегмент начинается с кодпоинта, декомпозиция которого начинается со стартера
    fn write_segment(&self, segment: &str, buffer: &mut ReorderingBuffer, dest: &mut String)
    {
        if fcd_quick_check(self.data, segment).1 == QuickCheck::Yes {
            dest.push_str(segment);
            return;
        }

        for c in segment.chars() {
            let code = c as u32;
            decompose(self.data, code, self.data.value(code), buffer);
        }

        buffer.write_to(dest);
    }
}

impl<'a> Normalizer for FcdNormalizer<'a>
{
    fn data(&self) -> &NormalizerData
    {
        self.data
    }

    fn normalize_to(&self, text: &str, dest: &mut String)
    {
        let (yes, _) = fcd_quick_check(self.data, text);

        dest.reserve(text.len());
        dest.push_str(&text[.. yes]);

        let rest = &text[yes ..];
        let mut buffer = ReorderingBuffer::new();
        let mut segment_start = 0;

        for (i, c) in rest.char_indices() {
            if i > segment_start && has_decomposition_boundary_before(self.data, self.data.value(c as u32)) {
                self.write_segment(&rest[segment_start .. i], &mut buffer, dest);
                segment_start = i;
            }
        }

        self.write_segment(&rest[segment_start ..], &mut buffer, dest);
    }

    fn span_quick_check_yes(&self, text: &str) -> usize
    {
        fcd_quick_check(self.data, text).0
    }

    fn quick_check(&self, text: &str) -> QuickCheck
    {
        fcd_quick_check(self.data, text).1
    }

    fn is_normalized(&self, text: &str) -> bool
    {
        fcd_quick_check(self.data, text).1 == QuickCheck::Yes
    }

    fn has_boundary_before(&self, c: char) -> bool
    {
        has_decomposition_boundary_before(self.data, self.data.value(c as u32))
    }

    fn has_boundary_after(&self, c: char) -> bool
    {
        has_decomposition_boundary_after(self.data, self.data.value(c as u32))
    }

    fn is_inert(&self, c: char) -> bool
    {
        let value = self.data.value(c as u32);

        self.data.lead_ccc(value) == 0 && self.data.trail_ccc(value) <= 1
    }
}
