use crate::data::NormalizerData;

/// результат быстрой проверки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickCheck
{
    /// строка нормализована
    Yes,
    /// строка не нормализована
    No,
    /// требуется полная проверка
    Maybe,
}

// функции быстрой проверки возвращают позицию последней границы сегмента перед первым кодпоинтом,
// требующим нормализации (или длину строки, если такого нет), и результат проверки

/// быстрая проверка NFD / NFKD
pub fn decompose_quick_check(data: &NormalizerData, text: &str) -> (usize, QuickCheck)
{
    let mut prev_boundary = 0;
    let mut prev_ccc = 0;

    for (i, c) in text.char_indices() {
        let value = data.value(c as u32);

        if value.is_inert() {
            prev_boundary = i;
            prev_ccc = 0;
            continue;
        }

        if value.has_decomposition() {
            return match data.lead_ccc(value) == 0 {
                true => (i, QuickCheck::No),
                false => (prev_boundary, QuickCheck::No),
            };
        }

        let ccc = value.ccc();

        if ccc == 0 {
            prev_boundary = i;
        } else if prev_ccc > ccc {
            return (prev_boundary, QuickCheck::No);
        }

        prev_ccc = ccc;
    }

    (text.len(), QuickCheck::Yes)
}

/// быстрая проверка NF(K)C / FCC. при `stop_at_maybe` проверка завершается на первом кодпоинте,
/// который может быть скомбинирован с предыдущим
pub fn compose_quick_check(
    data: &NormalizerData,
    text: &str,
    only_contiguous: bool,
    stop_at_maybe: bool,
) -> (usize, QuickCheck)
{
    let mut prev_boundary = 0;
    let mut prev_ccc = 0;
    let mut result = QuickCheck::Yes;

    for (i, c) in text.char_indices() {
        let value = data.value(c as u32);

        if value.is_inert() {
            prev_boundary = i;
            prev_ccc = 0;
            continue;
        }

        if value.has_compose_boundary_before() {
            prev_boundary = i;
        }

        if value.is_compose_qc_no(only_contiguous) {
            return (prev_boundary, QuickCheck::No);
        }

        // NF(K)C сравнивает CCC самих кодпоинтов, FCC - CCC краёв их декомпозиций
        let (lead_ccc, trail_ccc) = match only_contiguous {
            true => (data.lead_ccc(value), data.trail_ccc(value)),
            false => (value.ccc(), value.ccc()),
        };

        if lead_ccc != 0 && prev_ccc > lead_ccc {
            return (prev_boundary, QuickCheck::No);
        }

        if value.combines_backwards() {
            if stop_at_maybe {
                return (prev_boundary, QuickCheck::Maybe);
            }

            result = QuickCheck::Maybe;
        }

        prev_ccc = trail_ccc;
    }

    (text.len(), result)
}

/// быстрая проверка FCD: CCC последнего кодпоинта декомпозиции не превышает CCC первого кодпоинта
/// декомпозиции следующего кодпоинта
pub fn fcd_quick_check(data: &NormalizerData, text: &str) -> (usize, QuickCheck)
{
    let mut prev_boundary = 0;
    let mut prev_trail_ccc = 0;

    for (i, c) in text.char_indices() {
        let value = data.value(c as u32);
        let lead_ccc = data.lead_ccc(value);

        if lead_ccc == 0 {
            prev_boundary = i;
        } else if prev_trail_ccc > lead_ccc {
            return (prev_boundary, QuickCheck::No);
        }

        prev_trail_ccc = data.trail_ccc(value);
    }

    (text.len(), QuickCheck::Yes)
}
