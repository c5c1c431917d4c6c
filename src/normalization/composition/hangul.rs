// в блоке чамо (U+1100..U+11FF) могут быть скомбинированы кодпоинты:
//  - U+1100..=U+1112 (L, ведущие согласные)
//  - U+1161..=U+1175 (V, гласные)
//  - U+11A8..=U+11C2 (T, завершающие согласные)

/// начало блока ведущих согласных чамо
pub const HANGUL_L_BASE: u32 = 0x1100;
/// количество ведущих согласных
pub const HANGUL_L_COUNT: u32 = 19;
/// начало блока гласных чамо
pub const HANGUL_V_BASE: u32 = 0x1161;
/// количество гласных
pub const HANGUL_V_COUNT: u32 = 21;
/// завершающие согласные начинаются с T_BASE + 1, T_BASE означает "нет завершающей согласной"
pub const HANGUL_T_BASE: u32 = 0x11A7;
/// количество завершающих согласных
pub const HANGUL_T_COUNT: u32 = 27;
/// количество кодпоинтов на блок LV
pub const HANGUL_T_BLOCK_SIZE: u32 = HANGUL_T_COUNT + 1;
/// начало блока слогов хангыль
pub const HANGUL_S_BASE: u32 = 0xAC00;
/// количество слогов хангыль в Unicode
pub const HANGUL_S_COUNT: u32 = 11172;
/// количество гласных * количество завершающих согласных
pub const HANGUL_N_COUNT: u32 = 588;

/// кодпоинт - слог хангыль
#[inline(always)]
pub fn is_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// слог хангыль без завершающей согласной (LV)
#[inline(always)]
pub fn is_lv_syllable(code: u32) -> bool
{
    let s = code.wrapping_sub(HANGUL_S_BASE);

    s < HANGUL_S_COUNT && s % HANGUL_T_BLOCK_SIZE == 0
}

/// ведущая согласная
#[inline(always)]
pub fn is_leading_consonant(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_L_BASE) < HANGUL_L_COUNT
}

/// гласная или завершающая согласная - может быть скомбинирована с предыдущим кодпоинтом
#[inline(always)]
pub fn is_vowel_or_trailing_consonant(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_V_BASE) < HANGUL_V_COUNT
        || code.wrapping_sub(HANGUL_T_BASE + 1) < HANGUL_T_COUNT
}

/// скомбинировать L + V или LV + T
#[inline(always)]
pub fn compose_hangul(first: u32, second: u32) -> Option<u32>
{
    let l = first.wrapping_sub(HANGUL_L_BASE);

    if l < HANGUL_L_COUNT {
        let v = second.wrapping_sub(HANGUL_V_BASE);

        return match v < HANGUL_V_COUNT {
            true => Some(HANGUL_S_BASE + l * HANGUL_N_COUNT + v * HANGUL_T_BLOCK_SIZE),
            false => None,
        };
    }

    if is_lv_syllable(first) {
        let t = second.wrapping_sub(HANGUL_T_BASE + 1);

        if t < HANGUL_T_COUNT {
            return Some(first + t + 1);
        }
    }

    None
}

/// декомпозиция слога хангыль: L, V и, возможно, T
#[inline(always)]
pub fn decompose_hangul(code: u32) -> (u32, u32, Option<u32>)
{
    let s = code - HANGUL_S_BASE;

    let l = HANGUL_L_BASE + s / HANGUL_N_COUNT;
    let v = HANGUL_V_BASE + (s % HANGUL_N_COUNT) / HANGUL_T_BLOCK_SIZE;
    let t = s % HANGUL_T_BLOCK_SIZE;

    match t {
        0 => (l, v, None),
        _ => (l, v, Some(HANGUL_T_BASE + t)),
    }
}
