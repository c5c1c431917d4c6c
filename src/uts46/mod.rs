//! обработка доменных имён по UTS #46: отображение, нормализация, разбиение на метки,
//! проверка меток и преобразование в ASCII (Punycode) и обратно

pub mod bidi;
pub mod context;
pub mod info;
pub mod options;
pub mod properties;
pub mod punycode;

use lazy_static::lazy_static;
use log::trace;

pub use info::{IdnaErrors, IdnaInfo};
pub use options::Uts46Options;

use self::context::{ZERO_WIDTH_JOINER, ZERO_WIDTH_NON_JOINER};
use self::properties::IdnaProperties;
use crate::bmpset::{BmpSet, SpanCondition};
use crate::data::{self, NormalizerData};
use crate::error::{DataError, SetError};
use crate::inversion_list::InversionList;
use crate::normalization::{ComposingNormalizer, Normalizer};

/// префикс ACE-метки
const ACE_PREFIX: &str = "xn--";
/// максимальная длина метки в ASCII
const MAX_LABEL_LENGTH: usize = 63;
/// максимальная длина имени в ASCII без завершающей точки
const MAX_DOMAIN_NAME_LENGTH: usize = 253;

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';
const SHARP_S: char = '\u{DF}';
const FINAL_SIGMA: char = '\u{3C2}';
const SMALL_SIGMA: char = '\u{3C3}';

lazy_static! {
    /// точка и отклонения: символы, на которых останавливается разбор отображённого имени
    static ref LABEL_STOPS: Result<InversionList, SetError> = InversionList::from_ranges([
        0x2E ..= 0x2E,
        SHARP_S as u32 ..= SHARP_S as u32,
        FINAL_SIGMA as u32 ..= FINAL_SIGMA as u32,
        ZERO_WIDTH_NON_JOINER as u32 ..= ZERO_WIDTH_JOINER as u32,
    ]);
    /// символы с правилами CONTEXTO
    static ref CONTEXT_O: Result<InversionList, SetError> =
        InversionList::from_ranges(context::CONTEXT_O_RANGES.iter().map(|(start, end)| *start ..= *end));
}

/// ASCII-символ, отличный от буквы, цифры, дефиса и точки
#[inline(always)]
fn is_non_ldh_dot(b: u8) -> bool
{
    !(b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

/// ≠, ≮, ≯: допустимы в UTS #46, но содержат недопустимые в STD3 символы в декомпозиции
#[inline(always)]
fn is_non_ascii_disallowed_std3_valid(c: char) -> bool
{
    matches!(c, '\u{2260}' | '\u{226E}' | '\u{226F}')
}

/// заменить метку в строке, вернуть новую длину метки
#[inline(always)]
fn replace_label(dest: &mut String, start: usize, length: usize, label: &str) -> usize
{
    dest.replace_range(start .. start + length, label);
    label.len()
}

/// обработчик доменных имён UTS #46
#[derive(Debug, Clone)]
pub struct Uts46
{
    options: Uts46Options,
    normalizer: ComposingNormalizer<'static>,
    properties: &'static IdnaProperties,
    label_stops: BmpSet<'static>,
    context_o: BmpSet<'static>,
}

impl Uts46
{
    pub fn new(options: Uts46Options) -> Result<Self, DataError>
    {
        let label_stops = LABEL_STOPS.as_ref().map_err(|e| DataError::Set(e.clone()))?;
        let context_o = CONTEXT_O.as_ref().map_err(|e| DataError::Set(e.clone()))?;

        Ok(Self {
            options,
            normalizer: ComposingNormalizer::new_uts46()?,
            properties: data::idna_properties()?,
            label_stops: label_stops.bmp_set(),
            context_o: context_o.bmp_set(),
        })
    }

    pub fn options(&self) -> Uts46Options
    {
        self.options
    }

    /// доменное имя в ASCII
    pub fn name_to_ascii(&self, name: &str) -> (String, IdnaInfo)
    {
        self.process(name, false, true)
    }

    /// доменное имя в Unicode
    pub fn name_to_unicode(&self, name: &str) -> (String, IdnaInfo)
    {
        self.process(name, false, false)
    }

    /// отдельная метка в ASCII. точка внутри метки - ошибка
    pub fn label_to_ascii(&self, label: &str) -> (String, IdnaInfo)
    {
        self.process(label, true, true)
    }

    /// отдельная метка в Unicode
    pub fn label_to_unicode(&self, label: &str) -> (String, IdnaInfo)
    {
        self.process(label, true, false)
    }

    fn data(&self) -> &NormalizerData
    {
        self.normalizer.data()
    }

    fn process(&self, src: &str, is_label: bool, to_ascii: bool) -> (String, IdnaInfo)
    {
        let mut info = IdnaInfo::default();
        let mut dest = String::with_capacity(src.len());

        if src.is_empty() {
            info.errors |= IdnaErrors::EMPTY_LABEL;
            return (dest, info);
        }

        let std3 = self.options.contains(Uts46Options::USE_STD3_RULES);
        let bytes = src.as_bytes();
        let mut label_start = 0;
        let mut i = 0;

        // ASCII: строчные буквы, цифры и дефис не меняются при отображении, прописные - заменяются строчными
        loop {
            if i == bytes.len() {
                if to_ascii {
                    if i - label_start > MAX_LABEL_LENGTH {
                        info.label_errors |= IdnaErrors::LABEL_TOO_LONG;
                    }

                    if !is_label {
                        self.check_domain_name_length(&dest, &mut info);
                    }
                }

                info.promote_label_errors();
                return (dest, info);
            }

            let b = bytes[i];

            if b > 0x7F {
                break;
            }

            if b.is_ascii_uppercase() {
                dest.push(b.to_ascii_lowercase() as char);
                i += 1;
                continue;
            }

            if std3 && is_non_ldh_dot(b) {
                break;
            }

            dest.push(b as char);

            match b {
                b'-' => {
                    // "??--" - Punycode или запрещённая метка
                    if i == label_start + 3 && bytes[i - 1] == b'-' {
                        i += 1;
                        break;
                    }

                    if i == label_start {
                        info.label_errors |= IdnaErrors::LEADING_HYPHEN;
                    }

                    if i + 1 == bytes.len() || bytes[i + 1] == b'.' {
                        info.label_errors |= IdnaErrors::TRAILING_HYPHEN;
                    }
                }
                b'.' => {
                    if is_label {
                        i += 1;
                        break;
                    }

                    if i == label_start {
                        info.label_errors |= IdnaErrors::EMPTY_LABEL;
                    }

                    if to_ascii && i - label_start > MAX_LABEL_LENGTH {
                        info.label_errors |= IdnaErrors::LABEL_TOO_LONG;
                    }

                    info.promote_label_errors();
                    label_start = i + 1;
                }
                _ => (),
            }

            i += 1;
        }

        info.promote_label_errors();

        trace!("UTS #46: полная обработка с байта {}, метка с байта {}", i, label_start);

        self.process_unicode(src, label_start, i, is_label, to_ascii, &mut dest, &mut info);

        if info.is_bidi
            && !info.errors.has_severe()
            && (!info.is_ok_bidi || (label_start > 0 && !bidi::is_ascii_ok(&dest[.. label_start])))
        {
            info.errors |= IdnaErrors::BIDI;
        }

        if to_ascii && !is_label {
            self.check_domain_name_length(&dest, &mut info);
        }

        (dest, info)
    }

    /// длина имени в ASCII ограничена 253 символами, 254 - с завершающей точкой
    fn check_domain_name_length(&self, dest: &str, info: &mut IdnaInfo)
    {
        let length = dest.encode_utf16().count();

        let limit = match dest.ends_with('.') {
            true => MAX_DOMAIN_NAME_LENGTH + 1,
            false => MAX_DOMAIN_NAME_LENGTH,
        };

        if length > limit {
            info.errors |= IdnaErrors::DOMAIN_NAME_TOO_LONG;
        }
    }

    /// отобразить и нормализовать `src`, начиная с `mapping_start` (в `dest` уже записано отображение
    /// предшествующей части), разбить на метки и проверить их, начиная с `label_start`
    #[allow(clippy::too_many_arguments)]
    fn process_unicode(
        &self,
        src: &str,
        label_start: usize,
        mapping_start: usize,
        is_label: bool,
        to_ascii: bool,
        dest: &mut String,
        info: &mut IdnaInfo,
    )
    {
        match mapping_start {
            0 => {
                dest.clear();
                self.normalizer.normalize_to(src, dest);
            }
            _ => self.normalizer.normalize_second_and_append(dest, &src[mapping_start ..]),
        }

        let mut map_deviations = self.options.maps_deviations(to_ascii);
        let mut label_start = label_start;
        let mut label_limit = label_start;

        while label_limit < dest.len() {
            label_limit += self.label_stops.span_str(&dest[label_limit ..], SpanCondition::NotContained);

            let c = match dest[label_limit ..].chars().next() {
                Some(c) => c,
                None => break,
            };

            if c == '.' {
                if is_label {
                    label_limit += 1;
                    continue;
                }

                let label_length = label_limit - label_start;
                let new_length = self.process_label(dest, label_start, label_length, to_ascii, info);

                info.promote_label_errors();

                label_start += new_length + 1;
                label_limit = label_start;
                continue;
            }

            // отклонение
            info.is_transitional_different = true;

            if map_deviations {
                self.map_deviations(dest, label_start, label_limit);
                // все отклонения отображены, label_limit не сдвигаем - символ мог быть удалён
                map_deviations = false;
                continue;
            }

            label_limit += c.len_utf8();
        }

        // пустая метка допустима только в конце непустого имени
        if label_start == 0 || label_start < label_limit {
            self.process_label(dest, label_start, label_limit - label_start, to_ascii, info);
            info.promote_label_errors();
        }
    }

    /// транзитивная обработка отклонений: ß -> ss, ς -> σ, ZWJ и ZWNJ удаляются.
    /// после отображения текст от начала метки снова нормализуется
    fn map_deviations(&self, dest: &mut String, label_start: usize, mapping_start: usize)
    {
        let mut mapped = String::with_capacity(dest.len() - label_start + 1);
        let mut changed = false;

        mapped.push_str(&dest[label_start .. mapping_start]);

        for c in dest[mapping_start ..].chars() {
            match c {
                SHARP_S => {
                    mapped.push_str("ss");
                    changed = true;
                }
                FINAL_SIGMA => {
                    mapped.push(SMALL_SIGMA);
                    changed = true;
                }
                ZERO_WIDTH_NON_JOINER | ZERO_WIDTH_JOINER => changed = true,
                c => mapped.push(c),
            }
        }

        if changed {
            dest.truncate(label_start);
            self.normalizer.normalize_to(&mapped, dest);
        }
    }

    /// проверить метку `dest[label_start .. label_start + label_length]`, при необходимости декодировать
    /// или закодировать её. возвращает новую длину метки в байтах
    fn process_label(
        &self,
        dest: &mut String,
        label_start: usize,
        label_length: usize,
        to_ascii: bool,
        info: &mut IdnaInfo,
    ) -> usize
    {
        let label = &dest[label_start .. label_start + label_length];

        let (mut chars, was_punycode): (Vec<char>, bool) = match label.strip_prefix(ACE_PREFIX) {
            Some(encoded) => {
                // "xn--" и "xn--ASCII-" - альтернативные записи ASCII-меток
                if encoded.is_empty() || (encoded.len() > 1 && encoded.ends_with('-')) {
                    trace!("UTS #46: пустая или ASCII ACE-метка {:?}", label);

                    info.label_errors |= IdnaErrors::INVALID_ACE_LABEL;
                    return self.mark_bad_ace_label(dest, label_start, label_length, to_ascii, info);
                }

                let decoded = match punycode::decode(encoded) {
                    Ok(decoded) => decoded,
                    Err(error) => {
                        trace!("UTS #46: метка {:?}: {}", label, error);

                        info.label_errors |= IdnaErrors::PUNYCODE;
                        return self.mark_bad_ace_label(dest, label_start, label_length, to_ascii, info);
                    }
                };

                // декодированная метка должна оставаться неизменной после отображения и нормализации
                if !self.normalizer.is_normalized(&decoded) {
                    trace!("UTS #46: метка {:?} декодирована в ненормализованную {:?}", label, decoded);

                    info.label_errors |= IdnaErrors::INVALID_ACE_LABEL;
                    return self.mark_bad_ace_label(dest, label_start, label_length, to_ascii, info);
                }

                (decoded.chars().collect(), true)
            }
            None => (label.chars().collect(), false),
        };

        let (first, last) = match (chars.first(), chars.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                info.label_errors |= IdnaErrors::EMPTY_LABEL;
                return replace_label(dest, label_start, label_length, "");
            }
        };

        if chars.len() >= 4 && chars[2] == '-' && chars[3] == '-' {
            info.label_errors |= IdnaErrors::HYPHEN_3_4;
        }

        if first == '-' {
            info.label_errors |= IdnaErrors::LEADING_HYPHEN;
        }

        if last == '-' {
            info.label_errors |= IdnaErrors::TRAILING_HYPHEN;
        }

        let std3 = self.options.contains(Uts46Options::USE_STD3_RULES);
        let mut is_ascii = true;

        for c in chars.iter_mut() {
            if c.is_ascii() {
                if *c == '.' {
                    info.label_errors |= IdnaErrors::LABEL_HAS_DOT;
                    *c = REPLACEMENT_CHARACTER;
                } else if std3 && is_non_ldh_dot(*c as u8) {
                    info.label_errors |= IdnaErrors::DISALLOWED;
                    *c = REPLACEMENT_CHARACTER;
                }
            } else {
                is_ascii = false;

                if std3 && is_non_ascii_disallowed_std3_valid(*c) {
                    info.label_errors |= IdnaErrors::DISALLOWED;
                    *c = REPLACEMENT_CHARACTER;
                } else if *c == REPLACEMENT_CHARACTER {
                    info.label_errors |= IdnaErrors::DISALLOWED;
                }
            }
        }

        // после остальных проверок, чтобы U+FFFD на месте знака не считался недопустимым символом
        if self.properties.is_mark(chars[0]) {
            info.label_errors |= IdnaErrors::LEADING_COMBINING_MARK;
            chars[0] = REPLACEMENT_CHARACTER;
        }

        let label: String = chars.iter().collect();

        if info.label_errors.has_severe() {
            trace!("UTS #46: метка {:?}: {:?}", label, info.label_errors);

            // ACE-метка с ошибками не должна выглядеть корректной
            if was_punycode {
                info.label_errors |= IdnaErrors::INVALID_ACE_LABEL;
                return self.mark_bad_ace_label(dest, label_start, label_length, to_ascii, info);
            }

            return replace_label(dest, label_start, label_length, &label);
        }

        // контекстные проверки - только без U+FFFD от серьёзных ошибок
        if self.options.contains(Uts46Options::CHECK_BIDI) && (!info.is_bidi || info.is_ok_bidi) {
            bidi::check_label(self.properties, &label, info);
        }

        if self.options.contains(Uts46Options::CHECK_CONTEXTJ)
            && chars.iter().any(|c| *c == ZERO_WIDTH_NON_JOINER || *c == ZERO_WIDTH_JOINER)
            && !context::is_label_ok_context_j(self.data(), self.properties, &chars)
        {
            info.label_errors |= IdnaErrors::CONTEXTJ;
        }

        if self.options.contains(Uts46Options::CHECK_CONTEXTO)
            && self.context_o.span_str(&label, SpanCondition::NotContained) < label.len()
        {
            info.label_errors |= context::check_label_context_o(self.properties, &chars);
        }

        if !to_ascii {
            return replace_label(dest, label_start, label_length, &label);
        }

        // корректная ACE-метка остаётся как есть
        if was_punycode {
            if label_length > MAX_LABEL_LENGTH {
                info.label_errors |= IdnaErrors::LABEL_TOO_LONG;
            }

            return label_length;
        }

        if is_ascii {
            if label.len() > MAX_LABEL_LENGTH {
                info.label_errors |= IdnaErrors::LABEL_TOO_LONG;
            }

            return replace_label(dest, label_start, label_length, &label);
        }

        match punycode::encode(&label) {
            Ok(encoded) => {
                let ace = format!("{}{}", ACE_PREFIX, encoded);

                if ace.len() > MAX_LABEL_LENGTH {
                    info.label_errors |= IdnaErrors::LABEL_TOO_LONG;
                }

                replace_label(dest, label_start, label_length, &ace)
            }
            Err(error) => {
                trace!("UTS #46: метка {:?}: {}", label, error);

                info.label_errors |= IdnaErrors::PUNYCODE;
                replace_label(dest, label_start, label_length, &label)
            }
        }
    }

    /// испортить ACE-метку с ошибками: если она состоит только из LDH-символов,
    /// дописать U+FFFD, чтобы она не выглядела корректной
    fn mark_bad_ace_label(
        &self,
        dest: &mut String,
        label_start: usize,
        label_length: usize,
        to_ascii: bool,
        info: &mut IdnaInfo,
    ) -> usize
    {
        let std3 = self.options.contains(Uts46Options::USE_STD3_RULES);
        let label = &dest[label_start .. label_start + label_length];

        let mut is_ascii = true;
        let mut only_ldh = true;
        let mut result = String::with_capacity(label.len() + 3);

        result.push_str(ACE_PREFIX);

        for c in label[ACE_PREFIX.len() ..].chars() {
            if !c.is_ascii() {
                is_ascii = false;
                only_ldh = false;
                result.push(c);
            } else if c == '.' {
                info.label_errors |= IdnaErrors::LABEL_HAS_DOT;
                is_ascii = false;
                only_ldh = false;
                result.push(REPLACEMENT_CHARACTER);
            } else if is_non_ldh_dot(c as u8) {
                only_ldh = false;

                match std3 {
                    true => {
                        is_ascii = false;
                        result.push(REPLACEMENT_CHARACTER);
                    }
                    false => result.push(c),
                }
            } else {
                result.push(c);
            }
        }

        if only_ldh {
            result.push(REPLACEMENT_CHARACTER);
        } else if to_ascii && is_ascii && result.len() > MAX_LABEL_LENGTH {
            info.label_errors |= IdnaErrors::LABEL_TOO_LONG;
        }

        replace_label(dest, label_start, label_length, &result)
    }
}
