//! подготовка таблиц нормализации и свойств IDNA из данных Unicode.
//!
//! таблицы строятся один раз при первом обращении к форме нормализации (см. [`crate::data`]).

mod composition;
mod encode;
mod idna;

use std::collections::HashMap;

use log::debug;
use unicode_normalization_source::{
    CANONICAL_DECOMPOSITIONS, COMPATIBILITY_DECOMPOSITIONS, NFKC_CASEFOLD, UTS46_MAPPINGS,
};

use crate::data::NormalizerData;
use crate::error::DataError;

pub use idna::idna_properties;

/// источник отображения кодпоинтов для таблиц нормализации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form
{
    /// каноническая декомпозиция (NFC, NFD, FCC, FCD)
    Canonical,
    /// декомпозиция совместимости (NFKC, NFKD)
    Compatibility,
    /// NFKC_Casefold
    CompatibilityCaseFold,
    /// отображение UTS #46
    Uts46,
}

impl Form
{
    /// название формы, по которому её таблицы доступны в кеше
    pub fn name(&self) -> &'static str
    {
        match self {
            Form::Canonical => "nfc",
            Form::Compatibility => "nfkc",
            Form::CompatibilityCaseFold => "nfkc_cf",
            Form::Uts46 => "uts46",
        }
    }

    /// отображения кодпоинтов в декомпозированном, канонически упорядоченном виде
    pub fn mappings(&self) -> &'static HashMap<u32, Vec<u32>>
    {
        match self {
            Form::Canonical => &CANONICAL_DECOMPOSITIONS,
            Form::Compatibility => &COMPATIBILITY_DECOMPOSITIONS,
            Form::CompatibilityCaseFold => &NFKC_CASEFOLD,
            Form::Uts46 => &UTS46_MAPPINGS,
        }
    }
}

/// построить таблицы формы нормализации
pub fn normalizer_data(form: Form) -> Result<NormalizerData, DataError>
{
    debug!("подготовка таблиц нормализации {}", form.name());

    let (compositions, composition_index) = composition::compositions()?;
    let encoded = encode::encode(form)?;

    let data = NormalizerData::new(
        form.name(),
        encoded.values,
        encoded.expansions,
        composition_index,
        compositions,
    );

    let ((index_size, data_size), expansions_size, compositions_size) = data.sizes();

    debug!(
        "{}: индекс {}, данные {}, расширения {}, композиции {}",
        form.name(),
        index_size,
        data_size,
        expansions_size,
        compositions_size
    );

    Ok(data)
}
