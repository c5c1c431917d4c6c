//! нормализация Unicode (NFC, NFD, NFKC, NFKD, NFKC_Casefold, FCC, FCD) и обработка доменных имён по UTS #46.
//!
//! таблицы нормализации строятся из данных Unicode при первом обращении к форме и кешируются
//! до завершения процесса.

pub use bmpset::{BmpSet, SpanCondition};
pub use codepoint::Codepoint;
pub use error::{DataError, PunycodeError, SetError, TrieError};
pub use inversion_list::InversionList;
pub use normalization::{
    instance, ComposingNormalizer, DecomposingNormalizer, FcdNormalizer, Mode, Normalizer, QuickCheck,
};
pub use trie::{Trie, TrieBuilder};
pub use uts46::{IdnaErrors, IdnaInfo, Uts46, Uts46Options};

pub mod bmpset;
pub mod data;
pub mod error;
pub mod inversion_list;
pub mod normalization;
pub mod trie;
pub mod uts46;

mod codepoint;
mod prepare;
