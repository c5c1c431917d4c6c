use log::debug;
use unicode_normalization_source::{bidi_class_ranges, joining_type_ranges, mark_ranges, script_ranges, IdnaScript};

use crate::error::DataError;
use crate::trie::TrieBuilder;
use crate::uts46::properties::*;

/// свойства кодпоинтов, используемые проверками BiDi, CONTEXTJ и CONTEXTO
pub fn idna_properties() -> Result<IdnaProperties, DataError>
{
    debug!("подготовка свойств IDNA");

    let mut builder = TrieBuilder::new(0u16, 0u16);

    for (range, bidi_class) in bidi_class_ranges() {
        builder.update_range(range, |v| v | (bidi_class as u16 & BIDI_CLASS_MASK));
    }

    for (range, joining_type) in joining_type_ranges() {
        builder.update_range(range, |v| v | ((joining_type as u16) << JOINING_TYPE_SHIFT));
    }

    for range in mark_ranges() {
        builder.update_range(range, |v| v | MARK);
    }

    for (script, value) in [
        (IdnaScript::Greek, Script::Greek),
        (IdnaScript::Hebrew, Script::Hebrew),
        (IdnaScript::Japanese, Script::Japanese),
    ] {
        for range in script_ranges(script) {
            builder.update_range(range, |v| v | ((value as u16) << SCRIPT_SHIFT));
        }
    }

    Ok(IdnaProperties::new(builder.build()?))
}
