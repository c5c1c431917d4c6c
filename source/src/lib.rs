#[macro_use]
extern crate lazy_static;

mod casefold;
mod composition;
mod decomposition;
mod unicode;
mod uts46;

pub use unicode::assigned_codepoints;
pub use unicode::bidi_class_ranges;
pub use unicode::combining_class;
pub use unicode::combining_class_ranges;
pub use unicode::is_hangul_syllable;
pub use unicode::joining_type_ranges;
pub use unicode::mark_ranges;
pub use unicode::script_ranges;
pub use unicode::IdnaScript;

pub use decomposition::canonical_order;
pub use decomposition::CANONICAL_DECOMPOSITIONS;
pub use decomposition::COMPATIBILITY_DECOMPOSITIONS;

pub use composition::COMBINES_BACKWARDS;
pub use composition::COMPOSITION_PAIRS;

pub use casefold::NFKC_CASEFOLD;

pub use uts46::UTS46_DISALLOWED;
pub use uts46::UTS46_MAPPINGS;
