//! Lookup core: pure tab-coordinator state machine, word heuristics and URL helpers.
mod dictionary;
mod effect;
mod lemma;
mod msg;
mod selection;
mod state;
mod update;
mod view_model;

pub use dictionary::{DictionarySite, DEFAULT_DICTIONARY_BASE};
pub use effect::Effect;
pub use lemma::derive_base_form;
pub use msg::Msg;
pub use selection::SelectionState;
pub use state::{CoordinatorState, LookupOutcome, ManagedTab, TabId, WindowId};
pub use update::update;
pub use view_model::CoordinatorView;
