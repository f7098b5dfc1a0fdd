pub mod preprocess;
pub mod pretranslate;
pub mod selector;
pub mod session;
pub mod word_list;

pub use pretranslate::{PretranslateReport, pretranslate};
pub use selector::next_word;
pub use session::{Session, SessionState, Transition};
pub use word_list::{WordList, WordListError};

#[cfg(test)]
mod tests;
