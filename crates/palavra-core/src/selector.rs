use palavra_store::{StoreError, VocabStore};
use rand::Rng;

use crate::WordList;

/// Pick the next word to present.
///
/// The first word in list order without a stored, non-blank translation wins.
/// Once every word is resolved a uniformly random word is returned instead, so
/// review can go on indefinitely. This is a linear scan; swap in an index of
/// unresolved words if lists ever grow well past the tens of thousands.
pub fn next_word<'a, R: Rng + ?Sized>(
    words: &'a WordList,
    store: &VocabStore,
    rng: &mut R,
) -> Result<&'a str, StoreError> {
    for word in words.iter() {
        if !store.has_translation(word)? {
            return Ok(word);
        }
    }

    Ok(words.choose(rng))
}
