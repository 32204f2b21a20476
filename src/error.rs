//! Failure of the game loops.
//!
//! Game outcomes are not errors: a spawn collision ends the game normally and
//! junk commands are ignored. What's left is the radio itself failing.

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    #[error("radio transport failed: {0:?}")]
    Transport(E),
}
