//! Save data for Novella.
//!
//! A save document records which scenes the player has read and which one
//! was read last. Documents are stored as a small versioned binary
//! container (see [`codec`]).

pub mod codec;
pub mod error;
pub mod file;
pub mod scene;

pub use codec::{decode, encode, FORMAT_VERSION, MAGIC};
pub use error::{DecodeError, Result, SaveError};
pub use file::{read_save_file, write_save_file};
pub use scene::{SaveData, Scene};
