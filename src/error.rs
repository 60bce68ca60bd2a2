use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::checker::dictionary::LENGTH;

/// Reasons a dictionary load can stop early.
///
/// Entries inserted before the failure stay in the table.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The word list could not be opened.
    #[error("could not open dictionary {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the word list failed midway.
    #[error("failed to read dictionary: {0}")]
    Read(#[from] io::Error),

    /// Memory for a new entry could not be reserved.
    #[error("allocation failure while loading word {position}")]
    AllocationFailure { position: usize },

    #[error("word {word:?} is {len} bytes long, limit is {max}", max = LENGTH)]
    WordTooLong { word: String, len: usize },

    #[error("word {position} is not valid UTF-8")]
    InvalidEncoding { position: usize },
}

impl DictionaryError {
    /// True when the word list could not be read at all.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            DictionaryError::SourceUnavailable { .. } | DictionaryError::Read(_)
        )
    }
}
