use crate::error::DictionaryError;
use log::{debug, warn};
use std::collections::TryReserveError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;

/// Maximum length of a dictionary word, in bytes.
pub const LENGTH: usize = 45;

/// Bucket count used by `WordTable::default()`.
pub const DEFAULT_BUCKETS: NonZeroUsize = match NonZeroUsize::new(26) {
    Some(n) => n,
    None => panic!("bucket count must be non-zero"),
};

#[derive(Debug, Clone)]
struct Entry {
    word: Box<str>,
    next: Option<usize>,
}

/// Fixed-size chained hash table of dictionary words.
///
/// Entries live in one arena; each bucket stores the arena index of its
/// chain head and every entry links to the next one in the same bucket.
/// New words are inserted at the head of their chain.
#[derive(Debug, Clone)]
pub struct WordTable {
    heads: Vec<Option<usize>>,
    entries: Vec<Entry>,
    loaded: bool,
}

impl Default for WordTable {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

impl WordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(buckets: NonZeroUsize) -> Self {
        Self {
            heads: vec![None; buckets.get()],
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Bucket index of `word` in this table.
    pub fn hash(&self, word: &str) -> usize {
        bucket_index(word, self.bucket_count())
    }

    /// Returns true if `word` is in the dictionary, ignoring ASCII case.
    ///
    /// Empty words and words longer than [`LENGTH`] are never stored, so they
    /// are rejected without touching the table.
    pub fn check(&self, word: &str) -> bool {
        if word.is_empty() || word.len() > LENGTH {
            return false;
        }

        self.chain(self.hash(word))
            .any(|stored| stored.eq_ignore_ascii_case(word))
    }

    /// Loads the word list at `path`, returning true once it is fully read.
    ///
    /// On failure the reason is logged and entries read so far are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Loads the word list at `path`, returning the number of words added.
    pub fn try_load(&mut self, path: impl AsRef<Path>) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DictionaryError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let added = self.load_from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} words from {} ({} total)",
            added,
            path.display(),
            self.size()
        );

        Ok(added)
    }

    /// Loads whitespace-separated words from `reader` until it is exhausted.
    pub fn load_from_reader<R: BufRead>(&mut self, mut reader: R) -> Result<usize, DictionaryError> {
        self.loaded = true;

        let mut token = Vec::with_capacity(LENGTH + 1);
        let mut added = 0;

        while read_token(&mut reader, &mut token)? {
            let position = added + 1;

            if token.len() > LENGTH {
                return Err(DictionaryError::WordTooLong {
                    word: String::from_utf8_lossy(&token).into_owned(),
                    len: token.len(),
                });
            }

            let word = std::str::from_utf8(&token)
                .map_err(|_| DictionaryError::InvalidEncoding { position })?;

            self.insert(word)
                .map_err(|_| DictionaryError::AllocationFailure { position })?;
            added += 1;
        }

        Ok(added)
    }

    /// Number of words currently stored, duplicates included.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry and empties every bucket. Always succeeds.
    pub fn unload(&mut self) -> bool {
        self.entries = Vec::new();
        self.heads.fill(None);
        self.loaded = false;
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn buckets(&self) -> usize {
        self.heads.len()
    }

    /// Chain length of every bucket, in bucket order.
    pub fn bucket_lengths(&self) -> Vec<usize> {
        (0..self.heads.len())
            .map(|bucket| self.chain(bucket).count())
            .collect()
    }

    /// Average number of entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.size() as f64 / self.buckets() as f64
    }

    /// All stored words, bucket by bucket, each chain from head to tail.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.heads.len()).flat_map(move |bucket| self.chain(bucket))
    }

    fn bucket_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.heads.len()).unwrap_or(DEFAULT_BUCKETS)
    }

    fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            entries: &self.entries,
            cursor: self.heads[bucket],
        }
    }

    fn insert(&mut self, word: &str) -> Result<(), TryReserveError> {
        self.entries.try_reserve(1)?;
        let mut owned = String::new();
        owned.try_reserve_exact(word.len())?;
        owned.push_str(word);

        let bucket = self.hash(word);
        let index = self.entries.len();
        let next = self.heads[bucket].replace(index);
        self.entries.push(Entry {
            word: owned.into_boxed_str(),
            next,
        });

        Ok(())
    }
}

struct Chain<'a> {
    entries: &'a [Entry],
    cursor: Option<usize>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = &self.entries[self.cursor?];
        self.cursor = entry.next;
        Some(&*entry.word)
    }
}

/// Hashes `word` into `[0, buckets)`.
///
/// Sums `upper(a) + upper(b) - 'A'` over every adjacent pair of bytes, so a
/// one-byte word lands in bucket 0. The spread is poor but stable and
/// ignores ASCII case.
pub fn bucket_index(word: &str, buckets: NonZeroUsize) -> usize {
    let sum: i64 = word
        .as_bytes()
        .windows(2)
        .map(|pair| {
            i64::from(pair[0].to_ascii_uppercase()) + i64::from(pair[1].to_ascii_uppercase())
                - i64::from(b'A')
        })
        .sum();

    sum.rem_euclid(buckets.get() as i64) as usize
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Reads the next whitespace-delimited token into `token`.
/// Returns false once the reader is exhausted.
fn read_token<R: BufRead>(reader: &mut R, token: &mut Vec<u8>) -> io::Result<bool> {
    token.clear();

    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if available.is_empty() {
            return Ok(!token.is_empty());
        }

        let mut used = 0;
        let mut complete = false;
        for &byte in available {
            used += 1;
            if is_separator(byte) {
                if !token.is_empty() {
                    complete = true;
                    break;
                }
            } else {
                token.push(byte);
            }
        }

        reader.consume(used);
        if complete {
            return Ok(true);
        }
    }
}
