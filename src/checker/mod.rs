pub mod dictionary;
pub mod tokenizer;

use crate::{CheckResult, Config, Report, Timings};
use anyhow::{Context, Result};
use dictionary::WordTable;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokenizer::Tokenizer;
use walkdir::WalkDir;

/// Drives one run: load the dictionary, check texts, then size and unload.
pub struct SpellChecker {
    table: WordTable,
    timings: Timings,
    words_misspelled: usize,
    words_in_text: usize,
}

impl SpellChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let buckets = NonZeroUsize::new(config.buckets).context("Bucket count must be at least 1")?;
        let mut table = WordTable::with_buckets(buckets);

        let started = Instant::now();
        let loaded = table.try_load(&config.dictionary);
        let load = started.elapsed();

        loaded.with_context(|| format!("Could not load {}.", config.dictionary.display()))?;

        info!(
            "Loaded {} words from {} into {} buckets",
            table.size(),
            config.dictionary.display(),
            table.buckets()
        );

        Ok(Self {
            table,
            timings: Timings {
                load,
                ..Default::default()
            },
            words_misspelled: 0,
            words_in_text: 0,
        })
    }

    pub fn check_file(&mut self, file_path: &Path) -> Result<CheckResult> {
        let file = File::open(file_path)
            .with_context(|| format!("Could not open {}.", file_path.display()))?;

        let mut result = self
            .check_reader(file)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;
        result.file = file_path.to_path_buf();

        debug!(
            "{}: {} words, {} misspelled",
            file_path.display(),
            result.words_in_text,
            result.misspelled.len()
        );

        Ok(result)
    }

    /// Checks every word read from `reader`, timing each lookup.
    pub fn check_reader<R: Read>(&mut self, reader: R) -> Result<CheckResult> {
        let mut result = CheckResult::default();
        let mut check_time = Duration::ZERO;

        for word in Tokenizer::new(reader) {
            let word = word?;
            result.words_in_text += 1;

            let started = Instant::now();
            let known = self.table.check(&word);
            check_time += started.elapsed();

            if !known {
                result.misspelled.push(word);
            }
        }

        self.timings.check += check_time;
        self.words_in_text += result.words_in_text;
        self.words_misspelled += result.misspelled.len();

        Ok(result)
    }

    /// Measures `size` and `unload` and returns the totals for the run.
    pub fn finish(mut self) -> Report {
        let started = Instant::now();
        let words_in_dictionary = self.table.size();
        self.timings.size = started.elapsed();

        let started = Instant::now();
        self.table.unload();
        self.timings.unload = started.elapsed();

        Report {
            words_misspelled: self.words_misspelled,
            words_in_dictionary,
            words_in_text: self.words_in_text,
            timings: self.timings,
        }
    }
}

/// Expands directories into the files beneath them, sorted by name.
pub fn collect_texts(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut texts = Vec::new();

    for path in paths {
        if !path.is_dir() {
            texts.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk directory: {}", path.display()))?;
            if entry.file_type().is_file() {
                texts.push(entry.into_path());
            }
        }
    }

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_for(dictionary: PathBuf) -> Config {
        Config {
            dictionary,
            ..Default::default()
        }
    }

    #[test]
    fn test_check_reader_counts() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("small");
        fs::write(&dict_path, "the\ncat\nsat\n").unwrap();

        let mut checker = SpellChecker::new(&config_for(dict_path)).unwrap();
        let result = checker
            .check_reader("The cat sat on the mat. Teh cat!".as_bytes())
            .unwrap();

        assert_eq!(result.words_in_text, 8);
        assert_eq!(result.misspelled, vec!["on", "mat", "Teh"]);

        let report = checker.finish();
        assert_eq!(report.words_misspelled, 3);
        assert_eq!(report.words_in_dictionary, 3);
        assert_eq!(report.words_in_text, 8);
    }

    #[test]
    fn test_totals_accumulate_across_texts() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("small");
        fs::write(&dict_path, "a b").unwrap();

        let mut checker = SpellChecker::new(&config_for(dict_path)).unwrap();
        checker.check_reader("a c".as_bytes()).unwrap();
        checker.check_reader("b d e".as_bytes()).unwrap();

        let report = checker.finish();
        assert_eq!(report.words_in_text, 5);
        assert_eq!(report.words_misspelled, 3);
    }

    #[test]
    fn test_missing_dictionary() {
        let err = SpellChecker::new(&config_for(PathBuf::from("/nonexistent/dictionary")))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Could not load /nonexistent/dictionary.");
    }

    #[test]
    fn test_zero_buckets_rejected() {
        let config = Config {
            buckets: 0,
            ..Default::default()
        };
        assert!(SpellChecker::new(&config).is_err());
    }

    #[test]
    fn test_collect_texts_walks_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("nested").join("a.txt"), "a").unwrap();
        let single = dir.path().join("single.txt");

        let texts = collect_texts(&[dir.path().to_path_buf(), single.clone()]).unwrap();
        assert_eq!(
            texts,
            vec![
                dir.path().join("b.txt"),
                dir.path().join("nested").join("a.txt"),
                single,
            ]
        );
    }
}
