// Splits running text into the words the checker looks up.
//
// A word is a run of ASCII letters and apostrophes that does not start with an
// apostrophe. Runs longer than LENGTH and runs touching a digit are dropped.

use super::dictionary::LENGTH;
use std::io::{self, BufReader, Bytes, Read};

pub struct Tokenizer<R: Read> {
    bytes: Bytes<BufReader<R>>,
    word: String,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            word: String::with_capacity(LENGTH + 1),
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        self.bytes.next().transpose()
    }

    /// Discards bytes until one fails `keep`. That byte is consumed too.
    fn skip_while(&mut self, keep: impl Fn(u8) -> bool) -> io::Result<()> {
        while let Some(byte) = self.next_byte()? {
            if !keep(byte) {
                break;
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.word.clear();

        loop {
            let byte = match self.next_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(e) => return Some(Err(e)),
            };

            if byte.is_ascii_alphabetic() || (byte == b'\'' && !self.word.is_empty()) {
                self.word.push(byte as char);

                if self.word.len() > LENGTH {
                    if let Err(e) = self.skip_while(|b| b.is_ascii_alphabetic()) {
                        return Some(Err(e));
                    }
                    self.word.clear();
                }
            } else if byte.is_ascii_digit() {
                if let Err(e) = self.skip_while(|b| b.is_ascii_alphanumeric()) {
                    return Some(Err(e));
                }
                self.word.clear();
            } else if !self.word.is_empty() {
                return Some(Ok(std::mem::take(&mut self.word)));
            }
        }

        // Text ended in the middle of a word
        if self.word.is_empty() {
            None
        } else {
            Some(Ok(std::mem::take(&mut self.word)))
        }
    }
}

/// Collects every word in `text`.
pub fn words(text: &str) -> Vec<String> {
    Tokenizer::new(text.as_bytes())
        .filter_map(Result::ok)
        .collect()
}
