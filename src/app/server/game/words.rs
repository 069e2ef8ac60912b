use std::path::PathBuf;

use rand::seq::SliceRandom;

use crate::app::server::errors::WordSourceError;

/// Supplies the secret word for each round
pub trait WordSource {
    fn next_word(&self) -> Result<String, WordSourceError>;
}

/// Pick one of the non blank lines, trimmed
fn choose_word<'a, I>(lines: I) -> Result<String, WordSourceError>
where
    I: Iterator<Item = &'a str>,
{
    let candidates = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    candidates
        .choose(&mut rand::thread_rng())
        .map(|word| word.to_string())
        .ok_or(WordSourceError::CorpusEmpty)
}

/// Word list backed by a file with one word per line.
///
/// The file is read again for every draw.
#[derive(Clone, Debug)]
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for FileWordSource {
    fn next_word(&self) -> Result<String, WordSourceError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            WordSourceError::CorpusUnavailable {
                path: self.path.display().to_string(),
                source,
            }
        })?;

        choose_word(contents.lines())
    }
}

#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl WordSource for WordList {
    fn next_word(&self) -> Result<String, WordSourceError> {
        choose_word(self.words.iter().map(String::as_str))
    }
}
