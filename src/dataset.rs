use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::Result;

/// A sentence of words paired with their tags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub words: Vec<String>,
    pub tags: Vec<String>,
}

impl Sequence {
    pub fn push<W: Into<String>, T: Into<String>>(&mut self, word: W, tag: T) {
        self.words.push(word.into());
        self.tags.push(tag.into());
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words
            .iter()
            .zip(&self.tags)
            .map(|(w, t)| (w.as_str(), t.as_str()))
    }
}

impl<W: Into<String>, T: Into<String>> FromIterator<(W, T)> for Sequence {
    fn from_iter<I: IntoIterator<Item = (W, T)>>(iter: I) -> Self {
        let mut seq = Sequence::default();
        for (w, t) in iter {
            seq.push(w, t);
        }
        seq
    }
}

/// Tagged sequences read from the `word<TAB>tag` corpus format, one token per
/// line and a blank line after each sequence.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    pub seqs: Vec<Sequence>,
}

impl Dataset {
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut seq = Sequence::default();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                if let Some((word, tag)) = line.split_once('\t') {
                    seq.push(word, tag.trim());
                } else {
                    log::warn!("invalid line: {line}");
                }
            } else if !seq.is_empty() {
                self.seqs.push(std::mem::take(&mut seq));
            }
        }
        if !seq.is_empty() {
            self.seqs.push(seq);
        }
        Ok(())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_from(File::open(path)?)
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_items(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).sum()
    }

    /// Splits the dataset into parallel word and tag sequences.
    pub fn split_xy(&self) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
        self.seqs
            .iter()
            .map(|s| (s.words.clone(), s.tags.clone()))
            .unzip()
    }
}

impl TryFrom<File> for Dataset {
    type Error = crate::error::HmmError;

    fn try_from(value: File) -> Result<Self> {
        let mut ds = Dataset::default();
        ds.read(BufReader::new(value))?;
        Ok(ds)
    }
}

impl From<Vec<Sequence>> for Dataset {
    fn from(seqs: Vec<Sequence>) -> Self {
        Self { seqs }
    }
}
