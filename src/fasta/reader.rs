use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::models::{QuerySequence, QueryStore};
use crate::utils::errors::{IoError, ParseError};

/// Number of sequence lines sampled for the protein/nucleotide check
const DETECT_LINE_COUNT: usize = 100;
/// More than this many non-ACGTN residues in the sample means protein
const DETECT_DEVIATIONS: usize = 2;

/// Reads a FASTA transcriptome into a [`QueryStore`]
///
/// A `>` in column 0 starts a record; subsequent lines are
/// whitespace-stripped and appended until the next `>`. Duplicate ids
/// are fatal.
///
/// # Examples
///
/// ```rust
/// use transannot::fasta::Reader;
///
/// let data = b">q1 some description\nATGACGTAA\n>q2\nTTTT\nGGGG\n";
/// let store = Reader::new(&data[..]).into_store(false).unwrap();
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.get("q1").unwrap().nucleotide(), "ATGACGTAA");
/// assert_eq!(store.get("q2").unwrap().nucleotide(), "TTTTGGGG");
/// ```
pub struct Reader<R> {
    inner: BufReader<R>,
    source: String,
}

impl Reader<File> {
    /// Creates a Reader instance that reads from a File
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        match File::open(path.as_ref()) {
            Ok(file) => {
                let mut reader = Self::new(file);
                reader.source = path.as_ref().display().to_string();
                Ok(reader)
            }
            Err(err) => Err(IoError::new(&err, path.as_ref())),
        }
    }
}

impl<R: std::io::Read> Reader<R> {
    pub fn new(reader: R) -> Self {
        Reader {
            inner: BufReader::new(reader),
            source: "<fasta>".to_string(),
        }
    }

    /// Parses every record and builds the sequence store
    ///
    /// The sequence kind (protein vs nucleotide) is detected from the
    /// first sampled lines before the store is built, so every record
    /// of one transcriptome shares the same kind.
    pub fn into_store(self, no_trim: bool) -> Result<QueryStore, ParseError> {
        let source = self.source.clone();
        let records = self.records()?;
        if records.is_empty() {
            return Err(ParseError::new(source, 0, "Input transcriptome is empty"));
        }

        let is_protein = detect_protein(records.iter().flat_map(|r| r.lines.iter()));
        debug!(
            "detected {} input with {} records",
            if is_protein { "protein" } else { "nucleotide" },
            records.len()
        );

        let mut store = QueryStore::with_capacity(records.len(), is_protein);
        for record in records {
            let id = trim_header(&record.header, no_trim);
            if id.is_empty() {
                return Err(ParseError::new(
                    &source,
                    record.line,
                    "FASTA record with empty header",
                ));
            }
            let sequence: String = record
                .lines
                .iter()
                .map(|l| l.split_whitespace().collect::<String>())
                .collect();
            store
                .insert(QuerySequence::new(id, sequence, is_protein))
                .map_err(|e| ParseError::new(&source, record.line, e.reason))?;
        }
        Ok(store)
    }

    fn records(mut self) -> Result<Vec<RawRecord>, ParseError> {
        let mut records: Vec<RawRecord> = vec![];
        let mut line = String::new();
        let mut line_no = 0usize;
        loop {
            line.clear();
            let read = self
                .inner
                .read_line(&mut line)
                .map_err(|e| ParseError::new(&self.source, line_no, e))?;
            if read == 0 {
                break;
            }
            line_no += 1;
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('>') {
                records.push(RawRecord {
                    header: trimmed.to_string(),
                    lines: vec![],
                    line: line_no,
                });
            } else {
                match records.last_mut() {
                    Some(record) => record.lines.push(trimmed.to_string()),
                    None => {
                        return Err(ParseError::new(
                            &self.source,
                            line_no,
                            "Sequence data before the first FASTA header",
                        ))
                    }
                }
            }
        }
        Ok(records)
    }
}

struct RawRecord {
    header: String,
    lines: Vec<String>,
    line: usize,
}

/// Samples the first sequence lines and counts non-nucleotide residues
fn detect_protein<'a, I: Iterator<Item = &'a String>>(lines: I) -> bool {
    let mut deviations = 0usize;
    for line in lines.take(DETECT_LINE_COUNT) {
        for c in line.chars() {
            if !matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N') {
                deviations += 1;
            }
        }
    }
    deviations > DETECT_DEVIATIONS
}

/// Extracts the sequence id from a FASTA header line
///
/// With trimming, the id is the substring between `>` and the first
/// whitespace; without, the full header with whitespace removed.
fn trim_header(header: &str, no_trim: bool) -> String {
    let body = header.trim_start_matches('>');
    if no_trim {
        body.split_whitespace().collect()
    } else {
        body.split_whitespace().next().unwrap_or("").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_nucleotide() {
        let data = b">q1\nATGACGTAAN\n>q2\nacgtacgt\n";
        let store = Reader::new(&data[..]).into_store(false).unwrap();
        assert!(!store.is_protein());
    }

    #[test]
    fn test_detects_protein() {
        let data = b">p1\nMKTWQLLRSPF\n>p2\nMHHRRW\n";
        let store = Reader::new(&data[..]).into_store(false).unwrap();
        assert!(store.is_protein());
        assert_eq!(store.get("p1").unwrap().protein(), "MKTWQLLRSPF");
    }

    #[test]
    fn test_header_trimming() {
        let data = b">q1 len=300 path=[1]\nATG\n";
        let trimmed = Reader::new(&data[..]).into_store(false).unwrap();
        assert!(trimmed.get("q1").is_some());

        let untrimmed = Reader::new(&data[..]).into_store(true).unwrap();
        assert!(untrimmed.get("q1len=300path=[1]").is_some());
    }

    #[test]
    fn test_duplicate_header_is_fatal() {
        let data = b">q1\nATG\n>q1\nTTT\n";
        assert!(Reader::new(&data[..]).into_store(false).is_err());
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let data = b"";
        assert!(Reader::new(&data[..]).into_store(false).is_err());
    }

    #[test]
    fn test_sequence_before_header_is_fatal() {
        let data = b"ATG\n>q1\nTTT\n";
        assert!(Reader::new(&data[..]).into_store(false).is_err());
    }

    #[test]
    fn test_multiline_sequences_are_joined() {
        let data = b">q1\nATG\nACG\nTAA\n";
        let store = Reader::new(&data[..]).into_store(false).unwrap();
        assert_eq!(store.get("q1").unwrap().nucleotide(), "ATGACGTAA");
        assert_eq!(store.get("q1").unwrap().length_bp(), 9);
    }
}
