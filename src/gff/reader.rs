use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::models::QueryStore;
use crate::utils::errors::{IoError, ParseError};

/// Feature-column values that identify a transcript line
const TRANSCRIPT_TAGS: [&str; 2] = ["mRNA", "transcript"];
/// Column index of the feature type
const FEATURE_COL: usize = 2;

/// Reads a GFF file and links neighbouring transcripts
///
/// Only `mRNA`/`transcript` lines are considered; the record id is
/// taken between `ID=` and `;`. Consecutive records establish the
/// upstream/downstream links used by the horizontal-gene-transfer
/// stage.
///
/// # Examples
///
/// ```rust
/// use transannot::fasta;
/// use transannot::gff::Reader;
///
/// let fasta = b">t1\nATG\n>t2\nTTT\n";
/// let mut store = fasta::Reader::new(&fasta[..]).into_store(false).unwrap();
///
/// let gff = b"\
/// chr1\tsrc\tmRNA\t1\t90\t.\t+\t.\tID=t1;Parent=g1\n\
/// chr1\tsrc\texon\t1\t90\t.\t+\t.\tID=t1.e1\n\
/// chr1\tsrc\tmRNA\t100\t190\t.\t+\t.\tID=t2;Parent=g2\n";
/// let linked = Reader::new(&gff[..]).link_neighbours(&mut store).unwrap();
///
/// assert_eq!(linked, 1);
/// let t1 = store.idx_of("t1").unwrap();
/// assert_eq!(store.get("t2").unwrap().upstream(), Some(t1));
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
            source: "<gff>".to_string(),
        }
    }

    /// Walks the file and sets neighbour indices on the store
    ///
    /// Returns the number of links established. A transcript id that
    /// is missing from the store is fatal; transcript lines without a
    /// parseable id are skipped.
    pub fn link_neighbours(mut self, store: &mut QueryStore) -> Result<u64, ParseError> {
        let mut previous: Option<u32> = None;
        let mut linked: u64 = 0;
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
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let columns: Vec<&str> = trimmed.split('\t').collect();
            if columns.len() <= FEATURE_COL {
                continue;
            }
            let feature = columns[FEATURE_COL];
            if !TRANSCRIPT_TAGS.iter().any(|tag| feature.contains(tag)) {
                continue;
            }

            let transcript_id = match parse_id(trimmed) {
                Some(id) => id,
                None => {
                    warn!("GFF transcript line without ID= tag (line {})", line_no);
                    continue;
                }
            };

            let current = match store.idx_of(&transcript_id) {
                Some(idx) => idx,
                None => {
                    return Err(ParseError::new(
                        &self.source,
                        line_no,
                        format!(
                            "Unable to find sequence from the GFF file in input transcriptome: {}",
                            transcript_id
                        ),
                    ))
                }
            };

            if let Some(prev) = previous {
                store.by_idx_mut(prev).unwrap().set_downstream(current);
                store.by_idx_mut(current).unwrap().set_upstream(prev);
                linked += 1;
            }
            previous = Some(current);
        }

        if linked == 0 {
            warn!("No neighbouring sequences found while parsing GFF");
        }
        debug!("GFF parsing complete, {} links established", linked);
        Ok(linked)
    }
}

/// Extracts the transcript id between `ID=` and the following `;`
fn parse_id(line: &str) -> Option<String> {
    let start = line.find("ID=")? + 3;
    let rest = &line[start..];
    let end = rest.find(';').unwrap_or(rest.len());
    let id = rest[..end].trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fasta;

    fn store3() -> QueryStore {
        let data = b">a\nATG\n>b\nTTT\n>c\nGGG\n";
        fasta::Reader::new(&data[..]).into_store(false).unwrap()
    }

    fn gff_line(feature: &str, id: &str) -> String {
        format!("chr1\tsrc\t{}\t1\t90\t.\t+\t.\tID={};x=y", feature, id)
    }

    #[test]
    fn test_links_consecutive_transcripts() {
        let mut store = store3();
        let gff = format!(
            "{}\n{}\n{}\n",
            gff_line("mRNA", "a"),
            gff_line("transcript", "b"),
            gff_line("mRNA", "c")
        );
        let linked = Reader::new(gff.as_bytes())
            .link_neighbours(&mut store)
            .unwrap();
        assert_eq!(linked, 2);

        let (a, b, c) = (
            store.idx_of("a").unwrap(),
            store.idx_of("b").unwrap(),
            store.idx_of("c").unwrap(),
        );
        assert_eq!(store.get("a").unwrap().downstream(), Some(b));
        assert_eq!(store.get("b").unwrap().upstream(), Some(a));
        assert_eq!(store.get("b").unwrap().downstream(), Some(c));
        assert_eq!(store.get("c").unwrap().upstream(), Some(b));
        assert_eq!(store.get("a").unwrap().upstream(), None);
        assert_eq!(store.get("c").unwrap().downstream(), None);
    }

    #[test]
    fn test_non_transcript_lines_are_ignored() {
        let mut store = store3();
        let gff = format!(
            "{}\n{}\n{}\n",
            gff_line("mRNA", "a"),
            gff_line("exon", "zz"),
            gff_line("mRNA", "b")
        );
        let linked = Reader::new(gff.as_bytes())
            .link_neighbours(&mut store)
            .unwrap();
        assert_eq!(linked, 1);
    }

    #[test]
    fn test_unknown_transcript_is_fatal() {
        let mut store = store3();
        let gff = gff_line("mRNA", "missing");
        assert!(Reader::new(gff.as_bytes())
            .link_neighbours(&mut store)
            .is_err());
    }
}
