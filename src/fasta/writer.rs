use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{QueryFlags, QueryStore};
use crate::utils::errors::IoError;

/// Which sequence of a record to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Nucleotide,
    Protein,
}

/// Writes FASTA records, one line of sequence per record
///
/// # Examples
///
/// ```rust
/// use transannot::fasta::{SequenceKind, Writer};
/// use transannot::fasta::Reader;
/// use transannot::models::QueryFlags;
///
/// let data = b">q1\nATGACG\n";
/// let store = Reader::new(&data[..]).into_store(false).unwrap();
///
/// let mut out: Vec<u8> = vec![];
/// Writer::new(&mut out)
///     .write_store(&store, QueryFlags::empty(), SequenceKind::Nucleotide)
///     .unwrap();
/// assert_eq!(out, b">q1\nATGACG\n");
/// ```
pub struct Writer<W: Write> {
    inner: BufWriter<W>,
}

impl Writer<File> {
    /// Creates a Writer instance that writes into a File
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        match File::create(path.as_ref()) {
            Ok(file) => Ok(Self::new(file)),
            Err(err) => Err(IoError::new(&err, path.as_ref())),
        }
    }
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Writer {
            inner: BufWriter::new(writer),
        }
    }

    /// Writes a single record
    pub fn write_record(&mut self, id: &str, sequence: &str) -> Result<(), std::io::Error> {
        writeln!(self.inner, ">{}", id)?;
        writeln!(self.inner, "{}", sequence)
    }

    /// Writes every sequence whose flags contain the mask
    ///
    /// Records whose requested sequence is empty (e.g. protein output
    /// before frame selection ran) are skipped.
    pub fn write_store(
        &mut self,
        store: &QueryStore,
        mask: QueryFlags,
        kind: SequenceKind,
    ) -> Result<usize, std::io::Error> {
        let mut written = 0usize;
        for seq in store.iter() {
            if !seq.flags().contains(mask) {
                continue;
            }
            let sequence = match kind {
                SequenceKind::Nucleotide => seq.nucleotide(),
                SequenceKind::Protein => seq.protein(),
            };
            if sequence.is_empty() {
                continue;
            }
            self.write_record(seq.id(), sequence)?;
            written += 1;
        }
        self.inner.flush()?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fasta::Reader;

    #[test]
    fn test_roundtrip_preserves_sequences() {
        let data = b">q1\nATG\nACG\n>q2 desc\nTTTT\n";
        let store = Reader::new(&data[..]).into_store(false).unwrap();

        let mut out: Vec<u8> = vec![];
        Writer::new(&mut out)
            .write_store(&store, QueryFlags::empty(), SequenceKind::Nucleotide)
            .unwrap();

        let rewritten = Reader::new(&out[..]).into_store(false).unwrap();
        assert_eq!(rewritten.len(), store.len());
        for seq in store.iter() {
            assert_eq!(
                rewritten.get(seq.id()).unwrap().nucleotide(),
                seq.nucleotide()
            );
        }
    }

    #[test]
    fn test_mask_filters_records() {
        let data = b">q1\nATG\n>q2\nTTT\n";
        let mut store = Reader::new(&data[..]).into_store(false).unwrap();
        store
            .get_mut("q1")
            .unwrap()
            .flags_mut()
            .insert(QueryFlags::EXPRESSION_KEPT);

        let mut out: Vec<u8> = vec![];
        let written = Writer::new(&mut out)
            .write_store(&store, QueryFlags::EXPRESSION_KEPT, SequenceKind::Nucleotide)
            .unwrap();
        assert_eq!(written, 1);
        assert!(String::from_utf8(out).unwrap().contains(">q1"));
    }

    #[test]
    fn test_empty_protein_is_skipped() {
        let data = b">q1\nATG\n";
        let store = Reader::new(&data[..]).into_store(false).unwrap();
        let mut out: Vec<u8> = vec![];
        let written = Writer::new(&mut out)
            .write_store(&store, QueryFlags::empty(), SequenceKind::Protein)
            .unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }
}
