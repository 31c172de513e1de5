//! FASTA input and output
//!
//! The reader ingests the transcriptome into a
//! [`QueryStore`](crate::models::QueryStore); the writer renders
//! flag-masked subsets back out, e.g. the kept/removed splits of the
//! expression stage or the final `.fnn`/`.faa` results.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::{SequenceKind, Writer};
