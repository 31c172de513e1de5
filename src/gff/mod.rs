//! GFF ingest for neighbouring-gene information

mod reader;

pub use reader::Reader;
