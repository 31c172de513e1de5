use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::refdata::go_graph::{GoGraph, GoSet};
use crate::utils::errors::{DatabaseError, DatabaseKind};

/// Annotation payload of one UniProt entry
#[derive(Debug, Clone, Default)]
pub struct UniprotPayload {
    pub database_x_refs: String,
    pub comments: String,
    pub kegg: String,
    pub go_terms: GoSet,
}

/// Read-only SQL access to the UniProt mapping table
///
/// Whether a similarity-search database is a UniProt database is not
/// known up front; the similarity parser probes the first subject ids
/// against this mapping and flips the database into "UniProt mode" on
/// the first hit.
pub struct UniprotDb {
    conn: Connection,
}

impl UniprotDb {
    /// Opens the mapping database read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            DatabaseError::new(
                DatabaseKind::Uniprot,
                format!(
                    "unable to open UniProt database at {}: {}",
                    path.as_ref().display(),
                    e
                ),
            )
        })?;
        Ok(Self { conn })
    }

    /// Wraps an existing connection (used by tests)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Looks up a subject sequence id
    ///
    /// Ids of the form `sp|P01111|RASN_HUMAN` are reduced to their
    /// accession before the query.
    pub fn entry(
        &self,
        sseqid: &str,
        go_graph: &GoGraph,
    ) -> Result<Option<UniprotPayload>, DatabaseError> {
        let accession = accession_of(sseqid);
        let row = self
            .conn
            .query_row(
                "SELECT xrefs, comments, kegg, go_terms FROM uniprot WHERE accession = ?1",
                [accession],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| DatabaseError::new(DatabaseKind::Uniprot, e.to_string()))?;

        Ok(row.map(|(xrefs, comments, kegg, go_list)| UniprotPayload {
            database_x_refs: xrefs,
            comments,
            kegg,
            go_terms: go_graph.format_go_delim(&go_list, ','),
        }))
    }
}

/// Reduces a subject id to its UniProt accession
///
/// `sp|P01111|RASN_HUMAN` and `tr|A0A024R1R8|A0A024R1R8_HUMAN` carry
/// the accession in the second `|`-field; plain accessions pass
/// through.
fn accession_of(sseqid: &str) -> &str {
    let mut fields = sseqid.split('|');
    match (fields.next(), fields.next()) {
        (Some(_), Some(accession)) if !accession.is_empty() => accession,
        _ => sseqid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_db() -> UniprotDb {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE uniprot (
                accession TEXT PRIMARY KEY,
                xrefs TEXT,
                comments TEXT,
                kegg TEXT,
                go_terms TEXT
            );
            INSERT INTO uniprot VALUES (
                'P01111',
                'RefSeq:NP_002515.1',
                'Ras proteins bind GDP/GTP',
                'hsa:4893',
                'GO:0005737'
            );",
        )
        .unwrap();
        UniprotDb::from_connection(conn)
    }

    #[test]
    fn test_accession_extraction() {
        assert_eq!(accession_of("sp|P01111|RASN_HUMAN"), "P01111");
        assert_eq!(accession_of("P01111"), "P01111");
        assert_eq!(accession_of("tr|A0A024R1R8|X_HUMAN"), "A0A024R1R8");
    }

    #[test]
    fn test_entry_lookup() {
        let db = test_db();
        let go_graph = GoGraph::new(HashMap::new());
        let payload = db.entry("sp|P01111|RASN_HUMAN", &go_graph).unwrap().unwrap();
        assert_eq!(payload.kegg, "hsa:4893");
        assert_eq!(payload.go_terms.len(), 1);
        assert!(db.entry("sp|Q99999|NOPE", &go_graph).unwrap().is_none());
    }
}
