//! DocumentStore - Abstract CRUD storage for documents.

use super::{Document, StoreError};

/// Abstract CRUD storage for documents.
///
/// Method shapes mirror a document-database client: lookups return `Option`
/// rather than erroring on a missing id, the `update*` methods apply a
/// mutation and hand back the updated document (`None` when nothing matched,
/// mutation not applied), and `remove_where` reports how many documents it
/// deleted.
///
/// Implementations must serialize individual document writes: a mutation
/// passed to `update`/`update_where` runs against a consistent snapshot of
/// one document with no concurrent writer. Nothing is guaranteed *across*
/// calls; multi-call sequences in the service layer interleave freely.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Fails if the id already exists.
    fn insert<D: Document>(&self, doc: &D) -> Result<(), StoreError>;

    /// Get a document by id. Returns None if not found.
    fn get<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError>;

    /// Find all documents matching a predicate. Order is unspecified.
    fn find<D: Document>(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<D>, StoreError>;

    /// Find the first document matching a predicate.
    fn find_one<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<D>, StoreError>;

    /// Apply a mutation to the document with this id and return the updated
    /// document. Returns None (and applies nothing) when the id does not
    /// resolve.
    fn update<D: Document>(
        &self,
        id: &str,
        apply: &dyn Fn(&mut D),
    ) -> Result<Option<D>, StoreError>;

    /// Apply a mutation to the first document matching a predicate and return
    /// the updated document. Returns None (and applies nothing) when nothing
    /// matches.
    fn update_where<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
        apply: &dyn Fn(&mut D),
    ) -> Result<Option<D>, StoreError>;

    /// Delete a document by id, returning it. Returns None if it was absent.
    fn remove<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError>;

    /// Delete every document matching a predicate, returning how many were
    /// removed.
    fn remove_where<D: Document>(&self, predicate: &dyn Fn(&D) -> bool)
        -> Result<usize, StoreError>;
}
