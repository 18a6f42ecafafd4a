// Record lifecycle: conversation ingest -> tagged record -> persisted.
// Records are created once per completed conversation and mutated at most
// once afterwards, to attach a generated illustration.

pub mod handlers;
pub mod ingest;
