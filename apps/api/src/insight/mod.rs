// The Insight Engine: heuristics over the persisted record corpus.
// Extraction, aggregation, weekly bucketing, and recommendation are pure
// synchronous functions — every report/series/list is re-derived per call.

pub mod aggregator;
pub mod dictionary;
pub mod extractor;
pub mod handlers;
pub mod recommender;
pub mod weekly;
