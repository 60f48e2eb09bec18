use thiserror::Error;

use crate::libs::tad::hit::Side;

/// Failures that abort a whole classification batch.
///
/// A query TAD with hits on only one side is not an error; it is simply
/// absent from the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The same `(query_tad, query_side, target_tad_index)` key was seen
    /// with both target sides.
    #[error(
        "Malformed hit: {query_tad} {query_side} boundary reaches target TAD {target_tad_index} from both sides"
    )]
    MalformedHit {
        query_tad: String,
        query_side: Side,
        target_tad_index: i64,
    },

    /// Two target labels aligned from the same query boundary place one
    /// target TAD on both sides.
    #[error(
        "Conflicting target labels: {query_tad} {query_side} boundary hits {first} and {second}, which reach target TAD {target_tad_index} from opposite sides"
    )]
    ConflictingLabels {
        query_tad: String,
        query_side: Side,
        target_tad_index: i64,
        first: String,
        second: String,
    },

    /// Input that cannot be placed on an ordered integer TAD axis.
    #[error("Precondition violated: {0}")]
    Precondition(String),
}
