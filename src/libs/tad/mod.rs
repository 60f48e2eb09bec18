//! Correspondence between the TAD boundaries of two genome assemblies.
//!
//! Each boundary of a query TAD is aligned against the target genome, and every
//! hit is placed on the target TAD axis as a `(target_tad_index, target_side)`
//! pair. From these hits each query TAD is classified as:
//!
//! * **conserved** - both boundaries reach the same target TAD from opposite sides;
//! * **split** - the boundaries land in two adjacent target TADs, in either orientation;
//! * nothing, when the evidence is one-sided or inconsistent.
//!
//! # Core Components
//!
//! * [`hit`] - `Side` and `BoundaryHit`, the normalized hit table.
//! * [`label`] - Target boundary labels and their expansion into hits.
//! * [`classify`] - The per-TAD classifier.
//! * [`record`] - Correspondence records and the network rows handed to block building.
//! * [`error`] - Batch-aborting errors.

pub mod classify;
pub mod error;
pub mod hit;
pub mod label;
pub mod record;

pub use classify::{classify, Classifier, ClassifyOptions, Summary};
pub use error::ClassifyError;
pub use hit::{read_hits, BoundaryHit, Side};
pub use label::{expand_alignments, genome_of, read_alignments, RawAlignment, TargetLabel};
pub use record::{
    to_network_rows, write_network, write_records, Correspondence, CorrespondenceKind,
    CorrespondenceRecord, NetworkRow,
};
