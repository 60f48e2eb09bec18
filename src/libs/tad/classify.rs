use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::libs::tad::error::ClassifyError;
use crate::libs::tad::hit::{BoundaryHit, Side};
use crate::libs::tad::record::{Correspondence, CorrespondenceRecord};

#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Largest index shift tried by the split tests. A shift is only tried
    /// when every smaller shift found nothing.
    pub max_shift: i64,
    /// Classify query TADs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_shift: 2,
            parallel: false,
        }
    }
}

/// Counts collected during one classification batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub query_tads: usize,
    /// TADs with hits on one side only.
    pub skipped: usize,
    /// TADs with hits on both sides but no correspondence.
    pub unresolved: usize,
    pub conserved: usize,
    pub split: usize,
}

/// Left and right boundary hits of one query TAD, as `(target_tad_index, target_side)`.
#[derive(Debug, Default)]
struct TadHits {
    left: BTreeSet<(i64, Side)>,
    right: BTreeSet<(i64, Side)>,
}

impl TadHits {
    fn left_indices(&self, target_side: Side) -> BTreeSet<i64> {
        indices_on(&self.left, target_side)
    }

    fn right_indices(&self, target_side: Side) -> BTreeSet<i64> {
        indices_on(&self.right, target_side)
    }
}

fn indices_on(hits: &BTreeSet<(i64, Side)>, target_side: Side) -> BTreeSet<i64> {
    hits.iter()
        .filter(|(_, side)| *side == target_side)
        .map(|(index, _)| *index)
        .collect()
}

pub struct Classifier {
    opt: ClassifyOptions,
}

impl Classifier {
    pub fn new(opt: ClassifyOptions) -> Self {
        Self { opt }
    }

    pub fn classify(&self, hits: &[BoundaryHit]) -> Result<Vec<CorrespondenceRecord>, ClassifyError> {
        Ok(self.classify_with_summary(hits)?.0)
    }

    /// Classifies every query TAD in `hits`.
    ///
    /// The whole batch is validated before any TAD is classified, so an
    /// error never comes with a partial result. Records are returned sorted
    /// by query TAD, then by correspondence.
    pub fn classify_with_summary(
        &self,
        hits: &[BoundaryHit],
    ) -> Result<(Vec<CorrespondenceRecord>, Summary), ClassifyError> {
        if self.opt.max_shift < 1 {
            return Err(ClassifyError::Precondition(format!(
                "max_shift must be at least 1, got {}",
                self.opt.max_shift
            )));
        }
        validate(hits, self.opt.max_shift)?;

        let groups: Vec<(&str, TadHits)> = partition(hits).into_iter().collect();
        let mut summary = Summary {
            query_tads: groups.len(),
            ..Default::default()
        };

        let max_shift = self.opt.max_shift;
        let resolve = |(tad, tad_hits): &(&str, TadHits)| -> Option<BTreeSet<Correspondence>> {
            if tad_hits.left.is_empty() || tad_hits.right.is_empty() {
                tracing::debug!(query_tad = *tad, "one-sided boundary hits, skipped");
                return None;
            }
            Some(classify_tad(tad_hits, max_shift))
        };
        let resolved: Vec<Option<BTreeSet<Correspondence>>> = if self.opt.parallel {
            groups.par_iter().map(resolve).collect()
        } else {
            groups.iter().map(resolve).collect()
        };

        let mut records = vec![];
        for ((tad, _), found) in groups.iter().zip(resolved) {
            let found = match found {
                Some(found) => found,
                None => {
                    summary.skipped += 1;
                    continue;
                }
            };
            if found.is_empty() {
                summary.unresolved += 1;
            }
            for correspondence in found {
                match correspondence {
                    Correspondence::Conserved(_) => summary.conserved += 1,
                    Correspondence::Split(_, _) => summary.split += 1,
                }
                records.push(CorrespondenceRecord {
                    query_tad: tad.to_string(),
                    correspondence,
                });
            }
        }

        Ok((records, summary))
    }
}

/// Classifies with the default options.
///
/// ```
/// use tcbf::libs::tad::classify::classify;
/// use tcbf::libs::tad::hit::{BoundaryHit, Side};
/// use tcbf::libs::tad::record::CorrespondenceRecord;
///
/// let hits = vec![
///     BoundaryHit::new("Q1", Side::Left, 3, Side::Left),
///     BoundaryHit::new("Q1", Side::Right, 3, Side::Right),
/// ];
/// let records = classify(&hits).unwrap();
/// assert_eq!(records, vec![CorrespondenceRecord::conserved("Q1", 3)]);
/// ```
pub fn classify(hits: &[BoundaryHit]) -> Result<Vec<CorrespondenceRecord>, ClassifyError> {
    Classifier::new(ClassifyOptions::default()).classify(hits)
}

fn validate(hits: &[BoundaryHit], max_shift: i64) -> Result<(), ClassifyError> {
    let mut seen: HashMap<(&str, Side, i64), Side> = HashMap::new();
    for hit in hits {
        let index = hit.target_tad_index;
        if index.checked_add(max_shift).is_none() || index.checked_sub(max_shift).is_none() {
            return Err(ClassifyError::Precondition(format!(
                "Target TAD index {} of {} leaves no room for adjacency shifts",
                index, hit.query_tad
            )));
        }

        match seen.entry((hit.query_tad.as_str(), hit.query_side, index)) {
            Entry::Occupied(e) => {
                if *e.get() != hit.target_side {
                    return Err(ClassifyError::MalformedHit {
                        query_tad: hit.query_tad.clone(),
                        query_side: hit.query_side,
                        target_tad_index: index,
                    });
                }
            }
            Entry::Vacant(e) => {
                e.insert(hit.target_side);
            }
        }
    }

    Ok(())
}

fn partition(hits: &[BoundaryHit]) -> BTreeMap<&str, TadHits> {
    let mut groups: BTreeMap<&str, TadHits> = BTreeMap::new();
    for hit in hits {
        let entry = groups.entry(hit.query_tad.as_str()).or_default();
        let pair = (hit.target_tad_index, hit.target_side);
        match hit.query_side {
            Side::Left => entry.left.insert(pair),
            Side::Right => entry.right.insert(pair),
        };
    }
    groups
}

fn classify_tad(tad: &TadHits, max_shift: i64) -> BTreeSet<Correspondence> {
    let mut found = BTreeSet::new();

    // Both boundaries reach the same target TAD, approached from opposite sides
    for &(index, side) in &tad.left {
        if tad.right.contains(&(index, side.opposite())) {
            found.insert(Correspondence::Conserved(index));
        }
    }

    // left-left with right-right
    found.extend(split_matches(
        &tad.left_indices(Side::Left),
        &tad.right_indices(Side::Right),
        1,
        max_shift,
    ));

    // left-right with right-left
    found.extend(split_matches(
        &tad.left_indices(Side::Right),
        &tad.right_indices(Side::Left),
        -1,
        max_shift,
    ));

    found
}

/// Pairs each left index `l` with a right index `l + step * k`, for the
/// smallest `k` in `1..=max_shift` that yields any pair.
///
/// A match at right index `r` is reported as `Split(r - step, r)`. Shifts
/// beyond the span between the two index sets are never tried.
fn split_matches(
    lefts: &BTreeSet<i64>,
    rights: &BTreeSet<i64>,
    step: i64,
    max_shift: i64,
) -> Vec<Correspondence> {
    let span = match (lefts.first(), lefts.last(), rights.first(), rights.last()) {
        (Some(&l_min), Some(&l_max), Some(&r_min), Some(&r_max)) => {
            if step > 0 {
                r_max.saturating_sub(l_min)
            } else {
                l_max.saturating_sub(r_min)
            }
        }
        _ => return vec![],
    };

    for k in 1..=max_shift.min(span) {
        let shift = step * k;
        let matches: Vec<Correspondence> = lefts
            .iter()
            .map(|&l| l + shift)
            .filter(|r| rights.contains(r))
            .map(|r| Correspondence::Split(r - step, r))
            .collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    vec![]
}
