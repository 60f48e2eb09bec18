use indexmap::map::Entry;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::libs::tad::error::ClassifyError;
use crate::libs::tad::hit::{BoundaryHit, Side};

lazy_static! {
    static ref RE_LABEL: Regex =
        Regex::new(r"^(?P<genome>.+)_(?P<index>-?\d+)_(?P<side>left|right)(?:-(?P<pos>\w+))?$")
            .unwrap();
}

/// Name of a target boundary sequence: `<genome>_<tad_index>_<side>[-<position>]`.
///
/// A boundary without a position, or with position `middle`, sits between two
/// TADs. Any other position (`first`, `last`) marks a chromosome end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLabel {
    pub genome: String,
    pub tad_index: i64,
    pub side: Side,
    pub position: Option<String>,
    pub terminal: bool,
}

impl FromStr for TargetLabel {
    type Err = ClassifyError;

    /// ```
    /// use tcbf::libs::tad::hit::Side;
    /// use tcbf::libs::tad::label::TargetLabel;
    ///
    /// let label: TargetLabel = "hg38_12_left".parse().unwrap();
    /// assert_eq!(label.genome, "hg38");
    /// assert_eq!(label.tad_index, 12);
    /// assert_eq!(label.side, Side::Left);
    /// assert!(!label.terminal);
    ///
    /// let label: TargetLabel = "hg38_0_left-first".parse().unwrap();
    /// assert!(label.terminal);
    ///
    /// let label: TargetLabel = "GRCm39_3_right-middle".parse().unwrap();
    /// assert!(!label.terminal);
    ///
    /// assert!("hg38_twelve_left".parse::<TargetLabel>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RE_LABEL.captures(s.trim()).ok_or_else(|| {
            ClassifyError::Precondition(format!("Invalid target boundary label: {}", s))
        })?;

        let tad_index = caps["index"].parse::<i64>().map_err(|_| {
            ClassifyError::Precondition(format!("TAD index out of range: {}", s))
        })?;
        let terminal = caps
            .name("pos")
            .map(|m| m.as_str() != "middle")
            .unwrap_or(false);

        Ok(TargetLabel {
            genome: caps["genome"].to_string(),
            tad_index,
            side: caps["side"].parse()?,
            position: caps.name("pos").map(|m| m.as_str().to_string()),
            terminal,
        })
    }
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.genome, self.tad_index, self.side)?;
        if let Some(pos) = &self.position {
            write!(f, "-{}", pos)?;
        }
        Ok(())
    }
}

impl TargetLabel {
    /// `(target_tad_index, target_side)` pairs this boundary stands for.
    ///
    /// An interior boundary is also the right edge of the preceding TAD.
    pub fn expand(&self) -> Result<Vec<(i64, Side)>, ClassifyError> {
        let mut pairs = vec![(self.tad_index, self.side)];
        if !self.terminal {
            let prev = self.tad_index.checked_sub(1).ok_or_else(|| {
                ClassifyError::Precondition(format!(
                    "TAD index has no predecessor: {}",
                    self.tad_index
                ))
            })?;
            pairs.push((prev, Side::Right));
        }
        Ok(pairs)
    }
}

/// One upstream alignment row: a query boundary and the target boundary it hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAlignment {
    pub query_tad: String,
    pub query_side: Side,
    pub target: TargetLabel,
}

impl FromStr for RawAlignment {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() < 3 {
            return Err(ClassifyError::Precondition(format!(
                "Invalid alignment line: expected at least 3 columns, found {}",
                fields.len()
            )));
        }

        Ok(RawAlignment {
            query_tad: fields[0].trim().to_string(),
            query_side: fields[1].parse()?,
            target: fields[2].parse()?,
        })
    }
}

pub fn read_alignments<R: BufRead>(reader: R) -> anyhow::Result<Vec<RawAlignment>> {
    let mut rows = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .parse::<RawAlignment>()
            .map_err(|e| anyhow::anyhow!("line {}: {}", i + 1, e))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Target side placed on one `(query_tad, query_side, target_tad_index)` key,
/// and the label that placed it.
struct Placement<'a> {
    side: Side,
    label: &'a TargetLabel,
    direct: bool,
}

/// Normalizes raw alignments into boundary hits, first occurrence order, without duplicates.
///
/// The first pair of a label is direct, the predecessor pair of an interior
/// boundary is implied. On the same key a direct pair replaces a contradicting
/// implied one; two contradicting direct pairs fail with `ConflictingLabels`.
pub fn expand_alignments(rows: &[RawAlignment]) -> Result<Vec<BoundaryHit>, ClassifyError> {
    let mut placed: IndexMap<(&str, Side, i64), Placement> = IndexMap::new();
    for row in rows {
        for (i, (index, side)) in row.target.expand()?.into_iter().enumerate() {
            let direct = i == 0;
            match placed.entry((row.query_tad.as_str(), row.query_side, index)) {
                Entry::Vacant(e) => {
                    e.insert(Placement {
                        side,
                        label: &row.target,
                        direct,
                    });
                }
                Entry::Occupied(mut e) => {
                    let prior = e.get_mut();
                    if prior.side == side {
                        prior.direct |= direct;
                    } else if direct && !prior.direct {
                        tracing::debug!(
                            query_tad = row.query_tad.as_str(),
                            dropped = %prior.label,
                            kept = %row.target,
                            "implied boundary pair overridden"
                        );
                        *prior = Placement {
                            side,
                            label: &row.target,
                            direct,
                        };
                    } else if direct && prior.direct {
                        return Err(ClassifyError::ConflictingLabels {
                            query_tad: row.query_tad.clone(),
                            query_side: row.query_side,
                            target_tad_index: index,
                            first: prior.label.to_string(),
                            second: row.target.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(placed
        .into_iter()
        .map(|((query_tad, query_side, index), p)| {
            BoundaryHit::new(query_tad, query_side, index, p.side)
        })
        .collect())
}

/// Genome named by the first label, if any.
pub fn genome_of(rows: &[RawAlignment]) -> Option<&str> {
    rows.first().map(|row| row.target.genome.as_str())
}
