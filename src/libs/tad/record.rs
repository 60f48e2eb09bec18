use itertools::Itertools;
use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CorrespondenceKind {
    Conserved,
    Split,
}

impl CorrespondenceKind {
    /// Confidence tier of the kind. Not a probability.
    pub fn weight(&self) -> f64 {
        match self {
            CorrespondenceKind::Conserved => 1.0,
            CorrespondenceKind::Split => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrespondenceKind::Conserved => "conserved",
            CorrespondenceKind::Split => "split",
        }
    }
}

impl fmt::Display for CorrespondenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target TAD(s) a query TAD corresponds to.
///
/// `Split(a, b)` keeps the order in which the split test produced the pair:
/// the TAD reached from the query's left boundary side first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Correspondence {
    Conserved(i64),
    Split(i64, i64),
}

impl Correspondence {
    pub fn kind(&self) -> CorrespondenceKind {
        match self {
            Correspondence::Conserved(_) => CorrespondenceKind::Conserved,
            Correspondence::Split(_, _) => CorrespondenceKind::Split,
        }
    }

    pub fn targets(&self) -> Vec<i64> {
        match *self {
            Correspondence::Conserved(t) => vec![t],
            Correspondence::Split(a, b) => vec![a, b],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrespondenceRecord {
    pub query_tad: String,
    pub correspondence: Correspondence,
}

impl CorrespondenceRecord {
    pub fn conserved(query_tad: &str, target: i64) -> Self {
        Self {
            query_tad: query_tad.to_string(),
            correspondence: Correspondence::Conserved(target),
        }
    }

    pub fn split(query_tad: &str, first: i64, second: i64) -> Self {
        Self {
            query_tad: query_tad.to_string(),
            correspondence: Correspondence::Split(first, second),
        }
    }

    pub fn kind(&self) -> CorrespondenceKind {
        self.correspondence.kind()
    }

    pub fn weight(&self) -> f64 {
        self.kind().weight()
    }

    pub fn targets(&self) -> Vec<i64> {
        self.correspondence.targets()
    }
}

impl fmt::Display for CorrespondenceRecord {
    /// ```
    /// use tcbf::libs::tad::record::CorrespondenceRecord;
    /// let rec = CorrespondenceRecord::split("Q2", 10, 11);
    /// assert_eq!(rec.to_string(), "Q2\tsplit\t10,11\t0.5");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.query_tad,
            self.kind(),
            self.targets().iter().join(","),
            self.weight()
        )
    }
}

/// One edge of the query/target TAD network handed to the synteny-block builder.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkRow {
    pub query_tad: String,
    pub target_tad: String,
    pub weight: f64,
}

impl fmt::Display for NetworkRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.query_tad, self.target_tad, self.weight)
    }
}

/// Flattens records into network rows, qualifying every target index with `genome`.
///
/// A split record contributes one row per target TAD.
///
/// ```
/// use tcbf::libs::tad::record::{to_network_rows, CorrespondenceRecord};
/// let records = vec![
///     CorrespondenceRecord::conserved("Q1", 3),
///     CorrespondenceRecord::split("Q2", 10, 11),
/// ];
/// let rows = to_network_rows(&records, "hg38");
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0].to_string(), "Q1\thg38_3\t1");
/// assert_eq!(rows[2].target_tad, "hg38_11");
/// ```
pub fn to_network_rows(records: &[CorrespondenceRecord], genome: &str) -> Vec<NetworkRow> {
    records
        .iter()
        .flat_map(|rec| {
            let weight = rec.weight();
            rec.targets().into_iter().map(move |t| NetworkRow {
                query_tad: rec.query_tad.clone(),
                target_tad: format!("{}_{}", genome, t),
                weight,
            })
        })
        .collect()
}

pub fn write_records<W: Write>(writer: &mut W, records: &[CorrespondenceRecord]) -> io::Result<()> {
    for rec in records {
        writeln!(writer, "{}", rec)?;
    }
    Ok(())
}

pub fn write_network<W: Write>(writer: &mut W, rows: &[NetworkRow]) -> io::Result<()> {
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    Ok(())
}
