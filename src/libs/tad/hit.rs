use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::libs::tad::error::ClassifyError;

/// Edge of a TAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = ClassifyError;

    /// Accepts `left`/`right` in any case, and the `0`/`1` encoding of older tables.
    ///
    /// ```
    /// use tcbf::libs::tad::hit::Side;
    /// assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
    /// assert_eq!("Right".parse::<Side>().unwrap(), Side::Right);
    /// assert_eq!("1".parse::<Side>().unwrap(), Side::Right);
    /// assert!("middle".parse::<Side>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "0" => Ok(Side::Left),
            "right" | "1" => Ok(Side::Right),
            _ => Err(ClassifyError::Precondition(format!(
                "Invalid side: {}",
                s
            ))),
        }
    }
}

/// One observed alignment from a query TAD boundary to the target genome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryHit {
    pub query_tad: String,
    pub query_side: Side,
    pub target_tad_index: i64,
    pub target_side: Side,
}

impl BoundaryHit {
    pub fn new(query_tad: &str, query_side: Side, target_tad_index: i64, target_side: Side) -> Self {
        Self {
            query_tad: query_tad.to_string(),
            query_side,
            target_tad_index,
            target_side,
        }
    }
}

impl fmt::Display for BoundaryHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.query_tad, self.query_side, self.target_tad_index, self.target_side
        )
    }
}

impl FromStr for BoundaryHit {
    type Err = ClassifyError;

    /// Parses a tab-separated `query_tad query_side target_tad_index target_side` line.
    ///
    /// ```
    /// use tcbf::libs::tad::hit::{BoundaryHit, Side};
    /// let hit: BoundaryHit = "Q1\tleft\t3\tright".parse().unwrap();
    /// assert_eq!(hit.query_tad, "Q1");
    /// assert_eq!(hit.query_side, Side::Left);
    /// assert_eq!(hit.target_tad_index, 3);
    /// assert_eq!(hit.target_side, Side::Right);
    ///
    /// assert!("Q1\tleft\t3.5\tright".parse::<BoundaryHit>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() < 4 {
            return Err(ClassifyError::Precondition(format!(
                "Invalid hit line: expected at least 4 columns, found {}",
                fields.len()
            )));
        }

        let target_tad_index = fields[2].trim().parse::<i64>().map_err(|_| {
            ClassifyError::Precondition(format!(
                "Target TAD index is not an integer: {}",
                fields[2]
            ))
        })?;

        Ok(BoundaryHit {
            query_tad: fields[0].trim().to_string(),
            query_side: fields[1].parse()?,
            target_tad_index,
            target_side: fields[3].parse()?,
        })
    }
}

/// Reads a hit table. Blank lines and `#` comments are skipped.
pub fn read_hits<R: BufRead>(reader: R) -> anyhow::Result<Vec<BoundaryHit>> {
    let mut hits = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let hit = line
            .parse::<BoundaryHit>()
            .map_err(|e| anyhow::anyhow!("line {}: {}", i + 1, e))?;
        hits.push(hit);
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_hit_parse_errors() {
        assert!(matches!(
            "Q1\tleft\t3".parse::<BoundaryHit>(),
            Err(ClassifyError::Precondition(_))
        ));
        assert!(matches!(
            "Q1\tup\t3\tleft".parse::<BoundaryHit>(),
            Err(ClassifyError::Precondition(_))
        ));
        assert!(matches!(
            "Q1\tleft\tNaN\tleft".parse::<BoundaryHit>(),
            Err(ClassifyError::Precondition(_))
        ));
    }

    #[test]
    fn test_hit_extra_columns() {
        let hit: BoundaryHit = "Q1\tleft\t3\tright\t0.98".parse().unwrap();
        assert_eq!(hit, BoundaryHit::new("Q1", Side::Left, 3, Side::Right));

        let err = "Q1\tleft".parse::<BoundaryHit>().unwrap_err();
        assert!(err.to_string().contains("at least 4 columns, found 2"));
    }

    #[test]
    fn test_hit_display() {
        let hit = BoundaryHit::new("Q2", Side::Right, -4, Side::Left);
        assert_eq!(hit.to_string(), "Q2\tright\t-4\tleft");
        assert_eq!(hit.to_string().parse::<BoundaryHit>().unwrap(), hit);
    }

    #[test]
    fn test_read_hits() {
        let input = "# query_tad\tquery_side\ttarget\tside\nQ1\tleft\t3\tleft\n\nQ1\tright\t3\tright\n";
        let hits = read_hits(BufReader::new(input.as_bytes())).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].query_side, Side::Right);

        let bad = "Q1\tleft\t3\tleft\nQ1\tright\tx\tright\n";
        let err = read_hits(BufReader::new(bad.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
