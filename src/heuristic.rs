//! Distance estimates used to guide the search.
//!
//! Every heuristic is a pure function of the evaluated cell, the goal and a weight. The weight
//! may be any real number: values above 1 make the search greedier and no longer optimal, 0
//! turns it into uniform-cost search and negative values push it away from the goal.
use crate::cell::Cell;
use crate::error::HeuristicError;
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::str::FromStr;
use std::sync::OnceLock;

/// Signature shared by all heuristics: `(cell, goal, weight) -> estimate`.
pub type HeuristicFn = fn(Cell, Cell, f64) -> f64;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

fn abs_deltas(a: Cell, b: Cell) -> (f64, f64) {
    let (dr, dc) = a.delta(&b);
    (dr as f64, dc as f64)
}

/// Straight-line distance times the weight.
pub fn euclidean(a: Cell, b: Cell, weight: f64) -> f64 {
    let (dr, dc) = abs_deltas(a, b);
    (dr * dr + dc * dc).sqrt() * weight
}

/// Row difference plus the weighted column difference.
///
/// Only the column term is scaled. With a weight of 1 this is the plain Manhattan distance.
pub fn manhattan(a: Cell, b: Cell, weight: f64) -> f64 {
    let (dr, dc) = abs_deltas(a, b);
    dr + dc * weight
}

/// Largest axis difference times the weight.
pub fn chebyshev(a: Cell, b: Cell, weight: f64) -> f64 {
    let (dr, dc) = abs_deltas(a, b);
    dr.max(dc) * weight
}

/// Diagonal steps first, then straight ones. The diagonal step length is `sqrt(2 * w^2)`
/// and the whole sum is scaled by the weight again, so the weight acts twice on the diagonal
/// part.
pub fn octile(a: Cell, b: Cell, weight: f64) -> f64 {
    let (dr, dc) = abs_deltas(a, b);
    let (lo, hi) = (dr.min(dc), dr.max(dc));
    (lo * (2.0 * weight * weight).sqrt() + (hi - lo)) * weight
}

/// The fixed set of heuristics a search can be configured with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
    #[cfg_attr(feature = "serde", serde(alias = "chebbyshev"))]
    Chebyshev,
    Octile,
}

impl Heuristic {
    /// All heuristics in registry order.
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Euclidean,
        Heuristic::Manhattan,
        Heuristic::Chebyshev,
        Heuristic::Octile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Chebyshev => "chebyshev",
            Heuristic::Octile => "octile",
        }
    }

    pub fn function(self) -> HeuristicFn {
        match self {
            Heuristic::Euclidean => euclidean,
            Heuristic::Manhattan => manhattan,
            Heuristic::Chebyshev => chebyshev,
            Heuristic::Octile => octile,
        }
    }

    #[inline]
    pub fn estimate(self, cell: Cell, goal: Cell, weight: f64) -> f64 {
        (self.function())(cell, goal, weight)
    }
}

impl FromStr for Heuristic {
    type Err = HeuristicError;

    fn from_str(s: &str) -> Result<Heuristic, HeuristicError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Heuristic::Euclidean),
            "manhattan" => Ok(Heuristic::Manhattan),
            "chebyshev" | "chebbyshev" => Ok(Heuristic::Chebyshev),
            "octile" => Ok(Heuristic::Octile),
            _ => Err(HeuristicError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Name-keyed table of the available heuristics, in a fixed order.
pub fn registry() -> &'static FxIndexMap<&'static str, HeuristicFn> {
    static REGISTRY: OnceLock<FxIndexMap<&'static str, HeuristicFn>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Heuristic::ALL
            .iter()
            .map(|h| (h.name(), h.function()))
            .collect()
    })
}

/// Looks a heuristic function up by name. Matching is case-insensitive and accepts the
/// `chebbyshev` spelling.
pub fn lookup(name: &str) -> Result<HeuristicFn, HeuristicError> {
    let heuristic: Heuristic = name.parse()?;
    registry()
        .get(heuristic.name())
        .copied()
        .ok_or_else(|| HeuristicError::Unknown(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-12;
    const A: Cell = Cell::new(1, 2);
    const B: Cell = Cell::new(4, 6);

    #[test]
    fn unit_weight_values() {
        assert!((euclidean(A, B, 1.0) - 5.0).abs() < EPS);
        assert!((manhattan(A, B, 1.0) - 7.0).abs() < EPS);
        assert!((chebyshev(A, B, 1.0) - 4.0).abs() < EPS);
        assert!((octile(A, B, 1.0) - (3.0 * SQRT_2 + 1.0)).abs() < EPS);
    }

    #[test]
    fn manhattan_weights_column_term_only() {
        // dr = 3, dc = 4
        assert!((manhattan(A, B, 2.0) - (3.0 + 8.0)).abs() < EPS);
        assert!((manhattan(A, B, 0.0) - 3.0).abs() < EPS);
    }

    #[test]
    fn octile_applies_weight_twice_on_diagonal() {
        // (3 * sqrt(8) + 1) * 2
        let expected = (3.0 * 8f64.sqrt() + 1.0) * 2.0;
        assert!((octile(A, B, 2.0) - expected).abs() < EPS);
        // sqrt(2 w^2) is positive for negative weights.
        let expected = (3.0 * SQRT_2 + 1.0) * -1.0;
        assert!((octile(A, B, -1.0) - expected).abs() < EPS);
    }

    #[test]
    fn zero_weight_and_same_cell() {
        for h in Heuristic::ALL {
            assert_eq!(h.estimate(A, A, 1.0), 0.0);
            if h != Heuristic::Manhattan {
                assert_eq!(h.estimate(A, B, 0.0), 0.0);
            }
        }
    }

    #[test]
    fn symmetric_in_endpoints() {
        for h in Heuristic::ALL {
            assert!((h.estimate(A, B, 1.5) - h.estimate(B, A, 1.5)).abs() < EPS);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("Octile".parse::<Heuristic>(), Ok(Heuristic::Octile));
        assert_eq!("chebbyshev".parse::<Heuristic>(), Ok(Heuristic::Chebyshev));
        assert_eq!(
            "taxicab".parse::<Heuristic>(),
            Err(HeuristicError::Unknown("taxicab".to_owned()))
        );
        assert_eq!(Heuristic::Manhattan.to_string(), "manhattan");
    }

    #[test]
    fn registry_order_and_lookup() {
        let names: Vec<&str> = registry().keys().copied().collect();
        assert_eq!(names, ["euclidean", "manhattan", "chebyshev", "octile"]);
        let f = lookup("euclidean").unwrap();
        assert!((f(A, B, 1.0) - 5.0).abs() < EPS);
        assert!(lookup("nope").is_err());
    }
}
