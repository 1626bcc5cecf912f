use crate::cnf::Lit;
use crate::grid::{Board, Point};

/// One AND-term of a disjunctive normal form.
pub type Conjunction = Vec<Lit>;

/// "Exactly `count` of `vars` are traps" for one clue cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueConstraint {
    pub cell: Point,
    pub vars: Vec<u32>,
    pub count: usize,
}

/// Sparse ids of the hidden neighbours of `(x, y)`, in neighbourhood scan order.
pub fn hidden_neighbors(board: &Board, x: usize, y: usize) -> Vec<u32> {
    board
        .neighbors(x, y)
        .into_iter()
        .filter(|p| board.at(p.x, p.y).is_ok_and(|c| c.is_hidden()))
        .map(|p| board.var_of(p.x, p.y))
        .collect()
}

/// One constraint per clue cell with at least one hidden neighbour, row-major.
pub fn clue_constraints(board: &Board) -> Vec<ClueConstraint> {
    board
        .cells()
        .filter_map(|(p, cell)| {
            let count = cell.clue()?;
            let vars = hidden_neighbors(board, p.x, p.y);
            if vars.is_empty() {
                return None;
            }
            Some(ClueConstraint {
                cell: p,
                vars,
                count,
            })
        })
        .collect()
}

/// Every way of choosing exactly `k` traps among `vars`, as conjunctions.
/// Empty when `k > vars.len()`.
pub fn exactly_k(vars: &[u32], k: usize) -> Vec<Conjunction> {
    let n = vars.len();
    if k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    // lexicographic k-combinations of 0..n
    let mut idx = (0..k).collect::<Vec<_>>();
    loop {
        let mut chosen = vec![false; n];
        for &i in &idx {
            chosen[i] = true;
        }
        out.push(
            vars.iter()
                .zip(&chosen)
                .map(|(&v, &trap)| Lit::new(v, trap))
                .collect(),
        );

        let Some(pos) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            break;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
    out
}

/// Direct evaluation of "exactly k of `vars` are true" under a total model.
pub fn holds_exactly_k(vars: &[u32], k: usize, model: &[bool]) -> bool {
    vars.iter()
        .filter(|&&v| model.get(v as usize).copied().unwrap_or(false))
        .count()
        == k
}
