use thiserror::Error;

use crate::cnf::{Cnf, Lit};
use crate::grid::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemapError {
    #[error("variable {0} has no entry in the variable map")]
    UnknownVariable(u32),
}

/// Dense numbering of the hidden cells. Dense variable `i` (1-based) is the
/// `i`-th smallest sparse id, so dense order follows grid scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarMap {
    sparse: Vec<u32>,
}

impl VarMap {
    pub fn from_board(board: &Board) -> Self {
        let sparse = board
            .cells()
            .filter(|(_, c)| c.is_hidden())
            .map(|(p, _)| board.var_of(p.x, p.y))
            .collect();
        Self { sparse }
    }

    pub fn from_sparse(mut ids: Vec<u32>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self { sparse: ids }
    }

    pub fn len(&self) -> usize {
        self.sparse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparse.is_empty()
    }

    pub fn sparse_ids(&self) -> &[u32] {
        &self.sparse
    }

    pub fn dense_of(&self, sparse: u32) -> Result<u32, RemapError> {
        self.sparse
            .binary_search(&sparse)
            .map(|i| i as u32 + 1)
            .map_err(|_| RemapError::UnknownVariable(sparse))
    }

    pub fn sparse_of(&self, dense: u32) -> Result<u32, RemapError> {
        (dense as usize)
            .checked_sub(1)
            .and_then(|i| self.sparse.get(i))
            .copied()
            .ok_or(RemapError::UnknownVariable(dense))
    }

    pub fn lit_to_dense(&self, lit: Lit) -> Result<Lit, RemapError> {
        Ok(Lit::new(self.dense_of(lit.var)?, lit.sign))
    }

    pub fn lit_from_dense(&self, lit: Lit) -> Result<Lit, RemapError> {
        Ok(Lit::new(self.sparse_of(lit.var)?, lit.sign))
    }

    /// Renumbers every literal into `1..=len()`, keeping signs.
    pub fn to_dense(&self, cnf: &Cnf) -> Result<Cnf, RemapError> {
        let clauses = cnf
            .clauses
            .iter()
            .map(|clause| self.lits_to_dense(clause))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Cnf::from_clauses(self.len() as u32, clauses))
    }

    pub fn lits_to_dense(&self, lits: &[Lit]) -> Result<Vec<Lit>, RemapError> {
        lits.iter().map(|&l| self.lit_to_dense(l)).collect()
    }

    pub fn from_dense(&self, lits: &[Lit]) -> Result<Vec<Lit>, RemapError> {
        lits.iter().map(|&l| self.lit_from_dense(l)).collect()
    }
}
