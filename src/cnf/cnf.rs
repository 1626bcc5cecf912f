/// A literal over a 1-based variable. `sign == true` is the positive literal,
/// which the whole pipeline reads as "this hidden cell is a trap".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        Self { var, sign }
    }

    pub fn pos(var: u32) -> Self {
        Self::new(var, true)
    }

    pub fn neg_of(var: u32) -> Self {
        Self::new(var, false)
    }

    pub fn neg(self) -> Self {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }

    pub fn to_dimacs(self) -> i64 {
        let v = self.var as i64;
        if self.sign { v } else { -v }
    }
}

pub type Clause = Vec<Lit>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    pub num_vars: u32,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn from_clauses(num_vars: u32, clauses: Vec<Clause>) -> Self {
        Self { num_vars, clauses }
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn extend_clauses<I: IntoIterator<Item = Clause>>(&mut self, clauses: I) {
        self.clauses.extend(clauses);
    }

    pub fn fresh_var(&mut self) -> u32 {
        self.num_vars = self.num_vars.saturating_add(1);
        self.num_vars
    }

    /// Largest variable mentioned anywhere, or `num_vars` if that is larger.
    pub fn max_var(&self) -> u32 {
        self.clauses
            .iter()
            .flatten()
            .map(|l| l.var)
            .max()
            .unwrap_or(0)
            .max(self.num_vars)
    }

    /// Sorted, distinct variables that occur in at least one clause.
    pub fn vars_in_use(&self) -> Vec<u32> {
        let mut vars = self
            .clauses
            .iter()
            .flatten()
            .map(|l| l.var)
            .collect::<Vec<_>>();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    pub fn eval_lit_partial(lit: Lit, assignment: &[Option<bool>]) -> Option<bool> {
        let var = lit.var as usize;
        if var >= assignment.len() {
            return None;
        }
        assignment[var].map(|v| if lit.sign { v } else { !v })
    }

    /// `Some(false)` only once every literal is assigned and none holds.
    pub fn eval_clause_partial(clause: &[Lit], assignment: &[Option<bool>]) -> Option<bool> {
        let mut any_unknown = false;
        for &lit in clause {
            match Self::eval_lit_partial(lit, assignment) {
                Some(true) => return Some(true),
                Some(false) => {}
                None => any_unknown = true,
            }
        }
        if any_unknown { None } else { Some(false) }
    }

    pub fn eval_formula_partial(&self, assignment: &[Option<bool>]) -> Option<bool> {
        let mut all_true = true;
        for clause in &self.clauses {
            match Self::eval_clause_partial(clause, assignment) {
                Some(true) => {}
                Some(false) => return Some(false),
                None => all_true = false,
            }
        }
        if all_true { Some(true) } else { None }
    }

    pub fn has_violated_clause(&self, assignment: &[Option<bool>]) -> bool {
        self.clauses
            .iter()
            .any(|c| Self::eval_clause_partial(c, assignment) == Some(false))
    }

    /// Total evaluation; `model[v]` is the value of variable `v` (index 0 unused).
    pub fn is_satisfied_by(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                model
                    .get(lit.var as usize)
                    .is_some_and(|&v| v == lit.sign)
            })
        })
    }
}
