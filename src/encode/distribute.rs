use crate::cnf::{Clause, Lit};

use super::dnf::Conjunction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorb {
    /// Drop a new clause when an already accepted clause is a subset of it,
    /// and drop accepted clauses that the new one is a subset of.
    Subsumed,
    /// Keep every non-tautological clause.
    Off,
}

/// DNF to CNF with subsumption pruning.
pub fn dnf_to_cnf(dnf: &[Conjunction]) -> Vec<Clause> {
    dnf_to_cnf_with(dnf, Absorb::Subsumed)
}

/// Folds the disjuncts into a running CNF that starts as one empty clause.
/// An empty DNF yields a single empty clause, i.e. an unsatisfiable CNF.
pub fn dnf_to_cnf_with(dnf: &[Conjunction], absorb: Absorb) -> Vec<Clause> {
    dnf.iter()
        .fold(vec![Vec::new()], |cnf, term| distribute(&cnf, term, absorb))
}

/// One step: `cnf OR term`, distributed so that the result is again a CNF.
pub fn distribute(cnf: &[Clause], term: &[Lit], absorb: Absorb) -> Vec<Clause> {
    let mut accepted = Vec::<Clause>::new();
    for clause in cnf {
        for &lit in term {
            if clause.contains(&lit.neg()) {
                continue;
            }
            let mut grown = clause.clone();
            if !grown.contains(&lit) {
                grown.push(lit);
            }
            if absorb == Absorb::Subsumed {
                if accepted.iter().any(|a| is_subset(a, &grown)) {
                    continue;
                }
                // the new clause may in turn absorb earlier, longer ones
                accepted.retain(|a| !is_subset(&grown, a));
            }
            accepted.push(grown);
        }
    }
    accepted
}

fn is_subset(small: &[Lit], big: &[Lit]) -> bool {
    small.len() <= big.len() && small.iter().all(|l| big.contains(l))
}
