use proptest::prelude::*;

use gemhunter::cnf::{Cnf, Lit};
use gemhunter::encode::encode_board;
use gemhunter::grid::{Board, Cell};
use gemhunter::remap::{RemapError, VarMap};

fn board_strategy() -> impl Strategy<Value = Board> {
    (1usize..=6, 1usize..=6).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::option::weighted(0.6, 0u8..=8), w * h).prop_map(move |cells| {
            let rows = cells
                .chunks(w)
                .map(|row| {
                    row.iter()
                        .map(|c| c.map(Cell::Number).unwrap_or(Cell::Unknown))
                        .collect()
                })
                .collect();
            Board::from_rows(rows).expect("rectangular")
        })
    })
}

proptest! {
    #[test]
    fn dense_round_trip_is_identity(board in board_strategy(), signs in prop::collection::vec(any::<bool>(), 36)) {
        let map = VarMap::from_board(&board);
        let assignment = map
            .sparse_ids()
            .iter()
            .zip(&signs)
            .map(|(&v, &s)| Lit::new(v, s))
            .collect::<Vec<_>>();
        let dense = map.lits_to_dense(&assignment).expect("to dense");
        for (i, lit) in dense.iter().enumerate() {
            prop_assert_eq!(lit.var as usize, i + 1);
        }
        prop_assert_eq!(map.from_dense(&dense).expect("from dense"), assignment);
    }

    #[test]
    fn encoded_boards_always_remap(board in board_strategy()) {
        let map = VarMap::from_board(&board);
        let cnf = map.to_dense(&encode_board(&board)).expect("remap");
        prop_assert_eq!(cnf.num_vars as usize, map.len());
        prop_assert!(cnf.clauses.iter().flatten().all(|l| l.var >= 1 && l.var as usize <= map.len()));
    }
}

#[test]
fn mapping_is_increasing_and_gap_free() {
    let map = VarMap::from_sparse(vec![12, 3, 7, 3]);
    assert_eq!(map.sparse_ids(), &[3, 7, 12]);
    assert_eq!(map.dense_of(3), Ok(1));
    assert_eq!(map.dense_of(7), Ok(2));
    assert_eq!(map.dense_of(12), Ok(3));
    assert_eq!(map.sparse_of(3), Ok(12));
}

#[test]
fn unknown_variables_are_reported() {
    let map = VarMap::from_sparse(vec![2, 5]);
    assert_eq!(map.dense_of(4), Err(RemapError::UnknownVariable(4)));
    assert_eq!(map.sparse_of(0), Err(RemapError::UnknownVariable(0)));
    assert_eq!(map.sparse_of(3), Err(RemapError::UnknownVariable(3)));

    let cnf = Cnf::from_clauses(6, vec![vec![Lit::pos(2), Lit::neg_of(6)]]);
    assert_eq!(map.to_dense(&cnf), Err(RemapError::UnknownVariable(6)));
}

#[test]
fn signs_survive_remapping() {
    let map = VarMap::from_sparse(vec![4, 9]);
    let cnf = Cnf::from_clauses(9, vec![vec![Lit::neg_of(9), Lit::pos(4)], vec![Lit::neg_of(4)]]);
    let dense = map.to_dense(&cnf).expect("remap");
    assert_eq!(dense.num_vars, 2);
    assert_eq!(
        dense.clauses,
        vec![vec![Lit::neg_of(2), Lit::pos(1)], vec![Lit::neg_of(1)]]
    );
}
