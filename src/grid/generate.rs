use anyhow::{Result, bail};
use rand::Rng;
use rand::seq::SliceRandom;

use super::board::{Board, Cell};

/// Random fully-resolved board: `traps` traps and `gems` gems on distinct cells,
/// every other cell numbered with its trap-neighbour count.
pub fn random_board<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    traps: usize,
    gems: usize,
    rng: &mut R,
) -> Result<Board> {
    if height == 0 || width == 0 {
        bail!("board dimensions must be >= 1, got {}x{}", height, width);
    }
    let Some(total) = height.checked_mul(width) else {
        bail!("board of {}x{} cells is too large", height, width);
    };
    match traps.checked_add(gems) {
        Some(placed) if placed <= total => {}
        _ => bail!(
            "{} traps and {} gems do not fit in {} cells",
            traps,
            gems,
            total
        ),
    }

    let mut slots = (0..total).collect::<Vec<_>>();
    slots.shuffle(rng);

    let mut board = Board::filled(width, height, Cell::Number(0))?;
    for (i, &slot) in slots.iter().take(traps + gems).enumerate() {
        let cell = if i < traps { Cell::Trap } else { Cell::Gem };
        board.set(slot % width, slot / width, cell)?;
    }

    for y in 0..height {
        for x in 0..width {
            if let Cell::Number(_) = board.at(x, y)? {
                let n = board.traps_around(x, y) as u8;
                board.set(x, y, Cell::Number(n))?;
            }
        }
    }
    Ok(board)
}

/// The puzzle a solver receives: traps and gems hidden again.
pub fn conceal(board: &Board) -> Board {
    board.blur()
}
