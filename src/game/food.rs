use rand::{Rng, seq::IteratorRandom};

use super::state::{Position, Snake};

/// Uniform draws attempted before falling back to scanning for free cells
const MAX_SAMPLES: usize = 64;

/// The snake covers every cell; there is nowhere left to put food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFull;

/// Pick a uniformly random cell not occupied by `snake`.
///
/// Draws cells at random until a free one turns up. On a crowded board the
/// draw switches to choosing among the remaining free cells directly, so
/// the result stays uniform and the call always terminates.
pub fn place_food<R: Rng>(
    snake: &Snake,
    grid_width: usize,
    grid_height: usize,
    rng: &mut R,
) -> Result<Position, BoardFull> {
    if snake.len() >= grid_width * grid_height {
        return Err(BoardFull);
    }

    for _ in 0..MAX_SAMPLES {
        let x = rng.gen_range(0..grid_width) as i32;
        let y = rng.gen_range(0..grid_height) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Ok(pos);
        }
    }

    (0..grid_height as i32)
        .flat_map(|y| (0..grid_width as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.occupies(*pos))
        .choose(rng)
        .ok_or(BoardFull)
}
