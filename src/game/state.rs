use anyhow::{Result, bail};
use std::collections::{HashSet, VecDeque};

use super::action::Direction;

/// Progress is compared with this slack so that repeated fractional speeds
/// like 0.1 reach a full cell in the expected number of frames.
const PROGRESS_EPSILON: f32 = 1e-4;

/// A discrete cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Step one cell in `direction` on a toroidal grid: leaving one edge
    /// re-enters from the opposite edge.
    pub fn wrapped_step(&self, direction: Direction, width: i32, height: i32) -> Self {
        let (dx, dy) = direction.delta();
        let moved = self.moved_by(dx, dy);
        Self {
            x: moved.x.rem_euclid(width),
            y: moved.y.rem_euclid(height),
        }
    }
}

/// The snake: a run of occupied cells plus sub-cell progress of the head.
///
/// The discrete body and the continuous head position are reconciled only in
/// [`Snake::update`]. `progress` is how far (in cells, `0.0..1.0`) the head
/// has travelled from the centre of its current cell along `heading`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Position>,
    heading: Direction,
    /// Heading used for the most recent cell transition
    last_step: Direction,
    progress: f32,
    speed: f32,
    pending_growth: usize,
    alive: bool,
    grid_width: i32,
    grid_height: i32,
}

impl Snake {
    /// Create a snake of length 1 at `head`
    pub fn new(
        head: Position,
        heading: Direction,
        speed: f32,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self::straight(head, heading, 1, speed, grid_width, grid_height)
    }

    /// Create a straight snake of `length` cells with its tail trailing
    /// behind `head`, wrapping at the edges.
    ///
    /// `length` is clamped to `1..=` the grid extent along `heading`, so the
    /// body never overlaps itself.
    pub fn straight(
        head: Position,
        heading: Direction,
        length: usize,
        speed: f32,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        let extent = match heading {
            Direction::Left | Direction::Right => grid_width,
            Direction::Up | Direction::Down => grid_height,
        };
        let length = length.clamp(1, extent.max(1));

        let mut body = VecDeque::with_capacity(length);
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.wrapped_step(heading.opposite(), grid_width as i32, grid_height as i32);
            body.push_back(cell);
        }

        Self::laid_out(body, heading, speed, grid_width, grid_height)
    }

    /// Create a snake from explicit body cells, head first.
    ///
    /// Fails if `body` is empty, lists a cell twice or leaves the grid.
    pub fn from_body(
        body: Vec<Position>,
        heading: Direction,
        speed: f32,
        grid_width: usize,
        grid_height: usize,
    ) -> Result<Self> {
        if body.is_empty() {
            bail!("a snake needs at least one cell");
        }

        let mut seen = HashSet::with_capacity(body.len());
        for cell in &body {
            if !(0..grid_width as i32).contains(&cell.x) || !(0..grid_height as i32).contains(&cell.y)
            {
                bail!(
                    "cell ({}, {}) lies outside the {}x{} grid",
                    cell.x,
                    cell.y,
                    grid_width,
                    grid_height
                );
            }
            if !seen.insert(*cell) {
                bail!("cell ({}, {}) appears twice in the body", cell.x, cell.y);
            }
        }

        Ok(Self::laid_out(
            body.into(),
            heading,
            speed,
            grid_width,
            grid_height,
        ))
    }

    fn laid_out(
        body: VecDeque<Position>,
        heading: Direction,
        speed: f32,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            body,
            heading,
            last_step: heading,
            progress: 0.0,
            speed,
            pending_growth: 0,
            alive: true,
            grid_width: grid_width as i32,
            grid_height: grid_height as i32,
        }
    }

    /// Advance the snake by `speed` cells along its heading.
    ///
    /// Returns the cell the head entered if the head crossed into a new cell
    /// this frame. Self-collision is checked only on such a transition.
    /// A dead snake does not move.
    pub fn update(&mut self) -> Option<Position> {
        if !self.alive {
            return None;
        }

        self.progress += self.speed;
        if self.progress + PROGRESS_EPSILON < 1.0 {
            return None;
        }
        self.progress = (self.progress - 1.0).max(0.0);

        let next = self
            .head()
            .wrapped_step(self.heading, self.grid_width, self.grid_height);
        self.last_step = self.heading;
        self.body.push_front(next);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }

        if self.body.iter().skip(1).any(|cell| *cell == next) {
            self.alive = false;
        }

        Some(next)
    }

    /// Keep the tail on the next cell transition (net +1 length)
    pub fn grow_body(&mut self) {
        self.pending_growth += 1;
    }

    /// Raise speed by `increment`, never beyond `max`
    pub fn accelerate(&mut self, increment: f32, max: f32) {
        self.speed = (self.speed + increment).min(max);
    }

    /// Narrow handle for changing the heading
    pub fn steer(&mut self) -> HeadingControl<'_> {
        HeadingControl { snake: self }
    }

    /// True iff `pos` is occupied by any part of the body
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Continuous head coordinates, in cell units, for smooth rendering.
    /// Always within one cell of [`Snake::head`], modulo wrapping.
    pub fn head_position(&self) -> (f32, f32) {
        let head = self.head();
        let (dx, dy) = self.heading.delta();
        let x = wrap_coordinate(head.x as f32 + dx as f32 * self.progress, self.grid_width);
        let y = wrap_coordinate(head.y as f32 + dy as f32 * self.progress, self.grid_height);
        (x, y)
    }

    pub fn cells(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Cell count including growth that has been requested but not yet
    /// materialised by a cell transition
    pub fn size(&self) -> usize {
        self.body.len() + self.pending_growth
    }

    /// Get the length of the body as currently laid out on the grid
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

fn wrap_coordinate(value: f32, len: i32) -> f32 {
    let wrapped = value.rem_euclid(len as f32);
    // rem_euclid of a tiny negative value can round up to `len`
    if wrapped >= len as f32 { 0.0 } else { wrapped }
}

/// Mutation capability limited to the heading.
///
/// A request for the reverse of the current heading, or of the heading the
/// snake last moved along, is rejected.
pub struct HeadingControl<'a> {
    snake: &'a mut Snake,
}

impl HeadingControl<'_> {
    pub fn current(&self) -> Direction {
        self.snake.heading
    }

    /// Try to change heading; returns whether the change was accepted
    pub fn request(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.snake.heading) || direction.is_opposite(self.snake.last_step)
        {
            return false;
        }
        self.snake.heading = direction;
        true
    }
}
