/// Snake page: a small grid game stepped off the frame clock
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const GRID_WIDTH: i16 = 32;
pub const GRID_HEIGHT: i16 = 18;
const STEP_INTERVAL: Duration = Duration::from_millis(120);
const START_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// xorshift64 generator, deterministic from its seed
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 32) as u32
    }

    fn gen_range(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

pub struct SnakeGame {
    body: VecDeque<(i16, i16)>,
    direction: Direction,
    pending: Direction,
    food: (i16, i16),
    score: u32,
    alive: bool,
    rng: Rng,
    last_step: Option<Instant>,
}

impl SnakeGame {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            pending: Direction::Right,
            food: (0, 0),
            score: 0,
            alive: true,
            rng: Rng::new(seed),
            last_step: None,
        };
        game.spawn();
        game
    }

    fn spawn(&mut self) {
        self.body.clear();
        let cy = GRID_HEIGHT / 2;
        let cx = GRID_WIDTH / 2;
        for i in 0..START_LENGTH as i16 {
            self.body.push_back((cx - i, cy));
        }
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.alive = true;
        self.last_step = None;
        self.place_food();
    }

    pub fn restart(&mut self) {
        self.spawn();
    }

    /// Queue a direction change; reversals into the body are ignored
    pub fn steer(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.pending = direction;
        }
    }

    /// Advance off the frame clock, stepping at the fixed interval
    pub fn update(&mut self, now: Instant) {
        if !self.alive {
            return;
        }
        match self.last_step {
            Some(last) if now.duration_since(last) < STEP_INTERVAL => {}
            _ => {
                self.step();
                self.last_step = Some(now);
            }
        }
    }

    /// One grid step: move, collide, eat
    pub fn step(&mut self) {
        if !self.alive {
            return;
        }
        self.direction = self.pending;
        let (dx, dy) = self.direction.delta();
        let head = self.body[0];
        let next = (head.0 + dx, head.1 + dy);

        let hit_wall =
            next.0 < 0 || next.1 < 0 || next.0 >= GRID_WIDTH || next.1 >= GRID_HEIGHT;
        if hit_wall || self.body.contains(&next) {
            self.alive = false;
            return;
        }

        self.body.push_front(next);
        if next == self.food {
            self.score += 1;
            self.place_food();
        } else {
            self.body.pop_back();
        }
    }

    fn place_food(&mut self) {
        loop {
            let cell = (
                self.rng.gen_range(GRID_WIDTH as u32) as i16,
                self.rng.gen_range(GRID_HEIGHT as u32) as i16,
            );
            if !self.body.contains(&cell) {
                self.food = cell;
                break;
            }
        }
    }

    pub fn body(&self) -> impl Iterator<Item = &(i16, i16)> {
        self.body.iter()
    }

    pub fn head(&self) -> (i16, i16) {
        self.body[0]
    }

    pub fn food(&self) -> (i16, i16) {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_head() {
        let mut game = SnakeGame::new(7);
        let head = game.head();
        game.food = (-1, -1); // keep food out of the way
        game.step();
        assert_eq!(game.head(), (head.0 + 1, head.1));
        assert_eq!(game.body.len(), START_LENGTH);
    }

    #[test]
    fn test_steer_ignores_reversal() {
        let mut game = SnakeGame::new(7);
        game.steer(Direction::Left); // reversal of the starting direction
        game.step();
        assert_eq!(game.direction, Direction::Right);

        game.steer(Direction::Up);
        game.step();
        assert_eq!(game.direction, Direction::Up);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut game = SnakeGame::new(7);
        let head = game.head();
        game.food = (head.0 + 1, head.1);
        game.step();
        assert_eq!(game.score(), 1);
        assert_eq!(game.body.len(), START_LENGTH + 1);
        assert_ne!(game.food(), game.head());
    }

    #[test]
    fn test_wall_collision_kills() {
        let mut game = SnakeGame::new(7);
        game.food = (-1, -1);
        for _ in 0..GRID_WIDTH {
            game.step();
        }
        assert!(!game.is_alive());

        // A dead game no longer moves
        let head = game.head();
        game.step();
        assert_eq!(game.head(), head);

        game.restart();
        assert!(game.is_alive());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_update_respects_step_interval() {
        let t0 = Instant::now();
        let mut game = SnakeGame::new(7);
        game.food = (-1, -1);
        let head = game.head();

        game.update(t0);
        assert_eq!(game.head(), (head.0 + 1, head.1));

        // Within the interval nothing moves
        game.update(t0 + Duration::from_millis(10));
        assert_eq!(game.head(), (head.0 + 1, head.1));

        game.update(t0 + STEP_INTERVAL);
        assert_eq!(game.head(), (head.0 + 2, head.1));
    }
}
