/// Page implementations for the terminal shell
pub mod portfolio;
pub mod snake;

pub use portfolio::{PortfolioPage, ProjectCard, LOADING_DELAY, PROJECTS};
pub use snake::{Direction, SnakeGame, GRID_HEIGHT, GRID_WIDTH};
