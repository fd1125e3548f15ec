pub mod model;
pub mod renderer;

pub use model::{day_of_year, DayClass, GRID_COLS};
pub use renderer::{GridRenderer, GridSlot};
