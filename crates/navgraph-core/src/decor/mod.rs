//! Decorative layers around the graph. Pure state; the viewer draws them.

pub mod cursor;
pub mod rain;
pub mod spikes;
pub mod starfield;
pub mod typewriter;

pub use cursor::{CursorTrail, Spring, SpringFollower};
pub use rain::DigitalRain;
pub use spikes::{Spike, Spikes};
pub use starfield::Starfield;
pub use typewriter::Typewriter;
