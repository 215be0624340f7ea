pub mod lifecycle;

pub use lifecycle::{advance_backdrop, apply_remount, mount_backdrop, teardown_on_exit};
