pub mod board_ops;
pub mod drag;
pub mod form;
pub mod id;
pub mod progress;
pub mod reorder;
pub mod store;
