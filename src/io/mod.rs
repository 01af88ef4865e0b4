pub mod atomic;
pub mod board_io;
pub mod lock;
pub mod logging;
