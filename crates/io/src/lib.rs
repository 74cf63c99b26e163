// File I/O operations

pub mod clipboard;
pub mod codec;
pub mod csv;
pub mod encoding;
pub mod error;
