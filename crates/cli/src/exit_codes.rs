//! CLI exit code registry.
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | `find` completed but matched nothing           |
//! | 2    | Usage error (bad args, unknown column)         |
//! | 3    | I/O error (unreadable path, failed write)      |
//! | 4    | Decode error (file is not text we can read)    |
//!
//! Clap's own argument rejection also exits with 2.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// `find` ran cleanly but matched nothing, like grep(1).
pub const EXIT_NO_MATCHES: u8 = 1;

/// Usage error - bad arguments, unknown column, malformed index list.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Decode error - bytes could not be decoded with any attempted encoding.
pub const EXIT_DECODE: u8 = 4;
