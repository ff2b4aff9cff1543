//! Command implementations.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

pub mod envelope;
pub mod normalize;
pub mod refs;

/// Reads the whole input, from `file` or from standard input for `None` and `-`.
pub fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
