use crate::error::Error;
use crate::solver::Solver;
use std::fs::read_to_string;

/// Read a dictionary file: whitespace-separated words, uppercased on
/// load. Tokens containing anything but ASCII letters are dropped
/// silently.
///
/// ## Errors
/// Fails if the file can not be read.
pub fn read_words(path: &str) -> Result<Vec<String>, Error> {
    let text = read_to_string(path).map_err(|source| Error::ReadError {
        path: String::from(path),
        source,
    })?;
    Ok(text
        .split_whitespace()
        .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
        .collect())
}

/// Build a solver with the dictionary loaded from `path`.
///
/// ## Errors
/// Fails if the dictionary file can not be read.
pub fn load_solver(path: &str) -> Result<Solver, Error> {
    let mut solver = Solver::new();
    for word in read_words(path)? {
        solver.add_word(&word);
    }
    Ok(solver)
}
