pub mod api;

use crate::record::Animal;
use crate::runner::RunnerError;
use crate::utils;

// anything that can answer "which animals match this name"
pub trait AnimalLookup {
    fn lookup(&self, name: &str) -> Result<Vec<Animal>, RunnerError>;
}

impl<F> AnimalLookup for F
where
    F: Fn(&str) -> Result<Vec<Animal>, RunnerError>,
{
    fn lookup(&self, name: &str) -> Result<Vec<Animal>, RunnerError> {
        self(name)
    }
}

pub fn parse_records(
    kind: &'static str,
    path: &str,
    contents: &str,
) -> Result<Vec<Animal>, RunnerError> {
    serde_json::from_str::<Vec<Animal>>(contents).map_err(|source| RunnerError::Malformed {
        kind,
        path: path.to_string(),
        source,
    })
}

/// Loads the animal records stored as a JSON array in `path`.
pub fn load_records(path: &str) -> Result<Vec<Animal>, RunnerError> {
    let contents = utils::read_input("data file", path)?;
    parse_records("data file", path, &contents)
}
