use std::io::{BufRead, Write};

use itertools::Itertools;

use crate::record::{Animal, Attribute};
use crate::render::Filter;
use crate::runner::RunnerError;
use crate::source::api;

pub const SHOW_ALL: &str = "Show all";

/// Distinct non-empty values of `attribute`, sorted so the menu is stable.
pub fn distinct_values(animals: &[Animal], attribute: Attribute) -> Vec<String> {
    animals
        .iter()
        .filter_map(|animal| animal.characteristic(attribute))
        .unique()
        .sorted()
        .map(str::to_string)
        .collect()
}

// index 0 is always the "show all" entry
pub fn menu_options(values: &[String]) -> Vec<String> {
    std::iter::once(SHOW_ALL.to_string())
        .chain(values.iter().cloned())
        .collect()
}

pub fn filter_for_choice(
    attribute: Attribute,
    options: &[String],
    choice: usize,
) -> Option<Filter> {
    if choice == 0 {
        return None;
    }
    options.get(choice).map(|value| Filter {
        attribute,
        value: value.clone(),
    })
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, RunnerError> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|source| RunnerError::Prompt { source })?;
    if read == 0 {
        return Err(RunnerError::PromptClosed);
    }
    Ok(line.trim().to_string())
}

fn flush<W: Write>(output: &mut W) -> Result<(), RunnerError> {
    output.flush().map_err(|source| RunnerError::Prompt { source })
}

/// Prints the numbered menu and keeps asking until the answer is a valid index.
pub fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    attribute: Attribute,
    options: &[String],
) -> Result<usize, RunnerError> {
    let write_err = |source| RunnerError::Prompt { source };
    writeln!(output, "Filter by {}:", attribute.label().to_lowercase()).map_err(write_err)?;
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "  {i}. {option}").map_err(write_err)?;
    }
    loop {
        write!(output, "Enter a choice (0-{}): ", options.len().saturating_sub(1))
            .map_err(write_err)?;
        flush(output)?;
        let answer = read_line(input)?;
        match answer.parse::<usize>() {
            Ok(choice) if choice < options.len() => return Ok(choice),
            _ => writeln!(output, "Invalid choice '{answer}', try again.").map_err(write_err)?,
        }
    }
}

/// Asks for an animal name until one of at least three characters is given.
pub fn prompt_query<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<String, RunnerError> {
    loop {
        write!(output, "Enter a name of an animal: ")
            .map_err(|source| RunnerError::Prompt { source })?;
        flush(output)?;
        let answer = read_line(input)?;
        if api::validate_query(&answer).is_ok() {
            return Ok(answer);
        }
        writeln!(
            output,
            "Please enter at least {} characters.",
            api::MIN_QUERY_LEN
        )
        .map_err(|source| RunnerError::Prompt { source })?;
    }
}
