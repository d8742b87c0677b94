use std::io::ErrorKind;

use colored::Colorize;

use crate::runner::RunnerError;

// reads a whole input file, treating a missing or blank file as a load failure
pub fn read_input(kind: &'static str, path: &str) -> Result<String, RunnerError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(RunnerError::NotFound {
                kind,
                path: path.to_string(),
            })
        }
        Err(source) => {
            return Err(RunnerError::FileRead {
                kind,
                path: path.to_string(),
                source,
            })
        }
    };
    if contents.trim().is_empty() {
        return Err(RunnerError::EmptyInput {
            kind,
            path: path.to_string(),
        });
    }
    Ok(contents)
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn tag(label: &str, color: colored::Color) -> String {
    format!(
        "{}{}{}",
        "[".bold().white(),
        label.bold().color(color),
        "]".bold().white()
    )
}

pub fn info(message: &str) {
    println!("{} {}", tag("INF", colored::Color::Blue), message);
}

pub fn success(message: &str) {
    println!("{} {}", tag("OK", colored::Color::Green), message.bold().white());
}

pub fn warn(message: &str) {
    println!("{} {}", tag("WRN", colored::Color::Yellow), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", tag("ERR", colored::Color::Red), message.red());
}

pub fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}
