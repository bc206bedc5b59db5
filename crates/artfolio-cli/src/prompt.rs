//! Interactive prompt helpers.
//!
//! The reader is injected so command flows can be driven by a buffer in
//! tests. Blank input takes the default when one exists; required fields
//! re-prompt until something is entered.

use std::io::{self, BufRead, Write};

/// Prompt for a line of input.
///
/// Shows `[default]` after the prompt when a default exists. Returns the
/// default on blank input; re-prompts on blank input for required fields
/// without a default. EOF is an error (the operator walked away).
pub fn prompt_input(
    input: &mut impl BufRead,
    prompt: &str,
    default: Option<&str>,
    required: bool,
) -> io::Result<String> {
    loop {
        match default {
            Some(d) => print!("{prompt} [{d}]: "),
            None => print!("{prompt}: "),
        }
        io::stdout().flush()?;

        let Some(value) = read_trimmed(input)? else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        };

        if value.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
            if required {
                println!("This field is required.");
                continue;
            }
        }
        return Ok(value);
    }
}

/// Prompt for a yes/no answer; re-prompts on anything else.
pub fn yes_no(input: &mut impl BufRead, prompt: &str, default: Option<bool>) -> io::Result<bool> {
    loop {
        match default {
            Some(d) => print!("{prompt} (y/n) [{}]: ", if d { "y" } else { "n" }),
            None => print!("{prompt} (y/n): "),
        }
        io::stdout().flush()?;

        let Some(value) = read_trimmed(input)? else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        };

        let value = value.to_lowercase();
        if value.is_empty() {
            if let Some(d) = default {
                return Ok(d);
            }
        }
        match value.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'."),
        }
    }
}

/// Read one line, trimmed. `None` on EOF.
fn read_trimmed(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
