//! Password input: hidden prompt, stdin, or a literal flag value.

use std::io::BufRead;

use anyhow::{Context, Result};

/// Flag value selecting stdin as the password source
const STDIN_MARKER: &str = "-";

/// Resolve the `--password` flag. Omitted prompts without echo; `-` reads
/// the first line of stdin; anything else is the password itself.
pub fn read_password(flag: Option<&str>) -> Result<String> {
    match flag {
        None | Some("") => {
            rpassword::prompt_password("Enter password: ").context("failed to read password")
        }
        Some(STDIN_MARKER) => read_first_line(std::io::stdin().lock()),
        Some(literal) => Ok(literal.to_string()),
    }
}

fn read_first_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_flag() {
        assert_eq!(read_password(Some("PLAIN_SECRET_PASS")).unwrap(), "PLAIN_SECRET_PASS");
    }

    #[test]
    fn test_first_line_trimmed() {
        let input = b"  mypassword \nsecond line\n";
        assert_eq!(read_first_line(&input[..]).unwrap(), "mypassword");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(read_first_line(&b""[..]).unwrap(), "");
    }
}
