//! Interactive confirmation.

use std::io::BufRead;

/// `y` or `yes`, case-insensitive, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Read one line from `input` and decide.
///
/// End of input and read errors decline.
pub fn read_confirmation<R: BufRead>(input: &mut R) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => false,
        Ok(_) => is_affirmative(&line),
        Err(err) => {
            tracing::debug!(error = %err, "Could not read confirmation");
            false
        }
    }
}
