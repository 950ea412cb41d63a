//! Interactive prompts for values not given on the command line.
//!
//! The readers are generic over `BufRead`/`Write` so they can be driven from
//! stdin in the binary and from in-memory buffers in tests.

use std::io::{self, BufRead, Write};

/// Ask for a number, re-asking until the answer parses as a finite `f64`.
///
/// Returns `UnexpectedEof` if input ends before a number is given.
pub fn prompt_f64<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<f64> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let line = read_answer(input)?;
        match line.parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(value),
            _ => writeln!(output, "  '{}' is not a number, try again.", line)?,
        }
    }
}

/// Ask a yes/no question. Anything other than `y`/`yes` counts as no,
/// including input that is already closed.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    write!(output, "{} (y/n): ", question)?;
    output.flush()?;

    let answer = match read_answer(input) {
        Ok(answer) => answer.to_ascii_lowercase(),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            writeln!(output)?;
            return Ok(false);
        }
        Err(e) => return Err(e),
    };
    Ok(answer == "y" || answer == "yes")
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}
