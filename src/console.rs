//! Line-by-line front end over any reader and writer.

use std::io::{self, BufRead, Write};

use crate::color;
use crate::interpreter::Interpreter;

/// Run a session until `bye` or end of input.
///
/// End of input is handled as `bye` so the farewell is always printed.
pub fn run_console<R, W>(interp: &mut Interpreter, input: R, mut output: W, colored: bool) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    write_framed(&mut output, interp.greeting(), colored)?;

    let mut lines = input.lines();
    loop {
        let line = match lines.next() {
            Some(line) => line?,
            None => "bye".to_string(),
        };

        let response = interp.handle(&line);
        write_framed(&mut output, &response.message, colored)?;
        if response.exit {
            break;
        }
    }

    interp.finish();
    output.flush()
}

fn write_framed<W: Write>(output: &mut W, message: &str, colored: bool) -> io::Result<()> {
    if colored {
        writeln!(output, "{}", color::dim(color::RULE))?;
        writeln!(output, "{}", color::response(message))?;
        writeln!(output, "{}", color::dim(color::RULE))?;
    } else {
        writeln!(output, "{}", color::RULE)?;
        writeln!(output, "{}", message)?;
        writeln!(output, "{}", color::RULE)?;
    }
    output.flush()
}
