// Example: answer a FENTREE-style command stream read from stdin.
//
//   printf '5\n1 2 3 4 5\n3\nq 1 5\nu 3 10\nq 1 5\n' | cargo run --example fentree
use std::io::{self, BufWriter, Write};

use fentree::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = io::read_to_string(io::stdin())?;
    let session = Session::parse(&input)?;

    let mut out = BufWriter::new(io::stdout().lock());
    let mut write_err = None;
    session.run_each(|answer| {
        if write_err.is_none() {
            if let Err(err) = writeln!(out, "{answer}") {
                write_err = Some(err);
            }
        }
    })?;
    if let Some(err) = write_err {
        return Err(err.into());
    }
    out.flush()?;
    Ok(())
}
