use std::io::{BufRead, Write};
use std::path::Path;

/// What to do with an output path that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Overwrite,
    Skip,
    /// Skip this file and stop the whole batch.
    Abort,
}

/// Consulted once per existing output path, before anything is written to it.
pub trait ConflictPolicy {
    fn decide(&mut self, path: &Path) -> Decision;
}

/// A fixed answer, e.g. from `--overwrite` or `--skip-existing`.
impl ConflictPolicy for Decision {
    fn decide(&mut self, _path: &Path) -> Decision {
        *self
    }
}

impl<F> ConflictPolicy for F
where
    F: FnMut(&Path) -> Decision,
{
    fn decide(&mut self, path: &Path) -> Decision {
        self(path)
    }
}

/// Asks on `output` and reads the answer from `input`, one line per conflict.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }
}

impl<R: BufRead, W: Write> ConflictPolicy for Prompt<R, W> {
    fn decide(&mut self, path: &Path) -> Decision {
        loop {
            // A prompt we cannot show is treated like one nobody answered.
            if write!(
                self.output,
                "{} already exists. Overwrite? [y]es/[n]o/[a]bort: ",
                path.display()
            )
            .and_then(|_| self.output.flush())
            .is_err()
            {
                return Decision::Skip;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return Decision::Skip,
                Ok(_) => {}
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Decision::Overwrite,
                "n" | "no" | "" => return Decision::Skip,
                "a" | "abort" => return Decision::Abort,
                _ => continue,
            }
        }
    }
}
