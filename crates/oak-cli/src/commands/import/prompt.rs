use std::io::{self, BufRead, Write};

use oak_core::merge::{ConflictResolver, MergeConflict, Resolution};
use tracing::warn;

/// Asks on a terminal how to settle each scalar conflict.
///
/// Answers: `e` keep existing (default), `i` take imported, `s` skip the
/// record, and `E`/`I` to apply that choice to every remaining conflict.
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
    sticky: Option<Resolution>,
}

impl<R, W> PromptResolver<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            sticky: None,
        }
    }
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    /// Show the prompt and read one answer line. `Ok(0)` means end of input.
    fn ask(
        &mut self,
        entry_name: &str,
        conflict: &MergeConflict,
        line: &mut String,
    ) -> io::Result<usize> {
        write!(
            self.output,
            "{entry_name}: {conflict}\n  keep [e]xisting, take [i]mported, [s]kip record \
             (E/I = for all) [e]: "
        )?;
        self.output.flush()?;
        self.input.read_line(line)
    }
}

impl<R, W> ConflictResolver for PromptResolver<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn resolve(&mut self, entry_name: &str, conflict: &MergeConflict) -> Resolution {
        if let Some(answer) = self.sticky {
            return answer;
        }

        loop {
            let mut line = String::new();
            match self.ask(entry_name, conflict, &mut line) {
                Ok(0) => return Resolution::SkipRecord,
                Ok(_) => {}
                Err(e) => {
                    warn!(entry = entry_name, error = %e, "conflict prompt failed, skipping record");
                    return Resolution::SkipRecord;
                }
            }
            match line.trim() {
                "" | "e" => return Resolution::KeepExisting,
                "i" => return Resolution::TakeImported,
                "s" => return Resolution::SkipRecord,
                "E" => return *self.sticky.insert(Resolution::KeepExisting),
                "I" => return *self.sticky.insert(Resolution::TakeImported),
                _ => {}
            }
        }
    }
}
