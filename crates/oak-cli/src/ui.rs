use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
    ));
}

fn prefs_for(flags: &GlobalFlags, stdout_tty: bool, stderr_tty: bool) -> UiPrefs {
    let table_color = stdout_tty
        && flags.format == OutputFormat::Table
        && !flags.quiet
        && std::env::var_os("NO_COLOR").is_none();

    let progress = stderr_tty && !flags.quiet && flags.format != OutputFormat::Raw;

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::prefs_for;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet,
            verbose: false,
            db: None,
        }
    }

    #[test]
    fn quiet_disables_progress() {
        assert!(!prefs_for(&flags(OutputFormat::Json, true), true, true).progress);
        assert!(prefs_for(&flags(OutputFormat::Json, false), true, true).progress);
    }

    #[test]
    fn no_progress_without_terminal() {
        assert!(!prefs_for(&flags(OutputFormat::Table, false), true, false).progress);
    }

    #[test]
    fn color_only_for_tables_on_terminal() {
        assert!(!prefs_for(&flags(OutputFormat::Json, false), true, true).table_color);
        assert!(!prefs_for(&flags(OutputFormat::Table, false), false, true).table_color);
    }
}
