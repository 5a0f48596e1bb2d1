use crate::selector::SelectionResult;
use std::path::Path;

/// The `try()` function users eval into their shell. The selector draws on
/// stderr (redirected to the tty), so stdout carries only the command to run.
pub fn init_snippet(script_path: &Path, base_path: &Path) -> String {
    format!(
        "try() {{\n  script_path='{}';\n  cmd=$(\"$script_path\" cd --path \"{}\" \"$@\" 2>/dev/tty);\n  [ $? -eq 0 ] && eval \"$cmd\" || echo \"$cmd\";\n}}\n",
        script_path.display(),
        base_path.display()
    )
}

/// Translate a session's outcome into the one-line command the shell
/// function evals. Cancelling yields nothing, which evals to a no-op.
pub fn command_for(result: &SelectionResult) -> Option<String> {
    match result {
        SelectionResult::EnterExisting(path) => Some(format!(
            "dir={} && touch \"$dir\" && cd \"$dir\"",
            quote(path)
        )),
        SelectionResult::CreateNew(path) => Some(format!(
            "dir={} && mkdir -p \"$dir\" && touch \"$dir\" && cd \"$dir\"",
            quote(path)
        )),
        SelectionResult::Cancelled => None,
    }
}

fn quote(path: &Path) -> String {
    let text = path.to_string_lossy();
    format!("'{}'", text.replace('\'', "'\\''"))
}
