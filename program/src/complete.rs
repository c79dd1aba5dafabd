//! Shell completion over the `COMP_LINE`/`COMP_POINT` protocol.
//!
//! When a completion-enabled shell invokes the program it exports the
//! command line being edited and the cursor offset. If those variables
//! are present, candidates for the word under the cursor are printed one
//! per line and the process exits before any parsing happens. Without
//! them this module is a no-op.

use std::env;

use tracing::debug;

use crate::program::{Program, SubProgram};

/// Respond to a shell completion request, if one is active.
pub(crate) fn autocomplete(program: &Program) {
    let Ok(line) = env::var("COMP_LINE") else {
        return;
    };
    let point = env::var("COMP_POINT")
        .ok()
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(line.len())
        .min(line.len());
    let prefix = floor_char_boundary(&line, point);

    let mut words: Vec<&str> = prefix.split_whitespace().collect();
    let current = if prefix.ends_with(char::is_whitespace) {
        ""
    } else {
        words.pop().unwrap_or("")
    };
    // Skip the program name itself.
    let path = words.get(1..).unwrap_or(&[]);

    let candidates = candidates_for(program, path, current);
    debug!(current, count = candidates.len(), "completion request");
    for candidate in candidates {
        println!("{candidate}");
    }
    std::process::exit(0);
}

fn floor_char_boundary(line: &str, point: usize) -> &str {
    let mut end = point;
    while end > 0 && !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// Candidates for the word under the cursor.
///
/// `path` is the already-completed words after the program name. The
/// tree is walked as far as those words reach; the reachable level's
/// sub-programs, commands, aliases, and option spellings are offered.
/// Inside a command, its option spellings are offered, and a word that
/// follows an option with a registered completer defers to it.
pub(crate) fn candidates_for(program: &Program, path: &[&str], current: &str) -> Vec<String> {
    let mut level: &SubProgram = &program.root;
    for (i, word) in path.iter().enumerate() {
        if let Some(child) = level.subprogs.iter().find(|s| s.name == *word) {
            level = child;
            continue;
        }
        if let Some(node) = level.commands.iter().find(|c| c.answers_to(word)) {
            // Completer of the option the previous word spelled, if any.
            if let Some(prev) = path.get(i + 1..).and_then(|rest| rest.last()) {
                for spec in &node.args {
                    if spec.option_strings.iter().any(|s| s == prev) {
                        if let Some(completer) = &spec.meta.completer {
                            return completer(current);
                        }
                    }
                }
            }
            let mut out: Vec<String> = node
                .args
                .iter()
                .filter(|spec| !spec.is_positional())
                .flat_map(|spec| spec.option_strings.iter().cloned())
                .filter(|s| s.starts_with(current))
                .collect();
            out.sort();
            return out;
        }
        // Unknown word: nothing sensible to offer.
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    out.extend(level.subprogs.iter().map(|s| s.name.clone()));
    for node in &level.commands {
        out.push(node.name.clone());
        out.extend(node.aliases.iter().cloned());
    }
    out.extend(
        level
            .options
            .iter()
            .flat_map(|spec| spec.option_strings.iter().cloned()),
    );
    out.retain(|c| c.starts_with(current));
    out.sort();
    out
}
