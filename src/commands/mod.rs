pub mod extract;
pub mod info;
pub mod pages;
pub mod split;

use crate::cli::ConflictArgs;
use crate::conflict::{ConflictPolicy, Prompt};

/// Fixed answer from flags, or ask on the terminal for each conflict.
pub fn conflict_policy(args: &ConflictArgs) -> Box<dyn ConflictPolicy> {
    match args.decision() {
        Some(decision) => Box::new(decision),
        None => Box::new(Prompt::new(std::io::stdin().lock(), std::io::stderr())),
    }
}
