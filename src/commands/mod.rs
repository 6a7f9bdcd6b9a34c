mod config;
mod create;
mod dashboard;
mod faq;
mod ls;
mod reply;
mod set;
mod show;
mod watch;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use dashboard::cmd_dashboard;
pub use faq::{FaqEditOptions, cmd_faq_add, cmd_faq_edit, cmd_faq_ls, cmd_faq_rm};
pub use ls::{LsOptions, cmd_ls};
pub use reply::cmd_reply;
pub use set::{SetOptions, cmd_set};
pub use show::cmd_show;
pub use watch::cmd_watch;

use std::io::{BufRead, Read, Write};

use crate::error::Result;

/// Ask the operator for confirmation before a destructive action.
/// Returns false (abort) when stdin is not interactive.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        eprintln!("{}: refusing without an interactive terminal (use --force)", prompt);
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Read trailing text from an argument or from piped stdin
pub fn text_from_arg_or_stdin(arg: Option<String>) -> Result<Option<String>> {
    if let Some(text) = arg {
        return Ok(Some(text));
    }
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    std::io::stdin().lock().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
