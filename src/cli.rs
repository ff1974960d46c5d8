//! CLI definitions and key script parsing for keyhint.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use keyhint_core::KeyInput;

/// keyhint CLI.
#[derive(Parser)]
#[command(name = "keyhint")]
#[command(about = "Keyboard hint overlay for page snapshots")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long, global = true, env = "KEYHINT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the hints discovered on a page
    Hints {
        /// Page snapshot (JSON)
        #[arg(short, long)]
        page: PathBuf,
    },

    /// Enter hint mode and replay a key script
    Run {
        /// Page snapshot (JSON)
        #[arg(short, long)]
        page: PathBuf,

        /// Keys to replay, e.g. "12<CR>" or "1<BS>3"
        #[arg(short, long)]
        keys: String,

        /// Open activated links in a new browsing context
        #[arg(long)]
        new_tab: bool,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum KeyScriptError {
    #[error("unknown key name <{0}>")]
    UnknownKey(String),

    #[error("unterminated key name starting at offset {0}")]
    Unterminated(usize),
}

/// Parse a key script: single characters, plus `<BS>`, `<CR>` and `<Esc>`
/// (case-insensitive). Whitespace is ignored.
pub(crate) fn parse_keys(script: &str) -> Result<Vec<KeyInput>, KeyScriptError> {
    let mut keys = Vec::new();
    let mut chars = script.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c != '<' {
            keys.push(KeyInput::Char(c));
            continue;
        }
        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '>' {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(KeyScriptError::Unterminated(offset));
        }
        let key = match name.to_ascii_lowercase().as_str() {
            "bs" | "backspace" => KeyInput::Backspace,
            "cr" | "enter" => KeyInput::Enter,
            "esc" | "escape" => KeyInput::Escape,
            _ => return Err(KeyScriptError::UnknownKey(name)),
        };
        keys.push(key);
    }
    Ok(keys)
}
