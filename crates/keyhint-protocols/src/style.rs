//! Inline style applied to every hint label.

use serde::{Deserialize, Serialize};

/// Inline style for hint labels.
///
/// Labels sit above page content (`z_index`) and are absolutely positioned
/// by the host at the coordinates carried in [`crate::LabelSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    #[serde(default = "default_z_index")]
    pub z_index: i32,

    #[serde(default = "default_padding")]
    pub padding: String,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_foreground")]
    pub foreground: String,

    #[serde(default = "default_border_color")]
    pub border_color: String,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_font_size")]
    pub font_size: String,

    #[serde(default = "default_bold")]
    pub bold: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            z_index: default_z_index(),
            padding: default_padding(),
            background: default_background(),
            foreground: default_foreground(),
            border_color: default_border_color(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            bold: default_bold(),
        }
    }
}

impl LabelStyle {
    /// Render as a CSS declaration block for hosts that style via `style=""`.
    pub fn to_css(&self) -> String {
        format!(
            "z-index: {}; position: absolute; padding: {}; background-color: {}; \
             color: {}; border-color: {}; font-family: {}; font-size: {}; \
             line-height: 1; font-weight: {}; white-space: nowrap; text-shadow: none; \
             pointer-events: none",
            self.z_index,
            self.padding,
            self.background,
            self.foreground,
            self.border_color,
            self.font_family,
            self.font_size,
            if self.bold { "bold" } else { "normal" },
        )
    }
}

fn default_z_index() -> i32 {
    100_000
}

fn default_padding() -> String {
    "0.2em".to_string()
}

fn default_background() -> String {
    "#ffd76e".to_string()
}

fn default_foreground() -> String {
    "#000000".to_string()
}

fn default_border_color() -> String {
    "rgba(0, 0, 0, 0.4)".to_string()
}

fn default_font_family() -> String {
    "monospace".to_string()
}

fn default_font_size() -> String {
    "1em".to_string()
}

fn default_bold() -> bool {
    true
}
