//! Configuration for routers and layout trees.
//!
//! Everything that used to be a process-wide default (the terminate key,
//! the frame drawn around trees and nodes) is an explicit value passed at
//! construction. Every field has a documented default, and the whole
//! configuration can be read from TOML:
//!
//! ```toml
//! [router]
//! quit_key = "ctrl+c"
//!
//! [style.tree]
//! border = "normal"
//! padding = 0
//!
//! [style.node]
//! border = "none"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::KeyPress;
use crate::style::{BorderKind, FrameStyle};

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Key that terminates the program, checked before anything else.
    ///
    /// Default: `ctrl+c`.
    pub quit_key: KeyPress,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            quit_key: KeyPress::ctrl('c'),
        }
    }
}

/// Default frames used by layout trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Frame around each tree's own box.
    ///
    /// Default: a normal single-line border, no padding, no color.
    pub tree: FrameStyle,
    /// Frame around each node added without an explicit style.
    ///
    /// Default: no border, no padding.
    pub node: FrameStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            tree: FrameStyle::bordered(BorderKind::Normal),
            node: FrameStyle::plain(),
        }
    }
}

impl StyleConfig {
    /// No frames anywhere: trees and nodes use their full boxes for content.
    pub const fn frameless() -> Self {
        Self {
            tree: FrameStyle::plain(),
            node: FrameStyle::plain(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Router settings.
    pub router: RouterConfig,
    /// Layout frame defaults.
    pub style: StyleConfig,
}

impl Config {
    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
