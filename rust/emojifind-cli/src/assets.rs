//! File layout
//!
//! ```text
//! input/                 assets/
//!   emoji-test.txt         groups.csv
//!   en.xml                 emoji.csv
//!                          index.json
//!                          desc/<glyph>.txt
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const EMOJI_TEST_FILE: &str = "emoji-test.txt";
pub const ANNOTATIONS_FILE: &str = "en.xml";

pub const GROUPS_FILE: &str = "groups.csv";
pub const EMOJI_FILE: &str = "emoji.csv";
pub const INDEX_FILE: &str = "index.json";
pub const DESCRIPTION_DIR: &str = "desc";

/// Unicode source files
#[derive(Debug, Clone)]
pub struct InputPaths {
    root: PathBuf,
}

impl InputPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn emoji_test(&self) -> PathBuf {
        self.root.join(EMOJI_TEST_FILE)
    }

    pub fn annotations(&self) -> PathBuf {
        self.root.join(ANNOTATIONS_FILE)
    }
}

/// Files shipped to the app
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn groups(&self) -> PathBuf {
        self.root.join(GROUPS_FILE)
    }

    pub fn emoji(&self) -> PathBuf {
        self.root.join(EMOJI_FILE)
    }

    pub fn index(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn descriptions(&self) -> PathBuf {
        self.root.join(DESCRIPTION_DIR)
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write a file, creating its directory first
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
