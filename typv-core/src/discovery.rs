//! Font file discovery for typv-core (made by FontLab https://www.fontlab.com/)

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use walkdir::WalkDir;

/// Path to a candidate font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFileRef {
    pub path: PathBuf,
}

/// Enumerates candidate font files from some backing store.
pub trait FontDiscovery {
    fn discover(&self) -> Result<Vec<FontFileRef>>;
}

/// Recursive filesystem walker that collects common font formats.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl FontDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<FontFileRef>> {
        let mut found = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                return Err(anyhow!("font path does not exist: {}", root.display()));
            }

            for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
                let entry = entry?;
                if entry.file_type().is_file() && is_font(entry.path()) {
                    found.push(FontFileRef {
                        path: entry.path().to_path_buf(),
                    });
                }
            }
        }

        Ok(found)
    }
}

pub(crate) fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn recognises_font_extensions() {
        assert!(is_font("/A/B/font.ttf".as_ref()));
        assert!(is_font("/A/B/font.OTC".as_ref()));
        assert!(!is_font("/A/B/font.woff2".as_ref()));
        assert!(!is_font("/A/B/font".as_ref()));
    }

    #[test]
    fn single_file_root_is_discovered() {
        let tmp = tempdir().expect("tempdir");
        let font_path = tmp.path().join("solo.otf");
        fs::write(&font_path, b"").expect("touch font");

        let fonts = PathDiscovery::new([&font_path]).discover().expect("discover");

        assert_eq!(fonts, vec![FontFileRef { path: font_path }]);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_when_enabled() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let real_dir = tmp.path().join("real");
        let link_dir = tmp.path().join("link");
        fs::create_dir_all(&real_dir).expect("mkdir real");
        fs::write(real_dir.join("linked.ttf"), b"").expect("touch font");
        symlink(&real_dir, &link_dir).expect("symlink");

        let fonts = PathDiscovery::new([&link_dir])
            .follow_symlinks(true)
            .discover()
            .expect("discover");

        assert!(fonts.iter().any(|f| f.path.ends_with("linked.ttf")));
    }
}
