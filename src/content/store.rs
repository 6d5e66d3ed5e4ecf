//! Content store - reads posts from a directory of markdown files

use anyhow::Result;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{FrontMatter, Post, SortOrder};
use crate::helpers::date;

/// Title shown when front matter has none
const UNTITLED: &str = "Untitled Post";

/// Author shown when front matter has none
const ANONYMOUS: &str = "Anonymous";

/// Non-fatal degradation recorded while scanning the content directory
#[derive(Debug, Error)]
pub enum ScanWarning {
    #[error("content directory {0:?} is missing or unreadable")]
    MissingContentDir(PathBuf),

    #[error("skipped unreadable post {path:?}: {reason}")]
    UnreadablePost { path: PathBuf, reason: String },

    #[error("cannot list {path:?}: {reason}")]
    UnreadableEntry { path: PathBuf, reason: String },

    #[error("ignored {path:?}: another file already claims its slug")]
    DuplicateSlug { path: PathBuf },
}

/// Result of scanning the content directory
#[derive(Debug, Default)]
pub struct Scan {
    pub posts: Vec<Post>,
    pub warnings: Vec<ScanWarning>,
}

/// Reads posts from a content directory, one markdown file per post.
///
/// Every read operation is total: a missing directory or a broken file
/// degrades to fewer posts, never to an error for the caller.
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    /// Create a store over an explicit content directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The content directory this store reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All posts, sorted by date
    pub fn posts(&self, order: SortOrder) -> Vec<Post> {
        self.scan(order).posts
    }

    /// All posts plus the warnings accumulated while reading them
    pub fn scan(&self, order: SortOrder) -> Scan {
        let mut scan = Scan::default();

        if !self.dir.is_dir() {
            tracing::warn!(
                "content directory {:?} not found or not readable, no posts loaded",
                self.dir
            );
            scan.warnings
                .push(ScanWarning::MissingContentDir(self.dir.clone()));
            return scan;
        }

        let (files, mut file_warnings) = self.markdown_files();
        scan.warnings.append(&mut file_warnings);

        for path in files {
            match self.load_post(&path) {
                Ok(post) => scan.posts.push(post),
                Err(e) => {
                    // Skip-and-log: one broken file never breaks the listing
                    tracing::warn!("skipping post {:?}: {}", path, e);
                    scan.warnings.push(ScanWarning::UnreadablePost {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Stable descending sort, so equal dates keep enumeration order.
        // Ascending is defined as the reverse of the descending listing.
        scan.posts
            .sort_by_cached_key(|p| Reverse(date::sort_key(&p.date)));
        if order == SortOrder::Asc {
            scan.posts.reverse();
        }

        scan
    }

    /// Slugs of every markdown file in the content directory
    pub fn slugs(&self) -> Vec<String> {
        if !self.dir.is_dir() {
            tracing::warn!(
                "content directory {:?} not found or not readable, no slugs listed",
                self.dir
            );
            return Vec::new();
        }

        let (files, _) = self.markdown_files();
        files.iter().filter_map(|p| file_stem(p)).collect()
    }

    /// Look up a single post by slug.
    ///
    /// `None` covers both a missing slug and a file that cannot be read;
    /// the latter is logged as an error.
    pub fn get(&self, slug: &str) -> Option<Post> {
        let path = MARKDOWN_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{slug}.{ext}")))
            .find(|p| p.is_file())?;

        match self.load_post(&path) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::error!("failed to read post {:?}: {}", path, e);
                None
            }
        }
    }

    /// Posts flagged as featured, newest first, capped at `limit`.
    ///
    /// Falls back to the newest posts when nothing is flagged.
    pub fn featured(&self, limit: usize) -> Vec<Post> {
        let posts = self.posts(SortOrder::Desc);
        let flagged: Vec<Post> = posts
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .cloned()
            .collect();

        if flagged.is_empty() {
            posts.into_iter().take(limit).collect()
        } else {
            flagged
        }
    }

    /// Markdown files directly under the content directory, in a
    /// deterministic enumeration order, one file per slug.
    ///
    /// Enumeration failures and shadowed duplicates are logged and
    /// returned as warnings alongside the surviving files.
    fn markdown_files(&self) -> (Vec<PathBuf>, Vec<ScanWarning>) {
        let mut warnings = Vec::new();
        let mut candidates: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    let path = entry.into_path();
                    if path.is_file() && is_markdown_file(&path) {
                        candidates.push(path);
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.dir.clone());
                    tracing::warn!("cannot list {:?}: {}", path, e);
                    warnings.push(ScanWarning::UnreadableEntry {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // One file per slug: .md shadows .markdown, the same precedence
        // get() uses for lookup
        let mut files: Vec<PathBuf> = Vec::new();
        for path in candidates {
            let stem = file_stem(&path);
            match files.iter().position(|kept| file_stem(kept) == stem) {
                None => files.push(path),
                Some(idx) => {
                    let shadowed = if extension_rank(&path) < extension_rank(&files[idx]) {
                        std::mem::replace(&mut files[idx], path)
                    } else {
                        path
                    };
                    tracing::warn!(
                        "ignoring {:?}: another file already claims its slug",
                        shadowed
                    );
                    warnings.push(ScanWarning::DuplicateSlug { path: shadowed });
                }
            }
        }

        (files, warnings)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let text = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&text);

        let slug = file_stem(path).unwrap_or_else(|| "untitled".to_string());
        let date = fm.date.unwrap_or_else(date::now_iso);
        let formatted_date = date::display_date(&date);

        Ok(Post {
            slug,
            title: fm.title.unwrap_or_else(|| UNTITLED.to_string()),
            date,
            formatted_date,
            excerpt: fm.excerpt.unwrap_or_default(),
            content: body.to_string(),
            tags: fm.tags,
            author: fm.author.unwrap_or_else(|| ANONYMOUS.to_string()),
            featured: fm.featured,
            featured_image: fm.featured_image,
        })
    }
}

const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Position of the file's extension in the lookup precedence order
fn extension_rank(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|e| MARKDOWN_EXTENSIONS.iter().position(|m| *m == e))
        .unwrap_or(MARKDOWN_EXTENSIONS.len())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        for (name, contents) in files {
            write_post(tmp.path(), name, contents);
        }
        let store = ContentStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn test_slugs_are_file_stems() {
        let (_tmp, store) = store_with(&[
            ("alpha.md", "Alpha body.\n"),
            ("beta.markdown", "Beta body.\n"),
            ("notes.txt", "not a post\n"),
        ]);

        let slugs = store.slugs();
        assert_eq!(slugs, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_missing_directory_degrades_to_empty() {
        let store = ContentStore::new("/nonexistent/posts");
        assert!(store.posts(SortOrder::Desc).is_empty());
        assert!(store.slugs().is_empty());

        let scan = store.scan(SortOrder::Desc);
        assert!(scan.posts.is_empty());
        assert!(matches!(
            scan.warnings.as_slice(),
            [ScanWarning::MissingContentDir(_)]
        ));
    }

    #[test]
    fn test_end_to_end_listing_and_lookup() {
        let (_tmp, store) = store_with(&[
            ("a.md", "---\ndate: 2024-01-01\n---\n\nFirst body.\n"),
            ("b.md", "---\ntitle: \"Second\"\ndate: 2024-06-01\n---\n\nSecond body.\n"),
        ]);

        let posts = store.posts(SortOrder::Desc);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "b");
        assert_eq!(posts[0].title, "Second");
        assert_eq!(posts[1].slug, "a");
        assert_eq!(posts[1].title, UNTITLED);

        let a = store.get("a").unwrap();
        assert_eq!(a.slug, "a");
        assert_eq!(a.title, UNTITLED);
        assert_eq!(a.formatted_date, "January 1, 2024");
        assert!(a.content.contains("First body."));

        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_ascending_is_reverse_of_descending() {
        let (_tmp, store) = store_with(&[
            ("a.md", "---\ndate: 2024-03-01\n---\nA\n"),
            ("b.md", "---\ndate: 2024-01-01\n---\nB\n"),
            // Tie with a.md; enumeration order breaks the tie
            ("c.md", "---\ndate: 2024-03-01\n---\nC\n"),
        ]);

        let desc = store.posts(SortOrder::Desc);
        let mut asc = store.posts(SortOrder::Asc);
        asc.reverse();
        assert_eq!(desc, asc);

        // Stable descending: the tied pair keeps file order
        let order: Vec<&str> = desc.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_listing_is_idempotent() {
        let (_tmp, store) = store_with(&[
            ("one.md", "---\ndate: 2023-05-05\ntags: [x, y]\n---\nOne\n"),
            ("two.md", "---\ndate: 2022-05-05\n---\nTwo\n"),
        ]);

        assert_eq!(store.posts(SortOrder::Desc), store.posts(SortOrder::Desc));
    }

    #[test]
    fn test_all_defaults_applied() {
        let body = "Just the body, no metadata.\n";
        let (_tmp, store) = store_with(&[("bare.md", body)]);

        let post = store.get("bare").unwrap();
        assert_eq!(post.title, UNTITLED);
        assert_eq!(post.author, ANONYMOUS);
        assert_eq!(post.excerpt, "");
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert_eq!(post.featured_image, None);
        assert_eq!(post.content, body);
        // date defaults to "now", which always parses for display
        assert!(!post.date.is_empty());
        assert_ne!(post.formatted_date, crate::helpers::date::DATE_UNAVAILABLE);
    }

    #[test]
    fn test_unparseable_date_sorts_last_and_displays_raw() {
        let (_tmp, store) = store_with(&[
            ("junk.md", "---\ndate: someday\n---\nJunk\n"),
            ("ok.md", "---\ndate: 2024-02-02\n---\nOk\n"),
        ]);

        let posts = store.posts(SortOrder::Desc);
        assert_eq!(posts[0].slug, "ok");
        assert_eq!(posts[1].slug, "junk");
        assert_eq!(posts[1].date, "someday");
        assert_eq!(posts[1].formatted_date, "someday");
    }

    #[test]
    fn test_featured_selection_and_fallback() {
        let (_tmp, store) = store_with(&[
            ("plain.md", "---\ndate: 2024-05-01\n---\nPlain\n"),
            ("pinned.md", "---\ndate: 2024-01-01\nfeatured: true\n---\nPinned\n"),
        ]);

        let featured = store.featured(3);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].slug, "pinned");

        // Nothing flagged: newest posts stand in
        let (_tmp2, store2) = store_with(&[
            ("old.md", "---\ndate: 2020-01-01\n---\nOld\n"),
            ("new.md", "---\ndate: 2024-01-01\n---\nNew\n"),
        ]);
        let fallback = store2.featured(1);
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].slug, "new");
    }

    #[test]
    fn test_malformed_metadata_never_drops_a_post() {
        let (_tmp, store) = store_with(&[(
            "odd.md",
            "---\ntitle: Odd\nfeatured: [not, a, bool]\n---\n\nStill here.\n",
        )]);

        let posts = store.posts(SortOrder::Desc);
        assert_eq!(posts.len(), 1);
        // Whole header degraded to defaults, body survived without it
        assert_eq!(posts[0].title, UNTITLED);
        assert!(posts[0].content.contains("Still here."));
        assert!(!posts[0].content.contains("featured:"));
    }

    #[test]
    fn test_duplicate_slug_prefers_md() {
        let (_tmp, store) = store_with(&[
            ("a.markdown", "---\ntitle: Shadowed\ndate: 2024-01-01\n---\nOld\n"),
            ("a.md", "---\ntitle: Kept\ndate: 2024-01-01\n---\nNew\n"),
        ]);

        // One slug, no duplicates
        assert_eq!(store.slugs(), vec!["a"]);

        let scan = store.scan(SortOrder::Desc);
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.posts[0].title, "Kept");
        assert!(matches!(
            scan.warnings.as_slice(),
            [ScanWarning::DuplicateSlug { .. }]
        ));

        // Listing and lookup agree on which file owns the slug
        assert_eq!(store.get("a").unwrap().title, "Kept");
    }

    #[cfg(unix)]
    #[test]
    fn test_enumeration_errors_are_recorded() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "good.md", "---\ndate: 2024-01-01\n---\nGood\n");
        // A self-referencing symlink fails when followed during listing
        std::os::unix::fs::symlink(tmp.path().join("loop"), tmp.path().join("loop")).unwrap();

        let store = ContentStore::new(tmp.path());
        let scan = store.scan(SortOrder::Desc);
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.posts[0].slug, "good");
        assert!(scan
            .warnings
            .iter()
            .any(|w| matches!(w, ScanWarning::UnreadableEntry { .. })));
    }

    #[test]
    fn test_get_by_markdown_extension() {
        let (_tmp, store) = store_with(&[("notes.markdown", "---\ntitle: Notes\n---\nN\n")]);
        let post = store.get("notes").unwrap();
        assert_eq!(post.slug, "notes");
        assert_eq!(post.title, "Notes");
    }

    #[test]
    fn test_scan_skips_unreadable_entries() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "good.md", "---\ndate: 2024-01-01\n---\nGood\n");
        // Invalid UTF-8 makes read_to_string fail for this file
        fs::write(tmp.path().join("bad.md"), [0xff, 0xfe, 0xfd]).unwrap();

        let store = ContentStore::new(tmp.path());
        let scan = store.scan(SortOrder::Desc);
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.posts[0].slug, "good");
        assert!(matches!(
            scan.warnings.as_slice(),
            [ScanWarning::UnreadablePost { .. }]
        ));

        // The broken file also reads as not-found individually
        assert!(store.get("bad").is_none());
    }
}
