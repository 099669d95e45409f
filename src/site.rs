//! Whole-site build: static asset copy and recursive page generation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::SiteError;
use crate::page::{Template, generate_page};

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub assets: usize,
}

/// Build the site described by `config`.
///
/// Optionally wipes the output directory, copies the static directory into
/// it, then generates one HTML page per markdown file of the content tree.
pub fn build(config: &Config) -> Result<BuildSummary, SiteError> {
    if config.clean && config.output_dir.exists() {
        check_clean_target(config)?;
        tracing::info!(path = %config.output_dir.display(), "Removing output directory");
        fs::remove_dir_all(&config.output_dir).map_err(|e| SiteError::io(&config.output_dir, e))?;
    }

    let assets = if config.static_dir.is_dir() {
        copy_static(&config.static_dir, &config.output_dir)?
    } else {
        tracing::warn!(path = %config.static_dir.display(), "Static directory not found, skipping");
        fs::create_dir_all(&config.output_dir).map_err(|e| SiteError::io(&config.output_dir, e))?;
        0
    };

    let template = Template::load(&config.template)?;
    let pages = generate_pages_recursive(
        &config.content_dir,
        &template,
        &config.output_dir,
        &config.base_path,
    )?;

    let summary = BuildSummary { pages, assets };
    tracing::info!(pages = summary.pages, assets = summary.assets, "Site build completed");
    Ok(summary)
}

/// Generate pages for every `.md` file under `content_dir`, mirroring the
/// directory structure into `dest_dir`. Returns the number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &Template,
    dest_dir: &Path,
    base_path: &str,
) -> Result<usize, SiteError> {
    let mut pages = 0;

    for path in sorted_entries(content_dir)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let dest = dest_dir.join(name);

        if path.is_dir() {
            pages += generate_pages_recursive(&path, template, &dest, base_path)?;
        } else if is_markdown(&path) {
            generate_page(&path, template, &dest.with_extension("html"), base_path)?;
            pages += 1;
        } else {
            tracing::debug!(path = %path.display(), "Ignoring non-markdown file");
        }
    }

    Ok(pages)
}

/// Copy `src` recursively into `dst`. Returns the number of files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(dst).map_err(|e| SiteError::io(dst, e))?;
    let mut copied = 0;

    for path in sorted_entries(src)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dst.join(name);

        if path.is_dir() {
            copied += copy_static(&path, &target)?;
        } else {
            tracing::debug!(from = %path.display(), to = %target.display(), "Copying asset");
            fs::copy(&path, &target).map_err(|e| SiteError::io(&path, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Refuse to wipe an output directory that holds any of the site sources.
fn check_clean_target(config: &Config) -> Result<(), SiteError> {
    let output_dir = resolve(&config.output_dir);
    for source in [&config.content_dir, &config.static_dir, &config.template] {
        if resolve(source).starts_with(&output_dir) {
            return Err(SiteError::UnsafeClean {
                output_dir: config.output_dir.clone(),
                source_path: source.clone(),
            });
        }
    }
    Ok(())
}

/// Canonical form of `path` when it exists, otherwise the path as given.
fn resolve(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Directory entries sorted by name, so builds are deterministic.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let entries = fs::read_dir(dir).map_err(|e| SiteError::io(dir, e))?;
    let mut paths = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SiteError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const TEMPLATE: &str = "<title>{{ Title }}</title><main>{{ Content }}</main>";

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site(root: &Path) -> Config {
        write(&root.join("template.html"), TEMPLATE);
        write(&root.join("content/index.md"), "# Home\n\n[Blog](/blog/glorfindel)");
        write(&root.join("content/blog/glorfindel/index.md"), "# Glorfindel\n\n> Elf lord");
        write(&root.join("content/blog/notes.MD"), "# Notes\n\n- one\n- two");
        write(&root.join("content/blog/draft.txt"), "not a page");
        write(&root.join("static/index.css"), "body {}");
        write(&root.join("static/images/tolkien.png"), "png");
        Config::default().relative_to(root)
    }

    #[test]
    fn build_mirrors_content_tree() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());

        let summary = build(&config).unwrap();
        assert_eq!(summary, BuildSummary { pages: 3, assets: 2 });

        let public = dir.path().join("public");
        assert_eq!(
            fs::read_to_string(public.join("index.html")).unwrap(),
            r#"<title>Home</title><main><div><h1>Home</h1><p><a href="/blog/glorfindel">Blog</a></p></div></main>"#
        );
        assert_eq!(
            fs::read_to_string(public.join("blog/glorfindel/index.html")).unwrap(),
            "<title>Glorfindel</title><main><div><h1>Glorfindel</h1><blockquote>Elf lord</blockquote></div></main>"
        );
        assert!(public.join("blog/notes.html").exists());
        assert!(!public.join("blog/draft.txt").exists());
        assert!(!public.join("blog/draft.html").exists());
        assert_eq!(fs::read_to_string(public.join("index.css")).unwrap(), "body {}");
        assert!(public.join("images/tolkien.png").exists());
    }

    #[test]
    fn build_applies_base_path() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            base_path: "/docs/".into(),
            ..site(dir.path())
        };

        build(&config).unwrap();

        let index = fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        assert!(index.contains(r#"<a href="/docs/blog/glorfindel">"#));
    }

    #[test]
    fn clean_removes_stale_output() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        write(&dir.path().join("public/stale.html"), "old");

        build(&config).unwrap();
        assert!(!dir.path().join("public/stale.html").exists());

        write(&dir.path().join("public/stale.html"), "old");
        build(&Config {
            clean: false,
            ..config
        })
        .unwrap();
        assert!(dir.path().join("public/stale.html").exists());
    }

    #[test]
    fn clean_refuses_output_dir_holding_sources() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let config = Config {
            output_dir: root.to_path_buf(),
            ..site(root)
        };

        assert!(matches!(
            build(&config),
            Err(SiteError::UnsafeClean { source_path, .. }) if source_path == config.content_dir
        ));
        assert!(root.join("content/index.md").exists());
        assert!(root.join("template.html").exists());

        let nested = Config {
            output_dir: root.join("content"),
            ..config
        };
        assert!(matches!(build(&nested), Err(SiteError::UnsafeClean { .. })));
        assert!(root.join("content/blog/notes.MD").exists());
    }

    #[test]
    fn missing_static_dir_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        fs::remove_dir_all(dir.path().join("static")).unwrap();

        let summary = build(&config).unwrap();
        assert_eq!(summary.assets, 0);
        assert_eq!(summary.pages, 3);
    }

    #[test]
    fn missing_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        fs::remove_file(&config.template).unwrap();

        assert!(matches!(build(&config), Err(SiteError::Io { .. })));
    }

    #[test]
    fn copy_static_counts_files() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        write(&src.join("a.txt"), "a");
        write(&src.join("nested/deeper/b.txt"), "b");

        let copied = copy_static(&src, &dir.path().join("dst")).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("dst/nested/deeper/b.txt")).unwrap(),
            "b"
        );
    }

    #[test]
    fn markdown_extension_is_case_insensitive() {
        assert!(is_markdown(Path::new("a/b.md")));
        assert!(is_markdown(Path::new("B.Md")));
        assert!(!is_markdown(Path::new("readme")));
        assert!(!is_markdown(Path::new("x.markdown")));
    }
}
