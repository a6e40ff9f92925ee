//! End-to-end build tests

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pagesmith::Site;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A small site: four valid posts, one broken file, two assets
fn seed_site(base: &Path) {
    write(
        &base.join("content/posts/hello.md"),
        "---\ntitle: Hello\ndate: 2024-01-01\ndescription: First post\n---\n# Hi\n",
    );
    write(
        &base.join("content/posts/second.md"),
        "---\ntitle: Second\ndate: 2024-02-10\ndescription: Another one\n---\nSome *body* text.\n",
    );
    write(
        &base.join("content/posts/third.md"),
        "---\ntitle: Third\ndate: 2024-03-05\ndescription: Newest\ncategory: Rust\n---\nbody\n",
    );
    write(
        &base.join("content/posts/fourth.md"),
        "---\ntitle: Fourth\ndate: 2023-12-01\ndescription: Oldest\n---\nbody\n",
    );
    write(&base.join("content/posts/broken.md"), "# No front-matter\n");
    write(&base.join("static/styles.css"), "body { margin: 0; }\n");
    write(&base.join("static/script.js"), "console.log('hi');\n");
}

#[test]
fn builds_full_site_tree() {
    let tmp = tempfile::tempdir().unwrap();
    seed_site(tmp.path());

    let site = Site::new(tmp.path()).unwrap();
    site.build().unwrap();

    let out = tmp.path().join("dist");

    // Post page: literal title plus rendered body with a heading anchor
    let hello = fs::read_to_string(out.join("blog/hello/index.html")).unwrap();
    assert!(hello.contains("<title>Hello | My Site</title>"));
    assert!(hello.contains(r#"<h1 id="hi">Hi</h1>"#));
    assert!(hello.contains(r#"<time datetime="2024-01-01">January 1, 2024</time>"#));

    // Blog index: every valid post, newest first, default category shown
    let index = fs::read_to_string(out.join("blog/index.html")).unwrap();
    assert!(index.contains(r#"<a href="/blog/hello/">Hello</a>"#));
    assert!(index.contains("Development"));
    assert!(index.contains("Rust"));
    let pos = |title: &str| index.find(title).unwrap();
    assert!(pos("Third") < pos("Second"));
    assert!(pos("Second") < pos("Hello"));
    assert!(pos("Hello") < pos("Fourth"));

    // Homepage: exactly three teaser cards, newest posts only
    let home = fs::read_to_string(out.join("index.html")).unwrap();
    assert_eq!(home.matches(r#"<article class="post-card">"#).count(), 3);
    assert!(home.contains("Third"));
    assert!(!home.contains("Fourth"));

    // The broken file produced no page and no listing entry
    assert!(!out.join("blog/broken").exists());
    assert!(!out.join("blog/broken.html").exists());
    assert!(!index.contains("broken"));

    // Assets copied verbatim
    assert_eq!(
        fs::read_to_string(out.join("styles.css")).unwrap(),
        "body { margin: 0; }\n"
    );
    assert!(out.join("script.js").exists());

    // Feed stamped with the newest post's date, not the wall clock
    let feed = fs::read_to_string(out.join("atom.xml")).unwrap();
    assert!(feed.contains("<updated>2024-03-05T00:00:00Z</updated>"));
    assert!(feed.contains("<title>Third</title>"));
}

#[test]
fn rebuild_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    seed_site(tmp.path());

    let site = Site::new(tmp.path()).unwrap();
    site.build().unwrap();
    let first = snapshot(&tmp.path().join("dist"));

    site.build().unwrap();
    let second = snapshot(&tmp.path().join("dist"));

    assert_eq!(first, second);
}

#[test]
fn strict_mode_skips_incomplete_posts() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        &tmp.path().join("site.yml"),
        "title: Strict Site\nfrontmatter: strict\n",
    );
    write(
        &tmp.path().join("content/posts/complete.md"),
        "---\ntitle: Complete\ndate: 2024-01-01\ndescription: ok\n---\nbody\n",
    );
    write(
        &tmp.path().join("content/posts/nodesc.md"),
        "---\ntitle: No Description\ndate: 2024-01-02\n---\nbody\n",
    );

    let site = Site::new(tmp.path()).unwrap();
    assert_eq!(site.config.title, "Strict Site");
    site.build().unwrap();

    let out = tmp.path().join("dist");
    assert!(out.join("blog/complete/index.html").exists());
    assert!(!out.join("blog/nodesc").exists());

    let index = fs::read_to_string(out.join("blog/index.html")).unwrap();
    assert!(!index.contains("No Description"));
}

#[test]
fn asset_excludes_are_honored() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        &tmp.path().join("site.yml"),
        "assets:\n  include:\n    - \"**/*\"\n  exclude:\n    - \"drafts/**\"\n",
    );
    write(&tmp.path().join("static/styles.css"), "body {}\n");
    write(&tmp.path().join("static/drafts/wip.html"), "<p>wip</p>\n");

    let site = Site::new(tmp.path()).unwrap();
    site.build().unwrap();

    let out = tmp.path().join("dist");
    assert!(out.join("styles.css").exists());
    assert!(!out.join("drafts").exists());
}

#[test]
fn empty_site_builds() {
    let tmp = tempfile::tempdir().unwrap();

    let site = Site::new(tmp.path()).unwrap();
    site.build().unwrap();

    let out = tmp.path().join("dist");
    // Homepage and blog index exist even with no posts
    let home = fs::read_to_string(out.join("index.html")).unwrap();
    assert_eq!(home.matches(r#"<article class="post-card">"#).count(), 0);
    assert!(out.join("blog/index.html").exists());
    // No feed without posts
    assert!(!out.join("atom.xml").exists());
}

#[test]
fn clean_removes_output() {
    let tmp = tempfile::tempdir().unwrap();
    seed_site(tmp.path());

    let site = Site::new(tmp.path()).unwrap();
    site.build().unwrap();
    assert!(tmp.path().join("dist").exists());

    site.clean().unwrap();
    assert!(!tmp.path().join("dist").exists());
}

/// Collect every output file's bytes, keyed by relative path
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().is_file() {
            let relative = entry.path().strip_prefix(dir).unwrap().to_path_buf();
            files.insert(relative, fs::read(entry.path()).unwrap());
        }
    }
    files
}
