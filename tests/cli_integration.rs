//! CLI integration tests for pagepatch
//!
//! These run the real binary against a temporary directory of pages and
//! check both the console report and the files left on disk.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PAGE: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>Inicio</title>\n</head>\n<body>\n<p>hola</p>\n</body>\n</html>\n";

/// Get a command instance for the pagepatch binary, isolated from any user config
fn pagepatch_cmd(dir: &Path) -> assert_cmd::Command {
    let config = dir.join("pagepatch.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("pagepatch"));
    cmd.current_dir(dir).env("PAGEPATCH_CONFIG", config);
    cmd
}

/// Create a temporary site with the given pages
fn setup_site(pages: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in pages {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

// =============================================================================
// Pixel
// =============================================================================

#[test]
fn test_pixel_requires_id() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .arg("pixel")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PIXEL_ID"));

    assert_eq!(read(&dir, "index.html"), PAGE);
}

#[test]
fn test_pixel_rejects_non_numeric_id() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["pixel", "abc123"])
        .assert()
        .failure()
        .code(2);

    assert_eq!(read(&dir, "index.html"), PAGE);
}

#[test]
fn test_pixel_installs_once() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["pixel", "987654321"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted"))
        .stdout(predicate::str::contains("index.html"));

    let first = read(&dir, "index.html");
    assert!(first.contains("fbq('init', '987654321');"));
    assert!(first.contains("<!-- End Meta Pixel Code -->\n</head>"));

    pagepatch_cmd(dir.path())
        .args(["pixel", "987654321"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already-present"));

    assert_eq!(read(&dir, "index.html"), first);
}

#[test]
fn test_pixel_replaces_legacy_facebook_block() {
    let legacy = "<html><head>\n<!-- Facebook Pixel Code -->\n<script>fbq('init', '1');</script>\n<!-- End Facebook Pixel Code -->\n</head><body></body></html>";
    let dir = setup_site(&[("old.html", legacy)]);

    pagepatch_cmd(dir.path())
        .args(["pixel", "42"])
        .assert()
        .success();

    let content = read(&dir, "old.html");
    assert!(!content.contains("Facebook Pixel Code"));
    assert!(content.contains("fbq('init', '42');"));
}

#[test]
fn test_missing_anchor_is_reported_not_fatal() {
    let dir = setup_site(&[("index.html", PAGE), ("fragment.html", "<div>partial</div>")]);

    pagepatch_cmd(dir.path())
        .args(["pixel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-anchor-found"))
        .stdout(predicate::str::contains("fragment.html"));

    assert_eq!(read(&dir, "fragment.html"), "<div>partial</div>");
    assert!(read(&dir, "index.html").contains("Meta Pixel Code"));
}

#[test]
fn test_strict_exits_non_zero_on_missing_anchor() {
    let dir = setup_site(&[("fragment.html", "<div>partial</div>")]);

    pagepatch_cmd(dir.path())
        .args(["--strict", "pixel", "1"])
        .assert()
        .code(3);
}

#[test]
fn test_strict_passes_when_everything_applied() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["--strict", "pixel", "1"])
        .assert()
        .success();
}

// =============================================================================
// Param builder
// =============================================================================

#[test]
fn test_param_builder_after_pixel() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path()).args(["pixel", "5"]).assert().success();
    pagepatch_cmd(dir.path())
        .arg("param-builder")
        .assert()
        .success()
        .stdout(predicate::str::contains("param-builder-bundle"))
        .stdout(predicate::str::contains("param-builder-init"));

    let content = read(&dir, "index.html");
    let pixel_end = content.find("<!-- End Meta Pixel Code -->").unwrap();
    let bundle = content.find("clientParamBuilder.bundle.js").unwrap();
    let init = content.find("param-builder-client.js").unwrap();
    let body_end = content.find("</body>").unwrap();

    assert!(pixel_end < bundle);
    assert!(init < body_end);
    assert!(content.contains("    <script src=\"js/param-builder-client.js\" defer></script>\n</body>"));
}

#[test]
fn test_param_builder_without_pixel_uses_head() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path()).arg("param-builder").assert().success();

    let content = read(&dir, "index.html");
    assert!(content.contains("clientParamBuilder.bundle.js\"></script>\n</head>"));
}

// =============================================================================
// Footer blocks
// =============================================================================

const FOOTER_PAGE: &str = r#"<html><body>
<footer class="footer-modern">
    <div class="container">
        <p>links</p>
    </div>
</footer>
</body></html>"#;

#[test]
fn test_cta_skips_testimonial_page() {
    let dir = setup_site(&[("blog.html", FOOTER_PAGE), ("testimonios.html", FOOTER_PAGE)]);

    pagepatch_cmd(dir.path())
        .arg("cta")
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded"));

    assert!(read(&dir, "blog.html").contains("footer-cta-persuasivo"));
    assert_eq!(read(&dir, "testimonios.html"), FOOTER_PAGE);
}

#[test]
fn test_cta_uses_grid_variant_on_fl_footer() {
    let fl_page = "<html><body>\n<footer class=\"fl-footer\">\n    <div class=\"fl-footer-grid\">\n        <div>col</div>\n    </div>\n</footer>\n</body></html>";
    let dir = setup_site(&[("index.html", fl_page)]);

    pagepatch_cmd(dir.path())
        .arg("cta")
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted"));

    let content = read(&dir, "index.html");
    assert!(content.contains("<div class=\"fl-footer-grid\">\n            <div class=\"fl-footer-cta-persuasivo\""));
    assert!(content.contains("<div>col</div>"));
}

#[test]
fn test_testimonials_replace_cta() {
    let dir = setup_site(&[("blog.html", FOOTER_PAGE)]);

    pagepatch_cmd(dir.path()).arg("cta").assert().success();
    pagepatch_cmd(dir.path())
        .arg("testimonials")
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced"));

    let content = read(&dir, "blog.html");
    assert!(!content.contains("footer-cta-persuasivo"));
    assert_eq!(content.matches("class=\"global-social-proof-footer\"").count(), 1);
}

// =============================================================================
// Rule files
// =============================================================================

const RULE_FILE: &str = r#"
[[rule]]
name = "analytics"
marker = "gtag.js"
snippet = "<script async src=\"https://www.googletagmanager.com/gtag/js\"></script>\n"

[[rule.anchor]]
literal = "</head>"
side = "before"
"#;

#[test]
fn test_apply_rule_file() {
    let dir = setup_site(&[("index.html", PAGE), ("about.html", PAGE)]);
    fs::write(dir.path().join("rules.toml"), RULE_FILE).unwrap();

    pagepatch_cmd(dir.path())
        .args(["apply", "rules.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 page(s): 2 changed"));

    for page in ["index.html", "about.html"] {
        assert_eq!(read(&dir, page).matches("gtag.js").count(), 1);
    }
}

#[test]
fn test_apply_invalid_rule_file_touches_nothing() {
    let dir = setup_site(&[("index.html", PAGE)]);
    fs::write(
        dir.path().join("rules.toml"),
        "[[rule]]\nname = \"bare\"\nmarker = \"X\"\nsnippet = \"X\"\n",
    )
    .unwrap();

    pagepatch_cmd(dir.path())
        .args(["apply", "rules.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no anchors"));

    assert_eq!(read(&dir, "index.html"), PAGE);
}

#[test]
fn test_apply_missing_rule_file() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["apply", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read rule file"));
}

// =============================================================================
// Global options
// =============================================================================

#[test]
fn test_dry_run_writes_nothing() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["--dry-run", "pixel", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 would change"));

    assert_eq!(read(&dir, "index.html"), PAGE);
}

#[test]
fn test_exclude_flag() {
    let dir = setup_site(&[("index.html", PAGE), ("legal.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["pixel", "7", "--exclude", "legal.html"])
        .assert()
        .success();

    assert!(read(&dir, "index.html").contains("Meta Pixel Code"));
    assert_eq!(read(&dir, "legal.html"), PAGE);
}

#[test]
fn test_dir_flag() {
    let dir = setup_site(&[]);
    let site = dir.path().join("site");
    fs::create_dir(&site).unwrap();
    fs::write(site.join("index.html"), PAGE).unwrap();

    pagepatch_cmd(dir.path())
        .args(["--dir", "site", "pixel", "7"])
        .assert()
        .success();

    assert!(fs::read_to_string(site.join("index.html")).unwrap().contains("Meta Pixel Code"));
}

#[test]
fn test_missing_dir_is_fatal() {
    let dir = setup_site(&[]);

    pagepatch_cmd(dir.path())
        .args(["--dir", "nowhere", "cta"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read directory"));
}

#[test]
fn test_global_config_exclusions() {
    let dir = setup_site(&[("index.html", PAGE), ("google123.html", PAGE)]);
    let config = dir.path().join("global.toml");
    fs::write(&config, "exclude = [\"google123.html\"]\n").unwrap();

    pagepatch_cmd(dir.path())
        .args(["pixel", "7"])
        .env("PAGEPATCH_CONFIG", &config)
        .assert()
        .success();

    assert_eq!(read(&dir, "google123.html"), PAGE);
}

#[test]
fn test_missing_explicit_global_config_is_fatal() {
    let dir = setup_site(&[("index.html", PAGE)]);

    pagepatch_cmd(dir.path())
        .args(["--config", "typo.toml", "pixel", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read global config"));

    assert_eq!(read(&dir, "index.html"), PAGE);
}

#[test]
fn test_presets_lists_all() {
    let dir = setup_site(&[]);

    pagepatch_cmd(dir.path())
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("pixel"))
        .stdout(predicate::str::contains("param-builder"))
        .stdout(predicate::str::contains("cta"))
        .stdout(predicate::str::contains("testimonials"));
}

#[test]
fn test_non_html_files_ignored() {
    let dir = setup_site(&[("index.html", PAGE), ("notes.txt", PAGE)]);

    pagepatch_cmd(dir.path()).args(["pixel", "7"]).assert().success();

    assert_eq!(read(&dir, "notes.txt"), PAGE);
}
