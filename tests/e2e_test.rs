//! End-to-end tests for the markshare binary.

mod common;

use anyhow::Result;
use common::{run_markshare, stdout_text};
use std::fs;
use tempfile::TempDir;

const DOCUMENT: &str = "# Meeting Notes\n\n- [x] ship it\n- [ ] celebrate 🎉\n";

/// Tests share then open restores the original file contents.
#[test]
fn test_share_open_round_trip_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let input = dir.path().join("notes.md");
    fs::write(&input, DOCUMENT)?;

    // Act
    let shared = run_markshare(
        &[
            "share",
            input.to_str().expect("Temp path should be valid UTF8"),
            "--base-url",
            "https://notes.example.com/",
        ],
        None,
    )?;
    let link = stdout_text(&shared);
    let opened = run_markshare(&["open", &link], None)?;

    // Assert
    assert!(shared.status.success(), "share failed: {:?}", shared);
    assert!(link.starts_with("https://notes.example.com/#"), "{}", link);
    assert!(opened.status.success(), "open failed: {:?}", opened);
    assert_eq!(String::from_utf8(opened.stdout)?, DOCUMENT);

    Ok(())
}

/// Tests share reads stdin when no file is given.
#[test]
fn test_share_from_stdin_e2e() -> Result<()> {
    let shared = run_markshare(&["share"], Some("from stdin"))?;
    assert!(shared.status.success(), "share failed: {:?}", shared);

    let link = stdout_text(&shared);
    assert!(link.starts_with("http://localhost:5173/#"), "{}", link);
    assert_eq!(markshare::decode(markshare::fragment_of(&link)).as_deref(), Some("from stdin"));

    Ok(())
}

/// Tests oversized documents are refused with a readable error.
#[test]
fn test_share_too_long_e2e() -> Result<()> {
    let output = run_markshare(&["share", "--max-len", "10"], Some(DOCUMENT))?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too long"), "{}", stderr);
    assert!(output.stdout.is_empty());

    Ok(())
}

/// Tests open writes to a file and reports token details.
#[test]
fn test_open_to_file_with_info_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let output_path = dir.path().join("restored.md");

    // Act
    let output = run_markshare(
        &[
            "open",
            "#eyJjb250ZW50IjoiaGVsbG8ifQ==",
            "-o",
            output_path.to_str().expect("Temp path should be valid UTF8"),
            "--info",
        ],
        None,
    )?;

    // Assert
    assert!(output.status.success(), "open failed: {:?}", output);
    assert_eq!(fs::read_to_string(&output_path)?, "hello");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Format: legacy"), "{}", stderr);
    assert!(stderr.contains("Shared: unknown"), "{}", stderr);

    Ok(())
}

/// Tests open fails on links without readable content.
#[test]
fn test_open_garbage_e2e() -> Result<()> {
    for link in ["https://notes.example.com/", "#!!!!", "not%20a%20token"] {
        let output = run_markshare(&["open", link], None)?;

        assert!(!output.status.success(), "{} should fail", link);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("No shared content"), "{}", stderr);
    }

    Ok(())
}

/// Tests preview of a file writes page and stylesheet.
#[test]
fn test_preview_file_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let input = dir.path().join("notes.md");
    let out = dir.path().join("site");
    fs::write(&input, DOCUMENT)?;

    // Act
    let output = run_markshare(
        &[
            "preview",
            input.to_str().expect("Temp path should be valid UTF8"),
            "-o",
            out.to_str().expect("Temp path should be valid UTF8"),
            "--no-open",
        ],
        None,
    )?;

    // Assert
    assert!(output.status.success(), "preview failed: {:?}", output);
    assert!(stdout_text(&output).starts_with("Generated: "));

    let html = fs::read_to_string(out.join("index.html"))?;
    assert!(html.contains("<title>Meeting Notes - MarkShare</title>"));
    assert!(html.contains("pane-editor") && html.contains("pane-preview"));
    assert!(html.contains("share-url"), "Page should carry a share link");
    assert!(out.join("assets").join("markshare.css").is_file());

    Ok(())
}

/// Tests preview can leave the share link off the page.
#[test]
fn test_preview_without_share_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let input = dir.path().join("notes.md");
    let out = dir.path().join("site");
    fs::write(&input, DOCUMENT)?;

    // Act
    let output = run_markshare(
        &[
            "preview",
            input.to_str().expect("Temp path should be valid UTF8"),
            "-o",
            out.to_str().expect("Temp path should be valid UTF8"),
            "--no-share",
            "--max-len",
            "1",
            "--no-open",
        ],
        None,
    )?;

    // Assert
    assert!(output.status.success(), "preview failed: {:?}", output);
    let html = fs::read_to_string(out.join("index.html"))?;
    assert!(!html.contains("share-url"), "{}", html);
    assert!(!html.contains("share-error"), "Hidden share is not a failure");
    assert!(html.contains("<h1>Meeting Notes</h1>"));

    Ok(())
}

/// Tests preview of a share link opens in preview mode.
#[test]
fn test_preview_link_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let out = dir.path().join("site");
    let link = format!("https://notes.example.com/#{}", markshare::encode("# From Link"));

    // Act
    let output = run_markshare(
        &[
            "preview",
            "--link",
            &link,
            "-o",
            out.to_str().expect("Temp path should be valid UTF8"),
            "--no-open",
        ],
        None,
    )?;

    // Assert
    assert!(output.status.success(), "preview failed: {:?}", output);
    let html = fs::read_to_string(out.join("index.html"))?;
    assert!(html.contains("<h1>From Link</h1>"));
    assert!(!html.contains("pane-editor"));
    assert!(html.contains("Shared just now"));

    Ok(())
}

/// Tests preview of an unreadable link falls back to the welcome document.
#[test]
fn test_preview_unreadable_link_e2e() -> Result<()> {
    let dir = TempDir::new()?;
    let out = dir.path().join("site");

    let output = run_markshare(
        &[
            "preview",
            "--link",
            "#garbage!!",
            "--view",
            "preview",
            "--title",
            "Fallback",
            "-o",
            out.to_str().expect("Temp path should be valid UTF8"),
            "--no-open",
        ],
        None,
    )?;

    assert!(output.status.success(), "preview failed: {:?}", output);
    let html = fs::read_to_string(out.join("index.html"))?;
    assert!(html.contains("Welcome to MarkShare"));
    assert!(html.contains("<title>Fallback - MarkShare</title>"));
    assert!(html.contains("view-preview"));

    Ok(())
}

/// Tests missing input files are rejected before any work.
#[test]
fn test_missing_file_e2e() -> Result<()> {
    let output = run_markshare(&["share", "/nonexistent/notes.md"], None)?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"), "{}", stderr);

    Ok(())
}
