//! Shared test utilities for integration tests.
//!
//! Provides seeded document generators and a runner for the compiled
//! binary.

#![allow(dead_code)]

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Characters used for generated documents: markdown syntax, multibyte
/// text and astral plane emoji.
const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'Q', 'Z', '0', '1', '7', '9', ' ', '\n', '#',
    '*', '_', '`', '[', ']', '(', ')', '{', '}', '%', '&', '?', '=', '+', '-', '/', '"', '\\',
    'é', 'ß', 'ж', '中', '文', '😀', '🚀',
];

/// Generates `len` random characters from a fixed seed.
///
/// # Arguments
///
/// * `len`: Number of characters, not bytes
/// * `seed`: RNG seed; equal seeds give equal documents
pub fn random_document(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect()
}

/// Runs the markshare binary with optional stdin input.
///
/// # Errors
///
/// Returns error if the process cannot be spawned or awaited
pub fn run_markshare(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_markshare"))
        .args(args)
        .env_remove("MARKSHARE_BASE_URL")
        .env_remove("MARKSHARE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut pipe) = child.stdin.take() {
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes())?;
        }
    }

    Ok(child.wait_with_output()?)
}

/// Returns stdout of a finished process as trimmed text.
pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
