//! Round-trip and determinism checks over fixture documents.
//!
//! usage: dev-test-runner [GLOB]   (default: fixtures/*.json)
use anyhow::{Context, Result, ensure};
use colored::Colorize;

fn check(source: &str) -> Result<()> {
    let first = huiswerk_ical::parse_data(source)?;
    let second = huiswerk_ical::parse_data(source)?;
    ensure!(first == second, "parsing the same text twice gave different values");

    let wire = huiswerk_ical::serialize_data(&first)?;
    ensure!(huiswerk_ical::parse_data(&wire)? == first, "untyped round trip changed the value");

    let welcome = huiswerk_ical::parse(source)?;
    let text = huiswerk_ical::serialize(&welcome)?;
    ensure!(huiswerk_ical::parse(&text)? == welcome, "typed round trip changed the value");

    let original: serde_json::Value = serde_json::from_str(source)?;
    let canonical: serde_json::Value = serde_json::from_str(&wire)?;
    ensure!(
        key_count(&original) == key_count(&canonical),
        "round trip added or dropped keys"
    );
    Ok(())
}

fn key_count(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::Object(m) => m.len() + m.values().map(key_count).sum::<usize>(),
        serde_json::Value::Array(xs) => xs.iter().map(key_count).sum(),
        _ => 0,
    }
}

fn main() -> Result<()> {
    let pattern = std::env::args().nth(1).unwrap_or_else(|| "fixtures/*.json".to_string());
    let mut failed = 0usize;
    let mut total = 0usize;
    for entry in glob::glob(&pattern).with_context(|| format!("bad pattern {pattern}"))? {
        let path = entry?;
        total += 1;
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match check(&source) {
            Ok(()) => eprintln!("{} {}", "✅ success".green(), path.display()),
            Err(error) => {
                failed += 1;
                eprintln!("{} {}: {error:#}", "❌ failed".red(), path.display());
            }
        }
    }
    ensure!(total > 0, "no fixtures matched {pattern}");
    ensure!(failed == 0, "{failed} of {total} fixtures failed");
    Ok(())
}
