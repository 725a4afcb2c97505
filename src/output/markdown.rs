// Markdown season report.
//
// Renders a SeasonReport into a self-contained Markdown document and writes
// it to disk. Sections mirror the terminal summary, with full tables.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::report::SeasonReport;

/// Most evolution series written to the report.
const EVOLUTION_ROWS: usize = 20;

/// Write the report to `path`, creating parent directories. Returns the
/// path written.
pub fn generate_report(report: &SeasonReport, path: &str) -> Result<String> {
    let out = Path::new(path);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }

    let content = render(report, chrono::Local::now());
    std::fs::write(out, content).with_context(|| format!("Failed to write report {path}"))?;
    Ok(path.to_string())
}

/// Render the report as Markdown, stamped with `generated_at`.
pub fn render<Tz>(report: &SeasonReport, generated_at: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut md = String::new();
    let summary = &report.summary;

    // write! into a String can't fail
    let _ = writeln!(md, "# Season Lexical Report\n");
    let _ = writeln!(
        md,
        "Generated {} with the `{}` lemmatizer.\n",
        generated_at.format("%Y-%m-%d %H:%M:%S %Z"),
        report.lemmatizer
    );

    let _ = writeln!(md, "## Summary\n");
    let _ = writeln!(md, "| Metric | Value |");
    let _ = writeln!(md, "| --- | --- |");
    let _ = writeln!(md, "| Episodes | {} |", summary.episode_count);
    let _ = writeln!(md, "| Total words | {} |", summary.total_words);
    let _ = writeln!(md, "| Unique words | {} |", summary.unique_words);
    let _ = writeln!(
        md,
        "| Mean lexical density | {:.3} |",
        summary.mean_lexical_density
    );
    if let Some((id, density)) = &summary.densest_episode {
        let _ = writeln!(md, "| Densest episode | {id} ({density:.3}) |");
    }
    md.push('\n');

    let _ = writeln!(md, "## Episodes\n");
    let _ = writeln!(md, "| Episode | Words | Unique | Density | Top words |");
    let _ = writeln!(md, "| --- | ---: | ---: | ---: | --- |");
    for episode in &report.episodes {
        let top: Vec<String> = episode
            .top_words
            .iter()
            .take(5)
            .map(|(w, c)| format!("{w} ({c})"))
            .collect();
        let _ = writeln!(
            md,
            "| {} | {} | {} | {:.3} | {} |",
            episode.episode_id,
            episode.total_words,
            episode.unique_words,
            episode.lexical_density,
            top.join(", ")
        );
    }
    md.push('\n');

    let _ = writeln!(md, "## Most Frequent Words\n");
    let _ = writeln!(md, "| Rank | Word | Count |");
    let _ = writeln!(md, "| ---: | --- | ---: |");
    for (i, (word, count)) in report.global_top.iter().enumerate() {
        let _ = writeln!(md, "| {} | {word} | {count} |", i + 1);
    }
    md.push('\n');

    let _ = writeln!(md, "## Themes\n");
    if report.themes.is_empty() {
        let _ = writeln!(md, "No theme reached the significance threshold.");
    } else {
        let _ = writeln!(md, "| Theme | Frequency | Share | Words |");
        let _ = writeln!(md, "| --- | ---: | ---: | --- |");
        for theme in &report.themes {
            let words: Vec<String> = theme
                .top_words
                .iter()
                .map(|(w, c)| format!("{w} ({c})"))
                .collect();
            let _ = writeln!(
                md,
                "| {} | {} | {:.2}% | {} |",
                theme.name,
                theme.frequency,
                theme.share * 100.0,
                words.join(", ")
            );
        }
    }
    md.push('\n');

    let _ = writeln!(md, "## Word Evolution\n");
    let episode_ids: Vec<&str> = report
        .episodes
        .iter()
        .map(|e| e.episode_id.as_str())
        .collect();
    let _ = writeln!(md, "| Word | {} |", episode_ids.join(" | "));
    let _ = writeln!(md, "| --- |{}", " ---: |".repeat(episode_ids.len()));
    for series in report.evolution.iter().take(EVOLUTION_ROWS) {
        let counts: Vec<String> = series.points.iter().map(|(_, n)| n.to_string()).collect();
        let _ = writeln!(md, "| {} | {} |", series.word, counts.join(" | "));
    }
    md.push('\n');

    if !report.bigrams.is_empty() {
        let _ = writeln!(md, "## Bigrams\n");
        let _ = writeln!(md, "| Pair | Count |");
        let _ = writeln!(md, "| --- | ---: |");
        for bigram in report.bigrams.iter().take(20) {
            let _ = writeln!(md, "| {} | {} |", bigram.label(), bigram.count);
        }
        md.push('\n');
    }

    let errors = &report.errors;
    let _ = writeln!(md, "## Skipped Items\n");
    let _ = writeln!(md, "| Stage | Count |");
    let _ = writeln!(md, "| --- | ---: |");
    for (label, count) in [
        ("Malformed caption blocks", errors.malformed_blocks),
        ("Malformed timestamps", errors.malformed_timestamps),
        ("Short captions filtered", errors.short_captions),
        ("Unreadable files", errors.unreadable_files),
        ("Files with replaced bytes", errors.decode_replacements),
        ("Rejected tokens", errors.dropped_tokens),
        ("Failed synonym lookups", errors.synonym_failures),
    ] {
        let _ = writeln!(md, "| {label} | {count} |");
    }

    md
}
