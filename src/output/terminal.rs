// Colored terminal output for season reports, themes, and evolution series.
//
// This module handles all terminal-specific formatting. main.rs decides what
// to show and delegates the drawing here.

use colored::Colorize;

use crate::analysis::evolution::EvolutionSeries;
use crate::analysis::themes::Theme;
use crate::pipeline::outcome::StageErrors;
use crate::pipeline::report::SeasonReport;
use crate::pipeline::season::EpisodeAnalysis;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Display the full season summary.
pub fn display_season(report: &SeasonReport, top_words: usize) {
    let summary = &report.summary;
    println!(
        "\n{}",
        format!("=== Season Report ({} episodes) ===", summary.episode_count).bold()
    );
    println!("  Total words:        {}", summary.total_words);
    println!("  Unique words:       {}", summary.unique_words);
    println!("  Mean density:       {:.3}", summary.mean_lexical_density);
    if let Some((id, density)) = &summary.densest_episode {
        println!("  Densest episode:    {id} ({density:.3})");
    }
    println!("  Lemmatizer:         {}", report.lemmatizer.dimmed());

    println!("\n{}", "=== Episodes ===".bold());
    println!(
        "  {:<12} {:>7} {:>7} {:>8}  {}",
        "Episode".dimmed(),
        "Words".dimmed(),
        "Unique".dimmed(),
        "Density".dimmed(),
        "Top words".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());
    for episode in &report.episodes {
        let top: Vec<&str> = episode
            .top_words
            .iter()
            .take(5)
            .map(|(w, _)| w.as_str())
            .collect();
        println!(
            "  {:<12} {:>7} {:>7} {:>8.3}  {}",
            episode.episode_id,
            episode.total_words,
            episode.unique_words,
            episode.lexical_density,
            top.join(", ").cyan(),
        );
    }

    println!("\n{}", "=== Most Frequent Words ===".bold());
    for (i, (word, count)) in report.global_top.iter().take(top_words).enumerate() {
        println!("  {:>4}. {:<20} {:>6}", i + 1, word, count);
    }

    display_themes(&report.themes);

    if !report.bigrams.is_empty() {
        println!("\n{}", "=== Bigrams ===".bold());
        for bigram in report.bigrams.iter().take(10) {
            println!("  {:<30} {:>4}", bigram.label(), bigram.count);
        }
    }

    display_errors(&report.errors);
}

/// Display the ranked theme list.
pub fn display_themes(themes: &[Theme]) {
    println!("\n{}", "=== Themes ===".bold());
    if themes.is_empty() {
        println!("  {}", "No theme reached the significance threshold.".dimmed());
        return;
    }

    for (i, theme) in themes.iter().enumerate() {
        let words: Vec<String> = theme
            .top_words
            .iter()
            .map(|(w, c)| format!("{w} ({c})"))
            .collect();
        println!(
            "  {:>2}. {:<14} {:>6}  {:>6.2}%  {}",
            i + 1,
            theme.name.green().bold(),
            theme.frequency,
            theme.share * 100.0,
            words.join(", ").dimmed(),
        );
    }
}

/// Display evolution series as one sparkline row per word.
pub fn display_evolution(series: &[EvolutionSeries]) {
    println!("\n{}", "=== Word Evolution ===".bold());
    if series.is_empty() {
        println!("  {}", "No words to track.".dimmed());
        return;
    }

    for s in series {
        let counts: Vec<usize> = s.points.iter().map(|(_, n)| *n).collect();
        let peak = match s.peak() {
            Some((episode, n)) if n > 0 => format!("peak {n} in {episode}"),
            _ => "absent".to_string(),
        };
        println!(
            "  {:<16} {:>6}  {}  {}",
            s.word,
            s.total,
            sparkline(&counts).yellow(),
            peak.dimmed(),
        );
    }
}

/// Display one episode's stats and pacing.
pub fn display_episode(analysis: &EpisodeAnalysis) {
    let stats = &analysis.stats;
    let transcript = &analysis.transcript;
    println!(
        "\n{}",
        format!("=== Episode {} ===", stats.episode_id).bold()
    );
    println!(
        "  Encoding:           {}",
        analysis.encoding.unwrap_or("unreadable")
    );
    println!("  Captions:           {}", transcript.captions.len());
    println!(
        "  Runtime:            {}",
        format_duration(transcript.total_duration())
    );
    println!(
        "  Speaking time:      {}",
        format_duration(transcript.speaking_time())
    );
    println!("  Words per minute:   {:.1}", transcript.words_per_minute());
    println!("  Analyzed words:     {}", stats.total_words);
    println!("  Unique words:       {}", stats.unique_words);
    println!("  Lexical density:    {:.3}", stats.lexical_density);

    println!("\n  {}", "Top words:".bold());
    for (i, (word, count)) in stats.top_words.iter().enumerate() {
        println!("  {:>4}. {:<20} {:>6}", i + 1, word, count);
    }

    display_errors(&analysis.errors);
}

/// Display skipped-item counters, if anything was skipped.
pub fn display_errors(errors: &StageErrors) {
    if errors.is_clean() {
        return;
    }
    println!("\n  {}", "Skipped while processing:".yellow());
    for (label, count) in [
        ("malformed blocks", errors.malformed_blocks),
        ("malformed timestamps", errors.malformed_timestamps),
        ("unreadable files", errors.unreadable_files),
        ("files with replaced bytes", errors.decode_replacements),
        ("rejected tokens", errors.dropped_tokens),
        ("failed synonym lookups", errors.synonym_failures),
    ] {
        if count > 0 {
            println!("    {:<26} {}", label, count.to_string().yellow());
        }
    }
}

/// Scale counts onto block characters; all-zero input draws the lowest bar.
pub fn sparkline(counts: &[usize]) -> String {
    let max = counts.iter().copied().max().unwrap_or(0);
    counts
        .iter()
        .map(|&n| {
            if max == 0 {
                SPARK_LEVELS[0]
            } else {
                SPARK_LEVELS[n * (SPARK_LEVELS.len() - 1) / max]
            }
        })
        .collect()
}

fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_scales_to_max() {
        assert_eq!(sparkline(&[0, 4, 8]), "▁▄█");
        assert_eq!(sparkline(&[0, 0]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3725.4), "1:02:05");
        assert_eq!(format_duration(-1.0), "0:00:00");
    }
}
