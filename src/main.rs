use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use sublex::analysis::evolution::track_words;
use sublex::analysis::thesaurus::{SeedOnly, SynonymLookup};
use sublex::config::{AnalysisSettings, Config, LemmatizerKind};
use sublex::episodes::{self, EpisodeFile};
use sublex::pipeline::report::SeasonReport;
use sublex::pipeline::season::{analyze_episode, SeasonAnalyzer};

/// Sublex: lexical analytics for TV subtitle seasons.
///
/// Reads a directory of `episode_<id>.srt` files and reports word
/// frequencies, how vocabulary shifts across episodes, and which themes
/// dominate the dialogue.
#[derive(Parser)]
#[command(name = "sublex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that analyzes a whole season.
#[derive(Args)]
struct SeasonArgs {
    /// Directory of episode_<id>.srt files (default: SUBLEX_DATA_DIR or ./data)
    dir: Option<PathBuf>,

    /// Lemmatization strategy (default: SUBLEX_LEMMATIZER or dictionary)
    #[arg(long, value_enum)]
    lemmatizer: Option<LemmatizerKind>,

    /// Match themes on seed words only, without synonym expansion
    #[arg(long)]
    no_synonyms: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a full season and print the summary
    Analyze {
        #[command(flatten)]
        season: SeasonArgs,

        /// Top words kept per episode (default: 15)
        #[arg(long)]
        top_n: Option<usize>,

        /// Size of the season-wide top list (default: 100)
        #[arg(long)]
        global_top: Option<usize>,

        /// Minimum share of all words for a theme to count (default: 0.01)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the full report as JSON instead of the terminal summary
        #[arg(long)]
        json: bool,

        /// Also write a Markdown report to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Analyze a single subtitle file and show its stats and pacing
    Episode {
        /// The .srt file to analyze
        file: PathBuf,

        /// Lemmatization strategy (default: SUBLEX_LEMMATIZER or dictionary)
        #[arg(long, value_enum)]
        lemmatizer: Option<LemmatizerKind>,

        /// Top words to show (default: 15)
        #[arg(long)]
        top_n: Option<usize>,

        /// Print the episode stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the ranked theme list for a season
    Themes {
        #[command(flatten)]
        season: SeasonArgs,

        /// Minimum share of all words for a theme to count (default: 0.01)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Show per-episode usage of the season's most frequent words
    Evolution {
        #[command(flatten)]
        season: SeasonArgs,

        /// Track these words instead of the most frequent ones (repeatable)
        #[arg(long = "word")]
        words: Vec<String>,

        /// How many frequent words to track (default: 50)
        #[arg(long)]
        tracked: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sublex=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    let mut settings = AnalysisSettings::default();

    match cli.command {
        Commands::Analyze {
            season,
            top_n,
            global_top,
            threshold,
            json,
            report,
        } => {
            if let Some(n) = top_n {
                settings.episode_top_n = n;
            }
            if let Some(k) = global_top {
                settings.global_top_k = k;
            }
            if let Some(t) = threshold {
                settings.theme_threshold = t;
            }

            let season_report = run_season(&mut config, &settings, &season, !json)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&season_report)?);
            } else {
                sublex::output::terminal::display_season(&season_report, 20);
            }

            if let Some(path) = report {
                let written = sublex::output::markdown::generate_report(&season_report, &path)?;
                info!(path = %written, "Markdown report written");
                if !json {
                    println!("\n{}", format!("Markdown report saved to: {written}").bold());
                }
            }
        }

        Commands::Episode {
            file,
            lemmatizer,
            top_n,
            json,
        } => {
            if let Some(kind) = lemmatizer {
                config.lemmatizer = kind;
            }
            if let Some(n) = top_n {
                settings.episode_top_n = n;
            }
            if !file.is_file() {
                bail!("Subtitle file not found: {}", file.display());
            }

            let episode = EpisodeFile::from_path(&file).unwrap_or_else(|| EpisodeFile {
                id: file_stem(&file),
                path: file.clone(),
            });
            let normalizer = config.build_normalizer(&settings);
            let analysis =
                analyze_episode(&episode, &settings.parser(), &normalizer, settings.episode_top_n);

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis.stats)?);
            } else {
                sublex::output::terminal::display_episode(&analysis);
            }
        }

        Commands::Themes { season, threshold } => {
            if let Some(t) = threshold {
                settings.theme_threshold = t;
            }
            let season_report = run_season(&mut config, &settings, &season, true)?;
            sublex::output::terminal::display_themes(&season_report.themes);
            sublex::output::terminal::display_errors(&season_report.errors);
        }

        Commands::Evolution {
            season,
            words,
            tracked,
        } => {
            if let Some(m) = tracked {
                settings.tracked_words = m;
            }
            let season_report = run_season(&mut config, &settings, &season, true)?;

            if words.is_empty() {
                sublex::output::terminal::display_evolution(&season_report.evolution);
            } else {
                let words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
                let series = track_words(&season_report.episodes, &words);
                sublex::output::terminal::display_evolution(&series);
            }
        }
    }

    Ok(())
}

/// Discover the season's files and run the full pipeline over them.
fn run_season(
    config: &mut Config,
    settings: &AnalysisSettings,
    args: &SeasonArgs,
    show_progress: bool,
) -> Result<SeasonReport> {
    if let Some(kind) = args.lemmatizer {
        config.lemmatizer = kind;
    }
    let dir = args.dir.clone().unwrap_or_else(|| config.data_dir.clone());

    let files = episodes::discover(&dir)?;
    if files.is_empty() {
        bail!(
            "No episode files found in {}\n\
             Subtitle files must be named episode_<id>.srt (e.g. episode_01.srt).",
            dir.display()
        );
    }
    if show_progress {
        println!(
            "Analyzing {} episodes from {}...",
            files.len(),
            dir.display()
        );
    }

    let normalizer = config.build_normalizer(settings);
    let thesaurus = config.load_thesaurus();
    let synonyms: &dyn SynonymLookup = if args.no_synonyms {
        &SeedOnly
    } else {
        &thesaurus
    };

    let mut analyzer = SeasonAnalyzer::new(settings, &normalizer, synonyms);
    analyzer.show_progress = show_progress;
    analyzer.run(&files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("episode")
        .to_string()
}
