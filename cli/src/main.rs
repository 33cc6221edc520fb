use anyhow::{Context, Result};
use border_chain::{AdjacencyPolicy, BorderGraph};
use clap::{Parser, Subcommand};
use country_data::{
    loader::{load_borders, load_countries},
    BorderTable, ContinentFilter, CountryTable,
};
use game_settings::{
    submit_detached, GameConfig, GameStats, JsonFileStore, KeyValueStore, LeaderboardClient,
    MemoryStore, NewScore, Preferences, Theme,
};
use quiz_engine::{ChoiceKind, Metric};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod console;
mod games;

use commands::SettingsChange;
use console::Console;
use games::{GameContext, GameOutcome};

#[derive(Parser, Debug)]
#[command(name = "geoquest", version, about = "Geography trivia in the terminal")]
struct Cli {
    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Rounds per game
    #[arg(
        long,
        global = true,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    rounds: u32,

    /// Continent for this run ("All" or a continent name); defaults to the saved setting
    #[arg(long, global = true)]
    continent: Option<ContinentFilter>,

    /// Country dataset (JSON) instead of the built-in one
    #[arg(long, global = true)]
    countries: Option<PathBuf>,

    /// Border dataset (JSON) instead of the built-in one
    #[arg(long, global = true)]
    borders: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Keep settings and stats in memory only
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop a pin on the named country
    Pin,
    /// Chain bordering countries from start to end
    Trail,
    /// Pick the capital
    Capital,
    /// Pick the name locals use
    Native,
    /// Name the country from its flag
    Flag,
    /// Type the capital
    Spelling,
    /// Pick the larger of two countries
    Bigger {
        #[arg(long, default_value_t = Metric::Population)]
        metric: Metric,
    },
    /// Place four capitals on their countries
    Map,
    /// Lifetime stats and the online leaderboard
    Stats,
    /// Show or change preferences
    Settings {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        continent: Option<ContinentFilter>,
        #[arg(long)]
        player: Option<String>,
        #[arg(long)]
        reduce_motion: Option<bool>,
    },
    /// List the playable countries, or show one in detail
    Countries {
        /// Print a GeoJSON FeatureCollection of centroids
        #[arg(long, conflicts_with = "code")]
        geojson: bool,
        /// Country code to show flag, names, figures and a Wikipedia link for
        #[arg(long)]
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "geoquest=debug,debug" } else { "geoquest=info,warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = GameConfig::from_env();
    tracing::debug!("Config: {:?}", config);

    if cli.no_save {
        run(cli, config, MemoryStore::new()).await
    } else {
        let store = JsonFileStore::open(&config.settings_path)
            .with_context(|| format!("opening settings at {:?}", config.settings_path))?;
        run(cli, config, store).await
    }
}

fn load_data(cli: &Cli) -> Result<(CountryTable, BorderTable)> {
    let countries = match &cli.countries {
        Some(path) => load_countries(path)?,
        None => CountryTable::with_defaults(),
    };
    let borders = match &cli.borders {
        Some(path) => load_borders(path)?,
        None => BorderTable::with_defaults(),
    };

    let one_sided = borders.asymmetric_pairs();
    if !one_sided.is_empty() {
        tracing::debug!("{} one-sided border entries: {:?}", one_sided.len(), one_sided);
    }
    Ok((countries, borders))
}

async fn run<S: KeyValueStore>(cli: Cli, config: GameConfig, store: S) -> Result<()> {
    let (table, borders) = load_data(&cli)?;
    let mut prefs = Preferences::load(store);
    let filter = cli.continent.unwrap_or_else(|| prefs.continent());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let graph = BorderGraph::build(&table, &borders, AdjacencyPolicy::default());
    let ctx = GameContext {
        table: &table,
        graph: &graph,
        filter,
        rounds: cli.rounds,
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let outcome = match cli.command {
        Command::Pin => games::play_pin(&ctx, &mut console, &mut rng)?,
        Command::Trail => games::play_trail(&ctx, &mut console, &mut rng)?,
        Command::Capital => games::play_choice(ChoiceKind::Capital, &ctx, &mut console, &mut rng)?,
        Command::Native => {
            games::play_choice(ChoiceKind::NativeName, &ctx, &mut console, &mut rng)?
        }
        Command::Flag => games::play_choice(ChoiceKind::Flag, &ctx, &mut console, &mut rng)?,
        Command::Spelling => games::play_spelling(&ctx, &mut console, &mut rng)?,
        Command::Bigger { metric } => games::play_bigger(metric, &ctx, &mut console, &mut rng)?,
        Command::Map => games::play_map(&ctx, &mut console, &mut rng)?,
        Command::Stats => {
            let mut out = io::stdout().lock();
            commands::print_stats(&GameStats::load(prefs.store()), &mut out)?;
            if let Some(client) = LeaderboardClient::from_config(&config) {
                match client.top_scores(10).await {
                    Ok(rows) => commands::print_leaderboard(&rows, &mut out)?,
                    Err(e) => tracing::warn!("Could not load leaderboard: {}", e),
                }
            }
            return Ok(());
        }
        Command::Settings {
            theme,
            continent,
            player,
            reduce_motion,
        } => {
            let change = SettingsChange {
                theme,
                continent,
                player,
                reduce_motion,
            };
            return commands::apply_settings(&mut prefs, change, &mut io::stdout().lock());
        }
        Command::Countries { geojson, code: None } => {
            let countries = table.filter(filter);
            return commands::print_countries(&countries, geojson, &mut io::stdout().lock());
        }
        Command::Countries { code: Some(code), .. } => {
            let country = table
                .get(code.trim())
                .with_context(|| format!("no country with code {:?}", code))?;
            return commands::print_country_detail(country, &mut io::stdout().lock());
        }
    };

    finish(outcome, &mut prefs, &config, &mut io::stdout()).await
}

/// Record the session and hand the score to the leaderboard
async fn finish<S: KeyValueStore, W: Write>(
    outcome: GameOutcome,
    prefs: &mut Preferences<S>,
    config: &GameConfig,
    out: &mut W,
) -> Result<()> {
    let rounds = outcome.session.rounds_played();
    if rounds == 0 {
        return Ok(());
    }
    writeln!(out, "{}", outcome.session.share_text(outcome.kind))?;

    let mut stats = GameStats::load(prefs.store());
    stats.add_session(outcome.kind, outcome.session.correct(), rounds);
    if let Err(e) = stats.save(prefs.store_mut()) {
        tracing::warn!("Could not save stats: {}", e);
    }

    let Some(client) = LeaderboardClient::from_config(config) else {
        return Ok(());
    };
    let score = NewScore::new(prefs.display_name(), outcome.points);
    if let Some(handle) = submit_detached(Arc::new(client), score) {
        // Give the background post a chance before the runtime shuts down
        let wait = Duration::from_secs(config.http_timeout_sec);
        if tokio::time::timeout(wait, handle).await.is_err() {
            tracing::warn!("Leaderboard submission still pending at exit");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_settings::STATS_KEY;
    use quiz_engine::{GameKind, SessionScore};
    use std::io::Cursor;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "geoquest",
            "bigger",
            "--metric",
            "area",
            "--seed",
            "3",
            "--continent",
            "south america",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.rounds, 10);
        assert!(matches!(cli.command, Command::Bigger { metric: Metric::Area }));
        assert_eq!(cli.continent.map(|c| c.to_string()).as_deref(), Some("South America"));
    }

    #[test]
    fn test_countries_detail_flag() {
        let cli = Cli::try_parse_from(["geoquest", "countries", "--code", "fr"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Countries { geojson: false, code: Some(ref c) } if c == "fr"
        ));
        let both = ["geoquest", "countries", "--code", "fr", "--geojson"];
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["geoquest", "pin", "--rounds", "0"]).is_err());
        assert!(Cli::try_parse_from(["geoquest", "settings", "--theme", "neon"]).is_err());
        assert!(Cli::try_parse_from(["geoquest", "pin", "--continent", "Atlantis"]).is_err());
    }

    #[tokio::test]
    async fn test_finish_records_stats() {
        let mut prefs = Preferences::load(MemoryStore::new());
        let mut session = SessionScore::new();
        session.record_answer(true).unwrap();
        session.next_round();
        session.record_answer(false).unwrap();
        let outcome = GameOutcome {
            kind: GameKind::Flag,
            session,
            points: 1,
        };

        let mut out = Vec::new();
        finish(outcome, &mut prefs, &GameConfig::default(), &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "I got 1 correct in 2 rounds on Flag Quiz in GeoQuest!\n"
        );
        let stats = GameStats::load(prefs.store());
        let entry = stats.get(GameKind::Flag).unwrap();
        assert_eq!((entry.total_correct, entry.total_rounds), (1, 2));
        assert!(prefs.store().get(STATS_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_map_stats_stay_within_round_count() {
        let defaults = CountryTable::with_defaults();
        let mut table = CountryTable::new();
        for code in ["fr", "de", "it", "es"] {
            table.insert(defaults.get(code).unwrap().clone()).unwrap();
        }
        let borders = BorderTable::new();
        let graph = BorderGraph::build(&table, &borders, AdjacencyPolicy::default());
        let ctx = GameContext {
            table: &table,
            graph: &graph,
            filter: ContinentFilter::All,
            rounds: 1,
        };
        let input = "fr Paris\nde Berlin\nit Rome\nes Madrid\ncheck\n";
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        let outcome = games::play_map(&ctx, &mut console, &mut StdRng::seed_from_u64(1)).unwrap();

        let mut prefs = Preferences::load(MemoryStore::new());
        let mut out = Vec::new();
        finish(outcome, &mut prefs, &GameConfig::default(), &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "I got 1 correct in 1 round on Map the City in GeoQuest!\n"
        );

        let mut out = Vec::new();
        commands::print_stats(&GameStats::load(prefs.store()), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1/1"));
        assert!(out.contains("100.0%"));
        assert!(!out.contains("400"));
    }

    #[tokio::test]
    async fn test_finish_skips_empty_session() {
        let mut prefs = Preferences::load(MemoryStore::new());
        let outcome = GameOutcome {
            kind: GameKind::Pin,
            session: SessionScore::new(),
            points: 0,
        };
        let mut out = Vec::new();
        finish(outcome, &mut prefs, &GameConfig::default(), &mut out).await.unwrap();
        assert!(out.is_empty());
        assert!(GameStats::load(prefs.store()).is_empty());
    }
}
