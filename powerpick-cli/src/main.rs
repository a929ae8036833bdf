mod cache;
mod display;
mod import;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use powerpick_core::frequency;
use powerpick_core::game::{Game, GameConfig};
use powerpick_core::generator::{Mode, generate};
use powerpick_core::models::Ticket;

use crate::cache::FrequencyCache;
use crate::display::{display_frequencies, display_load_summary, display_tickets};

#[derive(Parser)]
#[command(name = "powerpick", about = "Générateur de grilles Powerball / Mega Millions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer des grilles
    Generate {
        /// Jeu ciblé
        #[arg(short, long, default_value = "powerball")]
        game: Game,

        /// Fenêtre historique en années (bornée à [1, 30])
        #[arg(short, long, default_value = "20")]
        years: i32,

        /// Nombre de grilles (borné à [1, 50])
        #[arg(short, long, default_value = "5")]
        count: usize,

        /// Pondération par les fréquences historiques ou tirage uniforme
        #[arg(short, long, default_value = "weighted")]
        mode: Mode,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Chemin du fichier CSV historique
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Sortie JSON au lieu des tableaux
        #[arg(long)]
        json: bool,
    },

    /// Afficher les fréquences historiques d'un jeu
    Stats {
        /// Jeu ciblé
        #[arg(short, long, default_value = "powerball")]
        game: Game,

        /// Fenêtre historique en années (bornée à [1, 30])
        #[arg(short, long, default_value = "20")]
        years: i32,

        /// Chemin du fichier CSV historique
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    Game::Powerball.config().validate()?;
    Game::MegaMillions.config().validate()?;

    let cli = Cli::parse();

    // Un seul cache pour la durée du processus ; les appelants longue
    // durée (serveur, bibliothèque) réutilisent les paires publiées.
    let cache = FrequencyCache::new();

    match cli.command {
        Command::Generate {
            game,
            years,
            count,
            mode,
            seed,
            file,
            json,
        } => cmd_generate(&cache, game, years, count, mode, seed, file, json),
        Command::Stats { game, years, file } => cmd_stats(game, years, file),
    }
}

/// Bornes appliquées côté appelant, avant d'atteindre le cœur.
fn clamp_years(years: i32) -> i32 {
    years.clamp(1, 30)
}

fn clamp_count(count: usize) -> usize {
    count.clamp(1, 50)
}

fn dataset_path(game: Game, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| match game {
        Game::Powerball => PathBuf::from("assets/powerball.csv"),
        Game::MegaMillions => PathBuf::from("assets/megamillions.csv"),
    })
}

fn mode_id(mode: Mode) -> &'static str {
    match mode {
        Mode::Weighted => "weighted",
        Mode::Uniform => "uniform",
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    cache: &FrequencyCache,
    game: Game,
    years: i32,
    count: usize,
    mode: Mode,
    seed: Option<u64>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let years = clamp_years(years);
    let count = clamp_count(count);
    let config = game.config();

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let freqs = match mode {
        Mode::Weighted => {
            let path = dataset_path(game, file);
            let freqs = cache.get_or_build(game, years, || {
                let (records, summary) = import::load_draws(&path)?;
                if !json {
                    display_load_summary(&summary);
                }
                Ok(records)
            })?;
            Some(freqs)
        }
        Mode::Uniform => None,
    };

    // Un échec sur une grille fait échouer tout le lot : pas de résultat
    // partiel.
    let mut tickets = Vec::with_capacity(count);
    for _ in 0..count {
        tickets.push(generate(config, mode, freqs.as_deref(), &mut rng)?);
    }

    if json {
        let out = tickets_json(&tickets, config, years, mode);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        display_tickets(&tickets, config);
    }

    Ok(())
}

/// Enveloppe JSON : jeu, fenêtre, mode, puis les grilles avec les numéros
/// principaux sous `numbers` et le spécial sous le libellé du jeu.
fn tickets_json(
    tickets: &[Ticket],
    config: &GameConfig,
    years: i32,
    mode: Mode,
) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = tickets
        .iter()
        .map(|t| {
            let mut obj = serde_json::Map::new();
            obj.insert("numbers".to_string(), serde_json::json!(t.main));
            obj.insert(config.special_label.to_string(), serde_json::json!(t.special));
            serde_json::Value::Object(obj)
        })
        .collect();
    serde_json::json!({
        "game": config.name,
        "years": years,
        "mode": mode_id(mode),
        "tickets": entries,
    })
}

fn cmd_stats(game: Game, years: i32, file: Option<PathBuf>) -> Result<()> {
    let years = clamp_years(years);
    let config = game.config();
    let path = dataset_path(game, file);

    let (records, summary) = import::load_draws(&path)?;
    display_load_summary(&summary);

    let (main_freq, special_freq) = frequency::build(&records, years);
    display_frequencies(&main_freq, &special_freq, config, years);

    Ok(())
}
