use std::collections::BTreeSet;

use clap::ValueEnum;
use rand::Rng;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;

use crate::error::CoreError;
use crate::frequency::FrequencyDistribution;
use crate::game::GameConfig;
use crate::models::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Mode {
    #[default]
    Weighted,
    Uniform,
}

/// Plafond de tirages pondérés pour une seule grille. Au-delà, les cases
/// restantes sont remplies uniformément parmi les numéros non retenus, ce
/// qui garantit la terminaison même quand le support de la distribution
/// compte moins de numéros que la grille n'en demande.
pub const MAX_WEIGHTED_DRAWS: usize = 10_000;

/// Génère une grille pour un jeu donné. En mode pondéré sans
/// distributions (ou avec une distribution vide), retombe sur le tirage
/// uniforme, indépendamment pour chaque bassin.
pub fn generate(
    config: &GameConfig,
    mode: Mode,
    freqs: Option<&(FrequencyDistribution, FrequencyDistribution)>,
    rng: &mut StdRng,
) -> Result<Ticket, CoreError> {
    let (main_freq, special_freq) = match (mode, freqs) {
        (Mode::Weighted, Some((main, special))) => (Some(main), Some(special)),
        _ => (None, None),
    };
    generate_ticket(
        config.main_range,
        config.special_range,
        config.pick_count,
        main_freq,
        special_freq,
        rng,
    )
}

pub fn generate_ticket(
    main_range: u8,
    special_range: u8,
    pick_count: usize,
    main_freq: Option<&FrequencyDistribution>,
    special_freq: Option<&FrequencyDistribution>,
    rng: &mut StdRng,
) -> Result<Ticket, CoreError> {
    if main_range == 0 || special_range == 0 {
        return Err(CoreError::Constraint(
            "les plages de numéros doivent être strictement positives".to_string(),
        ));
    }
    if pick_count == 0 || pick_count > main_range as usize {
        return Err(CoreError::Constraint(format!(
            "impossible de tirer {} numéros distincts dans [1, {}]",
            pick_count, main_range
        )));
    }

    let main = match main_freq {
        Some(freq) if !freq.is_empty() => weighted_main_numbers(freq, main_range, pick_count, rng)?,
        _ => uniform_main_numbers(main_range, pick_count, rng),
    };

    let special = match special_freq {
        Some(freq) if !freq.is_empty() => weighted_special_number(freq, special_range, rng)?,
        _ => rng.random_range(1..=special_range),
    };

    Ok(Ticket { main, special })
}

fn uniform_main_numbers(main_range: u8, pick_count: usize, rng: &mut StdRng) -> Vec<u8> {
    let mut picked: Vec<u8> = rand::seq::index::sample(rng, main_range as usize, pick_count)
        .iter()
        .map(|i| (i + 1) as u8)
        .collect();
    picked.sort();
    picked
}

/// Tirage avec remise dans la distribution, doublons rejetés, jusqu'à
/// `pick_count` numéros distincts. Un numéro jamais observé dans
/// l'historique a ici une probabilité de sélection nulle.
fn weighted_main_numbers(
    freq: &FrequencyDistribution,
    main_range: u8,
    pick_count: usize,
    rng: &mut StdRng,
) -> Result<Vec<u8>, CoreError> {
    let values: Vec<u8> = freq.iter().map(|(v, _)| v).collect();
    let dist = WeightedIndex::new(freq.iter().map(|(_, c)| c))
        .map_err(|e| CoreError::Data(format!("distribution de fréquences inexploitable : {}", e)))?;

    let mut picked: BTreeSet<u8> = BTreeSet::new();
    let mut draws = 0;
    while picked.len() < pick_count && draws < MAX_WEIGHTED_DRAWS {
        picked.insert(values[dist.sample(rng)]);
        draws += 1;
    }

    // Filet de sécurité une fois le plafond atteint : remplissage uniforme
    // des cases restantes parmi les numéros de la plage non encore retenus.
    if picked.len() < pick_count {
        let remaining: Vec<u8> = (1..=main_range).filter(|v| !picked.contains(v)).collect();
        let need = pick_count - picked.len();
        for idx in rand::seq::index::sample(rng, remaining.len(), need).iter() {
            picked.insert(remaining[idx]);
        }
    }

    Ok(picked.into_iter().collect())
}

fn weighted_special_number(
    freq: &FrequencyDistribution,
    special_range: u8,
    rng: &mut StdRng,
) -> Result<u8, CoreError> {
    let values: Vec<u8> = freq.iter().map(|(v, _)| v).collect();
    let dist = WeightedIndex::new(freq.iter().map(|(_, c)| c))
        .map_err(|e| CoreError::Data(format!("distribution de fréquences inexploitable : {}", e)))?;

    let special = values[dist.sample(rng)];

    // Un spécial historique hors de la plage actuelle est écarté au profit
    // d'un tirage uniforme dans la plage. Ce repli ne concerne que le
    // numéro spécial ; les numéros principaux ne sont pas revalidés.
    if (1..=special_range).contains(&special) {
        Ok(special)
    } else {
        Ok(rng.random_range(1..=special_range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use rand::SeedableRng;

    fn assert_valid_main(main: &[u8], pick_count: usize, main_range: u8) {
        assert_eq!(main.len(), pick_count);
        for window in main.windows(2) {
            assert!(window[0] < window[1], "numéros non triés ou en double : {:?}", main);
        }
        for &n in main {
            assert!(n >= 1 && n <= main_range, "numéro {} hors [1, {}]", n, main_range);
        }
    }

    #[test]
    fn test_uniform_ticket_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let ticket = generate_ticket(69, 26, 5, None, None, &mut rng).unwrap();
            assert_valid_main(&ticket.main, 5, 69);
            assert!(ticket.special >= 1 && ticket.special <= 26);
        }
    }

    #[test]
    fn test_generate_with_game_config() {
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = Game::MegaMillions.config();
        let ticket = generate(cfg, Mode::Uniform, None, &mut rng).unwrap();
        assert_valid_main(&ticket.main, cfg.pick_count, cfg.main_range);
        assert!(ticket.special >= 1 && ticket.special <= cfg.special_range);
    }

    #[test]
    fn test_constraint_pick_count_exceeds_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_ticket(3, 26, 5, None, None, &mut rng).unwrap_err();
        assert!(matches!(err, CoreError::Constraint(_)));
    }

    #[test]
    fn test_constraint_zero_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_ticket(0, 26, 5, None, None, &mut rng),
            Err(CoreError::Constraint(_))
        ));
        assert!(matches!(
            generate_ticket(69, 0, 5, None, None, &mut rng),
            Err(CoreError::Constraint(_))
        ));
        assert!(matches!(
            generate_ticket(69, 26, 0, None, None, &mut rng),
            Err(CoreError::Constraint(_))
        ));
    }

    #[test]
    fn test_weighted_empty_distribution_falls_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(3);
        let empty = FrequencyDistribution::default();
        let ticket = generate_ticket(69, 26, 5, Some(&empty), Some(&empty), &mut rng).unwrap();
        assert_valid_main(&ticket.main, 5, 69);
        assert!(ticket.special >= 1 && ticket.special <= 26);
    }

    #[test]
    fn test_weighted_mode_without_freqs_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = Game::Powerball.config();
        let ticket = generate(cfg, Mode::Weighted, None, &mut rng).unwrap();
        assert_valid_main(&ticket.main, 5, 69);
    }

    #[test]
    fn test_weighted_never_selects_absent_value() {
        let mut rng = StdRng::seed_from_u64(11);
        let main_freq = FrequencyDistribution::from_counts([
            (1, 2),
            (2, 2),
            (3, 2),
            (4, 2),
            (5, 1),
            (6, 1),
        ]);
        let special_freq = FrequencyDistribution::from_counts([(10, 2)]);

        for _ in 0..1000 {
            let ticket =
                generate_ticket(69, 26, 5, Some(&main_freq), Some(&special_freq), &mut rng)
                    .unwrap();
            assert!(ticket.main.iter().all(|&n| n <= 6), "main = {:?}", ticket.main);
            assert_eq!(ticket.special, 10);
        }
    }

    #[test]
    fn test_weighted_favors_frequent_special() {
        let mut rng = StdRng::seed_from_u64(99);
        let special_range: u8 = 26;
        let freq = FrequencyDistribution::from_counts(
            (1..=special_range).map(|v| (v, if v == 7 { 1000 } else { 1 })),
        );

        let draws = 10_000;
        let mut sevens = 0;
        for _ in 0..draws {
            if weighted_special_number(&freq, special_range, &mut rng).unwrap() == 7 {
                sevens += 1;
            }
        }

        // Attendu : 1000 / 1025 ≈ 0.976
        let observed = sevens as f64 / draws as f64;
        assert!(observed > 0.95, "fréquence observée de 7 : {}", observed);
    }

    #[test]
    fn test_weighted_special_out_of_range_falls_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(5);
        let freq = FrequencyDistribution::from_counts([(30, 5)]);

        for _ in 0..500 {
            let special = weighted_special_number(&freq, 26, &mut rng).unwrap();
            assert!(special >= 1 && special <= 26);
        }
    }

    #[test]
    fn test_weighted_small_support_fills_remaining_uniformly() {
        // Support de 2 numéros pour une grille de 5 : le plafond de tirages
        // est atteint, puis le remplissage uniforme complète la grille.
        let mut rng = StdRng::seed_from_u64(13);
        let freq = FrequencyDistribution::from_counts([(1, 3), (2, 3)]);

        let ticket = generate_ticket(10, 26, 5, Some(&freq), None, &mut rng).unwrap();
        assert_valid_main(&ticket.main, 5, 10);
        assert!(ticket.main.contains(&1));
        assert!(ticket.main.contains(&2));
    }

    #[test]
    fn test_same_seed_same_ticket() {
        let freq = FrequencyDistribution::from_counts((1..=69).map(|v| (v, v as u32)));
        let special = FrequencyDistribution::from_counts((1..=26).map(|v| (v, 1)));

        let mut rng_a = StdRng::seed_from_u64(2024);
        let mut rng_b = StdRng::seed_from_u64(2024);

        let a = generate_ticket(69, 26, 5, Some(&freq), Some(&special), &mut rng_a).unwrap();
        let b = generate_ticket(69, 26, 5, Some(&freq), Some(&special), &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}
