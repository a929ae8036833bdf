use clap::ValueEnum;

use crate::error::CoreError;

/// Paramètres statiques d'un jeu. Définis une fois au démarrage du
/// processus, jamais construits par requête.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub name: &'static str,
    pub main_range: u8,
    pub special_range: u8,
    pub pick_count: usize,
    pub special_label: &'static str,
}

const POWERBALL: GameConfig = GameConfig {
    name: "Powerball",
    main_range: 69,
    special_range: 26,
    pick_count: 5,
    special_label: "Powerball",
};

const MEGA_MILLIONS: GameConfig = GameConfig {
    name: "Mega Millions",
    main_range: 70,
    special_range: 25,
    pick_count: 5,
    special_label: "Mega Ball",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Game {
    Powerball,
    #[clap(name = "megamillions")]
    MegaMillions,
}

impl Game {
    pub fn config(&self) -> &'static GameConfig {
        match self {
            Game::Powerball => &POWERBALL,
            Game::MegaMillions => &MEGA_MILLIONS,
        }
    }

    /// Résout un identifiant textuel de jeu, point d'entrée des appelants
    /// programmatiques (la CLI résout le jeu via `ValueEnum` en amont).
    /// Échoue immédiatement sur un identifiant inconnu, sans tenter de
    /// génération.
    pub fn from_id(id: &str) -> Result<Game, CoreError> {
        match id {
            "powerball" => Ok(Game::Powerball),
            "megamillions" => Ok(Game::MegaMillions),
            other => Err(CoreError::Config(format!(
                "jeu non supporté : '{}' (attendu 'powerball' ou 'megamillions')",
                other
            ))),
        }
    }
}

impl GameConfig {
    /// Vérification de cohérence au démarrage.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.main_range == 0 || self.special_range == 0 {
            return Err(CoreError::Config(format!(
                "{} : plages de numéros invalides",
                self.name
            )));
        }
        if self.pick_count == 0 || self.pick_count > self.main_range as usize {
            return Err(CoreError::Config(format!(
                "{} : {} numéros demandés sur une plage de {}",
                self.name, self.pick_count, self.main_range
            )));
        }
        Ok(())
    }
}
