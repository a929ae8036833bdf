use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};

use powerpick_core::frequency::{self, FrequencyDistribution};
use powerpick_core::game::Game;
use powerpick_core::models::DrawRecord;

type FreqPair = (FrequencyDistribution, FrequencyDistribution);

struct CacheSlot {
    epoch: NaiveDate,
    window_years: i32,
    freqs: Arc<FreqPair>,
}

/// Cache par jeu des distributions de fréquences. L'époque est le jour
/// calendaire : les distributions sont recalculées au changement de jour
/// ou quand la fenêtre historique demandée diffère de celle en cache.
/// Publication par remplacement : une paire publiée n'est jamais modifiée,
/// les lecteurs gardent leur `Arc` aussi longtemps que nécessaire.
pub struct FrequencyCache {
    slots: RwLock<HashMap<Game, CacheSlot>>,
}

impl Default for FrequencyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyCache {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Rend la paire en cache si elle date d'aujourd'hui avec la même
    /// fenêtre, sinon charge les tirages, reconstruit et publie.
    pub fn get_or_build<F>(&self, game: Game, window_years: i32, load: F) -> Result<Arc<FreqPair>>
    where
        F: FnOnce() -> Result<Vec<DrawRecord>>,
    {
        self.get_or_build_at(game, window_years, Local::now().date_naive(), load)
    }

    fn read_slot(&self, game: Game, window_years: i32, epoch: NaiveDate) -> Option<Arc<FreqPair>> {
        let slots = self.slots.read().unwrap_or_else(|p| p.into_inner());
        slots.get(&game).and_then(|slot| {
            (slot.epoch == epoch && slot.window_years == window_years)
                .then(|| Arc::clone(&slot.freqs))
        })
    }

    pub(crate) fn get_or_build_at<F>(
        &self,
        game: Game,
        window_years: i32,
        epoch: NaiveDate,
        load: F,
    ) -> Result<Arc<FreqPair>>
    where
        F: FnOnce() -> Result<Vec<DrawRecord>>,
    {
        if let Some(freqs) = self.read_slot(game, window_years, epoch) {
            return Ok(freqs);
        }

        // Deux reconstructions concurrentes pour la même époque sont un
        // gaspillage inoffensif : chacune publie une paire fraîche par
        // remplacement, la dernière gagne.
        let records = load()?;
        let freqs = Arc::new(frequency::build_at(&records, window_years, epoch.year()));

        let mut slots = self.slots.write().unwrap_or_else(|p| p.into_inner());
        slots.insert(
            game,
            CacheSlot {
                epoch,
                window_years,
                freqs: Arc::clone(&freqs),
            },
        );
        Ok(freqs)
    }
}
