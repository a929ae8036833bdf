use std::collections::BTreeMap;

use chrono::{Datelike, Local};

use crate::models::DrawRecord;

/// Distribution de fréquences : numéro → nombre d'occurrences observées.
/// Invariant : chaque clé présente a un comptage ≥ 1 ; les numéros jamais
/// observés n'apparaissent pas. L'ordre d'itération (BTreeMap) est
/// déterministe, ce dont dépend l'échantillonnage pondéré avec seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyDistribution {
    counts: BTreeMap<u8, u32>,
}

impl FrequencyDistribution {
    pub fn increment(&mut self, value: u8) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Comptage observé pour `value`, 0 si jamais observé.
    pub fn tally(&self, value: u8) -> u32 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts.iter().map(|(&v, &c)| (v, c))
    }

    /// Construit une distribution à partir de paires (numéro, comptage).
    /// Les comptages nuls sont écartés pour préserver l'invariant.
    pub fn from_counts(counts: impl IntoIterator<Item = (u8, u32)>) -> Self {
        Self {
            counts: counts.into_iter().filter(|&(_, c)| c > 0).collect(),
        }
    }
}

/// Construit les deux distributions (principaux, spécial) sur la fenêtre
/// des `window_years` dernières années. Zéro tirage retenu donne deux
/// distributions vides : cas dégénéré valide, l'appelant retombe alors sur
/// le tirage uniforme.
pub fn build(
    records: &[DrawRecord],
    window_years: i32,
) -> (FrequencyDistribution, FrequencyDistribution) {
    build_at(records, window_years, Local::now().year())
}

/// Variante à année de référence explicite. Un tirage dont l'année égale
/// exactement `current_year - window_years` est inclus.
pub fn build_at(
    records: &[DrawRecord],
    window_years: i32,
    current_year: i32,
) -> (FrequencyDistribution, FrequencyDistribution) {
    let cutoff_year = current_year - window_years;

    let mut main_freq = FrequencyDistribution::default();
    let mut special_freq = FrequencyDistribution::default();

    for record in records.iter().filter(|r| r.date.year() >= cutoff_year) {
        for &n in &record.main {
            main_freq.increment(n);
        }
        special_freq.increment(record.special);
    }

    (main_freq, special_freq)
}
