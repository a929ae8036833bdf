use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use powerpick_core::error::CoreError;
use powerpick_core::models::DrawRecord;

/// Disposition du CSV historique (sans en-tête) :
/// colonne 0 ignorée ; 1..=3 mois, jour, année ; 4..=8 les cinq numéros
/// principaux ; 9 le numéro spécial.
const COL_MONTH: usize = 1;
const COL_DAY: usize = 2;
const COL_YEAR: usize = 3;
const COL_MAIN_FIRST: usize = 4;
const COL_SPECIAL: usize = 9;

#[derive(Debug)]
pub struct LoadSummary {
    pub total: u32,
    pub kept: u32,
    pub dropped: u32,
}

/// Charge le jeu de données historique. Les lignes malformées (date
/// invalide, champ non numérique ou manquant, doublon parmi les numéros
/// principaux) sont du bruit attendu dans un historique long : elles sont
/// écartées silencieusement et seulement comptées.
pub fn load_draws(path: &Path) -> Result<(Vec<DrawRecord>, LoadSummary)> {
    if !path.exists() {
        return Err(CoreError::Data(format!("fichier CSV introuvable : {}", path.display())).into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let mut records = Vec::new();
    let mut summary = LoadSummary {
        total: 0,
        kept: 0,
        dropped: 0,
    };

    for record_result in reader.records() {
        summary.total += 1;
        match record_result {
            Ok(record) => match parse_row(&record) {
                Some(draw) => {
                    records.push(draw);
                    summary.kept += 1;
                }
                None => summary.dropped += 1,
            },
            Err(_) => summary.dropped += 1,
        }
    }

    Ok((records, summary))
}

fn parse_row(record: &csv::StringRecord) -> Option<DrawRecord> {
    let field = |idx: usize| record.get(idx).map(str::trim);
    let get_u32 = |idx: usize| field(idx)?.parse::<u32>().ok();
    let get_u8 = |idx: usize| field(idx)?.parse::<u8>().ok();

    let month = get_u32(COL_MONTH)?;
    let day = get_u32(COL_DAY)?;
    let year = field(COL_YEAR)?.parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let mut main = [0u8; 5];
    for (i, slot) in main.iter_mut().enumerate() {
        *slot = get_u8(COL_MAIN_FIRST + i)?;
    }
    for i in 0..main.len() {
        for j in (i + 1)..main.len() {
            if main[i] == main[j] {
                return None;
            }
        }
    }

    let special = get_u8(COL_SPECIAL)?;

    Some(DrawRecord {
        date,
        main,
        special,
    })
}
