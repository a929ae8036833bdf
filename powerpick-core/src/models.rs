use chrono::NaiveDate;
use serde::Serialize;

/// Un tirage historique : date, 5 numéros principaux distincts, un numéro
/// spécial. Immuable une fois parsé ; les lignes invalides du jeu de
/// données ne deviennent jamais des `DrawRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub date: NaiveDate,
    pub main: [u8; 5],
    pub special: u8,
}

/// Une grille générée : numéros principaux triés croissants et distincts,
/// plus le numéro spécial à part. Construite et rendue à l'appelant,
/// jamais stockée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub main: Vec<u8>,
    pub special: u8,
}
