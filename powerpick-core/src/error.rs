use thiserror::Error;

/// Erreurs structurées du cœur : chaque variante porte sa catégorie et un
/// message destiné à l'appelant. Le cœur ne réessaie jamais lui-même.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Jeu de données historique absent ou structurellement inexploitable.
    #[error("données historiques : {0}")]
    Data(String),

    /// Identifiant de jeu non supporté.
    #[error("configuration : {0}")]
    Config(String),

    /// Demande de tirage impossible à satisfaire (ex. plus de numéros
    /// demandés que la plage n'en contient).
    #[error("contrainte : {0}")]
    Constraint(String),
}
