//! src/app/stockage.rs
//!
//! Historique persistant (natif seulement) : un fichier JSON, liste d’entrées
//! {expression, resultat} dans l’ordre d’insertion.
//!
//! Contrats :
//! - fichier absent => historique vide (premier lancement) ;
//! - la dernière réponse n’est PAS stockée (redémarrage => Ans = 0) ;
//! - aucune erreur de stockage ne remonte jusqu’au noyau.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::noyau::EntreeHistorique;

/// Variable d’environnement : chemin explicite du fichier d’historique.
pub const VAR_CHEMIN: &str = "CALCULATRICE_HISTORIQUE";

const DOSSIER_APP: &str = "calculatrice_sci";
const FICHIER: &str = "historique.json";

#[derive(Debug, Error)]
pub enum ErreurStockage {
    #[error("accès au fichier d’historique: {0}")]
    Io(#[from] io::Error),

    #[error("historique illisible: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chemin du fichier : $CALCULATRICE_HISTORIQUE sinon <data_dir>/calculatrice_sci/historique.json.
pub fn chemin_par_defaut() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(VAR_CHEMIN) {
        return Some(PathBuf::from(p));
    }
    dirs::data_dir().map(|d| d.join(DOSSIER_APP).join(FICHIER))
}

pub fn charger(chemin: &Path) -> Result<Vec<EntreeHistorique>, ErreurStockage> {
    let texte = match fs::read_to_string(chemin) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let historique: Vec<EntreeHistorique> = serde_json::from_str(&texte)?;
    info!(
        "historique chargé: {} entrées depuis {}",
        historique.len(),
        chemin.display()
    );
    Ok(historique)
}

pub fn sauvegarder(chemin: &Path, historique: &[EntreeHistorique]) -> Result<(), ErreurStockage> {
    if let Some(parent) = chemin.parent() {
        fs::create_dir_all(parent)?;
    }
    let texte = serde_json::to_string_pretty(historique)?;
    fs::write(chemin, texte)?;
    Ok(())
}
