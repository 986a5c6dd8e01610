//! Session : entrée courante + dernière réponse + historique.
//!
//! Contrats :
//! - seule la Session modifie l’historique et la dernière réponse ;
//! - succès : dernière réponse mise à jour AVANT l’ajout à l’historique ;
//! - échec : l’entrée devient "Error", rien d’autre ne bouge ;
//! - l’historique est complet en mémoire, l’affichage n’en montre que les 12 derniers.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::erreur::Resultat;
use super::eval::{eval_expression, DemarcheNoyau};
use super::format::{format_nombre, MARQUEUR_ERREUR};

/// Nombre d’entrées d’historique montrées par défaut.
pub const HISTORIQUE_AFFICHE: usize = 12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    entree: String,
    derniere_reponse: f64,
    historique: Vec<EntreeHistorique>,

    // L’entrée affiche le marqueur d’erreur : la prochaine frappe le remplace.
    en_erreur: bool,

    derniere_demarche: Option<DemarcheNoyau>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reprend un historique déjà stocké (dernière réponse remise à 0).
    pub fn avec_historique(historique: Vec<EntreeHistorique>) -> Self {
        Self {
            historique,
            ..Self::default()
        }
    }

    pub fn entree(&self) -> &str {
        &self.entree
    }

    pub fn derniere_reponse(&self) -> f64 {
        self.derniere_reponse
    }

    /// Historique complet, ordre d’insertion.
    pub fn historique(&self) -> &[EntreeHistorique] {
        &self.historique
    }

    pub fn derniere_demarche(&self) -> Option<&DemarcheNoyau> {
        self.derniere_demarche.as_ref()
    }

    fn sortir_de_l_erreur(&mut self) {
        if self.en_erreur {
            self.entree.clear();
            self.en_erreur = false;
        }
    }

    pub fn append_input(&mut self, fragment: &str) {
        self.sortir_de_l_erreur();
        self.entree.push_str(fragment);
    }

    pub fn backspace(&mut self) {
        self.sortir_de_l_erreur();
        self.entree.pop();
    }

    pub fn clear(&mut self) {
        self.entree.clear();
        self.en_erreur = false;
    }

    /// Évalue l’entrée courante (pipeline complet).
    ///
    /// L’erreur précise est rendue à l’appelant ; l’entrée, elle, n’affiche que "Error".
    pub fn evaluate_current(&mut self) -> Resultat<f64> {
        let texte = self.entree.clone();

        match eval_expression(&texte, self.derniere_reponse) {
            Ok((v, demarche)) => {
                debug!("{texte:?} = {v}");
                self.derniere_reponse = v;
                self.historique.push(EntreeHistorique {
                    expression: texte,
                    resultat: v,
                });
                self.entree = format_nombre(v);
                self.en_erreur = false;
                self.derniere_demarche = Some(demarche);
                Ok(v)
            }
            Err(e) => {
                warn!("évaluation de {texte:?} refusée ({}): {e}", e.nature());
                self.entree = MARQUEUR_ERREUR.to_string();
                self.en_erreur = true;
                self.derniere_demarche = None;
                Err(e)
            }
        }
    }

    /// Dernière réponse sous forme insérable dans l’entrée.
    pub fn recall_last_answer(&self) -> String {
        format_nombre(self.derniere_reponse)
    }

    /// Les `limit` dernières entrées, la plus récente en premier.
    pub fn recent_history(&self, limit: usize) -> Vec<&EntreeHistorique> {
        self.historique.iter().rev().take(limit).collect()
    }
}
