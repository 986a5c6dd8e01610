//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : envelopper la Session du noyau (entrée, Ans, historique) et ajouter
//! ce qui ne concerne que l’écran : ligne d’état, panneau historique, thème,
//! stockage de l’historique (natif).
//!
//! Contrats :
//! - Aucune évaluation ici en dehors de Session::evaluate_current.
//! - L’affichage montre "Error" ; la nature précise va dans `statut`.
//! - Un échec de stockage est journalisé, jamais montré comme erreur de calcul.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use log::warn;

use crate::noyau::{format_nombre, Session, HISTORIQUE_AFFICHE};

/// Au-delà, l’affichage ne garde que la fin de l’entrée.
const AFFICHAGE_MAX: usize = 100;

/// Touches clavier acceptées telles quelles dans l’entrée.
pub fn touche_autorisee(c: char) -> bool {
    c.is_ascii_digit() || "+-*/().".contains(c)
}

#[derive(Debug)]
pub struct AppCalc {
    pub session: Session,

    // --- sorties ---
    pub statut: String, // nature de la dernière erreur (vide si OK)

    // --- UX ---
    pub voir_historique: bool,
    pub theme_sombre: bool,

    #[cfg(not(target_arch = "wasm32"))]
    chemin_historique: Option<PathBuf>,
}

impl Default for AppCalc {
    #[cfg(not(target_arch = "wasm32"))]
    fn default() -> Self {
        Self::avec_stockage(super::stockage::chemin_par_defaut())
    }

    #[cfg(target_arch = "wasm32")]
    fn default() -> Self {
        Self::sans_stockage()
    }
}

impl AppCalc {
    /// État neuf, historique en mémoire seulement.
    pub fn sans_stockage() -> Self {
        Self {
            session: Session::new(),
            statut: String::new(),
            voir_historique: false,
            theme_sombre: true,
            #[cfg(not(target_arch = "wasm32"))]
            chemin_historique: None,
        }
    }

    /// Reprend l’historique stocké (s’il est lisible) et le met à jour à chaque succès.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn avec_stockage(chemin: Option<PathBuf>) -> Self {
        let mut app = Self::sans_stockage();
        if let Some(p) = &chemin {
            match super::stockage::charger(p) {
                Ok(h) => app.session = Session::avec_historique(h),
                Err(e) => warn!("historique ignoré ({}): {e}", p.display()),
            }
        }
        app.chemin_historique = chemin;
        app
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    pub fn saisir(&mut self, fragment: &str) {
        self.session.append_input(fragment);
        self.statut.clear();
    }

    /// Frappe clavier : seuls les caractères autorisés passent.
    pub fn saisir_clavier(&mut self, texte: &str) {
        let filtre: String = texte.chars().filter(|c| touche_autorisee(*c)).collect();
        if !filtre.is_empty() {
            self.saisir(&filtre);
        }
    }

    /// C : effacer l’entrée.
    pub fn clear_entree(&mut self) {
        self.session.clear();
        self.statut.clear();
    }

    /// ⌫ : retirer le dernier caractère.
    pub fn backspace_entree(&mut self) {
        self.session.backspace();
        self.statut.clear();
    }

    /// = : évaluer l’entrée courante.
    pub fn evaluer(&mut self) {
        match self.session.evaluate_current() {
            Ok(_) => {
                self.statut.clear();
                self.persister();
            }
            Err(e) => self.statut = e.to_string(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn persister(&self) {
        if let Some(p) = &self.chemin_historique {
            if let Err(e) = super::stockage::sauvegarder(p, self.session.historique()) {
                warn!("historique non sauvegardé ({}): {e}", p.display());
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn persister(&self) {}

    /* ------------------------ Lecture pour la vue ------------------------ */

    /// Entrée affichée : seulement les AFFICHAGE_MAX derniers caractères.
    pub fn affichage(&self) -> String {
        let entree = self.session.entree();
        let n = entree.chars().count();
        if n <= AFFICHAGE_MAX {
            return entree.to_string();
        }
        let fin: String = entree.chars().skip(n - AFFICHAGE_MAX).collect();
        format!("...{fin}")
    }

    /// Lignes "expression = résultat", la plus récente en premier.
    pub fn lignes_historique(&self) -> Vec<String> {
        self.session
            .recent_history(HISTORIQUE_AFFICHE)
            .into_iter()
            .map(|e| format!("{} = {}", e.expression, format_nombre(e.resultat)))
            .collect()
    }
}
