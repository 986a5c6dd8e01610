//! Calculatrice scientifique
//!
//! - `noyau` : évaluation sûre d’expressions (jetons -> symboles -> RPN -> arbre -> f64)
//!   + Session (entrée, dernière réponse, historique). Aucune dépendance UI.
//! - `app`   : appelant egui du noyau (pavé, clavier, historique, stockage natif).

pub mod app;
pub mod noyau;
