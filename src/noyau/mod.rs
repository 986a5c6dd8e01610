//! Noyau d’évaluation scientifique
//!
//! Organisation interne :
//! - erreur.rs   : ErreurEval (syntaxe, symbole, division, domaine, dépassement)
//! - jetons.rs   : tokenisation
//! - symboles.rs : tables fixes (fonctions / constantes) + résolution de "Ans"
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST f64
//! - eval.rs     : évaluation + pipeline complet
//! - format.rs   : forme décimale canonique
//! - session.rs  : entrée, dernière réponse, historique

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod session;
pub mod symboles;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::eval_expression;
pub use format::{format_nombre, MARQUEUR_ERREUR};
pub use session::{EntreeHistorique, Session, HISTORIQUE_AFFICHE};
