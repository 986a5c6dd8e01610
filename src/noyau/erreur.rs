// src/noyau/erreur.rs
//
// Erreurs du pipeline jetons -> symboles -> RPN -> Expr -> valeur.
// Chaque étape renvoie ErreurEval ; la Session ne tente aucune reprise.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    /// Jeton inconnu ou grammaire violée (parenthèses, opérateur orphelin...).
    #[error("erreur de syntaxe: {0}")]
    Syntaxe(String),

    /// Identifiant absent des tables fixes (et différent de "Ans").
    #[error("symbole inconnu: {0}")]
    SymboleInconnu(String),

    #[error("division par zéro")]
    DivisionParZero,

    /// Argument hors du domaine de la fonction.
    #[error("hors domaine: {0}")]
    Domaine(String),

    /// Résultat non fini (inf / NaN).
    #[error("dépassement: {0}")]
    Depassement(String),
}

impl ErreurEval {
    /// Nom court de la nature d’erreur (journal / ligne d’état).
    pub fn nature(&self) -> &'static str {
        match self {
            ErreurEval::Syntaxe(_) => "syntaxe",
            ErreurEval::SymboleInconnu(_) => "symbole",
            ErreurEval::DivisionParZero => "division",
            ErreurEval::Domaine(_) => "domaine",
            ErreurEval::Depassement(_) => "depassement",
        }
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }
}

pub type Resultat<T> = Result<T, ErreurEval>;
