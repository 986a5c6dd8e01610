// src/noyau/symboles.rs
//
// Tables fixes (fermées) : fonctions unaires + constantes.
// Initialisées une seule fois pour tout le processus, jamais modifiées.
//
// resolve() :
// - "Ans"      => Num(dernière réponse)
// - constante  => Num(valeur)
// - fonction   => Tok::Fonction (appliquée plus tard par l’évaluateur)
// - autre      => SymboleInconnu

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::erreur::{ErreurEval, Resultat};
use super::jetons::Tok;

/// Identifiant réservé à la dernière réponse.
pub const ANS: &str = "Ans";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln, // "log" et "ln"
    Sqrt,
    Abs,
    Factorielle,
    Degres,
    Radians,
}

impl Fonction {
    /// Nom canonique (affichage démarche).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log10 => "log10",
            Fonction::Ln => "log",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
            Fonction::Factorielle => "factorial",
            Fonction::Degres => "degrees",
            Fonction::Radians => "radians",
        }
    }
}

lazy_static! {
    static ref FONCTIONS: HashMap<&'static str, Fonction> = {
        let mut m = HashMap::new();
        m.insert("sin", Fonction::Sin);
        m.insert("cos", Fonction::Cos);
        m.insert("tan", Fonction::Tan);
        m.insert("log10", Fonction::Log10);
        m.insert("log", Fonction::Ln);
        m.insert("ln", Fonction::Ln);
        m.insert("sqrt", Fonction::Sqrt);
        m.insert("abs", Fonction::Abs);
        m.insert("factorial", Fonction::Factorielle);
        m.insert("degrees", Fonction::Degres);
        m.insert("radians", Fonction::Radians);
        m
    };

    static ref CONSTANTES: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("pi", std::f64::consts::PI);
        m.insert("π", std::f64::consts::PI);
        m.insert("e", std::f64::consts::E);
        m
    };
}

pub fn fonction(nom: &str) -> Option<Fonction> {
    FONCTIONS.get(nom).copied()
}

pub fn constante(nom: &str) -> Option<f64> {
    CONSTANTES.get(nom).copied()
}

/// Remplace les identifiants par des jetons primitifs.
pub fn resolve(tokens: Vec<Tok>, derniere_reponse: f64) -> Resultat<Vec<Tok>> {
    tokens
        .into_iter()
        .map(|tok| match tok {
            Tok::Ident(name) => resolve_ident(&name, derniere_reponse),
            autre => Ok(autre),
        })
        .collect()
}

fn resolve_ident(name: &str, derniere_reponse: f64) -> Resultat<Tok> {
    if name == ANS {
        return Ok(Tok::Num(derniere_reponse));
    }
    if let Some(v) = constante(name) {
        return Ok(Tok::Num(v));
    }
    if let Some(f) = fonction(name) {
        return Ok(Tok::Fonction(f));
    }
    Err(ErreurEval::SymboleInconnu(name.to_string()))
}
