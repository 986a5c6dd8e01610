// src/noyau/format.rs
//
// Forme décimale canonique d’un résultat.
// Display de f64 : plus courte écriture qui relit la même valeur, jamais d’exposant.
// => un résultat réinjecté tel quel dans l’entrée redonne exactement la même valeur.

/// Marqueur affiché à la place de l’entrée quand l’évaluation échoue.
pub const MARQUEUR_ERREUR: &str = "Error";

pub fn format_nombre(v: f64) -> String {
    // -0 s’afficherait "-0"
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
