//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> resolve (Ans, constantes, fonctions) -> RPN -> Expr -> valeur f64
//!
//! Garde-fous (jamais d’annulation externe) :
//! - division / modulo par zéro refusés
//! - domaine des fonctions vérifié AVANT l’appel
//! - tout résultat non fini => Depassement

use log::debug;
use num_traits::ToPrimitive;

use super::erreur::{ErreurEval, Resultat};
use super::expr::Expr;
use super::format::format_nombre;
use super::jetons::{format_tokens, tokenize, Op};
use super::rpn::{from_rpn, to_rpn};
use super::symboles::{resolve, Fonction};

/// Tolérance pour décider qu’un flottant est entier (factorielle).
pub const EPSILON_ENTIER: f64 = 1e-9;

/// 171! dépasse f64::MAX.
pub const FACTORIELLE_MAX: u64 = 170;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// API publique : évalue une expression texte avec la dernière réponse pour "Ans".
/// Retourne la valeur + la démarche (jetons, RPN, arbre).
pub fn eval_expression(expr_str: &str, derniere_reponse: f64) -> Resultat<(f64, DemarcheNoyau)> {
    // 1) Jetons bruts
    let bruts = tokenize(expr_str)?;

    // 2) Symboles (Ans / constantes / fonctions)
    let jetons = resolve(bruts, derniere_reponse)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons: {jetons_txt}");

    // 3) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!("rpn: {rpn_txt}");

    // 4) AST
    let expr = from_rpn(&rpn)?;

    // 5) Valeur
    let v = evaluate(&expr)?;
    debug!("{expr} = {}", format_nombre(v));

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        arbre: expr.to_string(),
    };

    Ok((v, d))
}

/// Évaluation récursive (imbrication bornée par rpn::PROFONDEUR_MAX).
/// Les chaînes associatives à gauche sont repliées en boucle.
pub fn evaluate(expr: &Expr) -> Resultat<f64> {
    match expr {
        Expr::Lit(v) => fini(*v, "littéral"),
        Expr::Neg(x) => Ok(-evaluate(x)?),
        Expr::Bin(op, a, b) if op.associatif_droite() => {
            let a = evaluate(a)?;
            let b = evaluate(b)?;
            applique_op(*op, a, b)
        }
        Expr::Bin(..) => {
            let (tete, suite) = expr.chaine_gauche();
            let mut acc = evaluate(tete)?;
            for (op, droite) in suite {
                acc = applique_op(op, acc, evaluate(droite)?)?;
            }
            Ok(acc)
        }
        Expr::Appel(f, x) => applique_fonction(*f, evaluate(x)?),
    }
}

fn fini(v: f64, contexte: &str) -> Resultat<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::Depassement(format!("{contexte}: résultat non fini")))
    }
}

fn applique_op(op: Op, a: f64, b: f64) -> Resultat<f64> {
    match op {
        Op::Plus => fini(a + b, "addition"),
        Op::Minus => fini(a - b, "soustraction"),
        Op::Star => fini(a * b, "multiplication"),
        Op::Slash => {
            if b == 0.0 {
                return Err(ErreurEval::DivisionParZero);
            }
            fini(a / b, "division")
        }
        Op::Percent => {
            if b == 0.0 {
                return Err(ErreurEval::DivisionParZero);
            }
            // reste flottant : signe du dividende
            fini(a % b, "modulo")
        }
        Op::Caret => {
            let r = a.powf(b);
            // NaN (base négative, exposant non entier) : domaine, pas dépassement
            if r.is_nan() {
                return Err(ErreurEval::Domaine(format!(
                    "{}^{} n’est pas réel",
                    format_nombre(a),
                    format_nombre(b)
                )));
            }
            fini(r, "puissance")
        }
    }
}

fn applique_fonction(f: Fonction, x: f64) -> Resultat<f64> {
    let r = match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),
        Fonction::Sqrt => {
            if x < 0.0 {
                return Err(hors_domaine(f, x));
            }
            x.sqrt()
        }
        Fonction::Ln => {
            if x <= 0.0 {
                return Err(hors_domaine(f, x));
            }
            x.ln()
        }
        Fonction::Log10 => {
            if x <= 0.0 {
                return Err(hors_domaine(f, x));
            }
            x.log10()
        }
        Fonction::Abs => x.abs(),
        Fonction::Factorielle => factorielle(x)?,
        Fonction::Degres => x.to_degrees(),
        Fonction::Radians => x.to_radians(),
    };
    fini(r, f.nom())
}

fn hors_domaine(f: Fonction, x: f64) -> ErreurEval {
    ErreurEval::Domaine(format!("{}({})", f.nom(), format_nombre(x)))
}

/// n! pour n entier >= 0 (à EPSILON_ENTIER près).
/// Borné : au-delà de FACTORIELLE_MAX on refuse sans boucler.
fn factorielle(x: f64) -> Resultat<f64> {
    let n = x.round();
    if x < 0.0 || (x - n).abs() >= EPSILON_ENTIER {
        return Err(hors_domaine(Fonction::Factorielle, x));
    }
    // borne testée sur le flottant : 1e20 ne tient pas dans un u64
    if n > FACTORIELLE_MAX as f64 {
        return Err(ErreurEval::Depassement(format!(
            "factorial({})",
            format_nombre(n)
        )));
    }
    let n = n
        .to_u64()
        .ok_or_else(|| hors_domaine(Fonction::Factorielle, x))?;
    Ok((2..=n).fold(1.0, |acc, k| acc * k as f64))
}
