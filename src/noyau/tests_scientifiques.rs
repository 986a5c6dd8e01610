//! Tests scientifiques (campagne) : propriétés attendues du noyau, bout en bout.
//!
//! But : vérifier le contrat observable (valeurs, natures d’erreur, Ans, historique)
//! à travers eval_expression et Session, sans regarder l’intérieur du pipeline.

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval_expression;
use super::format::format_nombre;
use super::session::Session;

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr, 0.0)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .0
}

fn eval_err(expr: &str) -> ErreurEval {
    match eval_expression(expr, 0.0) {
        Ok((v, _)) => panic!("expr={expr:?} devait échouer, obtenu {v}"),
        Err(e) => e,
    }
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence_infixe() {
    assert_eq!(eval_ok("2+3*4"), 14.0);
    assert_eq!(eval_ok("(2+3)*4"), 20.0);
    assert_eq!(eval_ok("2^3^2"), 512.0);
    assert_eq!(eval_ok("-2^2"), -4.0);
    assert_eq!(eval_ok("(-2)^2"), 4.0);
    assert_eq!(eval_ok("10-4-3"), 3.0);
    assert_eq!(eval_ok("100/10/5"), 2.0);
    assert_eq!(eval_ok("2*3%4"), 2.0);
    assert_eq!(eval_ok(" 1 +  2 "), 3.0);
}

#[test]
fn sci_constantes() {
    let pi = eval_ok("pi");
    assert!((pi - 3.14159265).abs() < 1e-8);
    assert_eq!(pi, std::f64::consts::PI);
    assert_eq!(eval_ok("π"), std::f64::consts::PI);
    assert_eq!(eval_ok("e"), std::f64::consts::E);
    assert_eq!(eval_ok("√(9)"), 3.0);
}

/* ------------------------ Natures d’erreur ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert_eq!(eval_err("5/0"), ErreurEval::DivisionParZero);
    assert_eq!(eval_err("5%0"), ErreurEval::DivisionParZero);
}

#[test]
fn sci_hors_domaine() {
    for expr in [
        "sqrt(-1)",
        "log(0)",
        "log10(-5)",
        "factorial(-3)",
        "factorial(2.5)",
    ] {
        assert!(
            matches!(eval_err(expr), ErreurEval::Domaine(_)),
            "expr={expr:?}"
        );
    }
}

#[test]
fn sci_syntaxe() {
    for expr in ["(2+3", "2+3)", "2+", "", "   ", "2**3", "sin"] {
        assert!(
            matches!(eval_err(expr), ErreurEval::Syntaxe(_)),
            "expr={expr:?}"
        );
    }
}

#[test]
fn sci_symbole_inconnu() {
    assert_eq!(
        eval_err("foo(1)"),
        ErreurEval::SymboleInconnu("foo".into())
    );
}

/* ------------------------ Réinjection ------------------------ */

#[test]
fn sci_reinjection_idempotente() {
    for expr in ["1/3", "2^0.5", "-7/9", "factorial(20)", "1/1024", "pi"] {
        let v = eval_ok(expr);
        let relu = eval_ok(&format_nombre(v));
        assert_eq!(relu, v, "expr={expr:?}");
    }
}

/* ------------------------ Session : Ans + historique ------------------------ */

#[test]
fn sci_ans_apres_evaluation() {
    let mut s = Session::new();
    s.append_input("6*7");
    let r = s.evaluate_current().unwrap();

    s.clear();
    s.append_input("Ans+1");
    assert_eq!(s.evaluate_current(), Ok(r + 1.0));
}

#[test]
fn sci_historique_ordre() {
    let mut s = Session::new();
    s.append_input("1+1");
    s.evaluate_current().unwrap();
    s.clear();
    s.append_input("2+2");
    s.evaluate_current().unwrap();

    let h: Vec<(&str, f64)> = s
        .recent_history(2)
        .into_iter()
        .map(|e| (e.expression.as_str(), e.resultat))
        .collect();
    assert_eq!(h, vec![("2+2", 4.0), ("1+1", 2.0)]);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_factorielle_enorme_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(50);

    assert!(matches!(
        eval_err("factorial(99999999999)"),
        ErreurEval::Depassement(_)
    ));
    budget(t0, max);
}

#[test]
fn sci_stress_parentheses_et_fonctions() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // abs(abs(...abs(-1)...)) : profondeur modérée
    let mut expr = "-1".to_string();
    for _ in 0..100 {
        expr = format!("abs({expr})");
        budget(t0, max);
    }
    assert_eq!(eval_ok(&expr), 1.0);
}
