//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - le générateur ne produit QUE des expressions bien formées :
//!   une erreur de syntaxe ou de symbole est donc un bug du noyau
//! - invariants clés : résultat fini, réinjection exacte, même entrée => même sortie

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval_expression;
use super::format::format_nombre;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurEval) -> bool {
    // Liste blanche : erreurs *normales* sur des expressions bien formées.
    matches!(
        e,
        ErreurEval::DivisionParZero | ErreurEval::Domaine(_) | ErreurEval::Depassement(_)
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits entiers (0 inclus : utile pour / et %) + quelques décimaux
    match rng.pick(10) {
        0 => "0".to_string(),
        1 => "0.5".to_string(),
        2 => "2.25".to_string(),
        3 => ".1".to_string(),
        k => format!("{k}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => "Ans".to_string(),
        3 => format!("(-{})", gen_nombre(rng)),
        _ => gen_nombre(rng),
    }
}

const OPS: [&str; 6] = ["+", "-", "*", "/", "%", "^"];
const FONCTIONS: [&str; 11] = [
    "sin", "cos", "tan", "log", "ln", "log10", "sqrt", "abs", "factorial", "degrees", "radians",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(6) {
        0 => gen_atom(rng),
        1 | 2 => {
            let op = OPS[rng.pick(OPS.len() as u32) as usize];
            let a = gen_expr(rng, depth - 1);
            let b = gen_expr(rng, depth - 1);
            if rng.coin() {
                format!("({a}{op}{b})")
            } else {
                format!("{a} {op} {b}")
            }
        }
        3 => format!("-{}", gen_expr(rng, depth - 1)),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/* ------------------------ Helper somme balancée ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_reinjection() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let ans = 1.5;

        let r1 = eval_expression(&expr, ans).map(|(v, _)| v);
        let r2 = eval_expression(&expr, ans).map(|(v, _)| v);
        match (&r1, &r2) {
            (Ok(a), Ok(b)) => assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?}"),
            _ => assert_eq!(r1, r2, "expr={expr:?}"),
        }

        match r1 {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?} v={v}");

                // réinjection : la forme canonique relit exactement la même valeur
                let txt = format_nombre(v);
                let (relu, _) = eval_expression(&txt, 0.0)
                    .unwrap_or_else(|e| panic!("réinjection de {txt:?} (expr={expr:?}): {e}"));
                assert_eq!(relu, v, "expr={expr:?}");

                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // Suites de caractères quelconques de l’alphabet du clavier : erreur ou valeur, jamais de panique.
    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', '.', '+', '-', '*', '/', '%', '^', '(', ')', ' ', 's', 'i', 'n', 'A',
    ];

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let len = 1 + rng.pick(12) as usize;
        let expr: String = (0..len)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        if let Ok((v, _)) = eval_expression(&expr, 0.0) {
            assert!(v.is_finite(), "expr={expr:?} v={v}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let (v, _d) = eval_expression(&expr, 0.0).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_somme_lineaire_longue() {
    // arbre penché à gauche : aucune imbrication, donc pas de borne
    let expr = vec!["1"; 3000].join("+");
    let (v, d) = eval_expression(&expr, 0.0).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, 3000.0);
    assert!(d.arbre.starts_with("(((("));
}
