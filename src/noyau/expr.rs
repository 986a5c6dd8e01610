// src/noyau/expr.rs
//
// AST numérique (flottants f64).
// - Lit  : littéral
// - Neg  : moins unaire
// - Bin  : opérateur binaire
// - Appel: fonction unaire de la table fixe
//
// Chaque noeud possède ses enfants (Box) ; la racine appartient à l’appelant.

use std::fmt;

use super::jetons::Op;
use super::symboles::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Lit(f64),
    Neg(Box<Expr>),
    Bin(Op, Box<Expr>, Box<Expr>),
    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn bin(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    /// Épine gauche d’une chaîne associative à gauche ("1+2-3*4").
    ///
    /// Retourne le noeud le plus à gauche (hors chaîne) et les (op, droite)
    /// dans l’ordre de lecture. Itératif : la chaîne peut être très longue.
    pub fn chaine_gauche(&self) -> (&Expr, Vec<(Op, &Expr)>) {
        let mut suite = Vec::new();
        let mut gauche = self;
        while let Expr::Bin(op, a, b) = gauche {
            if op.associatif_droite() {
                break;
            }
            suite.push((*op, b.as_ref()));
            gauche = a.as_ref();
        }
        suite.reverse();
        (gauche, suite)
    }
}

/// Affichage entièrement parenthésé : montre la structure réellement construite.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Lit(v) => write!(f, "{}", super::format::format_nombre(*v)),
            Expr::Neg(x) => write!(f, "(-{x})"),
            Expr::Bin(op, a, b) if op.associatif_droite() => {
                write!(f, "({a} {} {b})", op.symbole())
            }
            Expr::Bin(..) => {
                let (tete, suite) = self.chaine_gauche();
                for _ in 0..suite.len() {
                    f.write_str("(")?;
                }
                write!(f, "{tete}")?;
                for (op, droite) in suite {
                    write!(f, " {} {droite})", op.symbole())?;
                }
                Ok(())
            }
            Expr::Appel(fct, x) => write!(f, "{}({x})", fct.nom()),
        }
    }
}
