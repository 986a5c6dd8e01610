// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok (déjà résolus) en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Précédence : ^ (4) > moins unaire (3) > * / % (2) > + - (1)
// - ^ associatif à droite, les autres à gauche
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS de valeur (début, après opérateur ou '('),
//      c’est Tok::Neg (préfixe) : "-2^2" => "2 2 ^ neg"
// - Fonction : le jeton suivant doit être '(' ; sortie après la ')' correspondante.
// - Pas de multiplication implicite : "2(3)" ou "2 3" => erreur de syntaxe.

use super::erreur::{ErreurEval, Resultat};
use super::expr::Expr;
use super::jetons::{Op, Tok};

/// Garde-fou : imbrication max (parenthèses, moins unaire, fonctions, chaînes de ^).
/// Les chaînes associatives à gauche ("1+1+...+1") ne comptent pas :
/// eval et Display les parcourent sans récursion.
pub const PROFONDEUR_MAX: usize = 512;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Op(Op::Plus) | Tok::Op(Op::Minus) => 1,
        Tok::Op(Op::Star) | Tok::Op(Op::Slash) | Tok::Op(Op::Percent) => 2,
        Tok::Neg => 3,
        Tok::Op(Op::Caret) => 4,
        _ => 0,
    }
}

/// Convertit une suite de jetons résolus en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(π), Op(Slash), Num(2), RPar]
///   rpn:    [Num(π), Num(2), Op(Slash), Fonction(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    if tokens.is_empty() {
        return Err(ErreurEval::syntaxe("expression vide"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquants.
    let mut prev_was_value = false;

    // Une fonction vient d’être lue : le jeton suivant doit être '('.
    let mut attend_parenthese = false;

    for tok in tokens.iter().cloned() {
        if attend_parenthese && tok != Tok::LPar {
            return Err(ErreurEval::syntaxe("fonction sans '(' immédiatement après"));
        }
        attend_parenthese = false;

        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant entre deux valeurs"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(_) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant avant une fonction"));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(tok);
                attend_parenthese = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("opérateur manquant avant '('"));
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("')' sans opérande"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if top == Tok::LPar {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurEval::syntaxe("')' sans '(' correspondante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            // moins unaire : préfixe, il ne ferme aucun opérande => rien à dépiler
            Tok::Op(Op::Minus) if !prev_was_value => ops.push(Tok::Neg),

            Tok::Op(op) => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe(format!(
                        "opérateur '{}' sans opérande gauche",
                        op.symbole()
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                let p_tok = precedence(&tok);
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let doit_pop = if op.associatif_droite() {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg | Tok::Ident(_) => {
                return Err(ErreurEval::syntaxe(format!("jeton inattendu: {tok}")));
            }
        }
    }

    if attend_parenthese {
        return Err(ErreurEval::syntaxe("fonction sans '(' immédiatement après"));
    }
    if !prev_was_value {
        return Err(ErreurEval::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op == Tok::LPar {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// La pile garde l’imbrication de chaque sous-arbre : au-delà de PROFONDEUR_MAX
/// on refuse. L’opérande gauche d’un opérateur associatif à gauche
/// n’ajoute rien (chaîne plate).
pub fn from_rpn(rpn: &[Tok]) -> Resultat<Expr> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let invalide = || ErreurEval::syntaxe("expression invalide");

    for tok in rpn.iter().cloned() {
        let (e, prof) = match tok {
            Tok::Num(v) => (Expr::Lit(v), 1),

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                (Expr::Neg(Box::new(x)), p + 1)
            }

            Tok::Fonction(f) => {
                let (x, p) = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("fonction sans argument"))?;
                (Expr::Appel(f, Box::new(x)), p + 1)
            }

            Tok::Op(op) => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let prof = if op.associatif_droite() {
                    pa.max(pb) + 1
                } else {
                    pa.max(pb + 1)
                };
                (Expr::bin(op, a, b), prof)
            }

            Tok::Ident(name) => {
                return Err(ErreurEval::SymboleInconnu(name));
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurEval::syntaxe("parenthèse inattendue en RPN"));
            }
        };

        if prof > PROFONDEUR_MAX {
            return Err(ErreurEval::syntaxe("imbrication trop profonde"));
        }
        st.push((e, prof));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}

/// Jetons résolus -> Expr (shunting-yard puis reconstruction).
pub fn parse(tokens: &[Tok]) -> Resultat<Expr> {
    let rpn = to_rpn(tokens)?;
    from_rpn(&rpn)
}
