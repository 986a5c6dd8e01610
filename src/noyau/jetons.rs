// src/noyau/jetons.rs

use std::fmt;

use super::erreur::{ErreurEval, Resultat};
use super::symboles::Fonction;

/// Opérateurs binaires de la grammaire (le moins unaire est décidé par le parse).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent, // modulo
    Caret,   // ^
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
            Op::Percent => '%',
            Op::Caret => '^',
        }
    }

    /// Seul `^` se regroupe à droite.
    pub fn associatif_droite(self) -> bool {
        matches!(self, Op::Caret)
    }

    fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            '%' => Some(Op::Percent),
            '^' => Some(Op::Caret),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Op),

    // Sortie brute du tokenizer : fonction, constante ou "Ans".
    // NOTE: symboles::resolve décide ce que c’est (ou refuse).
    Ident(String),

    // Uniquement après résolution.
    Fonction(Fonction),

    // Uniquement dans la RPN : moins unaire.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.)
/// - opérateurs + - * / % ^
/// - parenthèses ( )
/// - identifiants : une lettre puis lettres/chiffres/_ (ex: sin, log10, Ans, π)
/// - √ (équivaut à ident("sqrt"))
///
/// Sensible à la casse : "Ans" et "sin" seulement.
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        // espaces ignorés partout : "sin (1)" vaut "sin(1)"
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs (un seul caractère)
        if let Some(op) = Op::depuis_char(c) {
            out.push(Tok::Op(op));
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants (π est une lettre unicode)
        if c.is_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word));
            continue;
        }

        // Nombre : chiffres + au plus un point décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut vu_point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if vu_point {
                        return Err(ErreurEval::syntaxe("deuxième point décimal"));
                    }
                    vu_point = true;
                }
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            if txt == "." {
                return Err(ErreurEval::syntaxe("point décimal isolé"));
            }
            let v: f64 = txt
                .parse()
                .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: {txt}")))?;
            if !v.is_finite() {
                return Err(ErreurEval::Depassement(format!("littéral trop grand: {txt}")));
            }
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{}", super::format::format_nombre(*v)),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
            Tok::Ident(name) => write!(f, "{name}"),
            Tok::Fonction(fct) => write!(f, "{}", fct.nom()),
            Tok::Neg => write!(f, "neg"),
            Tok::LPar => write!(f, "("),
            Tok::RPar => write!(f, ")"),
        }
    }
}

/// Format utilitaire (“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
