// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Pavé 5 colonnes (fonctions, chiffres, opérateurs, Ans, Hist, Thème)
// - Clavier : 0-9 . + - * / ( ) seulement ; Enter évalue, Backspace efface, Échap vide
// - L’entrée n’est PAS un TextEdit : toute saisie passe par la Session

use eframe::egui;

use super::etat::AppCalc;

/// Disposition du pavé ("" = case vide).
const PAVE: [[&str; 5]; 8] = [
    ["C", "DEL", "(", ")", "Thème"],
    ["sin", "cos", "tan", "√", "^"],
    ["log", "ln", "π", "e", "/"],
    ["7", "8", "9", "*", "Hist"],
    ["4", "5", "6", "-", "mod"],
    ["1", "2", "3", "+", "Ans"],
    ["0", ".", "=", "abs", "!"],
    ["deg", "rad", "", "", ""],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Inserer(&'static str),
    ClearEntree,
    Backspace,
    Evaluer,
    Theme,
    Historique,
}

/// Bouton -> action. Les fonctions s’insèrent avec leur '('.
fn action_bouton(label: &'static str) -> Option<Action> {
    let a = match label {
        "" => return None,
        "C" => Action::ClearEntree,
        "DEL" => Action::Backspace,
        "=" => Action::Evaluer,
        "Thème" => Action::Theme,
        "Hist" => Action::Historique,

        "π" => Action::Inserer("pi"),
        "√" => Action::Inserer("sqrt("),
        "sin" => Action::Inserer("sin("),
        "cos" => Action::Inserer("cos("),
        "tan" => Action::Inserer("tan("),
        "log" => Action::Inserer("log10("),
        "ln" => Action::Inserer("log("),
        "abs" => Action::Inserer("abs("),
        "!" => Action::Inserer("factorial("),
        "mod" => Action::Inserer("%"),
        "deg" => Action::Inserer("degrees("),
        "rad" => Action::Inserer("radians("),

        // chiffres, opérateurs, parenthèses, "e", "Ans" : tels quels
        autre => Action::Inserer(autre),
    };
    Some(a)
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_affichage(ui);

                ui.add_space(6.0);
                self.ui_pave(ui);

                if self.voir_historique {
                    ui.add_space(6.0);
                    ui.separator();
                    self.ui_historique(ui);
                }

                ui.add_space(6.0);
                ui.separator();
                self.ui_demarche(ui);
            });
    }

    /// Clavier + coller (hors TextEdit : on lit les événements bruts).
    pub fn clavier(&mut self, ctx: &egui::Context) {
        let (texte, colle, enter, backspace, esc) = ctx.input(|i| {
            let mut texte = String::new();
            let mut colle = String::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => texte.push_str(t),
                    egui::Event::Paste(t) => colle.push_str(t),
                    _ => {}
                }
            }
            (
                texte,
                colle,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if !texte.is_empty() {
            self.saisir_clavier(&texte);
        }
        // coller : le texte passe tel quel (la Session jugera à l’évaluation)
        if !colle.is_empty() {
            self.saisir(colle.trim());
        }
        if backspace {
            self.backspace_entree();
        }
        if esc {
            self.clear_entree();
        }
        if enter {
            self.evaluer();
        }
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(self.affichage()).monospace().size(24.0));
                });
            });

        ui.horizontal(|ui| {
            ui.monospace(format!("Ans = {}", self.session.recall_last_answer()));
            if ui.small_button("Copier").clicked() {
                ui.ctx().copy_text(self.session.entree().to_string());
            }
        });

        if !self.statut.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.statut);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for label in ligne {
                        match action_bouton(label) {
                            Some(action) => {
                                let resp = ui.add_sized([72.0, 40.0], egui::Button::new(label));
                                if resp.clicked() {
                                    self.appliquer(ui.ctx(), action);
                                }
                            }
                            None => {
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn appliquer(&mut self, ctx: &egui::Context, action: Action) {
        match action {
            Action::Inserer(s) => self.saisir(s),
            Action::ClearEntree => self.clear_entree(),
            Action::Backspace => self.backspace_entree(),
            Action::Evaluer => self.evaluer(),
            Action::Historique => self.voir_historique = !self.voir_historique,
            Action::Theme => {
                self.theme_sombre = !self.theme_sombre;
                ctx.set_visuals(if self.theme_sombre {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                });
            }
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.label("Historique :");
        let lignes = self.lignes_historique();
        egui::ScrollArea::vertical()
            .id_salt("historique")
            .max_height(180.0)
            .show(ui, |ui| {
                if lignes.is_empty() {
                    ui.monospace("(vide)");
                }
                for l in &lignes {
                    ui.monospace(l);
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| match self.session.derniere_demarche() {
                Some(d) => {
                    Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                    Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                    Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                }
                None => {
                    ui.monospace("indisponible");
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
