use std::io::{self, Write};

use anyhow::Result;

use baccara_cli::display;
use baccara_cli::session::Session;
use baccara_store::models::Symbol;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Record(Symbol),
    Table,
    Stats,
    Predict,
    Patterns,
    Clear,
    Export,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "p" | "joueur" => Some(InteractiveCommand::Record(Symbol::Player)),
        "b" | "banquier" => Some(InteractiveCommand::Record(Symbol::Banker)),
        "t" | "egalite" | "égalité" => Some(InteractiveCommand::Record(Symbol::Tie)),
        "1" | "grille" | "table" => Some(InteractiveCommand::Table),
        "2" | "stats" | "statistiques" => Some(InteractiveCommand::Stats),
        "3" | "predire" | "prédire" | "pred" => Some(InteractiveCommand::Predict),
        "4" | "motifs" | "patterns" => Some(InteractiveCommand::Patterns),
        "5" | "vider" | "clear" => Some(InteractiveCommand::Clear),
        "6" | "exporter" | "export" => Some(InteractiveCommand::Export),
        "7" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  p / b / t     Enregistrer un résultat");
    println!("  1. grille     Grille des derniers résultats");
    println!("  2. stats      Statistiques");
    println!("  3. predire    Prédiction du prochain résultat");
    println!("  4. motifs     Motifs fréquents");
    println!("  5. vider      Vider la session");
    println!("  6. exporter   Exporter un instantané");
    println!("  7. quitter    Quitter");
    println!();
}

fn read_input(msg: &str) -> Option<String> {
    print!("{}", msg);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None, // EOF / Ctrl+D
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn record_interactive(session: &mut Session, symbol: Symbol) {
    let report = session.record(symbol);
    if let Some(hit) = report.scored {
        display::display_scored(symbol, hit);
    }
    super::persist_with_warning(session);
    display::display_grid(session.display_results());
    display::display_prediction(report.prediction);
}

pub fn run_interactive(session: &mut Session) -> Result<()> {
    println!("Bienvenue dans le mode interactif de baccara !");

    loop {
        display_menu();
        let input = match read_input("> ") {
            Some(s) => s,
            None => break,
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Record(symbol)) => record_interactive(session, symbol),
            Some(InteractiveCommand::Table) => {
                if let Err(e) = super::cmd_table(session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Stats) => {
                if let Err(e) = super::cmd_stats(session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Predict) => {
                if let Err(e) = super::cmd_predict(session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Patterns) => {
                if let Err(e) = super::cmd_patterns(session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Clear) => {
                if let Err(e) = super::cmd_clear(session, false) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Export) => {
                if let Err(e) = super::cmd_export(session) {
                    println!("Erreur: {e:#}");
                }
            }
            None => {
                println!(
                    "Commande inconnue : '{}'. Tapez p, b, t, un numéro (1-7) ou un nom de commande.",
                    input
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_records() {
        assert_eq!(
            parse_command("p"),
            Some(InteractiveCommand::Record(Symbol::Player))
        );
        assert_eq!(
            parse_command("B"),
            Some(InteractiveCommand::Record(Symbol::Banker))
        );
        assert_eq!(
            parse_command("banquier"),
            Some(InteractiveCommand::Record(Symbol::Banker))
        );
        assert_eq!(
            parse_command("égalité"),
            Some(InteractiveCommand::Record(Symbol::Tie))
        );
    }

    #[test]
    fn test_parse_command_by_number() {
        assert_eq!(parse_command("1"), Some(InteractiveCommand::Table));
        assert_eq!(parse_command("2"), Some(InteractiveCommand::Stats));
        assert_eq!(parse_command("3"), Some(InteractiveCommand::Predict));
        assert_eq!(parse_command("4"), Some(InteractiveCommand::Patterns));
        assert_eq!(parse_command("5"), Some(InteractiveCommand::Clear));
        assert_eq!(parse_command("6"), Some(InteractiveCommand::Export));
        assert_eq!(parse_command("7"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_by_name() {
        assert_eq!(parse_command("grille"), Some(InteractiveCommand::Table));
        assert_eq!(parse_command("statistiques"), Some(InteractiveCommand::Stats));
        assert_eq!(parse_command("predire"), Some(InteractiveCommand::Predict));
        assert_eq!(parse_command("motifs"), Some(InteractiveCommand::Patterns));
        assert_eq!(parse_command("vider"), Some(InteractiveCommand::Clear));
        assert_eq!(parse_command("exporter"), Some(InteractiveCommand::Export));
        assert_eq!(parse_command("quitter"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_case_insensitive() {
        assert_eq!(parse_command("QUIT"), Some(InteractiveCommand::Quit));
        assert_eq!(parse_command("Grille"), Some(InteractiveCommand::Table));
        assert_eq!(
            parse_command("JOUEUR"),
            Some(InteractiveCommand::Record(Symbol::Player))
        );
    }

    #[test]
    fn test_parse_command_unknown() {
        assert_eq!(parse_command("foo"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("8"), None);
        assert_eq!(parse_command("pb"), None);
    }
}
