mod interactive;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use baccara_cli::{analysis, display};
use baccara_cli::session::Session;
use baccara_store::models::Symbol;
use baccara_store::store::{data_dir, history_path, session_path, write_export};

#[derive(Parser)]
#[command(name = "baccara", about = "Suivi et prédiction de résultats de baccara")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enregistrer un ou plusieurs résultats (P, B ou T)
    Add {
        /// Symboles à enregistrer, dans l'ordre
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Afficher la grille des derniers résultats
    Table,

    /// Afficher les statistiques (taux, séries, précision des prédictions)
    Stats,

    /// Afficher la prédiction du prochain résultat
    Predict,

    /// Afficher les motifs les plus fréquents
    Patterns,

    /// Vider la session (l'historique complet est conservé)
    Clear {
        /// Ne pas demander de confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Exporter un instantané JSON de l'historique
    Export,

    /// Afficher le répertoire des données
    DataPath,

    /// Mode interactif (REPL)
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut session = Session::open(&session_path(), &history_path());

    match cli.command {
        Command::Add { symbols } => cmd_add(&mut session, &symbols),
        Command::Table => cmd_table(&session),
        Command::Stats => cmd_stats(&session),
        Command::Predict => cmd_predict(&session),
        Command::Patterns => cmd_patterns(&session),
        Command::Clear { yes } => cmd_clear(&mut session, yes),
        Command::Export => cmd_export(&session),
        Command::DataPath => {
            println!("{}", data_dir().display());
            Ok(())
        }
        Command::Interactive => interactive::run_interactive(&mut session),
    }
}

/// Un échec de sauvegarde est signalé mais jamais fatal : l'état en mémoire
/// reste valide et la prochaine action retentera l'écriture.
pub(crate) fn persist_with_warning(session: &Session) {
    if let Err(e) = session.persist(&session_path(), &history_path()) {
        eprintln!("Attention : échec de la sauvegarde : {e:#}");
    }
}

fn cmd_add(session: &mut Session, symbols: &[String]) -> Result<()> {
    let parsed: Vec<Symbol> = symbols.iter().map(|s| s.parse()).collect::<Result<_>>()?;

    for symbol in parsed {
        let report = session.record(symbol);
        if let Some(hit) = report.scored {
            display::display_scored(symbol, hit);
        }
        persist_with_warning(session);
    }

    display::display_grid(session.display_results());
    display::display_prediction(session.current_prediction());
    Ok(())
}

pub(crate) fn cmd_table(session: &Session) -> Result<()> {
    display::display_grid(session.display_results());
    Ok(())
}

pub(crate) fn cmd_stats(session: &Session) -> Result<()> {
    if session.history_len() == 0 {
        println!("Historique vide. Lancez d'abord : baccara add P");
        return Ok(());
    }
    let history = session.history_results();
    display::display_stats(
        &analysis::win_rates(history),
        &analysis::max_streaks(history),
        session.prediction_stats(),
        history.len(),
    );
    Ok(())
}

pub(crate) fn cmd_predict(session: &Session) -> Result<()> {
    display::display_prediction(session.predict());
    Ok(())
}

pub(crate) fn cmd_patterns(session: &Session) -> Result<()> {
    if session.history_len() == 0 {
        println!("Historique vide. Lancez d'abord : baccara add P");
        return Ok(());
    }
    display::display_patterns(&analysis::common_patterns(session.history_results(), 3));
    Ok(())
}

pub(crate) fn cmd_clear(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        let confirm =
            prompt("Vider la session (statistiques de prédiction comprises) ? (o/n) : ")?;
        if confirm.to_lowercase() != "o" {
            println!("Opération annulée.");
            return Ok(());
        }
    }
    session.clear_session();
    persist_with_warning(session);
    println!("Session vidée. L'historique complet reste disponible pour les prédictions.");
    Ok(())
}

pub(crate) fn cmd_export(session: &Session) -> Result<()> {
    if session.history_len() == 0 {
        println!("Historique vide. Lancez d'abord : baccara add P");
        return Ok(());
    }
    match write_export(Path::new("."), &session.export()) {
        Ok(path) => display::display_export_path(&path),
        Err(e) => eprintln!("Attention : échec de l'export : {e:#}"),
    }
    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}
