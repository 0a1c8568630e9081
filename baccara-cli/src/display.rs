use std::path::Path;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use baccara_store::models::{
    Pattern, Prediction, PredictionBasis, PredictionStats, Symbol, SymbolRate, SymbolStreak,
};

/// Nombre de lignes fixe de la grille ; le remplissage se fait colonne par
/// colonne, comme la table de résultats d'origine.
const GRID_ROWS: usize = 6;

fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::Player => Color::Blue,
        Symbol::Banker => Color::Red,
        Symbol::Tie => Color::Green,
    }
}

pub fn display_grid(results: &[Symbol]) {
    if results.is_empty() {
        println!("Aucun résultat à afficher.");
        return;
    }

    let cols = (results.len() + GRID_ROWS - 1) / GRID_ROWS;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in 0..GRID_ROWS {
        let mut cells = Vec::with_capacity(cols);
        for col in 0..cols {
            let idx = col * GRID_ROWS + row;
            if idx < results.len() {
                cells.push(Cell::new(results[idx].label()).fg(symbol_color(results[idx])));
            } else {
                cells.push(Cell::new(""));
            }
        }
        table.add_row(cells);
    }

    println!("{table}");
}

pub fn display_stats(
    rates: &[SymbolRate],
    streaks: &[SymbolStreak],
    stats: &PredictionStats,
    total: usize,
) {
    println!("\n📊 Statistiques sur {} résultats\n", total);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbole", "Occurrences", "Taux", "Série max"]);

    for (rate, streak) in rates.iter().zip(streaks.iter()) {
        table.add_row(vec![
            Cell::new(rate.symbol.label()).fg(symbol_color(rate.symbol)),
            Cell::new(rate.count.to_string()),
            Cell::new(format!("{:.1}%", rate.rate)),
            Cell::new(streak.max_streak.to_string()),
        ]);
    }
    println!("{table}");

    println!("\n── Précision des prédictions ──");
    println!("  Correctes   : {}", stats.correct);
    println!("  Incorrectes : {}", stats.incorrect);
    if stats.total > 0 {
        println!("  Précision   : {:.1}%", stats.accuracy());
    }
}

pub fn display_prediction(prediction: Option<Prediction>) {
    match prediction {
        None => println!("Prédiction : données insuffisantes"),
        Some(p) => match p.basis {
            PredictionBasis::Pattern { confidence, .. } => {
                println!("🎯 Prédiction : {} ({:.1}% de confiance)", p.symbol, confidence)
            }
            PredictionBasis::Frequency => {
                println!("🎯 Prédiction : {} (basée sur la fréquence)", p.symbol)
            }
        },
    }
}

pub fn display_scored(symbol: Symbol, hit: bool) {
    if hit {
        println!("✔ Prédiction confirmée ({})", symbol);
    } else {
        println!("✘ Prédiction manquée (résultat : {})", symbol);
    }
}

pub fn display_patterns(patterns: &[(Pattern, u32)]) {
    if patterns.is_empty() {
        println!("Pas encore de motifs (au moins 3 résultats sont nécessaires).");
        return;
    }

    println!("\n🔁 Motifs fréquents\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Motif", "Occurrences"]);

    for (pattern, count) in patterns {
        let motif = pattern
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(" → ");
        table.add_row(vec![&motif, &count.to_string()]);
    }
    println!("{table}");
}

pub fn display_export_path(path: &Path) {
    println!("Données exportées dans : {}", path.display());
}
