use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Nombre de résultats conservés dans la fenêtre d'affichage.
pub const DISPLAY_WINDOW: usize = 30;

/// Longueur des motifs analysés.
pub const PATTERN_LEN: usize = 3;

pub type Pattern = [Symbol; PATTERN_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "P")]
    Player,
    #[serde(rename = "B")]
    Banker,
    #[serde(rename = "T")]
    Tie,
}

impl Symbol {
    /// Ordre canonique : Joueur, Banquier, Égalité.
    pub const ALL: [Symbol; 3] = [Symbol::Player, Symbol::Banker, Symbol::Tie];

    pub fn label(&self) -> &'static str {
        match self {
            Symbol::Player => "P",
            Symbol::Banker => "B",
            Symbol::Tie => "T",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Symbol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "p" | "joueur" => Ok(Symbol::Player),
            "b" | "banquier" => Ok(Symbol::Banker),
            "t" | "egalite" | "égalité" => Ok(Symbol::Tie),
            _ => bail!("Symbole inconnu : '{}' (attendu P, B ou T)", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredictionStats {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
}

impl PredictionStats {
    /// Comptabilise le verdict d'une prédiction. Appelé exactement une fois
    /// par résultat enregistré, et seulement si une prédiction était en attente.
    pub fn score(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// Contenu du magasin de session : fenêtre d'affichage, liste d'audit des
/// motifs et compteurs de prédiction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub results: Vec<Symbol>,
    pub patterns: Vec<Pattern>,
    pub prediction_stats: PredictionStats,
}

/// Contenu du magasin d'historique complet : un résultat et un horodatage
/// ISO-8601 par coup jamais enregistré, toujours de longueurs égales.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    pub results: Vec<Symbol>,
    pub timestamps: Vec<String>,
}

pub fn validate_history(state: &HistoryState) -> Result<()> {
    if state.results.len() != state.timestamps.len() {
        bail!(
            "Historique incohérent : {} résultats pour {} horodatages",
            state.results.len(),
            state.timestamps.len()
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionBasis {
    Pattern { matches: u32, confidence: f64 },
    Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub symbol: Symbol,
    pub basis: PredictionBasis,
}

#[derive(Debug, Clone)]
pub struct SymbolRate {
    pub symbol: Symbol,
    pub count: u32,
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct SymbolStreak {
    pub symbol: Symbol,
    pub max_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportStatLine {
    pub symbol: Symbol,
    pub win_rate: String,
    pub max_streak: String,
}

/// Instantané immuable écrit par un export : historique complet, horodatages,
/// statistiques formatées et compteurs de prédiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub results: Vec<Symbol>,
    pub timestamps: Vec<String>,
    pub statistics: Vec<ExportStatLine>,
    pub prediction_stats: PredictionStats,
}
