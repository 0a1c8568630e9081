use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::models::{validate_history, ExportDocument, HistoryState, SessionState};

pub fn data_dir() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path
}

pub fn session_path() -> PathBuf {
    data_dir().join("session.json")
}

pub fn history_path() -> PathBuf {
    data_dir().join("historique.json")
}

/// `Ok(None)` si le fichier n'existe pas encore (premier lancement) ;
/// `Err` si le fichier est illisible ou invalide.
pub fn load_session(path: &Path) -> Result<Option<SessionState>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let state: SessionState = serde_json::from_str(&json)
        .with_context(|| format!("Contenu invalide dans {:?}", path))?;
    Ok(Some(state))
}

pub fn save_session(path: &Path, state: &SessionState) -> Result<()> {
    write_json(path, &serde_json::to_string_pretty(state)?)
}

pub fn load_history(path: &Path) -> Result<Option<HistoryState>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let state: HistoryState = serde_json::from_str(&json)
        .with_context(|| format!("Contenu invalide dans {:?}", path))?;
    validate_history(&state).with_context(|| format!("Contenu invalide dans {:?}", path))?;
    Ok(Some(state))
}

pub fn save_history(path: &Path, state: &HistoryState) -> Result<()> {
    write_json(path, &serde_json::to_string_pretty(state)?)
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

pub fn export_filename(stamp: NaiveDateTime) -> String {
    format!("export_baccara_{}.json", stamp.format("%Y%m%d_%H%M%S"))
}

/// Écrit l'instantané sous un nom horodaté unique ; en cas de collision
/// (deux exports dans la même seconde) un suffixe numérique est ajouté,
/// un export n'écrase jamais le précédent.
pub fn write_export(dir: &Path, document: &ExportDocument) -> Result<PathBuf> {
    let stamp = chrono::Local::now().naive_local();
    let mut path = dir.join(export_filename(stamp));
    let mut n = 2;
    while path.exists() {
        path = dir.join(format!(
            "export_baccara_{}_{}.json",
            stamp.format("%Y%m%d_%H%M%S"),
            n
        ));
        n += 1;
    }
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(&path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PredictionStats, Symbol};

    fn test_session() -> SessionState {
        SessionState {
            results: vec![Symbol::Player, Symbol::Banker, Symbol::Tie],
            patterns: vec![[Symbol::Player, Symbol::Banker, Symbol::Tie]],
            prediction_stats: PredictionStats {
                correct: 2,
                incorrect: 1,
                total: 3,
            },
        }
    }

    fn test_history() -> HistoryState {
        HistoryState {
            results: vec![Symbol::Player, Symbol::Banker],
            timestamps: vec![
                "2026-01-01T10:00:00".to_string(),
                "2026-01-01T10:00:05".to_string(),
            ],
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_session(&dir.path().join("session.json"))
            .unwrap()
            .is_none());
        assert!(load_history(&dir.path().join("historique.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("session.json");
        let state = test_session();
        save_session(&path, &state).unwrap();
        let loaded = load_session(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_history_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("historique.json");
        let state = test_history();
        save_history(&path, &state).unwrap();
        let loaded = load_history(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_corrupt_is_err() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "pas du json").unwrap();
        assert!(load_session(&path).is_err());
    }

    #[test]
    fn test_load_history_length_mismatch_is_err() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historique.json");
        std::fs::write(&path, r#"{"results": ["P", "B"], "timestamps": []}"#).unwrap();
        assert!(load_history(&path).is_err());
    }

    #[test]
    fn test_export_filename_format() {
        let stamp = NaiveDateTime::parse_from_str("2026-02-17T14:30:05", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        assert_eq!(export_filename(stamp), "export_baccara_20260217_143005.json");
    }

    #[test]
    fn test_export_roundtrip_and_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let document = ExportDocument {
            results: test_history().results,
            timestamps: test_history().timestamps,
            statistics: vec![],
            prediction_stats: PredictionStats {
                correct: 1,
                incorrect: 1,
                total: 2,
            },
        };

        let first = write_export(dir.path(), &document).unwrap();
        let second = write_export(dir.path(), &document).unwrap();
        assert_ne!(first, second);

        let json = std::fs::read_to_string(&first).unwrap();
        let loaded: ExportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, document);
    }
}
