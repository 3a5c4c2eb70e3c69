use crate::model::Ledger;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persistance du carnet (lieux connus + shifts).
///
/// Le carnet est relu en entier à chaque commande puis réécrit en entier :
/// pas de mise à jour partielle.
pub trait Storage {
    /// Relit lieux et shifts ; les taux horaires absents ou invalides
    /// retombent sur [`crate::DEFAULT_HOURLY_RATE`].
    fn load(&self) -> anyhow::Result<Ledger>;
    /// Remplace le carnet stocké ; un lecteur concurrent voit l'ancien ou
    /// le nouveau, jamais un fichier tronqué.
    fn save(&self, ledger: &Ledger) -> anyhow::Result<()>;
}

/// Carnet stocké dans un seul fichier JSON (`shifts.json` par défaut côté CLI).
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Comme `load`, mais un fichier absent donne un carnet vide.
    pub fn load_or_default(&self) -> anyhow::Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Ledger> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let ledger: Ledger = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            path = %self.path.display(),
            shifts = ledger.shifts.len(),
            workplaces = ledger.workplaces.len(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(ledger)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), shifts = ledger.shifts.len(), "ledger saved");
        Ok(())
    }
}
