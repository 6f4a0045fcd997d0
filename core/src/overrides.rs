use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::*;

/// Key the override blob is persisted under.
pub const STORAGE_KEY: &str = "geomerge:overrides:v1";

/// Opaque key-value blob storage the override layer persists into.
///
/// The frontend backs this with whatever the platform offers (browser local
/// storage, a file, ...); [`MemoryStore`] covers tests and headless use.
pub trait BlobStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`BlobStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Sparse layer of player-caused deviations from generated content.
///
/// An entry means "generation is no longer authoritative for this cell"; an
/// explicit [`CellState::Empty`] entry records a removed token, which is not
/// the same as having no entry at all. The whole map is flushed to the
/// backend on every mutation, before the mutating call returns.
#[derive(Debug)]
pub struct OverrideStore<S: BlobStore> {
    entries: HashMap<CellId, CellState>,
    backend: S,
}

impl<S: BlobStore> OverrideStore<S> {
    /// Loads the persisted blob, treating an absent blob as an empty store.
    ///
    /// A blob that exists but does not parse is a fatal startup error; player
    /// progress is never silently discarded.
    pub fn load(backend: S) -> Result<Self> {
        let entries = match backend.load(STORAGE_KEY)? {
            None => HashMap::new(),
            Some(blob) => decode(&blob)?,
        };
        if !entries.is_empty() {
            log::debug!("loaded {} override entries", entries.len());
        }
        Ok(Self { entries, backend })
    }

    pub fn get(&self, cell: CellId) -> Option<CellState> {
        self.entries.get(&cell).copied()
    }

    /// Inserts or replaces the entry for `cell` and flushes the whole store.
    ///
    /// When the backend save fails the entry is rolled back, so reads never
    /// observe state the blob does not hold.
    pub fn set(&mut self, cell: CellId, state: CellState) -> Result<()> {
        let previous = self.entries.insert(cell, state);
        match self.backend.save(STORAGE_KEY, &encode(&self.entries)) {
            Ok(()) => Ok(()),
            Err(err) => {
                match previous {
                    Some(old) => self.entries.insert(cell, old),
                    None => self.entries.remove(&cell),
                };
                Err(err)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, CellState)> {
        self.entries.iter().map(|(&cell, &state)| (cell, state))
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}

fn encode(entries: &HashMap<CellId, CellState>) -> String {
    // BTreeMap gives the blob a stable key order.
    let keyed: BTreeMap<String, Option<Token>> = entries
        .iter()
        .map(|(&cell, &state)| (cell.storage_key(), state.token()))
        .collect();
    serde_json::to_string(&keyed).expect("string-keyed map always serializes")
}

fn decode(blob: &str) -> Result<HashMap<CellId, CellState>> {
    let keyed: BTreeMap<String, Option<Token>> = serde_json::from_str(blob)
        .map_err(|err| GameError::CorruptOverrides(err.to_string()))?;
    keyed
        .into_iter()
        .map(|(key, token)| Ok((CellId::parse_key(&key)?, CellState::from(token))))
        .collect()
}
