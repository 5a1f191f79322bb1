//! Process-wide, read-only index registry.
//!
//! The registry maps index names to shared, immutable index definitions. It
//! is populated once, either explicitly through [`IndexRegistry::install`] or
//! lazily with the [`standard`](IndexRegistry::standard) set on first use of
//! [`IndexRegistry::global`], and never mutated afterwards. Lookups need no
//! locking once initialisation is complete.
//!
//! Components that resolve index names can also take an explicit
//! `&IndexRegistry` built with [`IndexRegistry::builder`].

use crate::ibor::{euribor, usd_libor};
use crate::ibor_index::IborIndex;
use crate::index::Index;
use crate::overnight::{eonia, estr, fed_fund, sofr};
use crate::overnight_index::OvernightIndex;
use ir_core::errors::{Error, Result};
use ir_time::Period;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// A registered index: either a term (Ibor) or an overnight index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RateIndex {
    /// Term interbank index.
    Ibor(Arc<IborIndex>),
    /// Overnight index.
    Overnight(Arc<OvernightIndex>),
}

impl RateIndex {
    /// Name of the wrapped index.
    pub fn name(&self) -> &str {
        match self {
            RateIndex::Ibor(index) => index.name(),
            RateIndex::Overnight(index) => index.name(),
        }
    }
}

/// Name-keyed collection of rate indexes.
#[derive(Debug, Clone, Default)]
pub struct IndexRegistry {
    indexes: BTreeMap<String, RateIndex>,
}

static GLOBAL: OnceLock<IndexRegistry> = OnceLock::new();

impl IndexRegistry {
    /// Start building an explicit registry.
    pub fn builder() -> IndexRegistryBuilder {
        IndexRegistryBuilder::default()
    }

    /// The standard index set: USD LIBOR 1M/3M/6M, EURIBOR 3M/6M, Fed Funds,
    /// EONIA, SOFR and ESTR.
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        for months in [1, 3, 6] {
            builder = builder.with_ibor(usd_libor(Period::months(months)));
        }
        for months in [3, 6] {
            builder = builder.with_ibor(euribor(Period::months(months)));
        }
        builder
            .with_overnight(fed_fund())
            .with_overnight(eonia())
            .with_overnight(sofr())
            .with_overnight(estr())
            .into_registry()
    }

    /// Install `registry` as the process-wide registry.
    ///
    /// Fails if a registry has already been installed, or if
    /// [`global`](Self::global) has already fallen back to the standard set.
    pub fn install(registry: IndexRegistry) -> Result<()> {
        let count = registry.len();
        GLOBAL
            .set(registry)
            .map_err(|_| Error::Runtime("index registry already initialised".into()))?;
        tracing::info!(indexes = count, "index registry installed");
        Ok(())
    }

    /// The process-wide registry; the standard set when none was installed.
    pub fn global() -> &'static IndexRegistry {
        GLOBAL.get_or_init(|| {
            let registry = Self::standard();
            tracing::info!(indexes = registry.len(), "standard index registry initialised");
            registry
        })
    }

    /// Look up an index by name.
    pub fn lookup(&self, name: &str) -> Option<RateIndex> {
        self.indexes.get(name).cloned()
    }

    /// Look up an Ibor index by name.
    pub fn ibor(&self, name: &str) -> Result<Arc<IborIndex>> {
        match self.indexes.get(name) {
            Some(RateIndex::Ibor(index)) => Ok(Arc::clone(index)),
            Some(RateIndex::Overnight(_)) => Err(Error::InvalidArgument(format!(
                "index '{name}' is an overnight index, not an Ibor index"
            ))),
            None => Err(Error::InvalidArgument(format!("unknown index '{name}'"))),
        }
    }

    /// Look up an overnight index by name.
    pub fn overnight(&self, name: &str) -> Result<Arc<OvernightIndex>> {
        match self.indexes.get(name) {
            Some(RateIndex::Overnight(index)) => Ok(Arc::clone(index)),
            Some(RateIndex::Ibor(_)) => Err(Error::InvalidArgument(format!(
                "index '{name}' is an Ibor index, not an overnight index"
            ))),
            None => Err(Error::InvalidArgument(format!("unknown index '{name}'"))),
        }
    }

    /// Registered names, in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    /// Number of registered indexes.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Builder for [`IndexRegistry`]. Registering a name twice is an error
/// reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct IndexRegistryBuilder {
    indexes: BTreeMap<String, RateIndex>,
    duplicates: Vec<String>,
}

impl IndexRegistryBuilder {
    /// Register an Ibor index under its name.
    pub fn with_ibor(self, index: IborIndex) -> Self {
        self.with(RateIndex::Ibor(Arc::new(index)))
    }

    /// Register an overnight index under its name.
    pub fn with_overnight(self, index: OvernightIndex) -> Self {
        self.with(RateIndex::Overnight(Arc::new(index)))
    }

    fn with(mut self, index: RateIndex) -> Self {
        let name = index.name().to_string();
        if self.indexes.insert(name.clone(), index).is_some() {
            self.duplicates.push(name);
        }
        self
    }

    /// Finish the registry.
    pub fn build(self) -> Result<IndexRegistry> {
        if !self.duplicates.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "indexes registered more than once: {}",
                self.duplicates.join(", ")
            )));
        }
        Ok(self.into_registry())
    }

    fn into_registry(self) -> IndexRegistry {
        IndexRegistry {
            indexes: self.indexes,
        }
    }
}
