//! Sector catalog: the fixed mapping from consumer sectors to search keywords
//!
//! The catalog is configuration data, injected through [`crate::config::Config`]
//! so deployments (and tests) can substitute their own without touching the
//! computation logic. Sector order and keyword order are both significant:
//! the pipeline fetches sectors in catalog order and the report lists rows in
//! sector-then-keyword order.

use serde::{Deserialize, Serialize};

/// Ordered mapping from sector name to its search keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorCatalog {
    sectors: Vec<SectorEntry>,
}

/// One sector and its ordered keyword list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorEntry {
    /// Sector display name
    pub name: String,

    /// Keywords queried for this sector, in report order
    pub keywords: Vec<String>,
}

impl SectorCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            sectors: Vec::new(),
        }
    }

    /// Add a sector with its keywords
    pub fn add_sector(
        &mut self,
        name: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.sectors.push(SectorEntry {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        });
    }

    /// Iterate sectors in catalog order
    pub fn sectors(&self) -> impl Iterator<Item = &SectorEntry> {
        self.sectors.iter()
    }

    /// Number of sectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    /// Whether the catalog has no sectors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

impl Default for SectorCatalog {
    /// The production catalog: five French consumer sectors, five keywords
    /// each, matching the deployed monitoring configuration.
    fn default() -> Self {
        let mut catalog = Self::new();
        catalog.add_sector(
            "Beauté",
            ["coiffeur", "soin visage", "épilation", "vernis", "institut beauté"],
        );
        catalog.add_sector(
            "Restauration",
            ["restaurant", "livraison repas", "UberEats", "menu midi", "réservation resto"],
        );
        catalog.add_sector(
            "Voyage & mobilité",
            ["billets d'avion", "location voiture", "Airbnb", "réservation hôtel", "train"],
        );
        catalog.add_sector(
            "Retail / Luxe",
            ["acheter chaussures", "sac à main", "montre luxe", "boutique mode", "soldes"],
        );
        catalog.add_sector(
            "Technologie & abonnements",
            ["abonnement Netflix", "désabonnement", "Spotify", "Disney+", "Prime Video"],
        );
        catalog
    }
}
