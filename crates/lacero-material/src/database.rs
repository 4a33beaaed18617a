//! Material database with built-in paper stocks.

use std::collections::BTreeMap;

use lacero_types::{LaceroError, LaceroResult};

use crate::properties::PaperProperties;

/// Named paper presets, iterated in name order.
#[derive(Debug, Clone)]
pub struct PaperDatabase {
    materials: BTreeMap<String, PaperProperties>,
}

impl PaperDatabase {
    /// Creates a database with the four built-in stocks.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();
        db.register(calendar_stock());
        db.register(newsprint());
        db.register(tissue());
        db.register(cardstock());
        db
    }

    pub fn empty() -> Self {
        Self {
            materials: BTreeMap::new(),
        }
    }

    /// Registers a material. Overwrites if the name already exists.
    pub fn register(&mut self, props: PaperProperties) {
        self.materials.insert(props.name.clone(), props);
    }

    pub fn get(&self, name: &str) -> Option<&PaperProperties> {
        self.materials.get(name)
    }

    /// Like [`get`](Self::get), but reports the available names on a miss.
    pub fn lookup(&self, name: &str) -> LaceroResult<&PaperProperties> {
        self.get(name).ok_or_else(|| LaceroError::UnknownMaterial {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.materials.keys().map(|s| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaperProperties> {
        self.materials.values()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for PaperDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Paper Stocks ────────────────────────────────────────────

/// Calendar stock (90gsm). The simulator defaults.
fn calendar_stock() -> PaperProperties {
    PaperProperties {
        name: "calendar_stock".into(),
        grammage: 90.0,
        density: 5.0,
        stiffness: 40.0,
        bending_stiffness: 0.02,
        damping: 0.05,
        fracture_threshold: 0.01,
        tear_resistance: 0.5,
        fiber_direction: [1.0, 0.0],
        fiber_anisotropy: 0.3,
    }
}

/// Newsprint (45gsm). Weak and strongly grained: tears run straight
/// across the page.
fn newsprint() -> PaperProperties {
    PaperProperties {
        name: "newsprint".into(),
        grammage: 45.0,
        density: 2.5,
        stiffness: 25.0,
        bending_stiffness: 0.01,
        damping: 0.04,
        fracture_threshold: 0.006,
        tear_resistance: 0.8,
        fiber_direction: [1.0, 0.0],
        fiber_anisotropy: 0.6,
    }
}

/// Tissue (20gsm). Nearly isotropic, tears wherever it is pulled.
fn tissue() -> PaperProperties {
    PaperProperties {
        name: "tissue".into(),
        grammage: 20.0,
        density: 1.2,
        stiffness: 12.0,
        bending_stiffness: 0.004,
        damping: 0.08,
        fracture_threshold: 0.003,
        tear_resistance: 0.2,
        fiber_direction: [0.0, 1.0],
        fiber_anisotropy: 0.1,
    }
}

/// Cardstock (250gsm). Heavy and stiff, needs a firm pull.
fn cardstock() -> PaperProperties {
    PaperProperties {
        name: "cardstock".into(),
        grammage: 250.0,
        density: 12.0,
        stiffness: 90.0,
        bending_stiffness: 0.08,
        damping: 0.06,
        fracture_threshold: 0.04,
        tear_resistance: 0.9,
        fiber_direction: [1.0, 0.0],
        fiber_anisotropy: 0.4,
    }
}
