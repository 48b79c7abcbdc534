//! Background palette and random selection.

use rand::Rng;

/// Gradients the page ships with.
pub const DEFAULT_GRADIENTS: &[&str] = &[
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
    "linear-gradient(135deg, #ffeaa7 0%, #fab1a0 100%)",
    "linear-gradient(135deg, #74b9ff 0%, #0984e3 100%)",
    "linear-gradient(135deg, #fd79a8 0%, #fdcb6e 100%)",
];

/// Fixed, ordered set of background values. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_GRADIENTS.iter().map(|g| g.to_string()).collect())
    }
}

impl Palette {
    /// Callers must pass at least one entry; `PageConfig::validate` enforces
    /// this for configured palettes.
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Uniform draw with replacement. Returns the index and the value, or
    /// `None` for an empty palette.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, &str)> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        Some((index, self.entries[index].as_str()))
    }
}
