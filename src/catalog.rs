use serde::{Deserialize, Serialize};

/// Maps logical sound ids to asset file names (without extension).
///
/// Ids are dense: `0..effect_count()` and so on.
pub trait AssetCatalog {
    fn effect_count(&self) -> usize;
    fn effect_file_name(&self, id: usize) -> &str;

    fn speech_count(&self) -> usize;
    fn speech_file_name(&self, id: usize) -> &str;

    fn theme_count(&self) -> usize;
    fn theme_file_name(&self, id: usize) -> &str;
}

/// Catalog backed by plain name lists, loadable from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCatalog {
    #[serde(default)]
    pub effects: Vec<String>,

    #[serde(default)]
    pub speech: Vec<String>,

    #[serde(default)]
    pub themes: Vec<String>,
}

impl AssetCatalog for NameCatalog {
    fn effect_count(&self) -> usize {
        self.effects.len()
    }

    fn effect_file_name(&self, id: usize) -> &str {
        &self.effects[id]
    }

    fn speech_count(&self) -> usize {
        self.speech.len()
    }

    fn speech_file_name(&self, id: usize) -> &str {
        &self.speech[id]
    }

    fn theme_count(&self) -> usize {
        self.themes.len()
    }

    fn theme_file_name(&self, id: usize) -> &str {
        &self.themes[id]
    }
}
