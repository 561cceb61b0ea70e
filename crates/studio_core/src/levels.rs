use serde::{Deserialize, Serialize};

use crate::error::Rejection;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    /// 1..=5
    pub difficulty: u8,
    pub layout: String,
    /// Names of generated assets placed in the level.
    pub assets: Vec<String>,
}

/// The project's level list together with the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBoard {
    levels: Vec<Level>,
    selected: Option<String>,
    next_id: u64,
}

impl Default for LevelBoard {
    fn default() -> Self {
        Self {
            levels: vec![Level {
                id: "1".into(),
                name: "Level 1 - Tutorial".into(),
                difficulty: 1,
                layout: "Simple introduction level".into(),
                assets: Vec::new(),
            }],
            selected: Some("1".into()),
            next_id: 2,
        }
    }
}

impl LevelBoard {
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn selected(&self) -> Option<&Level> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.levels.iter().position(|l| l.id == id)
    }

    /// Appends a fresh level, selects it and returns its id.
    pub fn add(&mut self) -> String {
        let n = self.levels.len() + 1;
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.levels.push(Level {
            id: id.clone(),
            name: format!("Level {n}"),
            difficulty: n.min(usize::from(MAX_DIFFICULTY)) as u8,
            layout: "New level layout".into(),
            assets: Vec::new(),
        });
        self.selected = Some(id.clone());
        id
    }

    pub fn select(&mut self, id: &str) -> Result<(), Rejection> {
        if self.get(id).is_none() {
            return Err(Rejection::UnknownLevel(id.into()));
        }
        self.selected = Some(id.into());
        Ok(())
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Level, Rejection> {
        self.levels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Rejection::UnknownLevel(id.into()))
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<(), Rejection> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Difficulty is clamped into 1..=5.
    pub fn set_difficulty(&mut self, id: &str, difficulty: u8) -> Result<(), Rejection> {
        self.get_mut(id)?.difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        Ok(())
    }

    pub fn set_layout(&mut self, id: &str, layout: impl Into<String>) -> Result<(), Rejection> {
        self.get_mut(id)?.layout = layout.into();
        Ok(())
    }

    /// Adds or removes an asset reference on a level.
    pub fn toggle_asset(&mut self, id: &str, asset: &str) -> Result<(), Rejection> {
        let level = self.get_mut(id)?;
        match level.assets.iter().position(|a| a == asset) {
            Some(pos) => {
                level.assets.remove(pos);
            }
            None => level.assets.push(asset.into()),
        }
        Ok(())
    }

    /// Removes a level. At least one level always remains; deleting the
    /// selected level moves the selection to the first remaining one.
    pub fn delete(&mut self, id: &str) -> Result<(), Rejection> {
        let pos = self
            .levels
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| Rejection::UnknownLevel(id.into()))?;
        if self.levels.len() <= 1 {
            return Err(Rejection::LastLevel);
        }
        self.levels.remove(pos);
        if self.selected.as_deref() == Some(id) {
            self.selected = self.levels.first().map(|l| l.id.clone());
        }
        Ok(())
    }
}
