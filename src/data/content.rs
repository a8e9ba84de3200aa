//! Item and enemy templates
//!
//! Templates are plain data. Placing them on a map is left to the game;
//! the lookups here only answer which templates exist and which ones a
//! given depth may roll.

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

fn default_min_depth() -> u32 {
    1
}

/// An item that can be found in the dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    pub glyph: char,
    #[serde(default = "default_min_depth")]
    pub min_depth: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// An enemy that can spawn in the dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub glyph: char,
    pub hp: i32,
    #[serde(default = "default_min_depth")]
    pub min_depth: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Contents of the content data file
///
/// Both lists are required keys. A file that leaves one out is
/// rejected rather than read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentData {
    pub items: Vec<ItemTemplate>,
    pub enemies: Vec<EnemyTemplate>,
}

impl ContentData {
    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|t| t.id == id)
    }

    /// Enemies allowed at this depth
    pub fn enemies_for_depth(&self, depth: u32) -> Vec<&EnemyTemplate> {
        self.enemies.iter().filter(|t| t.min_depth <= depth).collect()
    }

    /// Items allowed at this depth
    pub fn items_for_depth(&self, depth: u32) -> Vec<&ItemTemplate> {
        self.items.iter().filter(|t| t.min_depth <= depth).collect()
    }

    /// Roll an enemy for a spawn point at this depth
    pub fn roll_enemy(&self, rng: &mut GameRng, depth: u32) -> Option<&EnemyTemplate> {
        rng.choice(&self.enemies_for_depth(depth)).copied()
    }
}

impl Default for ContentData {
    fn default() -> Self {
        Self {
            items: default_item_templates(),
            enemies: default_enemy_templates(),
        }
    }
}

fn item(id: &str, name: &str, glyph: char, min_depth: u32, description: &str) -> ItemTemplate {
    ItemTemplate {
        id: id.to_string(),
        name: name.to_string(),
        glyph,
        min_depth,
        description: Some(description.to_string()),
    }
}

fn enemy(id: &str, name: &str, glyph: char, hp: i32, min_depth: u32) -> EnemyTemplate {
    EnemyTemplate {
        id: id.to_string(),
        name: name.to_string(),
        glyph,
        hp,
        min_depth,
        description: None,
    }
}

pub fn default_item_templates() -> Vec<ItemTemplate> {
    vec![
        item("healing_draught", "Healing Draught", '!', 1, "Restores a handful of hit points."),
        item("iron_key", "Iron Key", '-', 1, "Opens a locked crypt door."),
        item("bone_charm", "Bone Charm", '"', 3, "Rattles when something undead is near."),
        item("grave_lantern", "Grave Lantern", '(', 5, "Lights the way further than a torch."),
    ]
}

pub fn default_enemy_templates() -> Vec<EnemyTemplate> {
    vec![
        enemy("rat", "Crypt Rat", 'r', 4, 1),
        enemy("skeleton", "Skeleton", 's', 10, 1),
        enemy("ghoul", "Ghoul", 'g', 16, 3),
        enemy("wraith", "Wraith", 'W', 24, 6),
    ]
}
