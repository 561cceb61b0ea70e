//! Static template catalog.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameCategory {
    Puzzle,
    EndlessRunner,
    MatchThree,
    Platformer,
    Shooter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssetKind {
    Sprite,
    Background,
    Audio,
    Animation,
}

/// Something a template needs before the game can be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequirement {
    pub kind: AssetKind,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: GameCategory,
    pub description: String,
    pub preview: String,
    pub mechanics: Vec<String>,
    pub required_assets: Vec<AssetRequirement>,
}

impl Template {
    pub fn requirement(&self, name: &str) -> Option<&AssetRequirement> {
        self.required_assets.iter().find(|r| r.name == name)
    }
}

fn req(kind: AssetKind, name: &str, description: &str) -> AssetRequirement {
    AssetRequirement {
        kind,
        name: name.into(),
        description: description.into(),
    }
}

fn template(
    id: &str,
    name: &str,
    category: GameCategory,
    description: &str,
    preview: &str,
    mechanics: [&str; 4],
    required_assets: Vec<AssetRequirement>,
) -> Template {
    Template {
        id: id.into(),
        name: name.into(),
        category,
        description: description.into(),
        preview: preview.into(),
        mechanics: mechanics.iter().map(|m| m.to_string()).collect(),
        required_assets,
    }
}

lazy_static! {
    static ref CATALOG: Vec<Template> = {
        use AssetKind::*;
        vec![
            template(
                "endless-runner",
                "Endless Runner",
                GameCategory::EndlessRunner,
                "Classic side-scrolling runner with obstacles and collectibles",
                "🏃",
                ["Running", "Jumping", "Collecting", "Avoiding obstacles"],
                vec![
                    req(Sprite, "Player Character", "Main character sprite"),
                    req(Sprite, "Obstacles", "Various obstacles to avoid"),
                    req(Sprite, "Collectibles", "Items to collect for points"),
                    req(Background, "Game Background", "Scrolling background scene"),
                    req(Audio, "Background Music", "Upbeat background music"),
                ],
            ),
            template(
                "match-three",
                "Match Three",
                GameCategory::MatchThree,
                "Match 3 or more similar items to clear them from the board",
                "💎",
                ["Matching", "Swapping", "Cascading", "Special effects"],
                vec![
                    req(Sprite, "Game Pieces", "Colorful matching pieces"),
                    req(Sprite, "Special Effects", "Explosion and match effects"),
                    req(Background, "Game Board", "Game board background"),
                    req(Audio, "Match Sounds", "Sound effects for matches"),
                ],
            ),
            template(
                "puzzle-platformer",
                "Puzzle Platformer",
                GameCategory::Platformer,
                "Navigate through levels solving puzzles and avoiding dangers",
                "🧩",
                ["Platforming", "Puzzle solving", "Key collection", "Switch activation"],
                vec![
                    req(Sprite, "Player Character", "Puzzle-solving character"),
                    req(Sprite, "Platforms", "Various platform types"),
                    req(Sprite, "Puzzle Elements", "Keys, switches, doors"),
                    req(Background, "Level Background", "Atmospheric level background"),
                    req(Audio, "Ambient Music", "Thoughtful puzzle music"),
                ],
            ),
            template(
                "space-shooter",
                "Space Shooter",
                GameCategory::Shooter,
                "Defend against waves of enemies in space combat",
                "🚀",
                ["Shooting", "Enemy waves", "Power-ups", "Boss battles"],
                vec![
                    req(Sprite, "Player Ship", "Player spaceship sprite"),
                    req(Sprite, "Enemy Ships", "Various enemy spacecraft"),
                    req(Sprite, "Projectiles", "Bullets and laser effects"),
                    req(Background, "Space Background", "Starfield background"),
                    req(Audio, "Battle Music", "Intense combat music"),
                ],
            ),
        ]
    };
}

/// The four built-in templates, in display order.
pub fn templates() -> &'static [Template] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_four_templates() {
        let names: Vec<&str> = templates().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["Endless Runner", "Match Three", "Puzzle Platformer", "Space Shooter"]
        );
    }

    #[test]
    fn endless_runner_requires_five_assets() {
        let t = find("endless-runner").unwrap();
        assert_eq!(t.required_assets.len(), 5);
        assert_eq!(t.requirement("Obstacles").unwrap().kind, AssetKind::Sprite);
        assert!(t.requirement("Boss").is_none());
    }

    // Generated assets are matched to requirements by name.
    #[test]
    fn requirement_names_are_unique_per_template() {
        for t in templates() {
            let unique: HashSet<&str> = t.required_assets.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(unique.len(), t.required_assets.len(), "{}", t.id);
        }
    }

    #[test]
    fn category_ids_are_snake_case() {
        assert_eq!(GameCategory::EndlessRunner.to_string(), "endless_runner");
        assert_eq!(
            serde_json::to_string(&GameCategory::MatchThree).unwrap(),
            "\"match_three\""
        );
    }
}
