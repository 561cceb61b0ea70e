use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Tunable gameplay parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanics {
    /// px/s
    pub player_speed: u32,
    /// px
    pub jump_height: u32,
    /// px/s²
    pub gravity: u32,
    pub collectibles: bool,
    pub enemies: bool,
    pub power_ups: bool,
}

impl Default for Mechanics {
    fn default() -> Self {
        Self {
            player_speed: 200,
            jump_height: 300,
            gravity: 800,
            collectibles: true,
            enemies: true,
            power_ups: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Slider {
    #[strum(to_string = "Player Speed")]
    PlayerSpeed,
    #[strum(to_string = "Jump Height")]
    JumpHeight,
    #[strum(to_string = "Gravity")]
    Gravity,
}

impl Slider {
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Slider::PlayerSpeed => 100..=500,
            Slider::JumpHeight => 200..=500,
            Slider::Gravity => 400..=1200,
        }
    }

    /// Increment used by the editor's left/right keys.
    pub fn step(self) -> u32 {
        match self {
            Slider::Gravity => 20,
            _ => 10,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Slider::PlayerSpeed => "px/s",
            Slider::JumpHeight => "px",
            Slider::Gravity => "px/s²",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Feature {
    #[strum(to_string = "Include Collectibles")]
    Collectibles,
    #[strum(to_string = "Include Enemies")]
    Enemies,
    #[strum(to_string = "Include Power-ups")]
    PowerUps,
}

impl Feature {
    pub fn hint(self) -> &'static str {
        match self {
            Feature::Collectibles => "Add items for players to collect for points",
            Feature::Enemies => "Add obstacles and enemies to avoid",
            Feature::PowerUps => "Add special abilities and temporary boosts",
        }
    }
}

impl Mechanics {
    pub fn get(&self, slider: Slider) -> u32 {
        match slider {
            Slider::PlayerSpeed => self.player_speed,
            Slider::JumpHeight => self.jump_height,
            Slider::Gravity => self.gravity,
        }
    }

    /// Sets a slider, clamped into its range.
    pub fn set(&mut self, slider: Slider, value: u32) {
        let range = slider.range();
        let value = value.clamp(*range.start(), *range.end());
        match slider {
            Slider::PlayerSpeed => self.player_speed = value,
            Slider::JumpHeight => self.jump_height = value,
            Slider::Gravity => self.gravity = value,
        }
    }

    /// Moves a slider by whole steps (negative moves down), clamped.
    pub fn nudge(&mut self, slider: Slider, steps: i32) {
        let range = slider.range();
        let delta = i64::from(slider.step()) * i64::from(steps);
        let next = (i64::from(self.get(slider)) + delta)
            .clamp(i64::from(*range.start()), i64::from(*range.end()));
        self.set(slider, next as u32);
    }

    pub fn enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Collectibles => self.collectibles,
            Feature::Enemies => self.enemies,
            Feature::PowerUps => self.power_ups,
        }
    }

    pub fn set_enabled(&mut self, feature: Feature, on: bool) {
        match feature {
            Feature::Collectibles => self.collectibles = on,
            Feature::Enemies => self.enemies = on,
            Feature::PowerUps => self.power_ups = on,
        }
    }

    /// Comma separated list of enabled features, or `"None"`.
    pub fn feature_summary(&self) -> String {
        let on: Vec<&str> = [
            (self.collectibles, "Collectibles"),
            (self.enemies, "Enemies"),
            (self.power_ups, "Power-ups"),
        ]
        .into_iter()
        .filter_map(|(enabled, label)| enabled.then_some(label))
        .collect();
        if on.is_empty() {
            "None".into()
        } else {
            on.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliders_clamp_to_range() {
        let mut m = Mechanics::default();
        m.set(Slider::PlayerSpeed, 9000);
        assert_eq!(m.player_speed, 500);
        m.set(Slider::Gravity, 0);
        assert_eq!(m.gravity, 400);
    }

    #[test]
    fn nudge_moves_by_step() {
        let mut m = Mechanics::default();
        m.nudge(Slider::Gravity, 2);
        assert_eq!(m.gravity, 840);
        m.nudge(Slider::JumpHeight, -100);
        assert_eq!(m.jump_height, 200);
    }

    #[test]
    fn huge_nudges_saturate_at_bounds() {
        let mut m = Mechanics::default();
        m.nudge(Slider::PlayerSpeed, i32::MAX);
        assert_eq!(m.player_speed, 500);
        m.nudge(Slider::Gravity, i32::MIN);
        assert_eq!(m.gravity, 400);
    }

    #[test]
    fn feature_summary_lists_enabled() {
        let mut m = Mechanics::default();
        assert_eq!(m.feature_summary(), "Collectibles, Enemies");
        m.set_enabled(Feature::Collectibles, false);
        m.set_enabled(Feature::Enemies, false);
        assert_eq!(m.feature_summary(), "None");
    }
}
