//! Placeholder asset "generation" and requirement bookkeeping.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{AssetKind, AssetRequirement, Template};

pub const DEFAULT_PLACEHOLDER_BASE: &str = "https://via.placeholder.com/150x150/667eea/ffffff";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub kind: AssetKind,
    /// Name of the requirement this asset fulfils.
    pub name: String,
    pub url: String,
    pub description: String,
}

/// `{base}?text={name}` with the name percent-encoded.
pub fn placeholder_url(base: &str, name: &str) -> String {
    format!("{base}?text={}", urlencoding::encode(name))
}

/// Produces the stand-in asset for a requirement. The delay that makes this
/// look like real work is applied by the caller.
pub fn placeholder_for(requirement: &AssetRequirement, description: &str, base: &str) -> Asset {
    Asset {
        id: Uuid::new_v4().to_string(),
        kind: requirement.kind,
        name: requirement.name.clone(),
        url: placeholder_url(base, &requirement.name),
        description: description.to_string(),
    }
}

/// Replaces the asset with the same name, or appends it.
pub fn upsert(assets: &mut Vec<Asset>, asset: Asset) {
    match assets.iter_mut().find(|a| a.name == asset.name) {
        Some(existing) => *existing = asset,
        None => assets.push(asset),
    }
}

pub fn find<'a>(assets: &'a [Asset], requirement: &str) -> Option<&'a Asset> {
    assets.iter().find(|a| a.name == requirement)
}

/// Requirement names of `template` without a generated asset, in template order.
pub fn missing<'a>(template: &'a Template, assets: &[Asset]) -> Vec<&'a str> {
    template
        .required_assets
        .iter()
        .filter(|r| find(assets, &r.name).is_none())
        .map(|r| r.name.as_str())
        .collect()
}

pub fn all_generated(template: &Template, assets: &[Asset]) -> bool {
    missing(template, assets).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn runner() -> &'static Template {
        catalog::find("endless-runner").unwrap()
    }

    #[test]
    fn url_encodes_name() {
        assert_eq!(
            placeholder_url(DEFAULT_PLACEHOLDER_BASE, "Player Character"),
            "https://via.placeholder.com/150x150/667eea/ffffff?text=Player%20Character"
        );
    }

    #[test]
    fn placeholder_copies_requirement() {
        let req = &runner().required_assets[3];
        let asset = placeholder_for(req, "  misty hills ", DEFAULT_PLACEHOLDER_BASE);
        assert_eq!(asset.kind, AssetKind::Background);
        assert_eq!(asset.name, "Game Background");
        // kept exactly as typed
        assert_eq!(asset.description, "  misty hills ");
    }

    #[test]
    fn upsert_replaces_same_name() {
        let req = &runner().required_assets[0];
        let mut assets = Vec::new();
        upsert(&mut assets, placeholder_for(req, "a knight", DEFAULT_PLACEHOLDER_BASE));
        upsert(&mut assets, placeholder_for(req, "a wizard", DEFAULT_PLACEHOLDER_BASE));
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].description, "a wizard");
    }

    #[test]
    fn missing_tracks_template_order() {
        let t = runner();
        let mut assets = Vec::new();
        upsert(&mut assets, placeholder_for(&t.required_assets[1], "rocks", DEFAULT_PLACEHOLDER_BASE));
        assert_eq!(
            missing(t, &assets),
            ["Player Character", "Collectibles", "Game Background", "Background Music"]
        );
        assert!(!all_generated(t, &assets));
    }
}
