//! Editor settings, loaded from JSON with every field optional.

use serde::{Deserialize, Serialize};

use vis_network::manipulation::HookConfig;
use vis_network::options::{
    configurator, dashed_edges, manipulation_initially_active, middle_arrows, multiselect, NetworkOption,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Install the add/edit/delete hooks and the edit toolbar
    #[serde(default = "default_true")]
    pub manipulation: bool,
    #[serde(default = "default_true")]
    pub initially_active: bool,
    #[serde(default = "default_true")]
    pub multiselect: bool,
    #[serde(default = "default_true")]
    pub dashed_edges: bool,
    #[serde(default = "default_true")]
    pub middle_arrows: bool,
    /// vis-network's option editor panel
    #[serde(default)]
    pub configurator: bool,
    #[serde(default)]
    pub hooks: HookConfig,
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            manipulation: true,
            initially_active: true,
            multiselect: true,
            dashed_edges: true,
            middle_arrows: true,
            configurator: false,
            hooks: HookConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Display and interaction overrides. Hooks are added separately.
    pub fn options<H>(&self) -> Vec<NetworkOption<H>> {
        let mut options = vec![
            multiselect(self.multiselect),
            dashed_edges(self.dashed_edges),
            middle_arrows(self.middle_arrows),
            configurator(self.configurator),
        ];
        if self.manipulation {
            options.push(manipulation_initially_active(self.initially_active));
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vis_network::options::OptionsBuilder;

    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = EditorConfig::from_json(
            r#"{"configurator": true, "hooks": {"add_node_prompt": "Name?"}}"#,
        )
        .unwrap();

        assert!(config.configurator);
        assert!(config.multiselect);
        assert_eq!(config.hooks.add_node_prompt, "Name?");
        assert_eq!(config.hooks.delete_node_prompt, "Delete node?");
    }

    #[test]
    fn options_reflect_settings() {
        let config = EditorConfig {
            dashed_edges: false,
            ..EditorConfig::default()
        };

        let tree = config
            .options::<()>()
            .into_iter()
            .collect::<OptionsBuilder<_>>()
            .build()
            .unwrap();

        assert_eq!(
            tree.to_json(),
            json!({
                "interaction": { "multiselect": true },
                "edges": {
                    "dashes": false,
                    "arrows": { "middle": { "enabled": true, "type": "arrow" } }
                },
                "configure": { "enabled": false },
                "manipulation": { "initiallyActive": true }
            })
        );
    }

    #[test]
    fn no_manipulation_keys_when_disabled() {
        let config = EditorConfig {
            manipulation: false,
            ..EditorConfig::default()
        };

        let tree = OptionsBuilder::from_iter(config.options::<()>()).build().unwrap();

        assert!(tree.get("manipulation").is_none());
    }
}
