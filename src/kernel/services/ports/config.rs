use serde::{Deserialize, Serialize};

/// Tab strip geometry, in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStripMetrics {
    pub min_tab_width: u16,
    pub max_tab_width: u16,
    pub close_button_width: u16,
    /// Gap between the close affordance and the tab's trailing edge.
    pub close_button_margin: u16,
    pub height: u16,
}

impl Default for TabStripMetrics {
    fn default() -> Self {
        Self {
            min_tab_width: 12,
            max_tab_width: 24,
            close_button_width: 1,
            close_button_margin: 1,
            height: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub app_title: String,
    pub untitled_name: String,
    pub tab_strip: TabStripMetrics,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            app_title: "panemux".to_string(),
            untitled_name: "Untitled".to_string(),
            tab_strip: TabStripMetrics::default(),
        }
    }
}
