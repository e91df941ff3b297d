use super::app_config::{AppConfigService, ICON_PATH};

pub const TAB_BAR_ICONS: [&str; 3] = ["house-door-fill", "box-fill", "bus-front"];

/// The tab shell. Building it makes the tab-bar icons available.
pub struct TabsShell;

impl TabsShell {
    pub fn new(config: &AppConfigService) -> Self {
        config.add_icons(&TAB_BAR_ICONS, ICON_PATH);
        Self
    }
}
