//! Two-state panel model and the style derived from it.

use crate::core::config::PanelConfig;
use crate::core::types::{lerp, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn select<T>(self, collapsed: T, expanded: T) -> T {
        match self {
            PanelState::Collapsed => collapsed,
            PanelState::Expanded => expanded,
        }
    }

    pub fn next(self) -> PanelState {
        self.select(PanelState::Expanded, PanelState::Collapsed)
    }

    pub fn toggle(&mut self) {
        *self = self.next();
    }

    /// Style for this state inside a container of the given height.
    pub fn style(self, config: &PanelConfig, container_height: f64) -> StyleAttributes {
        StyleAttributes {
            corner_radius: self.select(config.collapsed_radius, config.expanded_radius),
            fill_color: Color::from_hex(
                self.select(config.collapsed_color, config.expanded_color),
                1.0,
            ),
            height: self.select(
                config.collapsed_height,
                container_height - config.expanded_inset,
            ),
        }
    }
}

/// Visual attributes the panel takes on in a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleAttributes {
    pub corner_radius: f64,
    pub fill_color: Color,
    pub height: f64,
}

impl StyleAttributes {
    pub fn lerp(&self, to: &StyleAttributes, t: f64) -> StyleAttributes {
        StyleAttributes {
            corner_radius: lerp(self.corner_radius, to.corner_radius, t),
            fill_color: self.fill_color.lerp(to.fill_color, t),
            height: lerp(self.height, to.height, t),
        }
    }
}
