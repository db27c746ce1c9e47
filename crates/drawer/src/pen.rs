//! Pen settings and the commands that change them.
//!
//! Commands may be submitted at any time; the drawer latches the whole
//! [`PenSettings`] at the start of its next tick, so a tick never sees a
//! half-applied change.

use painting::Rgba;
use sharedraw_config::PenDefaults;

/// Externally controlled drawing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenSettings {
    /// Whether the drawer casts rays at all
    pub ray_cast_enabled: bool,
    pub color: Rgba,
    /// Pen width in canvas pixels
    pub width: i32,
    /// Erase instead of drawing
    pub erase: bool,
}

impl Default for PenSettings {
    fn default() -> Self {
        PenDefaults::default().into()
    }
}

impl From<PenDefaults> for PenSettings {
    fn from(defaults: PenDefaults) -> Self {
        Self {
            ray_cast_enabled: defaults.ray_cast_enabled,
            color: Rgba::from_array(defaults.color),
            width: defaults.width,
            erase: defaults.erase,
        }
    }
}

/// Commands for controlling a drawer's pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    SetRayCastEnabled(bool),
    SetColor(Rgba),
    SetWidth(i32),
    SetErase(bool),
    /// Replace every setting at once
    Replace(PenSettings),
}

impl PenSettings {
    pub fn apply(&mut self, command: PenCommand) {
        match command {
            PenCommand::SetRayCastEnabled(enabled) => self.ray_cast_enabled = enabled,
            PenCommand::SetColor(color) => self.color = color,
            PenCommand::SetWidth(width) => self.width = width,
            PenCommand::SetErase(erase) => self.erase = erase,
            PenCommand::Replace(settings) => *self = settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config() {
        let pen = PenSettings::default();
        assert!(pen.ray_cast_enabled);
        assert_eq!(pen.color, Rgba::CYAN);
        assert_eq!(pen.width, 3);
        assert!(!pen.erase);
    }

    #[test]
    fn test_apply_commands() {
        let mut pen = PenSettings::default();
        pen.apply(PenCommand::SetColor(Rgba::BLACK));
        pen.apply(PenCommand::SetWidth(9));
        pen.apply(PenCommand::SetErase(true));
        pen.apply(PenCommand::SetRayCastEnabled(false));

        assert_eq!(
            pen,
            PenSettings {
                ray_cast_enabled: false,
                color: Rgba::BLACK,
                width: 9,
                erase: true,
            }
        );

        pen.apply(PenCommand::Replace(PenSettings::default()));
        assert_eq!(pen, PenSettings::default());
    }
}
