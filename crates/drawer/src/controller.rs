//! Color picker feed.
//!
//! A [`DrawerController`] polls a [`ColorSource`] once per frame and pushes
//! the result into a drawer as a pen command. It runs on the authority only;
//! observers receive the color through snapshots.

use painting::Rgba;
use tracing::trace;

use crate::drawer::RayCastDrawer;
use crate::pen::PenCommand;

/// Anything that can report a current color, e.g. a UI color picker
pub trait ColorSource {
    fn color(&self) -> Rgba;
}

impl ColorSource for Rgba {
    fn color(&self) -> Rgba {
        *self
    }
}

/// Drives a drawer's pen color from a [`ColorSource`]
#[derive(Debug)]
pub struct DrawerController<S> {
    source: S,
}

impl<S: ColorSource> DrawerController<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Copy the source's color into the drawer's pen
    pub fn update(&self, drawer: &mut RayCastDrawer) {
        let color = self.source.color();
        if drawer.pen().color != color {
            trace!("Drawer {}: pen color -> {:?}", drawer.view_id(), color);
            drawer.submit(PenCommand::SetColor(color));
        }
    }
}
