//! Rendering surface contract and shell lifecycle
//!
//! The shell owns one rendering surface for its whole lifetime: it attaches
//! the interceptor, loads the entry point, forwards back presses and tears the
//! surface down once.

use crate::interceptor::Interceptor;
use crate::logger;
use crate::origin::INITIAL_URL;
use std::sync::Arc;

/// What the shell needs from the hosting web-rendering surface
pub trait RenderingSurface {
    /// Install the interceptor consulted before every resource load
    fn set_interceptor(&mut self, interceptor: Arc<Interceptor>);

    /// Start a navigation
    fn load_url(&mut self, url: &str);

    fn can_go_back(&self) -> bool;

    fn go_back(&mut self);

    /// Release every resource held by the surface
    fn destroy(&mut self);
}

/// Result of a back press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackNavigation {
    /// The surface navigated back in its own history
    WentBack,
    /// Nothing to go back to; the host should close the shell
    Exit,
}

/// Single-surface shell
#[derive(Debug)]
pub struct Shell<S: RenderingSurface> {
    surface: Option<S>,
    interceptor: Arc<Interceptor>,
}

impl<S: RenderingSurface> Shell<S> {
    /// Attach the interceptor and load the entry point
    pub fn create(mut surface: S, interceptor: Arc<Interceptor>) -> Self {
        surface.set_interceptor(Arc::clone(&interceptor));
        surface.load_url(INITIAL_URL);
        logger::log_info(&format!("[Shell] Loading {INITIAL_URL}"));
        Self {
            surface: Some(surface),
            interceptor,
        }
    }

    pub const fn interceptor(&self) -> &Arc<Interceptor> {
        &self.interceptor
    }

    pub const fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub const fn is_destroyed(&self) -> bool {
        self.surface.is_none()
    }

    pub fn on_back_pressed(&mut self) -> BackNavigation {
        match self.surface.as_mut() {
            Some(surface) if surface.can_go_back() => {
                surface.go_back();
                BackNavigation::WentBack
            }
            _ => BackNavigation::Exit,
        }
    }

    /// Tear down the surface; later calls do nothing
    pub fn destroy(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
            logger::log_info("[Shell] Surface destroyed");
        }
    }
}

impl<S: RenderingSurface> Drop for Shell<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
