use std::collections::HashMap;

use crate::types::errors::WindowError;
use crate::types::window::WindowId;

/// Trait defining the window registry interface.
pub trait WindowRegistryTrait<W> {
    fn add(&mut self, handle: W) -> WindowId;
    fn remove(&mut self, id: &WindowId) -> Result<W, WindowError>;
    fn get(&self, id: &WindowId) -> Option<&W>;
    fn get_mut(&mut self, id: &WindowId) -> Option<&mut W>;
    fn ids(&self) -> Vec<WindowId>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Owns every open window's handle, keyed by an opaque id.
///
/// Generic over the handle so the GUI can store its native window and webview
/// while tests store plain values.
pub struct WindowRegistry<W> {
    windows: HashMap<WindowId, W>,
    // Creation order, oldest first.
    order: Vec<WindowId>,
}

impl<W> WindowRegistry<W> {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Finds the id of the first window whose handle matches `pred`.
    pub fn find<P>(&self, mut pred: P) -> Option<WindowId>
    where
        P: FnMut(&W) -> bool,
    {
        self.order
            .iter()
            .find(|id| self.windows.get(id).map(&mut pred).unwrap_or(false))
            .copied()
    }
}

impl<W> Default for WindowRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WindowRegistryTrait<W> for WindowRegistry<W> {
    fn add(&mut self, handle: W) -> WindowId {
        let id = WindowId::new();
        self.windows.insert(id, handle);
        self.order.push(id);
        id
    }

    fn remove(&mut self, id: &WindowId) -> Result<W, WindowError> {
        let handle = self
            .windows
            .remove(id)
            .ok_or_else(|| WindowError::NotFound(id.to_string()))?;
        self.order.retain(|w| w != id);
        Ok(handle)
    }

    fn get(&self, id: &WindowId) -> Option<&W> {
        self.windows.get(id)
    }

    fn get_mut(&mut self, id: &WindowId) -> Option<&mut W> {
        self.windows.get_mut(id)
    }

    fn ids(&self) -> Vec<WindowId> {
        self.order.clone()
    }

    fn len(&self) -> usize {
        self.windows.len()
    }

    fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
