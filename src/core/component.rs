//! Component trait.

/// Renderable component interface.
pub trait Component {
    /// Render to a list of lines at the given width.
    fn render(&mut self, width: usize) -> Vec<String>;

    /// Provide an allocated viewport size for this component (optional).
    ///
    /// Hosts call this when the terminal (or the surface the component lives in) is resized.
    /// This is a constraint/budget, not a promise about the number of lines that will be
    /// rendered.
    fn set_viewport_size(&mut self, _cols: usize, _rows: usize) {}

    /// Invalidate any cached state.
    fn invalidate(&mut self) {}
}
