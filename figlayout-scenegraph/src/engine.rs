use crate::error::FigLayoutSceneGraphError;
use crate::figure::Figure;
use crate::renderer::Renderer;
use std::any::Any;

/// Hook that rearranges a figure before it is drawn.
///
/// Engines are attached to a [`Figure`] and run at the start of every
/// [`Figure::draw`]. An engine may render the figure itself as often as it
/// needs to measure decorations.
pub trait LayoutEngine: Any {
    fn execute(
        &self,
        figure: &mut Figure,
        renderer: &mut dyn Renderer,
    ) -> Result<(), FigLayoutSceneGraphError>;

    /// Used to recover the concrete engine type
    fn as_any(&self) -> &dyn Any;
}
