//! Session state management

use edit_engine::{EditCommand, EditorSnapshot, FamilyEngine, FieldPatch, Result};
use family_model::{seed_family, ExpansionSet, FamilyMember, PersonId};
use layout_engine::{LayoutConfig, LayoutEngine};
use render_model::{Camera, RenderScene, SceneBuilder, SceneConfig, Viewport};
use std::sync::Arc;

/// State for one family tree editing session.
///
/// All methods run synchronously to completion on the caller's event
/// thread; ordering between edits and redraws is the caller's event pump
/// being sequential. The camera is captured on every gesture and
/// reapplied verbatim on every rebuild, so structural edits never move
/// the viewport; only the very first render uses the default
/// bottom-centered camera.
pub struct TreeSession {
    /// Tree plus expansion view state and the command executor
    engine: FamilyEngine,
    /// Layout pass, re-run in full on every relevant change
    layout: LayoutEngine,
    /// Scene conversion
    builder: SceneBuilder,
    /// Current drawable area from the host
    viewport: Viewport,
    /// Last camera captured from a pan/zoom gesture
    camera: Option<Camera>,
}

impl TreeSession {
    /// Start a session over the seed tree
    pub fn new(viewport: Viewport) -> Self {
        Self::with_tree(seed_family(), viewport)
    }

    /// Start a session over an existing tree
    pub fn with_tree(tree: Arc<FamilyMember>, viewport: Viewport) -> Self {
        tracing::info!(nodes = tree.len(), "starting tree session");
        Self {
            engine: FamilyEngine::with_tree(tree),
            layout: LayoutEngine::with_defaults(),
            builder: SceneBuilder::with_defaults(),
            viewport,
            camera: None,
        }
    }

    /// Override the layout tuning
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout = LayoutEngine::new(config);
        self
    }

    /// Override the scene tuning
    pub fn with_scene_config(mut self, config: SceneConfig) -> Self {
        self.builder = SceneBuilder::new(config);
        self
    }

    /// The current tree
    pub fn tree(&self) -> &Arc<FamilyMember> {
        self.engine.tree()
    }

    /// The current expansion view state
    pub fn expansion(&self) -> &ExpansionSet {
        self.engine.expansion()
    }

    /// The current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The last captured camera, if any gesture happened yet
    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    // =========================================================================
    // Editor surface
    // =========================================================================

    /// Editor save callback: merge a field patch into one person. A
    /// since-deleted id is a silent no-op.
    pub fn on_save(&mut self, id: &PersonId, patch: FieldPatch) -> Result<()> {
        self.engine.save_fields(id, patch)
    }

    /// Editor delete callback: guarded subtree removal. Root deletion
    /// and connected nodes are rejected with the tree untouched.
    pub fn on_delete(&mut self, id: &PersonId) -> Result<()> {
        self.engine.delete(id)
    }

    /// The editable snapshot for the editor form, `None` once the id no
    /// longer exists.
    pub fn editor_snapshot(&self, id: &PersonId) -> Option<EditorSnapshot> {
        self.engine.snapshot(id)
    }

    // =========================================================================
    // Node action controls
    // =========================================================================

    /// Add a synthetic ancestor above the node
    pub fn add_ancestor(&mut self, id: &PersonId) -> Result<()> {
        self.engine.execute(EditCommand::AddAncestor { id: id.clone() })
    }

    /// Add a synthetic spouse beside the node
    pub fn add_spouse(&mut self, id: &PersonId) -> Result<()> {
        self.engine.execute(EditCommand::AddSpouse { id: id.clone() })
    }

    /// Replace the root with a synthetic descendant
    pub fn add_descendant(&mut self, id: &PersonId) -> Result<()> {
        self.engine
            .execute(EditCommand::AddDescendant { id: id.clone() })
    }

    /// Expand or collapse a spouse sub-tree. Returns the new state.
    pub fn toggle_spouse(&mut self, id: &PersonId) -> bool {
        self.engine.toggle_spouse(id)
    }

    // =========================================================================
    // Host surface
    // =========================================================================

    /// Host resize notification
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    /// Capture the camera from a pan/zoom gesture. This runs on the
    /// high-frequency interaction stream and never triggers a rebuild
    /// itself; the next rebuild reapplies the captured value.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    /// Rebuild the scene from scratch: full layout pass, full redraw,
    /// captured camera rehydrated.
    pub fn render(&self) -> RenderScene {
        let layout = self.layout.compute(self.engine.tree(), self.engine.expansion());
        self.builder
            .build(self.engine.tree(), &layout, self.viewport, self.camera)
    }
}

impl Default for TreeSession {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PersonId {
        PersonId::new(s)
    }

    #[test]
    fn test_first_render_uses_default_camera() {
        let session = TreeSession::new(Viewport::new(1000.0, 700.0));
        let scene = session.render();
        assert_eq!(scene.camera, Camera::initial(&Viewport::new(1000.0, 700.0)));
    }

    #[test]
    fn test_captured_camera_survives_edits_and_renders() {
        let mut session = TreeSession::default();
        let camera = Camera::new(222.0, 480.0, 0.8);
        session.set_camera(camera);

        session.add_spouse(&id("p2")).unwrap();
        session
            .on_save(&id("p1"), FieldPatch::default().name("Eleanor L."))
            .unwrap();

        let scene = session.render();
        assert_eq!(scene.camera, camera);
        // Rendering twice does not drift anything.
        assert_eq!(session.render(), scene);
    }

    #[test]
    fn test_resize_changes_viewport_not_camera() {
        let mut session = TreeSession::default();
        let camera = Camera::new(10.0, 20.0, 1.5);
        session.set_camera(camera);
        session.resize(640.0, 480.0);
        let scene = session.render();
        assert_eq!(scene.viewport, Viewport::new(640.0, 480.0));
        assert_eq!(scene.camera, camera);
    }

    #[test]
    fn test_snapshot_gates_delete_action() {
        let session = TreeSession::default();
        assert!(!session
            .editor_snapshot(&PersonId::root())
            .unwrap()
            .can_delete);
        assert!(session.editor_snapshot(&id("p2")).unwrap().can_delete);
        assert!(session.editor_snapshot(&id("gone")).is_none());
    }
}
