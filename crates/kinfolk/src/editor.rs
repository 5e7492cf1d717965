#![forbid(unsafe_code)]

//! The editing session.
//!
//! Every mutating entry point follows the same shape: validate, apply the
//! store edit, then [`Editor::pump`] so the scene reflects the new state
//! before the call returns. Read-only entry points never pump.

use std::fs;
use std::path::{Path, PathBuf};

use kinfolk_core::{Person, PersonId, Point};
use kinfolk_layout::TreeLayout;
use kinfolk_scene::{ReorderController, Scene, SvgRenderer, Viewport};
use kinfolk_store::Family;

use crate::config::EditorConfig;
use crate::{Error, Result};

/// Window-title prefix.
pub const APP_NAME: &str = "FamilyTree";

/// One family tree being edited.
#[derive(Debug, Clone)]
pub struct Editor {
    family: Family,
    scene: Scene,
    reorder: ReorderController,
    viewport: Viewport,
    current_path: Option<PathBuf>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// A session on a fresh single-person family, with default metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(EditorConfig::default())
    }

    /// Like [`Editor::new`] with custom metrics and style.
    pub fn with_config(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: EditorConfig) -> Self {
        let mut editor = Self {
            family: Family::new(),
            scene: Scene::new(config.metrics, config.style),
            reorder: ReorderController::new(),
            viewport: Viewport::new(),
            current_path: None,
        };
        editor.pump();
        editor
    }

    /// Deliver queued family events to the scene. Returns the event count.
    pub fn pump(&mut self) -> usize {
        let delivered = self.family.dispatch(&mut [&mut self.scene]);
        if delivered > 0 {
            tracing::trace!(target: "kinfolk.editor", delivered, "events pumped");
        }
        delivered
    }

    // --- Accessors --------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn family(&self) -> &Family {
        &self.family
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn reorder(&self) -> &ReorderController {
        &self.reorder
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.family.is_dirty()
    }

    /// `"FamilyTree - <path>"`, with `" *"` appended while there are unsaved
    /// changes.
    #[must_use]
    pub fn window_title(&self) -> String {
        let path = self
            .current_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let mut title = format!("{APP_NAME} - {path}");
        if self.family.is_dirty() {
            title.push_str(" *");
        }
        title
    }

    /// Pixel placement of every reachable person under the scene's metrics.
    #[must_use]
    pub fn layout(&self) -> TreeLayout {
        kinfolk_layout::place(self.family.generations(), self.scene.metrics())
    }

    // --- Documents --------------------------------------------------------

    /// Replace the whole family with a fresh single-person tree.
    pub fn new_family(&mut self) {
        self.reorder.cancel(&mut self.scene);
        self.family = Family::new();
        self.current_path = None;
        self.pump();
    }

    /// Replace the family with the document in `text`.
    ///
    /// On error the current family, scene, and path are left untouched.
    pub fn load_json(&mut self, text: &str) -> Result<()> {
        let family = Family::from_json(text)?;
        self.reorder.cancel(&mut self.scene);
        self.family = family;
        self.scene.clear_selection();
        self.pump();
        tracing::debug!(
            target: "kinfolk.editor",
            members = self.family.len(),
            "family loaded"
        );
        Ok(())
    }

    /// Read and load a document, remembering `path` for later saves.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        self.load_json(&text)?;
        self.current_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Serialize without touching the dirty flag.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.family.to_json()?)
    }

    /// Serialize and mark the family saved.
    pub fn save_json(&mut self) -> Result<String> {
        let json = self.family.to_json()?;
        self.family.mark_saved();
        self.pump();
        Ok(json)
    }

    /// Write the document to `path` and remember it.
    pub fn save_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.family.to_json()?;
        fs::write(path, json)?;
        self.current_path = Some(path.to_path_buf());
        self.family.mark_saved();
        self.pump();
        tracing::debug!(target: "kinfolk.editor", path = %path.display(), "family saved");
        Ok(())
    }

    /// Save to the remembered path.
    pub fn save(&mut self) -> Result<()> {
        let path = self.current_path.clone().ok_or(Error::NoPath)?;
        self.save_file(path)
    }

    // --- Edits ------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.family.update_title(title);
        self.pump();
    }

    /// Append `person` under `parent`.
    pub fn add_child_done(&mut self, parent: &PersonId, person: Person) -> Result<()> {
        self.family.add_child(parent, person)?;
        self.pump();
        Ok(())
    }

    /// Append `person` under the selected card.
    pub fn add_child_to_selected(&mut self, person: Person) -> Result<()> {
        let parent = self.scene.selected().cloned().ok_or(Error::NoSelection)?;
        self.add_child_done(&parent, person)
    }

    /// Record for the selected card, for prefilling an edit form.
    #[must_use]
    pub fn selected_member(&self) -> Option<&Person> {
        self.scene.selected().and_then(|id| self.family.member(id))
    }

    /// Apply an edited record.
    pub fn edit_done(&mut self, person: Person) -> Result<()> {
        self.family.update_member(person)?;
        self.pump();
        Ok(())
    }

    pub fn reorder_children(&mut self, parent: &PersonId, order: Vec<PersonId>) -> Result<()> {
        self.family.reorder_children(parent, order)?;
        self.pump();
        Ok(())
    }

    /// Move `id` to `index` among its siblings. Returns false when it is
    /// already there.
    pub fn move_child(&mut self, id: &PersonId, index: usize) -> Result<bool> {
        let parent = self
            .family
            .parent_id(id)
            .cloned()
            .ok_or_else(|| kinfolk_store::StoreError::InvalidParent(id.clone()))?;
        let mut order = self.family.siblings(id).to_vec();
        let Some(from) = order.iter().position(|s| s == id) else {
            return Ok(false);
        };
        let to = index.min(order.len() - 1);
        if from == to {
            return Ok(false);
        }
        let moved = order.remove(from);
        order.insert(to, moved);
        self.reorder_children(&parent, order)?;
        Ok(true)
    }

    /// Force a full relayout and scene rebuild.
    pub fn relayout(&mut self) {
        self.family.relayout();
        self.pump();
    }

    pub fn select(&mut self, id: &PersonId) -> bool {
        self.scene.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    // --- Pointer ----------------------------------------------------------

    /// Press at view point `at`: select the card under it and start a drag.
    ///
    /// Returns the pressed card, or `None` over empty space (which clears the
    /// selection).
    pub fn pointer_down(&mut self, at: Point) -> Option<PersonId> {
        let point = self.viewport.to_scene(at);
        let Some(id) = self.scene.hit_test(point).cloned() else {
            self.scene.clear_selection();
            return None;
        };
        self.scene.select(&id);
        self.reorder.begin(&self.scene, &id, point);
        Some(id)
    }

    /// Pointer motion during a press. Returns the proposed sibling index.
    pub fn pointer_move(&mut self, at: Point) -> Option<usize> {
        let point = self.viewport.to_scene(at);
        self.reorder.move_to(&mut self.scene, &self.family, point)
    }

    /// Release. Returns the committed child order if the drag moved a card.
    pub fn pointer_up(&mut self) -> Result<Option<Vec<PersonId>>> {
        let committed = self.reorder.end(&mut self.scene, &mut self.family)?;
        self.pump();
        Ok(committed)
    }

    /// Abandon an active drag. Returns false when none was active.
    pub fn cancel_drag(&mut self) -> bool {
        self.reorder.cancel(&mut self.scene)
    }

    // --- View -------------------------------------------------------------

    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    /// SVG document of the current scene.
    #[must_use]
    pub fn export_svg(&self) -> String {
        SvgRenderer::default().render(&self.scene)
    }

    /// SVG document rendered with a custom renderer.
    #[must_use]
    pub fn export_svg_with(&self, renderer: &SvgRenderer) -> String {
        renderer.render(&self.scene)
    }
}
