//! Folders and the folder handle

use super::{AddArgs, Child, ControllerId, FolderId, Gui, SavedState};
use crate::controller::{ChangeCallback, ChangeEvent, ControllerMut};
use crate::error::Result;
use crate::value::Record;

/// Payload delivered to open/close callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenCloseEvent {
    /// The folder that opened or closed
    pub folder: FolderId,
    pub closed: bool,
}

pub type OpenCloseCallback = Box<dyn FnMut(&OpenCloseEvent)>;

/// A container node: the root panel or a nested folder
pub struct Folder {
    pub(crate) parent: Option<FolderId>,
    pub(crate) title: String,
    pub(crate) children: Vec<Child>,
    pub(crate) closed: bool,
    pub(crate) hidden: bool,
    pub(crate) on_change: Option<ChangeCallback>,
    pub(crate) on_finish_change: Option<ChangeCallback>,
    pub(crate) on_open_close: Option<OpenCloseCallback>,
}

impl Folder {
    pub(crate) fn new(parent: Option<FolderId>, title: String, closed: bool) -> Self {
        Self {
            parent,
            title,
            children: Vec::new(),
            closed,
            hidden: false,
            on_change: None,
            on_finish_change: None,
            on_open_close: None,
        }
    }

    /// `None` for the root
    pub fn parent(&self) -> Option<FolderId> {
        self.parent
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn controllers(&self) -> Vec<ControllerId> {
        self.children
            .iter()
            .filter_map(|child| match child {
                Child::Controller(id) => Some(*id),
                Child::Folder(_) => None,
            })
            .collect()
    }

    pub fn folders(&self) -> Vec<FolderId> {
        self.children
            .iter()
            .filter_map(|child| match child {
                Child::Folder(id) => Some(*id),
                Child::Controller(_) => None,
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl std::fmt::Debug for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Folder")
            .field("title", &self.title)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("closed", &self.closed)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// A folder borrowed out of its [`Gui`]
pub struct FolderMut<'g> {
    gui: &'g mut Gui,
    id: FolderId,
}

impl std::fmt::Debug for FolderMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderMut")
            .field("id", &self.id)
            .field("folder", &self.get())
            .finish()
    }
}

impl<'g> FolderMut<'g> {
    pub(crate) fn new(gui: &'g mut Gui, id: FolderId) -> Self {
        Self { gui, id }
    }

    pub fn id(&self) -> FolderId {
        self.id
    }

    /// The folder, unless it has been destroyed
    pub fn get(&self) -> Option<&Folder> {
        self.gui.get_folder(self.id)
    }

    pub fn into_gui(self) -> &'g mut Gui {
        self.gui
    }

    pub fn parent(&self) -> Option<FolderId> {
        self.get().and_then(Folder::parent)
    }

    pub fn is_closed(&self) -> bool {
        self.get().is_some_and(Folder::is_closed)
    }

    fn with_folder(&mut self, op: &str, f: impl FnOnce(&mut Folder)) {
        match self.gui.folder_mut_raw(self.id) {
            Some(folder) => f(folder),
            None => tracing::warn!("{} called on a destroyed folder - ignored", op),
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Add a controller for `object[property]`.
    ///
    /// The controller kind is inferred from the current value; pass
    /// [`crate::Bounds`] for numbers or a list / record of options to get an
    /// option controller regardless of the value.
    pub fn add(
        &mut self,
        object: &Record,
        property: &str,
        args: impl Into<AddArgs>,
    ) -> Result<ControllerMut<'_>> {
        let id = self.gui.add_to(self.id, object, property, args.into())?;
        Ok(ControllerMut::new(self.gui, id))
    }

    /// Add a color controller for `object[property]`
    pub fn add_color(
        &mut self,
        object: &Record,
        property: &str,
        rgb_scale: f64,
    ) -> Result<ControllerMut<'_>> {
        let id = self.gui.add_color_to(self.id, object, property, rgb_scale)?;
        Ok(ControllerMut::new(self.gui, id))
    }

    /// Add a nested folder
    pub fn add_folder(&mut self, title: &str) -> FolderMut<'_> {
        let id = self.gui.add_folder_to(self.id, title);
        FolderMut::new(self.gui, id)
    }

    pub fn children(&self) -> Vec<Child> {
        self.get().map(|f| f.children.clone()).unwrap_or_default()
    }

    pub fn controllers(&self) -> Vec<ControllerId> {
        self.get().map(Folder::controllers).unwrap_or_default()
    }

    pub fn folders(&self) -> Vec<FolderId> {
        self.get().map(Folder::folders).unwrap_or_default()
    }

    pub fn controllers_recursive(&self) -> Vec<ControllerId> {
        self.gui.controllers_under(self.id)
    }

    pub fn folders_recursive(&self) -> Vec<FolderId> {
        self.gui.folders_under(self.id)
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    pub fn title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.with_folder("title", |f| f.title = title);
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        let mut toggled = false;
        self.with_folder("open", |f| {
            toggled = f.closed == open;
            f.closed = !open;
        });
        if toggled {
            self.call_on_open_close(!open);
        }
        self
    }

    pub fn close(self) -> Self {
        self.open(false)
    }

    pub fn show(mut self, visible: bool) -> Self {
        self.with_folder("show", |f| f.hidden = !visible);
        self
    }

    pub fn hide(self) -> Self {
        self.show(false)
    }

    /// Notify open/close listeners from the root down to this folder
    fn call_on_open_close(&mut self, closed: bool) {
        let event = OpenCloseEvent {
            folder: self.id,
            closed,
        };
        for folder in self.gui.ancestors(self.id) {
            if let Some(callback) = self
                .gui
                .folder_mut_raw(folder)
                .and_then(|f| f.on_open_close.as_mut())
            {
                callback(&event);
            }
        }
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Called on every change of any controller in this subtree
    pub fn on_change(mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.with_folder("on_change", |f| f.on_change = Some(Box::new(callback)));
        self
    }

    /// Called when any controller in this subtree commits a change
    pub fn on_finish_change(mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.with_folder("on_finish_change", |f| {
            f.on_finish_change = Some(Box::new(callback))
        });
        self
    }

    /// Called when this folder or any folder below it opens or closes
    pub fn on_open_close(mut self, callback: impl FnMut(&OpenCloseEvent) + 'static) -> Self {
        self.with_folder("on_open_close", |f| {
            f.on_open_close = Some(Box::new(callback))
        });
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn save(&self, recursive: bool) -> Result<SavedState> {
        self.gui.save_folder(self.id, recursive)
    }

    pub fn load(self, state: &SavedState, recursive: bool) -> Self {
        self.gui.load_folder(self.id, state, recursive);
        self
    }

    pub fn reset(self, recursive: bool) -> Self {
        self.gui.reset_folder(self.id, recursive);
        self
    }

    /// Destroy this folder and everything in it. Returns the number of nodes removed.
    pub fn destroy(self) -> usize {
        self.gui.destroy_folder(self.id)
    }
}
