//! Control panel tree
//!
//! The [`Gui`] owns every folder and controller in two arenas addressed by
//! typed ids. Folders list their children in insertion order; children point
//! back at their folder by id. Destroyed slots stay empty and ids are never
//! reused, so a stale id is detectable instead of aliasing a newer node.

mod folder;
mod state;
mod tests;
mod tree;

pub use folder::{Folder, FolderMut, OpenCloseCallback, OpenCloseEvent};
pub use state::SavedState;

use std::time::Instant;

use crate::binding::Binding;
use crate::color::ColorFormat;
use crate::config::GuiConfig;
use crate::controller::{
    Bounds, ColorState, Controller, ControllerKind, ControllerMut, NumberState, OptionState,
    Options,
};
use crate::error::{GuiError, Result};
use crate::scheduler::FrameScheduler;
use crate::value::{List, Record, Value};

/// Stable id of a controller in its [`Gui`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub(crate) usize);

/// Stable id of a folder in its [`Gui`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub(crate) usize);

/// One entry in a folder's child list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Controller(ControllerId),
    Folder(FolderId),
}

/// Extra arguments to [`Gui::add`]: number bounds or a list of options
#[derive(Debug, Clone, Default)]
pub enum AddArgs {
    #[default]
    None,
    Bounds(Bounds),
    Options(Options),
}

impl From<()> for AddArgs {
    fn from(_: ()) -> Self {
        AddArgs::None
    }
}

impl From<Bounds> for AddArgs {
    fn from(bounds: Bounds) -> Self {
        AddArgs::Bounds(bounds)
    }
}

impl From<Options> for AddArgs {
    fn from(options: Options) -> Self {
        AddArgs::Options(options)
    }
}

impl From<List> for AddArgs {
    fn from(list: List) -> Self {
        AddArgs::Options(list.into())
    }
}

impl From<Record> for AddArgs {
    fn from(record: Record) -> Self {
        AddArgs::Options(record.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for AddArgs {
    fn from(values: Vec<T>) -> Self {
        AddArgs::Options(values.into())
    }
}

/// The control panel
pub struct Gui {
    folders: Vec<Option<Folder>>,
    controllers: Vec<Option<Controller>>,
    root: FolderId,
    pub(crate) scheduler: FrameScheduler,
    pub(crate) config: GuiConfig,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl Gui {
    pub fn new(config: GuiConfig) -> Self {
        let root = Folder::new(None, config.title.clone(), config.closed);
        Self {
            folders: vec![Some(root)],
            controllers: Vec::new(),
            root: FolderId(0),
            scheduler: FrameScheduler::new(),
            config,
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    pub fn root(&self) -> FolderId {
        self.root
    }

    // =========================================================================
    // Handles
    // =========================================================================

    /// Handle to the root folder
    pub fn root_mut(&mut self) -> FolderMut<'_> {
        let root = self.root;
        FolderMut::new(self, root)
    }

    pub fn controller(&mut self, id: ControllerId) -> Option<ControllerMut<'_>> {
        self.ctrl(id)?;
        Some(ControllerMut::new(self, id))
    }

    pub fn folder(&mut self, id: FolderId) -> Option<FolderMut<'_>> {
        self.get_folder(id)?;
        Some(FolderMut::new(self, id))
    }

    pub fn get_controller(&self, id: ControllerId) -> Option<&Controller> {
        self.ctrl(id)
    }

    pub fn get_folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn ctrl(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn ctrl_mut(&mut self, id: ControllerId) -> Option<&mut Controller> {
        self.controllers.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn folder_mut_raw(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.folders.get_mut(id.0).and_then(Option::as_mut)
    }

    // =========================================================================
    // Root delegates
    // =========================================================================

    /// Add a controller to the root folder; see [`FolderMut::add`]
    pub fn add(
        &mut self,
        object: &Record,
        property: &str,
        args: impl Into<AddArgs>,
    ) -> Result<ControllerMut<'_>> {
        let id = self.add_to(self.root, object, property, args.into())?;
        Ok(ControllerMut::new(self, id))
    }

    /// Add a color controller to the root folder; see [`FolderMut::add_color`]
    pub fn add_color(
        &mut self,
        object: &Record,
        property: &str,
        rgb_scale: f64,
    ) -> Result<ControllerMut<'_>> {
        let id = self.add_color_to(self.root, object, property, rgb_scale)?;
        Ok(ControllerMut::new(self, id))
    }

    /// Add a folder to the root folder
    pub fn add_folder(&mut self, title: &str) -> FolderMut<'_> {
        let id = self.add_folder_to(self.root, title);
        FolderMut::new(self, id)
    }

    pub fn save(&self) -> Result<SavedState> {
        self.save_folder(self.root, true)
    }

    pub fn load(&mut self, state: &SavedState) -> &mut Self {
        self.load_folder(self.root, state, true);
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.reset_folder(self.root, true);
        self
    }

    pub fn controllers_recursive(&self) -> Vec<ControllerId> {
        self.controllers_under(self.root)
    }

    pub fn folders_recursive(&self) -> Vec<FolderId> {
        self.folders_under(self.root)
    }

    /// Destroy everything in the panel. Returns the number of nodes removed.
    pub fn destroy(&mut self) -> usize {
        self.destroy_folder(self.root)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Infer a controller kind from the bound value and add it to `parent`.
    ///
    /// Undefined properties are an error whatever the arguments. Options then
    /// always win; otherwise booleans, strings, functions and numbers map to
    /// their controllers, and values with no controller are errors.
    pub(crate) fn add_to(
        &mut self,
        parent: FolderId,
        object: &Record,
        property: &str,
        args: AddArgs,
    ) -> Result<ControllerId> {
        if self.get_folder(parent).is_none() {
            return Err(GuiError::UnknownFolder);
        }
        let value = object.get(property);
        if value.is_undefined() {
            tracing::error!("add failed: property \"{}\" is undefined", property);
            return Err(GuiError::UndefinedProperty {
                property: property.to_string(),
            });
        }
        let kind = match (args, &value) {
            (AddArgs::Options(options), _) => ControllerKind::Option(OptionState::new(options)),
            (args, Value::Number(_)) => {
                let bounds = match args {
                    AddArgs::Bounds(bounds) => bounds,
                    _ => Bounds::default(),
                };
                ControllerKind::Number(NumberState::new(bounds))
            }
            (args, other) => {
                if let AddArgs::Bounds(bounds) = args {
                    tracing::debug!("ignoring {:?} for non-number property \"{}\"", bounds, property);
                }
                match other {
                    Value::Bool(_) => ControllerKind::Boolean,
                    Value::String(_) => ControllerKind::String,
                    Value::Function(_) => ControllerKind::Function,
                    _ => {
                        tracing::error!(
                            "add failed: no controller for {} property \"{}\"",
                            other.type_name(),
                            property
                        );
                        return Err(GuiError::UnsupportedType {
                            property: property.to_string(),
                            type_name: other.type_name(),
                        });
                    }
                }
            }
        };
        Ok(self.insert_controller(parent, Binding::new(object, property), kind, None))
    }

    /// Add a color controller without type inference.
    ///
    /// `rgb_scale` is the channel range of array / object colors (1 or 255).
    pub(crate) fn add_color_to(
        &mut self,
        parent: FolderId,
        object: &Record,
        property: &str,
        rgb_scale: f64,
    ) -> Result<ControllerId> {
        if self.get_folder(parent).is_none() {
            return Err(GuiError::UnknownFolder);
        }
        let value = object.get(property);
        if value.is_undefined() {
            tracing::error!("add_color failed: property \"{}\" is undefined", property);
            return Err(GuiError::UndefinedProperty {
                property: property.to_string(),
            });
        }
        let Some(format) = ColorFormat::detect(&value) else {
            tracing::error!(
                "add_color failed: {} property \"{}\" is not a color",
                value.type_name(),
                property
            );
            return Err(GuiError::UnsupportedType {
                property: property.to_string(),
                type_name: value.type_name(),
            });
        };
        let Some(color) = ColorState::new(format, rgb_scale, &value) else {
            tracing::error!("add_color failed: cannot parse \"{}\" as a color", property);
            return Err(GuiError::InvalidColor {
                property: property.to_string(),
                value: value.to_display_string(),
            });
        };
        let kind = ControllerKind::Color(color);
        Ok(self.insert_controller(parent, Binding::new(object, property), kind, None))
    }

    pub(crate) fn add_folder_to(&mut self, parent: FolderId, title: &str) -> FolderId {
        let id = FolderId(self.folders.len());
        let closed = self.config.close_folders;
        self.folders
            .push(Some(Folder::new(Some(parent), title.to_string(), closed)));
        match self.folder_mut_raw(parent) {
            Some(folder) => folder.children.push(Child::Folder(id)),
            None => tracing::warn!("add_folder into a destroyed folder - \"{}\" is detached", title),
        }
        tracing::debug!("added folder \"{}\"", title);
        id
    }

    /// Store a controller and link it into `parent` at `position` (or the end)
    fn insert_controller(
        &mut self,
        parent: FolderId,
        binding: Binding,
        kind: ControllerKind,
        position: Option<usize>,
    ) -> ControllerId {
        let id = ControllerId(self.controllers.len());
        let controller = Controller::new(parent, binding, kind);
        tracing::debug!(
            "added {:?} controller \"{}\"",
            controller.controller_type(),
            controller.name()
        );
        self.controllers.push(Some(controller));
        if let Some(folder) = self.folder_mut_raw(parent) {
            let at = position.unwrap_or(folder.children.len()).min(folder.children.len());
            folder.children.insert(at, Child::Controller(id));
        }
        self.update_display(id);
        id
    }

    /// Swap a controller for an option controller on the same binding
    pub(crate) fn replace_with_options(
        &mut self,
        id: ControllerId,
        options: Options,
    ) -> Result<ControllerId> {
        let Some(old) = self.ctrl(id) else {
            return Err(GuiError::UnknownController);
        };
        let parent = old.parent;
        let binding = old.binding.clone();
        let name = old.name.clone();
        let position = self
            .get_folder(parent)
            .and_then(|folder| folder.children.iter().position(|c| *c == Child::Controller(id)));

        self.destroy_controller(id);
        let kind = ControllerKind::Option(OptionState::new(options));
        let new_id = self.insert_controller(parent, binding, kind, position);
        if let Some(ctrl) = self.ctrl_mut(new_id) {
            ctrl.name = name;
        }
        self.update_display(new_id);
        tracing::debug!("replaced controller {:?} with option controller {:?}", id, new_id);
        Ok(new_id)
    }

    // =========================================================================
    // Value flow
    // =========================================================================

    /// Write, notify and refresh, unless `value` is identical to the current one
    pub(crate) fn set_value(&mut self, id: ControllerId, value: Value) {
        let Some(ctrl) = self.ctrl(id) else {
            tracing::warn!("set_value called on a destroyed controller - ignored");
            return;
        };
        if ctrl.get_value().identical(&value) {
            return;
        }
        ctrl.binding.set(value);
        self.call_on_change(id);
        self.update_display(id);
    }

    /// Folders from the root down to `folder`
    fn ancestors(&self, folder: FolderId) -> Vec<FolderId> {
        let mut chain = Vec::new();
        let mut next = Some(folder);
        while let Some(id) = next {
            chain.push(id);
            next = self.get_folder(id).and_then(|f| f.parent);
        }
        chain.reverse();
        chain
    }

    /// Fire change callbacks: root folder first, the controller's own last
    pub(crate) fn call_on_change(&mut self, id: ControllerId) {
        let Some(ctrl) = self.ctrl(id) else {
            return;
        };
        let event = ctrl.event(id);
        for folder in self.ancestors(ctrl.parent) {
            if let Some(callback) = self
                .folder_mut_raw(folder)
                .and_then(|f| f.on_change.as_mut())
            {
                callback(&event);
            }
        }
        if let Some(ctrl) = self.ctrl_mut(id) {
            if let Some(callback) = ctrl.on_change.as_mut() {
                callback(&event);
            }
            ctrl.changed = true;
        }
    }

    /// Fire finish-change callbacks if anything changed since the last commit
    pub(crate) fn call_on_finish_change(&mut self, id: ControllerId) {
        let Some(ctrl) = self.ctrl(id) else {
            return;
        };
        if ctrl.changed {
            let event = ctrl.event(id);
            for folder in self.ancestors(ctrl.parent) {
                if let Some(callback) = self
                    .folder_mut_raw(folder)
                    .and_then(|f| f.on_finish_change.as_mut())
                {
                    callback(&event);
                }
            }
            if let Some(callback) = self.ctrl_mut(id).and_then(|c| c.on_finish_change.as_mut()) {
                callback(&event);
            }
        }
        if let Some(ctrl) = self.ctrl_mut(id) {
            ctrl.changed = false;
        }
    }

    pub(crate) fn update_display(&mut self, id: ControllerId) {
        if let Some(ctrl) = self.ctrl_mut(id) {
            ctrl.refresh_display();
        }
    }

    // =========================================================================
    // Listen polling
    // =========================================================================

    pub(crate) fn set_listening(&mut self, id: ControllerId, enable: bool) {
        let Some(ctrl) = self.ctrl_mut(id) else {
            tracing::warn!("listen called on a destroyed controller - ignored");
            return;
        };
        ctrl.listening = enable;
        let previous = ctrl.listen_handle.take();
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
        if enable {
            self.poll_listen(id);
        }
    }

    /// Re-arm the poll and refresh the display if the exported value moved
    fn poll_listen(&mut self, id: ControllerId) {
        let handle = self.scheduler.request(id);
        let Some(ctrl) = self.ctrl_mut(id) else {
            self.scheduler.cancel(handle);
            return;
        };
        ctrl.listen_handle = Some(handle);
        let current = ctrl.save();
        let moved = !ctrl
            .listen_prev
            .as_ref()
            .is_some_and(|prev| prev.identical(&current));
        ctrl.listen_prev = Some(current);
        if moved {
            ctrl.refresh_display();
        }
    }

    /// Animation-frame tick.
    ///
    /// Runs every scheduled listen poll once and delivers slider-wheel
    /// finish-changes whose quiet period ended by `now`.
    pub fn frame(&mut self, now: Instant) {
        for (handle, id) in self.scheduler.take_due() {
            let live = self
                .ctrl(id)
                .is_some_and(|c| c.listening && c.listen_handle == Some(handle));
            if live {
                self.poll_listen(id);
            }
        }

        let expired: Vec<ControllerId> = self
            .controllers
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match &slot.as_ref()?.kind {
                ControllerKind::Number(number)
                    if number.wheel_commit_at.is_some_and(|at| at <= now) =>
                {
                    Some(ControllerId(index))
                }
                _ => None,
            })
            .collect();
        for id in expired {
            if let Some(ControllerKind::Number(number)) = self.ctrl_mut(id).map(|c| &mut c.kind) {
                number.wheel_commit_at = None;
            }
            self.call_on_finish_change(id);
        }
    }

    /// Number of live controllers
    pub fn controller_count(&self) -> usize {
        self.controllers.iter().flatten().count()
    }

    /// Number of live folders, root included
    pub fn folder_count(&self) -> usize {
        self.folders.iter().flatten().count()
    }
}

impl std::fmt::Debug for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gui")
            .field("title", &self.get_folder(self.root).map(Folder::title))
            .field("folders", &self.folder_count())
            .field("controllers", &self.controller_count())
            .field("listening", &self.scheduler.len())
            .finish()
    }
}
