//! Tree traversal and teardown

use super::{Child, ControllerId, FolderId, Gui};

impl Gui {
    /// Every controller below `folder`, depth-first.
    ///
    /// A folder's own controllers come before those of its subfolders; each
    /// level keeps insertion order.
    pub fn controllers_under(&self, folder: FolderId) -> Vec<ControllerId> {
        let mut out = Vec::new();
        self.collect_controllers(folder, &mut out);
        out
    }

    fn collect_controllers(&self, folder: FolderId, out: &mut Vec<ControllerId>) {
        let Some(node) = self.get_folder(folder) else {
            return;
        };
        out.extend(node.controllers());
        for sub in node.folders() {
            self.collect_controllers(sub, out);
        }
    }

    /// Every folder below `folder` (not including it), depth-first pre-order
    pub fn folders_under(&self, folder: FolderId) -> Vec<FolderId> {
        let mut out = Vec::new();
        self.collect_folders(folder, &mut out);
        out
    }

    fn collect_folders(&self, folder: FolderId, out: &mut Vec<FolderId>) {
        let Some(node) = self.get_folder(folder) else {
            return;
        };
        for sub in node.folders() {
            out.push(sub);
            self.collect_folders(sub, out);
        }
    }

    /// Remove a controller, cancel its listen poll and unlink it from its folder
    pub(crate) fn destroy_controller(&mut self, id: ControllerId) -> bool {
        let Some(ctrl) = self.controllers.get_mut(id.0).and_then(Option::take) else {
            tracing::warn!("destroy called on a destroyed controller {:?} - ignored", id);
            return false;
        };
        if let Some(handle) = ctrl.listen_handle {
            self.scheduler.cancel(handle);
        }
        if let Some(folder) = self.folder_mut_raw(ctrl.parent) {
            folder.children.retain(|child| *child != Child::Controller(id));
        }
        tracing::debug!("destroyed controller \"{}\"", ctrl.name);
        true
    }

    /// Destroy everything below `id`, then `id` itself.
    ///
    /// Children are visited from a snapshot since each removal edits the live
    /// list. The root keeps its (now empty) slot. Returns the number of
    /// controllers and folders removed.
    pub(crate) fn destroy_folder(&mut self, id: FolderId) -> usize {
        let Some(folder) = self.get_folder(id) else {
            tracing::warn!("destroy called on a destroyed folder {:?} - ignored", id);
            return 0;
        };
        let snapshot = folder.children.clone();
        let parent = folder.parent;

        let mut removed = 0;
        for child in snapshot {
            removed += match child {
                Child::Controller(c) => usize::from(self.destroy_controller(c)),
                Child::Folder(f) => self.destroy_folder(f),
            };
        }

        let Some(parent) = parent else {
            return removed;
        };
        if let Some(slot) = self.folders.get_mut(id.0)
            && let Some(folder) = slot.take()
        {
            debug_assert!(folder.children.is_empty());
            tracing::debug!("destroyed folder \"{}\"", folder.title);
        }
        if let Some(parent) = self.folder_mut_raw(parent) {
            parent.children.retain(|child| *child != Child::Folder(id));
        }
        removed + 1
    }
}
