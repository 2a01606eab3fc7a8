use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dispatch::MenuEvent;
use crate::style::MenuStyle;

/// Stable handle of a live menu element. Survives theme refreshes and recent-list rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Distinguishes elements built from the configuration from those generated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTag {
    Static,
    /// Recent-projects entries; cleared and regenerated by `rebuild_recent`.
    Dynamic,
}

/// What a button does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Dispatch the element's id.
    Action,
    OpenRecent(PathBuf),
    /// Placeholder entries that never fire.
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveKind {
    /// A top-level group or a nested submenu.
    Menu { children: Vec<ElementId> },
    Button { activation: Activation },
    Checkbox { checked: bool },
    Separator,
}

/// 執行中的選單元素。 / One element of the live menu hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveElement {
    /// `None` for separators and generated entries.
    pub id: Option<String>,
    pub label: String,
    pub kind: LiveKind,
    pub icon_name: Option<String>,
    /// Resolved icon file; `None` renders the entry without a glyph.
    pub icon: Option<PathBuf>,
    pub enabled: bool,
    pub tag: EntryTag,
}

impl LiveElement {
    pub fn is_menu(&self) -> bool {
        matches!(self.kind, LiveKind::Menu { .. })
    }

    pub fn checked(&self) -> Option<bool> {
        match self.kind {
            LiveKind::Checkbox { checked } => Some(checked),
            _ => None,
        }
    }
}

/// Id -> element lookup for one class of elements.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, ElementId>,
}

impl Registry {
    pub fn get(&self, id: &str) -> Option<ElementId> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, id: &str, element: ElementId) {
        self.entries.insert(id.to_string(), element);
    }
}

/// 執行中的選單階層。 / The built menu: an element arena plus registries and resolved colors.
///
/// Removed elements leave a tombstone so outstanding [`ElementId`]s never alias a newer
/// element.
#[derive(Debug, Clone, Default)]
pub struct LiveMenu {
    elements: Vec<Option<LiveElement>>,
    roots: Vec<ElementId>,
    pub(crate) actions: Registry,
    pub(crate) checkboxes: Registry,
    pub(crate) submenus: Registry,
    pub(crate) style: MenuStyle,
}

impl LiveMenu {
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn element(&self, id: ElementId) -> Option<&LiveElement> {
        self.elements.get(id.0).and_then(Option::as_ref)
    }

    /// Children of a menu element; empty for anything else.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.element(id).map(|element| &element.kind) {
            Some(LiveKind::Menu { children }) => children,
            _ => &[],
        }
    }

    /// Number of live elements, top-level groups included.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &LiveElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|element| (ElementId(index), element)))
    }

    pub fn actions(&self) -> &Registry {
        &self.actions
    }

    pub fn checkboxes(&self) -> &Registry {
        &self.checkboxes
    }

    pub fn submenus(&self) -> &Registry {
        &self.submenus
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    pub fn is_checked(&self, id: &str) -> Option<bool> {
        let element = self.checkboxes.get(id)?;
        self.element(element).and_then(LiveElement::checked)
    }

    /// Programmatic update of a checkbox. Emits no event.
    /// Returns `false` when no checkbox is registered under `id`.
    pub fn set_checked(&mut self, id: &str, value: bool) -> bool {
        let Some(element) = self.checkboxes.get(id) else {
            return false;
        };
        match self.element_mut(element).map(|element| &mut element.kind) {
            Some(LiveKind::Checkbox { checked }) => {
                *checked = value;
                true
            }
            _ => false,
        }
    }

    /// User activation of `element`: flips checkboxes and returns the event to dispatch.
    /// Menus, separators, disabled and inert entries yield `None`.
    pub fn activate(&mut self, element: ElementId) -> Option<MenuEvent> {
        let entry = self.element_mut(element)?;
        if !entry.enabled {
            return None;
        }
        let id = entry.id.clone();
        match &mut entry.kind {
            LiveKind::Button {
                activation: Activation::Action,
            } => id.map(MenuEvent::button),
            LiveKind::Button {
                activation: Activation::OpenRecent(path),
            } => Some(MenuEvent::OpenRecent(path.clone())),
            LiveKind::Checkbox { checked } => {
                *checked = !*checked;
                let value = *checked;
                id.map(|id| MenuEvent::checkbox(id, value))
            }
            LiveKind::Button {
                activation: Activation::Inert,
            }
            | LiveKind::Menu { .. }
            | LiveKind::Separator => None,
        }
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Option<&mut LiveElement> {
        self.elements.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn push_root(&mut self, element: LiveElement) -> ElementId {
        let id = self.insert(element);
        self.roots.push(id);
        id
    }

    pub(crate) fn push_child(&mut self, parent: ElementId, element: LiveElement) -> ElementId {
        let id = self.insert(element);
        if let Some(LiveKind::Menu { children }) =
            self.element_mut(parent).map(|parent| &mut parent.kind)
        {
            children.push(id);
        }
        id
    }

    /// Drops the children of `parent` matching `tag`, leaving tombstones behind.
    pub(crate) fn remove_children_tagged(&mut self, parent: ElementId, tag: EntryTag) -> usize {
        let doomed: Vec<ElementId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some_and(|element| element.tag == tag))
            .collect();
        if let Some(LiveKind::Menu { children }) =
            self.element_mut(parent).map(|parent| &mut parent.kind)
        {
            children.retain(|child| !doomed.contains(child));
        }
        for id in &doomed {
            if let Some(slot) = self.elements.get_mut(id.0) {
                *slot = None;
            }
        }
        doomed.len()
    }

    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = &mut LiveElement> {
        self.elements.iter_mut().filter_map(Option::as_mut)
    }

    fn insert(&mut self, element: LiveElement) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Some(element));
        id
    }
}

/// Recent-project entries currently shown, in display order.
pub fn recent_paths(menu: &LiveMenu, open_recent: ElementId) -> Vec<&Path> {
    menu.children(open_recent)
        .iter()
        .filter_map(|child| match menu.element(*child).map(|element| &element.kind) {
            Some(LiveKind::Button {
                activation: Activation::OpenRecent(path),
            }) => Some(path.as_path()),
            _ => None,
        })
        .collect()
}
