use std::path::PathBuf;

use parserbot_settings::RecentProjectEntry;

use crate::ids::{NO_RECENT_PROJECTS, OPEN_RECENT, RECENT_PROJECT_ICON};
use crate::live::{Activation, ElementId, EntryTag, LiveElement, LiveKind, LiveMenu};
use crate::model::{MenuNode, MenuNodeKind, MenuTree};

/// Label lookup. Must be total: unknown keys come back unchanged.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Icon lookup for the active theme. `None` means "draw no icon".
pub trait ResolveIcon {
    fn resolve_icon(&self, name: &str) -> Option<PathBuf>;
}

impl<F> ResolveIcon for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn resolve_icon(&self, name: &str) -> Option<PathBuf> {
        self(name)
    }
}

/// 依選單樹建立執行中的選單。 / Builds the live menu from the configuration tree.
///
/// Depth-first over every group. The `top_bar_submenu_OpenRecent` submenu gets the recent
/// projects appended after its static children.
pub fn build(
    tree: &MenuTree,
    translate: &dyn Translate,
    icons: &dyn ResolveIcon,
    recent: &[RecentProjectEntry],
) -> LiveMenu {
    let mut menu = LiveMenu::default();
    for group in &tree.groups {
        let root = menu.push_root(LiveElement {
            id: Some(group.id.clone()),
            label: translate.translate(&group.id),
            kind: LiveKind::Menu {
                children: Vec::new(),
            },
            icon_name: None,
            icon: None,
            enabled: true,
            tag: EntryTag::Static,
        });
        menu.submenus.insert(&group.id, root);
        for node in &group.items {
            build_node(&mut menu, root, node, translate, icons, recent);
        }
    }
    tracing::debug!(
        groups = tree.groups.len(),
        elements = menu.len(),
        "built menu"
    );
    menu
}

fn build_node(
    menu: &mut LiveMenu,
    parent: ElementId,
    node: &MenuNode,
    translate: &dyn Translate,
    icons: &dyn ResolveIcon,
    recent: &[RecentProjectEntry],
) {
    let icon = node
        .icon
        .as_deref()
        .and_then(|name| icons.resolve_icon(name));
    let mut element = LiveElement {
        id: Some(node.id.clone()),
        label: translate.translate(&node.id),
        kind: LiveKind::Separator,
        icon_name: node.icon.clone(),
        icon,
        enabled: true,
        tag: EntryTag::Static,
    };
    match node.kind {
        MenuNodeKind::Separator => {
            element.id = None;
            element.label.clear();
            element.icon_name = None;
            element.icon = None;
            menu.push_child(parent, element);
        }
        MenuNodeKind::Button => {
            element.kind = LiveKind::Button {
                activation: Activation::Action,
            };
            let id = menu.push_child(parent, element);
            menu.actions.insert(&node.id, id);
        }
        MenuNodeKind::Checkbox => {
            element.kind = LiveKind::Checkbox {
                checked: node.default_checked,
            };
            element.icon_name = None;
            element.icon = None;
            let id = menu.push_child(parent, element);
            menu.checkboxes.insert(&node.id, id);
        }
        MenuNodeKind::Submenu => {
            element.kind = LiveKind::Menu {
                children: Vec::new(),
            };
            let id = menu.push_child(parent, element);
            menu.submenus.insert(&node.id, id);
            for child in &node.children {
                build_node(menu, id, child, translate, icons, recent);
            }
            if node.id == OPEN_RECENT {
                append_recent(menu, id, recent, translate, icons);
            }
        }
    }
}

fn append_recent(
    menu: &mut LiveMenu,
    submenu: ElementId,
    recent: &[RecentProjectEntry],
    translate: &dyn Translate,
    icons: &dyn ResolveIcon,
) {
    if !menu.children(submenu).is_empty() {
        menu.push_child(
            submenu,
            LiveElement {
                id: None,
                label: String::new(),
                kind: LiveKind::Separator,
                icon_name: None,
                icon: None,
                enabled: true,
                tag: EntryTag::Dynamic,
            },
        );
    }
    if recent.is_empty() {
        menu.push_child(
            submenu,
            LiveElement {
                id: None,
                label: translate.translate(NO_RECENT_PROJECTS),
                kind: LiveKind::Button {
                    activation: Activation::Inert,
                },
                icon_name: None,
                icon: None,
                enabled: false,
                tag: EntryTag::Dynamic,
            },
        );
        return;
    }
    let icon = icons.resolve_icon(RECENT_PROJECT_ICON);
    for entry in recent {
        menu.push_child(
            submenu,
            LiveElement {
                id: None,
                label: entry.name.clone(),
                kind: LiveKind::Button {
                    activation: Activation::OpenRecent(entry.path.clone()),
                },
                icon_name: Some(RECENT_PROJECT_ICON.to_string()),
                icon: icon.clone(),
                enabled: true,
                tag: EntryTag::Dynamic,
            },
        );
    }
}

impl LiveMenu {
    /// Replaces the generated recent-projects entries in place. Static children, element ids
    /// and registries are kept. Returns `false` when the menu has no recent-projects submenu.
    pub fn rebuild_recent(
        &mut self,
        recent: &[RecentProjectEntry],
        translate: &dyn Translate,
        icons: &dyn ResolveIcon,
    ) -> bool {
        let Some(submenu) = self.submenus.get(OPEN_RECENT) else {
            return false;
        };
        let removed = self.remove_children_tagged(submenu, EntryTag::Dynamic);
        append_recent(self, submenu, recent, translate, icons);
        tracing::debug!(removed, entries = recent.len(), "rebuilt recent projects menu");
        true
    }

    /// Re-resolves every icon for the current theme without touching the structure.
    pub fn refresh_icons(&mut self, icons: &dyn ResolveIcon) {
        for element in self.elements_mut() {
            element.icon = element
                .icon_name
                .as_deref()
                .and_then(|name| icons.resolve_icon(name));
        }
    }
}
