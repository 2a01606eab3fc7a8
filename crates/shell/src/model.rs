use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuConfigError {
    #[error("failed to parse menu configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("menu entry of kind '{kind}' has an empty id")]
    EmptyId { kind: &'static str },
    #[error("menu id '{0}' is declared more than once")]
    DuplicateId(String),
    #[error("menu entry '{id}' has unknown type '{kind}'")]
    UnknownKind { id: String, kind: String },
}

/// 選單項目種類。 / Kind of a configurable menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNodeKind {
    Button,
    Checkbox,
    Separator,
    Submenu,
}

impl MenuNodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuNodeKind::Button => "button",
            MenuNodeKind::Checkbox => "checkbox",
            MenuNodeKind::Separator => "separator",
            MenuNodeKind::Submenu => "menu",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "button" => Some(MenuNodeKind::Button),
            "checkbox" => Some(MenuNodeKind::Checkbox),
            "separator" => Some(MenuNodeKind::Separator),
            "menu" | "submenu" => Some(MenuNodeKind::Submenu),
            _ => None,
        }
    }
}

/// One entry of the declarative menu tree. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: String,
    pub kind: MenuNodeKind,
    pub icon: Option<String>,
    pub default_checked: bool,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn button(id: impl Into<String>) -> Self {
        Self::with_kind(id, MenuNodeKind::Button)
    }

    pub fn checkbox(id: impl Into<String>, default_checked: bool) -> Self {
        Self {
            default_checked,
            ..Self::with_kind(id, MenuNodeKind::Checkbox)
        }
    }

    pub fn separator() -> Self {
        Self::with_kind(String::new(), MenuNodeKind::Separator)
    }

    pub fn submenu(id: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            children,
            ..Self::with_kind(id, MenuNodeKind::Submenu)
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    fn with_kind(id: impl Into<String>, kind: MenuNodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            icon: None,
            default_checked: false,
            children: Vec::new(),
        }
    }
}

/// A top-level menu (File, View, ...). `name` is informational; labels come from `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub name: String,
    pub id: String,
    pub items: Vec<MenuNode>,
}

impl MenuGroup {
    pub fn new(id: impl Into<String>, items: Vec<MenuNode>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            items,
        }
    }
}

/// 選單設定樹。 / Ordered top-level menu groups loaded from `menu_config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuTree {
    pub groups: Vec<MenuGroup>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Wrapped { menus: Vec<RawGroup> },
    Bare(Vec<RawGroup>),
}

#[derive(Deserialize)]
struct RawGroup {
    #[serde(default)]
    name: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    default: bool,
    #[serde(default)]
    items: Vec<RawItem>,
}

impl RawItem {
    fn into_node(self) -> Result<MenuNode, MenuConfigError> {
        let kind = match self.kind.as_deref() {
            None => MenuNodeKind::Button,
            Some(value) => {
                MenuNodeKind::parse(value).ok_or_else(|| MenuConfigError::UnknownKind {
                    id: self.id.clone(),
                    kind: value.to_string(),
                })?
            }
        };
        let children = self
            .items
            .into_iter()
            .map(RawItem::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MenuNode {
            id: self.id,
            kind,
            icon: self.icon.filter(|icon| !icon.is_empty()),
            default_checked: self.default,
            children,
        })
    }
}

impl MenuTree {
    pub fn new(groups: Vec<MenuGroup>) -> Result<Self, MenuConfigError> {
        let tree = Self { groups };
        tree.validate()?;
        Ok(tree)
    }

    /// Accepts `{"menus": [...]}` or a bare array of groups.
    pub fn from_json_str(input: &str) -> Result<Self, MenuConfigError> {
        let raw_groups = match serde_json::from_str::<RawConfig>(input)? {
            RawConfig::Wrapped { menus } => menus,
            RawConfig::Bare(groups) => groups,
        };
        let mut groups = Vec::with_capacity(raw_groups.len());
        for raw in raw_groups {
            let items = raw
                .items
                .into_iter()
                .map(RawItem::into_node)
                .collect::<Result<Vec<_>, _>>()?;
            let name = if raw.name.is_empty() {
                raw.id.clone()
            } else {
                raw.name
            };
            groups.push(MenuGroup {
                name,
                id: raw.id,
                items,
            });
        }
        Self::new(groups)
    }

    /// Every node in depth-first order, group by group.
    pub fn nodes(&self) -> Vec<&MenuNode> {
        let mut out = Vec::new();
        for group in &self.groups {
            collect(&group.items, &mut out);
        }
        out
    }

    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        self.nodes()
            .into_iter()
            .find(|node| node.kind != MenuNodeKind::Separator && node.id == id)
    }

    fn validate(&self) -> Result<(), MenuConfigError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.id.is_empty() {
                return Err(MenuConfigError::EmptyId { kind: "group" });
            }
            if !seen.insert(group.id.as_str()) {
                return Err(MenuConfigError::DuplicateId(group.id.clone()));
            }
        }
        for node in self.nodes() {
            if node.kind == MenuNodeKind::Separator {
                continue;
            }
            if node.id.is_empty() {
                return Err(MenuConfigError::EmptyId {
                    kind: node.kind.as_str(),
                });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(MenuConfigError::DuplicateId(node.id.clone()));
            }
        }
        Ok(())
    }
}

fn collect<'a>(nodes: &'a [MenuNode], out: &mut Vec<&'a MenuNode>) {
    for node in nodes {
        out.push(node);
        collect(&node.children, out);
    }
}
