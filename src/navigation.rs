//! Hierarchy navigation: Root → Category → Editor and back, one level at a time.

use crate::error::NavigationError;
use crate::model::{NodeId, NodeSet};

/// Which ring of the hierarchy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchyLevel {
    /// All top-level categories on the sphere
    #[default]
    Root,
    /// One category selected; its subcategories are on the sphere
    Category,
    /// One subcategory selected for editing
    Editor,
}

impl HierarchyLevel {
    pub fn name(self) -> &'static str {
        match self {
            HierarchyLevel::Root => "root",
            HierarchyLevel::Category => "category",
            HierarchyLevel::Editor => "editor",
        }
    }
}

/// Navigation state. The active ids always match the level:
/// Root has neither, Category has a category, Editor has both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    level: HierarchyLevel,
    category: Option<NodeId>,
    subcategory: Option<NodeId>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> HierarchyLevel {
        self.level
    }

    pub fn active_category(&self) -> Option<&NodeId> {
        self.category.as_ref()
    }

    pub fn active_subcategory(&self) -> Option<&NodeId> {
        self.subcategory.as_ref()
    }

    /// The node the camera should hover over, if any.
    pub fn active_node(&self) -> Option<&NodeId> {
        match self.level {
            HierarchyLevel::Root => None,
            HierarchyLevel::Category => self.category.as_ref(),
            HierarchyLevel::Editor => self.subcategory.as_ref(),
        }
    }

    /// Root → Category.
    pub fn enter_category(&mut self, nodes: &NodeSet, id: &NodeId) -> Result<(), NavigationError> {
        if self.level != HierarchyLevel::Root {
            return Err(NavigationError::WrongLevel {
                from: self.level.name(),
                wanted: HierarchyLevel::Category.name(),
            });
        }
        nodes.category(id)?;
        log::info!("navigate: root -> category {id}");
        self.level = HierarchyLevel::Category;
        self.category = Some(id.clone());
        Ok(())
    }

    /// Category → Editor. `id` must be a child of the active category.
    pub fn enter_editor(&mut self, nodes: &NodeSet, id: &NodeId) -> Result<(), NavigationError> {
        if self.level != HierarchyLevel::Category {
            return Err(NavigationError::WrongLevel {
                from: self.level.name(),
                wanted: HierarchyLevel::Editor.name(),
            });
        }
        let node = nodes
            .get(id)
            .ok_or_else(|| NavigationError::UnknownNode(id.0.clone()))?;
        if node.parent.as_ref() != self.category.as_ref() {
            return Err(NavigationError::NotAChild { id: id.0.clone() });
        }
        log::info!("navigate: category -> editor {id}");
        self.level = HierarchyLevel::Editor;
        self.subcategory = Some(id.clone());
        Ok(())
    }

    /// Up one level. Returns false at Root.
    pub fn back(&mut self) -> bool {
        match self.level {
            HierarchyLevel::Root => false,
            HierarchyLevel::Category => {
                log::info!("navigate: category -> root");
                self.level = HierarchyLevel::Root;
                self.category = None;
                true
            }
            HierarchyLevel::Editor => {
                log::info!("navigate: editor -> category");
                self.level = HierarchyLevel::Category;
                self.subcategory = None;
                true
            }
        }
    }

    /// Drop levels whose active node vanished from `nodes` (e.g. deleted).
    /// Returns true if the level changed.
    pub fn prune(&mut self, nodes: &NodeSet) -> bool {
        let before = self.level;
        if self.level == HierarchyLevel::Editor
            && !self.subcategory.as_ref().is_some_and(|id| {
                nodes
                    .get(id)
                    .is_some_and(|n| n.parent.as_ref() == self.category.as_ref())
            })
        {
            self.back();
        }
        if self.level == HierarchyLevel::Category
            && !self.category.as_ref().is_some_and(|id| nodes.category(id).is_ok())
        {
            self.back();
        }
        if before != self.level {
            log::debug!("navigate: pruned {} -> {}", before.name(), self.level.name());
        }
        before != self.level
    }

    /// Breadcrumb trail for the current position.
    pub fn breadcrumbs(&self, nodes: &NodeSet) -> Vec<Crumb> {
        let mut trail = vec![Crumb {
            label: "Universe".to_owned(),
            level: HierarchyLevel::Root,
            color: None,
            current: self.level == HierarchyLevel::Root,
        }];
        if let Some(cat) = self.category.as_ref().and_then(|id| nodes.get(id)) {
            trail.push(Crumb {
                label: cat.name.clone(),
                level: HierarchyLevel::Category,
                color: Some(cat.color),
                current: self.level == HierarchyLevel::Category,
            });
        }
        if let Some(sub) = self.subcategory.as_ref().and_then(|id| nodes.get(id)) {
            trail.push(Crumb {
                label: sub.name.clone(),
                level: HierarchyLevel::Editor,
                color: None,
                current: self.level == HierarchyLevel::Editor,
            });
        }
        trail
    }

    /// Climb until `level` is reached. No-op when already at or above it.
    pub fn go_to(&mut self, level: HierarchyLevel) {
        while depth(self.level) > depth(level) && self.back() {}
    }
}

fn depth(level: HierarchyLevel) -> u8 {
    match level {
        HierarchyLevel::Root => 0,
        HierarchyLevel::Category => 1,
        HierarchyLevel::Editor => 2,
    }
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub level: HierarchyLevel,
    pub color: Option<crate::color::Rgba>,
    pub current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::node;

    fn set() -> NodeSet {
        NodeSet::new(vec![
            node("work", None),
            node("home", None),
            node("meet", Some("work")),
            node("garden", Some("home")),
        ])
        .unwrap()
    }

    #[test]
    fn walks_down_and_back_up() {
        let nodes = set();
        let mut nav = Navigation::new();
        assert_eq!(nav.active_node(), None);

        nav.enter_category(&nodes, &NodeId::from("work")).unwrap();
        assert_eq!(nav.level(), HierarchyLevel::Category);
        assert_eq!(nav.active_node(), Some(&NodeId::from("work")));

        nav.enter_editor(&nodes, &NodeId::from("meet")).unwrap();
        assert_eq!(nav.level(), HierarchyLevel::Editor);
        assert_eq!(nav.active_node(), Some(&NodeId::from("meet")));

        assert!(nav.back());
        assert_eq!(nav.level(), HierarchyLevel::Category);
        assert_eq!(nav.active_subcategory(), None);
        assert!(nav.back());
        assert_eq!(nav.level(), HierarchyLevel::Root);
        assert!(!nav.back());
    }

    #[test]
    fn refuses_to_skip_levels() {
        let nodes = set();
        let mut nav = Navigation::new();
        assert!(matches!(
            nav.enter_editor(&nodes, &NodeId::from("meet")),
            Err(NavigationError::WrongLevel { .. })
        ));
        assert!(matches!(
            nav.enter_category(&nodes, &NodeId::from("meet")),
            Err(NavigationError::NotACategory(_))
        ));
        nav.enter_category(&nodes, &NodeId::from("work")).unwrap();
        assert!(matches!(
            nav.enter_editor(&nodes, &NodeId::from("garden")),
            Err(NavigationError::NotAChild { .. })
        ));
        assert!(matches!(
            nav.enter_category(&nodes, &NodeId::from("home")),
            Err(NavigationError::WrongLevel { .. })
        ));
        assert_eq!(nav.level(), HierarchyLevel::Category);
    }

    #[test]
    fn prune_falls_back_when_active_node_disappears() {
        let nodes = set();
        let mut nav = Navigation::new();
        nav.enter_category(&nodes, &NodeId::from("work")).unwrap();
        nav.enter_editor(&nodes, &NodeId::from("meet")).unwrap();

        let without_sub = NodeSet::new(vec![node("work", None)]).unwrap();
        assert!(nav.prune(&without_sub));
        assert_eq!(nav.level(), HierarchyLevel::Category);

        let empty = NodeSet::default();
        assert!(nav.prune(&empty));
        assert_eq!(nav.level(), HierarchyLevel::Root);
        assert!(!nav.prune(&empty));
    }

    #[test]
    fn prune_leaves_editor_when_subcategory_moves() {
        let nodes = set();
        let mut nav = Navigation::new();
        nav.enter_category(&nodes, &NodeId::from("work")).unwrap();
        nav.enter_editor(&nodes, &NodeId::from("meet")).unwrap();

        let moved = NodeSet::new(vec![
            node("work", None),
            node("home", None),
            node("meet", Some("home")),
        ])
        .unwrap();
        assert!(nav.prune(&moved));
        assert_eq!(nav.level(), HierarchyLevel::Category);
        assert_eq!(nav.active_category(), Some(&NodeId::from("work")));
        assert_eq!(nav.active_subcategory(), None);
        let labels: Vec<_> = nav.breadcrumbs(&moved).iter().map(|c| c.label.clone()).collect();
        assert_eq!(labels, ["Universe", "WORK"]);
    }

    #[test]
    fn breadcrumbs_follow_depth() {
        let nodes = set();
        let mut nav = Navigation::new();
        let root = nav.breadcrumbs(&nodes);
        assert_eq!(root.len(), 1);
        assert!(root[0].current);

        nav.enter_category(&nodes, &NodeId::from("work")).unwrap();
        nav.enter_editor(&nodes, &NodeId::from("meet")).unwrap();
        let trail = nav.breadcrumbs(&nodes);
        let labels: Vec<_> = trail.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Universe", "WORK", "MEET"]);
        assert!(trail[2].current && !trail[1].current);

        nav.go_to(HierarchyLevel::Root);
        assert_eq!(nav.level(), HierarchyLevel::Root);
    }
}
