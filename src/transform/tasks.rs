//! Standard and custom task list items.
//!
//! Both `- [x] done` (checked state from the base grammar) and the custom
//! markers `- [!]`, `- [?]`, `- [>]` end up in one shape: a class list on the
//! item and an inlined, disabled checkbox. The base grammar's checked state is
//! cleared afterwards so the serializer never emits a second checkbox.

use crate::ast::{ClassList, ListItem, Node};
use crate::scan::{task_marker, TaskMarker};
use crate::transform::Pass;
use crate::visit::walk_mut;

/// Class present on every task item.
pub const TASK_CLASS: &str = "task-list-item";

/// Class present on items with a custom marker.
pub const CUSTOM_TASK_CLASS: &str = "custom-task";

/// Normalizes task list items.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskMarkers;

impl TaskMarkers {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for TaskMarkers {
    fn name(&self) -> &'static str {
        "task-markers"
    }

    fn run(&self, tree: &mut Node) -> usize {
        let mut normalized = 0;
        walk_mut(tree, &mut |node| {
            if let Node::ListItem(item) = node {
                if normalize(item) {
                    normalized += 1;
                }
            }
        });
        normalized
    }
}

/// Raw markup for a disabled checkbox.
pub fn checkbox_markup(checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!("<input type=\"checkbox\" disabled{checked}> ")
}

/// Rewrite one item. Returns false if it is not a task.
fn normalize(item: &mut ListItem) -> bool {
    let standard = item.checked.is_some();
    let custom = strip_marker(item);

    if !standard && custom.is_none() {
        return false;
    }

    let mut classes: ClassList = [TASK_CLASS].into_iter().collect();
    if let Some(marker) = custom {
        classes.push(CUSTOM_TASK_CLASS);
        classes.push(marker.class_name());
    }
    item.hint.get_or_insert_with(Default::default).properties.class = classes;

    // A custom marker carries no checked state.
    let checked = custom.is_none() && item.checked == Some(true);

    if matches!(item.children.first(), Some(Node::Paragraph(_))) {
        let rest = item.children.split_off(1);
        if let Some(Node::Paragraph(first)) = item.children.pop() {
            let mut children = Vec::with_capacity(1 + first.children.len() + rest.len());
            children.push(Node::Html(checkbox_markup(checked)));
            children.extend(first.children);
            children.extend(rest);
            item.children = children;
        }
    }

    item.checked = None;
    true
}

/// Remove a leading custom marker from the item's first text run.
fn strip_marker(item: &mut ListItem) -> Option<TaskMarker> {
    let Some(Node::Paragraph(paragraph)) = item.children.first_mut() else {
        return None;
    };
    let Some(Node::Text(text)) = paragraph.children.first_mut() else {
        return None;
    };

    let (rest, marker) = task_marker(text).ok()?;
    *text = rest.to_string();
    Some(marker)
}
