use log::trace;

use super::{ListElement, SchemaKind, SchemaNode};
use crate::error::Result;
use crate::{Compound, TagList, TagNode, TagType};

/// What was wrong with one branch of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// A required child is not there.
    Missing,
    /// The node, or a list's element type, is not castable to what the
    /// schema expects.
    WrongType { expected: TagType, found: TagType },
    /// An array or list has the wrong number of elements.
    WrongLength { expected: usize, found: usize },
    /// A string does not have its expected value.
    WrongValue { expected: String, found: String },
    StringTooLong { max: usize, found: usize },
}

/// One finding, located by a `/` separated path from the verified compound.
/// List elements appear as `name[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: String,
    pub kind: IssueKind,
    /// Set when [`repair`] fixed this issue in place.
    pub repaired: bool,
}

/// Everything found while verifying or repairing a tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    /// True when no unresolved issue remains.
    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(|issue| issue.repaired)
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.repaired)
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    fn push(&mut self, path: &str, kind: IssueKind, repaired: bool) {
        self.issues.push(Issue {
            path: path.to_owned(),
            kind,
            repaired,
        });
    }
}

/// Check `compound` against a compound schema. Every branch is checked;
/// a mismatch in one child does not stop the others from being looked at.
///
/// A present child passes its type check if it is castable to the schema
/// type, so a Byte satisfies an Int schema. List element types are stricter:
/// a non-empty list must already have exactly the schema's element type.
/// A missing child fails unless its schema node is optional. Children the
/// schema does not mention are ignored.
pub fn verify(schema: &SchemaNode, compound: &Compound) -> Report {
    let mut report = Report::default();
    match schema.kind() {
        SchemaKind::Compound { children } => check_compound("", children, compound, &mut report),
        other => report.push(
            "",
            IssueKind::WrongType {
                expected: other.tag_type(),
                found: TagType::Compound,
            },
            false,
        ),
    }
    report
}

/// Like [`verify`], but first fixes what can be fixed:
///
/// * missing children marked `CREATE_ON_MISSING` are filled with their
///   schema's default tree,
/// * scalars of a castable type are widened to the exact schema type, and
/// * lists whose elements are all castable are rebuilt with the schema's
///   element type.
///
/// Fixed issues are reported with `repaired` set; anything left over is
/// reported as by [`verify`].
pub fn repair(schema: &SchemaNode, compound: &mut Compound) -> Report {
    let mut report = Report::default();
    if let SchemaKind::Compound { children } = schema.kind() {
        fix_compound("", children, compound, &mut report);
    }

    let remaining = verify(schema, compound);
    report.issues.extend(remaining.issues);
    report
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{}/{}", path, name)
    }
}

fn check_compound(path: &str, children: &[SchemaNode], compound: &Compound, report: &mut Report) {
    for child in children {
        let child_path = join(path, child.name());
        match compound.get(child.name()) {
            Some(node) => check_node(&child_path, child.kind(), node, report),
            None if child.is_required() => report.push(&child_path, IssueKind::Missing, false),
            None => {}
        }
    }
}

fn check_node(path: &str, kind: &SchemaKind, node: &TagNode, report: &mut Report) {
    let expected = kind.tag_type();
    if !node.is_castable_to(expected) {
        report.push(
            path,
            IssueKind::WrongType {
                expected,
                found: node.tag_type(),
            },
            false,
        );
        return;
    }

    match (kind, node) {
        (SchemaKind::String { value, max_length }, TagNode::String(s)) => {
            if let Some(value) = value {
                if value != s {
                    report.push(
                        path,
                        IssueKind::WrongValue {
                            expected: value.clone(),
                            found: s.clone(),
                        },
                        false,
                    );
                }
            }
            if *max_length > 0 && s.len() > *max_length {
                report.push(
                    path,
                    IssueKind::StringTooLong {
                        max: *max_length,
                        found: s.len(),
                    },
                    false,
                );
            }
        }
        (SchemaKind::ByteArray { length }, TagNode::ByteArray(a)) => check_length(path, *length, a.len(), report),
        (SchemaKind::ShortArray { length }, TagNode::ShortArray(a)) => check_length(path, *length, a.len(), report),
        (SchemaKind::IntArray { length }, TagNode::IntArray(a)) => check_length(path, *length, a.len(), report),
        (SchemaKind::LongArray { length }, TagNode::LongArray(a)) => check_length(path, *length, a.len(), report),
        (SchemaKind::List { length, element }, TagNode::List(list)) => {
            check_list(path, *length, element, list, report)
        }
        (SchemaKind::Compound { children }, TagNode::Compound(compound)) => {
            check_compound(path, children, compound, report)
        }
        // Scalars only have their type to check.
        _ => {}
    }
}

fn check_list(path: &str, length: usize, element: &ListElement, list: &TagList, report: &mut Report) {
    let value_type = element.tag_type();
    // Empty lists are often written with an End element type, so an empty
    // list matches any element type.
    if !list.is_empty() && list.value_type() != value_type {
        report.push(
            path,
            IssueKind::WrongType {
                expected: value_type,
                found: list.value_type(),
            },
            false,
        );
        return;
    }

    check_length(path, length, list.len(), report);

    if let ListElement::Shape(kind) = element {
        for (i, node) in list.iter().enumerate() {
            check_node(&format!("{}[{}]", path, i), kind, node, report);
        }
    }
}

fn check_length(path: &str, expected: usize, found: usize, report: &mut Report) {
    if expected > 0 && expected != found {
        report.push(path, IssueKind::WrongLength { expected, found }, false);
    }
}

fn fix_compound(path: &str, children: &[SchemaNode], compound: &mut Compound, report: &mut Report) {
    for child in children {
        let child_path = join(path, child.name());
        match compound.get_mut(child.name()) {
            Some(node) => fix_node(&child_path, child.kind(), node, report),
            None if child.creates_on_missing() => {
                trace!("{}: missing, filled with default", child_path);
                compound.insert(child.name().to_owned(), child.build_default_tree());
                report.push(&child_path, IssueKind::Missing, true);
            }
            None => {}
        }
    }
}

fn fix_node(path: &str, kind: &SchemaKind, node: &mut TagNode, report: &mut Report) {
    let expected = kind.tag_type();
    let found = node.tag_type();
    if found != expected {
        if let Ok(widened) = node.to_tag(expected) {
            trace!("{}: widened {:?} to {:?}", path, found, expected);
            *node = widened;
            report.push(path, IssueKind::WrongType { expected, found }, true);
        }
        return;
    }

    match (kind, node) {
        (SchemaKind::Compound { children }, TagNode::Compound(compound)) => {
            fix_compound(path, children, compound, report)
        }
        (SchemaKind::List { element, .. }, TagNode::List(list)) => fix_list(path, element, list, report),
        _ => {}
    }
}

fn fix_list(path: &str, element: &ListElement, list: &mut TagList, report: &mut Report) {
    let expected = element.tag_type();
    let found = list.value_type();
    if !list.is_empty() && found != expected {
        match widen_list(list, expected) {
            Ok(widened) => {
                trace!("{}: widened list of {:?} to {:?}", path, found, expected);
                *list = widened;
                report.push(path, IssueKind::WrongType { expected, found }, true);
            }
            Err(_) => return,
        }
    }

    let kind = match element {
        ListElement::Shape(kind) => kind,
        ListElement::Type(_) => return,
    };
    for (i, mut node) in list.iter_mut().enumerate() {
        let node_path = format!("{}[{}]", path, i);
        match kind.as_ref() {
            SchemaKind::Compound { children } => {
                if let Some(compound) = node.as_compound_mut() {
                    fix_compound(&node_path, children, compound, report);
                }
            }
            SchemaKind::List { element, .. } => {
                if let Some(inner) = node.as_list_mut() {
                    fix_list(&node_path, element, inner, report);
                }
            }
            _ => {}
        }
    }
}

fn widen_list(list: &TagList, value_type: TagType) -> Result<TagList> {
    let nodes = list
        .iter()
        .map(|node| node.to_tag(value_type))
        .collect::<Result<Vec<_>>>()?;
    TagList::from_nodes(value_type, nodes)
}
