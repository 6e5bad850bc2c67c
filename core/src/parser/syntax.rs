//! # Go Syntax Access
//!
//! Thin helpers over the `tree-sitter-go` concrete syntax tree: parsing,
//! walking top-level struct declarations, and reading field names, tags and
//! documentation comments.

use crate::error::{AppError, AppResult};
use tree_sitter::{Node, Parser, Tree};

/// Parses Go source, rejecting any tree that contains syntax errors.
pub fn parse_go(source: &[u8]) -> AppResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| AppError::General(format!("Failed to set Go language: {:?}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AppError::Parse("Failed to parse Go source code".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root)
            .map(|n| {
                let pos = n.start_position();
                format!("{}:{}", pos.row + 1, pos.column + 1)
            })
            .unwrap_or_else(|| "unknown position".into());
        return Err(AppError::Parse(format!("syntax error at {}", at)));
    }

    Ok(tree)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

/// A top-level `type Name struct { ... }` declaration.
#[derive(Debug, Clone, Copy)]
pub struct StructSpec<'t> {
    /// The `type_spec` node.
    pub spec: Node<'t>,
    /// The `field_declaration_list` node.
    pub fields: Node<'t>,
}

impl<'t> StructSpec<'t> {
    /// Declared type name.
    pub fn name<'s>(&self, source: &'s [u8]) -> Option<&'s str> {
        self.spec
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
    }

    /// Field declarations in source order.
    pub fn field_declarations(&self) -> Vec<Node<'t>> {
        let mut cursor = self.fields.walk();
        self.fields
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "field_declaration")
            .collect()
    }
}

/// Every top-level type spec whose underlying type is a struct, in source order.
///
/// Grouped declarations (`type ( A struct{}; B struct{} )`) yield each spec.
pub fn struct_specs(tree: &Tree) -> Vec<StructSpec<'_>> {
    let root = tree.root_node();
    let mut specs = Vec::new();

    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        if decl.kind() != "type_declaration" {
            continue;
        }
        let mut decl_cursor = decl.walk();
        for spec in decl.named_children(&mut decl_cursor) {
            if spec.kind() != "type_spec" {
                continue;
            }
            let Some(ty) = spec.child_by_field_name("type") else {
                continue;
            };
            if ty.kind() != "struct_type" {
                continue;
            }
            let mut ty_cursor = ty.walk();
            let list = ty
                .named_children(&mut ty_cursor)
                .find(|n| n.kind() == "field_declaration_list");
            if let Some(fields) = list {
                specs.push(StructSpec { spec, fields });
            }
        }
    }

    specs
}

/// First declared name of a field; `None` for embedded fields.
pub fn field_name<'s>(field: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    field
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok())
}

/// The field's raw string tag with backticks stripped.
///
/// Interpreted (double-quoted) tags and untagged fields return `None`.
pub fn raw_tag<'s>(field: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    let tag = field.child_by_field_name("tag")?;
    if tag.kind() != "raw_string_literal" {
        return None;
    }
    let text = tag.utf8_text(source).ok()?;
    text.strip_prefix('`')?.strip_suffix('`')
}

/// The doc comment lines attached to a field, top to bottom.
///
/// A comment belongs to the doc block when it ends on the line directly above
/// the next line of the block and does not trail another token on its own line.
pub fn doc_comments<'s>(field: Node<'_>, source: &'s [u8]) -> Vec<&'s str> {
    let mut docs = Vec::new();
    let mut next_row = field.start_position().row;
    let mut current = field.prev_named_sibling();

    while let Some(node) = current {
        if node.kind() != "comment" || node.end_position().row + 1 != next_row {
            break;
        }

        let anchor_row = match node.prev_named_sibling() {
            Some(prev) if prev.kind() == "comment" => None,
            Some(prev) => Some(prev.end_position().row),
            None => node.parent().map(|p| p.start_position().row),
        };
        if anchor_row == Some(node.start_position().row) {
            break;
        }

        if let Ok(text) = node.utf8_text(source) {
            docs.push(text);
        }
        next_row = node.start_position().row;
        current = node.prev_named_sibling();
    }

    docs.reverse();
    docs
}
