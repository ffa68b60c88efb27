//! Documentation for a selected suggestion.
//!
//! Output is a small HTML fragment:
//!
//! ```text
//! <b>app.color</b> (<a href="type://com.acme.Color"><code>com.acme.Color</code></a>)<p>Palette colors.</p>
//! ```
//!
//! The type link and every paragraph are optional. A leaf whose type can no
//! longer be resolved renders only the bold path.

use crate::base::constants::TYPE_LINK_SCHEME;
use crate::tree::{
    ClassMetadata, Deprecation, DeprecationLevel, NodeKind, PathElement, PropertyNode, Suggestion,
    SuggestionKind, SuggestionNode, SuggestionTree,
};
use crate::types::TypeResolver;

/// Hyperlink to a type, rendered with its fully-qualified name.
pub fn type_hyperlink(fqn: &str) -> String {
    format!("<a href=\"{TYPE_LINK_SCHEME}{fqn}\"><code>{fqn}</code></a>")
}

/// Accumulates the fixed documentation template.
#[derive(Clone, Debug)]
pub struct DocumentationBuilder {
    content: String,
}

impl DocumentationBuilder {
    /// Start with the bolded navigation path.
    pub fn new(path: &str) -> Self {
        Self {
            content: format!("<b>{path}</b>"),
        }
    }

    /// Append ` (link)` when a type is known.
    pub fn with_type_link(mut self, fqn: Option<&str>) -> Self {
        if let Some(fqn) = fqn {
            self.content.push_str(" (");
            self.content.push_str(&type_hyperlink(fqn));
            self.content.push(')');
        }
        self
    }

    /// Append `<p>text</p>` when there is text.
    pub fn with_paragraph(mut self, text: Option<&str>) -> Self {
        if let Some(text) = text {
            self.content.push_str("<p>");
            self.content.push_str(text);
            self.content.push_str("</p>");
        }
        self
    }

    pub fn build(self) -> String {
        self.content
    }
}

/// Documentation for a key or value suggestion.
///
/// Returns `None` only when the suggestion does not point into `tree` (for
/// instance after the node was pruned).
pub fn documentation(tree: &SuggestionTree, resolver: &dyn TypeResolver, suggestion: &Suggestion) -> Option<String> {
    match suggestion.kind {
        SuggestionKind::Key => documentation_for_key(tree, resolver, suggestion),
        SuggestionKind::Value => documentation_for_value(tree, resolver, suggestion),
    }
}

/// Documentation for the key at the end of `suggestion.matched`.
pub fn documentation_for_key(
    tree: &SuggestionTree,
    resolver: &dyn TypeResolver,
    suggestion: &Suggestion,
) -> Option<String> {
    let path = suggestion.path_or_value.as_ref();
    match suggestion.matched.split_last()? {
        (PathElement::Node(id), _) => {
            let node = tree.get(*id)?;
            node.supports_documentation()
                .then(|| node_documentation(node, resolver, path))
        }
        (PathElement::Member(name), parents) => {
            let leaf = property_of(tree, parents.last()?)?.key_leaf()?;
            Some(member_documentation(leaf, resolver, path, name, false))
        }
    }
}

/// Documentation for the value in `suggestion.path_or_value`, shown under
/// the key path in `suggestion.matched`.
pub fn documentation_for_value(
    tree: &SuggestionTree,
    resolver: &dyn TypeResolver,
    suggestion: &Suggestion,
) -> Option<String> {
    let path = tree.dotted_original_names(&suggestion.matched);
    let leaf = property_of(tree, suggestion.matched.last()?)?.value_leaf()?;
    Some(member_documentation(leaf, resolver, &path, &suggestion.path_or_value, true))
}

fn property_of<'t>(tree: &'t SuggestionTree, element: &PathElement) -> Option<&'t PropertyNode> {
    match element {
        PathElement::Node(id) => tree.get(*id)?.as_property(),
        PathElement::Member(_) => None,
    }
}

fn node_documentation(node: &SuggestionNode, resolver: &dyn TypeResolver, path: &str) -> String {
    match node.kind() {
        NodeKind::Group(group) => DocumentationBuilder::new(path)
            .with_type_link(group.data().type_ref.as_ref().map(|t| t.as_str()))
            .with_paragraph(group.data().description.as_deref())
            .build(),
        NodeKind::Property(property) => property_documentation(property, resolver, path),
    }
}

fn property_documentation(property: &PropertyNode, resolver: &dyn TypeResolver, path: &str) -> String {
    let data = property.data();
    let declared = data.type_ref.as_ref().map(|t| t.as_str());
    let (fqn, type_doc) = match property.value_leaf() {
        Some(ClassMetadata::Enum(leaf)) => match leaf.type_info(resolver) {
            Some(info) => (Some(info.qualified_name.to_string()), info.documentation),
            // Enum type is gone: no link, no type documentation.
            None => (None, None),
        },
        Some(ClassMetadata::Boolean(_)) | None => (declared.map(str::to_string), None),
    };

    let description = data.description.as_deref().or(type_doc.as_deref());
    let default_value = data
        .default_value
        .as_deref()
        .map(|value| format!("Default value: <code>{value}</code>"));
    let deprecation = data.deprecation.as_ref().map(deprecation_notice);

    DocumentationBuilder::new(path)
        .with_type_link(fqn.as_deref())
        .with_paragraph(description)
        .with_paragraph(default_value.as_deref())
        .with_paragraph(deprecation.as_deref())
        .build()
}

fn deprecation_notice(deprecation: &Deprecation) -> String {
    let mut notice = match deprecation.level {
        DeprecationLevel::Warning => String::from("<b>Deprecated</b>"),
        DeprecationLevel::Error => String::from("<b>Deprecated (no longer supported)</b>"),
    };
    if let Some(reason) = &deprecation.reason {
        notice.push_str(": ");
        notice.push_str(reason);
    }
    if let Some(replacement) = &deprecation.replacement {
        notice.push_str(&format!(" Use <code>{replacement}</code> instead."));
    }
    notice
}

/// Documentation of a leaf member, as a map key (`app.palette.RED`) or as a
/// value (`RED` under `app.color`). Values also repeat the member name.
fn member_documentation(
    leaf: &ClassMetadata,
    resolver: &dyn TypeResolver,
    path: &str,
    name: &str,
    as_value: bool,
) -> String {
    let Some(info) = leaf.type_info(resolver) else {
        return DocumentationBuilder::new(path).build();
    };
    let member = leaf.member(resolver, name);

    let mut builder = DocumentationBuilder::new(path).with_type_link(Some(info.qualified_name.as_ref()));
    if as_value {
        builder = builder.with_paragraph(member.as_ref().map(|m| m.name.as_ref()));
    }
    builder
        .with_paragraph(member.as_ref().and_then(|m| m.documentation.as_deref()))
        .build()
}
