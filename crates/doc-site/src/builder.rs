//! Build-time construction of the search index.
//!
//! Type-level items (classes, structs, enums, builtins) have their own page,
//! `<kind>.<QualifiedName>.html`; everything declared inside a type links to an
//! anchor on that page, `#<kind>.<name>`. Global constants live on the index
//! page.

use crate::model::{SearchEntry, SearchIndex, SearchKind};

/// Page file name prefix for a type kind.
fn page_prefix(kind: SearchKind) -> Option<&'static str> {
    match kind {
        SearchKind::Class => Some("class"),
        SearchKind::Struct => Some("struct"),
        SearchKind::Enum => Some("enum"),
        SearchKind::Builtin => Some("builtin"),
        _ => None,
    }
}

/// Page of a type-level item, e.g. `class.Actor.html`.
pub fn type_page(kind: SearchKind, qualified_name: &str) -> Option<String> {
    page_prefix(kind).map(|prefix| format!("{prefix}.{qualified_name}.html"))
}

/// Split `Outer.Inner` into (`"Outer."`, `"Inner"`).
fn split_qualified(qualified_name: &str) -> (String, String) {
    match qualified_name.rsplit_once('.') {
        Some((prelude, name)) => (format!("{prelude}."), name.to_string()),
        None => (String::new(), qualified_name.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    entries: Vec<SearchEntry>,
}

impl SearchIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant declared at the top level.
    pub fn global_constant(&mut self, name: &str, desc: impl Into<String>) -> &mut Self {
        self.entries.push(SearchEntry {
            name_prelude: String::new(),
            name: name.to_string(),
            link: format!("index.html#constant.{name}"),
            desc: desc.into(),
            kind: SearchKind::Constant,
        });
        self
    }

    /// A type with its own page. `qualified_name` is dotted for nested types
    /// (`Actor.State`). Returns `None` for kinds that do not get a page.
    pub fn type_item(
        &mut self,
        kind: SearchKind,
        qualified_name: &str,
        desc: impl Into<String>,
    ) -> Option<TypeScope<'_>> {
        let page = type_page(kind, qualified_name)?;
        let (name_prelude, name) = split_qualified(qualified_name);
        self.entries.push(SearchEntry {
            name_prelude,
            name,
            link: page.clone(),
            desc: desc.into(),
            kind,
        });
        Some(TypeScope {
            builder: self,
            qualified_name: qualified_name.to_string(),
            page,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> SearchIndex {
        SearchIndex::new(self.entries)
    }
}

/// Adds the items declared inside one type.
pub struct TypeScope<'a> {
    builder: &'a mut SearchIndexBuilder,
    qualified_name: String,
    page: String,
}

impl TypeScope<'_> {
    pub fn function(&mut self, name: &str, desc: impl Into<String>) -> &mut Self {
        self.push(SearchKind::Function, "function", name, desc.into())
    }

    pub fn member(&mut self, name: &str, desc: impl Into<String>) -> &mut Self {
        self.push(SearchKind::Member, "member", name, desc.into())
    }

    pub fn constant(&mut self, name: &str, desc: impl Into<String>) -> &mut Self {
        self.push(SearchKind::Constant, "constant", name, desc.into())
    }

    pub fn enumerator(&mut self, name: &str, desc: impl Into<String>) -> &mut Self {
        self.push(SearchKind::Enumerator, "enumerator", name, desc.into())
    }

    fn push(&mut self, kind: SearchKind, anchor: &str, name: &str, desc: String) -> &mut Self {
        self.builder.entries.push(SearchEntry {
            name_prelude: format!("{}.", self.qualified_name),
            name: name.to_string(),
            link: format!("{}#{anchor}.{name}", self.page),
            desc,
            kind,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_with_members() {
        let mut builder = SearchIndexBuilder::new();
        builder
            .type_item(SearchKind::Class, "Actor", "<p>Base class.</p>")
            .unwrap()
            .function("Tick", "")
            .member("health", "")
            .constant("MAX_HEALTH", "");
        let index = builder.finish();

        let links: Vec<_> = index.entries.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "class.Actor.html",
                "class.Actor.html#function.Tick",
                "class.Actor.html#member.health",
                "class.Actor.html#constant.MAX_HEALTH",
            ]
        );
        assert_eq!(index.entries[0].name_prelude, "");
        assert_eq!(index.entries[1].name_prelude, "Actor.");
        assert_eq!(index.entries[1].kind, SearchKind::Function);
    }

    #[test]
    fn nested_type_splits_prelude() {
        let mut builder = SearchIndexBuilder::new();
        builder
            .type_item(SearchKind::Enum, "Actor.State", "")
            .unwrap()
            .enumerator("Idle", "");
        let index = builder.finish();
        assert_eq!(index.entries[0].name_prelude, "Actor.");
        assert_eq!(index.entries[0].name, "State");
        assert_eq!(index.entries[0].link, "enum.Actor.State.html");
        assert_eq!(index.entries[1].name_prelude, "Actor.State.");
        assert_eq!(index.entries[1].link, "enum.Actor.State.html#enumerator.Idle");
    }

    #[test]
    fn global_constants_link_to_index() {
        let mut builder = SearchIndexBuilder::new();
        builder.global_constant("MAX_PLAYERS", "");
        assert_eq!(builder.len(), 1);
        let index = builder.finish();
        assert_eq!(index.entries[0].link, "index.html#constant.MAX_PLAYERS");
    }

    #[test]
    fn non_type_kinds_have_no_page() {
        let mut builder = SearchIndexBuilder::new();
        assert!(builder.type_item(SearchKind::Function, "f", "").is_none());
        assert!(builder.is_empty());
    }
}
