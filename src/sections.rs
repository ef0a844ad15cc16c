/// Minimal view of a hierarchical section layout: a name plus ordered
/// children. Resolvers only need this, not a concrete module representation.
pub trait SectionTree: Sized {
    fn name(&self) -> &str;
    fn children(&self) -> &[Self];
}

/// Walk `root` along a `.`-separated path, requiring an exact name match at
/// every level. Returns `None` on an empty path or any unmatched component.
pub fn resolve<'a, T: SectionTree>(root: &'a T, path: &str) -> Option<&'a T> {
    if path.is_empty() {
        return None;
    }
    let mut node = root;
    for component in path.split('.') {
        node = node.children().iter().find(|c| c.name() == component)?;
    }
    Some(node)
}

/// Legacy resolver with loose matching, kept behind an explicit compat flag.
///
/// Components match sibling names by substring containment, first match in
/// iteration order wins, and a child whose name also contains the *last*
/// component is returned early. An unmatched component leaves the current
/// node unchanged, so the result can be a node unrelated to the requested
/// path; in particular a path matching nothing resolves to `root` itself.
pub fn resolve_compat<'a, T: SectionTree>(root: &'a T, path: &str) -> Option<&'a T> {
    if path.is_empty() {
        return None;
    }
    let components: Vec<&str> = path.split('.').collect();
    let last = components[components.len() - 1];

    let mut node = root;
    if let Some(child) = root.children().iter().find(|c| c.name() == components[0]) {
        if child.name() == path {
            return Some(child);
        }
        node = child;
    }
    for &component in &components {
        if let Some(child) = node.children().iter().find(|c| c.name().contains(component)) {
            if child.name().contains(last) {
                return Some(child);
            }
            node = child;
        }
    }
    Some(node)
}

/// A named region of a module's layout, nested by dotted-name components.
#[derive(Debug, Default)]
pub struct SectionNode {
    pub name: String,
    pub addr: u64,
    pub size: u64,
    pub data: Vec<u8>,
    pub children: Vec<SectionNode>,
}

impl SectionTree for SectionNode {
    fn name(&self) -> &str {
        &self.name
    }
    fn children(&self) -> &[Self] {
        &self.children
    }
}

impl SectionNode {
    /// Insert a section at the dotted path formed by `components`, creating
    /// empty intermediate nodes as needed. Sibling order is insertion order.
    /// Two sections reducing to the same path (duplicate names are legal in
    /// relocatable objects) share one node: the later insert overwrites the
    /// earlier addr/size/data in place, children are kept.
    pub fn insert(&mut self, components: &[&str], addr: u64, size: u64, data: Vec<u8>) {
        let Some((head, rest)) = components.split_first() else {
            self.addr = addr;
            self.size = size;
            self.data = data;
            return;
        };
        let child = match self.children.iter_mut().position(|c| c.name == *head) {
            Some(i) => &mut self.children[i],
            None => {
                self.children.push(SectionNode {
                    name: head.to_string(),
                    ..Default::default()
                });
                self.children.last_mut().unwrap()
            }
        };
        child.insert(rest, addr, size, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, children: Vec<SectionNode>) -> SectionNode {
        SectionNode {
            name: name.to_string(),
            children,
            ..Default::default()
        }
    }

    fn macho_like_root() -> SectionNode {
        node(
            "",
            vec![node("__TEXT", vec![node("__cstring", vec![])])],
        )
    }

    #[test]
    fn empty_path_is_none() {
        let root = macho_like_root();
        assert!(resolve(&root, "").is_none());
        assert!(resolve_compat(&root, "").is_none());
    }

    #[test]
    fn exact_two_level_lookup() {
        let root = macho_like_root();
        let found = resolve(&root, "__TEXT.__cstring").unwrap();
        assert_eq!(found.name, "__cstring");
        let found = resolve_compat(&root, "__TEXT.__cstring").unwrap();
        assert_eq!(found.name, "__cstring");
    }

    #[test]
    fn exact_requires_full_component_match() {
        let root = macho_like_root();
        assert!(resolve(&root, "TEXT").is_none());
        assert!(resolve(&root, "__TEXT.cstring").is_none());
    }

    #[test]
    fn exact_missing_is_none() {
        let root = macho_like_root();
        assert!(resolve(&root, "nonexistent").is_none());
    }

    #[test]
    fn compat_missing_falls_back_to_root() {
        let root = macho_like_root();
        let found = resolve_compat(&root, "nonexistent").unwrap();
        assert!(std::ptr::eq(found, &root));
    }

    #[test]
    fn compat_matches_by_containment() {
        let root = macho_like_root();
        let found = resolve_compat(&root, "TEXT.cstring").unwrap();
        assert_eq!(found.name, "__cstring");
    }

    #[test]
    fn compat_whole_path_shortcut() {
        let root = macho_like_root();
        let found = resolve_compat(&root, "__TEXT").unwrap();
        assert_eq!(found.name, "__TEXT");
    }

    #[test]
    fn compat_first_sibling_match_wins() {
        let root = node(
            "",
            vec![node(
                "seg",
                vec![node("data_first", vec![]), node("data_second", vec![])],
            )],
        );
        let found = resolve_compat(&root, "seg.data").unwrap();
        assert_eq!(found.name, "data_first");
    }

    #[test]
    fn compat_short_circuits_on_last_component() {
        // "data_and_tail" contains both "data" and "tail", so the walk
        // returns it before ever looking for a third level.
        let root = node("", vec![node("seg", vec![node("data_and_tail", vec![])])]);
        let found = resolve_compat(&root, "seg.data.tail").unwrap();
        assert_eq!(found.name, "data_and_tail");
    }

    #[test]
    fn compat_unmatched_component_keeps_node() {
        let root = macho_like_root();
        let found = resolve_compat(&root, "bogus.__nosuch").unwrap();
        assert!(std::ptr::eq(found, &root));
    }

    #[test]
    fn insert_duplicate_path_overwrites_in_place() {
        let mut root = SectionNode::default();
        root.insert(&["text"], 0x1000, 16, vec![0x90; 16]);
        root.insert(&["text", "unlikely"], 0x2000, 4, vec![0xcc; 4]);
        root.insert(&["text"], 0x5000, 8, vec![0xf4; 8]);

        assert_eq!(root.children.len(), 1);
        let text = resolve(&root, "text").unwrap();
        assert_eq!(text.addr, 0x5000);
        assert_eq!(text.size, 8);
        assert_eq!(text.data, vec![0xf4; 8]);
        assert_eq!(resolve(&root, "text.unlikely").unwrap().addr, 0x2000);
    }

    #[test]
    fn insert_builds_dotted_hierarchy() {
        let mut root = SectionNode::default();
        root.insert(&["text"], 0x1000, 16, vec![0x90; 16]);
        root.insert(&["text", "unlikely"], 0x2000, 4, vec![0xcc; 4]);
        root.insert(&["rodata"], 0x3000, 2, b"a\0".to_vec());

        let found = resolve(&root, "text.unlikely").unwrap();
        assert_eq!(found.addr, 0x2000);
        assert_eq!(found.size, 4);

        let text = resolve(&root, "text").unwrap();
        assert_eq!(text.addr, 0x1000);
        assert_eq!(text.children.len(), 1);
    }
}
