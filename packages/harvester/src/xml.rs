//! XML utility functions for navigating capabilities documents.
//!
//! The geoserver responds with namespaced OGC documents. The namespace table
//! below is the single process-wide registration used by every structural
//! query; prefixed path steps (`ows:Keyword`) resolve against it, unprefixed
//! steps match on local name alone.

use roxmltree::Node;

/// Namespace prefixes of the geoserver capabilities documents mapped to
/// their OGC namespace URIs.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("wfs", "http://www.opengis.net/wfs/2.0"),
    ("ows", "http://www.opengis.net/ows/1.1"),
    ("gml", "http://www.opengis.net/gml/3.2"),
    ("fes", "http://www.opengis.net/fes/2.0"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("xs", "http://www.w3.org/2001/XMLSchema"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
];

/// Resolve a namespace prefix against the fixed namespace table.
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

/// Get the tag name without namespace prefix.
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given local tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use geosync_harvester::xml::find_child;
///
/// let xml = r#"<root><child1/><child2/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "child1").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && local_name(*child) == tag)
}

/// Find all child elements with the given local tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && local_name(*child) == tag)
}

/// Get the text content of a node, trimmed.
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the text of the first direct child with the given local tag name.
///
/// The baseline lookup primitive of the entity model: returns an empty
/// string when the child is absent, never an error.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use geosync_harvester::xml::child_text;
///
/// let xml = r#"<FeatureType><Title>Percelen</Title></FeatureType>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert_eq!(child_text(doc.root_element(), "Title"), "Percelen");
/// assert_eq!(child_text(doc.root_element(), "Abstract"), "");
/// ```
pub fn child_text(node: Node<'_, '_>, tag: &str) -> String {
    find_child(node, tag).map(get_text).unwrap_or_default()
}

/// One step of a query path: optional namespace URI plus local name.
fn resolve_step(step: &str) -> (Option<&'static str>, &str) {
    match step.split_once(':') {
        Some((prefix, local)) => (namespace_uri(prefix), local),
        None => (None, step),
    }
}

/// Check whether an element matches a resolved path step.
///
/// Prefixed steps require the namespace from the fixed table; unprefixed
/// steps match on local name regardless of namespace.
fn matches_step(node: Node<'_, '_>, ns: Option<&str>, local: &str) -> bool {
    if !node.is_element() || local_name(node) != local {
        return false;
    }
    match ns {
        Some(uri) => node.tag_name().namespace() == Some(uri),
        None => true,
    }
}

/// Find all elements matching a slash-separated path of (optionally
/// prefixed) tag names.
///
/// The first step is searched among all descendants of `node` in document
/// order; every following step narrows to direct children. This mirrors the
/// service-level metadata queries, which address elements outside an
/// entity's own subtree.
pub fn query_nodes<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut steps = path.split('/');

    let Some(first) = steps.next() else {
        return Vec::new();
    };
    let (ns, local) = resolve_step(first);
    let mut matches: Vec<Node<'a, 'input>> = node
        .descendants()
        .filter(|n| matches_step(*n, ns, local))
        .collect();

    for step in steps {
        let (ns, local) = resolve_step(step);
        matches = matches
            .iter()
            .flat_map(|n| n.children())
            .filter(|n| matches_step(*n, ns, local))
            .collect();
    }

    matches
}

/// Performs a single-value query on the XML body. If more than one element
/// matches the query, the first one is returned.
///
/// When no results are found an empty string is returned.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use geosync_harvester::xml::query_single;
///
/// let xml = r#"<caps xmlns:ows="http://www.opengis.net/ows/1.1">
///   <ows:ServiceProvider><ows:ProviderName>Nijmegen</ows:ProviderName></ows:ServiceProvider>
/// </caps>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert_eq!(
///     query_single(doc.root_element(), "ows:ServiceProvider/ows:ProviderName"),
///     "Nijmegen"
/// );
/// assert_eq!(query_single(doc.root_element(), "ows:Missing"), "");
/// ```
pub fn query_single(node: Node<'_, '_>, path: &str) -> String {
    query_nodes(node, path)
        .first()
        .map(|n| get_text(*n))
        .unwrap_or_default()
}

/// Collect the text of every element matching the query, in document order.
pub fn query_all(node: Node<'_, '_>, path: &str) -> Vec<String> {
    query_nodes(node, path).iter().map(|n| get_text(*n)).collect()
}
