use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::tree::GraphNode;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

fn node_score(matcher: &SkimMatcherV2, node: &GraphNode, query: &str) -> Option<i64> {
    std::iter::once(node.name.as_str())
        .chain(node.tags.iter().map(String::as_str))
        .filter_map(|text| fuzzy_match_score(matcher, text, query))
        .max()
}

/// Indices of nodes whose name or a tag matches `query`, best match first.
///
/// Ties keep layout order. A blank query matches nothing.
pub fn matching_nodes(nodes: &[GraphNode], query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| node_score(&matcher, node, query).map(|score| (index, score)))
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(index, _)| index).collect()
}

/// Index of the single best match for `query`, if any. Always in bounds of `nodes`.
pub fn best_match(nodes: &[GraphNode], query: &str) -> Option<usize> {
    matching_nodes(nodes, query).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ContactRecord;
    use crate::tree::compute_layout;

    fn layout_nodes() -> Vec<GraphNode> {
        compute_layout(&[
            ContactRecord::new("a", "Ada Lovelace", 1).with_tags(["Math"]),
            ContactRecord::new("b", "Grace Hopper", 2).with_tags(["Navy", "Compilers"]),
            ContactRecord::new("c", "Alan Turing", 2),
        ])
        .nodes
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(matching_nodes(&layout_nodes(), "   ").is_empty());
    }

    #[test]
    fn matches_names_case_insensitively() {
        let nodes = layout_nodes();
        let hits = matching_nodes(&nodes, "GRACE");
        assert_eq!(hits.len(), 1);
        assert_eq!(nodes[hits[0]].id, "b");
    }

    #[test]
    fn matches_tags() {
        let nodes = layout_nodes();
        let hits = matching_nodes(&nodes, "compilers");
        assert_eq!(hits.iter().map(|&i| nodes[i].id.as_str()).collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn blank_query_has_no_best_match() {
        let nodes = layout_nodes();
        assert_eq!(best_match(&nodes, ""), None);
        assert_eq!(best_match(&nodes, " \t "), None);
    }

    #[test]
    fn best_match_prefers_highest_score() {
        let nodes = layout_nodes();
        let index = best_match(&nodes, "turing").unwrap();
        assert_eq!(nodes[index].id, "c");
    }

    #[test]
    fn best_match_tracks_the_current_nodes() {
        let before = layout_nodes();
        let stale = best_match(&before, "turing").unwrap();
        assert_eq!(stale, 2);

        let after = compute_layout(&[ContactRecord::new("c", "Alan Turing", 1)]).nodes;
        assert_eq!(best_match(&after, "turing"), Some(0));
        assert_eq!(best_match(&after, "grace"), None);
        assert!(best_match(&after, "a").is_none_or(|index| index < after.len()));
    }
}
