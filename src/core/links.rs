//! Destination link table
//!
//! The link table is the only place that declares which precise destinations
//! exist and which global destination each belongs to. Optional global
//! destination qualifiers treat `Some("")` the same as `None`.

use std::collections::BTreeSet;

use crate::entities::DestinationLink;

/// Append a link. No uniqueness check happens here.
pub fn add(links: &mut Vec<DestinationLink>, link: DestinationLink) {
    links.push(link);
}

/// Remove every link under the given global destination, returning the count.
pub fn remove_by_global_destination(links: &mut Vec<DestinationLink>, value: &str) -> usize {
    let before = links.len();
    links.retain(|l| l.global_destination != value);
    before - links.len()
}

/// Remove links for a precise destination, optionally only under one global
/// destination. Returns the count.
pub fn remove_by_precise_destination(
    links: &mut Vec<DestinationLink>,
    value: &str,
    scoped_to_global: Option<&str>,
) -> usize {
    let scope = qualifier(scoped_to_global);
    let before = links.len();
    links.retain(|l| !matches_precise(l, value, scope));
    before - links.len()
}

/// Contact row for a precise destination.
///
/// Without a global qualifier this is the first match in table order, even if
/// the same precise destination exists under several global destinations.
pub fn lookup_contact<'a>(
    links: &'a [DestinationLink],
    precise_destination: &str,
    global_destination: Option<&str>,
) -> Option<&'a DestinationLink> {
    let scope = qualifier(global_destination);
    links
        .iter()
        .find(|l| matches_precise(l, precise_destination, scope))
}

/// Every precise destination (optionally under one global destination),
/// deduplicated and sorted.
pub fn distinct_precise_destinations(
    links: &[DestinationLink],
    global_destination: Option<&str>,
) -> Vec<String> {
    let scope = qualifier(global_destination);
    links
        .iter()
        .filter(|l| scope.map_or(true, |g| l.global_destination == g))
        .map(|l| l.precise_destination.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether a link already binds this precise destination to this global one
pub fn contains_pair(links: &[DestinationLink], global: &str, precise: &str) -> bool {
    links
        .iter()
        .any(|l| l.global_destination == global && l.precise_destination == precise)
}

fn qualifier(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn matches_precise(link: &DestinationLink, precise: &str, scope: Option<&str>) -> bool {
    link.precise_destination == precise && scope.map_or(true, |g| link.global_destination == g)
}
