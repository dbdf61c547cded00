// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grounding reference filtering and deduplication.

use std::collections::HashSet;

use crate::types::SearchLink;

/// Builds a link from an optional title and url, dropping references missing either.
pub fn grounded_link(title: Option<&str>, url: Option<&str>) -> Option<SearchLink> {
    let title = title.map(str::trim).filter(|t| !t.is_empty())?;
    let url = url.map(str::trim).filter(|u| !u.is_empty())?;
    Some(SearchLink::new(title, url))
}

/// Removes links with a url already seen.
///
/// The first occurrence of each url wins, keeping its title and position.
pub fn dedup_links(links: impl IntoIterator<Item = SearchLink>) -> Vec<SearchLink> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
