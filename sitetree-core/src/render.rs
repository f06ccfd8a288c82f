//! Indented text tree over a crawled [`SiteMap`].
//!
//! Traversal is depth-first from the root, following each page's links in
//! discovery order. A page is expanded (assets and children) the first time
//! it is reached; later references to it are printed as plain leaves, which
//! keeps link cycles finite.

use sitetree_scanner::{PageLink, SiteMap};
use std::collections::HashSet;

/// Which form of a child link to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkLabel {
    /// The href exactly as written in the page.
    #[default]
    Raw,
    /// The resolved URL, fragment stripped.
    Canonical,
}

impl LinkLabel {
    fn of<'a>(&self, link: &'a PageLink) -> &'a str {
        match self {
            LinkLabel::Raw => &link.raw,
            LinkLabel::Canonical => &link.url,
        }
    }
}

struct Frame<'a> {
    url: &'a str,
    depth: usize,
    next: usize,
}

/// Render the tree rooted at the site's seed.
pub fn render_tree(site: &SiteMap, label: LinkLabel) -> String {
    render_from(site, &site.root, label)
}

/// Render the tree rooted at `root`, which should be a canonical page URL.
pub fn render_from(site: &SiteMap, root: &str, label: LinkLabel) -> String {
    let mut out = String::new();
    let mut marked: HashSet<&str> = HashSet::new();
    let mut stack: Vec<Frame> = Vec::new();

    marked.insert(root);
    write_page_line(&mut out, 0, root);
    write_assets(&mut out, 0, site.assets(root));
    stack.push(Frame {
        url: root,
        depth: 0,
        next: 0,
    });

    while let Some(frame) = stack.last_mut() {
        let links = site
            .page(frame.url)
            .map(|record| record.links.as_slice())
            .unwrap_or_default();
        let Some(link) = links.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let depth = frame.depth + 2;

        write_page_line(&mut out, depth, label.of(link));
        if marked.insert(link.url.as_str()) {
            write_assets(&mut out, depth, site.assets(&link.url));
            stack.push(Frame {
                url: &link.url,
                depth,
                next: 0,
            });
        }
    }

    out
}

fn write_page_line(out: &mut String, depth: usize, label: &str) {
    out.push_str(&format!("{}└── {}\n", " ".repeat(depth), label));
}

fn write_assets(out: &mut String, depth: usize, assets: &[String]) {
    let pad = " ".repeat(depth + 2);
    for (i, asset) in assets.iter().enumerate() {
        let marker = if i == assets.len() - 1 { "└" } else { "├" };
        out.push_str(&format!("{pad}│{pad}{marker}── {asset}\n"));
    }
}
