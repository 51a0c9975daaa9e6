use std::borrow::Cow;

pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Resolve `relative` against the directory containing `base`.
///
/// `base` may be a plain path (`/OEBPS/manifest.json`) or an absolute url
/// (`http://host/pub/manifest.json`); the scheme and authority of an absolute
/// url are retained and `.`/`..` segments are collapsed.
pub(crate) fn resolve_sibling<'a>(base: &str, relative: &'a str) -> Cow<'a, str> {
    let (main_href, frag) = split_suffix(relative);

    if has_scheme(main_href) {
        // Already absolute
        return Cow::Borrowed(relative);
    }

    let (origin, base_path) = split_origin(split_suffix(base).0);
    let joined = if main_href.starts_with('/') {
        normalize(main_href)
    } else {
        match parent(base_path) {
            "" => normalize(main_href),
            "/" => normalize(&format!("/{main_href}")),
            dir => normalize(&format!("{dir}/{main_href}")),
        }
    };

    let separator = if !origin.is_empty() && !joined.starts_with('/') {
        "/"
    } else {
        ""
    };

    Cow::Owned(format!("{origin}{separator}{joined}{frag}"))
}

/// Collapse `.`, `..`, and empty segments.
///
/// A leading `/` is kept; `..` never climbs above the first segment.
pub(crate) fn normalize(href: &str) -> String {
    let mut stack = Vec::new();

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }

    let joined = stack.join("/");
    if href.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Split off a trailing query and/or fragment (`?q=1#frag`).
fn split_suffix(href: &str) -> (&str, &str) {
    href.find(['?', '#'])
        .map(|position| (&href[..position], &href[position..]))
        .unwrap_or((href, ""))
}

/// `http://host:80/a/b` -> (`http://host:80`, `/a/b`)
fn split_origin(url: &str) -> (&str, &str) {
    match url.find("://") {
        Some(index) if has_scheme(url) => {
            let authority_start = index + 3;
            let path_start = url[authority_start..]
                .find('/')
                .map_or(url.len(), |position| authority_start + position);
            url.split_at(path_start)
        }
        _ => ("", url),
    }
}

/// The provided `href` must not contain a `fragment`
/// and `query` when passed to this method.
fn has_scheme(href: &str) -> bool {
    href.split_once(':').is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
