use std::collections::BTreeMap;

/// Segment
///
/// One `/`-separated piece of a compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// PathPattern
///
/// A route path compiled into segments. Matching is exact over the full path:
/// a URL matches only when it has the same number of segments, every literal
/// segment is equal, and every parameter segment is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// parse
    ///
    /// Compiles a route path. Parameters are written `{name}` or `:name`.
    /// Returns a human-readable reason when the path cannot be a route pattern.
    pub fn parse(path: &str) -> Result<Self, String> {
        if !path.starts_with('/') {
            return Err("path must start with '/'".to_string());
        }

        let mut segments = Vec::new();
        for raw in split_segments(path) {
            if raw.is_empty() {
                return Err("path contains an empty segment".to_string());
            }
            let param = raw
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .or_else(|| raw.strip_prefix(':'));

            match param {
                Some("") => return Err(format!("parameter in segment '{raw}' has no name")),
                Some(name) if name.contains(['{', '}', ':']) => {
                    return Err(format!("malformed parameter segment '{raw}'"));
                }
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None if raw.contains(['{', '}']) => {
                    return Err(format!("malformed parameter segment '{raw}'"));
                }
                None => segments.push(Segment::Literal(raw.to_string())),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matches a URL path and returns the captured parameters.
    pub fn captures(&self, url: &str) -> Option<BTreeMap<String, String>> {
        let path = normalize_url(url)?;
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.insert(name.clone(), part.to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }

    pub fn matches(&self, url: &str) -> bool {
        self.captures(url).is_some()
    }

    /// covers
    ///
    /// True when every URL matched by `other` is also matched by `self`,
    /// i.e. `self` placed earlier in a first-match table makes `other` unreachable.
    pub fn covers(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(mine, theirs)| match (mine, theirs) {
                    (Segment::Param(_), _) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Literal(_), Segment::Param(_)) => false,
                })
    }

    /// intersects
    ///
    /// True when at least one URL is matched by both patterns: same segment
    /// count, and at every position either equal literals or a parameter on
    /// either side.
    pub fn intersects(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), _) | (_, Segment::Param(_)) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                })
    }
}

/// Strips the query string and fragment, and tolerates one trailing slash.
fn normalize_url(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    if !path.starts_with('/') {
        return None;
    }
    // "//" keeps its two empty segments and so matches nothing.
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() && !trimmed.ends_with('/') => Some(trimmed),
        _ => Some(path),
    }
}

// "/" has zero segments; "/a/b" has two.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}
