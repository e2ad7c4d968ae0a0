//! Search-result shaping: debounce bookkeeping, per-session grouping,
//! and case-insensitive match highlighting. Pure functions over the raw
//! hit list; the UI renders whatever comes out.

use chat_types::search::SearchHit;

/// Quiet period before a keystroke turns into a query.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Snippets shown per session before collapsing into "+N more".
pub const SNIPPETS_PER_SESSION: usize = 2;

/// Longest snippet rendered in the result list, in characters.
pub const SNIPPET_MAX_CHARS: usize = 120;

/// Generation counter backing the debounce. Each keystroke bumps the
/// generation; a timer that wakes up with a stale generation does not
/// fire its query.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate all outstanding timers and return the new generation.
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Hits from one session, in backend order (newest first), capped at
/// [`SNIPPETS_PER_SESSION`] with the overflow counted in `hidden`.
#[derive(Debug, Clone)]
pub struct SearchGroup {
    pub session_id: String,
    pub session_title: String,
    pub hits: Vec<SearchHit>,
    pub hidden: usize,
}

/// Group a flat hit list by owning session, preserving the order in
/// which sessions first appear.
pub fn group_hits(hits: &[SearchHit]) -> Vec<SearchGroup> {
    let mut groups: Vec<SearchGroup> = Vec::new();
    for hit in hits {
        match groups.iter_mut().find(|g| g.session_id == hit.session_id) {
            Some(group) => {
                if group.hits.len() < SNIPPETS_PER_SESSION {
                    group.hits.push(hit.clone());
                } else {
                    group.hidden += 1;
                }
            }
            None => groups.push(SearchGroup {
                session_id: hit.session_id.clone(),
                session_title: hit.session_title.clone(),
                hits: vec![hit.clone()],
                hidden: 0,
            }),
        }
    }
    groups
}

/// One run of text in a highlighted snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub highlighted: bool,
}

/// Split `content` into spans, marking every case-insensitive occurrence
/// of `query`. The original casing of the content is preserved inside
/// highlighted spans.
pub fn highlight_spans(content: &str, query: &str) -> Vec<Span> {
    let query_chars: Vec<char> = query.chars().collect();
    if query_chars.is_empty() {
        return vec![Span {
            text: content.to_string(),
            highlighted: false,
        }];
    }

    let content_chars: Vec<char> = content.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < content_chars.len() {
        if matches_at(&content_chars, i, &query_chars) {
            if !plain.is_empty() {
                spans.push(Span {
                    text: std::mem::take(&mut plain),
                    highlighted: false,
                });
            }
            spans.push(Span {
                text: content_chars[i..i + query_chars.len()].iter().collect(),
                highlighted: true,
            });
            i += query_chars.len();
        } else {
            plain.push(content_chars[i]);
            i += 1;
        }
    }

    if !plain.is_empty() {
        spans.push(Span {
            text: plain,
            highlighted: false,
        });
    }
    spans
}

fn matches_at(content: &[char], at: usize, query: &[char]) -> bool {
    content.len() - at >= query.len()
        && content[at..at + query.len()]
            .iter()
            .zip(query)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

/// Truncate a snippet at a char boundary, appending an ellipsis when
/// anything was cut.
pub fn snippet(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut out: String = content.chars().take(max_chars).collect();
    out.push('…');
    out
}
