use std::collections::HashMap;

use reqwest::Url;

pub const DEFAULT_BADGE_CACHE_CAPACITY: usize = 128;

const BADGE_CDN_HOST: &str = "r2.thesportsdb.com";

/// Bounded team name → badge URL memo with least-recently-used eviction.
///
/// `None` values are cached too, so a team that has no badge is not looked
/// up again until the entry is evicted or the cache is cleared.
#[derive(Debug, Clone)]
pub struct BadgeCache {
    capacity: usize,
    tick: u64,
    entries: HashMap<String, CachedBadge>,
}

#[derive(Debug, Clone)]
struct CachedBadge {
    url: Option<String>,
    last_used: u64,
}

impl Default for BadgeCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BADGE_CACHE_CAPACITY)
    }
}

impl BadgeCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// `Some(lookup)` on a hit, refreshing the entry's recency.
    pub fn get(&mut self, team: &str) -> Option<Option<String>> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(team).map(|entry| {
            entry.last_used = tick;
            entry.url.clone()
        })
    }

    pub fn insert(&mut self, team: &str, url: Option<String>) {
        if self.capacity == 0 {
            return;
        }
        self.tick += 1;
        if !self.entries.contains_key(team) && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(name, _)| name.clone());
            if let Some(oldest) = oldest {
                log::trace!("evicting badge for {oldest}");
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            team.to_owned(),
            CachedBadge {
                url,
                last_used: self.tick,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Rewrite badge URLs on any thesportsdb.com host onto the CDN host. Other
/// URLs pass through unchanged; empty input has no badge.
pub fn normalize_badge_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let Ok(mut url) = Url::parse(raw) else {
        return Some(raw.to_owned());
    };
    let on_sportsdb = url.host_str().is_some_and(|h| h.contains("thesportsdb.com"));
    if on_sportsdb && url.set_host(Some(BADGE_CDN_HOST)).is_err() {
        return Some(raw.to_owned());
    }
    Some(url.to_string())
}

/// Search term sent for `team`: the first alias whose key is contained in
/// the name (case-insensitive), otherwise the name itself.
pub fn badge_query<'a>(team: &'a str, aliases: &'a [(String, String)]) -> &'a str {
    let lower = team.to_lowercase();
    aliases
        .iter()
        .find(|(needle, _)| lower.contains(&needle.to_lowercase()))
        .map(|(_, query)| query.as_str())
        .unwrap_or(team)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = BadgeCache::with_capacity(2);
        cache.insert("MoDo Hockey", Some("modo.png".into()));
        cache.insert("Luleå HF", None);

        // Touch MoDo so Luleå becomes the eviction candidate.
        assert_eq!(cache.get("MoDo Hockey"), Some(Some("modo.png".into())));
        cache.insert("Timrå IK", Some("timra.png".into()));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("Luleå HF"), None);
        assert!(cache.get("MoDo Hockey").is_some());
        assert!(cache.get("Timrå IK").is_some());
    }

    #[test]
    fn negative_results_are_hits() {
        let mut cache = BadgeCache::default();
        cache.insert("Unknown HC", None);
        assert_eq!(cache.get("Unknown HC"), Some(None));
        assert_eq!(cache.capacity(), DEFAULT_BADGE_CACHE_CAPACITY);
    }

    #[test]
    fn reinserting_does_not_evict() {
        let mut cache = BadgeCache::with_capacity(2);
        cache.insert("A", None);
        cache.insert("B", None);
        cache.insert("A", Some("a.png".into()));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("B"), Some(None));
    }

    #[test]
    fn zero_capacity_and_clear() {
        let mut cache = BadgeCache::with_capacity(0);
        cache.insert("A", None);
        assert!(cache.is_empty());

        let mut cache = BadgeCache::default();
        cache.insert("A", None);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("A"), None);
    }

    #[test]
    fn normalizes_sportsdb_hosts() {
        assert_eq!(
            normalize_badge_url("https://www.thesportsdb.com/images/media/team/badge/modo.png")
                .as_deref(),
            Some("https://r2.thesportsdb.com/images/media/team/badge/modo.png")
        );
        assert_eq!(
            normalize_badge_url("https://cdn.example.org/x.png").as_deref(),
            Some("https://cdn.example.org/x.png")
        );
        assert_eq!(normalize_badge_url("  "), None);
    }

    #[test]
    fn alias_replaces_matching_names() {
        let aliases = vec![("modo".to_string(), "Modo".to_string())];
        assert_eq!(badge_query("MoDo Hockey", &aliases), "Modo");
        assert_eq!(badge_query("Luleå HF", &aliases), "Luleå HF");
    }
}
