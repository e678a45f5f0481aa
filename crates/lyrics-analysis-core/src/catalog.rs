//! Music catalog search: query construction, response schema, and caching.
//!
//! The HTTP client lives outside this crate. It plugs in through
//! [`CatalogSearch`]; [`CachedCatalog`] wraps any implementation with a
//! bounded, expiring [`SearchCache`].

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// Search fields entered by the user. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct SearchQuery {
    /// Track title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Artist name(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Album name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl SearchQuery {
    fn fields(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("track", self.track.as_deref()),
            ("artist", self.artist.as_deref()),
            ("album", self.album.as_deref()),
        ]
    }

    fn present(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields()
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
    }

    /// Whether every field is absent or empty.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Fail with [`CatalogError::EmptyQuery`] if no field is set.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }
        Ok(())
    }

    /// Catalog query string, e.g. `track:Yellow artist:Coldplay`.
    ///
    /// Fields appear in track, artist, album order; values are not escaped.
    pub fn to_query_string(&self) -> String {
        self.present()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One message per set field, for reporting an empty result list.
    pub fn no_results_messages(&self) -> Vec<String> {
        self.present()
            .map(|(name, value)| {
                let label = match name {
                    "track" => "Track title",
                    "artist" => "Artist",
                    _ => "Album",
                };
                format!("No search results found for {label}: {value}.")
            })
            .collect()
    }
}

// -- Response schema --------------------------------------------------------

/// Top-level catalog search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogResponse {
    /// Track results page.
    pub tracks: TrackPage,
}

/// One page of track results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrackPage {
    /// Tracks on this page. The catalog may send `null` for no results.
    #[serde(default)]
    pub items: Option<Vec<CatalogTrack>>,
    /// Total matches across all pages.
    #[serde(default)]
    pub total: u64,
    /// Requested page size.
    #[serde(default)]
    pub limit: u64,
    /// Offset of this page.
    #[serde(default)]
    pub offset: u64,
}

/// A track as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogTrack {
    /// Catalog track id; also the lyrics lookup key.
    pub id: String,
    /// Track title.
    pub name: String,
    /// Credited artists.
    pub artists: Vec<CatalogArtist>,
    /// Album the track belongs to.
    pub album: CatalogAlbum,
    /// Duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// An artist credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogArtist {
    /// Artist name.
    pub name: String,
}

/// Album details needed for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogAlbum {
    /// Album title.
    #[serde(default)]
    pub name: String,
    /// Cover art, largest first.
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

/// A cover art rendition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AlbumImage {
    /// Image URL.
    pub url: String,
    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
}

impl CatalogResponse {
    /// Decode a response from JSON text.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }

    /// Flatten the results into display summaries, in ranking order.
    pub fn into_summaries(self) -> Vec<TrackSummary> {
        self.tracks
            .items
            .unwrap_or_default()
            .into_iter()
            .map(TrackSummary::from)
            .collect()
    }
}

/// What the search results list shows for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrackSummary {
    /// Catalog track id.
    pub id: String,
    /// Track title.
    pub track_name: String,
    /// Artist names joined with ", ".
    pub artist: String,
    /// First cover art URL, or empty if the album has none.
    pub album_image: String,
}

impl TrackSummary {
    /// Card subtitle, e.g. "Song by Coldplay".
    pub fn byline(&self) -> String {
        format!("Song by {}", self.artist)
    }
}

impl From<CatalogTrack> for TrackSummary {
    fn from(track: CatalogTrack) -> Self {
        let artist = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let album_image = track
            .album
            .images
            .into_iter()
            .next()
            .map(|img| img.url)
            .unwrap_or_default();
        Self {
            id: track.id,
            track_name: track.name,
            artist,
            album_image,
        }
    }
}

// -- Search collaborator ----------------------------------------------------

/// A catalog backend that runs a query string and returns ranked tracks.
pub trait CatalogSearch {
    /// Run `query` and return at most `limit` results.
    fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<TrackSummary>>;
}

struct CachedEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Least-recently-used cache whose entries also expire after a fixed TTL.
pub struct SearchCache<K: Hash + Eq, V> {
    entries: LruCache<K, CachedEntry<V>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V> SearchCache<K, V> {
    /// Create a cache holding at most `capacity` entries for `ttl` each.
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Fresh value for `key`, evicting it if it has expired.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&mut self, key: &K, now: Instant) -> Option<&V> {
        let expired = self
            .entries
            .peek(key)
            .is_some_and(|e| now.saturating_duration_since(e.stored_at) >= self.ttl);
        if expired {
            self.entries.pop(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Store `value`, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    fn insert_at(&mut self, key: K, value: V, stored_at: Instant) {
        self.entries.put(key, CachedEntry { value, stored_at });
    }

    /// Drop the entry for `key`.
    pub fn invalidate(&mut self, key: &K) {
        self.entries.pop(key);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included until next access.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`CatalogSearch`] backend fronted by a [`SearchCache`].
///
/// Cache keys are the query string plus result limit.
pub struct CachedCatalog<C> {
    inner: C,
    cache: SearchCache<(String, usize), Vec<TrackSummary>>,
    limit: usize,
}

impl<C: CatalogSearch> CachedCatalog<C> {
    /// Wrap `inner` using the limit, capacity, and TTL from `config`.
    pub fn new(inner: C, config: &CatalogConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: SearchCache::new(capacity, Duration::from_secs(config.cache_ttl_secs)),
            limit: config.search_limit,
        }
    }

    /// Search the catalog, serving repeated queries from the cache.
    #[tracing::instrument(skip(self), fields(limit = self.limit))]
    pub fn search(&mut self, query: &SearchQuery) -> CatalogResult<Vec<TrackSummary>> {
        query.validate()?;
        let key = (query.to_query_string(), self.limit);

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(query = %key.0, "search cache hit");
            return Ok(hit.clone());
        }

        let results = self.inner.search(&key.0, self.limit)?;
        tracing::debug!(query = %key.0, results = results.len(), "search cache miss");
        self.cache.insert(key, results.clone());
        Ok(results)
    }

    /// Forget all cached searches.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// The wrapped backend.
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn query(track: Option<&str>, artist: Option<&str>, album: Option<&str>) -> SearchQuery {
        SearchQuery {
            track: track.map(String::from),
            artist: artist.map(String::from),
            album: album.map(String::from),
        }
    }

    #[test]
    fn builds_query_strings() {
        let cases = [
            (
                query(
                    Some("Bohemian Rhapsody"),
                    Some("Queen"),
                    Some("A Night at the Opera"),
                ),
                "track:Bohemian Rhapsody artist:Queen album:A Night at the Opera",
            ),
            (
                query(Some("Imagine"), Some("John Lennon"), None),
                "track:Imagine artist:John Lennon",
            ),
            (
                query(None, Some("The Beatles"), Some("Abbey Road")),
                "artist:The Beatles album:Abbey Road",
            ),
            (query(Some("Yesterday"), None, None), "track:Yesterday"),
            (query(None, None, None), ""),
        ];
        for (q, expected) in cases {
            assert_eq!(q.to_query_string(), expected);
        }
    }

    #[test]
    fn keeps_special_characters() {
        let q = query(Some("Don't Stop Me Now"), Some("Queen"), None);
        assert_eq!(q.to_query_string(), "track:Don't Stop Me Now artist:Queen");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let q = query(Some(""), Some("Queen"), Some(""));
        assert_eq!(q.to_query_string(), "artist:Queen");
        assert!(query(Some(""), None, None).validate().is_err());
    }

    #[test]
    fn empty_query_rejected() {
        assert!(matches!(
            SearchQuery::default().validate(),
            Err(CatalogError::EmptyQuery)
        ));
    }

    #[test]
    fn no_results_messages_name_each_field() {
        let msgs = query(Some("Yellow"), None, Some("Parachutes")).no_results_messages();
        assert_eq!(
            msgs,
            vec![
                "No search results found for Track title: Yellow.",
                "No search results found for Album: Parachutes.",
            ]
        );
    }

    const RESPONSE: &str = r#"{
        "tracks": {
            "href": "https://api.example.com/v1/search",
            "items": [
                {
                    "id": "3AJwUDP919kvQ9QcozQPxg",
                    "name": "Yellow",
                    "artists": [{"name": "Coldplay", "id": "4gzp"}],
                    "album": {
                        "name": "Parachutes",
                        "images": [
                            {"url": "https://img.example.com/640", "height": 640, "width": 640},
                            {"url": "https://img.example.com/300", "height": 300, "width": 300}
                        ]
                    },
                    "duration_ms": 266773
                },
                {
                    "id": "abc",
                    "name": "Under Pressure",
                    "artists": [{"name": "Queen"}, {"name": "David Bowie"}],
                    "album": {"name": "Hot Space", "images": []}
                }
            ],
            "limit": 10,
            "offset": 0,
            "total": 2
        }
    }"#;

    #[test]
    fn converts_response_to_summaries() {
        let summaries = CatalogResponse::from_json(RESPONSE).unwrap().into_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].track_name, "Yellow");
        assert_eq!(summaries[0].album_image, "https://img.example.com/640");
        assert_eq!(summaries[0].byline(), "Song by Coldplay");
        assert_eq!(summaries[1].artist, "Queen, David Bowie");
        assert_eq!(summaries[1].album_image, "");
    }

    #[test]
    fn null_items_are_empty() {
        let response =
            CatalogResponse::from_json(r#"{"tracks": {"items": null, "total": 0}}"#).unwrap();
        assert!(response.into_summaries().is_empty());
    }

    #[test]
    fn malformed_response_rejected() {
        let err = CatalogResponse::from_json(r#"{"tracks": {"items": [{"id": 1}]}}"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidResponse(_)));
    }

    #[test]
    fn cache_expires_entries() {
        let mut cache = SearchCache::new(NonZeroUsize::new(4).unwrap(), Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("k", 1, start);
        assert_eq!(cache.get_at(&"k", start + Duration::from_secs(59)), Some(&1));
        assert_eq!(cache.get_at(&"k", start + Duration::from_secs(60)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_evicts_least_recently_used() {
        let mut cache = SearchCache::new(NonZeroUsize::new(2).unwrap(), Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.insert("c", 3);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_invalidate_and_clear() {
        let mut cache = SearchCache::new(NonZeroUsize::new(2).unwrap(), Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.invalidate(&"a");
        assert_eq!(cache.get(&"a"), None);
        cache.clear();
        assert!(cache.is_empty());
    }

    struct CountingBackend {
        calls: Cell<usize>,
    }

    impl CatalogSearch for CountingBackend {
        fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<TrackSummary>> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![TrackSummary {
                id: format!("{}", self.calls.get()),
                track_name: query.to_string(),
                artist: "Coldplay".to_string(),
                album_image: String::new(),
            }]
            .into_iter()
            .take(limit)
            .collect())
        }
    }

    #[test]
    fn cached_catalog_hits_backend_once_per_query() {
        let backend = CountingBackend {
            calls: Cell::new(0),
        };
        let mut catalog = CachedCatalog::new(backend, &CatalogConfig::default());
        let q = query(Some("Yellow"), Some("Coldplay"), None);

        let first = catalog.search(&q).unwrap();
        let second = catalog.search(&q).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].track_name, "track:Yellow artist:Coldplay");
        assert_eq!(catalog.inner().calls.get(), 1);

        catalog.search(&query(Some("Fix You"), None, None)).unwrap();
        assert_eq!(catalog.inner().calls.get(), 2);

        catalog.clear_cache();
        catalog.search(&q).unwrap();
        assert_eq!(catalog.inner().calls.get(), 3);
    }

    #[test]
    fn cached_catalog_rejects_empty_query_without_calling_backend() {
        let backend = CountingBackend {
            calls: Cell::new(0),
        };
        let mut catalog = CachedCatalog::new(backend, &CatalogConfig::default());
        assert!(catalog.search(&SearchQuery::default()).is_err());
        assert_eq!(catalog.inner().calls.get(), 0);
    }
}
