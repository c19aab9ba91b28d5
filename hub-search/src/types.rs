//! Core types for resource search queries, per-category results, and the
//! aggregated view handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest per-category result count a query may ask for.
pub const MIN_LIMIT: usize = 1;
/// Largest per-category result count a query may ask for.
pub const MAX_LIMIT: usize = 10;

/// Clamp a requested result count into `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// The three resource categories, each served by one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Video tutorials (YouTube).
    Video,
    /// Web articles (Google Custom Search), ranked by relevance.
    Article,
    /// Code repositories (GitHub).
    Repo,
}

impl Category {
    /// Returns the human-readable name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::Repo => "repo",
        }
    }

    /// All categories in combined-view priority order.
    pub fn all() -> &'static [Category] {
        &[Self::Video, Self::Article, Self::Repo]
    }

    /// Parse a category from its name (case-insensitive, plural accepted).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "video" | "videos" => Some(Self::Video),
            "article" | "articles" => Some(Self::Article),
            "repo" | "repos" | "repository" | "repositories" => Some(Self::Repo),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-category result-count limits. Every value is kept in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLimits")]
pub struct CategoryLimits {
    video: usize,
    article: usize,
    repo: usize,
}

/// Wire form of [`CategoryLimits`]; deserialized values go through the clamp.
#[derive(Deserialize)]
struct RawLimits {
    video: usize,
    article: usize,
    repo: usize,
}

impl From<RawLimits> for CategoryLimits {
    fn from(raw: RawLimits) -> Self {
        Self::new(raw.video, raw.article, raw.repo)
    }
}

impl CategoryLimits {
    /// Build limits for each category, clamping out-of-range values.
    pub fn new(video: usize, article: usize, repo: usize) -> Self {
        Self {
            video: clamp_limit(video),
            article: clamp_limit(article),
            repo: clamp_limit(repo),
        }
    }

    /// Same limit for every category.
    pub fn uniform(limit: usize) -> Self {
        Self::new(limit, limit, limit)
    }

    /// Limit for one category.
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Video => self.video,
            Category::Article => self.article,
            Category::Repo => self.repo,
        }
    }
}

impl Default for CategoryLimits {
    fn default() -> Self {
        Self::uniform(5)
    }
}

/// A resource search request: free text plus per-category limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The text to search for.
    pub text: String,
    /// How many results to fetch per category.
    pub limits: CategoryLimits,
}

impl SearchQuery {
    /// Build a query with the same limit for every category.
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            limits: CategoryLimits::uniform(limit),
        }
    }

    /// Replace the per-category limits.
    pub fn with_limits(mut self, limits: CategoryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// A blank query never triggers a fetch.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Which categories a search should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledCategories {
    video: bool,
    article: bool,
    repo: bool,
}

impl EnabledCategories {
    /// Every category enabled.
    pub fn all() -> Self {
        Self {
            video: true,
            article: true,
            repo: true,
        }
    }

    /// No category enabled.
    pub fn none() -> Self {
        Self {
            video: false,
            article: false,
            repo: false,
        }
    }

    /// Only the listed categories enabled.
    pub fn only(categories: &[Category]) -> Self {
        categories
            .iter()
            .fold(Self::none(), |set, &category| set.with(category))
    }

    /// Enable one more category.
    pub fn with(mut self, category: Category) -> Self {
        *self.slot(category) = true;
        self
    }

    /// Disable one category.
    pub fn without(mut self, category: Category) -> Self {
        *self.slot(category) = false;
        self
    }

    /// Whether `category` is enabled.
    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Video => self.video,
            Category::Article => self.article,
            Category::Repo => self.repo,
        }
    }

    /// Whether no category is enabled.
    pub fn is_empty(&self) -> bool {
        !(self.video || self.article || self.repo)
    }

    fn slot(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Video => &mut self.video,
            Category::Article => &mut self.article,
            Category::Repo => &mut self.repo,
        }
    }
}

impl Default for EnabledCategories {
    fn default() -> Self {
        Self::all()
    }
}

/// A video returned by the video source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Video title.
    pub title: String,
    /// Watch URL.
    pub url: String,
    /// Name of the publishing channel.
    pub channel: String,
    /// Publication timestamp as reported by the API.
    pub published_at: String,
    /// Thumbnail URL, empty when the API had none.
    pub thumbnail: String,
    /// Video description.
    pub description: String,
}

impl VideoResult {
    /// Whether a thumbnail URL was resolved.
    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.is_empty()
    }
}

/// A web article returned by the article source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub link: String,
    /// Text snippet summarising the page.
    pub snippet: String,
    /// Domain shown to the user.
    pub display_link: String,
    /// URL formatted for display.
    pub formatted_url: String,
    /// Cosine similarity to the query in `[0, 1]`; 0.0 until ranked.
    pub relevance: f64,
}

/// A code repository returned by the repository source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoResult {
    /// Repository name.
    pub name: String,
    /// Repository web URL.
    pub url: String,
    /// Star count.
    pub stars: u64,
    /// Owner login.
    pub owner: String,
    /// Repository description, empty when unset.
    pub description: String,
    /// Primary language.
    pub language: String,
    /// Last-updated timestamp as reported by the API.
    pub updated_at: String,
}

/// A borrowed view over any result variant, for uniform rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultRef<'a> {
    /// A video result.
    Video(&'a VideoResult),
    /// An article result.
    Article(&'a ArticleResult),
    /// A repository result.
    Repo(&'a RepoResult),
}

impl<'a> ResultRef<'a> {
    /// Category of the referenced result.
    pub fn category(&self) -> Category {
        match self {
            Self::Video(_) => Category::Video,
            Self::Article(_) => Category::Article,
            Self::Repo(_) => Category::Repo,
        }
    }

    /// Title (or repository name).
    pub fn title(&self) -> &'a str {
        match self {
            Self::Video(v) => &v.title,
            Self::Article(a) => &a.title,
            Self::Repo(r) => &r.name,
        }
    }

    /// Target URL.
    pub fn url(&self) -> &'a str {
        match self {
            Self::Video(v) => &v.url,
            Self::Article(a) => &a.link,
            Self::Repo(r) => &r.url,
        }
    }

    /// Description (or snippet).
    pub fn description(&self) -> &'a str {
        match self {
            Self::Video(v) => &v.description,
            Self::Article(a) => &a.snippet,
            Self::Repo(r) => &r.description,
        }
    }
}

/// One slot of the combined view: which category, and which index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedEntry {
    /// Category sequence the entry points into.
    pub category: Category,
    /// Index within that category's sequence.
    pub index: usize,
}

/// Outcome of one source for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    /// The category was not requested.
    Disabled,
    /// The source answered (possibly with zero results).
    Ok {
        /// Number of results kept.
        count: usize,
    },
    /// The source was enabled but no request went out, usually because a
    /// credential is missing; its sequence is empty.
    Skipped {
        /// Human-readable reason.
        reason: String,
    },
    /// A request was sent and failed; its sequence is empty.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Per-category fetch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// The category this report covers.
    pub category: Category,
    /// What happened.
    pub status: SourceStatus,
}

impl SourceReport {
    /// Whether a request was actually sent for this category.
    pub fn was_requested(&self) -> bool {
        matches!(self.status, SourceStatus::Ok { .. } | SourceStatus::Failed { .. })
    }

    /// Whether the category was enabled but produced no usable answer.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, SourceStatus::Failed { .. } | SourceStatus::Skipped { .. })
    }
}

/// Everything one query produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedResults {
    /// Video results in source order.
    pub videos: Vec<VideoResult>,
    /// Article results in descending relevance.
    pub articles: Vec<ArticleResult>,
    /// Repository results in source order (most stars first).
    pub repos: Vec<RepoResult>,
    /// Interleaved view over the three sequences.
    pub combined: Vec<CombinedEntry>,
    /// One report per category, in priority order. Empty for a blank query.
    pub reports: Vec<SourceReport>,
}

impl AggregatedResults {
    /// Whether every sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.articles.is_empty() && self.repos.is_empty()
    }

    /// Resolve one combined entry into a borrowed result.
    pub fn resolve(&self, entry: CombinedEntry) -> Option<ResultRef<'_>> {
        match entry.category {
            Category::Video => self.videos.get(entry.index).map(ResultRef::Video),
            Category::Article => self.articles.get(entry.index).map(ResultRef::Article),
            Category::Repo => self.repos.get(entry.index).map(ResultRef::Repo),
        }
    }

    /// The combined view resolved into borrowed results.
    pub fn combined_records(&self) -> impl Iterator<Item = ResultRef<'_>> + '_ {
        self.combined.iter().filter_map(|entry| self.resolve(*entry))
    }

    /// Report for one category, if the query ran.
    pub fn report(&self, category: Category) -> Option<&SourceReport> {
        self.reports.iter().find(|r| r.category == category)
    }
}
