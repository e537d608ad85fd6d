//! Window content: what each title shows and how it is obtained.
//!
//! Static pages resolve immediately. The blog index and individual posts are
//! read from the site directory by `ContentLoader`, so their windows open
//! with a placeholder that is swapped in place once the read completes.

mod loader;
mod pages;
mod source;

pub use loader::{ContentLoader, FetchOutcome, FetchRequest, PendingFetches};
pub use source::{ContentError, ContentSource, SiteDirectory};

use serde::Deserialize;

use crate::components::browser::BrowserState;
use crate::components::contact_form::ContactForm;
use crate::constants::{POSTS_DIR, POSTS_INDEX};

pub const BLOG_INDEX_TITLE: &str = "My Blog Posts";
pub const PROJECTS_TITLE: &str = "Projects";
pub const CONTACT_TITLE: &str = "Contact";
pub const BROWSER_TITLE: &str = "Browser";

pub const POST_ERROR_TEXT: &str = "Error: Could not load post content.";
pub const INDEX_ERROR_TEXT: &str = "Error loading blog posts.";

/// Titles that are never treated as blog posts.
const NON_POST_TITLES: &[&str] = &[
    BLOG_INDEX_TITLE,
    "About Me",
    PROJECTS_TITLE,
    "Project 1",
    "Project 2",
    CONTACT_TITLE,
    "Notepad",
    "Settings",
    BROWSER_TITLE,
];

/// One entry of `posts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostEntry {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderItems {
    Loading,
    Loaded(Vec<String>),
    Failed(String),
}

/// A folder window: a heading followed by documents that open on double-click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub heading: String,
    pub items: FolderItems,
    pub selected: usize,
}

impl Folder {
    pub fn new(heading: impl Into<String>, items: FolderItems) -> Self {
        Self {
            heading: heading.into(),
            items,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        match &self.items {
            FolderItems::Loaded(entries) => entries,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowContent {
    Loading,
    Markdown(String),
    Folder(Folder),
    ContactForm(ContactForm),
    Browser(BrowserState),
    Error(String),
}

/// How a title's content is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Page(&'static str),
    Projects,
    BlogIndex,
    Contact,
    Browser,
    Post { slug: String },
}

/// A resource that has to be read from the site directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    PostIndex,
    Post { slug: String },
}

impl Resource {
    /// Path of the resource relative to the site root.
    pub fn path(&self) -> String {
        match self {
            Resource::PostIndex => format!("{POSTS_DIR}/{POSTS_INDEX}"),
            Resource::Post { slug } => format!("{POSTS_DIR}/{slug}.md"),
        }
    }
}

/// Lowercase the title and replace each space with a hyphen.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

pub fn classify(title: &str) -> ContentKind {
    if !NON_POST_TITLES.contains(&title) {
        return ContentKind::Post {
            slug: slugify(title),
        };
    }
    match title {
        BLOG_INDEX_TITLE => ContentKind::BlogIndex,
        PROJECTS_TITLE => ContentKind::Projects,
        CONTACT_TITLE => ContentKind::Contact,
        BROWSER_TITLE => ContentKind::Browser,
        other => ContentKind::Page(pages::page_for(other)),
    }
}

/// Content a window shows right after it opens, plus the read that will
/// replace it, if any.
pub fn initial_content(title: &str) -> (WindowContent, Option<Resource>) {
    match classify(title) {
        ContentKind::Page(markdown) => (WindowContent::Markdown(markdown.to_string()), None),
        ContentKind::Projects => (
            WindowContent::Folder(Folder::new(
                "My Projects",
                FolderItems::Loaded(vec!["Project 1".to_string(), "Project 2".to_string()]),
            )),
            None,
        ),
        ContentKind::BlogIndex => (
            WindowContent::Folder(Folder::new(BLOG_INDEX_TITLE, FolderItems::Loading)),
            Some(Resource::PostIndex),
        ),
        ContentKind::Contact => (WindowContent::ContactForm(ContactForm::default()), None),
        ContentKind::Browser => (WindowContent::Browser(BrowserState::default()), None),
        ContentKind::Post { slug } => (WindowContent::Loading, Some(Resource::Post { slug })),
    }
}

/// Turn a finished read into the content that replaces the placeholder.
/// Failures become an in-window message; nothing propagates further.
pub fn resolve(resource: &Resource, result: Result<String, ContentError>) -> WindowContent {
    match resource {
        Resource::Post { slug } => match result {
            Ok(markdown) => WindowContent::Markdown(markdown),
            Err(err) => {
                tracing::warn!(%slug, error = %err, "error fetching post");
                WindowContent::Error(POST_ERROR_TEXT.to_string())
            }
        },
        Resource::PostIndex => {
            let items = result.and_then(|raw| {
                serde_json::from_str::<Vec<PostEntry>>(&raw).map_err(ContentError::from)
            });
            let items = match items {
                Ok(posts) => FolderItems::Loaded(posts.into_iter().map(|p| p.title).collect()),
                Err(err) => {
                    tracing::warn!(error = %err, "error loading blog posts");
                    FolderItems::Failed(INDEX_ERROR_TEXT.to_string())
                }
            };
            WindowContent::Folder(Folder::new(BLOG_INDEX_TITLE, items))
        }
    }
}
