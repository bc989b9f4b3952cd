//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{Collection, Post};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Post Fixtures
    // =========================================================================

    /// Create a minimal post with required fields only.
    pub fn minimal_post(id: &str, body: &str) -> Post {
        Post {
            id: id.to_string(),
            slug: None,
            token: None,
            font: Some("norm".to_string()),
            language: None,
            rtl: None,
            created: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            updated: None,
            title: String::new(),
            content: body.to_string(),
            views: 0,
            tags: vec![],
            images: vec![],
            owner_name: None,
            collection: None,
        }
    }

    /// Create an anonymous post with a known edit token.
    pub fn anonymous_post(id: &str, token: &str, body: &str) -> Post {
        let mut post = Self::minimal_post(id, body);
        post.token = Some(token.to_string());
        post
    }

    /// Create a titled post with a slug, for placing in a collection.
    pub fn collection_post(id: &str, slug: &str, title: &str, body: &str) -> Post {
        let mut post = Self::minimal_post(id, body);
        post.slug = Some(slug.to_string());
        post.title = title.to_string();
        post
    }

    // =========================================================================
    // Collection Fixtures
    // =========================================================================

    /// Create a minimal collection.
    pub fn minimal_collection(alias: &str, title: &str) -> Collection {
        Collection {
            alias: alias.to_string(),
            title: title.to_string(),
            description: String::new(),
            style_sheet: String::new(),
            private: false,
            views: 0,
            domain: None,
            email: None,
            url: Some(format!("https://write.as/{alias}/")),
            total_posts: 0,
            posts: None,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    /// `(username, password, pro)`.
    pub users: Vec<(&'static str, &'static str, bool)>,
    /// `(owner, collection)`.
    pub collections: Vec<(&'static str, Collection)>,
    /// `(post, owner, collection alias)`.
    pub posts: Vec<(Post, Option<&'static str>, Option<&'static str>)>,
    /// Organization aliases.
    pub organizations: Vec<&'static str>,
}

impl DefaultScenario {
    fn new() -> Self {
        let users = vec![("demo", "demo", true), ("free", "free", false)];

        let mut tester = Fixtures::minimal_collection("tester", "Tester");
        tester.description = "A blog for testing.".to_string();
        let collections = vec![("demo", tester)];

        let posts = vec![
            (
                Fixtures::collection_post(
                    "olx6uk7064heqltf",
                    "hello-world",
                    "Hello, World",
                    "This is the first post.",
                ),
                Some("demo"),
                Some("tester"),
            ),
            (
                Fixtures::collection_post(
                    "q8ol0e3p8jwg5ewa",
                    "second-post",
                    "Second Post",
                    "This is the *second* post.",
                ),
                Some("demo"),
                Some("tester"),
            ),
            (
                Fixtures::anonymous_post("anon0000000001", "anon-token", "An anonymous post."),
                None,
                None,
            ),
        ];

        Self {
            users,
            collections,
            posts,
            organizations: vec!["write-as"],
        }
    }
}
