//! The fixed catalog of known platform integrations used to pre-fill the
//! add-source form for platform-type sources.

/// A catalog entry: the fields pre-filled when the platform is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTemplate {
    /// The platform's display name.
    pub name: &'static str,
    /// The revenue-stream tags the platform starts with.
    pub tags: &'static [&'static str],
}

const KNOWN_PLATFORMS: &[PlatformTemplate] = &[
    PlatformTemplate {
        name: "YouTube",
        tags: &[
            "Ad Revenue",
            "Sponsorships",
            "Memberships",
            "Super Chat",
            "Merch Shelf",
        ],
    },
    PlatformTemplate {
        name: "Twitch",
        tags: &[
            "Subscriptions",
            "Bits",
            "Ad Revenue",
            "Gift Subs",
            "Sponsorships",
        ],
    },
    PlatformTemplate {
        name: "TikTok",
        tags: &[
            "Creator Fund",
            "LIVE Gifts",
            "Brand Deals",
            "TikTok Shop",
            "Ad Revenue",
        ],
    },
];

/// Every platform in the catalog.
pub fn known_platforms() -> &'static [PlatformTemplate] {
    KNOWN_PLATFORMS
}

/// The catalog entries whose names are not already among `existing_names`,
/// in catalog order.
pub fn available_platforms(existing_names: &[String]) -> Vec<PlatformTemplate> {
    KNOWN_PLATFORMS
        .iter()
        .filter(|template| !existing_names.iter().any(|name| name == template.name))
        .copied()
        .collect()
}

#[cfg(test)]
mod catalog_tests {
    use crate::catalog::{available_platforms, known_platforms};

    #[test]
    fn catalog_entries_pass_source_validation_limits() {
        for template in known_platforms() {
            assert!((2..=50).contains(&template.name.len()));
            assert!(!template.tags.is_empty());

            for tag in template.tags {
                assert!((2..=20).contains(&tag.len()), "tag out of range: {tag}");
            }
        }
    }

    #[test]
    fn available_platforms_excludes_already_added_names() {
        let existing = vec!["Twitch".to_string()];

        let available = available_platforms(&existing);

        assert_eq!(available.len(), known_platforms().len() - 1);
        assert!(available.iter().all(|template| template.name != "Twitch"));
    }

    #[test]
    fn available_platforms_with_no_existing_sources_is_the_full_catalog() {
        assert_eq!(available_platforms(&[]), known_platforms().to_vec());
    }
}
