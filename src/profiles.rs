//! Core profile management logic.
//!
//! Pure operations over an in-memory [`ConfigDocument`]:
//! - Adding and removing profiles
//! - Listing and looking up profiles
//! - Selecting the current profile
//!
//! None of these touch the filesystem; callers load and save the document.

use tracing::{debug, info};

use crate::document::{ConfigDocument, Profile};
use crate::error::Error;

/// How the current-profile marker resolves against the profile list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentProfile<'a> {
    /// No current profile selected
    Unset,
    /// Marker names an existing profile
    Active(&'a Profile),
    /// Marker names a profile that is not in the list
    Dangling(&'a str),
}

/// Profiles in stored order
pub fn list_profiles(doc: &ConfigDocument) -> &[Profile] {
    &doc.profiles
}

/// First profile with the given name
pub fn find_profile<'a>(doc: &'a ConfigDocument, name: &str) -> Option<&'a Profile> {
    doc.profiles.iter().find(|p| p.name == name)
}

/// Check if a profile exists
pub fn profile_exists(doc: &ConfigDocument, name: &str) -> bool {
    find_profile(doc, name).is_some()
}

/// Append a profile, rejecting duplicate names
pub fn add_profile(doc: &mut ConfigDocument, profile: Profile) -> Result<(), Error> {
    if profile_exists(doc, &profile.name) {
        return Err(Error::DuplicateName { name: profile.name });
    }

    debug!(name = %profile.name, provider = %profile.provider, "adding profile");
    doc.profiles.push(profile);
    Ok(())
}

/// Remove the first profile with the given name and return it.
///
/// Clears the current-profile marker when it pointed at the removed profile.
pub fn remove_profile(doc: &mut ConfigDocument, name: &str) -> Result<Profile, Error> {
    let index = doc
        .profiles
        .iter()
        .position(|p| p.name == name)
        .ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;

    let removed = doc.profiles.remove(index);
    if doc.current_profile == removed.name {
        info!(name = %removed.name, "removed profile was current, clearing current-profile");
        doc.current_profile.clear();
    }

    debug!(name = %removed.name, remaining = doc.profiles.len(), "removed profile");
    Ok(removed)
}

/// Select the current profile. The name must exist.
pub fn set_current(doc: &mut ConfigDocument, name: &str) -> Result<(), Error> {
    if !profile_exists(doc, name) {
        return Err(Error::NotFound {
            name: name.to_string(),
        });
    }

    debug!(from = %doc.current_profile, to = %name, "switching current profile");
    doc.current_profile = name.to_string();
    Ok(())
}

/// Resolve the current-profile marker
pub fn current(doc: &ConfigDocument) -> CurrentProfile<'_> {
    if doc.current_profile.is_empty() {
        return CurrentProfile::Unset;
    }

    match find_profile(doc, &doc.current_profile) {
        Some(profile) => CurrentProfile::Active(profile),
        None => CurrentProfile::Dangling(&doc.current_profile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> ConfigDocument {
        ConfigDocument {
            profiles: vec![
                Profile::new("alice", "github", "tok1", "https://github.com"),
                Profile::new("bob", "gitlab", "tok2", "https://gitlab.com"),
                Profile::new("carol", "gitea", "tok3", "https://gitea.example.com"),
            ],
            current_profile: String::new(),
        }
    }

    fn names(doc: &ConfigDocument) -> Vec<&str> {
        list_profiles(doc).iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends_last() {
        let mut doc = sample_doc();
        add_profile(&mut doc, Profile::new("dave", "github", "t", "https://x")).unwrap();

        assert_eq!(names(&doc), vec!["alice", "bob", "carol", "dave"]);
        assert_eq!(
            list_profiles(&doc).iter().filter(|p| p.name == "dave").count(),
            1
        );
    }

    #[test]
    fn test_add_to_empty() {
        let mut doc = ConfigDocument::default();
        add_profile(&mut doc, Profile::new("alice", "github", "t", "https://x")).unwrap();
        assert_eq!(names(&doc), vec!["alice"]);
    }

    #[test]
    fn test_add_duplicate() {
        let mut doc = sample_doc();
        let before = doc.clone();

        let err = add_profile(&mut doc, Profile::new("bob", "other", "t", "https://y")).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { ref name } if name == "bob"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut doc = sample_doc();
        let removed = remove_profile(&mut doc, "bob").unwrap();

        assert_eq!(removed.name, "bob");
        assert_eq!(names(&doc), vec!["alice", "carol"]);
    }

    #[test]
    fn test_remove_missing() {
        let mut doc = sample_doc();
        let before = doc.clone();

        let err = remove_profile(&mut doc, "zed").unwrap_err();
        assert!(matches!(err, Error::NotFound { ref name } if name == "zed"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_first_duplicate_only() {
        let mut doc = sample_doc();
        doc.profiles
            .push(Profile::new("alice", "other", "t", "https://dup"));

        let removed = remove_profile(&mut doc, "alice").unwrap();
        assert_eq!(removed.provider, "github");
        assert_eq!(names(&doc), vec!["bob", "carol", "alice"]);
    }

    #[test]
    fn test_remove_current_clears_marker() {
        let mut doc = sample_doc();
        set_current(&mut doc, "carol").unwrap();

        remove_profile(&mut doc, "carol").unwrap();
        assert_eq!(doc.current_profile, "");
        assert_eq!(current(&doc), CurrentProfile::Unset);
    }

    #[test]
    fn test_remove_other_keeps_marker() {
        let mut doc = sample_doc();
        set_current(&mut doc, "carol").unwrap();

        remove_profile(&mut doc, "alice").unwrap();
        assert_eq!(doc.current_profile, "carol");
    }

    #[test]
    fn test_set_current() {
        let mut doc = sample_doc();
        set_current(&mut doc, "bob").unwrap();

        assert_eq!(doc.current_profile, "bob");
        assert_eq!(current(&doc), CurrentProfile::Active(&doc.profiles[1]));
    }

    #[test]
    fn test_set_current_missing() {
        let mut doc = sample_doc();
        set_current(&mut doc, "alice").unwrap();

        let err = set_current(&mut doc, "zed").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(doc.current_profile, "alice");
    }

    #[test]
    fn test_current_dangling() {
        let mut doc = sample_doc();
        doc.current_profile = "ghost".to_string();
        assert_eq!(current(&doc), CurrentProfile::Dangling("ghost"));
    }

    #[test]
    fn test_find_profile_returns_first_match() {
        let mut doc = sample_doc();
        doc.profiles
            .push(Profile::new("bob", "other", "t", "https://dup"));

        assert_eq!(find_profile(&doc, "bob").unwrap().provider, "gitlab");
        assert!(find_profile(&doc, "zed").is_none());
    }
}
