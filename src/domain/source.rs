use super::Candidate;
use crate::error::{Result, VeerError};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Loads a candidate list from a JSON array.
///
/// # Errors
/// - `Io` / `Json` if the file can't be read or parsed
/// - `EmptySource` if the array is empty
/// - `DuplicateCandidate` if two entries share an identity
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let contents = fs::read_to_string(path)?;
    let candidates: Vec<Candidate> = serde_json::from_str(&contents)?;

    if candidates.is_empty() {
        return Err(VeerError::EmptySource(path.to_path_buf()));
    }

    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in &candidates {
        if !seen.insert(&candidate.id) {
            return Err(VeerError::DuplicateCandidate(candidate.id.to_string()));
        }
    }

    Ok(candidates)
}

/// Built-in founders used when no source file is given.
pub fn sample_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("alice-johnson", "Alice Johnson")
            .with_tagline("Early-stage startup founder")
            .with_tags(["AI", "Blockchain"])
            .with_location("San Francisco, CA")
            .with_website("alice.io")
            .with_image("entrepreneur1"),
        Candidate::new("bob-patel", "Bob Patel")
            .with_tagline("Creative director & UX expert")
            .with_tags(["Design", "Branding"])
            .with_location("New York, NY")
            .with_website("bobpatel.design")
            .with_image("entrepreneur2"),
        Candidate::new("carla-ruiz", "Carla Ruiz")
            .with_tagline("Series A ed-tech CEO")
            .with_tags(["Education", "Product"])
            .with_location("Austin, TX")
            .with_website("carlaed.tech")
            .with_image("entrepreneur3"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_candidates_have_unique_ids() {
        let samples = sample_candidates();
        let ids: HashSet<_> = samples.iter().map(|c| c.id.clone()).collect();
        assert_eq!(samples.len(), 3);
        assert_eq!(ids.len(), 3);
        assert_eq!(samples.last().map(|c| c.name.as_str()), Some("Carla Ruiz"));
    }

    #[test]
    fn test_load_candidates_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("candidates.json");
        fs::write(
            &path,
            r#"[
                {"id": "a", "name": "Alice", "tags": ["AI"]},
                {"id": "b", "name": "Bob", "location": "New York, NY"}
            ]"#,
        )
        .unwrap();

        let candidates = load_candidates(&path).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].tags, vec!["AI"]);
        assert_eq!(candidates[1].location.as_deref(), Some("New York, NY"));
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("candidates.json");
        fs::write(
            &path,
            r#"[{"id": "a", "name": "Alice"}, {"id": "a", "name": "Alicia"}]"#,
        )
        .unwrap();

        let err = load_candidates(&path).unwrap_err();
        assert!(matches!(err, VeerError::DuplicateCandidate(ref id) if id == "a"));
    }

    #[test]
    fn test_load_rejects_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("candidates.json");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            load_candidates(&path),
            Err(VeerError::EmptySource(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_candidates(Path::new("/nonexistent/candidates-12345.json"));
        assert!(matches!(result, Err(VeerError::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("candidates.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_candidates(&path), Err(VeerError::Json(_))));
    }
}
