use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Generate a document ID from a template name and creation instant using CRC32
pub fn get_document_id(name: &str, created_at_millis: i64) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    hasher.update(&created_at_millis.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for elements and pages within a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IDGenerator {
    seed: String, // Document ID (CRC32)
    count: u64,   // Sequential counter
}

impl IDGenerator {
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Resume numbering after the highest counter already used by `ids`
    /// that share this seed, so loaded documents never get colliding ids.
    pub fn resume<'a>(seed: impl Into<String>, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let seed = seed.into();
        let prefix = format!("{}-", seed);
        let count = ids
            .into_iter()
            .filter_map(|id| id.strip_prefix(&prefix))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self { seed, count }
    }

    /// Generate next sequential ID
    ///
    /// When the counter is exhausted the last id becomes the new seed and
    /// numbering starts over beneath it.
    pub fn new_id(&mut self) -> String {
        match self.count.checked_add(1) {
            Some(count) => self.count = count,
            None => {
                self.seed = format!("{}-{}", self.seed, self.count);
                self.count = 1;
            }
        }
        format!("{}-{}", self.seed, self.count)
    }

    /// Get document ID seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_generation() {
        let id1 = get_document_id("Course Completion", 1_700_000_000_000);
        let id2 = get_document_id("Course Completion", 1_700_000_000_000);

        // Same inputs always generate the same ID
        assert_eq!(id1, id2);

        // Different instants generate different IDs
        let id3 = get_document_id("Course Completion", 1_700_000_000_001);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::from_seed("abc");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert_eq!(id1, "abc-1");
        assert_eq!(id2, "abc-2");
        assert_eq!(gen.seed(), "abc");
    }

    #[test]
    fn test_resume_skips_used_ids() {
        let existing = ["abc-3", "abc-11", "other-40", "abc-x", "abc"];
        let mut gen = IDGenerator::resume("abc", existing);

        assert_eq!(gen.new_id(), "abc-12");
    }

    #[test]
    fn test_resume_at_counter_limit() {
        let mut gen = IDGenerator::resume("abc", ["abc-4294967295"]);
        assert_eq!(gen.new_id(), "abc-4294967296");

        let last = format!("abc-{}", u64::MAX);
        let mut gen = IDGenerator::resume("abc", [last.as_str()]);
        let next = gen.new_id();
        assert_eq!(next, format!("abc-{}-1", u64::MAX));
        assert_ne!(gen.new_id(), next);
    }
}
