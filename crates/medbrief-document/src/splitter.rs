use super::types::{Chunk, Document};

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub stride: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            stride: 800,
        }
    }
}

/// Splits document text into overlapping fixed-stride character windows.
///
/// Window `i` starts at `i * stride`; windows are at most `chunk_size`
/// characters and the last one may be shorter. Boundaries are character
/// positions, not word or sentence boundaries.
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    #[must_use]
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        let text = &document.content;
        if text.is_empty() {
            return Vec::new();
        }

        split_chars(text, self.config.chunk_size, self.config.stride)
            .into_iter()
            .enumerate()
            .map(|(i, content)| Chunk {
                content,
                chunk_index: i,
            })
            .collect()
    }
}

fn split_chars(text: &str, chunk_size: usize, stride: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = stride.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    fn make_doc(content: &str) -> Document {
        Document {
            content: content.to_owned(),
            metadata: DocumentMetadata {
                source: "test".to_owned(),
                content_type: "text/plain".to_owned(),
            },
        }
    }

    fn splitter(chunk_size: usize, stride: usize) -> TextSplitter {
        TextSplitter::new(SplitterConfig { chunk_size, stride })
    }

    #[test]
    fn empty_document() {
        let chunks = splitter(1024, 800).split(&make_doc(""));
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_document_single_chunk() {
        let chunks = splitter(1024, 800).split(&make_doc("Patient is stable."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Patient is stable.");
        assert_eq!(chunks[0].chunk_index, 0);
    }

    #[test]
    fn default_window_over_2000_chars() {
        let text = "x".repeat(2000);
        let chunks = TextSplitter::new(SplitterConfig::default()).split(&make_doc(&text));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content.len(), 1024);
        assert_eq!(chunks[1].content.len(), 1024);
        assert_eq!(chunks[2].content.len(), 400);
    }

    #[test]
    fn windows_start_at_stride_multiples() {
        let text: String = ('a'..='z').collect();
        let chunks = splitter(10, 7).split(&make_doc(&text));
        for (i, chunk) in chunks.iter().enumerate() {
            let expected: String = text.chars().skip(i * 7).take(10).collect();
            assert_eq!(chunk.content, expected);
        }
    }

    #[test]
    fn consecutive_windows_overlap_by_size_minus_stride() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = splitter(10, 7).split(&make_doc(text));
        assert!(chunks.len() > 1);
        assert_eq!(&chunks[0].content[7..10], &chunks[1].content[..3]);
    }

    #[test]
    fn stride_equal_to_chunk_size_tiles_without_overlap() {
        let chunks = split_chars("abcdefghij", 5, 5);
        assert_eq!(chunks, vec!["abcde", "fghij"]);
    }

    #[test]
    fn zero_stride_still_makes_progress() {
        let chunks = split_chars("abcde", 3, 0);
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0], "abc");
    }

    #[test]
    fn deterministic_on_repeated_calls() {
        let doc = make_doc("The MRI shows no acute abnormality. Follow up in six weeks.");
        let s = splitter(16, 9);
        let first = s.split(&doc);
        let second = s.split(&doc);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.content, b.content);
            assert_eq!(a.chunk_index, b.chunk_index);
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "éééééééééé";
        let chunks = splitter(4, 3).split(&make_doc(text));
        assert_eq!(chunks[0].content.chars().count(), 4);
        for chunk in &chunks {
            assert!(chunk.content.chars().all(|c| c == 'é'));
        }
    }

    mod proptest_splitter {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn split_never_panics(
                content in "\\PC{0,5000}",
                chunk_size in 1usize..2000,
                stride in 0usize..1500,
            ) {
                let s = TextSplitter::new(SplitterConfig { chunk_size, stride });
                let _ = s.split(&make_doc(&content));
            }

            #[test]
            fn windows_bounded_by_chunk_size(
                content in "[a-z ]{1,500}",
                chunk_size in 1usize..200,
                stride in 1usize..200,
            ) {
                let s = TextSplitter::new(SplitterConfig { chunk_size, stride });
                for chunk in s.split(&make_doc(&content)) {
                    prop_assert!(chunk.content.chars().count() <= chunk_size);
                }
            }

            #[test]
            fn chunks_cover_all_content_when_stride_le_size(
                content in "[a-z ]{1,500}",
                chunk_size in 10usize..200,
                stride in 1usize..10,
            ) {
                let s = TextSplitter::new(SplitterConfig { chunk_size, stride });
                let chunks = s.split(&make_doc(&content));
                prop_assert!(!chunks.is_empty());
                let covered: usize = chunks
                    .last()
                    .map_or(0, |c| (chunks.len() - 1) * stride + c.content.chars().count());
                prop_assert_eq!(covered, content.chars().count());
            }

            #[test]
            fn chunk_indices_sequential(
                content in "[a-z. ]{1,1000}",
                chunk_size in 5usize..100,
                stride in 1usize..100,
            ) {
                let s = TextSplitter::new(SplitterConfig { chunk_size, stride });
                for (i, chunk) in s.split(&make_doc(&content)).iter().enumerate() {
                    prop_assert_eq!(chunk.chunk_index, i);
                }
            }
        }
    }
}
