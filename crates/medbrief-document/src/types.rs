#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub source: String,
    pub content_type: String,
}

/// The full extracted text of one input file.
///
/// Extraction failure is an error, never an empty `content` standing in for
/// absence.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// One fixed-stride window over a document's text, input unit for a single
/// inference call.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
    pub chunk_index: usize,
}
